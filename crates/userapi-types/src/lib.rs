//! User API Types - Pure type definitions
//!
//! This crate contains only plain data types with no async runtime or I/O
//! dependencies, so every other crate in the workspace can depend on it.

pub mod user;

pub use user::*;
