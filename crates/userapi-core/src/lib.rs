//! User API Core Library
//!
//! The contract layer of the user service: the persistence port every
//! storage adapter implements, and the error taxonomy those adapters
//! surface to the orchestration layer.

// Re-export pure types from userapi-types
pub use userapi_types::*;

pub mod error;
pub mod ports;

pub use error::{Result, StoreError};
pub use ports::UserStore;
