//! Storage layer
//!
//! Two interchangeable `UserStore` adapters over embedded SQLite (one with
//! hand-written SQL, one through the ORM), plus the in-memory cache.

pub mod entity;
pub mod memory;
pub mod orm;
pub mod sql;

pub use memory::UserCache;
pub use orm::OrmUserStore;
pub use sql::SqlUserStore;
