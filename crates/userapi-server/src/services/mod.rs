//! Business logic services

pub mod users;

pub use users::UserService;
