//! Repository interfaces for the persistence boundary

pub mod user;

pub use user::{MockUserRepository, UserRepository};
