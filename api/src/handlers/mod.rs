//! Error translation between the domain and HTTP

pub mod error;

pub use error::{domain_error_response, validation_error_response};
