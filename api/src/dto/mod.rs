//! Request and response data transfer objects

pub mod auth;

pub use auth::{
    OtpIssuedResponse, ResendOtpRequest, SendOtpRequest, SignupOtpRequest, VerifyOtpRequest,
};
