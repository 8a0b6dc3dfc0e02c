//! Request and response DTOs

pub mod otp;
pub mod registry;
