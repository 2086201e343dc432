//! Pricing

mod errors;
pub mod models;
pub mod responses;
pub mod service;

pub use errors::ValidationFailure;
pub use service::*;
