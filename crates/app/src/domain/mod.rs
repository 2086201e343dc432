//! Bookshop Domain Concerns

pub mod activities;
pub mod books;
mod errors;
pub mod pricing;

pub use errors::RepositoryError;
