//! Books

mod repository;

pub use repository::*;
