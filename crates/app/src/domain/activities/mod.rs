//! Activities

mod repository;

pub use repository::*;
