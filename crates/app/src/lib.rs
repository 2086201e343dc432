//! Bookshop application services, repository ports and the YAML catalog.

pub mod catalog;
pub mod context;
pub mod domain;
