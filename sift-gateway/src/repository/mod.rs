//! Repository Module
//!
//! Database access for the gateway.

pub mod search;

pub use search as search_repository;
