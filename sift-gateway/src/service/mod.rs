//! Service Module
//!
//! Business logic layer for the gateway.

pub mod search;

pub use search as search_service;
