//! Sift Core
//!
//! Core types and abstractions for Sift.
//!
//! This crate contains:
//! - Domain types: analysis records, the accumulated poll state and its status machine
//! - DTOs: Data transfer objects exchanged with the lookup and chat services

pub mod domain;
pub mod dto;
