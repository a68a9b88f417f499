//! Core domain types
//!
//! This module contains the core domain structures used across Sift crates.
//! Records are produced by the external analysis pipeline and persisted by the
//! gateway; the poll types are owned by clients waiting on those records.

pub mod poll;
pub mod record;
