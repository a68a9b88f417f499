//! Data Transfer Objects
//!
//! Wire shapes for the lookup service (`/api/db`), the search ingestion
//! endpoints and the chat session service.

pub mod chat;
pub mod lookup;
pub mod search;
