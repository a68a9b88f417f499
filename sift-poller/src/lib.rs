//! Sift Poller
//!
//! Session-scoped retrieval of analysis results that are produced
//! asynchronously by a slow external pipeline.
//!
//! Architecture:
//! - Lookup: the `RecordLookup` seam, implemented over HTTP by `SiftClient`
//! - Config: polling interval, per-lookup timeout and stop bounds
//! - Poller: one task per handle that looks the session up, merges partial
//!   records and reports every update until a terminal status is reached
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use sift_client::SiftClient;
//! use sift_poller::{PollerConfig, ResultPoller};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let lookup = Arc::new(SiftClient::new("http://localhost:3000"));
//!     let poller = ResultPoller::new(lookup, PollerConfig::default());
//!
//!     let handle = poller.start("20250119_041143", |state, complete| {
//!         println!("{:?} complete={}", state.youtube_analysis, complete);
//!     })?;
//!
//!     println!("finished: {}", handle.wait().await);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod lookup;
pub mod poller;

pub use config::PollerConfig;
pub use lookup::{LookupError, RecordLookup};
pub use poller::{PollError, PollHandle, ResultPoller};
pub use sift_core::domain::poll::{PollState, PollStatus};
