//! Minutes Rust SDK
//!
//! Async client library for the Minutes HTTP service.
//!
//! # Example
//!
//! ```no_run
//! use minutes_sdk::MinutesClient;
//!
//! # async fn example() -> Result<(), minutes_sdk::SdkError> {
//! let client = MinutesClient::new("http://localhost:3000");
//!
//! let created = client
//!     .create_transcript("Sam will send the report by Friday.")
//!     .await?;
//! for item in &created.action_items {
//!     println!("{} ({:?})", item.task, item.owner);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod error;

pub use client::{CreatedTranscript, HealthStatus, MinutesClient};
pub use error::SdkError;
