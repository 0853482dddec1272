//! Rate limited client for the CRPT documents API.
//!
//! Documents are validated, mapped onto the API's JSON schema and posted to a
//! single endpoint. Every submission first takes a permit from a fixed-window
//! rate limiter, so no more than the configured number of requests leave the
//! process per window; callers over the limit wait for the next window.
//!
//! ```rust,no_run
//! use crpt_client::client::DocumentClient;
//! use crpt_client::models::Document;
//! use crpt_client::utility::rate_limiter::TimeUnit;
//!
//! # async fn example(document: Document) -> Result<(), Box<dyn std::error::Error>> {
//! // At most 5 documents per second.
//! let client = DocumentClient::new(TimeUnit::Seconds, 5)?;
//! let response = client.submit(&document).await?;
//! println!("{}", response);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod metrics;
pub mod models;
pub mod settings;
pub mod utility;
