//! Submission of documents to the documents API.
//!
//! [`DocumentClient`](types::DocumentClient) validates and serializes a
//! [`Document`](crate::models::Document), takes one permit from its rate
//! limiter and hands the JSON payload to a [`Transport`](traits::Transport).
//! [`HttpTransport`](types::HttpTransport) is the `reqwest` based transport
//! used in production.

pub mod constants;
pub mod errors;
pub mod functions;
pub mod impls;
pub mod traits;
pub mod types;

pub use errors::{ClientError, ClientValidationError, TransportError};
pub use traits::Transport;
pub use types::{ClientConfig, DocumentClient, HttpTransport};
