//! Error types for service calls.

use storymaker_flow::FormatError;
use thiserror::Error;

/// Errors that can occur while calling a StoryMaker service.
#[derive(Debug, Error)]
pub enum ClientError {
  /// The HTTP client could not be constructed.
  #[error("failed to build http client: {0}")]
  Build(#[source] reqwest::Error),

  /// The request never produced a response (connect, timeout, body read).
  #[error("request to {url} failed: {source}")]
  Transport {
    url: String,
    #[source]
    source: reqwest::Error,
  },

  /// The service answered with a non-2xx status.
  #[error("{status} {reason}")]
  Status {
    url: String,
    status: u16,
    reason: String,
  },

  /// The body is not the JSON the contract describes.
  #[error("invalid response from {url}: {message}")]
  Decode { url: String, message: String },

  /// The run response decoded but its node mapping is malformed.
  #[error(transparent)]
  Format(#[from] FormatError),
}

impl ClientError {
  /// Whether this failure happened on the wire rather than in the payload.
  pub fn is_transport(&self) -> bool {
    matches!(self, ClientError::Transport { .. } | ClientError::Status { .. })
  }
}
