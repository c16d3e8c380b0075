//! Error type for `rollcall-http` client construction.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid base url {url:?}: {reason}")]
  InvalidUrl { url: String, reason: String },

  #[error("http client error: {0}")]
  Client(#[from] reqwest::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
