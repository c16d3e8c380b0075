//! Normalisation of matching-provider failures.
//!
//! The provider reports failures with its own vocabulary of error codes.
//! [`normalize`] folds them, and anything else that can go wrong on the way to
//! the provider, into a stable `(code, message)` pair that workflows embed in
//! their `InvalidArgument` outcome.

use std::fmt;

use thiserror::Error;

/// Code reported for a provider error kind this build does not recognise.
pub const UNKNOWN_PROVIDER_ERROR: &str = "unknown provider error";
/// Code reported for failures that did not come from the provider at all.
pub const UNKNOWN_ERROR: &str = "unknown error";

/// Failure kinds the provider is known to report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderErrorKind {
  InvalidImageReference,
  InvalidParameter,
  ImageTooLarge,
  AccessDenied,
  InternalError,
  Throttled,
  CapacityExceeded,
  ResourceNotFound,
  InvalidImageFormat,
  /// Any code outside the list above, kept verbatim.
  Other(String),
}

impl ProviderErrorKind {
  /// Parse the provider's wire code.
  pub fn from_code(code: &str) -> Self {
    match code {
      "InvalidS3ObjectException" => Self::InvalidImageReference,
      "InvalidParameterException" => Self::InvalidParameter,
      "ImageTooLargeException" => Self::ImageTooLarge,
      "AccessDeniedException" => Self::AccessDenied,
      "InternalServerError" => Self::InternalError,
      "ThrottlingException" => Self::Throttled,
      "ProvisionedThroughputExceededException" => Self::CapacityExceeded,
      "ResourceNotFoundException" => Self::ResourceNotFound,
      "InvalidImageFormatException" => Self::InvalidImageFormat,
      other => Self::Other(other.to_owned()),
    }
  }

  /// The stable code reported to callers.
  pub fn code(&self) -> &str {
    match self {
      Self::InvalidImageReference => "InvalidS3ObjectException",
      Self::InvalidParameter => "InvalidParameterException",
      Self::ImageTooLarge => "ImageTooLargeException",
      Self::AccessDenied => "AccessDeniedException",
      Self::InternalError => "InternalServerError",
      Self::Throttled => "ThrottlingException",
      Self::CapacityExceeded => "ProvisionedThroughputExceededException",
      Self::ResourceNotFound => "ResourceNotFoundException",
      Self::InvalidImageFormat => "InvalidImageFormatException",
      Self::Other(_) => UNKNOWN_PROVIDER_ERROR,
    }
  }
}

impl fmt::Display for ProviderErrorKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Other(raw) => f.write_str(raw),
      known => f.write_str(known.code()),
    }
  }
}

/// A failure reported by the provider itself.
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct ProviderError {
  pub kind:    ProviderErrorKind,
  pub message: String,
}

/// Anything that can go wrong calling the matching provider.
#[derive(Debug, Error)]
pub enum MatchError {
  #[error("provider error: {0}")]
  Provider(#[from] ProviderError),

  #[error("transport error: {0}")]
  Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A provider failure folded into the stable taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
  pub code:    String,
  pub message: String,
}

impl fmt::Display for Normalized {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.code, self.message)
  }
}

/// Fold `err` into a `(code, message)` pair. Never fails and never returns an
/// empty message.
pub fn normalize(err: &MatchError) -> Normalized {
  let (code, message) = match err {
    MatchError::Provider(e) => {
      let message = match &e.kind {
        ProviderErrorKind::Other(raw) if e.message.is_empty() => raw.clone(),
        ProviderErrorKind::Other(raw) if !raw.is_empty() => format!("{raw}: {}", e.message),
        _ => e.message.clone(),
      };
      (e.kind.code().to_owned(), message)
    }
    MatchError::Transport(source) => (UNKNOWN_ERROR.to_owned(), source.to_string()),
  };

  let message = if message.trim().is_empty() {
    format!("{code} (no message)")
  } else {
    message
  };

  Normalized { code, message }
}
