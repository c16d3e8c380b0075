//! The uniform outcome type returned by every workflow.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Outcome codes shared by every workflow, independent of which collaborator
/// produced the failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Code {
  InvalidArgument,
  AlreadyExists,
  NotFound,
  Internal,
}

impl Code {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::InvalidArgument => "invalid_argument",
      Self::AlreadyExists => "already_exists",
      Self::NotFound => "not_found",
      Self::Internal => "internal",
    }
  }
}

impl fmt::Display for Code {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// The workflow an error originated from; rendered as the message prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
  Enroll,
  IdentifyByFace,
  IdentifyByCredential,
  SignIn,
  ListAll,
}

impl fmt::Display for Operation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Enroll => "enroll",
      Self::IdentifyByFace => "identify-by-face",
      Self::IdentifyByCredential => "identify-by-credential",
      Self::SignIn => "sign-in",
      Self::ListAll => "list-all",
    })
  }
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("{0}: {1}")]
  InvalidArgument(Operation, String),

  #[error("{0}: {1}")]
  AlreadyExists(Operation, String),

  #[error("{0}: {1}")]
  NotFound(Operation, String),

  #[error("{0}: {1}")]
  Internal(Operation, String),
}

impl Error {
  pub fn code(&self) -> Code {
    match self {
      Self::InvalidArgument(..) => Code::InvalidArgument,
      Self::AlreadyExists(..) => Code::AlreadyExists,
      Self::NotFound(..) => Code::NotFound,
      Self::Internal(..) => Code::Internal,
    }
  }

  pub fn operation(&self) -> Operation {
    match self {
      Self::InvalidArgument(op, _)
      | Self::AlreadyExists(op, _)
      | Self::NotFound(op, _)
      | Self::Internal(op, _) => *op,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
