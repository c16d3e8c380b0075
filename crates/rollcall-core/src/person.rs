//! Person records and the requests that create them.
//!
//! A [`PersonRecord`] is owned by the directory. The core only ever holds one
//! transiently, as a decision input or a value to pass back to the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::image::ImageHandle;

/// Attendance state as tracked by the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
  #[default]
  Absent,
  SignedIn,
  SignedOut,
  /// A status this build does not know about.
  #[serde(other)]
  Unknown,
}

/// The canonical identity unit held by the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
  pub person_id:          Uuid,
  pub credential_id:      String,
  pub first_name:         String,
  pub last_name:          String,
  pub contact_address:    String,
  /// Provider-facing key derived from `contact_address`.
  pub external_reference: String,
  #[serde(default)]
  pub attendance_status:  AttendanceStatus,
  #[serde(default)]
  pub last_sign_in:       Option<DateTime<Utc>>,
  #[serde(default)]
  pub last_sign_out:      Option<DateTime<Utc>>,
}

/// Caller-supplied input to enrollment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentRequest {
  #[serde(default)]
  pub credential_id:   String,
  #[serde(default)]
  pub first_name:      String,
  #[serde(default)]
  pub last_name:       String,
  #[serde(default)]
  pub contact_address: String,
  pub image:           ImageHandle,
}

/// What a successful enrollment hands back.
#[derive(Debug, Clone)]
pub struct Enrolled {
  pub first_name: String,
  pub last_name:  String,
  pub record:     PersonRecord,
}

/// Whether the sign-in side effect of an identification went through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Attendance {
  Recorded,
  Failed {
    code:    crate::Code,
    message: String,
  },
}

impl Attendance {
  pub fn is_recorded(&self) -> bool { matches!(self, Self::Recorded) }
}

/// A resolved person plus the outcome of recording their sign-in.
///
/// Identification and attendance are reported separately so a failed sign-in
/// never hides a successful match.
#[derive(Debug, Clone)]
pub struct Identification {
  pub person:     PersonRecord,
  pub attendance: Attendance,
}
