//! Handlers for `/employees` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/employees` | Every directory record |
//! | `POST` | `/employees` | Body: [`CreateEmployeeBody`]; returns 201 + names |

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{DateTime, Utc};
use rollcall_core::{
  Recognition,
  image::ImageHandle,
  person::{AttendanceStatus, EnrollmentRequest, PersonRecord},
  provider::MatchingProvider,
  store::RecordStore,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateEmployeeBody {
  #[serde(default)]
  pub first_name:      String,
  #[serde(default)]
  pub last_name:       String,
  #[serde(default)]
  pub contact_address: String,
  #[serde(default)]
  pub credential_id:   String,
  pub image:           ImageHandle,
}

impl From<CreateEmployeeBody> for EnrollmentRequest {
  fn from(b: CreateEmployeeBody) -> Self {
    EnrollmentRequest {
      credential_id:   b.credential_id,
      first_name:      b.first_name,
      last_name:       b.last_name,
      contact_address: b.contact_address,
      image:           b.image,
    }
  }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateEmployeeResponse {
  pub first_name: String,
  pub last_name:  String,
}

/// `POST /employees`: enroll a face and create the directory record.
pub async fn create<S, P>(
  State(recognition): State<Recognition<S, P>>,
  body: Result<Json<CreateEmployeeBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + 'static,
  P: MatchingProvider + 'static,
{
  let Json(body) = body?;
  let enrolled = recognition.enroll(body.into()).await?;
  Ok((
    StatusCode::CREATED,
    Json(CreateEmployeeResponse {
      first_name: enrolled.first_name,
      last_name:  enrolled.last_name,
    }),
  ))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// One entry of `GET /employees`.
#[derive(Debug, Serialize, Deserialize)]
pub struct EmployeeSummary {
  pub person_id:          Uuid,
  pub credential_id:      String,
  pub first_name:         String,
  pub last_name:          String,
  pub contact_address:    String,
  pub external_reference: String,
  pub attendance_status:  AttendanceStatus,
  pub sign_in_time:       Option<DateTime<Utc>>,
  pub sign_out_time:      Option<DateTime<Utc>>,
}

impl From<PersonRecord> for EmployeeSummary {
  fn from(p: PersonRecord) -> Self {
    EmployeeSummary {
      person_id:          p.person_id,
      credential_id:      p.credential_id,
      first_name:         p.first_name,
      last_name:          p.last_name,
      contact_address:    p.contact_address,
      external_reference: p.external_reference,
      attendance_status:  p.attendance_status,
      sign_in_time:       p.last_sign_in,
      sign_out_time:      p.last_sign_out,
    }
  }
}

/// `GET /employees`
pub async fn list<S, P>(
  State(recognition): State<Recognition<S, P>>,
) -> Result<Json<Vec<EmployeeSummary>>, ApiError>
where
  S: RecordStore + 'static,
  P: MatchingProvider + 'static,
{
  let people = recognition.list_all().await?;
  Ok(Json(people.into_iter().map(EmployeeSummary::from).collect()))
}
