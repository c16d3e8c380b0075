//! Handlers that identify a person and sign them in.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/employees/search/face` | Body: `{"image": ...}` |
//! | `GET`  | `/employees/card/{credential_id}` | |
//!
//! Both answer with [`SearchEmployeeResponse`]. A sign-in that could not be
//! recorded is reported in `attendance`; the identification still succeeds.

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
};
use rollcall_core::{
  Recognition,
  image::ImageHandle,
  person::{Attendance, Identification},
  provider::MatchingProvider,
  store::RecordStore,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct SearchByFaceBody {
  pub image: ImageHandle,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchEmployeeResponse {
  pub person_id:       Uuid,
  pub credential_id:   String,
  pub first_name:      String,
  pub last_name:       String,
  pub contact_address: String,
  pub attendance:      Attendance,
}

impl From<Identification> for SearchEmployeeResponse {
  fn from(id: Identification) -> Self {
    let p = id.person;
    SearchEmployeeResponse {
      person_id:       p.person_id,
      credential_id:   p.credential_id,
      first_name:      p.first_name,
      last_name:       p.last_name,
      contact_address: p.contact_address,
      attendance:      id.attendance,
    }
  }
}

/// `POST /employees/search/face`
pub async fn by_face<S, P>(
  State(recognition): State<Recognition<S, P>>,
  body: Result<Json<SearchByFaceBody>, JsonRejection>,
) -> Result<Json<SearchEmployeeResponse>, ApiError>
where
  S: RecordStore + 'static,
  P: MatchingProvider + 'static,
{
  let Json(body) = body?;
  let identified = recognition.identify_by_face(body.image).await?;
  Ok(Json(identified.into()))
}

/// `GET /employees/card/{credential_id}`
pub async fn by_card<S, P>(
  State(recognition): State<Recognition<S, P>>,
  Path(credential_id): Path<String>,
) -> Result<Json<SearchEmployeeResponse>, ApiError>
where
  S: RecordStore + 'static,
  P: MatchingProvider + 'static,
{
  let identified = recognition.identify_by_credential(&credential_id).await?;
  Ok(Json(identified.into()))
}
