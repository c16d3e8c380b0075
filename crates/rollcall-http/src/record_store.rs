//! [`HttpRecordStore`]: the directory, reached over its JSON API.
//!
//! | Call | Request | Notes |
//! |------|---------|-------|
//! | create | `POST /employees` | 409 → [`StoreError::Conflict`] |
//! | by address | `GET /employees?contact_address=` | 404 → `None` |
//! | by credential | `GET /employees/card/{id}` | 404 → [`StoreError::NotFound`] |
//! | sign-in | `POST /employees/sign-in` | |
//! | list | `GET /employees` | |

use std::time::Duration;

use reqwest::{Client, Response, StatusCode, Url};
use rollcall_core::{
  person::PersonRecord,
  store::{RecordStore, StoreError},
};
use serde::Serialize;
use tracing::debug;

use crate::{Result, build_client, endpoint, failure_message, parse_base};

/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct HttpRecordStore {
  client: Client,
  base:   Url,
}

#[derive(Serialize)]
struct SignInBody<'a> {
  contact_address: &'a str,
  credential_id:   &'a str,
}

fn transport(e: reqwest::Error) -> StoreError { StoreError::Transport(Box::new(e)) }

async fn rejected(resp: Response) -> StoreError {
  let status = resp.status();
  let message = failure_message(resp).await;
  match status {
    StatusCode::CONFLICT => StoreError::Conflict(message),
    StatusCode::NOT_FOUND => StoreError::NotFound(message),
    _ => StoreError::Rejected {
      status: status.as_u16(),
      message,
    },
  }
}

impl HttpRecordStore {
  pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
    Ok(Self {
      client: build_client(timeout)?,
      base:   parse_base(base_url)?,
    })
  }

  fn url(&self, segments: &[&str]) -> Url { endpoint(&self.base, segments) }
}

impl RecordStore for HttpRecordStore {
  async fn create_record(&self, record: PersonRecord) -> Result<(), StoreError> {
    let resp = self
      .client
      .post(self.url(&["employees"]))
      .json(&record)
      .send()
      .await
      .map_err(transport)?;

    if !resp.status().is_success() {
      return Err(rejected(resp).await);
    }
    debug!(person_id = %record.person_id, "directory record created");
    Ok(())
  }

  async fn find_by_contact_address(
    &self,
    address: &str,
  ) -> Result<Option<PersonRecord>, StoreError> {
    let resp = self
      .client
      .get(self.url(&["employees"]))
      .query(&[("contact_address", address)])
      .send()
      .await
      .map_err(transport)?;

    if resp.status() == StatusCode::NOT_FOUND {
      return Ok(None);
    }
    if !resp.status().is_success() {
      return Err(rejected(resp).await);
    }
    // A directory may also answer 200 with `null` for an unknown address.
    resp.json::<Option<PersonRecord>>().await.map_err(transport)
  }

  async fn find_by_credential(&self, credential_id: &str) -> Result<PersonRecord, StoreError> {
    let resp = self
      .client
      .get(self.url(&["employees", "card", credential_id]))
      .send()
      .await
      .map_err(transport)?;

    if !resp.status().is_success() {
      return Err(rejected(resp).await);
    }
    resp.json().await.map_err(transport)
  }

  async fn record_sign_in(&self, address: &str, credential_id: &str) -> Result<(), StoreError> {
    let resp = self
      .client
      .post(self.url(&["employees", "sign-in"]))
      .json(&SignInBody {
        contact_address: address,
        credential_id,
      })
      .send()
      .await
      .map_err(transport)?;

    if !resp.status().is_success() {
      return Err(rejected(resp).await);
    }
    Ok(())
  }

  async fn list_all(&self) -> Result<Vec<PersonRecord>, StoreError> {
    let resp = self
      .client
      .get(self.url(&["employees"]))
      .send()
      .await
      .map_err(transport)?;

    if !resp.status().is_success() {
      return Err(rejected(resp).await);
    }
    resp.json().await.map_err(transport)
  }
}
