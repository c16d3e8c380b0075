//! JSON-over-HTTP clients for Rollcall's two collaborators.
//!
//! [`HttpRecordStore`] implements [`rollcall_core::store::RecordStore`] and
//! [`HttpMatchingProvider`] implements
//! [`rollcall_core::provider::MatchingProvider`]. Both are built once at
//! startup and shared; the inner [`reqwest::Client`] pools connections and
//! every request carries its own timeout from the moment it is issued.

mod provider;
mod record_store;

pub mod error;

pub use error::{Error, Result};
pub use provider::HttpMatchingProvider;
pub use record_store::HttpRecordStore;

use std::time::Duration;

use reqwest::{Client, Response, Url};
use serde::Deserialize;

/// Timeout applied to every outbound call unless configured otherwise.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(5);

fn build_client(timeout: Duration) -> Result<Client> {
  Ok(
    Client::builder()
      .timeout(timeout)
      .connect_timeout(timeout)
      .build()?,
  )
}

fn parse_base(base_url: &str) -> Result<Url> {
  let url = Url::parse(base_url).map_err(|e| Error::InvalidUrl {
    url:    base_url.to_owned(),
    reason: e.to_string(),
  })?;
  if url.cannot_be_a_base() {
    return Err(Error::InvalidUrl {
      url:    base_url.to_owned(),
      reason: "not a base URL".into(),
    });
  }
  Ok(url)
}

/// `base` with `segments` appended, each percent-encoded.
fn endpoint(base: &Url, segments: &[&str]) -> Url {
  let mut url = base.clone();
  if let Ok(mut path) = url.path_segments_mut() {
    path.pop_if_empty().extend(segments);
  }
  url
}

#[derive(Deserialize)]
struct ErrorBody {
  #[serde(alias = "error")]
  message: String,
}

/// Best-effort human-readable message from a failed response.
async fn failure_message(resp: Response) -> String {
  let status = resp.status();
  let text = resp.text().await.unwrap_or_default();
  match serde_json::from_str::<ErrorBody>(&text) {
    Ok(body) if !body.message.is_empty() => body.message,
    _ if !text.trim().is_empty() => text.trim().to_owned(),
    _ => status.to_string(),
  }
}

#[cfg(test)]
mod tests;
