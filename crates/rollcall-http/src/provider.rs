//! [`HttpMatchingProvider`]: the matching provider's JSON API.
//!
//! | Call | Request |
//! |------|---------|
//! | index | `POST /collections/{id}/faces` |
//! | search | `POST /collections/{id}/search` |
//!
//! Failures carry a `{"code": ..., "message": ...}` body; anything else that
//! goes wrong is reported as a transport error.

use std::time::Duration;

use reqwest::{Client, Response, Url};
use rollcall_core::{
  image::ImageHandle,
  provider::{
    FaceMatchCandidate, IndexFaceInput, IndexedFace, MatchingProvider, QualityFilter,
    SearchFacesInput,
  },
  taxonomy::{MatchError, ProviderError, ProviderErrorKind},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::{Result, build_client, endpoint, parse_base};

/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct HttpMatchingProvider {
  client: Client,
  base:   Url,
}

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct IndexFacesBody<'a> {
  external_image_id: &'a str,
  image:             &'a ImageHandle,
  quality_filter:    QualityFilter,
}

#[derive(Deserialize)]
struct IndexFacesResponse {
  #[serde(default)]
  face_records: Vec<FaceRecord>,
}

#[derive(Deserialize)]
struct FaceRecord {
  face_id:           String,
  #[serde(default)]
  external_image_id: String,
  confidence:        f32,
}

#[derive(Serialize)]
struct SearchFacesBody<'a> {
  image:                &'a ImageHandle,
  face_match_threshold: f32,
  max_faces:            u32,
}

#[derive(Deserialize)]
struct SearchFacesResponse {
  #[serde(default)]
  face_matches: Vec<FaceMatch>,
}

#[derive(Deserialize)]
struct FaceMatch {
  external_image_id: String,
  similarity:        f32,
}

#[derive(Deserialize)]
struct ProviderErrorBody {
  #[serde(default)]
  code:    String,
  #[serde(default)]
  message: String,
}

// ─── Client ──────────────────────────────────────────────────────────────────

fn transport(e: reqwest::Error) -> MatchError { MatchError::Transport(Box::new(e)) }

/// Decode a successful body, or turn the failure into a [`MatchError`].
async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, MatchError> {
  let status = resp.status();
  if status.is_success() {
    return resp.json().await.map_err(transport);
  }

  let text = resp.text().await.map_err(transport)?;
  match serde_json::from_str::<ProviderErrorBody>(&text) {
    Ok(body) => Err(MatchError::Provider(ProviderError {
      kind:    ProviderErrorKind::from_code(&body.code),
      message: body.message,
    })),
    Err(_) => Err(MatchError::Transport(
      format!("provider responded {status}: {}", text.trim()).into(),
    )),
  }
}

impl HttpMatchingProvider {
  pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
    Ok(Self {
      client: build_client(timeout)?,
      base:   parse_base(base_url)?,
    })
  }
}

impl MatchingProvider for HttpMatchingProvider {
  async fn index_face(&self, input: IndexFaceInput) -> Result<Vec<IndexedFace>, MatchError> {
    let url = endpoint(&self.base, &["collections", input.collection_id.as_str(), "faces"]);
    let resp = self
      .client
      .post(url)
      .json(&IndexFacesBody {
        external_image_id: &input.external_reference,
        image:             &input.image,
        quality_filter:    input.quality_filter,
      })
      .send()
      .await
      .map_err(transport)?;

    let body: IndexFacesResponse = decode(resp).await?;
    debug!(faces = body.face_records.len(), "provider indexed faces");
    Ok(
      body
        .face_records
        .into_iter()
        .map(|f| IndexedFace {
          face_id:            f.face_id,
          external_reference: f.external_image_id,
          confidence:         f.confidence,
        })
        .collect(),
    )
  }

  async fn search_faces_by_image(
    &self,
    input: SearchFacesInput,
  ) -> Result<Vec<FaceMatchCandidate>, MatchError> {
    let url = endpoint(&self.base, &["collections", input.collection_id.as_str(), "search"]);
    let resp = self
      .client
      .post(url)
      .json(&SearchFacesBody {
        image:                &input.image,
        face_match_threshold: input.threshold,
        max_faces:            input.max_candidates,
      })
      .send()
      .await
      .map_err(transport)?;

    let body: SearchFacesResponse = decode(resp).await?;
    debug!(matches = body.face_matches.len(), "provider searched faces");
    Ok(
      body
        .face_matches
        .into_iter()
        .map(|m| FaceMatchCandidate {
          external_reference: m.external_image_id,
          confidence:         m.similarity,
        })
        .collect(),
    )
  }
}
