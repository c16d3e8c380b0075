//! The `MatchingProvider` trait and its request/response types.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::{image::ImageHandle, taxonomy::MatchError};

/// Provider-side filter applied to detected faces before indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QualityFilter {
  #[default]
  Auto,
  None,
}

/// Parameters for [`MatchingProvider::index_face`].
#[derive(Debug, Clone)]
pub struct IndexFaceInput {
  pub collection_id:      String,
  pub external_reference: String,
  pub image:              ImageHandle,
  pub quality_filter:     QualityFilter,
}

/// Parameters for [`MatchingProvider::search_faces_by_image`].
#[derive(Debug, Clone)]
pub struct SearchFacesInput {
  pub collection_id:  String,
  /// Minimum match confidence, 0–100.
  pub threshold:      f32,
  pub max_candidates: u32,
  pub image:          ImageHandle,
}

/// One face the provider indexed, with its detection confidence.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedFace {
  pub face_id:            String,
  pub external_reference: String,
  pub confidence:         f32,
}

/// One search hit. Consumed immediately; never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceMatchCandidate {
  pub external_reference: String,
  pub confidence:         f32,
}

/// Outbound interface to the biometric matching provider.
///
/// Implementations are long-lived and shared across requests.
pub trait MatchingProvider: Send + Sync {
  /// Index the face(s) in `input.image`, tagged with the external reference.
  /// Faces come back best-first.
  fn index_face(
    &self,
    input: IndexFaceInput,
  ) -> impl Future<Output = Result<Vec<IndexedFace>, MatchError>> + Send + '_;

  /// Search the collection for faces resembling `input.image`, highest
  /// confidence first.
  fn search_faces_by_image(
    &self,
    input: SearchFacesInput,
  ) -> impl Future<Output = Result<Vec<FaceMatchCandidate>, MatchError>> + Send + '_;
}
