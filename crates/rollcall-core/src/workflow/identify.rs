use tracing::{debug, info};

use super::Recognition;
use crate::{
  Error, Operation, Result,
  image::ImageHandle,
  person::Identification,
  provider::{MatchingProvider, SearchFacesInput},
  store::RecordStore,
  taxonomy,
};

const OP: Operation = Operation::IdentifyByFace;

impl<S, P> Recognition<S, P>
where
  S: RecordStore,
  P: MatchingProvider,
{
  /// Resolve a face to a directory record and sign the person in.
  ///
  /// Only the provider's first candidate is used; candidates are not
  /// re-sorted.
  pub async fn identify_by_face(&self, image: ImageHandle) -> Result<Identification> {
    let candidates = self
      .provider
      .search_faces_by_image(SearchFacesInput {
        collection_id:  self.policy.collection_id.clone(),
        threshold:      self.policy.search_threshold,
        max_candidates: self.policy.max_candidates,
        image,
      })
      .await
      .map_err(|e| Error::InvalidArgument(OP, taxonomy::normalize(&e).to_string()))?;

    let Some(best) = candidates.first() else {
      return Err(Error::NotFound(OP, "no enrolled face matches".into()));
    };
    debug!(
      external_reference = %best.external_reference,
      confidence = best.confidence,
      candidates = candidates.len(),
      "face matched",
    );

    let address = self.policy.codec.decode(&best.external_reference);
    let person = self
      .store
      .find_by_contact_address(&address)
      .await
      .map_err(|e| Error::Internal(OP, format!("directory lookup failed: {e}")))?
      .ok_or_else(|| {
        Error::Internal(OP, format!("matched face has no directory record for {address}"))
      })?;

    let attendance = self.sign_in_after_identification(&person).await;
    info!(person_id = %person.person_id, signed_in = attendance.is_recorded(), "identified by face");

    Ok(Identification { person, attendance })
  }
}
