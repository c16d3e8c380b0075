use tracing::{debug, info, warn};
use uuid::Uuid;

use super::Recognition;
use crate::{
  Error, Operation, Result, address,
  person::{AttendanceStatus, Enrolled, EnrollmentRequest, PersonRecord},
  provider::{IndexFaceInput, MatchingProvider, QualityFilter},
  store::{RecordStore, StoreError},
  taxonomy,
};

const OP: Operation = Operation::Enroll;

impl<S, P> Recognition<S, P>
where
  S: RecordStore,
  P: MatchingProvider,
{
  /// Register a new person: duplicate check, face indexing, confidence gate,
  /// then record creation.
  ///
  /// The duplicate check and the create are two separate calls; the store's
  /// conflict on create is what finally rejects a concurrent duplicate.
  pub async fn enroll(&self, request: EnrollmentRequest) -> Result<Enrolled> {
    if request.contact_address.is_empty() {
      return Err(Error::InvalidArgument(OP, "missing contact address".into()));
    }
    if !address::is_valid(&request.contact_address) {
      return Err(Error::InvalidArgument(OP, "invalid contact address format".into()));
    }

    let existing = self
      .store
      .find_by_contact_address(&request.contact_address)
      .await
      .map_err(|e| Error::Internal(OP, format!("directory lookup failed: {e}")))?;
    if existing.is_some_and(|r| !r.contact_address.is_empty()) {
      warn!(contact_address = %request.contact_address, "enrollment rejected: already enrolled");
      return Err(Error::AlreadyExists(OP, "person already enrolled".into()));
    }

    let external_reference = self.policy.codec.encode(&request.contact_address);

    debug!(%external_reference, collection = %self.policy.collection_id, "indexing face");
    let faces = self
      .provider
      .index_face(IndexFaceInput {
        collection_id:      self.policy.collection_id.clone(),
        external_reference: external_reference.clone(),
        image:              request.image,
        quality_filter:     QualityFilter::Auto,
      })
      .await
      .map_err(|e| Error::InvalidArgument(OP, taxonomy::normalize(&e).to_string()))?;

    let confidence = faces.first().map(|f| f.confidence);
    if !confidence.is_some_and(|c| c >= self.policy.enroll_threshold) {
      warn!(?confidence, threshold = self.policy.enroll_threshold, "enrollment rejected: no face detected");
      return Err(Error::InvalidArgument(OP, "no face detected".into()));
    }

    let record = PersonRecord {
      person_id:          Uuid::new_v4(),
      credential_id:      request.credential_id,
      first_name:         request.first_name,
      last_name:          request.last_name,
      contact_address:    request.contact_address,
      external_reference,
      attendance_status:  AttendanceStatus::default(),
      last_sign_in:       None,
      last_sign_out:      None,
    };

    self
      .store
      .create_record(record.clone())
      .await
      .map_err(|e| match e {
        StoreError::Conflict(_) => Error::AlreadyExists(OP, "person already enrolled".into()),
        e => Error::Internal(OP, format!("creating directory record failed: {e}")),
      })?;

    info!(
      person_id = %record.person_id,
      external_reference = %record.external_reference,
      "person enrolled",
    );

    Ok(Enrolled {
      first_name: record.first_name.clone(),
      last_name: record.last_name.clone(),
      record,
    })
  }
}
