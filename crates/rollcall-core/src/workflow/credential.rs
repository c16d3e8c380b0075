use tracing::info;

use super::Recognition;
use crate::{
  Error, Operation, Result, person::Identification, provider::MatchingProvider,
  store::RecordStore,
};

const OP: Operation = Operation::IdentifyByCredential;

impl<S, P> Recognition<S, P>
where
  S: RecordStore,
  P: MatchingProvider,
{
  /// Resolve a badge credential to a directory record and sign the person in.
  pub async fn identify_by_credential(&self, credential_id: &str) -> Result<Identification> {
    let person = self
      .store
      .find_by_credential(credential_id)
      .await
      .map_err(|e| Error::Internal(OP, format!("directory lookup failed: {e}")))?;

    let attendance = self.sign_in_after_identification(&person).await;
    info!(person_id = %person.person_id, signed_in = attendance.is_recorded(), "identified by credential");

    Ok(Identification { person, attendance })
  }
}
