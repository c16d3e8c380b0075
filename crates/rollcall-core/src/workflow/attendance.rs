use tracing::warn;

use super::Recognition;
use crate::{
  Error, Operation, Result, address,
  person::{Attendance, PersonRecord},
  provider::MatchingProvider,
  store::RecordStore,
};

const OP: Operation = Operation::SignIn;

impl<S, P> Recognition<S, P>
where
  S: RecordStore,
  P: MatchingProvider,
{
  /// Record a sign-in for the person identified by `address` and
  /// `credential_id`.
  pub async fn record_sign_in(&self, address: &str, credential_id: &str) -> Result<()> {
    if address.is_empty() || credential_id.is_empty() {
      return Err(Error::InvalidArgument(
        OP,
        "contact address and credential id cannot be empty".into(),
      ));
    }
    if !address::is_valid(address) {
      return Err(Error::InvalidArgument(OP, "invalid contact address format".into()));
    }

    self
      .store
      .record_sign_in(address, credential_id)
      .await
      .map_err(|e| Error::Internal(OP, format!("recording sign-in failed: {e}")))
  }

  /// Sign `person` in and report the outcome instead of failing.
  pub(super) async fn sign_in_after_identification(&self, person: &PersonRecord) -> Attendance {
    match self
      .record_sign_in(&person.contact_address, &person.credential_id)
      .await
    {
      Ok(()) => Attendance::Recorded,
      Err(e) => {
        warn!(person_id = %person.person_id, error = %e, "identified person but sign-in failed");
        Attendance::Failed {
          code:    e.code(),
          message: e.to_string(),
        }
      }
    }
  }
}
