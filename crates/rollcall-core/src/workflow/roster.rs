use super::Recognition;
use crate::{
  Error, Operation, Result, person::PersonRecord, provider::MatchingProvider,
  store::RecordStore,
};

impl<S, P> Recognition<S, P>
where
  S: RecordStore,
  P: MatchingProvider,
{
  /// Every record in the directory, unchanged.
  pub async fn list_all(&self) -> Result<Vec<PersonRecord>> {
    self
      .store
      .list_all()
      .await
      .map_err(|e| Error::Internal(Operation::ListAll, format!("listing directory failed: {e}")))
  }
}
