//! The `RecordStore` trait, the core's view of the directory.
//!
//! Implemented by transport crates (e.g. `rollcall-http`) and by
//! [`MemoryRecordStore`](crate::memory::MemoryRecordStore). Workflows depend
//! on this abstraction only.

use std::future::Future;

use thiserror::Error;

use crate::person::PersonRecord;

#[derive(Debug, Error)]
pub enum StoreError {
  /// A record with the same contact address already exists.
  #[error("conflict: {0}")]
  Conflict(String),

  #[error("not found: {0}")]
  NotFound(String),

  /// The store answered, but refused the request.
  #[error("rejected ({status}): {message}")]
  Rejected { status: u16, message: String },

  #[error("transport error: {0}")]
  Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Outbound interface to the directory / record store.
pub trait RecordStore: Send + Sync {
  /// Persist a new record.
  ///
  /// The store is the authority on contact-address uniqueness: a second
  /// record for an existing address must fail with
  /// [`StoreError::Conflict`].
  fn create_record(
    &self,
    record: PersonRecord,
  ) -> impl Future<Output = Result<(), StoreError>> + Send + '_;

  /// Find the record for `address`. Returns `None` if there is none.
  fn find_by_contact_address<'a>(
    &'a self,
    address: &'a str,
  ) -> impl Future<Output = Result<Option<PersonRecord>, StoreError>> + Send + 'a;

  /// Find the record holding `credential_id`; unknown credentials are
  /// [`StoreError::NotFound`].
  fn find_by_credential<'a>(
    &'a self,
    credential_id: &'a str,
  ) -> impl Future<Output = Result<PersonRecord, StoreError>> + Send + 'a;

  /// Record a sign-in event for the person.
  fn record_sign_in<'a>(
    &'a self,
    address: &'a str,
    credential_id: &'a str,
  ) -> impl Future<Output = Result<(), StoreError>> + Send + 'a;

  fn list_all(
    &self,
  ) -> impl Future<Output = Result<Vec<PersonRecord>, StoreError>> + Send + '_;
}
