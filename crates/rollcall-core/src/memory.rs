//! In-memory collaborators.
//!
//! [`MemoryRecordStore`] and [`MemoryProvider`] implement the two outbound
//! traits without any I/O. They are meant for development and tests: data is
//! lost when they are dropped. Both count the calls they receive so tests can
//! assert which collaborators a workflow touched.

use std::sync::{
  Mutex, MutexGuard, PoisonError,
  atomic::{AtomicUsize, Ordering},
};

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::{
  image::ImageHandle,
  person::{AttendanceStatus, PersonRecord},
  provider::{FaceMatchCandidate, IndexFaceInput, IndexedFace, MatchingProvider, SearchFacesInput},
  store::{RecordStore, StoreError},
  taxonomy::{MatchError, ProviderError, ProviderErrorKind},
};

fn lock<T>(m: &Mutex<T>) -> Result<MutexGuard<'_, T>, StoreError> {
  m.lock()
    .map_err(|e| StoreError::Transport(e.to_string().into()))
}

// ─── Record store ────────────────────────────────────────────────────────────

/// Per-operation call counters.
#[derive(Debug, Default)]
pub struct StoreCalls {
  pub create:                  AtomicUsize,
  pub find_by_contact_address: AtomicUsize,
  pub find_by_credential:      AtomicUsize,
  pub record_sign_in:          AtomicUsize,
  pub list_all:                AtomicUsize,
}

impl StoreCalls {
  pub fn total(&self) -> usize {
    [
      &self.create,
      &self.find_by_contact_address,
      &self.find_by_credential,
      &self.record_sign_in,
      &self.list_all,
    ]
    .iter()
    .map(|c| c.load(Ordering::SeqCst))
    .sum()
  }
}

/// A directory held in a `Vec`, compared case-insensitively on address.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
  records:   Mutex<Vec<PersonRecord>>,
  pub calls: StoreCalls,
}

impl MemoryRecordStore {
  pub fn new() -> Self { Self::default() }

  /// Seed the store with existing records, bypassing the counters.
  pub fn with_records(records: impl IntoIterator<Item = PersonRecord>) -> Self {
    Self {
      records: Mutex::new(records.into_iter().collect()),
      calls:   StoreCalls::default(),
    }
  }

  /// Snapshot of the stored records, including after a panicked writer.
  pub fn records(&self) -> Vec<PersonRecord> {
    self
      .records
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .clone()
  }
}

impl RecordStore for MemoryRecordStore {
  async fn create_record(&self, record: PersonRecord) -> Result<(), StoreError> {
    self.calls.create.fetch_add(1, Ordering::SeqCst);
    let mut records = lock(&self.records)?;
    if records
      .iter()
      .any(|r| r.contact_address.eq_ignore_ascii_case(&record.contact_address))
    {
      return Err(StoreError::Conflict(format!(
        "{} is already enrolled",
        record.contact_address
      )));
    }
    debug!(person_id = %record.person_id, "memory store: created record");
    records.push(record);
    Ok(())
  }

  async fn find_by_contact_address(
    &self,
    address: &str,
  ) -> Result<Option<PersonRecord>, StoreError> {
    self.calls.find_by_contact_address.fetch_add(1, Ordering::SeqCst);
    let records = lock(&self.records)?;
    Ok(
      records
        .iter()
        .find(|r| r.contact_address.eq_ignore_ascii_case(address))
        .cloned(),
    )
  }

  async fn find_by_credential(
    &self,
    credential_id: &str,
  ) -> Result<PersonRecord, StoreError> {
    self.calls.find_by_credential.fetch_add(1, Ordering::SeqCst);
    let records = lock(&self.records)?;
    records
      .iter()
      .find(|r| r.credential_id == credential_id)
      .cloned()
      .ok_or_else(|| StoreError::NotFound(format!("credential {credential_id}")))
  }

  async fn record_sign_in(
    &self,
    address: &str,
    credential_id: &str,
  ) -> Result<(), StoreError> {
    self.calls.record_sign_in.fetch_add(1, Ordering::SeqCst);
    let mut records = lock(&self.records)?;
    let record = records
      .iter_mut()
      .find(|r| {
        r.contact_address.eq_ignore_ascii_case(address) && r.credential_id == credential_id
      })
      .ok_or_else(|| StoreError::NotFound(format!("{address} / {credential_id}")))?;
    record.attendance_status = AttendanceStatus::SignedIn;
    record.last_sign_in = Some(Utc::now());
    Ok(())
  }

  async fn list_all(&self) -> Result<Vec<PersonRecord>, StoreError> {
    self.calls.list_all.fetch_add(1, Ordering::SeqCst);
    Ok(lock(&self.records)?.clone())
  }
}

// ─── Matching provider ───────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct IndexedImage {
  collection_id:      String,
  image:              ImageHandle,
  external_reference: String,
}

/// A provider that "recognises" a face only when the exact same image handle
/// was indexed before.
///
/// Every indexed face is reported with the configured detection confidence;
/// every search hit with confidence 100.
#[derive(Debug)]
pub struct MemoryProvider {
  indexed:              Mutex<Vec<IndexedImage>>,
  detection_confidence: f32,
  pub index_calls:      AtomicUsize,
  pub search_calls:     AtomicUsize,
}

impl Default for MemoryProvider {
  fn default() -> Self { Self::with_detection_confidence(99.0) }
}

impl MemoryProvider {
  pub fn new() -> Self { Self::default() }

  pub fn with_detection_confidence(confidence: f32) -> Self {
    Self {
      indexed:              Mutex::new(Vec::new()),
      detection_confidence: confidence,
      index_calls:          AtomicUsize::new(0),
      search_calls:         AtomicUsize::new(0),
    }
  }

  fn indexed(&self) -> Result<MutexGuard<'_, Vec<IndexedImage>>, MatchError> {
    self.indexed.lock().map_err(|e| {
      MatchError::Provider(ProviderError {
        kind:    ProviderErrorKind::InternalError,
        message: e.to_string(),
      })
    })
  }
}

impl MatchingProvider for MemoryProvider {
  async fn index_face(&self, input: IndexFaceInput) -> Result<Vec<IndexedFace>, MatchError> {
    self.index_calls.fetch_add(1, Ordering::SeqCst);
    let face = IndexedFace {
      face_id:            Uuid::new_v4().to_string(),
      external_reference: input.external_reference.clone(),
      confidence:         self.detection_confidence,
    };
    self.indexed()?.push(IndexedImage {
      collection_id:      input.collection_id,
      image:              input.image,
      external_reference: input.external_reference,
    });
    Ok(vec![face])
  }

  async fn search_faces_by_image(
    &self,
    input: SearchFacesInput,
  ) -> Result<Vec<FaceMatchCandidate>, MatchError> {
    self.search_calls.fetch_add(1, Ordering::SeqCst);
    let indexed = self.indexed()?;
    Ok(
      indexed
        .iter()
        .filter(|f| f.collection_id == input.collection_id && f.image == input.image)
        .map(|f| FaceMatchCandidate {
          external_reference: f.external_reference.clone(),
          confidence:         100.0,
        })
        .filter(|c| c.confidence >= input.threshold)
        .take(input.max_candidates as usize)
        .collect(),
    )
  }
}
