//! Orchestration across the matching provider and the directory.
//!
//! [`Recognition`] bundles one long-lived handle to each collaborator with the
//! decision [`Policy`]. It is cheap to clone and holds no mutable state, so a
//! single instance serves every concurrent request.
//!
//! | Operation | Module |
//! |-----------|--------|
//! | [`Recognition::enroll`] | `enroll` |
//! | [`Recognition::identify_by_face`] | `identify` |
//! | [`Recognition::identify_by_credential`] | `credential` |
//! | [`Recognition::record_sign_in`] | `attendance` |
//! | [`Recognition::list_all`] | `roster` |

mod attendance;
mod credential;
mod enroll;
mod identify;
mod roster;

use std::sync::Arc;

use crate::{codec::CorrelationKeyCodec, provider::MatchingProvider, store::RecordStore};

/// Detection confidence an indexed face needs before enrollment trusts it.
pub const ENROLL_CONFIDENCE_THRESHOLD: f32 = 70.0;
/// Match confidence the provider must reach for a search hit.
pub const SEARCH_CONFIDENCE_THRESHOLD: f32 = 90.0;
pub const MAX_CANDIDATES: u32 = 5;
pub const DEFAULT_COLLECTION: &str = "testPhotos";

/// Thresholds and naming shared by every workflow.
#[derive(Debug, Clone)]
pub struct Policy {
  pub collection_id:    String,
  pub enroll_threshold: f32,
  pub search_threshold: f32,
  pub max_candidates:   u32,
  pub codec:            CorrelationKeyCodec,
}

impl Default for Policy {
  fn default() -> Self {
    Self {
      collection_id:    DEFAULT_COLLECTION.to_owned(),
      enroll_threshold: ENROLL_CONFIDENCE_THRESHOLD,
      search_threshold: SEARCH_CONFIDENCE_THRESHOLD,
      max_candidates:   MAX_CANDIDATES,
      codec:            CorrelationKeyCodec::default(),
    }
  }
}

/// The workflows, wired to their collaborators.
pub struct Recognition<S, P> {
  store:    Arc<S>,
  provider: Arc<P>,
  policy:   Policy,
}

impl<S, P> Clone for Recognition<S, P> {
  fn clone(&self) -> Self {
    Self {
      store:    Arc::clone(&self.store),
      provider: Arc::clone(&self.provider),
      policy:   self.policy.clone(),
    }
  }
}

impl<S, P> Recognition<S, P>
where
  S: RecordStore,
  P: MatchingProvider,
{
  pub fn new(store: Arc<S>, provider: Arc<P>, policy: Policy) -> Self {
    Self {
      store,
      provider,
      policy,
    }
  }

  pub fn policy(&self) -> &Policy { &self.policy }

  pub fn store(&self) -> &Arc<S> { &self.store }

  pub fn provider(&self) -> &Arc<P> { &self.provider }
}
