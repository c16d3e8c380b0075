//! JSON REST surface for Rollcall.
//!
//! Exposes an axum [`Router`] over a [`Recognition`] instance. Listener setup,
//! TLS and request tracing are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = rollcall_api::api_router(recognition).layer(TraceLayer::new_for_http());
//! ```

pub mod employees;
pub mod error;
pub mod search;

use axum::{
  Router,
  routing::{get, post},
};
use rollcall_core::{Recognition, provider::MatchingProvider, store::RecordStore};

pub use error::ApiError;

/// Build the API router for `recognition`.
pub fn api_router<S, P>(recognition: Recognition<S, P>) -> Router<()>
where
  S: RecordStore + 'static,
  P: MatchingProvider + 'static,
{
  Router::new()
    .route("/health", get(|| async { "ok" }))
    .route("/employees", get(employees::list::<S, P>).post(employees::create::<S, P>))
    .route("/employees/search/face", post(search::by_face::<S, P>))
    .route("/employees/card/{credential_id}", get(search::by_card::<S, P>))
    .with_state(recognition)
}

// ─── Integration tests ────────────────────────────────────────────────────────
