//! Wiring for the `rollcall` binary.
//!
//! [`ServerConfig`] is deserialised by the `config` crate from an optional
//! TOML file layered under `ROLLCALL_*` environment variables. Every field has
//! a default, so an empty configuration yields a working local setup.

use std::{sync::Arc, time::Duration};

use rollcall_core::{CorrelationKeyCodec, Policy, Recognition, workflow};
use rollcall_http::{HttpMatchingProvider, HttpRecordStore};
use serde::Deserialize;

/// Runtime server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                 String,
  pub port:                 u16,
  pub record_store_url:     String,
  pub provider_url:         String,
  pub collection_id:        String,
  pub enroll_threshold:     f32,
  pub search_threshold:     f32,
  pub max_candidates:       u32,
  pub call_timeout_secs:    u64,
  pub correlation_encoding: CorrelationKeyCodec,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                 "0.0.0.0".to_owned(),
      port:                 50051,
      record_store_url:     "http://localhost:50052".to_owned(),
      provider_url:         "http://localhost:50053".to_owned(),
      collection_id:        workflow::DEFAULT_COLLECTION.to_owned(),
      enroll_threshold:     workflow::ENROLL_CONFIDENCE_THRESHOLD,
      search_threshold:     workflow::SEARCH_CONFIDENCE_THRESHOLD,
      max_candidates:       workflow::MAX_CANDIDATES,
      call_timeout_secs:    rollcall_http::DEFAULT_CALL_TIMEOUT.as_secs(),
      correlation_encoding: CorrelationKeyCodec::default(),
    }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn call_timeout(&self) -> Duration { Duration::from_secs(self.call_timeout_secs) }

  pub fn policy(&self) -> Policy {
    Policy {
      collection_id:    self.collection_id.clone(),
      enroll_threshold: self.enroll_threshold,
      search_threshold: self.search_threshold,
      max_candidates:   self.max_candidates,
      codec:            self.correlation_encoding,
    }
  }

  /// Build the long-lived clients and bundle them with the policy.
  pub fn recognition(
    &self,
  ) -> rollcall_http::Result<Recognition<HttpRecordStore, HttpMatchingProvider>> {
    let timeout = self.call_timeout();
    let store = HttpRecordStore::new(&self.record_store_url, timeout)?;
    let provider = HttpMatchingProvider::new(&self.provider_url, timeout)?;
    Ok(Recognition::new(Arc::new(store), Arc::new(provider), self.policy()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn from_toml(source: &str) -> ServerConfig {
    config::Config::builder()
      .add_source(config::File::from_str(source, config::FileFormat::Toml))
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap()
  }

  #[test]
  fn empty_config_uses_defaults() {
    let cfg = from_toml("");
    assert_eq!(cfg.address(), "0.0.0.0:50051");
    assert_eq!(cfg.call_timeout(), Duration::from_secs(5));

    let policy = cfg.policy();
    assert_eq!(policy.collection_id, "testPhotos");
    assert_eq!(policy.enroll_threshold, 70.0);
    assert_eq!(policy.search_threshold, 90.0);
    assert_eq!(policy.max_candidates, 5);
    assert_eq!(policy.codec, CorrelationKeyCodec::Legacy);
  }

  #[test]
  fn file_overrides_flow_into_policy() {
    let cfg = from_toml(
      r#"
        port = 8080
        collection_id = "lobby"
        search_threshold = 95.5
        max_candidates = 2
        call_timeout_secs = 1
        correlation_encoding = "escaped"
      "#,
    );
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.call_timeout(), Duration::from_secs(1));

    let policy = cfg.policy();
    assert_eq!(policy.collection_id, "lobby");
    assert_eq!(policy.search_threshold, 95.5);
    assert_eq!(policy.enroll_threshold, 70.0);
    assert_eq!(policy.max_candidates, 2);
    assert_eq!(policy.codec, CorrelationKeyCodec::Escaped);
  }

  #[test]
  fn recognition_rejects_bad_urls() {
    let cfg = ServerConfig { provider_url: "not a url".into(), ..ServerConfig::default() };
    assert!(cfg.recognition().is_err());
    assert!(ServerConfig::default().recognition().is_ok());
  }
}
