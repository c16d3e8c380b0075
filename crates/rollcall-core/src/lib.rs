//! Core types, collaborator traits and workflows for Rollcall.
//!
//! Rollcall resolves people by face or badge against two systems it does not
//! own: a biometric matching provider and a directory (record store). This
//! crate holds the orchestration between them and is free of HTTP
//! dependencies; transport crates implement [`store::RecordStore`] and
//! [`provider::MatchingProvider`].

pub mod address;
pub mod codec;
pub mod error;
pub mod image;
pub mod memory;
pub mod person;
pub mod provider;
pub mod store;
pub mod taxonomy;
pub mod workflow;

pub use codec::CorrelationKeyCodec;
pub use error::{Code, Error, Operation, Result};
pub use workflow::{Policy, Recognition};
