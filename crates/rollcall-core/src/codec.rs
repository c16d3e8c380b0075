//! Mapping between contact addresses and provider external references.
//!
//! The matching provider's external-reference alphabet has no `@`, so the
//! address has to be rewritten before a face can be tagged with it, and
//! rewritten back when a matched face is joined to its directory record.

use serde::{Deserialize, Serialize};

/// How a contact address is rewritten into a provider external reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationKeyCodec {
  /// Lower-case, then `@` → `AT`. Compatible with collections indexed by
  /// earlier deployments.
  ///
  /// Lower-casing happens first, so the only upper-case `AT` in a key is a
  /// substituted one and [`decode`](Self::decode) inverts
  /// [`encode`](Self::encode) for any lower-case address.
  #[default]
  Legacy,
  /// Lower-case, then `_` → `__` and `@` → `_a`. Exactly invertible on
  /// lower-case input regardless of content.
  Escaped,
}

impl CorrelationKeyCodec {
  pub fn encode(self, address: &str) -> String {
    let lowered = address.to_lowercase();
    match self {
      Self::Legacy => lowered.replace('@', "AT"),
      Self::Escaped => {
        let mut out = String::with_capacity(lowered.len() + 2);
        for c in lowered.chars() {
          match c {
            '_' => out.push_str("__"),
            '@' => out.push_str("_a"),
            c => out.push(c),
          }
        }
        out
      }
    }
  }

  pub fn decode(self, reference: &str) -> String {
    match self {
      Self::Legacy => reference.replace("AT", "@"),
      Self::Escaped => {
        let mut out = String::with_capacity(reference.len());
        let mut chars = reference.chars();
        while let Some(c) = chars.next() {
          if c != '_' {
            out.push(c);
            continue;
          }
          match chars.next() {
            Some('_') => out.push('_'),
            Some('a') => out.push('@'),
            // Not produced by `encode`; keep the input verbatim.
            Some(other) => {
              out.push('_');
              out.push(other);
            }
            None => out.push('_'),
          }
        }
        out
      }
    }
  }
}
