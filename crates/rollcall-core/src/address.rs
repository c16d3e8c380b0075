//! Contact-address shape validation.

use std::sync::LazyLock;

use regex::Regex;

static CONTACT_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
  )
  .expect("contact address pattern is valid")
});

/// Returns `true` if `address` is email-shaped.
pub fn is_valid(address: &str) -> bool { CONTACT_ADDRESS.is_match(address) }
