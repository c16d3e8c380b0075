//! Opaque image handles passed through to the matching provider.

use serde::{Deserialize, Serialize};

/// An image the provider should index or search with.
///
/// The core never looks inside; it hands the value to the provider as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImageHandle {
  /// Raw encoded image bytes; base64 on the JSON wire.
  Inline {
    #[serde(with = "base64_bytes")]
    bytes: Vec<u8>,
  },
  /// An object already uploaded to the provider's blob storage.
  Stored { bucket: String, name: String },
}

impl ImageHandle {
  pub fn inline(bytes: impl Into<Vec<u8>>) -> Self {
    Self::Inline {
      bytes: bytes.into(),
    }
  }

  pub fn stored(bucket: impl Into<String>, name: impl Into<String>) -> Self {
    Self::Stored {
      bucket: bucket.into(),
      name:   name.into(),
    }
  }
}

mod base64_bytes {
  use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
  use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

  pub fn serialize<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&B64.encode(bytes))
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
    let encoded = String::deserialize(d)?;
    B64.decode(encoded.as_bytes()).map_err(D::Error::custom)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn inline_bytes_use_base64() {
    let json = serde_json::to_value(ImageHandle::inline(b"face".to_vec())).unwrap();
    assert_eq!(json, serde_json::json!({ "kind": "inline", "bytes": "ZmFjZQ==" }));
  }

  #[test]
  fn stored_reference_deserializes() {
    let handle: ImageHandle = serde_json::from_str(
      r#"{"kind":"stored","bucket":"sample-images","name":"badge-photo.jpg"}"#,
    )
    .unwrap();
    assert_eq!(handle, ImageHandle::stored("sample-images", "badge-photo.jpg"));
  }

  #[test]
  fn invalid_base64_is_rejected() {
    let result = serde_json::from_str::<ImageHandle>(r#"{"kind":"inline","bytes":"!!"}"#);
    assert!(result.is_err());
  }
}
