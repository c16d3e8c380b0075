//! Client tests against small axum fakes bound to an ephemeral port.

use std::{
  collections::HashMap,
  sync::{Arc, Mutex},
  time::Duration,
};

use axum::{
  Json, Router,
  extract::{Path, Query},
  http::StatusCode,
  routing::{get, post},
};
use rollcall_core::{
  image::ImageHandle,
  person::{AttendanceStatus, PersonRecord},
  provider::{IndexFaceInput, MatchingProvider, QualityFilter, SearchFacesInput},
  store::{RecordStore, StoreError},
  taxonomy::{self, MatchError, ProviderErrorKind},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use uuid::Uuid;

use crate::{Error, HttpMatchingProvider, HttpRecordStore};

const TIMEOUT: Duration = Duration::from_secs(5);

async fn serve(router: Router) -> String {
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
  format!("http://{addr}")
}

fn person() -> PersonRecord {
  PersonRecord {
    person_id:          Uuid::new_v4(),
    credential_id:      "C-1".into(),
    first_name:         "Jane".into(),
    last_name:          "Doe".into(),
    contact_address:    "jane.doe@example.com".into(),
    external_reference: "jane.doeATexample.com".into(),
    attendance_status:  AttendanceStatus::SignedOut,
    last_sign_in:       None,
    last_sign_out:      None,
  }
}

// ─── Construction ────────────────────────────────────────────────────────────

#[test]
fn rejects_unusable_base_urls() {
  assert!(matches!(
    HttpRecordStore::new("not a url", TIMEOUT),
    Err(Error::InvalidUrl { .. })
  ));
  assert!(matches!(
    HttpMatchingProvider::new("mailto:faces@example.com", TIMEOUT),
    Err(Error::InvalidUrl { .. })
  ));
}

// ─── Record store ────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_posts_the_record() {
  let seen = Arc::new(Mutex::new(None::<Value>));
  let captured = seen.clone();
  let base = serve(Router::new().route(
    "/directory/employees",
    post(move |Json(body): Json<Value>| {
      let captured = captured.clone();
      async move {
        *captured.lock().unwrap() = Some(body);
        StatusCode::CREATED
      }
    }),
  ))
  .await;

  let store = HttpRecordStore::new(&format!("{base}/directory/"), TIMEOUT).unwrap();
  let record = person();
  store.create_record(record.clone()).await.unwrap();

  let body = seen.lock().unwrap().clone().unwrap();
  assert_eq!(body["contact_address"], "jane.doe@example.com");
  assert_eq!(body["external_reference"], "jane.doeATexample.com");
  assert_eq!(body["person_id"], record.person_id.to_string());
}

#[tokio::test]
async fn create_conflict_is_reported() {
  let base = serve(Router::new().route(
    "/employees",
    post(|| async { (StatusCode::CONFLICT, Json(json!({ "error": "address taken" }))) }),
  ))
  .await;

  let store = HttpRecordStore::new(&base, TIMEOUT).unwrap();
  match store.create_record(person()).await {
    Err(StoreError::Conflict(message)) => assert_eq!(message, "address taken"),
    other => panic!("expected conflict, got {other:?}"),
  }
}

#[tokio::test]
async fn create_server_error_is_rejected() {
  let base = serve(Router::new().route(
    "/employees",
    post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
  ))
  .await;

  let store = HttpRecordStore::new(&base, TIMEOUT).unwrap();
  match store.create_record(person()).await {
    Err(StoreError::Rejected { status, message }) => {
      assert_eq!(status, 503);
      assert_eq!(message, "maintenance");
    }
    other => panic!("expected rejection, got {other:?}"),
  }
}

#[tokio::test]
async fn find_by_address_sends_query_and_maps_404_to_none() {
  let record = person();
  let body = serde_json::to_value(&record).unwrap();
  let base = serve(Router::new().route(
    "/employees",
    get(move |Query(q): Query<HashMap<String, String>>| {
      let body = body.clone();
      async move {
        match q.get("contact_address").map(String::as_str) {
          Some("jane.doe@example.com") => Ok(Json(body)),
          _ => Err(StatusCode::NOT_FOUND),
        }
      }
    }),
  ))
  .await;

  let store = HttpRecordStore::new(&base, TIMEOUT).unwrap();
  let found = store.find_by_contact_address("jane.doe@example.com").await.unwrap();
  assert_eq!(found, Some(record));

  let missing = store.find_by_contact_address("ghost@example.com").await.unwrap();
  assert!(missing.is_none());
}

#[tokio::test]
async fn find_by_credential_encodes_path_and_maps_404() {
  let record = person();
  let body = serde_json::to_value(&record).unwrap();
  let base = serve(Router::new().route(
    "/employees/card/{id}",
    get(move |Path(id): Path<String>| {
      let body = body.clone();
      async move {
        if id == "C 1/A" {
          Ok(Json(body))
        } else {
          Err((StatusCode::NOT_FOUND, Json(json!({ "error": "no such card" }))))
        }
      }
    }),
  ))
  .await;

  let store = HttpRecordStore::new(&base, TIMEOUT).unwrap();
  assert_eq!(store.find_by_credential("C 1/A").await.unwrap(), record);
  assert!(matches!(
    store.find_by_credential("C-404").await,
    Err(StoreError::NotFound(m)) if m == "no such card"
  ));
}

#[tokio::test]
async fn sign_in_and_list_round_trip() {
  let seen = Arc::new(Mutex::new(None::<Value>));
  let captured = seen.clone();
  let listing = serde_json::to_value(vec![person(), person()]).unwrap();
  let base = serve(
    Router::new()
      .route(
        "/employees/sign-in",
        post(move |Json(body): Json<Value>| {
          let captured = captured.clone();
          async move {
            *captured.lock().unwrap() = Some(body);
            StatusCode::OK
          }
        }),
      )
      .route("/employees", get(move || std::future::ready(Json(listing.clone())))),
  )
  .await;

  let store = HttpRecordStore::new(&base, TIMEOUT).unwrap();
  store.record_sign_in("jane.doe@example.com", "C-1").await.unwrap();
  assert_eq!(
    seen.lock().unwrap().clone().unwrap(),
    json!({ "contact_address": "jane.doe@example.com", "credential_id": "C-1" })
  );

  assert_eq!(store.list_all().await.unwrap().len(), 2);
}

#[tokio::test]
async fn find_by_address_treats_null_body_as_missing() {
  let base = serve(Router::new().route("/employees", get(|| async { Json(Value::Null) }))).await;

  let store = HttpRecordStore::new(&base, TIMEOUT).unwrap();
  let found = store.find_by_contact_address("ghost@example.com").await.unwrap();
  assert!(found.is_none());
}

#[tokio::test]
async fn unreachable_directory_is_a_transport_error() {
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  drop(listener);

  let store = HttpRecordStore::new(&format!("http://{addr}"), TIMEOUT).unwrap();
  assert!(matches!(store.list_all().await, Err(StoreError::Transport(_))));
}

#[tokio::test]
async fn slow_directory_times_out() {
  let base = serve(Router::new().route(
    "/employees",
    get(|| async {
      tokio::time::sleep(Duration::from_secs(2)).await;
      Json(json!([]))
    }),
  ))
  .await;

  let store = HttpRecordStore::new(&base, Duration::from_millis(100)).unwrap();
  assert!(matches!(store.list_all().await, Err(StoreError::Transport(_))));
}

// ─── Matching provider ───────────────────────────────────────────────────────

fn index_input() -> IndexFaceInput {
  IndexFaceInput {
    collection_id:      "testPhotos".into(),
    external_reference: "jane.doeATexample.com".into(),
    image:              ImageHandle::inline(b"jpeg".to_vec()),
    quality_filter:     QualityFilter::Auto,
  }
}

fn search_input() -> SearchFacesInput {
  SearchFacesInput {
    collection_id:  "testPhotos".into(),
    threshold:      90.0,
    max_candidates: 5,
    image:          ImageHandle::stored("sample-images", "probe.jpg"),
  }
}

#[tokio::test]
async fn index_face_sends_reference_and_maps_records() {
  let seen = Arc::new(Mutex::new(None::<Value>));
  let captured = seen.clone();
  let base = serve(Router::new().route(
    "/collections/{id}/faces",
    post(move |Path(id): Path<String>, Json(body): Json<Value>| {
      let captured = captured.clone();
      async move {
        assert_eq!(id, "testPhotos");
        *captured.lock().unwrap() = Some(body);
        Json(json!({
          "face_records": [
            { "face_id": "f-1", "external_image_id": "jane.doeATexample.com", "confidence": 99.5 }
          ]
        }))
      }
    }),
  ))
  .await;

  let provider = HttpMatchingProvider::new(&base, TIMEOUT).unwrap();
  let faces = provider.index_face(index_input()).await.unwrap();
  assert_eq!(faces.len(), 1);
  assert_eq!(faces[0].face_id, "f-1");
  assert_eq!(faces[0].confidence, 99.5);

  let body = seen.lock().unwrap().clone().unwrap();
  assert_eq!(body["external_image_id"], "jane.doeATexample.com");
  assert_eq!(body["quality_filter"], "AUTO");
  assert_eq!(body["image"], json!({ "kind": "inline", "bytes": "anBlZw==" }));
}

#[tokio::test]
async fn search_keeps_provider_order() {
  let base = serve(Router::new().route(
    "/collections/{id}/search",
    post(|Json(body): Json<Value>| async move {
      assert_eq!(body["face_match_threshold"], 90.0);
      assert_eq!(body["max_faces"], 5);
      Json(json!({
        "face_matches": [
          { "external_image_id": "aATexample.com", "similarity": 97.0 },
          { "external_image_id": "bATexample.com", "similarity": 99.0 }
        ]
      }))
    }),
  ))
  .await;

  let provider = HttpMatchingProvider::new(&base, TIMEOUT).unwrap();
  let candidates = provider.search_faces_by_image(search_input()).await.unwrap();
  let refs: Vec<_> = candidates.iter().map(|c| c.external_reference.as_str()).collect();
  assert_eq!(refs, ["aATexample.com", "bATexample.com"]);
}

#[tokio::test]
async fn provider_error_body_becomes_provider_error() {
  let base = serve(Router::new().route(
    "/collections/{id}/search",
    post(|| async {
      (
        StatusCode::BAD_REQUEST,
        Json(json!({ "code": "InvalidImageFormatException", "message": "not a jpeg" })),
      )
    }),
  ))
  .await;

  let provider = HttpMatchingProvider::new(&base, TIMEOUT).unwrap();
  match provider.search_faces_by_image(search_input()).await {
    Err(MatchError::Provider(e)) => {
      assert_eq!(e.kind, ProviderErrorKind::InvalidImageFormat);
      assert_eq!(e.message, "not a jpeg");
    }
    other => panic!("expected provider error, got {other:?}"),
  }
}

#[tokio::test]
async fn error_body_without_code_is_unknown_provider_error() {
  let base = serve(Router::new().route(
    "/collections/{id}/faces",
    post(|| async { (StatusCode::BAD_REQUEST, Json(json!({ "message": "bad" }))) }),
  ))
  .await;

  let provider = HttpMatchingProvider::new(&base, TIMEOUT).unwrap();
  let err = provider.index_face(index_input()).await.unwrap_err();
  assert!(matches!(&err, MatchError::Provider(e) if e.kind == ProviderErrorKind::Other(String::new())));

  let normalized = taxonomy::normalize(&err);
  assert_eq!(normalized.code, taxonomy::UNKNOWN_PROVIDER_ERROR);
  assert_eq!(normalized.message, "bad");
}

#[tokio::test]
async fn opaque_gateway_failure_normalizes_to_unknown_error() {
  let base = serve(Router::new().route(
    "/collections/{id}/faces",
    post(|| async { (StatusCode::BAD_GATEWAY, "<html>bad gateway</html>") }),
  ))
  .await;

  let provider = HttpMatchingProvider::new(&base, TIMEOUT).unwrap();
  let err = provider.index_face(index_input()).await.unwrap_err();
  assert!(matches!(err, MatchError::Transport(_)));
  assert_eq!(taxonomy::normalize(&err).code, taxonomy::UNKNOWN_ERROR);
}
