use crate::api::metrics;
use crate::models::{AuthorRef, Pitch, PitchDocument, Slug};
use crate::services::auth_service::Session;
use crate::store::ContentStore;
use crate::utils::{parse_action_response, slugify, validate_submission, FieldErrors};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

pub const STATUS_SUCCESS: &str = "SUCCESS";
pub const STATUS_ERROR: &str = "ERROR";

/// Pitch submission as posted by the form. `state` is the opaque prior form
/// state carried across resubmission attempts and echoed into error results.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreatePitchRequest {
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub state: Option<Value>,
    pub title: String,
    pub description: String,
    pub category: String,
    pub link: String,
    pub pitch: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PitchListResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub count: usize,
    pub results: Vec<Pitch>,
}

/// Outcome of the creation workflow. Every variant carries the structured
/// action result the caller merges back into its form state.
#[derive(Debug)]
pub enum CreatePitchResult {
    Created(Value),
    NotSignedIn(Value),
    Invalid(Value),
    StoreError(Value),
}

impl CreatePitchResult {
    pub fn body(&self) -> &Value {
        match self {
            CreatePitchResult::Created(body)
            | CreatePitchResult::NotSignedIn(body)
            | CreatePitchResult::Invalid(body)
            | CreatePitchResult::StoreError(body) => body,
        }
    }
}

fn error_result(prior: Option<&Value>, error: &str) -> Value {
    let mut map = match prior {
        Some(Value::Object(m)) => m.clone(),
        _ => Map::new(),
    };

    map.insert("status".to_string(), json!(STATUS_ERROR));
    map.insert("error".to_string(), json!(error));
    Value::Object(map)
}

fn validation_result(prior: Option<&Value>, field_errors: &FieldErrors) -> Value {
    let mut body = error_result(prior, "Validation Error");
    if let Some(map) = body.as_object_mut() {
        map.insert(
            "fieldErrors".to_string(),
            serde_json::to_value(field_errors).unwrap_or(Value::Null),
        );
    }
    body
}

/// Creates a new pitch document.
///
/// Session precondition, then validation, then a single create mutation.
/// No write happens on any failure path and nothing is retried; the caller
/// resubmits with the echoed state.
pub async fn create_pitch(
    store: &dyn ContentStore,
    session: Option<&Session>,
    request: &CreatePitchRequest,
) -> CreatePitchResult {
    let prior = request.state.as_ref();

    let session = match session {
        Some(s) if s.is_authenticated() => s,
        _ => return CreatePitchResult::NotSignedIn(error_result(prior, "Not signed in")),
    };

    if let Err(field_errors) = validate_submission(
        &request.title,
        &request.description,
        &request.category,
        &request.link,
        &request.pitch,
    ) {
        return CreatePitchResult::Invalid(validation_result(prior, &field_errors));
    }

    let slug = slugify(&request.title);

    let document = PitchDocument {
        _type: "startup".to_string(),
        title: request.title.clone(),
        description: request.description.clone(),
        category: request.category.clone(),
        image: request.link.clone(),
        slug: Slug::new(slug),
        author: AuthorRef::new(session.id.clone()),
        pitch: request.pitch.clone(),
        views: 0,
    };

    match store.create_pitch(&document).await {
        Ok(created) => match parse_action_response(&created) {
            Ok(mut body) => {
                if let Some(map) = body.as_object_mut() {
                    map.insert("status".to_string(), json!(STATUS_SUCCESS));
                    map.insert("error".to_string(), json!(""));
                }
                metrics::increment_pitches_created();
                log::info!("✅ Pitch created: '{}' by {}", request.title, session.id);
                CreatePitchResult::Created(body)
            }
            Err(e) => {
                log::error!("❌ Failed to normalize created pitch: {}", e);
                CreatePitchResult::StoreError(error_result(prior, &e))
            }
        },
        Err(e) => {
            log::error!("❌ Failed to persist pitch '{}': {}", request.title, e);
            CreatePitchResult::StoreError(error_result(prior, &e))
        }
    }
}

/// Listing/search read. An absent or empty query lists everything, most
/// recent first; empty results are not an error.
pub async fn list_pitches(
    store: &dyn ContentStore,
    query: Option<&str>,
) -> Result<PitchListResponse, String> {
    let search = query.filter(|q| !q.trim().is_empty());

    let results = store.search_pitches(search).await?;

    Ok(PitchListResponse {
        success: true,
        query: search.map(String::from),
        count: results.len(),
        results,
    })
}

pub async fn get_pitch(store: &dyn ContentStore, id: &str) -> Result<Option<Pitch>, String> {
    store.pitch_by_id(id).await
}

/// Best-effort view increment: one mutation per visit, no deduplication by
/// viewer. Failure is captured and logged, never propagated to the caller.
pub async fn record_view(store: &dyn ContentStore, id: &str) {
    match store.increment_views(id).await {
        Ok(()) => {
            metrics::increment_views_recorded();
        }
        Err(e) => {
            metrics::increment_view_failures();
            log::warn!("⚠️ Failed to record view for {}: {}", id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mock::MockStore;

    fn session(id: &str) -> Session {
        Session {
            id: id.to_string(),
            github_id: 7,
            username: "octocat".to_string(),
            name: None,
            email: None,
            image: None,
        }
    }

    fn acme_request() -> CreatePitchRequest {
        CreatePitchRequest {
            state: None,
            title: "Acme".to_string(),
            description: "We build widgets for everyone".to_string(),
            category: "Tech".to_string(),
            link: "https://img.example/a.png".to_string(),
            pitch: "# Acme\nWe build widgets.".to_string(),
        }
    }

    #[tokio::test]
    async fn test_valid_submission_creates_exactly_once() {
        let store = MockStore::new();
        let session = session("U1");

        let result = create_pitch(&store, Some(&session), &acme_request()).await;

        assert_eq!(store.created_pitch_count(), 1);
        let body = match result {
            CreatePitchResult::Created(body) => body,
            other => panic!("expected Created, got {:?}", other),
        };
        assert_eq!(body["status"], STATUS_SUCCESS);
        assert_eq!(body["error"], "");
        assert!(body["_id"].as_str().is_some());
        assert_eq!(body["slug"]["current"], "acme");
        assert_eq!(body["author"]["_ref"], "U1");
    }

    #[tokio::test]
    async fn test_missing_session_writes_nothing() {
        let store = MockStore::new();

        let result = create_pitch(&store, None, &acme_request()).await;

        assert_eq!(store.created_pitch_count(), 0);
        let body = result.body();
        assert_eq!(body["status"], STATUS_ERROR);
        assert_eq!(body["error"], "Not signed in");
    }

    #[tokio::test]
    async fn test_empty_session_id_counts_as_unauthenticated() {
        let store = MockStore::new();
        let unlinked = session("");

        let result = create_pitch(&store, Some(&unlinked), &acme_request()).await;

        assert_eq!(store.created_pitch_count(), 0);
        assert_eq!(result.body()["error"], "Not signed in");
    }

    #[tokio::test]
    async fn test_invalid_payload_reports_fields_and_echoes_state() {
        let store = MockStore::new();
        let session = session("U1");

        let mut request = acme_request();
        request.title = String::new();
        request.link = "not a url".to_string();
        request.state = Some(json!({ "draft": true }));

        let result = create_pitch(&store, Some(&session), &request).await;

        assert_eq!(store.created_pitch_count(), 0);
        let body = result.body();
        assert_eq!(body["status"], STATUS_ERROR);
        assert_eq!(body["error"], "Validation Error");
        assert!(body["fieldErrors"]["title"].is_array());
        assert!(body["fieldErrors"]["link"].is_array());
        // Prior form state survives the error result
        assert_eq!(body["draft"], true);
    }

    #[tokio::test]
    async fn test_store_failure_is_caught_and_stringified() {
        let mut store = MockStore::new();
        store.fail_create_pitch = true;
        let session = session("U1");

        let result = create_pitch(&store, Some(&session), &acme_request()).await;

        let body = match result {
            CreatePitchResult::StoreError(body) => body,
            other => panic!("expected StoreError, got {:?}", other),
        };
        assert_eq!(body["status"], STATUS_ERROR);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("content store unavailable"));
    }

    #[tokio::test]
    async fn test_listing_forwards_query_and_treats_blank_as_absent() {
        let store = MockStore::new();

        let response = list_pitches(&store, Some("acme")).await.unwrap();
        assert!(response.success);
        assert_eq!(response.count, 0);

        list_pitches(&store, Some("   ")).await.unwrap();
        list_pitches(&store, None).await.unwrap();

        let params = store.search_params.lock().unwrap().clone();
        assert_eq!(params, vec![Some("acme".to_string()), None, None]);
    }

    #[tokio::test]
    async fn test_two_visits_record_two_increments() {
        let store = MockStore::new();

        record_view(&store, "pitch-9").await;
        record_view(&store, "pitch-9").await;

        assert_eq!(store.view_increments_for("pitch-9"), 2);
    }

    #[tokio::test]
    async fn test_failed_view_increment_is_swallowed() {
        let mut store = MockStore::new();
        store.fail_increment_views = true;

        // Must not panic or surface the failure
        record_view(&store, "pitch-9").await;
        assert_eq!(store.view_increments_for("pitch-9"), 0);
    }
}
