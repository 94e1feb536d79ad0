use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::middleware::session::current_session;
use crate::services::pitch_service;
use crate::services::pitch_service::{CreatePitchRequest, CreatePitchResult, PitchListResponse};
use crate::store::{ContentStore, SanityStore};

#[derive(Deserialize)]
pub struct PitchSearchQuery {
    pub query: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v1/pitches",
    tag = "Pitches",
    params(
        ("query" = Option<String>, Query, description = "Free-text search over title, category and description")
    ),
    responses(
        (status = 200, description = "Pitch summaries, most recent first", body = PitchListResponse),
        (status = 500, description = "Content store unreachable")
    )
)]
pub async fn get_pitches(
    store: web::Data<SanityStore>,
    query: web::Query<PitchSearchQuery>,
) -> HttpResponse {
    log::info!(
        "📋 GET /pitches - query: {}",
        query.query.as_deref().unwrap_or("<none>")
    );

    let content_store: &dyn ContentStore = store.get_ref();

    match pitch_service::list_pitches(content_store, query.query.as_deref()).await {
        Ok(response) => {
            log::info!("✅ Pitches retrieved: {}", response.count);
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            log::error!("❌ Failed to list pitches: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/pitches/{id}",
    tag = "Pitches",
    params(
        ("id" = String, Path, description = "Pitch document id")
    ),
    responses(
        (status = 200, description = "Pitch details"),
        (status = 404, description = "Pitch not found"),
        (status = 500, description = "Content store unreachable")
    )
)]
pub async fn get_pitch(store: web::Data<SanityStore>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    log::info!("📄 GET /pitches/{}", id);

    let content_store: &dyn ContentStore = store.get_ref();

    match pitch_service::get_pitch(content_store, &id).await {
        Ok(Some(pitch)) => {
            // Every detail visit counts one view, viewer-independent;
            // failures never reach the response
            pitch_service::record_view(content_store, &id).await;

            HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "pitch": pitch
            }))
        }
        Ok(None) => {
            log::warn!("⚠️ Pitch {} not found", id);
            HttpResponse::NotFound().json(serde_json::json!({
                "success": false,
                "error": "Pitch not found"
            }))
        }
        Err(e) => {
            log::error!("❌ Failed to get pitch {}: {}", id, e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/pitches",
    tag = "Pitches",
    request_body = CreatePitchRequest,
    responses(
        (status = 201, description = "Pitch created; body is the normalized document tagged SUCCESS"),
        (status = 400, description = "Validation error with per-field messages"),
        (status = 401, description = "Not signed in"),
        (status = 500, description = "Persistence failure")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_pitch(
    store: web::Data<SanityStore>,
    req: HttpRequest,
    body: web::Json<CreatePitchRequest>,
) -> HttpResponse {
    log::info!("📝 POST /pitches - title: '{}'", body.title);

    let session = current_session(&req);
    let content_store: &dyn ContentStore = store.get_ref();

    match pitch_service::create_pitch(content_store, session.as_ref(), &body).await {
        CreatePitchResult::Created(result) => HttpResponse::Created().json(result),
        CreatePitchResult::NotSignedIn(result) => {
            log::warn!("❌ Pitch submission without a session");
            HttpResponse::Unauthorized().json(result)
        }
        CreatePitchResult::Invalid(result) => {
            log::warn!("❌ Pitch submission failed validation");
            HttpResponse::BadRequest().json(result)
        }
        CreatePitchResult::StoreError(result) => HttpResponse::InternalServerError().json(result),
    }
}
