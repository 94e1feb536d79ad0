use actix_web::{web, HttpResponse};

use crate::models::Author;
use crate::services::author_service;
use crate::services::author_service::AuthorPitchesResponse;
use crate::store::{ContentStore, SanityStore};

#[utoipa::path(
    get,
    path = "/api/v1/authors/{id}",
    tag = "Authors",
    params(
        ("id" = String, Path, description = "Author document id")
    ),
    responses(
        (status = 200, description = "Author profile", body = Author),
        (status = 404, description = "Author not found"),
        (status = 500, description = "Content store unreachable")
    )
)]
pub async fn get_author(store: web::Data<SanityStore>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    log::info!("👤 GET /authors/{}", id);

    let content_store: &dyn ContentStore = store.get_ref();

    match author_service::get_author(content_store, &id).await {
        Ok(Some(author)) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "author": author
        })),
        Ok(None) => {
            log::warn!("⚠️ Author {} not found", id);
            HttpResponse::NotFound().json(serde_json::json!({
                "success": false,
                "error": "Author not found"
            }))
        }
        Err(e) => {
            log::error!("❌ Failed to get author {}: {}", id, e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/authors/{id}/pitches",
    tag = "Authors",
    params(
        ("id" = String, Path, description = "Author document id")
    ),
    responses(
        (status = 200, description = "The author's pitches, most recent first", body = AuthorPitchesResponse),
        (status = 500, description = "Content store unreachable")
    )
)]
pub async fn get_author_pitches(
    store: web::Data<SanityStore>,
    path: web::Path<String>,
) -> HttpResponse {
    let id = path.into_inner();
    log::info!("📋 GET /authors/{}/pitches", id);

    let content_store: &dyn ContentStore = store.get_ref();

    match author_service::get_author_pitches(content_store, &id).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("❌ Failed to list pitches for author {}: {}", id, e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}
