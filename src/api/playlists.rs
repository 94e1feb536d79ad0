use actix_web::{web, HttpResponse};

use crate::store::{ContentStore, SanityStore};

pub async fn get_playlist(store: web::Data<SanityStore>, path: web::Path<String>) -> HttpResponse {
    let slug = path.into_inner();
    log::info!("🎯 GET /playlists/{}", slug);

    let content_store: &dyn ContentStore = store.get_ref();

    match content_store.playlist_by_slug(&slug).await {
        Ok(Some(playlist)) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "playlist": playlist
        })),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "success": false,
            "error": "Playlist not found"
        })),
        Err(e) => {
            log::error!("❌ Failed to get playlist {}: {}", slug, e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}
