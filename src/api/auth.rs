use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::config::AppConfig;
use crate::middleware::session::current_session;
use crate::services::auth_service;
use crate::services::auth_service::{AuthResponse, GithubAuthUrlResponse, Session};
use crate::store::{ContentStore, SanityStore};

#[derive(Deserialize)]
pub struct AuthUrlQuery {
    /// Optional path on the frontend to return to after login.
    pub next: Option<String>,
}

#[derive(Deserialize)]
pub struct CallbackQuery {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/github",
    tag = "Auth",
    responses(
        (status = 200, description = "GitHub authorize URL generated", body = GithubAuthUrlResponse)
    )
)]
pub async fn github_auth(
    config: web::Data<AppConfig>,
    query: web::Query<AuthUrlQuery>,
) -> HttpResponse {
    log::info!("🔐 GET /auth/github - Generating OAuth URL");

    let response = auth_service::generate_github_oauth_url(&config, query.next.as_deref());
    HttpResponse::Ok().json(response)
}

pub async fn github_callback(
    config: web::Data<AppConfig>,
    store: web::Data<SanityStore>,
    query: web::Query<CallbackQuery>,
) -> HttpResponse {
    log::info!("🔐 GET /auth/callback - Processing GitHub OAuth");

    let frontend_url = &config.frontend_url;

    if let Some(error) = &query.error {
        log::error!("❌ OAuth error: {}", error);
        return HttpResponse::Found()
            .append_header((
                "Location",
                format!(
                    "{}/auth/callback?error={}",
                    frontend_url,
                    urlencoding::encode(error)
                ),
            ))
            .finish();
    }

    let code = match &query.code {
        Some(c) => c,
        None => {
            log::error!("❌ No authorization code provided");
            return HttpResponse::Found()
                .append_header((
                    "Location",
                    format!("{}/auth/callback?error=no_code", frontend_url),
                ))
                .finish();
        }
    };

    let content_store: &dyn ContentStore = store.get_ref();

    match auth_service::handle_github_callback(&config, content_store, code).await {
        Ok(AuthResponse { token, user, .. }) => {
            log::info!("✅ GitHub OAuth successful for @{}", user.username);

            // Land on the path the login flow asked for, when the state
            // carries one
            let next = query
                .state
                .as_deref()
                .and_then(auth_service::state_redirect_path)
                .unwrap_or_else(|| "/auth/callback".to_string());

            let redirect_url = format!(
                "{}{}?access_token={}&user_id={}&username={}",
                frontend_url,
                next,
                urlencoding::encode(&token),
                urlencoding::encode(&user.id),
                urlencoding::encode(&user.username)
            );

            HttpResponse::Found()
                .append_header(("Location", redirect_url))
                .finish()
        }
        Err(e) => {
            log::error!("❌ GitHub OAuth failed: {}", e);
            HttpResponse::Found()
                .append_header((
                    "Location",
                    format!(
                        "{}/auth/callback?error={}",
                        frontend_url,
                        urlencoding::encode(&e)
                    ),
                ))
                .finish()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/verify",
    tag = "Auth",
    responses(
        (status = 200, description = "Token is valid"),
        (status = 401, description = "Invalid or expired token")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn verify_token(config: web::Data<AppConfig>, req: HttpRequest) -> HttpResponse {
    log::info!("✓ GET /auth/verify");

    let auth_header = req.headers().get("Authorization");

    if let Some(auth_value) = auth_header {
        if let Ok(auth_str) = auth_value.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                match auth_service::verify_session_token(&config, token) {
                    Ok(claims) => {
                        log::info!("✅ Token valid for @{}", claims.username);
                        return HttpResponse::Ok().json(serde_json::json!({
                            "success": true,
                            "valid": true,
                            "user_id": claims.sub,
                            "username": claims.username,
                            "authenticated": !claims.sub.is_empty(),
                            "exp": claims.exp
                        }));
                    }
                    Err(e) => {
                        log::warn!("❌ Invalid token: {}", e);
                        return HttpResponse::Unauthorized().json(serde_json::json!({
                            "success": false,
                            "valid": false,
                            "error": e
                        }));
                    }
                }
            }
        }
    }

    HttpResponse::BadRequest().json(serde_json::json!({
        "success": false,
        "error": "No valid Authorization header"
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Current session", body = Session),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(req: HttpRequest) -> HttpResponse {
    log::info!("👤 GET /auth/me");

    match current_session(&req) {
        Some(session) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "authenticated": session.is_authenticated(),
            "user": session
        })),
        None => HttpResponse::Unauthorized().json(serde_json::json!({
            "success": false,
            "error": "No valid session"
        })),
    }
}
