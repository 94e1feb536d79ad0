use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pitch Service API",
        version = "1.0.0",
        description = "API documentation for the startup pitch platform backend.\n\n**Authentication:** sessions are issued through GitHub OAuth; pitch creation requires a JWT Bearer token.\n\n**Features:**\n- GitHub OAuth sign-in with content-store account linkage\n- Pitch submission with schema validation\n- Listing and free-text search\n- Author profiles and per-author listings\n- View counting, health monitoring and metrics",
        contact(
            name = "Pitch Service Team",
            email = "support@pitch-service.dev"
        )
    ),
    paths(
        // Auth endpoints
        crate::api::auth::github_auth,
        crate::api::auth::verify_token,
        crate::api::auth::get_me,

        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,

        // Pitches
        crate::api::pitches::get_pitches,
        crate::api::pitches::get_pitch,
        crate::api::pitches::create_pitch,

        // Authors
        crate::api::authors::get_author,
        crate::api::authors::get_author_pitches,
    ),
    components(
        schemas(
            // Auth
            crate::services::auth_service::Session,
            crate::services::auth_service::GithubAuthUrlResponse,

            // Health & Metrics
            crate::api::health::HealthResponse,
            crate::api::metrics::MetricsResponse,

            // Pitches
            crate::services::pitch_service::CreatePitchRequest,
            crate::services::pitch_service::PitchListResponse,
            crate::services::author_service::AuthorPitchesResponse,
            crate::models::Pitch,
            crate::models::Author,
            crate::models::Slug,
            crate::models::AuthorRef,
            crate::models::Playlist,
        )
    ),
    tags(
        (name = "Auth", description = "GitHub OAuth sign-in, session verification and the materialized session."),
        (name = "Pitches", description = "Submit, browse and search startup pitches. Detail visits count views."),
        (name = "Authors", description = "Author profiles and per-author pitch listings."),
        (name = "Health", description = "Health check and system metrics endpoints for monitoring service status."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Enter your JWT token"))
                        .build(),
                ),
            );
        }
    }
}
