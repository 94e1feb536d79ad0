use std::env;

/// Connection settings for the external content store.
#[derive(Debug, Clone)]
pub struct SanityConfig {
    pub project_id: String,
    pub dataset: String,
    pub api_version: String,
    /// Write token; also sent on live reads so drafts/private datasets work.
    pub token: String,
    /// Route plain reads through the CDN host. Auth lookups and mutations
    /// always hit the live API regardless.
    pub use_cdn: bool,
}

/// Process-wide configuration, read from the environment exactly once at
/// startup and passed by `web::Data` into every workflow.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: String,
    pub frontend_url: String,

    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    pub session_ttl_hours: i64,

    pub github_client_id: String,
    pub github_client_secret: String,
    pub github_redirect_uri: String,

    pub sanity: SanityConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT").unwrap_or_else(|_| "3002".to_string());
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

        let jwt_secret =
            env::var("JWT_SECRET").unwrap_or_else(|_| "default-secret-change-me".to_string());
        let jwt_issuer = env::var("JWT_ISSUER").unwrap_or_else(|_| "pitch-service".to_string());
        let jwt_audience = env::var("JWT_AUDIENCE").unwrap_or_else(|_| "pitch-api".to_string());
        let session_ttl_hours = env::var("SESSION_TTL_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(24);

        let github_client_id = env::var("GITHUB_CLIENT_ID")
            .map_err(|_| "GITHUB_CLIENT_ID must be set".to_string())?;
        let github_client_secret = env::var("GITHUB_CLIENT_SECRET")
            .map_err(|_| "GITHUB_CLIENT_SECRET must be set".to_string())?;
        let github_redirect_uri = env::var("GITHUB_REDIRECT_URI")
            .unwrap_or_else(|_| "http://localhost:3002/api/v1/auth/callback".to_string());

        let sanity = SanityConfig {
            project_id: env::var("SANITY_PROJECT_ID")
                .map_err(|_| "SANITY_PROJECT_ID must be set".to_string())?,
            dataset: env::var("SANITY_DATASET").unwrap_or_else(|_| "production".to_string()),
            api_version: env::var("SANITY_API_VERSION")
                .unwrap_or_else(|_| "2024-01-01".to_string()),
            token: env::var("SANITY_TOKEN").map_err(|_| "SANITY_TOKEN must be set".to_string())?,
            use_cdn: env::var("SANITY_USE_CDN")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(true),
        };

        Ok(Self {
            host,
            port,
            frontend_url,
            jwt_secret,
            jwt_issuer,
            jwt_audience,
            session_ttl_hours,
            github_client_id,
            github_client_secret,
            github_redirect_uri,
            sanity,
        })
    }
}

#[cfg(test)]
impl AppConfig {
    /// Fixed configuration for tests; nothing is read from the environment.
    pub fn for_tests() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: "0".to_string(),
            frontend_url: "http://localhost:3000".to_string(),
            jwt_secret: "test-secret".to_string(),
            jwt_issuer: "pitch-service".to_string(),
            jwt_audience: "pitch-api".to_string(),
            session_ttl_hours: 24,
            github_client_id: "client-id".to_string(),
            github_client_secret: "client-secret".to_string(),
            github_redirect_uri: "http://localhost:3002/api/v1/auth/callback".to_string(),
            sanity: SanityConfig {
                project_id: "testproject".to_string(),
                dataset: "test".to_string(),
                api_version: "2024-01-01".to_string(),
                token: "test-token".to_string(),
                use_cdn: false,
            },
        }
    }
}
