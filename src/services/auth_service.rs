use crate::config::AppConfig;
use crate::models::AuthorDocument;
use crate::store::ContentStore;
use base64::Engine;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashSet;
use uuid::Uuid;

const GITHUB_AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
const GITHUB_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const GITHUB_USER_URL: &str = "https://api.github.com/user";

// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    /// Internal author document id. Empty when account linkage failed;
    /// consumers must treat an empty id as unauthenticated.
    pub sub: String,
    pub github_id: i64,
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    pub iat: usize, // issued at
    pub exp: usize, // expiration
    pub jti: String, // JWT ID
    pub aud: String, // audience
    pub iss: String, // issuer
}

/// Outward-facing session materialized from verified claims.
#[derive(Debug, Serialize, Deserialize, Clone, utoipa::ToSchema)]
pub struct Session {
    /// Internal author id; empty means the token carries no linked account.
    pub id: String,
    pub github_id: i64,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        !self.id.is_empty()
    }
}

/// GitHub identity as delivered by a completed OAuth handshake.
#[derive(Debug, Clone)]
pub struct GithubProfile {
    pub id: i64,
    pub login: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    pub user: Session,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct GithubAuthUrlResponse {
    pub success: bool,
    pub auth_url: String,
    pub state: String,
}

/// Copies the id claim (and profile snapshot) onto the session object the
/// rest of the system sees.
pub fn materialize_session(claims: &SessionClaims) -> Session {
    Session {
        id: claims.sub.clone(),
        github_id: claims.github_id,
        username: claims.username.clone(),
        name: claims.name.clone(),
        email: claims.email.clone(),
        image: claims.image.clone(),
    }
}

// Generate session JWT
pub fn generate_session_token(
    config: &AppConfig,
    author_id: &str,
    profile: &GithubProfile,
) -> Result<String, String> {
    let iat = Utc::now().timestamp() as usize;
    let exp = (Utc::now() + Duration::hours(config.session_ttl_hours)).timestamp() as usize;

    let claims = SessionClaims {
        sub: author_id.to_string(),
        github_id: profile.id,
        username: profile.login.clone(),
        name: profile.name.clone(),
        email: profile.email.clone(),
        image: profile.image.clone(),
        iat,
        exp,
        jti: Uuid::new_v4().to_string(),
        aud: config.jwt_audience.clone(),
        iss: config.jwt_issuer.clone(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_ref()),
    )
    .map_err(|e| format!("Failed to generate session token: {}", e))
}

// Verify session JWT
pub fn verify_session_token(config: &AppConfig, token: &str) -> Result<SessionClaims, String> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[config.jwt_audience.clone()]);

    let mut issuers = HashSet::new();
    issuers.insert(config.jwt_issuer.clone());
    validation.iss = Some(issuers);

    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_ref()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| format!("Invalid token: {}", e))
}

fn encode_state(next: Option<&str>) -> String {
    let payload = json!({
        "nonce": Uuid::new_v4().to_string(),
        "next": next,
    });

    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(payload.to_string())
}

/// Extracts the post-login redirect path carried in the OAuth state, if any.
pub fn state_redirect_path(state: &str) -> Option<String> {
    let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(state)
        .ok()?;
    let payload: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    payload["next"].as_str().map(String::from)
}

// Generate GitHub OAuth URL with CSRF state
pub fn generate_github_oauth_url(config: &AppConfig, next: Option<&str>) -> GithubAuthUrlResponse {
    let state = encode_state(next);

    let params = vec![
        ("client_id", config.github_client_id.as_str()),
        ("redirect_uri", config.github_redirect_uri.as_str()),
        ("scope", "read:user user:email"),
        ("state", state.as_str()),
    ];

    let query_string = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    GithubAuthUrlResponse {
        success: true,
        auth_url: format!("{}?{}", GITHUB_AUTHORIZE_URL, query_string),
        state,
    }
}

/// Sign-in step: ensure an author document exists for this GitHub identity.
///
/// Reports success once the lookup/create step completes. A failed create is
/// logged and NOT surfaced; the subsequent token issuance lookup then finds
/// no author and degrades the session to unauthenticated. Lookup transport
/// failures do propagate and abort the callback.
pub async fn sign_in(store: &dyn ContentStore, profile: &GithubProfile) -> Result<bool, String> {
    let existing = store.author_by_github_id(profile.id).await?;

    if existing.is_none() {
        let doc = AuthorDocument::new(
            profile.id,
            profile.login.clone(),
            profile.name.clone(),
            profile.email.clone(),
            profile.image.clone(),
            profile.bio.clone(),
        );

        match store.create_author(&doc).await {
            Ok(author) => {
                log::info!(
                    "✅ Author created for GitHub user {}: {}",
                    profile.login,
                    author._id
                );
            }
            Err(e) => {
                log::warn!(
                    "⚠️ Failed to create author for GitHub user {}: {}",
                    profile.login,
                    e
                );
            }
        }
    }

    Ok(true)
}

/// Issues the session token for a linked account.
///
/// Re-fetches the author by GitHub id and embeds the internal id into the
/// claims. When the lookup fails or finds nothing, the id claim is left
/// empty and the session is unauthenticated, not an error.
pub async fn issue_session_token(
    config: &AppConfig,
    store: &dyn ContentStore,
    profile: &GithubProfile,
) -> Result<(String, Session), String> {
    let author_id = match store.author_by_github_id(profile.id).await {
        Ok(Some(author)) => author._id,
        Ok(None) => {
            log::warn!(
                "⚠️ No author linked to GitHub user {}; issuing unauthenticated session",
                profile.login
            );
            String::new()
        }
        Err(e) => {
            log::warn!(
                "⚠️ Author lookup failed for GitHub user {}: {}; issuing unauthenticated session",
                profile.login,
                e
            );
            String::new()
        }
    };

    let token = generate_session_token(config, &author_id, profile)?;
    let session = Session {
        id: author_id,
        github_id: profile.id,
        username: profile.login.clone(),
        name: profile.name.clone(),
        email: profile.email.clone(),
        image: profile.image.clone(),
    };

    Ok((token, session))
}

// Handle GitHub OAuth callback: code -> access token -> profile -> session
pub async fn handle_github_callback(
    config: &AppConfig,
    store: &dyn ContentStore,
    code: &str,
) -> Result<AuthResponse, String> {
    // Exchange code for an access token
    let client = reqwest::Client::new();
    let token_response = client
        .post(GITHUB_TOKEN_URL)
        .header("Accept", "application/json")
        .form(&[
            ("client_id", config.github_client_id.as_str()),
            ("client_secret", config.github_client_secret.as_str()),
            ("code", code),
            ("redirect_uri", config.github_redirect_uri.as_str()),
        ])
        .send()
        .await
        .map_err(|e| format!("Failed to exchange code: {}", e))?;

    if !token_response.status().is_success() {
        return Err("Failed to exchange authorization code".to_string());
    }

    let tokens: serde_json::Value = token_response
        .json()
        .await
        .map_err(|e| format!("Failed to parse token response: {}", e))?;

    let access_token = tokens["access_token"]
        .as_str()
        .ok_or_else(|| "No access token in response".to_string())?;

    // Fetch the GitHub user profile
    let user_response = client
        .get(GITHUB_USER_URL)
        .header("Authorization", format!("Bearer {}", access_token))
        .header("Accept", "application/vnd.github+json")
        .header("User-Agent", "pitch-service")
        .send()
        .await
        .map_err(|e| format!("Failed to get user info: {}", e))?;

    let user_info: serde_json::Value = user_response
        .json()
        .await
        .map_err(|e| format!("Failed to parse user info: {}", e))?;

    let github_id = user_info["id"]
        .as_i64()
        .ok_or_else(|| "No id in GitHub user info".to_string())?;
    let login = user_info["login"]
        .as_str()
        .ok_or_else(|| "No login in GitHub user info".to_string())?;

    let profile = GithubProfile {
        id: github_id,
        login: login.to_string(),
        name: user_info["name"].as_str().map(String::from),
        email: user_info["email"].as_str().map(String::from),
        image: user_info["avatar_url"].as_str().map(String::from),
        bio: user_info["bio"].as_str().map(String::from),
    };

    sign_in(store, &profile).await?;

    let (token, user) = issue_session_token(config, store, &profile).await?;

    if user.is_authenticated() {
        log::info!("✅ Session issued for GitHub user {} ({})", login, user.id);
    }

    Ok(AuthResponse {
        success: true,
        token,
        user,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Author;
    use crate::store::mock::MockStore;

    fn profile() -> GithubProfile {
        GithubProfile {
            id: 7,
            login: "octocat".to_string(),
            name: Some("Octo Cat".to_string()),
            email: Some("octo@example.com".to_string()),
            image: Some("https://avatars.example/7".to_string()),
            bio: None,
        }
    }

    fn linked_author() -> Author {
        Author {
            _id: "U1".to_string(),
            id: Some(7),
            name: Some("Octo Cat".to_string()),
            username: Some("octocat".to_string()),
            email: Some("octo@example.com".to_string()),
            image: None,
            bio: Some("".to_string()),
        }
    }

    #[test]
    fn test_token_roundtrip() {
        let config = crate::config::AppConfig::for_tests();
        let token = generate_session_token(&config, "U1", &profile()).unwrap();
        let claims = verify_session_token(&config, &token).unwrap();

        assert_eq!(claims.sub, "U1");
        assert_eq!(claims.github_id, 7);

        let session = materialize_session(&claims);
        assert_eq!(session.id, "U1");
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_token_with_wrong_secret_is_rejected() {
        let config = crate::config::AppConfig::for_tests();
        let token = generate_session_token(&config, "U1", &profile()).unwrap();

        let mut other = crate::config::AppConfig::for_tests();
        other.jwt_secret = "different".to_string();
        assert!(verify_session_token(&other, &token).is_err());
    }

    #[test]
    fn test_state_carries_redirect_path() {
        let config = crate::config::AppConfig::for_tests();
        let response = generate_github_oauth_url(&config, Some("/startup/create"));

        assert!(response.auth_url.starts_with(GITHUB_AUTHORIZE_URL));
        assert_eq!(
            state_redirect_path(&response.state),
            Some("/startup/create".to_string())
        );
        assert_eq!(state_redirect_path("not-base64!"), None);
    }

    #[tokio::test]
    async fn test_sign_in_creates_author_once_when_missing() {
        let store = MockStore::new();

        assert!(sign_in(&store, &profile()).await.unwrap());
        assert_eq!(store.created_author_count(), 1);

        let created = store.created_authors.lock().unwrap()[0].clone();
        assert_eq!(created.id, 7);
        assert_eq!(created.username, "octocat");
        // Missing bio defaults to empty string
        assert_eq!(created.bio, "");
    }

    #[tokio::test]
    async fn test_sign_in_skips_create_for_known_identity() {
        let store = MockStore::new().with_author(linked_author());

        assert!(sign_in(&store, &profile()).await.unwrap());
        assert_eq!(store.created_author_count(), 0);
    }

    #[tokio::test]
    async fn test_sign_in_still_reports_success_when_create_fails() {
        let mut store = MockStore::new();
        store.fail_create_author = true;

        assert!(sign_in(&store, &profile()).await.unwrap());
        assert_eq!(store.created_author_count(), 0);
    }

    #[tokio::test]
    async fn test_issue_session_token_embeds_internal_id() {
        let config = crate::config::AppConfig::for_tests();
        let store = MockStore::new().with_author(linked_author());

        let (token, session) = issue_session_token(&config, &store, &profile())
            .await
            .unwrap();

        assert!(session.is_authenticated());
        assert_eq!(session.id, "U1");

        let claims = verify_session_token(&config, &token).unwrap();
        assert_eq!(claims.sub, "U1");
    }

    #[tokio::test]
    async fn test_unlinked_identity_yields_unauthenticated_session() {
        let config = crate::config::AppConfig::for_tests();
        let store = MockStore::new();

        let (token, session) = issue_session_token(&config, &store, &profile())
            .await
            .unwrap();

        // A token exists, but its empty id claim means unauthenticated
        assert!(!session.is_authenticated());
        let claims = verify_session_token(&config, &token).unwrap();
        assert_eq!(claims.sub, "");
    }
}
