use serde::{Deserialize, Serialize};

/// Author document as projected by the content store.
///
/// `_id` is the store-assigned document id (the internal user id carried in
/// session claims); `id` is the external GitHub id the account was linked
/// from. Everything else mirrors the GitHub profile captured at first
/// sign-in (first-seen wins, no update path in this service).
#[derive(Debug, Serialize, Deserialize, Clone, utoipa::ToSchema)]
pub struct Author {
    pub _id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

/// Payload for creating an author document on first sign-in.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AuthorDocument {
    pub _type: String,
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub bio: String,
}

impl AuthorDocument {
    pub fn new(
        github_id: i64,
        username: String,
        name: Option<String>,
        email: Option<String>,
        image: Option<String>,
        bio: Option<String>,
    ) -> Self {
        Self {
            _type: "author".to_string(),
            id: github_id,
            name,
            username,
            email,
            image,
            // Bio defaults to an empty string when GitHub has none
            bio: bio.unwrap_or_default(),
        }
    }
}
