use crate::models::author::Author;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn default_slug_type() -> String {
    "slug".to_string()
}

fn default_reference_type() -> String {
    "reference".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone, utoipa::ToSchema)]
pub struct Slug {
    #[serde(default = "default_slug_type")]
    pub _type: String,
    pub current: String,
}

impl Slug {
    pub fn new(current: String) -> Self {
        Self {
            _type: "slug".to_string(),
            current,
        }
    }
}

/// Non-owning reference to an author document, by id.
#[derive(Debug, Serialize, Deserialize, Clone, utoipa::ToSchema)]
pub struct AuthorRef {
    #[serde(default = "default_reference_type")]
    pub _type: String,
    pub _ref: String,
}

impl AuthorRef {
    pub fn new(author_id: String) -> Self {
        Self {
            _type: "reference".to_string(),
            _ref: author_id,
        }
    }
}

/// Pitch ("startup") document as projected by the read queries, with the
/// author reference dereferenced into a snapshot. Listing projections omit
/// `pitch`, so the body is optional here.
#[derive(Debug, Serialize, Deserialize, Clone, utoipa::ToSchema)]
pub struct Pitch {
    pub _id: String,
    #[serde(
        rename = "_createdAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<Slug>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch: Option<String>,
}

/// Payload for the single create mutation issued by the creation workflow.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PitchDocument {
    pub _type: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub image: String,
    pub slug: Slug,
    pub author: AuthorRef,
    pub pitch: String,
    pub views: i64,
}

/// Created document as returned by the store's create call. Unlike the read
/// shape, `author` is still the raw reference.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreatedPitch {
    pub _id: String,
    #[serde(
        rename = "_createdAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    pub title: String,
    pub description: String,
    pub category: String,
    pub image: String,
    pub slug: Slug,
    pub author: AuthorRef,
    pub pitch: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<i64>,
}
