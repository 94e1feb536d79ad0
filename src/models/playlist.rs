use crate::models::pitch::{Pitch, Slug};
use serde::{Deserialize, Serialize};

/// Curated pitch collection (e.g. "editors-picks"), read-only here.
#[derive(Debug, Serialize, Deserialize, Clone, utoipa::ToSchema)]
pub struct Playlist {
    pub _id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<Slug>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select: Option<Vec<Pitch>>,
}
