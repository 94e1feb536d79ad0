use crate::models::{Author, AuthorDocument, CreatedPitch, Pitch, PitchDocument, Playlist};
use async_trait::async_trait;

pub mod queries;
pub mod sanity;

#[cfg(test)]
pub mod mock;

pub use sanity::SanityStore;

/// Narrow contract over the external content store. The store owns all
/// persisted state; this service only shapes and transmits documents.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Lookup by external GitHub id. Always served by the live API so a
    /// just-created author is visible to the sign-in flow.
    async fn author_by_github_id(&self, github_id: i64) -> Result<Option<Author>, String>;

    async fn author_by_id(&self, id: &str) -> Result<Option<Author>, String>;

    async fn create_author(&self, doc: &AuthorDocument) -> Result<Author, String>;

    /// Parameterized listing read. `None` lists everything, most recent
    /// first; match semantics for `Some(query)` are the store's.
    async fn search_pitches(&self, search: Option<&str>) -> Result<Vec<Pitch>, String>;

    async fn pitch_by_id(&self, id: &str) -> Result<Option<Pitch>, String>;

    async fn pitches_by_author(&self, author_id: &str) -> Result<Vec<Pitch>, String>;

    async fn playlist_by_slug(&self, slug: &str) -> Result<Option<Playlist>, String>;

    /// Single create mutation; atomicity is the store's.
    async fn create_pitch(&self, doc: &PitchDocument) -> Result<CreatedPitch, String>;

    /// One `patch(id).inc(views)` mutation per call.
    async fn increment_views(&self, id: &str) -> Result<(), String>;
}
