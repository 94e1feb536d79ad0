use crate::models::{Author, Pitch};
use crate::store::ContentStore;
use serde::Serialize;

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AuthorPitchesResponse {
    pub success: bool,
    pub count: usize,
    pub results: Vec<Pitch>,
}

/// Profile lookup by internal author id. `None` is the distinct not-found
/// outcome, not an error.
pub async fn get_author(store: &dyn ContentStore, id: &str) -> Result<Option<Author>, String> {
    store.author_by_id(id).await
}

/// The author's own pitches, most recent first (ordering is the store's).
pub async fn get_author_pitches(
    store: &dyn ContentStore,
    author_id: &str,
) -> Result<AuthorPitchesResponse, String> {
    let results = store.pitches_by_author(author_id).await?;

    Ok(AuthorPitchesResponse {
        success: true,
        count: results.len(),
        results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Author;
    use crate::store::mock::MockStore;

    #[tokio::test]
    async fn test_unknown_author_is_not_found() {
        let store = MockStore::new();
        assert!(get_author(&store, "missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_known_author_is_returned() {
        let store = MockStore::new().with_author(Author {
            _id: "U1".to_string(),
            id: Some(7),
            name: Some("Octo Cat".to_string()),
            username: Some("octocat".to_string()),
            email: None,
            image: None,
            bio: None,
        });

        let author = get_author(&store, "U1").await.unwrap().unwrap();
        assert_eq!(author.username.as_deref(), Some("octocat"));
    }
}
