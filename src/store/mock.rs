//! In-memory store double used by the workflow tests.

use crate::models::{Author, AuthorDocument, CreatedPitch, Pitch, PitchDocument, Playlist};
use crate::store::ContentStore;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;

#[derive(Default)]
pub struct MockStore {
    pub authors: Mutex<Vec<Author>>,
    pub pitches: Mutex<Vec<Pitch>>,
    pub playlists: Mutex<Vec<Playlist>>,

    pub created_authors: Mutex<Vec<AuthorDocument>>,
    pub created_pitches: Mutex<Vec<PitchDocument>>,
    pub view_increments: Mutex<Vec<String>>,
    pub search_params: Mutex<Vec<Option<String>>>,

    pub fail_create_author: bool,
    pub fail_create_pitch: bool,
    pub fail_increment_views: bool,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_author(self, author: Author) -> Self {
        self.authors.lock().unwrap().push(author);
        self
    }

    pub fn with_pitch(self, pitch: Pitch) -> Self {
        self.pitches.lock().unwrap().push(pitch);
        self
    }

    pub fn created_pitch_count(&self) -> usize {
        self.created_pitches.lock().unwrap().len()
    }

    pub fn created_author_count(&self) -> usize {
        self.created_authors.lock().unwrap().len()
    }

    pub fn view_increments_for(&self, id: &str) -> usize {
        self.view_increments
            .lock()
            .unwrap()
            .iter()
            .filter(|recorded| recorded.as_str() == id)
            .count()
    }
}

#[async_trait]
impl ContentStore for MockStore {
    async fn author_by_github_id(&self, github_id: i64) -> Result<Option<Author>, String> {
        Ok(self
            .authors
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == Some(github_id))
            .cloned())
    }

    async fn author_by_id(&self, id: &str) -> Result<Option<Author>, String> {
        Ok(self
            .authors
            .lock()
            .unwrap()
            .iter()
            .find(|a| a._id == id)
            .cloned())
    }

    async fn create_author(&self, doc: &AuthorDocument) -> Result<Author, String> {
        if self.fail_create_author {
            return Err("content store unavailable".to_string());
        }

        self.created_authors.lock().unwrap().push(doc.clone());

        let mut authors = self.authors.lock().unwrap();
        let author = Author {
            _id: format!("author-{}", authors.len() + 1),
            id: Some(doc.id),
            name: doc.name.clone(),
            username: Some(doc.username.clone()),
            email: doc.email.clone(),
            image: doc.image.clone(),
            bio: Some(doc.bio.clone()),
        };
        authors.push(author.clone());

        Ok(author)
    }

    async fn search_pitches(&self, search: Option<&str>) -> Result<Vec<Pitch>, String> {
        self.search_params
            .lock()
            .unwrap()
            .push(search.map(|s| s.to_string()));

        Ok(self.pitches.lock().unwrap().clone())
    }

    async fn pitch_by_id(&self, id: &str) -> Result<Option<Pitch>, String> {
        Ok(self
            .pitches
            .lock()
            .unwrap()
            .iter()
            .find(|p| p._id == id)
            .cloned())
    }

    async fn pitches_by_author(&self, author_id: &str) -> Result<Vec<Pitch>, String> {
        Ok(self
            .pitches
            .lock()
            .unwrap()
            .iter()
            .filter(|p| {
                p.author
                    .as_ref()
                    .map(|a| a._id == author_id)
                    .unwrap_or(false)
            })
            .cloned()
            .collect())
    }

    async fn playlist_by_slug(&self, slug: &str) -> Result<Option<Playlist>, String> {
        Ok(self
            .playlists
            .lock()
            .unwrap()
            .iter()
            .find(|p| {
                p.slug
                    .as_ref()
                    .map(|s| s.current == slug)
                    .unwrap_or(false)
            })
            .cloned())
    }

    async fn create_pitch(&self, doc: &PitchDocument) -> Result<CreatedPitch, String> {
        if self.fail_create_pitch {
            return Err("content store unavailable".to_string());
        }

        let mut created = self.created_pitches.lock().unwrap();
        created.push(doc.clone());

        Ok(CreatedPitch {
            _id: format!("pitch-{}", created.len()),
            created_at: Some(Utc::now()),
            title: doc.title.clone(),
            description: doc.description.clone(),
            category: doc.category.clone(),
            image: doc.image.clone(),
            slug: doc.slug.clone(),
            author: doc.author.clone(),
            pitch: doc.pitch.clone(),
            views: Some(doc.views),
        })
    }

    async fn increment_views(&self, id: &str) -> Result<(), String> {
        if self.fail_increment_views {
            return Err("content store unavailable".to_string());
        }

        self.view_increments.lock().unwrap().push(id.to_string());
        Ok(())
    }
}
