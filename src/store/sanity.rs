use crate::config::SanityConfig;
use crate::models::{Author, AuthorDocument, CreatedPitch, Pitch, PitchDocument, Playlist};
use crate::store::{queries, ContentStore};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
struct QueryResponse {
    result: Value,
}

#[derive(Debug, Deserialize)]
struct MutateResponse {
    results: Vec<MutateResult>,
}

#[derive(Debug, Deserialize)]
struct MutateResult {
    #[serde(default)]
    document: Option<Value>,
}

/// HTTP client for the Sanity content API.
///
/// Reads go through `GET /data/query/{dataset}` with GROQ passed as a query
/// parameter and `$params` JSON-encoded; writes go through
/// `POST /data/mutate/{dataset}` with a mutations array. Plain reads may use
/// the CDN host; auth lookups and all mutations use the live API host.
#[derive(Clone)]
pub struct SanityStore {
    client: reqwest::Client,
    api_base: String,
    cdn_base: String,
    dataset: String,
    token: String,
    use_cdn: bool,
}

impl SanityStore {
    pub fn new(config: &SanityConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: format!(
                "https://{}.api.sanity.io/v{}",
                config.project_id, config.api_version
            ),
            cdn_base: format!(
                "https://{}.apicdn.sanity.io/v{}",
                config.project_id, config.api_version
            ),
            dataset: config.dataset.clone(),
            token: config.token.clone(),
            use_cdn: config.use_cdn,
        }
    }

    /// Cheap connectivity check used at startup.
    pub async fn ping(&self) -> Result<i64, String> {
        self.query(queries::STARTUP_COUNT_QUERY, &[], true).await
    }

    fn query_url(&self, groq: &str, params: &[(&str, Value)], live: bool) -> Result<String, String> {
        let base = if live || !self.use_cdn {
            &self.api_base
        } else {
            &self.cdn_base
        };

        let mut url = format!(
            "{}/data/query/{}?query={}",
            base,
            self.dataset,
            urlencoding::encode(groq)
        );

        for (name, value) in params {
            let encoded = serde_json::to_string(value)
                .map_err(|e| format!("Failed to encode query param ${}: {}", name, e))?;
            url.push_str(&format!("&%24{}={}", name, urlencoding::encode(&encoded)));
        }

        Ok(url)
    }

    async fn query<T: DeserializeOwned>(
        &self,
        groq: &str,
        params: &[(&str, Value)],
        live: bool,
    ) -> Result<T, String> {
        let url = self.query_url(groq, params, live)?;

        let mut request = self.client.get(&url).header("Accept", "application/json");
        if !self.token.is_empty() {
            request = request.bearer_auth(&self.token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| format!("Failed to reach content store: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("Content store query error: {}", response.status()));
        }

        let body: QueryResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse content store response: {}", e))?;

        serde_json::from_value(body.result)
            .map_err(|e| format!("Unexpected document shape from content store: {}", e))
    }

    async fn mutate(&self, mutations: Value) -> Result<Vec<MutateResult>, String> {
        let url = format!(
            "{}/data/mutate/{}?returnDocuments=true",
            self.api_base, self.dataset
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&json!({ "mutations": mutations }))
            .send()
            .await
            .map_err(|e| format!("Failed to reach content store: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("Content store mutation error: {}", response.status()));
        }

        let body: MutateResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse mutation response: {}", e))?;

        Ok(body.results)
    }

    fn first_document<T: DeserializeOwned>(results: Vec<MutateResult>) -> Result<T, String> {
        let document = results
            .into_iter()
            .next()
            .and_then(|r| r.document)
            .ok_or_else(|| "Mutation returned no document".to_string())?;

        serde_json::from_value(document)
            .map_err(|e| format!("Unexpected document shape from mutation: {}", e))
    }
}

#[async_trait]
impl ContentStore for SanityStore {
    async fn author_by_github_id(&self, github_id: i64) -> Result<Option<Author>, String> {
        self.query(
            queries::AUTHOR_BY_GITHUB_ID_QUERY,
            &[("id", json!(github_id))],
            true,
        )
        .await
    }

    async fn author_by_id(&self, id: &str) -> Result<Option<Author>, String> {
        self.query(queries::AUTHOR_BY_ID_QUERY, &[("id", json!(id))], false)
            .await
    }

    async fn create_author(&self, doc: &AuthorDocument) -> Result<Author, String> {
        let results = self.mutate(json!([{ "create": doc }])).await?;
        Self::first_document(results)
    }

    async fn search_pitches(&self, search: Option<&str>) -> Result<Vec<Pitch>, String> {
        let param = match search {
            Some(q) => json!(q),
            None => Value::Null,
        };

        self.query(queries::STARTUPS_QUERY, &[("search", param)], false)
            .await
    }

    async fn pitch_by_id(&self, id: &str) -> Result<Option<Pitch>, String> {
        self.query(queries::STARTUP_BY_ID_QUERY, &[("id", json!(id))], false)
            .await
    }

    async fn pitches_by_author(&self, author_id: &str) -> Result<Vec<Pitch>, String> {
        self.query(
            queries::STARTUPS_BY_AUTHOR_QUERY,
            &[("id", json!(author_id))],
            false,
        )
        .await
    }

    async fn playlist_by_slug(&self, slug: &str) -> Result<Option<Playlist>, String> {
        self.query(
            queries::PLAYLIST_BY_SLUG_QUERY,
            &[("slug", json!(slug))],
            false,
        )
        .await
    }

    async fn create_pitch(&self, doc: &PitchDocument) -> Result<CreatedPitch, String> {
        let results = self.mutate(json!([{ "create": doc }])).await?;
        Self::first_document(results)
    }

    async fn increment_views(&self, id: &str) -> Result<(), String> {
        // setIfMissing keeps the patch valid for documents created before
        // views were initialized at creation time.
        self.mutate(json!([{
            "patch": {
                "id": id,
                "setIfMissing": { "views": 0 },
                "inc": { "views": 1 }
            }
        }]))
        .await?;

        Ok(())
    }
}
