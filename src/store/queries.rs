//! GROQ queries issued against the content store. Match semantics are the
//! store's; this side only supplies parameters.

pub const STARTUPS_QUERY: &str = r#"*[_type == "startup" && defined(slug.current) && (!defined($search) || title match $search || category match $search || description match $search)] | order(_createdAt desc) {
  _id, _createdAt, title, slug, author -> { _id, id, name, image, bio }, views, description, category, image
}"#;

pub const STARTUP_BY_ID_QUERY: &str = r#"*[_type == "startup" && _id == $id][0]{
  _id, _createdAt, title, slug, author -> { _id, id, name, username, image, bio }, views, description, category, image, pitch
}"#;

pub const STARTUPS_BY_AUTHOR_QUERY: &str = r#"*[_type == "startup" && author._ref == $id] | order(_createdAt desc) {
  _id, _createdAt, title, slug, author -> { _id, id, name, image, bio }, views, description, category, image
}"#;

pub const AUTHOR_BY_GITHUB_ID_QUERY: &str = r#"*[_type == "author" && id == $id][0]{
  _id, id, name, username, email, image, bio
}"#;

pub const AUTHOR_BY_ID_QUERY: &str = r#"*[_type == "author" && _id == $id][0]{
  _id, id, name, username, email, image, bio
}"#;

pub const PLAYLIST_BY_SLUG_QUERY: &str = r#"*[_type == "playlist" && slug.current == $slug][0]{
  _id, title, slug,
  select[] -> { _id, _createdAt, title, slug, author -> { _id, name, image, bio }, views, description, category, image, pitch }
}"#;

pub const STARTUP_COUNT_QUERY: &str = r#"count(*[_type == "startup"])"#;
