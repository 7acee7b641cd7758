// File: ./src/model/article.rs
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// One locally authored article file, as discovered by the loader.
///
/// Created once per run and immutable afterwards. `path` is unique within
/// a run (it is the file's path relative to the configured root). A file
/// whose front matter could not be parsed still produces a record, with
/// the failure carried in `parse_error`, so one bad file never hides
/// problems in the rest of the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalArticle {
    pub path: PathBuf,
    pub remote_id: Option<String>,
    pub title: String,
    pub tags: Vec<String>,
    pub body_present: bool,
    pub parse_error: Option<String>,
}

impl LocalArticle {
    /// Record for a file that could not be read or parsed.
    pub fn failed(path: PathBuf, error: String) -> Self {
        Self {
            path,
            remote_id: None,
            title: String::new(),
            tags: Vec::new(),
            body_present: false,
            parse_error: Some(error),
        }
    }

    /// Structural problems that make this record unpublishable.
    ///
    /// A carried parse error subsumes field checks (the fields are not
    /// trustworthy after a failed parse).
    pub fn validation_errors(&self) -> Vec<String> {
        if let Some(err) = &self.parse_error {
            return vec![err.clone()];
        }
        let mut problems = Vec::new();
        if self.title.trim().is_empty() {
            problems.push("title is missing or empty".to_string());
        }
        if self.tags.is_empty() {
            problems.push("tag list is empty".to_string());
        }
        problems
    }
}

/// One tag entry as the remote service returns it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteTag {
    pub name: String,
}

/// One entry of the remote catalog, decoded straight from a catalog page.
///
/// `id` is the unique key; a duplicate across the fetched catalog is a
/// pagination fault, not something to deduplicate.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteArticle {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub tags: Vec<RemoteTag>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub private: bool,
}

impl RemoteArticle {
    pub fn tag_names(&self) -> BTreeSet<&str> {
        self.tags.iter().map(|t| t.name.as_str()).collect()
    }
}
