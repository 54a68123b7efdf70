//! Storage and media collaborators.
//!
//! The engine only needs two things from the outside world: load and
//! replace an article's content document, and turn uploaded bytes into a
//! URL. Both are traits so a database- or CDN-backed implementation can be
//! swapped in; the filesystem versions here back the desktop app and tests.

pub mod media;

pub use media::{FsMediaStore, MediaUploader, UploadError};

use relative_path::RelativePathBuf;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::content::{ArticleContentDocument, serialize};
use crate::models::{ArticleContent, ArticleId, ArticleRecord};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("Article not found: {0}")]
    NotFound(ArticleId),
    #[error("Article already exists: {0}")]
    AlreadyExists(ArticleId),
    #[error("Invalid article file {path}: {source}")]
    InvalidRecord {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid articles directory: {0}")]
    InvalidArticlesDir(String),
}

/// An article as stored: its record plus the raw, un-normalized document
#[derive(Clone, Debug, PartialEq)]
pub struct StoredArticle {
    pub record: ArticleRecord,
    pub content: Option<Value>,
}

/// Persistence for articles.
///
/// `save` is a whole-document replace with no merge and no concurrency
/// check: when two editors save the same article, the last save wins.
pub trait ArticleStore {
    /// Records of every stored article, newest first
    fn list(&self) -> Result<Vec<ArticleRecord>, IoError>;

    /// `Ok(None)` when no such article exists
    fn load(&self, id: &ArticleId) -> Result<Option<StoredArticle>, IoError>;

    /// Replace the article's content document
    fn save(&self, id: &ArticleId, document: &ArticleContentDocument) -> Result<(), IoError>;

    /// Store a new article with its initial content
    fn create(&self, record: &ArticleRecord, content: &ArticleContent) -> Result<(), IoError>;
}

#[derive(Serialize, Deserialize)]
struct ArticleFile {
    #[serde(flatten)]
    record: ArticleRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<Value>,
}

/// One JSON file per article: `<root>/<id>.json`, holding the record fields
/// and the content document under `content`.
#[derive(Clone, Debug)]
pub struct FsArticleStore {
    root: PathBuf,
}

impl FsArticleStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: &ArticleId) -> PathBuf {
        RelativePathBuf::from(format!("{id}.json")).to_path(&self.root)
    }

    fn read_file(&self, path: &Path) -> Result<ArticleFile, IoError> {
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|source| IoError::InvalidRecord {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl ArticleStore for FsArticleStore {
    fn list(&self) -> Result<Vec<ArticleRecord>, IoError> {
        validate_articles_dir(&self.root)?;

        let mut records = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            match self.read_file(&path) {
                Ok(file) => records.push(file.record),
                Err(e) => log::warn!("Skipping unreadable article file: {e}"),
            }
        }

        records.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.title.cmp(&b.title)));
        Ok(records)
    }

    fn load(&self, id: &ArticleId) -> Result<Option<StoredArticle>, IoError> {
        let path = self.path_for(id);
        if !path.exists() {
            return Ok(None);
        }
        let file = self.read_file(&path)?;
        Ok(Some(StoredArticle {
            record: file.record,
            content: file.content,
        }))
    }

    fn save(&self, id: &ArticleId, document: &ArticleContentDocument) -> Result<(), IoError> {
        let path = self.path_for(id);
        if !path.exists() {
            return Err(IoError::NotFound(id.clone()));
        }

        // Keep every other field of the file as it was
        let text = fs::read_to_string(&path)?;
        let mut file: Map<String, Value> =
            serde_json::from_str(&text).map_err(|source| IoError::InvalidRecord {
                path: path.clone(),
                source,
            })?;
        file.insert("content".to_string(), document.to_json());

        write_atomically(&path, &Value::Object(file))?;
        log::info!("Saved content of article {id}");
        Ok(())
    }

    fn create(&self, record: &ArticleRecord, content: &ArticleContent) -> Result<(), IoError> {
        validate_articles_dir(&self.root)?;
        let path = self.path_for(&record.id);
        if path.exists() {
            return Err(IoError::AlreadyExists(record.id.clone()));
        }

        let file = ArticleFile {
            record: record.clone(),
            content: Some(serialize(content).to_json()),
        };
        let value = serde_json::to_value(&file).map_err(|source| IoError::InvalidRecord {
            path: path.clone(),
            source,
        })?;
        write_atomically(&path, &value)?;
        log::info!("Created {} article {}", record.template_kind, record.id);
        Ok(())
    }
}

/// Write to a sibling temp file, then rename over the target so readers
/// never see a half-written document
fn write_atomically(path: &Path, value: &Value) -> Result<(), IoError> {
    let text = serde_json::to_string_pretty(value).map_err(|source| IoError::InvalidRecord {
        path: path.to_path_buf(),
        source,
    })?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, text)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub fn validate_articles_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidArticlesDir(format!(
            "Directory does not exist: {}",
            path.display()
        )));
    }

    Ok(())
}
