use proptest::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::content::ArticleContentDocument;
use crate::editing::BlockSequence;
use crate::io::{ArticleStore, IoError, MediaUploader, StoredArticle, UploadError};
use crate::models::{
    ArticleContent, ArticleId, ArticleRecord, BlockKind, ClubRef, ContentBlock, TemplateKind,
};

/// Create a temporary articles directory
pub fn create_test_articles_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Write an article file with arbitrary JSON
pub fn write_article_file(dir: &TempDir, id: &str, json: serde_json::Value) -> PathBuf {
    let file_path = dir.path().join(format!("{id}.json"));
    fs::write(&file_path, serde_json::to_string_pretty(&json).unwrap()).unwrap();
    file_path
}

pub fn sample_record(id: &str, kind: TemplateKind) -> ArticleRecord {
    ArticleRecord {
        id: ArticleId::parse(id).unwrap(),
        title: format!("Article {id}"),
        date: chrono::NaiveDate::from_ymd_opt(2025, 5, 3).unwrap(),
        club: ClubRef {
            id: "club-1".to_string(),
            name: "Riverside Kendo".to_string(),
        },
        cover_image_url: None,
        template_kind: kind,
        custom_route_key: None,
        published: true,
    }
}

/// Store whose writes always fail
pub struct FailingStore;

impl ArticleStore for FailingStore {
    fn list(&self) -> Result<Vec<ArticleRecord>, IoError> {
        Ok(Vec::new())
    }

    fn load(&self, _id: &ArticleId) -> Result<Option<StoredArticle>, IoError> {
        Ok(None)
    }

    fn save(&self, _id: &ArticleId, _document: &ArticleContentDocument) -> Result<(), IoError> {
        Err(IoError::Io(std::io::Error::other("disk full")))
    }

    fn create(&self, _record: &ArticleRecord, _content: &ArticleContent) -> Result<(), IoError> {
        Err(IoError::Io(std::io::Error::other("disk full")))
    }
}

/// Uploader that always fails
pub struct FailingUploader;

impl MediaUploader for FailingUploader {
    fn upload(&self, _bytes: &[u8], _file_name: &str) -> Result<String, UploadError> {
        Err(UploadError::Io(std::io::Error::other("connection reset")))
    }
}

pub fn arb_block_kind() -> impl Strategy<Value = BlockKind> {
    prop_oneof![
        Just(BlockKind::Text),
        Just(BlockKind::Subheading),
        Just(BlockKind::Image),
    ]
}

/// Non-empty sequences with distinct ids and arbitrary values
pub fn arb_block_sequence() -> impl Strategy<Value = BlockSequence> {
    prop::collection::vec((arb_block_kind(), "\\PC{0,16}"), 1..8).prop_map(|entries| {
        let blocks = entries
            .into_iter()
            .enumerate()
            .map(|(i, (kind, value))| ContentBlock::new(format!("b{i}"), kind, value))
            .collect();
        BlockSequence::from_blocks(blocks).unwrap()
    })
}
