use crate::content::{ArticleContentDocument, SourceShape, normalize_record, serialize};
use crate::editing::{BlockCmd, Outcome, RemovalPolicy, Unchanged};
use crate::io::{ArticleStore, IoError, MediaUploader, UploadError};
use crate::models::{ArticleContent, ArticleId, ArticleRecord, BlockId, BlockKind, EventField};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Article not found: {0}")]
    NotFound(ArticleId),
    #[error("Could not save article: {0}")]
    Save(#[source] IoError),
    #[error("Could not load article: {0}")]
    Load(#[source] IoError),
    #[error("Could not upload image: {0}")]
    Upload(#[from] UploadError),
    #[error("Block {0} is not an image block")]
    NotAnImage(BlockId),
}

/// One author's in-memory editing state for one article.
///
/// Edits apply to the session's copy only. [`AuthoringSession::save`] writes
/// the whole document; if it fails the edits stay in place so the author can
/// retry.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthoringSession {
    record: ArticleRecord,
    content: ArticleContent,
    policy: RemovalPolicy,
    source: SourceShape,
    dirty: bool,
}

impl AuthoringSession {
    /// Load and normalize an article for editing
    pub fn open(store: &impl ArticleStore, id: &ArticleId) -> Result<Self, SessionError> {
        let stored = store
            .load(id)
            .map_err(SessionError::Load)?
            .ok_or_else(|| SessionError::NotFound(id.clone()))?;
        let normalized = normalize_record(&stored.record, stored.content.as_ref());
        if normalized.source.needs_upgrade() {
            log::info!(
                "Article {id} was stored as {:?}; it will be rewritten on save",
                normalized.source
            );
        }

        Ok(Self {
            policy: RemovalPolicy::for_template(stored.record.template_kind),
            record: stored.record,
            content: normalized.content,
            source: normalized.source,
            dirty: false,
        })
    }

    pub fn from_parts(record: ArticleRecord, content: ArticleContent) -> Self {
        Self {
            policy: RemovalPolicy::for_template(content.template_kind()),
            record,
            content,
            source: SourceShape::Blocks {
                dropped: 0,
                reassigned: 0,
            },
            dirty: false,
        }
    }

    pub fn record(&self) -> &ArticleRecord {
        &self.record
    }

    pub fn content(&self) -> &ArticleContent {
        &self.content
    }

    pub fn policy(&self) -> RemovalPolicy {
        self.policy
    }

    /// Where the loaded content came from
    pub fn source(&self) -> SourceShape {
        self.source
    }

    /// Unsaved edits exist
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Whether saving now would upgrade the stored shape even without edits
    pub fn needs_upgrade(&self) -> bool {
        self.source.needs_upgrade()
    }

    pub fn apply(&mut self, cmd: BlockCmd) -> Outcome {
        let (next, outcome) = self.content.apply(&cmd, self.policy);
        if outcome.is_change() {
            self.content = next;
            self.dirty = true;
        } else {
            log::debug!("Command {cmd:?} left the article unchanged: {outcome:?}");
        }
        outcome
    }

    /// Edit an event field. Returns `false` for non-event articles.
    pub fn set_event_field(&mut self, field: EventField, value: impl Into<String>) -> bool {
        let value = value.into();
        let unchanged = self
            .content
            .event()
            .is_some_and(|event| event.get(field) == value);
        if unchanged {
            return true;
        }
        let changed = self.content.set_event_field(field, value);
        self.dirty |= changed;
        changed
    }

    /// Upload bytes and store the URL as the value of image block `target`.
    ///
    /// A failed upload leaves the block as it was.
    pub fn upload_image(
        &mut self,
        uploader: &impl MediaUploader,
        target: &BlockId,
        bytes: &[u8],
        file_name: &str,
    ) -> Result<Outcome, SessionError> {
        let block = self.content.blocks().and_then(|blocks| blocks.get(target));
        match block {
            None => return Ok(Outcome::Unchanged(Unchanged::UnknownId)),
            Some(block) if block.kind != BlockKind::Image => {
                return Err(SessionError::NotAnImage(target.clone()));
            }
            Some(_) => {}
        }

        let url = uploader.upload(bytes, file_name)?;
        Ok(self.apply(BlockCmd::SetValue {
            id: target.clone(),
            value: url,
        }))
    }

    /// Append a new image block holding the uploaded media
    pub fn attach_image(
        &mut self,
        uploader: &impl MediaUploader,
        bytes: &[u8],
        file_name: &str,
    ) -> Result<Outcome, SessionError> {
        if self.content.blocks().is_none() {
            return Ok(Outcome::Unchanged(Unchanged::NoBlocks));
        }

        // Upload first so a failure adds nothing
        let url = uploader.upload(bytes, file_name)?;
        let (next, id) = self.content.append_block(BlockKind::Image);
        let Some(id) = id else {
            return Ok(Outcome::Unchanged(Unchanged::NoBlocks));
        };
        let (next, _) = next.apply(
            &BlockCmd::SetValue {
                id: id.clone(),
                value: url,
            },
            self.policy,
        );
        self.content = next;
        self.dirty = true;
        Ok(Outcome::Appended(id))
    }

    /// The document that [`AuthoringSession::save`] would write
    pub fn document(&self) -> ArticleContentDocument {
        serialize(&self.content)
    }

    /// Replace the stored document with the current content.
    ///
    /// On failure nothing in the session changes.
    pub fn save(&mut self, store: &impl ArticleStore) -> Result<(), SessionError> {
        store
            .save(&self.record.id, &self.document())
            .map_err(|e| {
                log::error!("Saving article {} failed: {e}", self.record.id);
                SessionError::Save(e)
            })?;
        self.dirty = false;
        self.source = SourceShape::Blocks {
            dropped: 0,
            reassigned: 0,
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::Direction;
    use crate::io::FsArticleStore;
    use crate::models::TemplateKind;
    use crate::tests::{FailingStore, FailingUploader, create_test_articles_dir, sample_record};
    use pretty_assertions::assert_eq;

    fn open_new(kind: TemplateKind) -> (tempfile::TempDir, FsArticleStore, AuthoringSession) {
        let dir = create_test_articles_dir();
        let store = FsArticleStore::new(dir.path());
        let record = sample_record("article", kind);
        store
            .create(&record, &ArticleContent::new(kind, None))
            .unwrap();
        let session = AuthoringSession::open(&store, &record.id).unwrap();
        (dir, store, session)
    }

    #[test]
    fn test_open_missing_article() {
        let dir = create_test_articles_dir();
        let store = FsArticleStore::new(dir.path());
        let result = AuthoringSession::open(&store, &ArticleId::parse("missing").unwrap());
        assert!(matches!(result, Err(SessionError::NotFound(_))));
    }

    #[test]
    fn test_edits_mark_session_dirty_and_save_clears_it() {
        let (_dir, store, mut session) = open_new(TemplateKind::News);
        assert!(!session.is_dirty());

        let outcome = session.apply(BlockCmd::Append {
            kind: BlockKind::Subheading,
        });
        assert!(outcome.is_change());
        assert!(session.is_dirty());

        session.save(&store).unwrap();
        assert!(!session.is_dirty());

        let reopened = AuthoringSession::open(&store, &session.record().id).unwrap();
        assert_eq!(reopened.content(), session.content());
    }

    #[test]
    fn test_noop_commands_do_not_dirty() {
        let (_dir, _store, mut session) = open_new(TemplateKind::News);
        let first = session.content().blocks().unwrap().as_slice()[0].id.clone();

        let outcome = session.apply(BlockCmd::Move {
            id: first,
            direction: Direction::Up,
        });

        assert_eq!(outcome, Outcome::Unchanged(Unchanged::AtBoundary));
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_report_sessions_keep_one_section() {
        let (_dir, _store, mut session) = open_new(TemplateKind::Report);
        let only = session.content().blocks().unwrap().as_slice()[0].id.clone();

        let outcome = session.apply(BlockCmd::Remove { id: only });

        assert_eq!(outcome, Outcome::Unchanged(Unchanged::LastBlockKept));
        assert_eq!(session.content().blocks().unwrap().len(), 1);
    }

    #[test]
    fn test_news_sessions_may_remove_every_block() {
        let (_dir, _store, mut session) = open_new(TemplateKind::News);
        let only = session.content().blocks().unwrap().as_slice()[0].id.clone();

        session.apply(BlockCmd::Remove { id: only });

        assert!(session.content().blocks().unwrap().is_empty());
    }

    #[test]
    fn test_failed_save_preserves_edits() {
        let record = sample_record("article", TemplateKind::Event);
        let mut session =
            AuthoringSession::from_parts(record, ArticleContent::new(TemplateKind::Event, None));
        session.set_event_field(EventField::Venue, "Tokyo Hall");
        session.apply(BlockCmd::Append {
            kind: BlockKind::Text,
        });
        let before = session.content().clone();

        let result = session.save(&FailingStore);

        assert!(matches!(result, Err(SessionError::Save(_))));
        assert!(session.is_dirty());
        assert_eq!(session.content(), &before);
    }

    #[test]
    fn test_event_field_edits() {
        let (_dir, _store, mut session) = open_new(TemplateKind::Event);

        assert!(session.set_event_field(EventField::Fee, "Free"));
        assert!(session.is_dirty());
        assert_eq!(session.content().event().unwrap().fee, "Free");
    }

    #[test]
    fn test_event_field_edits_refused_for_news() {
        let (_dir, _store, mut session) = open_new(TemplateKind::News);
        assert!(!session.set_event_field(EventField::Fee, "Free"));
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_upload_image_sets_block_value() {
        let (dir, _store, mut session) = open_new(TemplateKind::News);
        let uploader = crate::io::FsMediaStore::new(dir.path().join("media"), "/media");
        session.apply(BlockCmd::Append {
            kind: BlockKind::Image,
        });
        let image = session.content().blocks().unwrap().as_slice()[1].id.clone();

        let outcome = session
            .upload_image(&uploader, &image, b"jpeg bytes", "team.jpg")
            .unwrap();

        assert_eq!(outcome, Outcome::Updated(image.clone()));
        let value = &session.content().blocks().unwrap().get(&image).unwrap().value;
        assert!(value.starts_with("/media/"));
    }

    #[test]
    fn test_upload_into_text_block_is_refused() {
        let (dir, _store, mut session) = open_new(TemplateKind::News);
        let uploader = crate::io::FsMediaStore::new(dir.path().join("media"), "/media");
        let text = session.content().blocks().unwrap().as_slice()[0].id.clone();

        let result = session.upload_image(&uploader, &text, b"bytes", "a.png");
        assert!(matches!(result, Err(SessionError::NotAnImage(_))));
    }

    #[test]
    fn test_failed_upload_adds_nothing() {
        let (_dir, _store, mut session) = open_new(TemplateKind::News);
        let before = session.content().clone();

        let result = session.attach_image(&FailingUploader, b"bytes", "a.png");

        assert!(matches!(result, Err(SessionError::Upload(_))));
        assert_eq!(session.content(), &before);
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_attach_image_appends_block_with_url() {
        let (dir, _store, mut session) = open_new(TemplateKind::Event);
        let uploader = crate::io::FsMediaStore::new(dir.path().join("media"), "/media");

        let outcome = session.attach_image(&uploader, b"gif", "flyer.gif").unwrap();

        let Outcome::Appended(id) = outcome else {
            panic!("expected append");
        };
        let block = session.content().blocks().unwrap().get(&id).unwrap();
        assert_eq!(block.kind, BlockKind::Image);
        assert!(block.value.ends_with(".gif"));
    }

    #[test]
    fn test_legacy_article_is_upgraded_only_on_save() {
        let dir = create_test_articles_dir();
        crate::tests::write_article_file(
            &dir,
            "old",
            serde_json::json!({
                "id": "old",
                "title": "Old news",
                "date": "2018-04-01",
                "club": { "id": "c", "name": "Club" },
                "templateKind": "news",
                "content": { "legacyBody": "Hello from 2018" }
            }),
        );
        let store = FsArticleStore::new(dir.path());
        let id = ArticleId::parse("old").unwrap();

        let mut session = AuthoringSession::open(&store, &id).unwrap();
        assert!(session.needs_upgrade());
        assert!(!session.is_dirty());

        // Still legacy on disk until saved
        let stored = store.load(&id).unwrap().unwrap();
        assert!(stored.content.unwrap().get("legacyBody").is_some());

        session.save(&store).unwrap();
        assert!(!session.needs_upgrade());
        let stored = store.load(&id).unwrap().unwrap();
        let content = stored.content.unwrap();
        assert!(content.get("legacyBody").is_none());
        assert_eq!(content["blocks"][0]["value"], "Hello from 2018");
    }
}
