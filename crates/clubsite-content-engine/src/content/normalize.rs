use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::editing::BlockSequence;
use crate::models::{
    ArticleContent, ArticleRecord, BlockId, BlockKind, ContentBlock, EventMeta, RouteKey,
    TemplateKind,
};

/// Key under which pre-block documents stored their whole body
pub const LEGACY_BODY_KEY: &str = "legacyBody";

/// Which persisted shape the canonical content was built from
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SourceShape {
    /// No document stored
    Missing,
    /// Stored document could not be read as an object
    Unreadable,
    /// Current block shape. Counts entries dropped for an unknown kind or a
    /// non-object shape, and ids re-minted because they were missing or repeated.
    Blocks { dropped: usize, reassigned: usize },
    /// Historical single-body shape, migrated in memory only
    Legacy,
    /// Readable but carried no usable blocks or legacy body
    Empty,
    /// Custom articles do not read blocks from the document
    Bespoke,
}

impl SourceShape {
    /// Whether saving would write something materially different from what
    /// is stored (legacy migration, dropped or re-keyed entries)
    pub fn needs_upgrade(self) -> bool {
        match self {
            SourceShape::Legacy => true,
            SourceShape::Blocks { dropped, reassigned } => dropped > 0 || reassigned > 0,
            _ => false,
        }
    }
}

/// Canonical content together with a note on where it came from
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Normalized {
    pub content: ArticleContent,
    pub source: SourceShape,
}

/// Convert any persisted document into canonical content. Never fails.
///
/// `kind` and `route_key` come from the article record; `raw` is the stored
/// document, if any.
pub fn normalize(
    kind: TemplateKind,
    route_key: Option<&str>,
    raw: Option<&Value>,
) -> ArticleContent {
    normalize_with_report(kind, route_key, raw).content
}

/// Like [`normalize`], for documents stored as JSON text
pub fn normalize_json(
    kind: TemplateKind,
    route_key: Option<&str>,
    raw: Option<&str>,
) -> ArticleContent {
    match raw {
        None => normalize(kind, route_key, None),
        Some(text) => match serde_json::from_str::<Value>(text) {
            Ok(value) => normalize(kind, route_key, Some(&value)),
            Err(e) => {
                log::warn!("Stored {kind} content is not valid JSON, using default content: {e}");
                ArticleContent::new(kind, route_key.and_then(RouteKey::parse))
            }
        },
    }
}

/// Normalize using the record's stored template flag and route key
pub fn normalize_record(record: &ArticleRecord, raw: Option<&Value>) -> Normalized {
    normalize_with_report(record.template_kind, record.custom_route_key.as_deref(), raw)
}

pub fn normalize_with_report(
    kind: TemplateKind,
    route_key: Option<&str>,
    raw: Option<&Value>,
) -> Normalized {
    let route_key = route_key.and_then(RouteKey::parse);

    if !kind.has_blocks() {
        return Normalized {
            content: ArticleContent::new(kind, route_key),
            source: SourceShape::Bespoke,
        };
    }

    let document = match raw {
        None | Some(Value::Null) => {
            return default_content(kind, route_key, SourceShape::Missing);
        }
        Some(value) => match as_document(value) {
            Some(document) => document,
            None => {
                log::warn!("Stored {kind} content is not a document object, using default content");
                return default_content(kind, route_key, SourceShape::Unreadable);
            }
        },
    };

    let event = if kind == TemplateKind::Event {
        read_event(document.get("event"))
    } else {
        EventMeta::default()
    };

    let (blocks, source) = match read_blocks(document.get("blocks")) {
        Some((blocks, dropped, reassigned)) => {
            (blocks, SourceShape::Blocks { dropped, reassigned })
        }
        None => match document.get(LEGACY_BODY_KEY) {
            Some(Value::String(body)) => {
                log::debug!("Migrating legacy body into a single text block");
                let block = ContentBlock::new(BlockId::fresh(), BlockKind::Text, body.clone());
                (single(block), SourceShape::Legacy)
            }
            _ => (BlockSequence::starter(), SourceShape::Empty),
        },
    };

    Normalized {
        content: ArticleContent::with_blocks(kind, blocks, event, route_key),
        source,
    }
}

fn default_content(
    kind: TemplateKind,
    route_key: Option<RouteKey>,
    source: SourceShape,
) -> Normalized {
    Normalized {
        content: ArticleContent::new(kind, route_key),
        source,
    }
}

/// Objects are used directly; a string holding a JSON object (content
/// stored as text) is unwrapped once.
fn as_document(value: &Value) -> Option<std::borrow::Cow<'_, Map<String, Value>>> {
    match value {
        Value::Object(map) => Some(std::borrow::Cow::Borrowed(map)),
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => Some(std::borrow::Cow::Owned(map)),
            _ => None,
        },
        _ => None,
    }
}

fn single(block: ContentBlock) -> BlockSequence {
    BlockSequence::from_blocks(vec![block]).unwrap_or_else(|_| BlockSequence::starter())
}

struct Candidate {
    id: Option<String>,
    kind: BlockKind,
    value: String,
}

/// Read the `blocks` array. Returns `None` when nothing usable is left.
fn read_blocks(raw: Option<&Value>) -> Option<(BlockSequence, usize, usize)> {
    let entries = raw?.as_array()?;

    let mut dropped = 0;
    let mut candidates = Vec::with_capacity(entries.len());
    for entry in entries {
        match read_candidate(entry) {
            Some(candidate) => candidates.push(candidate),
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        log::warn!("Dropped {dropped} block(s) with an unknown kind or shape");
    }
    if candidates.is_empty() {
        return None;
    }

    // Fresh ids must not collide with any id still present in the document
    let persisted: HashSet<&str> = candidates.iter().filter_map(|c| c.id.as_deref()).collect();
    let mint = |taken: &HashSet<String>| loop {
        let id = BlockId::fresh();
        if !persisted.contains(id.as_str()) && !taken.contains(id.as_str()) {
            break id;
        }
    };

    let mut taken: HashSet<String> = HashSet::with_capacity(candidates.len());
    let mut reassigned = 0;
    let mut blocks = Vec::with_capacity(candidates.len());
    for candidate in &candidates {
        let id = match candidate.id.as_deref() {
            Some(id) if !taken.contains(id) => BlockId::from(id),
            _ => {
                reassigned += 1;
                mint(&taken)
            }
        };
        taken.insert(id.as_str().to_string());
        blocks.push(ContentBlock {
            id,
            kind: candidate.kind,
            value: candidate.value.clone(),
        });
    }
    if reassigned > 0 {
        log::debug!("Assigned fresh ids to {reassigned} block(s) with a missing or repeated id");
    }

    let blocks = BlockSequence::from_blocks(blocks).ok()?;
    Some((blocks, dropped, reassigned))
}

fn read_candidate(entry: &Value) -> Option<Candidate> {
    let entry = entry.as_object()?;
    let kind = entry.get("kind")?.as_str()?;
    let Some(kind) = BlockKind::parse(kind) else {
        log::debug!("Dropping block with unknown kind {kind:?}");
        return None;
    };
    let id = entry
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(str::to_string);
    let value = entry
        .get("value")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    Some(Candidate { id, kind, value })
}

fn read_event(raw: Option<&Value>) -> EventMeta {
    let Some(Value::Object(event)) = raw else {
        return EventMeta::default();
    };
    let field = |name: &str| {
        event
            .get(name)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    EventMeta {
        venue: field("venue"),
        fee: field("fee"),
        rsvp_link: field("rsvpLink"),
        description: field("description"),
    }
}


#[cfg(test)]
mod properties {
    use super::*;
    use crate::content::serialize;
    use crate::models::ContentBody;
    use crate::tests::arb_block_sequence;
    use proptest::prelude::*;

    fn arb_event() -> impl Strategy<Value = EventMeta> {
        ("\\PC{0,12}", "\\PC{0,12}", "\\PC{0,12}", "\\PC{0,12}").prop_map(
            |(venue, fee, rsvp_link, description)| EventMeta {
                venue,
                fee,
                rsvp_link,
                description,
            },
        )
    }

    /// Canonical content with at least one block
    fn arb_block_content() -> impl Strategy<Value = ArticleContent> {
        (arb_block_sequence(), arb_event(), 0..3usize).prop_map(|(blocks, event, kind)| {
            ArticleContent::from_body(match kind {
                0 => ContentBody::News { blocks },
                1 => ContentBody::Report { blocks },
                _ => ContentBody::Event { blocks, event },
            })
        })
    }

    /// Stored entries with unknown kinds, missing values and clashing ids
    fn arb_stored_entry() -> impl Strategy<Value = Value> {
        (
            proptest::option::of("[ab]?"),
            prop_oneof![Just("text"), Just("image"), Just("video"), Just("")],
            proptest::option::of("[a-z]{0,4}"),
        )
            .prop_map(|(id, kind, value)| {
                let mut entry = Map::new();
                if let Some(id) = id {
                    entry.insert("id".to_string(), Value::String(id));
                }
                entry.insert("kind".to_string(), Value::String(kind.to_string()));
                if let Some(value) = value {
                    entry.insert("value".to_string(), Value::String(value));
                }
                Value::Object(entry)
            })
    }

    proptest! {
        #[test]
        fn test_normalize_inverts_serialize(content in arb_block_content()) {
            let stored = serialize(&content).to_json();
            let reloaded = normalize(content.template_kind(), None, Some(&stored));
            prop_assert_eq!(reloaded, content);
        }

        #[test]
        fn test_stored_blocks_always_normalize_to_valid_content(
            entries in prop::collection::vec(arb_stored_entry(), 0..8),
        ) {
            let raw = serde_json::json!({ "blocks": entries });
            let content = normalize(TemplateKind::Report, None, Some(&raw));

            let blocks = content.blocks().unwrap();
            prop_assert!(!blocks.is_empty());
            let unique: HashSet<_> = blocks.ids().collect();
            prop_assert_eq!(unique.len(), blocks.len());
        }
    }
}
