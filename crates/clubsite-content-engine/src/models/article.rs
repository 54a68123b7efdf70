use serde::{Deserialize, Serialize};
use std::fmt;

use crate::editing::{BlockCmd, BlockSequence, Outcome, RemovalPolicy, Unchanged};
use crate::models::{BlockId, BlockKind, EventField, EventMeta};

/// Top-level discriminator selecting how an article is authored and rendered
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    News,
    Report,
    Event,
    Custom,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 4] = [
        TemplateKind::News,
        TemplateKind::Report,
        TemplateKind::Event,
        TemplateKind::Custom,
    ];

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "news" => Some(TemplateKind::News),
            "report" => Some(TemplateKind::Report),
            "event" => Some(TemplateKind::Event),
            "custom" => Some(TemplateKind::Custom),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateKind::News => "news",
            TemplateKind::Report => "report",
            TemplateKind::Event => "event",
            TemplateKind::Custom => "custom",
        }
    }

    /// Whether articles of this kind author their body as a block sequence
    pub fn has_blocks(self) -> bool {
        !matches!(self, TemplateKind::Custom)
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key selecting a registered bespoke layout. Never empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RouteKey(String);

impl RouteKey {
    /// Trims the key; blank keys are treated as absent
    pub fn parse(key: &str) -> Option<Self> {
        let trimmed = key.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RouteKey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        RouteKey::parse(&value).ok_or_else(|| "route key must not be blank".to_string())
    }
}

impl From<RouteKey> for String {
    fn from(key: RouteKey) -> Self {
        key.0
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The template-specific payload of an article.
///
/// Only the data that is active for a template kind exists in memory; a
/// stored `event` on a news article, or blocks on a custom article, never
/// make it past normalization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentBody {
    News { blocks: BlockSequence },
    Report { blocks: BlockSequence },
    Event { blocks: BlockSequence, event: EventMeta },
    Custom { route_key: Option<RouteKey> },
}

/// Canonical, invariant-satisfying article content
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArticleContent {
    body: ContentBody,
}

impl ArticleContent {
    /// Content for a newly created article: one empty text block, or just
    /// the route key for custom articles.
    pub fn new(kind: TemplateKind, route_key: Option<RouteKey>) -> Self {
        Self::with_blocks(kind, BlockSequence::starter(), EventMeta::default(), route_key)
    }

    /// Assemble content for `kind`, discarding whatever the kind does not use
    pub(crate) fn with_blocks(
        kind: TemplateKind,
        blocks: BlockSequence,
        event: EventMeta,
        route_key: Option<RouteKey>,
    ) -> Self {
        let body = match kind {
            TemplateKind::News => ContentBody::News { blocks },
            TemplateKind::Report => ContentBody::Report { blocks },
            TemplateKind::Event => ContentBody::Event { blocks, event },
            TemplateKind::Custom => ContentBody::Custom { route_key },
        };
        Self { body }
    }

    pub fn from_body(body: ContentBody) -> Self {
        Self { body }
    }

    pub fn body(&self) -> &ContentBody {
        &self.body
    }

    pub fn template_kind(&self) -> TemplateKind {
        match self.body {
            ContentBody::News { .. } => TemplateKind::News,
            ContentBody::Report { .. } => TemplateKind::Report,
            ContentBody::Event { .. } => TemplateKind::Event,
            ContentBody::Custom { .. } => TemplateKind::Custom,
        }
    }

    /// The block sequence, absent for custom articles
    pub fn blocks(&self) -> Option<&BlockSequence> {
        match &self.body {
            ContentBody::News { blocks }
            | ContentBody::Report { blocks }
            | ContentBody::Event { blocks, .. } => Some(blocks),
            ContentBody::Custom { .. } => None,
        }
    }

    fn blocks_mut(&mut self) -> Option<&mut BlockSequence> {
        match &mut self.body {
            ContentBody::News { blocks }
            | ContentBody::Report { blocks }
            | ContentBody::Event { blocks, .. } => Some(blocks),
            ContentBody::Custom { .. } => None,
        }
    }

    pub fn event(&self) -> Option<&EventMeta> {
        match &self.body {
            ContentBody::Event { event, .. } => Some(event),
            _ => None,
        }
    }

    pub fn custom_route_key(&self) -> Option<&RouteKey> {
        match &self.body {
            ContentBody::Custom { route_key } => route_key.as_ref(),
            _ => None,
        }
    }

    /// Apply a block command, returning the new content and what happened.
    ///
    /// `self` is left untouched; custom content has no blocks to edit.
    pub fn apply(&self, cmd: &BlockCmd, policy: RemovalPolicy) -> (ArticleContent, Outcome) {
        let mut next = self.clone();
        let Some(blocks) = next.blocks_mut() else {
            return (next, Outcome::Unchanged(Unchanged::NoBlocks));
        };
        let patch = blocks.apply(cmd, policy);
        *blocks = patch.blocks;
        (next, patch.outcome)
    }

    /// Convenience for [`BlockCmd::Append`] that also hands back the new id
    pub fn append_block(&self, kind: BlockKind) -> (ArticleContent, Option<BlockId>) {
        let (next, outcome) = self.apply(&BlockCmd::Append { kind }, RemovalPolicy::AllowEmpty);
        match outcome {
            Outcome::Appended(id) => (next, Some(id)),
            _ => (next, None),
        }
    }

    /// Edit one event field in place. Returns `false` for non-event content.
    pub fn set_event_field(&mut self, field: EventField, value: impl Into<String>) -> bool {
        match &mut self.body {
            ContentBody::Event { event, .. } => {
                event.set(field, value);
                true
            }
            _ => false,
        }
    }
}
