use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a content block, unique within its article.
///
/// Ids are assigned once when a block is created and never change while the
/// block exists. Persisted ids are kept verbatim, so this is a string rather
/// than a parsed UUID: older documents may carry ids in any format.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    /// Mint a new random id
    pub fn fresh() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BlockId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for BlockId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The kind of a content block. Each kind has exactly one visual treatment.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// Body paragraph
    Text,
    /// Section heading
    Subheading,
    /// Uploaded media, the value is its URL
    Image,
}

impl BlockKind {
    pub const ALL: [BlockKind; 3] = [BlockKind::Text, BlockKind::Subheading, BlockKind::Image];

    /// Parse the persisted name of a kind. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "text" => Some(BlockKind::Text),
            "subheading" => Some(BlockKind::Subheading),
            "image" => Some(BlockKind::Image),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BlockKind::Text => "text",
            BlockKind::Subheading => "subheading",
            BlockKind::Image => "image",
        }
    }

    /// Label used by the authoring surface
    pub fn label(self) -> &'static str {
        match self {
            BlockKind::Text => "Text",
            BlockKind::Subheading => "Subheading",
            BlockKind::Image => "Image",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One displayable unit of authored content
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub id: BlockId,
    pub kind: BlockKind,
    pub value: String,
}

impl ContentBlock {
    /// A new block with a fresh id and an empty value
    pub fn empty(kind: BlockKind) -> Self {
        Self {
            id: BlockId::fresh(),
            kind,
            value: String::new(),
        }
    }

    pub fn new(id: impl Into<BlockId>, kind: BlockKind, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_fresh_ids_are_distinct() {
        let a = BlockId::fresh();
        let b = BlockId::fresh();
        assert_ne!(a, b);
        assert!(!a.as_str().is_empty());
    }

    #[rstest]
    #[case("text", Some(BlockKind::Text))]
    #[case("subheading", Some(BlockKind::Subheading))]
    #[case("image", Some(BlockKind::Image))]
    #[case("video", None)]
    #[case("Text", None)]
    #[case("", None)]
    fn test_parse_block_kind(#[case] name: &str, #[case] expected: Option<BlockKind>) {
        assert_eq!(BlockKind::parse(name), expected);
    }

    #[test]
    fn test_kind_names_round_trip() {
        for kind in BlockKind::ALL {
            assert_eq!(BlockKind::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_empty_block_has_no_value() {
        let block = ContentBlock::empty(BlockKind::Image);
        assert_eq!(block.kind, BlockKind::Image);
        assert!(block.value.is_empty());
    }
}
