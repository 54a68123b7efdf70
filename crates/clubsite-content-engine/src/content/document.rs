use serde::{Deserialize, Serialize};

use crate::models::{ArticleContent, BlockKind, ContentBlock, EventMeta};

/// Persisted shape of an article's content.
///
/// Current code writes `blocks` (and `event` for event articles).
/// `legacy_body` only ever appears in documents written before blocks
/// existed; it is read by the normalizer and never written.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleContentDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Vec<BlockRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<EventRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_body: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRecord {
    pub id: String,
    pub kind: BlockKind,
    pub value: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rsvp_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&ContentBlock> for BlockRecord {
    fn from(block: &ContentBlock) -> Self {
        Self {
            id: block.id.as_str().to_string(),
            kind: block.kind,
            value: block.value.clone(),
        }
    }
}

impl From<&EventMeta> for EventRecord {
    fn from(meta: &EventMeta) -> Self {
        Self {
            venue: Some(meta.venue.clone()),
            fee: Some(meta.fee.clone()),
            rsvp_link: Some(meta.rsvp_link.clone()),
            description: Some(meta.description.clone()),
        }
    }
}

/// Serialize canonical content into the persisted document shape.
///
/// Only the data active for the template kind is written. A custom article
/// produces an empty document; its route key lives on the article record.
pub fn serialize(content: &ArticleContent) -> ArticleContentDocument {
    ArticleContentDocument {
        blocks: content
            .blocks()
            .map(|blocks| blocks.iter().map(BlockRecord::from).collect()),
        event: content.event().map(EventRecord::from),
        legacy_body: None,
    }
}

impl ArticleContentDocument {
    pub fn to_json(&self) -> serde_json::Value {
        // Plain structs with string fields always serialize
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl From<&ArticleContent> for ArticleContentDocument {
    fn from(content: &ArticleContent) -> Self {
        serialize(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::BlockSequence;
    use crate::models::{ContentBody, RouteKey, TemplateKind};
    use insta::assert_json_snapshot;

    fn event_content() -> ArticleContent {
        let blocks = BlockSequence::from_blocks(vec![
            ContentBlock::new("b1", BlockKind::Subheading, "Details"),
            ContentBlock::new("b2", BlockKind::Text, "Bring a bento."),
        ])
        .unwrap();
        ArticleContent::from_body(ContentBody::Event {
            blocks,
            event: EventMeta {
                venue: "Tokyo Hall".to_string(),
                fee: "Free".to_string(),
                ..Default::default()
            },
        })
    }

    #[test]
    fn test_serialize_event_document() {
        assert_json_snapshot!(serialize(&event_content()), @r#"
        {
          "blocks": [
            {
              "id": "b1",
              "kind": "subheading",
              "value": "Details"
            },
            {
              "id": "b2",
              "kind": "text",
              "value": "Bring a bento."
            }
          ],
          "event": {
            "venue": "Tokyo Hall",
            "fee": "Free",
            "rsvpLink": "",
            "description": ""
          }
        }
        "#);
    }

    #[test]
    fn test_serialize_custom_document_is_empty() {
        let content = ArticleContent::new(TemplateKind::Custom, RouteKey::parse("ticket"));
        assert_eq!(serialize(&content), ArticleContentDocument::default());
        assert_eq!(serialize(&content).to_json(), serde_json::json!({}));
    }

    #[test]
    fn test_serialize_never_writes_legacy_body() {
        let content = ArticleContent::new(TemplateKind::News, None);
        let json = serialize(&content).to_json();
        assert!(json.get("legacyBody").is_none());
        assert!(json.get("event").is_none());
    }
}
