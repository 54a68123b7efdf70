use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{RouteKey, TemplateKind};

/// Identifier of an article. Restricted to `[A-Za-z0-9_-]` so it can double
/// as a storage file name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ArticleId(String);

impl ArticleId {
    pub fn parse(id: &str) -> Option<Self> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        valid.then(|| Self(id.to_string()))
    }

    pub fn fresh() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ArticleId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ArticleId::parse(&value).ok_or_else(|| format!("invalid article id: {value:?}"))
    }
}

impl From<ArticleId> for String {
    fn from(id: ArticleId) -> Self {
        id.0
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reference to the club that owns an article
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubRef {
    pub id: String,
    pub name: String,
}

/// Article-level scalar fields stored beside the content document.
///
/// These are edited through the generic metadata form, not the block engine.
/// Bespoke layouts receive the whole record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRecord {
    pub id: ArticleId,
    pub title: String,
    pub date: NaiveDate,
    pub club: ClubRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    pub template_kind: TemplateKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_route_key: Option<String>,
    #[serde(default)]
    pub published: bool,
}

impl ArticleRecord {
    /// The stored route key, if it is set to something non-blank
    pub fn route_key(&self) -> Option<RouteKey> {
        self.custom_route_key.as_deref().and_then(RouteKey::parse)
    }

    /// Display form of the date, e.g. "3 May 2025"
    pub fn display_date(&self) -> String {
        self.date.format("%-d %B %Y").to_string()
    }
}
