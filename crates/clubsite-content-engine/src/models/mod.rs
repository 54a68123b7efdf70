pub mod article;
pub mod block;
pub mod event;
pub mod record;

pub use article::{ArticleContent, ContentBody, RouteKey, TemplateKind};
pub use block::{BlockId, BlockKind, ContentBlock};
pub use event::{EventField, EventMeta};
pub use record::{ArticleId, ArticleRecord, ClubRef};
