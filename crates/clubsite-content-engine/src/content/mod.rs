//! Persisted content documents and their conversion to canonical content.
//!
//! [`normalize`] is the only place that interprets stored shapes, including
//! the pre-block legacy body. Everything downstream works on
//! [`crate::models::ArticleContent`]; [`serialize`] writes it back in the
//! current shape.

pub mod document;
pub mod normalize;

pub use document::{ArticleContentDocument, BlockRecord, EventRecord, serialize};
pub use normalize::{
    LEGACY_BODY_KEY, Normalized, SourceShape, normalize, normalize_json, normalize_record,
    normalize_with_report,
};
