pub mod content;
pub mod editing;
pub mod io;
pub mod models;
pub mod rendering;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use content::{ArticleContentDocument, Normalized, SourceShape, normalize, serialize};
pub use editing::{
    AuthoringSession, BlockCmd, BlockSequence, Direction, Outcome, RemovalPolicy, SessionError,
};
pub use io::{ArticleStore, FsArticleStore, FsMediaStore, IoError, MediaUploader, UploadError};
pub use models::*;
pub use rendering::{Dispatch, GenericLayout, GenericView, LayoutRegistry, StaticRegistry, dispatch};
