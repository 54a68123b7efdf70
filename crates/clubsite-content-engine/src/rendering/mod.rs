//! Render path selection for published articles.
//!
//! [`classify`] decides between a registered bespoke layout and the generic
//! layout for the article's kind; [`dispatch`] resolves that decision into
//! either the layout itself or a [`GenericView`] ready for a frontend.
//! Neither can fail: an unknown route key degrades to the generic layout.

pub mod classify;
pub mod dispatch;
pub mod registry;

pub use classify::{GenericLayout, RenderPath, classify};
pub use dispatch::{BodyElement, BodyNode, Dispatch, GenericView, dispatch};
pub use registry::{LayoutRegistry, StaticRegistry};
