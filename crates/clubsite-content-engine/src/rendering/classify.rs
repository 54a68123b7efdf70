use crate::models::{RouteKey, TemplateKind};
use crate::rendering::LayoutRegistry;

/// Layout used when an article is rendered from its blocks
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GenericLayout {
    News,
    Report,
    Event,
}

impl GenericLayout {
    /// Custom articles that cannot be rendered bespoke fall back to news
    pub fn for_kind(kind: TemplateKind) -> Self {
        match kind {
            TemplateKind::News | TemplateKind::Custom => GenericLayout::News,
            TemplateKind::Report => GenericLayout::Report,
            TemplateKind::Event => GenericLayout::Event,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GenericLayout::News => "news",
            GenericLayout::Report => "report",
            GenericLayout::Event => "event",
        }
    }
}

/// How an article will be rendered
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderPath {
    Bespoke(RouteKey),
    Generic(GenericLayout),
}

/// Decide the render path for an article. Pure; never fails.
///
/// A route key that is set but not registered falls through to the generic
/// layout for the article's kind rather than producing an empty page.
pub fn classify<R>(kind: TemplateKind, route_key: Option<&RouteKey>, registry: &R) -> RenderPath
where
    R: LayoutRegistry + ?Sized,
{
    match route_key {
        Some(key) if registry.contains(key) => RenderPath::Bespoke(key.clone()),
        Some(key) => {
            log::warn!("No bespoke layout registered for {key:?}; using the {kind} layout");
            RenderPath::Generic(GenericLayout::for_kind(kind))
        }
        None => RenderPath::Generic(GenericLayout::for_kind(kind)),
    }
}
