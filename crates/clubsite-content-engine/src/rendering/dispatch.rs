use crate::models::{
    ArticleContent, ArticleRecord, BlockId, BlockKind, ContentBlock, EventMeta, RouteKey,
};
use crate::rendering::{GenericLayout, LayoutRegistry, RenderPath, classify};

/// Visual treatment of one block in the generic layouts
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BodyElement {
    Paragraph(String),
    SectionHeading(String),
    /// Media with a caption region; `src` is `None` until an image is uploaded
    Figure { src: Option<String> },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BodyNode {
    pub id: BlockId,
    pub element: BodyElement,
}

impl From<&ContentBlock> for BodyNode {
    fn from(block: &ContentBlock) -> Self {
        let element = match block.kind {
            BlockKind::Text => BodyElement::Paragraph(block.value.clone()),
            BlockKind::Subheading => BodyElement::SectionHeading(block.value.clone()),
            BlockKind::Image => {
                let src = block.value.trim();
                BodyElement::Figure {
                    src: (!src.is_empty()).then(|| src.to_string()),
                }
            }
        };
        Self {
            id: block.id.clone(),
            element,
        }
    }
}

/// Everything a generic layout needs, already in render order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenericView {
    pub layout: GenericLayout,
    /// One node per block, same order, nothing filtered
    pub body: Vec<BodyNode>,
    /// Only for the event layout
    pub event: Option<EventMeta>,
}

impl GenericView {
    pub fn build(layout: GenericLayout, content: &ArticleContent) -> Self {
        let body = content
            .blocks()
            .map(|blocks| blocks.iter().map(BodyNode::from).collect())
            .unwrap_or_default();
        let event = match layout {
            GenericLayout::Event => Some(content.event().cloned().unwrap_or_default()),
            GenericLayout::News | GenericLayout::Report => None,
        };
        Self {
            layout,
            body,
            event,
        }
    }
}

/// The renderer chosen for an article
#[derive(Debug, PartialEq, Eq)]
pub enum Dispatch<'r, L> {
    /// A registered bespoke layout; it receives the whole article record
    Bespoke { key: RouteKey, layout: &'r L },
    Generic(GenericView),
}

/// Pick and prepare the renderer for a published article.
///
/// Total: whatever the content, the result is something renderable.
pub fn dispatch<'r, R>(
    record: &ArticleRecord,
    content: &ArticleContent,
    registry: &'r R,
) -> Dispatch<'r, R::Layout>
where
    R: LayoutRegistry + ?Sized,
{
    let kind = content.template_kind();
    if kind != record.template_kind {
        log::warn!(
            "Article {} is flagged {} but its content is {kind}; rendering as {kind}",
            record.id,
            record.template_kind
        );
    }

    match classify(kind, content.custom_route_key(), registry) {
        RenderPath::Bespoke(key) => match registry.lookup(&key) {
            Some(layout) => Dispatch::Bespoke { key, layout },
            None => Dispatch::Generic(GenericView::build(GenericLayout::for_kind(kind), content)),
        },
        RenderPath::Generic(layout) => Dispatch::Generic(GenericView::build(layout, content)),
    }
}
