use crate::ui::components::{Figure, Paragraph, SectionHeading};
use clubsite_content_engine::rendering::{BodyElement, BodyNode};
use dioxus::prelude::*;

#[component]
pub fn ContentBlock(node: BodyNode) -> Element {
    match node.element {
        BodyElement::Paragraph(text) => rsx! {
            Paragraph { text }
        },
        BodyElement::SectionHeading(text) => rsx! {
            SectionHeading { text }
        },
        BodyElement::Figure { src } => rsx! {
            Figure { src }
        },
    }
}
