use crate::ui::components::{ContentBlock, EventDetails};
use clubsite_content_engine::rendering::GenericView;
use dioxus::prelude::*;

/// News, report and event articles, rendered from their blocks in order
#[component]
pub fn GenericLayoutView(view: GenericView) -> Element {
    let layout = view.layout.as_str();

    rsx! {
        div {
            class: "generic-layout layout-{layout}",
            if let Some(event) = view.event.clone() {
                EventDetails { event }
            }
            div {
                class: "article-body",
                for node in view.body.iter() {
                    ContentBlock { key: "{node.id}", node: node.clone() }
                }
            }
        }
    }
}
