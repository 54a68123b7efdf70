use crate::ui::bespoke::registry;
use crate::ui::components::GenericLayoutView;
use clubsite_content_engine::models::{ArticleContent, ArticleRecord};
use clubsite_content_engine::rendering::{Dispatch, dispatch};
use dioxus::prelude::*;

/// A published article page: the shared header, then whatever renderer
/// the dispatcher picks
#[component]
pub fn ArticlePage(record: ArticleRecord, content: ArticleContent) -> Element {
    let body = match dispatch(&record, &content, registry()) {
        Dispatch::Bespoke { key, layout } => {
            log::debug!("Rendering {} with bespoke layout {key}", record.id);
            return (layout.render)(record);
        }
        Dispatch::Generic(view) => view,
    };
    let date = record.display_date();

    rsx! {
        article {
            class: "article-page",
            header {
                class: "article-header",
                h1 { "{record.title}" }
                p { class: "article-meta", "{record.club.name} · {date}" }
                if let Some(cover) = record.cover_image_url.as_ref() {
                    img { class: "article-cover", src: "{cover}", alt: "" }
                }
            }
            GenericLayoutView { view: body }
        }
    }
}
