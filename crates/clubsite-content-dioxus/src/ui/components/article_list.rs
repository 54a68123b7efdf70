use clubsite_content_engine::models::{ArticleId, ArticleRecord};
use dioxus::prelude::*;

#[component]
pub fn ArticleList(
    records: Vec<ArticleRecord>,
    selected: Option<ArticleId>,
    on_select: EventHandler<ArticleId>,
) -> Element {
    rsx! {
        div {
            class: "article-list",
            if records.is_empty() {
                p { class: "article-list-empty", "No articles yet" }
            }
            for record in records.iter() {
                ArticleListItem {
                    key: "{record.id}",
                    record: record.clone(),
                    is_selected: selected.as_ref() == Some(&record.id),
                    on_select
                }
            }
        }
    }
}

#[component]
fn ArticleListItem(
    record: ArticleRecord,
    is_selected: bool,
    on_select: EventHandler<ArticleId>,
) -> Element {
    let classes = match (is_selected, record.published) {
        (true, true) => "article-item selected",
        (true, false) => "article-item selected draft",
        (false, true) => "article-item",
        (false, false) => "article-item draft",
    };
    let date = record.display_date();
    let id = record.id.clone();

    rsx! {
        div {
            class: "{classes}",
            onclick: move |_| on_select.call(id.clone()),
            span { class: "article-item-title", "{record.title}" }
            span { class: "article-item-meta", "{record.template_kind} · {date}" }
        }
    }
}
