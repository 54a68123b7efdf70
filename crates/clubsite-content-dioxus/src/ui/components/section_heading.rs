use dioxus::prelude::*;

/// Section headings sit below the article title, so they start at `h2`
#[component]
pub fn SectionHeading(text: String) -> Element {
    rsx! {
        h2 { class: "section-heading", "{text}" }
    }
}
