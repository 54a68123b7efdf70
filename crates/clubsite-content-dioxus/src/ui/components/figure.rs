use dioxus::prelude::*;

/// Image with its caption region. The region is always present so every
/// figure has the same shape; it is empty until captions exist.
#[component]
pub fn Figure(src: Option<String>) -> Element {
    rsx! {
        figure {
            class: "figure",
            if let Some(src) = src {
                img { src: "{src}", alt: "" }
            } else {
                div { class: "figure-placeholder", "No image uploaded" }
            }
            figcaption { class: "figure-caption" }
        }
    }
}
