//! Hand-built layouts for custom articles, keyed by route key.
//!
//! Each layout gets the whole article record and nothing else; custom
//! articles have no authored body.

use clubsite_content_engine::models::{ArticleRecord, RouteKey};
use clubsite_content_engine::rendering::StaticRegistry;
use dioxus::prelude::*;
use std::sync::LazyLock;

#[derive(Clone, Copy)]
pub struct BespokeLayout {
    pub name: &'static str,
    pub render: fn(ArticleRecord) -> Element,
}

impl std::fmt::Debug for BespokeLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BespokeLayout")
            .field("name", &self.name)
            .finish()
    }
}

const LAYOUTS: [(&str, BespokeLayout); 3] = [
    (
        "press-release",
        BespokeLayout {
            name: "Press release",
            render: render_press_release,
        },
    ),
    (
        "invitation-ticket",
        BespokeLayout {
            name: "Invitation ticket",
            render: render_invitation_ticket,
        },
    ),
    (
        "results-table",
        BespokeLayout {
            name: "Results table",
            render: render_results_table,
        },
    ),
];

static REGISTRY: LazyLock<StaticRegistry<BespokeLayout>> = LazyLock::new(|| {
    LAYOUTS
        .into_iter()
        .filter_map(|(key, layout)| RouteKey::parse(key).map(|key| (key, layout)))
        .collect()
});

/// Layouts known to this build of the site
pub fn registry() -> &'static StaticRegistry<BespokeLayout> {
    &REGISTRY
}

fn render_press_release(record: ArticleRecord) -> Element {
    rsx! { PressRelease { record } }
}

fn render_invitation_ticket(record: ArticleRecord) -> Element {
    rsx! { InvitationTicket { record } }
}

fn render_results_table(record: ArticleRecord) -> Element {
    rsx! { ResultsTable { record } }
}

#[component]
pub fn PressRelease(record: ArticleRecord) -> Element {
    let date = record.display_date();
    rsx! {
        article {
            class: "bespoke press-release",
            p { class: "press-release-dateline", "FOR IMMEDIATE RELEASE · {date}" }
            h1 { "{record.title}" }
            if let Some(cover) = record.cover_image_url.as_ref() {
                img { class: "press-release-cover", src: "{cover}", alt: "" }
            }
            footer {
                class: "press-release-contact",
                "Issued by {record.club.name}"
            }
        }
    }
}

#[component]
pub fn InvitationTicket(record: ArticleRecord) -> Element {
    let date = record.display_date();
    rsx! {
        article {
            class: "bespoke invitation-ticket",
            div {
                class: "ticket-stub",
                span { class: "ticket-admit", "ADMIT ONE" }
                span { class: "ticket-number", "#{record.id}" }
            }
            div {
                class: "ticket-body",
                p { class: "ticket-host", "{record.club.name} invites you to" }
                h1 { "{record.title}" }
                p { class: "ticket-date", "{date}" }
            }
        }
    }
}

#[component]
pub fn ResultsTable(record: ArticleRecord) -> Element {
    let date = record.display_date();
    rsx! {
        article {
            class: "bespoke results-table",
            h1 { "{record.title}" }
            table {
                tbody {
                    tr { th { "Club" } td { "{record.club.name}" } }
                    tr { th { "Date" } td { "{date}" } }
                    tr { th { "Reference" } td { "{record.id}" } }
                }
            }
        }
    }
}
