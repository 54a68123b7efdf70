use crate::ui::bespoke::registry;
use crate::ui::components::block_editor::UploadRequest;
use crate::ui::components::{BlockEditor, EventFieldsEditor};
use clubsite_content_engine::editing::{AuthoringSession, BlockCmd};
use clubsite_content_engine::models::{EventField, RouteKey, TemplateKind};
use clubsite_content_engine::rendering::LayoutRegistry;
use dioxus::prelude::*;

#[component]
pub fn EditorPanel(
    session: AuthoringSession,
    notice: Option<String>,
    on_command: Callback<BlockCmd>,
    on_event_field: Callback<(EventField, String)>,
    on_upload: Callback<UploadRequest>,
    on_save: Callback<()>,
) -> Element {
    let record = session.record();
    let content = session.content();
    let kind = record.template_kind;
    let status = if session.is_dirty() {
        "Unsaved changes"
    } else if session.needs_upgrade() {
        "Stored in an older format; saving will update it"
    } else {
        "Saved"
    };
    let blocks_title = match kind {
        TemplateKind::Report => "Sections",
        _ => "Blocks",
    };

    rsx! {
        div {
            class: "editor-panel",
            header {
                class: "editor-header",
                h2 { "{record.title}" }
                span { class: "editor-kind", "{kind}" }
                span { class: "editor-status", "{status}" }
                button {
                    class: "save-button",
                    disabled: !session.is_dirty() && !session.needs_upgrade(),
                    onclick: move |_| on_save.call(()),
                    "Save"
                }
            }
            if let Some(ref message) = notice {
                p { class: "editor-notice", role: "alert", "{message}" }
            }
            if let Some(event) = content.event() {
                EventFieldsEditor { event: event.clone(), on_change: on_event_field }
            }
            if let Some(blocks) = content.blocks() {
                BlockEditor {
                    article_id: record.id.clone(),
                    blocks: blocks.clone(),
                    policy: session.policy(),
                    title: blocks_title,
                    on_command,
                    on_upload
                }
            } else {
                BespokeNotice { route_key: record.custom_route_key.clone() }
            }
        }
    }
}

/// Custom articles are laid out by hand; only their record can be edited
#[component]
fn BespokeNotice(route_key: Option<String>) -> Element {
    let resolved = route_key
        .as_deref()
        .and_then(RouteKey::parse)
        .and_then(|key| registry().lookup(&key).map(|layout| layout.name));
    let message = match (route_key, resolved) {
        (Some(key), Some(name)) => {
            format!("This article uses the {name} layout ({key}). Its body is not edited here.")
        }
        (Some(key), None) => format!(
            "No layout is registered for '{key}'. The article is shown with the news layout."
        ),
        (None, _) => {
            "This custom article has no layout key. It is shown with the news layout.".to_string()
        }
    };

    rsx! {
        div {
            class: "bespoke-notice",
            p { "{message}" }
        }
    }
}
