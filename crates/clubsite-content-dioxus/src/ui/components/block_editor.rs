use clubsite_content_engine::editing::{BlockCmd, BlockSequence, Direction, RemovalPolicy};
use clubsite_content_engine::models::{ArticleId, BlockId, BlockKind};
use dioxus::html::Key;
use dioxus::prelude::*;

/// Image upload request from a block row: target block and local file path
pub type UploadRequest = (BlockId, String);

/// Editable rows for an article's blocks, plus the buttons to add more.
///
/// Every change goes out through `on_command`; the sequence shown is always
/// the one the parent passes back in.
#[component]
pub fn BlockEditor(
    article_id: ArticleId,
    blocks: BlockSequence,
    policy: RemovalPolicy,
    title: String,
    on_command: Callback<BlockCmd>,
    on_upload: Callback<UploadRequest>,
) -> Element {
    let last = blocks.len().saturating_sub(1);
    let can_remove = blocks.len() > policy.min_blocks();

    rsx! {
        section {
            class: "block-editor",
            h3 { "{title}" }
            if blocks.is_empty() {
                p { class: "block-editor-empty", "No blocks yet." }
            }
            for (index, block) in blocks.iter().enumerate() {
                BlockRow {
                    key: "{row_key(&article_id, &block.id)}",
                    id: block.id.clone(),
                    kind: block.kind,
                    value: block.value.clone(),
                    is_first: index == 0,
                    is_last: index == last,
                    can_remove,
                    on_command,
                    on_upload
                }
            }
            div {
                class: "block-editor-add",
                for kind in BlockKind::ALL {
                    button {
                        key: "{kind}",
                        class: "add-block-button",
                        onclick: move |_| on_command.call(BlockCmd::Append { kind }),
                        "+ {kind.label()}"
                    }
                }
            }
        }
    }
}

#[component]
fn BlockRow(
    id: BlockId,
    kind: BlockKind,
    value: String,
    is_first: bool,
    is_last: bool,
    can_remove: bool,
    on_command: Callback<BlockCmd>,
    on_upload: Callback<UploadRequest>,
) -> Element {
    let move_cmd = {
        let id = id.clone();
        move |direction: Direction| BlockCmd::Move {
            id: id.clone(),
            direction,
        }
    };

    let input = match kind {
        BlockKind::Image => rsx! {
            ImageInput { id: id.clone(), value: value.clone(), on_command, on_upload }
        },
        BlockKind::Text | BlockKind::Subheading => rsx! {
            TextInput {
                id: id.clone(),
                kind,
                value: value.clone(),
                on_command,
            }
        },
    };

    rsx! {
        div {
            class: "block-row block-row-{kind}",
            div {
                class: "block-row-controls",
                span { class: "block-kind", "{kind.label()}" }
                button {
                    class: "move-up",
                    disabled: is_first,
                    onclick: {
                        let move_cmd = move_cmd.clone();
                        move |_| on_command.call(move_cmd(Direction::Up))
                    },
                    "↑"
                }
                button {
                    class: "move-down",
                    disabled: is_last,
                    onclick: move |_| on_command.call(move_cmd(Direction::Down)),
                    "↓"
                }
                button {
                    class: "remove",
                    disabled: !can_remove,
                    onclick: {
                        let id = id.clone();
                        move |_| on_command.call(BlockCmd::Remove { id: id.clone() })
                    },
                    "Remove"
                }
            }
            {input}
        }
    }
}

/// Text and subheading values are edited locally and committed on blur,
/// so typing does not rebuild the article on every key press
#[component]
fn TextInput(
    id: BlockId,
    kind: BlockKind,
    value: String,
    on_command: Callback<BlockCmd>,
) -> Element {
    let local_value = use_signal(|| value.clone());

    let commit_changes = {
        let id = id.clone();
        move || {
            let current = local_value.read().clone();
            on_command.call(BlockCmd::SetValue {
                id: id.clone(),
                value: current,
            });
        }
    };

    let onkeydown = {
        let commit_changes = commit_changes.clone();
        let id = id.clone();
        move |event: Event<KeyboardData>| {
            // Alt+Up/Down moves the block without leaving the keyboard
            if !event.modifiers().alt() {
                return;
            }
            let direction = match event.key() {
                Key::ArrowUp => Direction::Up,
                Key::ArrowDown => Direction::Down,
                _ => return,
            };
            event.prevent_default();
            commit_changes();
            on_command.call(BlockCmd::Move {
                id: id.clone(),
                direction,
            });
        }
    };

    let oninput = {
        let mut local_value = local_value;
        move |event: Event<FormData>| local_value.set(event.value())
    };

    let onblur = move |_: Event<FocusData>| commit_changes();

    match kind {
        BlockKind::Subheading => rsx! {
            input {
                class: "block-input subheading-input",
                r#type: "text",
                placeholder: "Subheading",
                value: local_value.read().clone(),
                oninput,
                onblur,
                onkeydown,
            }
        },
        _ => rsx! {
            textarea {
                class: "block-input text-input",
                placeholder: "Write a paragraph",
                rows: calculate_textarea_rows(&local_value.read()),
                value: local_value.read().clone(),
                oninput,
                onblur,
                onkeydown,
            }
        },
    }
}

#[component]
fn ImageInput(
    id: BlockId,
    value: String,
    on_command: Callback<BlockCmd>,
    on_upload: Callback<UploadRequest>,
) -> Element {
    let mut upload_path = use_signal(String::new);
    let has_image = !value.trim().is_empty();

    rsx! {
        div {
            class: "image-input",
            if has_image {
                img { class: "image-thumbnail", src: "{value}", alt: "" }
            }
            input {
                class: "block-input image-url-input",
                r#type: "text",
                placeholder: "Image URL",
                value: "{value}",
                onchange: {
                    let id = id.clone();
                    move |event: Event<FormData>| {
                        on_command.call(BlockCmd::SetValue {
                            id: id.clone(),
                            value: event.value(),
                        });
                    }
                },
            }
            div {
                class: "image-upload",
                input {
                    class: "image-path-input",
                    r#type: "text",
                    placeholder: "Path to an image file",
                    value: upload_path.read().clone(),
                    oninput: move |event: Event<FormData>| upload_path.set(event.value()),
                }
                button {
                    class: "upload-button",
                    disabled: upload_path.read().trim().is_empty(),
                    onclick: {
                        let id = id.clone();
                        move |_| {
                            let path = upload_path.read().trim().to_string();
                            on_upload.call((id.clone(), path));
                            upload_path.set(String::new());
                        }
                    },
                    "Upload"
                }
            }
        }
    }
}

/// Block ids are only unique within one article, and rows keep local text
/// state, so a row must not be reused across articles
fn row_key(article_id: &ArticleId, block_id: &BlockId) -> String {
    format!("{article_id}/{block_id}")
}

fn calculate_textarea_rows(content: &str) -> u32 {
    let line_count = content.lines().count().max(1);
    (line_count as u32).clamp(2, 20)
}
