use crate::ui::components::block_editor::UploadRequest;
use crate::ui::components::new_article_form::NewArticleDraft;
use crate::ui::components::{ArticleList, ArticlePage, EditorPanel, NewArticleForm};
use clubsite_content_config::Config;
use clubsite_content_engine::editing::{AuthoringSession, BlockCmd, Outcome, Unchanged};
use clubsite_content_engine::io::{ArticleStore, FsArticleStore, FsMediaStore};
use clubsite_content_engine::models::{
    ArticleContent, ArticleId, ArticleRecord, BlockId, EventField,
};
use dioxus::prelude::*;
use std::path::Path;

const CLUBSITE_CSS: &str = include_str!("../assets/clubsite.css");

fn load_records(store: &FsArticleStore) -> Result<Vec<ArticleRecord>, String> {
    store.list().map_err(|e| {
        log::error!("Listing articles failed: {e}");
        e.to_string()
    })
}

#[component]
pub fn App(config: Config) -> Element {
    let store = FsArticleStore::new(&config.articles_path);
    let uploader = FsMediaStore::new(&config.media_path, config.media_url_prefix.clone());

    let initial = use_hook({
        let store = store.clone();
        move || load_records(&store)
    });
    let mut records = use_signal(|| initial.clone().unwrap_or_default());
    let mut notice = use_signal(|| initial.clone().err());
    let mut session = use_signal(|| None::<AuthoringSession>);

    let mut refresh_records = {
        let store = store.clone();
        move || match load_records(&store) {
            Ok(list) => records.set(list),
            Err(e) => notice.set(Some(e)),
        }
    };

    let mut open_article = {
        let store = store.clone();
        move |id: ArticleId| {
            if session.read().as_ref().is_some_and(AuthoringSession::is_dirty) {
                log::warn!("Discarding unsaved edits to switch to article {id}");
            }
            match AuthoringSession::open(&store, &id) {
                Ok(opened) => {
                    session.set(Some(opened));
                    notice.set(None);
                }
                Err(e) => {
                    log::error!("Opening article {id} failed: {e}");
                    notice.set(Some(e.to_string()));
                }
            }
        }
    };

    let on_command = move |cmd: BlockCmd| {
        let mut guard = session.write();
        let Some(current) = guard.as_mut() else {
            return;
        };
        match current.apply(cmd) {
            Outcome::Unchanged(reason @ (Unchanged::LastBlockKept | Unchanged::NoBlocks)) => {
                notice.set(Some(reason.describe().to_string()));
            }
            _ => notice.set(None),
        }
    };

    let on_event_field = move |(field, value): (EventField, String)| {
        if let Some(current) = session.write().as_mut() {
            current.set_event_field(field, value);
        }
    };

    let on_upload = move |(target, path): UploadRequest| {
        let mut guard = session.write();
        let Some(current) = guard.as_mut() else {
            return;
        };
        let result = upload_from_path(current, &uploader, &target, &path);
        notice.set(result.err());
    };

    let on_save = {
        let store = store.clone();
        let mut refresh_records = refresh_records.clone();
        move |_: ()| {
            let saved = session.write().as_mut().map(|current| current.save(&store));
            match saved {
                Some(Ok(())) => {
                    notice.set(None);
                    refresh_records();
                }
                Some(Err(e)) => notice.set(Some(e.to_string())),
                None => {}
            }
        }
    };

    let on_create = {
        let store = store.clone();
        let mut open_article = open_article.clone();
        move |draft: NewArticleDraft| {
            let record = match draft.into_record() {
                Ok(record) => record,
                Err(e) => {
                    notice.set(Some(e));
                    return;
                }
            };
            let content = ArticleContent::new(record.template_kind, record.route_key());
            match store.create(&record, &content) {
                Ok(()) => {
                    refresh_records();
                    open_article(record.id);
                }
                Err(e) => notice.set(Some(e.to_string())),
            }
        }
    };

    let selected = session.read().as_ref().map(|s| s.record().id.clone());
    let current = session.read().clone();
    let current_notice = notice.read().clone();

    rsx! {
        style { {CLUBSITE_CSS} }
        div {
            class: "app-container",
            div {
                class: "sidebar",
                h2 { "Articles" }
                ArticleList {
                    records: records.read().clone(),
                    selected,
                    on_select: move |id: ArticleId| open_article(id),
                }
                NewArticleForm { on_create }
            }
            div {
                class: "main-content",
                if let Some(current) = current {
                    EditorPanel {
                        session: current.clone(),
                        notice: current_notice.clone(),
                        on_command,
                        on_event_field,
                        on_upload,
                        on_save,
                    }
                    div {
                        class: "preview",
                        h3 { class: "preview-title", "Preview" }
                        ArticlePage {
                            record: current.record().clone(),
                            content: current.content().clone(),
                        }
                    }
                } else {
                    div {
                        class: "welcome",
                        h1 { "clubsite-content" }
                        p { "Select an article from the sidebar, or create a new one" }
                        if let Some(message) = current_notice {
                            p { class: "editor-notice", role: "alert", "{message}" }
                        }
                    }
                }
            }
        }
    }
}

/// Read a local image file and hand it to the session's image block
fn upload_from_path(
    session: &mut AuthoringSession,
    uploader: &FsMediaStore,
    target: &BlockId,
    path: &str,
) -> Result<(), String> {
    let bytes = std::fs::read(path).map_err(|e| format!("Cannot read {path}: {e}"))?;
    let file_name = Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    session
        .upload_image(uploader, target, &bytes, &file_name)
        .map(|outcome| log::info!("Uploaded {path}: {outcome:?}"))
        .map_err(|e| {
            log::error!("Upload of {path} failed: {e}");
            e.to_string()
        })
}
