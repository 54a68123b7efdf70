use chrono::NaiveDate;
use clubsite_content_engine::models::{
    ArticleId, ArticleRecord, ClubRef, RouteKey, TemplateKind,
};
use dioxus::prelude::*;

/// What the author typed into the new-article form
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewArticleDraft {
    pub title: String,
    pub date: String,
    pub club_name: String,
    pub template_kind: String,
    pub route_key: String,
}

impl NewArticleDraft {
    /// Validate the draft into a record for a new, unpublished article
    pub fn into_record(self) -> Result<ArticleRecord, String> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err("Title is required".to_string());
        }
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| format!("Date '{}' is not in YYYY-MM-DD form", self.date.trim()))?;
        let club_name = self.club_name.trim().to_string();
        if club_name.is_empty() {
            return Err("Club is required".to_string());
        }
        let template_kind = TemplateKind::parse(&self.template_kind)
            .ok_or_else(|| format!("Unknown template '{}'", self.template_kind))?;

        let custom_route_key = match template_kind {
            TemplateKind::Custom => {
                let key = RouteKey::parse(&self.route_key)
                    .ok_or_else(|| "Custom articles need a layout key".to_string())?;
                Some(key.as_str().to_string())
            }
            _ => None,
        };

        Ok(ArticleRecord {
            id: ArticleId::parse(&slug(&title)).unwrap_or_else(ArticleId::fresh),
            title,
            date,
            club: ClubRef {
                id: slug(&club_name),
                name: club_name,
            },
            cover_image_url: None,
            template_kind,
            custom_route_key,
            published: false,
        })
    }
}

/// Lower-case ASCII words joined by dashes
fn slug(text: &str) -> String {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[component]
pub fn NewArticleForm(on_create: EventHandler<NewArticleDraft>) -> Element {
    let mut draft = use_signal(|| NewArticleDraft {
        date: chrono::Local::now().date_naive().format("%Y-%m-%d").to_string(),
        template_kind: TemplateKind::News.as_str().to_string(),
        ..Default::default()
    });
    let is_custom = draft.read().template_kind == TemplateKind::Custom.as_str();

    rsx! {
        form {
            class: "new-article-form",
            onsubmit: move |event: Event<FormData>| {
                event.prevent_default();
                on_create.call(draft.read().clone());
            },
            h3 { "New article" }
            input {
                r#type: "text",
                placeholder: "Title",
                value: draft.read().title.clone(),
                oninput: move |e: Event<FormData>| draft.write().title = e.value(),
            }
            input {
                r#type: "text",
                placeholder: "YYYY-MM-DD",
                value: draft.read().date.clone(),
                oninput: move |e: Event<FormData>| draft.write().date = e.value(),
            }
            input {
                r#type: "text",
                placeholder: "Club",
                value: draft.read().club_name.clone(),
                oninput: move |e: Event<FormData>| draft.write().club_name = e.value(),
            }
            select {
                value: draft.read().template_kind.clone(),
                onchange: move |e: Event<FormData>| draft.write().template_kind = e.value(),
                for kind in TemplateKind::ALL {
                    option { key: "{kind}", value: kind.as_str(), "{kind}" }
                }
            }
            if is_custom {
                input {
                    r#type: "text",
                    placeholder: "Layout key, e.g. press-release",
                    value: draft.read().route_key.clone(),
                    oninput: move |e: Event<FormData>| draft.write().route_key = e.value(),
                }
            }
            button { r#type: "submit", "Create" }
        }
    }
}
