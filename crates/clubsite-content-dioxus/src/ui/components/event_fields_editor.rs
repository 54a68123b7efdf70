use clubsite_content_engine::models::{EventField, EventMeta};
use dioxus::prelude::*;

#[component]
pub fn EventFieldsEditor(event: EventMeta, on_change: Callback<(EventField, String)>) -> Element {
    rsx! {
        fieldset {
            class: "event-fields-editor",
            legend { "Event details" }
            for field in EventField::ALL {
                label {
                    key: "{field.label()}",
                    class: "event-field-input",
                    span { "{field.label()}" }
                    if field == EventField::Description {
                        textarea {
                            rows: 3,
                            value: event.get(field),
                            onchange: move |e: Event<FormData>| on_change.call((field, e.value())),
                        }
                    } else {
                        input {
                            r#type: "text",
                            value: event.get(field),
                            onchange: move |e: Event<FormData>| on_change.call((field, e.value())),
                        }
                    }
                }
            }
        }
    }
}
