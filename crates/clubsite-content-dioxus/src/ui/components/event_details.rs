use clubsite_content_engine::models::{EventField, EventMeta};
use dioxus::prelude::*;

/// Event facts above the body. Empty fields are left out; an event with no
/// facts at all still gets the (empty) section.
#[component]
pub fn EventDetails(event: EventMeta) -> Element {
    rsx! {
        section {
            class: "event-details",
            dl {
                for (field, value) in event.filled() {
                    div {
                        key: "{field.label()}",
                        class: "event-field",
                        dt { "{field.label()}" }
                        if field == EventField::RsvpLink && is_web_link(value) {
                            dd { a { href: "{value}", "{value}" } }
                        } else {
                            dd { "{value}" }
                        }
                    }
                }
            }
        }
    }
}

/// Only http(s) links become clickable; anything else is shown as text
fn is_web_link(value: &str) -> bool {
    let lower = value.trim().to_ascii_lowercase();
    lower.starts_with("https://") || lower.starts_with("http://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use dioxus::dioxus_core::VirtualDom;
    use dioxus_ssr::render;

    fn render_event(event: EventMeta) -> String {
        let mut dom = VirtualDom::new_with_props(EventDetails, EventDetailsProps { event });
        dom.rebuild_in_place();
        render(&dom)
    }

    #[test]
    fn test_only_filled_fields_render() {
        let event = EventMeta {
            venue: "Tokyo Hall".to_string(),
            fee: "Free".to_string(),
            ..Default::default()
        };
        let html = render_event(event);

        assert!(html.contains("Tokyo Hall"));
        assert!(html.contains("Free"));
        assert!(!html.contains("RSVP link"));
        assert!(!html.contains("Description"));
    }

    #[test]
    fn test_rsvp_link_is_clickable_for_web_urls() {
        let html = render_event(EventMeta {
            rsvp_link: "https://club.example.org/rsvp".to_string(),
            ..Default::default()
        });

        assert!(html.contains("href=\"https://club.example.org/rsvp\""));
    }

    #[test]
    fn test_rsvp_link_with_other_scheme_is_plain_text() {
        let html = render_event(EventMeta {
            rsvp_link: "javascript:alert(1)".to_string(),
            ..Default::default()
        });

        assert!(html.contains("javascript:alert(1)"));
        assert!(!html.contains("href"));
    }

    #[test]
    fn test_is_web_link() {
        assert!(is_web_link("http://a.example"));
        assert!(is_web_link(" HTTPS://a.example"));
        assert!(!is_web_link("JavaScript:alert(1)"));
        assert!(!is_web_link("mailto:club@example.org"));
    }
}
