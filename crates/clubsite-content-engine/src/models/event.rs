use serde::{Deserialize, Serialize};

/// Structured facts attached to event-shaped articles.
///
/// All fields are free text with no cross-field validation. Canonical values
/// use the empty string for "not provided".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventMeta {
    pub venue: String,
    pub fee: String,
    pub rsvp_link: String,
    pub description: String,
}

/// Addresses a single field of [`EventMeta`] for direct edits
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventField {
    Venue,
    Fee,
    RsvpLink,
    Description,
}

impl EventField {
    pub const ALL: [EventField; 4] = [
        EventField::Venue,
        EventField::Fee,
        EventField::RsvpLink,
        EventField::Description,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EventField::Venue => "Venue",
            EventField::Fee => "Fee",
            EventField::RsvpLink => "RSVP link",
            EventField::Description => "Description",
        }
    }
}

impl EventMeta {
    pub fn get(&self, field: EventField) -> &str {
        match field {
            EventField::Venue => &self.venue,
            EventField::Fee => &self.fee,
            EventField::RsvpLink => &self.rsvp_link,
            EventField::Description => &self.description,
        }
    }

    pub fn set(&mut self, field: EventField, value: impl Into<String>) {
        let slot = match field {
            EventField::Venue => &mut self.venue,
            EventField::Fee => &mut self.fee,
            EventField::RsvpLink => &mut self.rsvp_link,
            EventField::Description => &mut self.description,
        };
        *slot = value.into();
    }

    /// Fields that carry a value, in display order
    pub fn filled(&self) -> impl Iterator<Item = (EventField, &str)> {
        EventField::ALL
            .into_iter()
            .map(|field| (field, self.get(field)))
            .filter(|(_, value)| !value.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.filled().next().is_none()
    }
}
