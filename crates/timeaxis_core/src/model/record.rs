//! Record domain model.
//!
//! # Responsibility
//! - Define the canonical person/organization record and its events.
//! - Resolve open-ended ("ongoing") end years against a caller-supplied year.
//!
//! # Invariants
//! - `id` is stable for the record lifetime and unique within a store.
//! - `end == None` and `end == Some(0)` both mean "ongoing".
//! - `end < start` is structurally allowed; nothing here validates it.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

/// Stable identifier for a timeline record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type RecordId = u64;

/// Record category. Decides color and whether age queries apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Serialized as `people` to match the persisted schema.
    #[serde(rename = "people")]
    Person,
    #[serde(rename = "organization")]
    Organization,
}

impl Category {
    /// Returns the wire name of this category.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Person => "people",
            Self::Organization => "organization",
        }
    }
}

/// Point-in-time annotation owned by exactly one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub content: String,
    /// Year the event occurred. May fall outside the owner's range.
    pub start: i32,
}

impl Event {
    pub fn new(start: i32, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            start,
        }
    }
}

/// Person or organization entry rendered as one timeline row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: RecordId,
    pub category: Category,
    pub name: String,
    #[serde(default)]
    pub image_url: String,
    /// Birth or founding year.
    pub start: i32,
    /// `None` or `Some(0)` means ongoing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<i32>,
    /// Session selection flag. Absent on the wire means `false`.
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub events: Vec<Event>,
}

impl Record {
    /// Creates an unselected, ongoing record with no events.
    pub fn new(id: RecordId, category: Category, name: impl Into<String>, start: i32) -> Self {
        Self {
            id,
            category,
            name: name.into(),
            image_url: String::new(),
            start,
            end: None,
            selected: false,
            events: Vec::new(),
        }
    }

    /// Builder-style end year setter.
    pub fn with_end(mut self, end: i32) -> Self {
        self.end = Some(end);
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    pub fn with_event(mut self, start: i32, content: impl Into<String>) -> Self {
        self.events.push(Event::new(start, content));
        self
    }

    /// Returns whether the record has no end year yet.
    pub fn is_ongoing(&self) -> bool {
        matches!(self.end, None | Some(0))
    }

    /// Returns the end year, substituting `current_year` when ongoing.
    pub fn resolved_end(&self, current_year: i32) -> i32 {
        match self.end {
            None | Some(0) => current_year,
            Some(end) => end,
        }
    }

    /// Years between start and resolved end. Negative when `end < start`,
    /// saturating at the `i32` bounds.
    pub fn lifespan(&self, current_year: i32) -> i32 {
        self.resolved_end(current_year).saturating_sub(self.start)
    }

    pub fn is_person(&self) -> bool {
        self.category == Category::Person
    }
}

/// Reads the current calendar year from the local clock.
///
/// Ongoing records must be resolved at evaluation time, so callers fetch
/// this right before computing and pass it down explicitly.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

#[cfg(test)]
mod tests {
    use super::{Category, Record};

    #[test]
    fn zero_and_missing_end_both_resolve_to_current_year() {
        let missing = Record::new(1, Category::Person, "a", 1990);
        let zero = Record::new(2, Category::Person, "b", 1990).with_end(0);
        assert!(missing.is_ongoing());
        assert!(zero.is_ongoing());
        assert_eq!(missing.resolved_end(2026), 2026);
        assert_eq!(zero.resolved_end(2026), 2026);
    }

    #[test]
    fn lifespan_may_be_negative() {
        let record = Record::new(1, Category::Organization, "odd", 1900).with_end(1880);
        assert_eq!(record.lifespan(2026), -20);
    }

    #[test]
    fn lifespan_saturates_for_extreme_years() {
        let record = Record::new(1, Category::Person, "far", i32::MIN).with_end(i32::MAX);
        assert_eq!(record.lifespan(2026), i32::MAX);
    }

    #[test]
    fn wire_form_uses_people_and_camel_case() {
        let record = Record::new(7, Category::Person, "Ada", 1815)
            .with_end(1852)
            .with_image_url("ada.png")
            .with_event(1843, "Notes on the Analytical Engine");
        let json = serde_json::to_value(&record).expect("record should serialize");
        assert_eq!(json["category"], "people");
        assert_eq!(json["imageUrl"], "ada.png");
        assert_eq!(json["events"][0]["start"], 1843);
    }

    #[test]
    fn selected_defaults_to_false_and_end_is_optional() {
        let json = r#"{"id":3,"category":"organization","name":"Guild","imageUrl":"","start":1600,"events":[]}"#;
        let record: Record = serde_json::from_str(json).expect("record should parse");
        assert!(!record.selected);
        assert_eq!(record.end, None);
    }
}
