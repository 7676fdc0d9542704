//! Keyword categories and their highlight colors

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::document::ColorTag;

/// Symptom vocabularies are split into numbered parts `1..=SYMPTOM_PARTS`
pub const SYMPTOM_PARTS: u8 = 9;

/// Suffixes marking a localized variant of a category
const LOCALIZED_SUFFIXES: [&str; 2] = ["_localized", "_jp"];

/// Keyword category
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Drug,
    Patient,
    AdverseEvent,
    /// Numbered symptom subset
    Symptom(u8),
    /// Category with no declared color
    Custom(String),
    /// Locale variant of another category
    Localized(Box<Category>),
}

impl Category {
    /// Wrap this category as its localized variant
    pub fn localized(self) -> Self {
        if self.is_localized() {
            return self;
        }
        Category::Localized(Box::new(self))
    }

    /// The category a localized variant derives from (itself otherwise)
    pub fn base_category(&self) -> &Category {
        match self {
            Category::Localized(base) => base.base_category(),
            other => other,
        }
    }

    pub fn is_localized(&self) -> bool {
        matches!(self, Category::Localized(_))
    }

    /// Color from the static table, if the category declares one
    pub fn declared_color(&self) -> Option<ColorTag> {
        match self.base_category() {
            Category::Drug => Some(ColorTag::GREEN),
            Category::Patient => Some(ColorTag::LIGHT_BLUE),
            Category::AdverseEvent => Some(ColorTag::RED),
            Category::Symptom(n) if (1..=SYMPTOM_PARTS).contains(n) => Some(ColorTag::YELLOW),
            _ => None,
        }
    }

    /// Highlight color, falling back to the default marker
    pub fn color(&self) -> ColorTag {
        self.declared_color().unwrap_or(ColorTag::MARKER)
    }

    /// Parse a category name such as `drug`, `symptom3` or `patient_jp`
    pub fn parse(name: &str) -> Self {
        let name = name.trim();
        for suffix in LOCALIZED_SUFFIXES {
            if let Some(base) = name.strip_suffix(suffix) {
                return Category::parse(base).localized();
            }
        }

        let lower = name.to_lowercase();
        match lower.as_str() {
            "drug" | "drugs" => Category::Drug,
            "patient" | "patients" => Category::Patient,
            "adverse-event" | "adverse_event" | "ae" => Category::AdverseEvent,
            _ => {
                let part = lower
                    .strip_prefix("symptom")
                    .map(|rest| rest.trim_start_matches(['-', '_']))
                    .and_then(|rest| rest.parse::<u8>().ok());
                match part {
                    Some(n) => Category::Symptom(n),
                    None => Category::Custom(name.to_string()),
                }
            }
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Drug => write!(f, "drug"),
            Category::Patient => write!(f, "patient"),
            Category::AdverseEvent => write!(f, "adverse-event"),
            Category::Symptom(n) => write!(f, "symptom{}", n),
            Category::Custom(name) => write!(f, "{}", name),
            Category::Localized(base) => write!(f, "{}_localized", base),
        }
    }
}
