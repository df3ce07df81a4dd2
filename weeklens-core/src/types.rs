//! Core domain types for weeklens
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Slot** | One 30-minute window of a day, either empty or annotated |
//! | **Category** | Closed set of activity classes used for color coding |
//! | **Week** | Seven consecutive dates, each with a fixed number of slots |
//! | **Screen time** | Per-day device usage, total and unproductive hours |
//! | **Chat** | The question/answer exchange with the remote assistant |
//!
//! A slot's category is stored exactly as it appeared in the input file. Labels
//! outside the closed set are legal data and resolve to [`Category::Other`]
//! wherever a category is needed (colors, breakdowns).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================
// Category
// ============================================

/// Activity classification for a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Miscellaneous")]
    Miscellaneous,
    #[serde(rename = "Personal Development")]
    PersonalDevelopment,
    #[serde(rename = "Hobbies/Leisure")]
    HobbiesLeisure,
    #[serde(rename = "Food Preparation")]
    FoodPreparation,
    #[serde(rename = "Work/Internship")]
    WorkInternship,
    #[serde(rename = "Education/Lecture")]
    EducationLecture,
    #[serde(rename = "Travel")]
    Travel,
    #[serde(rename = "Socializing")]
    Socializing,
    /// Required fallback for anything unclassified
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    /// Every category, in legend order.
    pub const ALL: [Category; 9] = [
        Category::Miscellaneous,
        Category::PersonalDevelopment,
        Category::HobbiesLeisure,
        Category::FoodPreparation,
        Category::WorkInternship,
        Category::EducationLecture,
        Category::Travel,
        Category::Socializing,
        Category::Other,
    ];

    /// Label used in data files and the legend.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Miscellaneous => "Miscellaneous",
            Category::PersonalDevelopment => "Personal Development",
            Category::HobbiesLeisure => "Hobbies/Leisure",
            Category::FoodPreparation => "Food Preparation",
            Category::WorkInternship => "Work/Internship",
            Category::EducationLecture => "Education/Lecture",
            Category::Travel => "Travel",
            Category::Socializing => "Socializing",
            Category::Other => "Other",
        }
    }

    /// Resolve a label, falling back to [`Category::Other`] for unknown labels.
    pub fn resolve(label: &str) -> Category {
        label.parse().unwrap_or(Category::Other)
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown category: {}", s))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================
// Slots
// ============================================

/// An annotated half-hour slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRecord {
    /// Free-text activity label
    pub activity: String,
    /// Category label as recorded (may be outside the closed set)
    pub category: String,
    /// Mood score in 1..=10, `None` when missing or out of range
    pub mood: Option<u8>,
}

impl SlotRecord {
    /// Category this record is colored and counted as.
    pub fn category(&self) -> Category {
        Category::resolve(&self.category)
    }

    /// True if the recorded label is part of the closed category set.
    pub fn has_known_category(&self) -> bool {
        self.category.parse::<Category>().is_ok()
    }
}

/// A slot is either empty (nothing recorded) or a record.
pub type Slot = Option<SlotRecord>;

// ============================================
// Screen Time
// ============================================

/// One day of device usage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenTimeDay {
    /// Short day label shown under the bar
    pub day: String,
    /// Total hours of screen time
    pub total: f64,
    /// Hours spent on unproductive apps (never above `total`)
    pub unproductive: f64,
}

// ============================================
// Chat
// ============================================

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

/// One entry in the chat log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}
