//! Vocabulary of the application under test, as the suite observes it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Items used by most scenarios, in creation order
pub const DEFAULT_TODOS: [&str; 3] = [
    "buy some cheese",
    "feed the cat",
    "book a doctors appointment",
];

/// Routing-driven view restriction over the item list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Filter {
    /// Every item
    #[default]
    All,
    /// Items not yet completed
    Active,
    /// Completed items
    Completed,
}

impl Filter {
    /// All filters in footer order
    pub const ALL: [Self; 3] = [Self::All, Self::Active, Self::Completed];

    /// Hash route the filter link points at
    #[must_use]
    pub const fn route(&self) -> &'static str {
        match self {
            Self::All => "#/",
            Self::Active => "#/active",
            Self::Completed => "#/completed",
        }
    }

    /// Link caption
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }

    /// Filter selected by a URL (anything unrecognised shows all)
    #[must_use]
    pub fn from_url(url: &str) -> Self {
        match url.split_once('#').map(|(_, fragment)| fragment) {
            Some("/active") => Self::Active,
            Some("/completed") => Self::Completed,
            _ => Self::All,
        }
    }

    /// Whether an item with this completion flag is listed
    #[must_use]
    pub const fn shows(&self, completed: bool) -> bool {
        match self {
            Self::All => true,
            Self::Active => !completed,
            Self::Completed => completed,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One record of the persisted item list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredTodo {
    /// Application-assigned identifier
    #[serde(default)]
    pub id: String,
    /// Display text
    pub title: String,
    /// Completion flag
    pub completed: bool,
}

impl StoredTodo {
    /// Create a record
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, completed: bool) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            completed,
        }
    }
}

/// Text the counter shows for `active` remaining items
#[must_use]
pub fn counter_text(active: usize) -> String {
    let noun = if active == 1 { "item" } else { "items" };
    format!("{active} {noun} left")
}

/// Title as the application stores it after submission
#[must_use]
pub fn normalize_title(text: &str) -> &str {
    text.trim()
}
