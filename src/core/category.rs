use std::fmt;

use serde::{Deserialize, Serialize};

/// Color offered when creating a category.
pub const CATEGORY_COLORS: [&str; 8] = [
    "#4CAF50", "#FF9800", "#00BCD4", "#E91E63", "#9C27B0", "#FFD700", "#000000", "#8B4513",
];

/// Colors offered as a per-task override.
pub const TASK_COLORS: [&str; 9] = [
    "#3A8DFF", "#000000", "#e67e22", "#e74c3c", "#9b59b6", "#3498db", "#1abc9c", "#95a5a6",
    "#f39c12",
];

pub const FALLBACK_COLOR: &str = "#3A8DFF";

/// Symbolic icon names understood by the presentation layer.
///
/// Unknown names read from disk decode as [`Icon::Pricetag`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Icon {
    #[default]
    Pricetag,
    Book,
    Briefcase,
    Home,
    School,
    Star,
    Save,
    Heart,
    Person,
    Calendar,
    Cart,
    MusicalNotes,
    Car,
    Cash,
}

impl Icon {
    pub const ALL: [Icon; 14] = [
        Self::Pricetag,
        Self::Book,
        Self::Briefcase,
        Self::Home,
        Self::School,
        Self::Star,
        Self::Save,
        Self::Heart,
        Self::Person,
        Self::Calendar,
        Self::Cart,
        Self::MusicalNotes,
        Self::Car,
        Self::Cash,
    ];

    pub fn as_name(&self) -> &'static str {
        match self {
            Self::Pricetag => "pricetag",
            Self::Book => "book",
            Self::Briefcase => "briefcase",
            Self::Home => "home",
            Self::School => "school",
            Self::Star => "star",
            Self::Save => "save",
            Self::Heart => "heart",
            Self::Person => "person",
            Self::Calendar => "calendar",
            Self::Cart => "cart",
            Self::MusicalNotes => "musical-notes",
            Self::Car => "car",
            Self::Cash => "cash",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|icon| icon.as_name() == s)
    }
}

impl From<String> for Icon {
    fn from(s: String) -> Self {
        Self::from_name(&s).unwrap_or_default()
    }
}

impl From<Icon> for String {
    fn from(icon: Icon) -> Self {
        icon.as_name().to_string()
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_name())
    }
}

/// A user-defined label. `name` is the key; duplicates are allowed and the
/// first one wins on lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub icon: Icon,
}

impl Category {
    pub fn new(name: impl Into<String>, icon: Icon, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            icon,
        }
    }

    pub fn style(&self) -> CategoryStyle {
        CategoryStyle {
            icon: self.icon,
            color: self.color.clone(),
        }
    }
}

/// How a task's category is drawn: the live category's icon/color, or a
/// fallback when the category no longer exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryStyle {
    pub icon: Icon,
    pub color: String,
}

impl Default for CategoryStyle {
    fn default() -> Self {
        Self {
            icon: Icon::Pricetag,
            color: FALLBACK_COLOR.to_string(),
        }
    }
}

/// Categories written on first run.
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new("Health", Icon::Heart, "#e74c3c"),
        Category::new("Work", Icon::Briefcase, "#3498db"),
        Category::new("Home", Icon::Home, "#2ecc71"),
        Category::new("Finance", Icon::Cash, "#f1c40f"),
    ]
}
