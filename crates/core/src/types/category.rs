//! Product categories and the category selector used when browsing.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Errors that can occur when parsing a [`Category`] from user input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown category: {0}. Valid categories: BAZAR, ELECTRO, PERFUME")]
pub struct ParseCategoryError(pub String);

/// Product category.
///
/// The shop sells from a fixed set of categories. Catalogs are imported
/// without validation though, so a label outside the set is kept verbatim in
/// [`Category::Unlisted`] rather than dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    Bazar,
    Electro,
    Perfume,
    /// A label read from storage or an import that is not one of the above.
    Unlisted(String),
}

impl Category {
    /// The categories offered in the editor, in display order.
    pub const ALL: [Self; 3] = [Self::Bazar, Self::Electro, Self::Perfume];

    /// The stored label (e.g., "BAZAR").
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Bazar => "BAZAR",
            Self::Electro => "ELECTRO",
            Self::Perfume => "PERFUME",
            Self::Unlisted(label) => label,
        }
    }

    /// Map a stored label back to a category. Exact match only.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "BAZAR" => Self::Bazar,
            "ELECTRO" => Self::Electro,
            "PERFUME" => Self::Perfume,
            other => Self::Unlisted(other.to_owned()),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parses user input case-insensitively. Only the known categories are
/// accepted here; unlisted labels only come from stored data.
impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|c| c.label() == upper)
            .ok_or_else(|| ParseCategoryError(s.to_owned()))
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(label) => Self::from_label(&label),
            Value::Null => Self::default(),
            other => Self::Unlisted(other.to_string()),
        })
    }
}

/// Category selector for browsing: everything, or a single category.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Whether a product in `category` passes this selector.
    #[must_use]
    pub fn matches(&self, category: &Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == category,
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        Self::Only(category)
    }
}

/// Accepts `all` or the shop's `TODOS` label for everything, otherwise a
/// category name.
impl FromStr for CategoryFilter {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") || trimmed.eq_ignore_ascii_case("todos") {
            return Ok(Self::All);
        }
        trimmed.parse().map(Self::Only)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("TODOS"),
            Self::Only(category) => category.fmt(f),
        }
    }
}
