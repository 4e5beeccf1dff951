//! Spending and income categories.

use std::{convert::Infallible, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Categorises ledger activity for filtering and reporting.
///
/// Labels read from storage that do not match a known category are kept as
/// [`Category::Unrecognized`] so they survive a save round-trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Food,
    Travel,
    Rent,
    Shopping,
    Salary,
    #[default]
    Other,
    Unrecognized(String),
}

impl Category {
    /// Categories offered to users, in menu order.
    pub const KNOWN: [Category; 6] = [
        Category::Food,
        Category::Travel,
        Category::Rent,
        Category::Shopping,
        Category::Salary,
        Category::Other,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Category::Food => "food",
            Category::Travel => "travel",
            Category::Rent => "rent",
            Category::Shopping => "shopping",
            Category::Salary => "salary",
            Category::Other => "other",
            Category::Unrecognized(label) => label,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Category::Unrecognized(_))
    }
}

impl FromStr for Category {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(Category::KNOWN
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(trimmed))
            .unwrap_or_else(|| Category::Unrecognized(trimmed.to_string())))
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(category) => category,
            Err(never) => match never {},
        }
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        match value {
            Category::Unrecognized(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_labels_case_insensitively() {
        assert_eq!("Food".parse::<Category>().unwrap(), Category::Food);
        assert_eq!(" rent ".parse::<Category>().unwrap(), Category::Rent);
    }

    #[test]
    fn unknown_labels_are_preserved() {
        let category: Category = serde_json::from_str("\"gifts\"").unwrap();
        assert_eq!(category, Category::Unrecognized("gifts".into()));
        assert!(!category.is_known());
        assert_eq!(serde_json::to_string(&category).unwrap(), "\"gifts\"");
    }

    #[test]
    fn known_labels_serialize_lowercase() {
        assert_eq!(
            serde_json::to_string(&Category::Shopping).unwrap(),
            "\"shopping\""
        );
    }
}
