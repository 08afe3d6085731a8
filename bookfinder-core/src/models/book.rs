use serde::{Deserialize, Serialize};

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";
pub const MAX_SUBJECTS: usize = 5;

/// A normalized catalog record. Identity is `id` alone.
///
/// The camelCase serde form is also the persisted favorites format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    #[serde(default)]
    pub publish_year: Option<i64>,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub cover_url_large: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub pages: Option<i64>,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default)]
    pub language: Option<String>,
}

impl Book {
    /// One-line label used by list views: `Title (Year) by A, B`.
    pub fn display_line(&self) -> String {
        match self.publish_year {
            Some(year) => format!("{} ({}) by {}", self.title, year, self.authors.join(", ")),
            None => format!("{} by {}", self.title, self.authors.join(", ")),
        }
    }
}
