use crate::error::ErrorKind;
use crate::models::responses::SearchResultEnvelope;
use std::fmt;
use std::str::FromStr;

/// Attribute a query is matched against upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchField {
    #[default]
    Title,
    Author,
    Subject,
}

impl SearchField {
    pub fn as_param(&self) -> &'static str {
        match self {
            SearchField::Title => "title",
            SearchField::Author => "author",
            SearchField::Subject => "subject",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

impl FromStr for SearchField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "title" => Ok(SearchField::Title),
            "author" => Ok(SearchField::Author),
            "subject" => Ok(SearchField::Subject),
            other => Err(format!("unknown search field '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchSessionState {
    #[default]
    Idle,
    Loading,
    Success(SearchResultEnvelope),
    Empty,
    Failed { kind: ErrorKind, message: String },
}

impl SearchSessionState {
    /// Notice shown to the user when a search settles in this state.
    pub fn notice(&self) -> Option<Notice> {
        match self {
            SearchSessionState::Idle | SearchSessionState::Loading => None,
            SearchSessionState::Success(envelope) => Some(Notice::success(
                "Search completed",
                format!("Found {} books", envelope.total_matched),
            )),
            SearchSessionState::Empty => Some(Notice::info(
                "No books found",
                "Try adjusting your search terms or criteria.",
            )),
            SearchSessionState::Failed { .. } => Some(Notice::error(
                "Search failed",
                "Please check your internet connection and try again.",
            )),
        }
    }
}

/// Watched value: the live state tagged with the submission it belongs to.
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    pub generation: u64,
    pub state: SearchSessionState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, title, description)
    }

    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, title, description)
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, title, description)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.level {
            NoticeLevel::Info => "info",
            NoticeLevel::Success => "ok",
            NoticeLevel::Error => "error",
        };
        write!(f, "[{}] {}: {}", tag, self.title, self.description)
    }
}
