use std::fmt;

/// One job listing as shown on a results page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VacancyRecord {
    pub title: String,
    pub url: String,
    /// Empty when the listing shows no salary.
    pub salary: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractionResult {
    pub total_count: u64,
    pub max_page: u32,
    pub vacancies: Vec<VacancyRecord>,
}

/// A rendered page of results, ready to attach to a chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// What the transport receives for one search: a document or a short message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestResult {
    Success(Document),
    Failure(String),
}

impl RequestResult {
    pub fn is_success(&self) -> bool {
        matches!(self, RequestResult::Success(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    pub final_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
