use std::collections::VecDeque;
use thiserror::Error;

/// Errors raised by the catalog API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (DNS, connect, timeout, body read)
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Server returned {status} for {url}")]
    Status { status: u16, url: String },

    /// Body was not the JSON shape we expect
    #[error("Failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Payload carried `"success": false`
    #[error("Server reported failure for {0}")]
    Unsuccessful(String),

    #[error("Search query is empty")]
    EmptyQuery,

    #[error("Offline mode: no live data available")]
    Offline,

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Whether another attempt may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Request(e) => !e.is_builder() && !e.is_decode(),
            ApiError::Status { status, .. } => {
                *status == 408 || *status == 429 || *status >= 500
            }
            _ => false,
        }
    }

    /// Short text for the error popup.
    pub fn user_message(&self, what: &str) -> String {
        match self {
            ApiError::Status { status: 404, .. } => format!("Failed to load {}: not found", what),
            ApiError::EmptyQuery => "Type something to search for".to_string(),
            ApiError::Offline => format!("Failed to load {}: offline mode", what),
            ApiError::Request(e) if e.is_timeout() => {
                format!("Failed to load {}: the server took too long to answer", what)
            }
            _ => format!("Failed to load {}", what),
        }
    }
}

/// Loading stages shown in the overlay.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadingStage {
    Home,
    Details { name: String },
    Search { query: String, page: u32 },
}

impl LoadingStage {
    pub fn display_name(&self) -> String {
        match self {
            LoadingStage::Home => "Loading catalog".to_string(),
            LoadingStage::Details { name } if name.is_empty() => "Loading details".to_string(),
            LoadingStage::Details { name } => format!("Loading {}", name),
            LoadingStage::Search { query, page } if *page > 1 => {
                format!("Searching \"{}\" (page {})", query, page)
            }
            LoadingStage::Search { query, .. } => format!("Searching \"{}\"", query),
        }
    }
}

const HISTORY_CAPACITY: usize = 20;

/// Recent search queries for the current run.
#[derive(Debug, Clone, Default)]
pub struct SearchHistory {
    pub entries: VecDeque<String>,
}

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }
        self.entries.retain(|q| q != query);
        if self.entries.len() >= HISTORY_CAPACITY {
            self.entries.pop_back();
        }
        self.entries.push_front(query.to_string());
    }

    pub fn suggestions(&self, partial: &str) -> Vec<String> {
        let partial = partial.to_lowercase();
        self.entries
            .iter()
            .filter(|h| h.to_lowercase().contains(&partial))
            .take(5)
            .cloned()
            .collect()
    }
}
