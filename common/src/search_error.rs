//! Error types for query parsing and the search request lifecycle.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedKeyReason {
    /// `key.`, `.key` or `a..b`
    EmptySegment,
    /// `[]=v` or `.[0]=v`
    EmptyName,
    /// `key[x]=v`, or `key[]=v` after the largest possible index
    InvalidIndex(String),
    /// `a[0].b=v` or `a]b=v`
    BracketInName,
}

/// A query pair whose key cannot be assigned. The pair is skipped, decoding continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedKeyError {
    pub key: String,
    pub reason: MalformedKeyReason,
}

impl MalformedKeyError {
    pub fn new(key: impl Into<String>, reason: MalformedKeyReason) -> Self {
        Self { key: key.into(), reason }
    }
}

impl std::fmt::Display for MalformedKeyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.reason {
            MalformedKeyReason::EmptySegment => write!(f, "empty property in key \"{}\"", self.key),
            MalformedKeyReason::EmptyName => write!(f, "missing name in key \"{}\"", self.key),
            MalformedKeyReason::InvalidIndex(index) => {
                write!(f, "invalid array index \"{}\" in key \"{}\"", index, self.key)
            }
            MalformedKeyReason::BracketInName => write!(f, "bracket inside property name in key \"{}\"", self.key),
        }
    }
}

impl std::error::Error for MalformedKeyError {}

/// Inserting a fragment or re-initializing its widgets failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderError {
    pub message: String,
}

impl RenderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to render search results: {}", self.message)
    }
}

impl std::error::Error for RenderError {}

/// Why a search request did not produce rendered results.
/// Transport and server failures look the same to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Network failure, timeout or abort.
    Transport(String),
    /// The endpoint answered with a non-success status.
    Server { status: u16, message: String },
    Render(RenderError),
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(message) => write!(f, "Search request failed: {}", message),
            Self::Server { status, message } => write!(f, "Search endpoint returned {}: {}", status, message),
            Self::Render(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RenderError> for SearchError {
    fn from(err: RenderError) -> Self {
        SearchError::Render(err)
    }
}
