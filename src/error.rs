// src/error.rs
//
// Error taxonomy. Only `FetchError` on the directory page itself is allowed
// to end a run; everything else degrades to fewer records or fewer fields.

use std::path::PathBuf;
use thiserror::Error;

/// Network or HTTP failure after the retry budget is spent.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("GET {url} returned HTTP {status} (after {attempts} attempt(s))")]
    Status { url: String, status: u16, attempts: u32 },

    #[error("GET {url} failed after {attempts} attempt(s): {message}")]
    Transport { url: String, message: String, attempts: u32 },

    #[error("could not build HTTP client: {0}")]
    Client(String),
}

impl FetchError {
    /// Same failure, restamped with the number of attempts made.
    pub fn with_attempts(self, n: u32) -> Self {
        match self {
            Self::Status { url, status, .. } => Self::Status { url, status, attempts: n },
            Self::Transport { url, message, .. } => Self::Transport { url, message, attempts: n },
            other => other,
        }
    }
}

/// A strategy could not find its expected structure on the page.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StructureError {
    #[error("{strategy}: no <script id=\"{id}\"> element")]
    MissingScript { strategy: &'static str, id: &'static str },

    #[error("{strategy}: embedded payload is not valid JSON: {message}")]
    Payload { strategy: &'static str, message: String },

    #[error("{strategy}: key path `{path}` does not lead to an array")]
    KeyPath { strategy: &'static str, path: String },

    #[error("{strategy}: no matching elements")]
    NoMatches { strategy: &'static str },
}

/// A single field could not be decoded. Never escapes the normalizer.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FieldParseError {
    #[error("field `{field}` holds malformed JSON: {message}")]
    BadJson { field: &'static str, message: String },

    #[error("field `{field}` has an unexpected shape")]
    WrongShape { field: &'static str },
}

/// Record dropped for lack of a usable name.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("record from {source_kind} discarded: no name")]
pub struct DiscardedRecord {
    pub source_kind: &'static str,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error("parsing {path}: {source}")]
    Toml { path: PathBuf, source: toml::de::Error },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error("export CSV: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("export JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("path exists but is not a directory: {0}")]
    NotADirectory(PathBuf),
}
