//! Error types for loading, building, and decoding bconf trees.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or decoding a bconf tree.
#[derive(Error, Debug)]
pub enum BconfError {
    /// A text line that is neither a comment, an include, nor `key=value`.
    /// `line` is the 1-based line number in the stream being read.
    #[error("malformed bconf line {line}: {text}")]
    MalformedLine { line: usize, text: String },

    /// An `include` directive with nothing after the keyword.
    #[error("include without path at line {line}: '{text}'")]
    MissingIncludePath { line: usize, text: String },

    /// A file (top-level or included) could not be opened.
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading from the underlying stream failed.
    #[error("read error: {0}")]
    Io(#[from] std::io::Error),

    /// Include nesting went deeper than the configured limit.
    #[error("include depth limit {limit} exceeded at {}", .path.display())]
    IncludeDepth { path: PathBuf, limit: usize },

    /// The input was not valid JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON document parsed, but its root is not an object.
    #[error("JSON root must be an object, found {0}")]
    JsonRoot(String),

    /// Transport-level HTTP failure.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The HTTP endpoint answered with something other than 200.
    #[cfg(feature = "http")]
    #[error("bconf HTTP response: {status}")]
    HttpStatus { status: reqwest::StatusCode },

    /// A path tried to descend through an existing leaf.
    #[error("cannot descend into leaf '{key}'")]
    NotANode { key: String },

    /// A value was added with an empty path.
    #[error("empty key path")]
    EmptyPath,

    /// A leaf could not be coerced into the target field type.
    #[error("cannot decode '{key}' from '{value}': {message}")]
    Decode {
        key: String,
        value: String,
        message: String,
    },
}

/// Convenience alias used throughout bconf.
pub type Result<T> = std::result::Result<T, BconfError>;
