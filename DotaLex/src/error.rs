//! Error types for `DotaLex`

use thiserror::Error;

/// The error type for `DotaLex` operations.
///
/// Missing attributes, unresolved template tokens and malformed markup are
/// not errors: the tooltip engine degrades those gracefully and reports them
/// through `tracing`. This type only covers documents that cannot be read at
/// all.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== VDF Format Errors ====================
    /// A quoted string was still open at end of input.
    #[error("unterminated string starting on line {line}")]
    VdfUnterminatedString {
        /// 1-based line where the string starts.
        line: usize,
    },

    /// A `}` appeared with no open block.
    #[error("unexpected '}}' on line {line}")]
    VdfUnexpectedClose {
        /// 1-based line of the stray brace.
        line: usize,
    },

    /// A `{` appeared where a key was expected.
    #[error("unexpected '{{' on line {line}")]
    VdfUnexpectedOpen {
        /// 1-based line of the stray brace.
        line: usize,
    },

    /// A key was not followed by a value or a block.
    #[error("missing value for key '{key}' on line {line}")]
    VdfMissingValue {
        /// The dangling key.
        key: String,
        /// 1-based line of the key.
        line: usize,
    },

    /// End of input reached with blocks still open.
    #[error("{depth} unclosed block(s) at end of input")]
    VdfUnclosedBlock {
        /// Number of blocks left open.
        depth: usize,
    },

    /// The document has no top-level block to descend into.
    #[error("VDF document has no root block")]
    VdfMissingRoot,

    /// Only objects of strings and nested objects can be written as VDF.
    #[error("cannot write {kind} as VDF at '{path}'")]
    VdfUnsupportedValue {
        /// JSON kind that was rejected.
        kind: &'static str,
        /// Key path of the rejected value.
        path: String,
    },

    // ==================== Localization Errors ====================
    /// A localization resource did not contain a token table.
    #[error("localization resource has no token table")]
    MissingTokens,

    // ==================== Parsing Errors ====================
    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for `DotaLex` operations.
pub type Result<T> = std::result::Result<T, Error>;
