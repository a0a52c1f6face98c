//! JSONC
//!
//! Removes `//` line comments and `/* */` range comments from JSONC text,
//! leaving every other byte untouched so the result parses as standard JSON.
//!
//! ```text
//! JSONC bytes → Lexer → strip_comments() → JSON bytes → serde_json
//! ```
//!
//! # Example
//!
//! ```
//! let clean = jsonc::strip_comments(b"{\"a\": 1 /* one */}").unwrap();
//! assert_eq!(clean, b"{\"a\": 1 }");
//!
//! let value: serde_json::Value = jsonc::from_str("[1, // first\n 2]").unwrap();
//! assert_eq!(value, serde_json::json!([1, 2]));
//! ```

pub mod de;
pub mod reader;
pub mod strip;

pub use de::{decoder, from_reader, from_slice, from_str};
pub use jsonc_lexer::{LexErrorKind, Span};
pub use reader::StripReader;
pub use strip::{strip_comments, strip_comments_str};

/// Malformed JSONC input, with the position where the offending string or
/// comment began.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at line {line}, column {column}")]
pub struct ParseError {
    pub kind: LexErrorKind,
    pub message: String,
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl ParseError {
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        Self {
            kind,
            message: kind.message().to_string(),
            offset: span.start,
            line: span.line,
            column: span.column,
        }
    }
}

/// Error from decoding JSONC into a value.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
