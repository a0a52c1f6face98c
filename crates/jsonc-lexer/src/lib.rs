//! JSONC Lexer
//!
//! Splits JSON-with-comments text into raw JSON runs, string literals,
//! and `//` / `/* */` comments. Comment-like sequences inside quoted
//! strings are not comments.
//!
//! # Example
//!
//! ```
//! use jsonc_lexer::{Lexer, TokenKind};
//!
//! let tokens = Lexer::tokenize(b"{/* note */}");
//! let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     vec![TokenKind::Raw, TokenKind::Comment, TokenKind::Raw, TokenKind::Eof]
//! );
//! ```

pub mod lexer;
pub mod token;

pub use lexer::Lexer;
pub use token::{LexErrorKind, Span, Token, TokenKind};
