use std::fmt;

/// A region of the input, tracking line and column for error reporting.
///
/// `start` and `end` are byte offsets. `line` and `column` are 1-based and
/// describe where the span begins; columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }
}

/// The two ways a JSONC input can be malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LexErrorKind {
    /// A `"` was opened but the input ended before an unescaped closing `"`.
    #[error("eof during string parse")]
    UnterminatedString,
    /// A `/*` was opened but the input ended before the matching `*/`.
    #[error("unexpected EOF scanning comment")]
    UnterminatedComment,
}

impl LexErrorKind {
    /// The message carried in the text of an error token.
    pub fn message(self) -> &'static str {
        match self {
            LexErrorKind::UnterminatedString => "eof during string parse",
            LexErrorKind::UnterminatedComment => "unexpected EOF scanning comment",
        }
    }
}

/// Token classification for JSONC input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// JSON content outside strings and comments.
    Raw,
    /// A quoted string literal, quotes included.
    String,
    /// A `// line` or `/* range */` comment.
    Comment,
    /// Malformed input. The token text is the error message.
    Error(LexErrorKind),
    /// End of input, carries empty text.
    Eof,
}

impl TokenKind {
    /// Whether no further tokens follow one of this kind.
    pub fn is_terminal(self) -> bool {
        matches!(self, TokenKind::Error(_) | TokenKind::Eof)
    }
}

/// A token produced by the JSONC lexer.
///
/// `text` borrows the exact slice of input the token covers, except for
/// error tokens, whose text is the static error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a [u8],
    pub span: Span,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a [u8], span: Span) -> Self {
        Self { kind, text, span }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "EOF"),
            TokenKind::Error(kind) => write!(f, "ERR:{}", kind.message()),
            _ => {
                let text = String::from_utf8_lossy(self.text);
                if text.chars().count() > 10 {
                    let head: String = text.chars().take(10).collect();
                    write!(f, "{head:?}...")
                } else {
                    write!(f, "{text:?}")
                }
            }
        }
    }
}
