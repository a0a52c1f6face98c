use std::collections::VecDeque;

use crate::token::{LexErrorKind, Span, Token, TokenKind};

/// Lexical mode of the state machine. Each variant has one handler on
/// [`Lexer`] that scans input and returns the next mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Stream,
    String,
    CommentDispatch,
    LineComment,
    RangeComment,
    Done,
}

/// JSONC lexer.
///
/// A pull-driven state machine over a borrowed input buffer. Each call to
/// [`Lexer::next_token`] runs state handlers until a token is available.
/// The sequence always ends with exactly one [`TokenKind::Eof`] or
/// [`TokenKind::Error`] token; the text of every other token, concatenated
/// in order, reproduces the input.
///
/// Grammar:
///
/// ```text
/// stream:        ( string | raw | comment )*
/// string:        '"' ( [^"] | '\"' )* '"'
/// raw:           [^"/]+
/// line-comment:  '//' [^\n]*
/// range-comment: '/*' any* '*/'
/// ```
pub struct Lexer<'a> {
    input: &'a [u8],
    start: usize,
    pos: usize,
    start_line: usize,
    start_column: usize,
    line: usize,
    column: usize,
    state: State,
    pending: VecDeque<Token<'a>>,
}

impl<'a> Lexer<'a> {
    /// Create a lexer over the given input.
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            start: 0,
            pos: 0,
            start_line: 1,
            start_column: 1,
            line: 1,
            column: 1,
            state: State::Stream,
            pending: VecDeque::new(),
        }
    }

    /// Lex the entire input into a vector of tokens, ending with the terminal token.
    pub fn tokenize(input: &'a [u8]) -> Vec<Token<'a>> {
        Lexer::new(input).collect()
    }

    /// Pull the next token, or `None` once the terminal token has been returned.
    pub fn next_token(&mut self) -> Option<Token<'a>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(token);
            }
            if self.state == State::Done {
                return None;
            }
            let next = self.step();
            tracing::trace!(from = ?self.state, to = ?next, pos = self.pos, "lexer transition");
            self.state = next;
        }
    }

    fn step(&mut self) -> State {
        match self.state {
            State::Stream => self.lex_stream(),
            State::String => self.lex_string(),
            State::CommentDispatch => self.lex_comment_dispatch(),
            State::LineComment => self.lex_line_comment(),
            State::RangeComment => self.lex_range_comment(),
            State::Done => State::Done,
        }
    }

    // --- States ---

    fn lex_stream(&mut self) -> State {
        loop {
            if self.at(b"\"") {
                self.flush_raw();
                return State::String;
            }
            if self.at(b"/") {
                self.flush_raw();
                return State::CommentDispatch;
            }
            if !self.advance() {
                break;
            }
        }
        self.flush_raw();
        self.emit(TokenKind::Eof);
        State::Done
    }

    /// Only `\"` is treated as an escape; every other byte, including a
    /// lone backslash, is part of the string unexamined.
    fn lex_string(&mut self) -> State {
        self.advance(); // opening quote
        loop {
            if self.at(b"\"") {
                self.advance();
                self.emit(TokenKind::String);
                return State::Stream;
            }
            if self.at(b"\\\"") {
                self.advance();
                self.advance();
                continue;
            }
            if !self.advance() {
                return self.error(LexErrorKind::UnterminatedString);
            }
        }
    }

    fn lex_comment_dispatch(&mut self) -> State {
        if self.at(b"//") {
            return State::LineComment;
        }
        if self.at(b"/*") {
            return State::RangeComment;
        }
        // A lone `/` is ordinary content and joins the next raw run.
        self.advance();
        State::Stream
    }

    /// The terminating `\n` is left for the next raw run. Running out of
    /// input inside a line comment is not an error.
    fn lex_line_comment(&mut self) -> State {
        self.advance();
        self.advance();
        loop {
            if self.at(b"\n") {
                self.emit(TokenKind::Comment);
                return State::Stream;
            }
            if !self.advance() {
                break;
            }
        }
        self.emit(TokenKind::Comment);
        self.emit(TokenKind::Eof);
        State::Done
    }

    fn lex_range_comment(&mut self) -> State {
        self.advance();
        self.advance();
        loop {
            if self.at(b"*/") {
                self.advance();
                self.advance();
                self.emit(TokenKind::Comment);
                return State::Stream;
            }
            if !self.advance() {
                return self.error(LexErrorKind::UnterminatedComment);
            }
        }
    }

    // --- Helpers ---

    fn at(&self, prefix: &[u8]) -> bool {
        self.input[self.pos..].starts_with(prefix)
    }

    /// Step over one character. Returns `false` at end of input.
    fn advance(&mut self) -> bool {
        let rest = &self.input[self.pos..];
        let Some(&first) = rest.first() else {
            return false;
        };
        self.pos += char_width(rest);
        if first == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        true
    }

    fn flush_raw(&mut self) {
        if self.pos > self.start {
            self.emit(TokenKind::Raw);
        }
    }

    fn emit(&mut self, kind: TokenKind) {
        let span = Span::new(self.start, self.pos, self.start_line, self.start_column);
        self.pending
            .push_back(Token::new(kind, &self.input[self.start..self.pos], span));
        self.start = self.pos;
        self.start_line = self.line;
        self.start_column = self.column;
    }

    fn error(&mut self, kind: LexErrorKind) -> State {
        tracing::trace!(?kind, offset = self.start, "lexer error");
        let span = Span::new(self.start, self.pos, self.start_line, self.start_column);
        self.pending
            .push_back(Token::new(TokenKind::Error(kind), kind.message().as_bytes(), span));
        State::Done
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        self.next_token()
    }
}

impl std::iter::FusedIterator for Lexer<'_> {}

/// Width in bytes of the UTF-8 character starting `rest`, which must be
/// non-empty. Malformed sequences count as one byte, so an ASCII byte is
/// never swallowed into a neighbouring character.
fn char_width(rest: &[u8]) -> usize {
    let width = match rest[0] {
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 1,
    };
    if width > 1
        && rest.len() >= width
        && rest[1..width].iter().all(|b| b & 0xC0 == 0x80)
    {
        width
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::tokenize(input.as_bytes())
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn texts(input: &str) -> Vec<String> {
        Lexer::tokenize(input.as_bytes())
            .into_iter()
            .map(|t| String::from_utf8_lossy(t.text).into_owned())
            .collect()
    }

    // =========================================================================
    // Basics
    // =========================================================================

    #[test]
    fn test_empty_input() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_raw_only() {
        assert_eq!(kinds("{}"), vec![TokenKind::Raw, TokenKind::Eof]);
        assert_eq!(texts("{}")[0], "{}");
    }

    #[test]
    fn test_eof_has_empty_text() {
        let tokens = Lexer::tokenize(b"[1]");
        let eof = tokens.last().unwrap();
        assert_eq!(eof.kind, TokenKind::Eof);
        assert!(eof.text.is_empty());
        assert_eq!(eof.span, Span::new(3, 3, 1, 4));
    }

    #[test]
    fn test_pull_after_terminal_returns_none() {
        let mut lexer = Lexer::new(b"{}");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Raw);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
        assert!(lexer.next_token().is_none());
        assert!(lexer.next_token().is_none());
    }

    // =========================================================================
    // Comments
    // =========================================================================

    #[test]
    fn test_line_comment() {
        assert_eq!(texts("{//}\n"), vec!["{", "//}", "\n", ""]);
        assert_eq!(
            kinds("{//}\n"),
            vec![
                TokenKind::Raw,
                TokenKind::Comment,
                TokenKind::Raw,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_line_comment_at_eof() {
        assert_eq!(texts("1 // done"), vec!["1 ", "// done", ""]);
        assert_eq!(
            kinds("1 // done"),
            vec![TokenKind::Raw, TokenKind::Comment, TokenKind::Eof]
        );
    }

    #[test]
    fn test_bare_line_comment_marker_at_eof() {
        assert_eq!(kinds("//"), vec![TokenKind::Comment, TokenKind::Eof]);
    }

    #[test]
    fn test_range_comment() {
        assert_eq!(texts("{/**/}"), vec!["{", "/**/", "}", ""]);
    }

    #[test]
    fn test_range_comment_spanning_lines() {
        assert_eq!(
            texts("[/* a\n * b\n */1]"),
            vec!["[", "/* a\n * b\n */", "1]", ""]
        );
    }

    #[test]
    fn test_range_comment_needs_separate_close() {
        // `/*/` opens a comment; the trailing `/` does not close it.
        let tokens = Lexer::tokenize(b"/*/");
        assert_eq!(
            tokens.last().unwrap().kind,
            TokenKind::Error(LexErrorKind::UnterminatedComment)
        );
    }

    #[test]
    fn test_adjacent_comments_emit_no_empty_raw() {
        assert_eq!(
            kinds("/*a*//*b*/// c"),
            vec![
                TokenKind::Comment,
                TokenKind::Comment,
                TokenKind::Comment,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lone_slash_is_raw() {
        assert_eq!(texts("1/2"), vec!["1", "/2", ""]);
        assert_eq!(kinds("/"), vec![TokenKind::Raw, TokenKind::Eof]);
    }

    #[test]
    fn test_lone_slash_before_string() {
        assert_eq!(texts("/\"x\""), vec!["/", "\"x\"", ""]);
    }

    // =========================================================================
    // Strings
    // =========================================================================

    #[test]
    fn test_range_comment_in_string() {
        assert_eq!(texts(r#"{"/**/"}"#), vec!["{", r#""/**/""#, "}", ""]);
        assert_eq!(
            kinds(r#"{"/**/"}"#),
            vec![
                TokenKind::Raw,
                TokenKind::String,
                TokenKind::Raw,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_line_comment_in_string() {
        assert_eq!(
            texts(r#"{"url": "http://x"}"#),
            vec!["{", r#""url""#, ": ", r#""http://x""#, "}", ""]
        );
    }

    #[test]
    fn test_escaped_quote_in_string() {
        assert_eq!(texts(r#"{"\""}"#)[1], r#""\"""#);
    }

    #[test]
    fn test_other_backslashes_pass_through() {
        assert_eq!(texts(r#"["a\n/*"]"#), vec!["[", r#""a\n/*""#, "]", ""]);
    }

    #[test]
    fn test_consecutive_strings() {
        assert_eq!(
            kinds(r#""a""b""#),
            vec![TokenKind::String, TokenKind::String, TokenKind::Eof]
        );
    }

    // =========================================================================
    // Errors
    // =========================================================================

    #[test]
    fn test_no_comment_terminator() {
        let tokens = Lexer::tokenize(b"{/*}");
        let last = tokens.last().unwrap();
        assert_eq!(
            last.kind,
            TokenKind::Error(LexErrorKind::UnterminatedComment)
        );
        assert_eq!(last.text, b"unexpected EOF scanning comment");
        assert_eq!(last.span, Span::new(1, 4, 1, 2));
    }

    #[test]
    fn test_no_string_terminator() {
        let tokens = Lexer::tokenize(b"{\"");
        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![
                TokenKind::Raw,
                TokenKind::Error(LexErrorKind::UnterminatedString),
            ]
        );
        assert_eq!(tokens[1].text, b"eof during string parse");
    }

    #[test]
    fn test_escaped_quote_at_end_is_unterminated() {
        let tokens = Lexer::tokenize(br#""abc\""#);
        assert_eq!(
            tokens.last().unwrap().kind,
            TokenKind::Error(LexErrorKind::UnterminatedString)
        );
    }

    #[test]
    fn test_error_reports_line_and_column() {
        let tokens = Lexer::tokenize(b"{\n  \"a\": /* oops");
        let last = tokens.last().unwrap();
        assert_eq!(last.span.line, 2);
        assert_eq!(last.span.column, 8);
    }

    // =========================================================================
    // Contiguity and multi-byte input
    // =========================================================================

    #[test]
    fn test_tokens_reconstruct_input() {
        let input = "{\n  // name\n  \"n\": \"v//\", /* x */ \"k\": [1, 2/3]\n}";
        let tokens = Lexer::tokenize(input.as_bytes());
        let mut joined = Vec::new();
        let mut offset = 0;
        for token in &tokens {
            assert_eq!(token.span.start, offset);
            offset = token.span.end;
            joined.extend_from_slice(token.text);
        }
        assert_eq!(joined, input.as_bytes());
    }

    #[test]
    fn test_multibyte_passes_through() {
        assert_eq!(
            texts("{\"ключ\": \"значение\" /* ☃ */}"),
            vec!["{", "\"ключ\"", ": ", "\"значение\"", " ", "/* ☃ */", "}", ""]
        );
    }

    #[test]
    fn test_columns_count_characters() {
        let tokens = Lexer::tokenize("\"é\"/**/".as_bytes());
        assert_eq!(tokens[1].span, Span::new(4, 8, 1, 4));
    }

    #[test]
    fn test_invalid_utf8_does_not_swallow_quote() {
        let tokens = Lexer::tokenize(b"\xE0\"a\"");
        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![TokenKind::Raw, TokenKind::String, TokenKind::Eof]
        );
        assert_eq!(tokens[1].text, b"\"a\"");
    }

    #[test]
    fn test_char_width() {
        assert_eq!(char_width(b"a"), 1);
        assert_eq!(char_width("é".as_bytes()), 2);
        assert_eq!(char_width("☃".as_bytes()), 3);
        assert_eq!(char_width("🦀".as_bytes()), 4);
        assert_eq!(char_width(b"\xF0\x9F"), 1);
        assert_eq!(char_width(b"\x80"), 1);
    }
}
