//! Comment stripping.

use jsonc_lexer::{Lexer, Token, TokenKind};

use crate::ParseError;

/// Return a copy of `input` with every comment removed.
///
/// Fails on the first unterminated string or range comment; no partial
/// output is returned alongside an error.
#[tracing::instrument(level = "debug", skip_all, fields(len = input.len()))]
pub fn strip_comments(input: &[u8]) -> Result<Vec<u8>, ParseError> {
    let mut output = Vec::with_capacity(input.len());
    drive(input, |token| output.extend_from_slice(token.text))?;
    tracing::debug!(bytes_out = output.len(), "stripped comments");
    Ok(output)
}

/// Like [`strip_comments`], over UTF-8 text.
pub fn strip_comments_str(input: &str) -> Result<String, ParseError> {
    let mut output = String::with_capacity(input.len());
    // Comment spans start and end on ASCII bytes, so every kept span lies on
    // character boundaries.
    drive(input.as_bytes(), |token| {
        output.push_str(&input[token.span.start..token.span.end])
    })?;
    Ok(output)
}

/// Pull tokens until the lexer terminates, handing every non-comment token
/// to `keep`.
fn drive<'a>(input: &'a [u8], mut keep: impl FnMut(&Token<'a>)) -> Result<(), ParseError> {
    let mut comments = 0usize;
    for token in Lexer::new(input) {
        match token.kind {
            TokenKind::Raw | TokenKind::String => keep(&token),
            TokenKind::Comment => comments += 1,
            TokenKind::Error(kind) => return Err(ParseError::new(kind, token.span)),
            TokenKind::Eof => break,
        }
    }
    tracing::trace!(comments, "lexer finished");
    Ok(())
}
