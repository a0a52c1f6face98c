//! A [`Read`] adapter that serves comment-free JSON.

use std::io::{self, Cursor, Read};

use crate::strip::strip_comments;

/// Wraps an upstream reader and yields its contents with comments stripped.
///
/// Stripping is not incremental: the first `read` pulls the whole upstream
/// into memory and strips it at once. Only delivery to the caller is chunked.
pub struct StripReader<R> {
    upstream: R,
    stripped: Option<Cursor<Vec<u8>>>,
    failed: Option<io::ErrorKind>,
}

impl<R: Read> StripReader<R> {
    pub fn new(upstream: R) -> Self {
        Self {
            upstream,
            stripped: None,
            failed: None,
        }
    }

    pub fn into_inner(self) -> R {
        self.upstream
    }

    fn fill(&mut self) -> io::Result<Cursor<Vec<u8>>> {
        let mut raw = Vec::new();
        self.upstream.read_to_end(&mut raw)?;
        let stripped = strip_comments(&raw)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(Cursor::new(stripped))
    }
}

impl<R: Read> Read for StripReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if let Some(kind) = self.failed {
            return Err(io::Error::new(kind, "strip reader previously failed"));
        }
        let stripped = match self.stripped.take() {
            Some(cursor) => cursor,
            None => self.fill().inspect_err(|e| self.failed = Some(e.kind()))?,
        };
        self.stripped.insert(stripped).read(buf)
    }
}
