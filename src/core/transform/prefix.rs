//! Streaming `blast_id` column prefixer for Sailthru blast exports
//!
//! The export CSV arrives in arbitrary chunks. Each line is prefixed as soon
//! as its first byte is seen, so the file never has to be held in memory:
//! the header gets `blast_id,` and every other line gets `<blast_id>,`.
//! Line terminators pass through untouched.

use crate::domain::BlastId;
use std::io::{self, Write};

const HEADER_PREFIX: &[u8] = b"blast_id,";

/// Writer adapter that prepends the blast id column to every CSV line
pub struct BlastIdPrefixer<W: Write> {
    inner: W,
    row_prefix: Vec<u8>,
    at_line_start: bool,
    lines: usize,
}

impl<W: Write> BlastIdPrefixer<W> {
    /// Wraps `inner`, prefixing data rows with `blast_id`
    pub fn new(inner: W, blast_id: &BlastId) -> Self {
        Self {
            inner,
            row_prefix: format!("{blast_id},").into_bytes(),
            at_line_start: true,
            lines: 0,
        }
    }

    /// Feeds the next chunk of the source file
    pub fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<()> {
        let mut rest = chunk;
        while !rest.is_empty() {
            if self.at_line_start {
                let prefix = if self.lines == 0 {
                    HEADER_PREFIX
                } else {
                    self.row_prefix.as_slice()
                };
                self.inner.write_all(prefix)?;
                self.lines += 1;
                self.at_line_start = false;
            }

            match rest.iter().position(|&b| b == b'\n') {
                Some(newline) => {
                    self.inner.write_all(&rest[..=newline])?;
                    rest = &rest[newline + 1..];
                    self.at_line_start = true;
                }
                None => {
                    self.inner.write_all(rest)?;
                    rest = &[];
                }
            }
        }
        Ok(())
    }

    /// Lines written so far, header included
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Data rows written so far (header excluded)
    pub fn data_rows(&self) -> usize {
        self.lines.saturating_sub(1)
    }

    /// Flushes and returns the wrapped writer
    pub fn finish(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}
