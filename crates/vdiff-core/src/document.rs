//! A fully classified diff read from a byte stream

use crate::line::{Line, LineRole};
use crate::parser::{ParserState, PathProbe};
use std::collections::HashSet;
use std::io::BufRead;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no diff on standard input")]
    Empty,
}

/// Row counts shown in the status bar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStats {
    pub files: usize,
    pub additions: usize,
    pub deletions: usize,
}

/// Immutable classified line list plus the widest row
#[derive(Debug, Clone)]
pub struct DiffDocument {
    lines: Vec<Line>,
    max_length: usize,
}

impl DiffDocument {
    /// Read and classify every row of `reader` before returning.
    ///
    /// End of input finishes the document; any other read error aborts.
    /// A stream without a single row is [`DocumentError::Empty`].
    pub fn from_reader<R, P>(mut reader: R, probe: &P) -> Result<Self, DocumentError>
    where
        R: BufRead,
        P: PathProbe + ?Sized,
    {
        let mut state = ParserState::new();
        let mut lines = Vec::new();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let (next, line) = state.step(trim_terminator(&buf), probe);
            state = next;
            lines.push(line);
        }

        if lines.is_empty() {
            return Err(DocumentError::Empty);
        }
        tracing::info!(rows = lines.len(), max_length = state.max_length(), "diff loaded");

        Ok(Self {
            lines,
            max_length: state.max_length(),
        })
    }

    /// Classify rows that are already split
    pub fn from_rows<I, B, P>(rows: I, probe: &P) -> Result<Self, DocumentError>
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
        P: PathProbe + ?Sized,
    {
        let (state, lines) = crate::parser::classify_all(rows, probe);
        if lines.is_empty() {
            return Err(DocumentError::Empty);
        }
        Ok(Self {
            lines,
            max_length: state.max_length(),
        })
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn stats(&self) -> DiffStats {
        let mut files = HashSet::new();
        let mut stats = DiffStats::default();
        for line in &self.lines {
            match line.role() {
                LineRole::Addition => stats.additions += 1,
                LineRole::Deletion => stats.deletions += 1,
                _ => {}
            }
            if let Some(file) = line.target_file() {
                files.insert(file);
            }
        }
        stats.files = files.len();
        stats
    }
}

fn trim_terminator(buf: &[u8]) -> &[u8] {
    let buf = buf.strip_suffix(b"\n").unwrap_or(buf);
    buf.strip_suffix(b"\r").unwrap_or(buf)
}
