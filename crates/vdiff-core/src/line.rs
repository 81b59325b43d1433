//! Classified diff rows

use std::borrow::Cow;
use std::sync::Arc;

/// Role of a diff row, decided from its text alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineRole {
    /// `---` / `+++` file header
    FileHeader,
    /// `@@ -a,b +c,d @@` hunk separator
    HunkSeparator,
    Addition,
    Deletion,
    Context,
}

impl LineRole {
    /// Whether rows of this role exist in the new file and advance the line counter
    pub fn advances_counter(self) -> bool {
        matches!(self, LineRole::Addition | LineRole::Context)
    }

    /// Whether rows of this role inherit the current target file
    pub fn carries_file(self) -> bool {
        !matches!(self, LineRole::FileHeader | LineRole::HunkSeparator)
    }
}

/// One row of classified diff text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    role: LineRole,
    text: Vec<u8>,
    target_file: Option<Arc<str>>,
    target_line: Option<i64>,
    line_known: bool,
}

impl Line {
    pub(crate) fn new(
        role: LineRole,
        text: Vec<u8>,
        target_file: Option<Arc<str>>,
        target_line: Option<i64>,
        line_known: bool,
    ) -> Self {
        Self {
            role,
            text,
            target_file,
            target_line,
            line_known,
        }
    }

    pub fn role(&self) -> LineRole {
        self.role
    }

    /// Raw bytes of the source line, without the line terminator
    pub fn text(&self) -> &[u8] {
        &self.text
    }

    /// Text decoded for display; invalid UTF-8 is replaced, never dropped
    pub fn display_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.text)
    }

    /// File this row belongs to. `None` for headers, separators and rows
    /// that precede the first header pair.
    pub fn target_file(&self) -> Option<&str> {
        self.target_file.as_deref()
    }

    /// New-file line number for Addition and Context rows
    pub fn target_line(&self) -> Option<i64> {
        self.target_line
    }

    /// False when the number was counted from a malformed hunk header
    pub fn target_line_known(&self) -> bool {
        self.target_line.is_some() && self.line_known
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
