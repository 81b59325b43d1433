//! Single-pass fold from raw diff rows to [`Line`] records
//!
//! All carried state (current file, old-header prefix flag, running
//! new-file line counter, widest row) lives in [`ParserState`], which is
//! threaded through [`ParserState::step`] one row at a time.

use crate::classify::{classify, contains};
use crate::line::{Line, LineRole};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Counter value seeded by a hunk header whose new-file start is not a number
pub const UNKNOWN_LINE: i64 = -1;

/// Bytes skipped before the path on `--- ` / `+++ ` headers
const HEADER_PREFIX_LEN: usize = 4;

/// Existence check used to guess the real path behind a `b/` prefix
pub trait PathProbe {
    fn exists(&self, path: &Path) -> bool;
}

impl<F> PathProbe for F
where
    F: Fn(&Path) -> bool,
{
    fn exists(&self, path: &Path) -> bool {
        self(path)
    }
}

/// Probe backed by the real filesystem
#[derive(Debug, Clone, Default)]
pub struct FsProbe {
    root: Option<PathBuf>,
}

impl FsProbe {
    /// Resolve paths against the process working directory
    pub fn current_dir() -> Self {
        Self { root: None }
    }

    /// Resolve paths against `root`
    pub fn rooted(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }
}

impl PathProbe for FsProbe {
    fn exists(&self, path: &Path) -> bool {
        match &self.root {
            Some(root) => root.join(path).exists(),
            None => path.exists(),
        }
    }
}

/// State carried from one row to the next
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserState {
    current_file: Option<Arc<str>>,
    saw_old_prefix: bool,
    counter: i64,
    counter_known: bool,
    max_length: usize,
}

impl ParserState {
    pub fn new() -> Self {
        Self::default()
    }

    /// File inherited by the next body row
    pub fn current_file(&self) -> Option<&str> {
        self.current_file.as_deref()
    }

    /// Line number the next Addition or Context row will receive
    pub fn counter(&self) -> i64 {
        self.counter
    }

    /// Widest row seen so far, in bytes
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Classify one raw row and advance the carried state
    pub fn step<P: PathProbe + ?Sized>(mut self, raw: &[u8], probe: &P) -> (Self, Line) {
        let role = classify(raw);
        self.max_length = self.max_length.max(raw.len());

        let mut target_line = None;
        match role {
            LineRole::FileHeader => self.observe_header(raw, probe),
            LineRole::HunkSeparator => self.seed_counter(raw),
            LineRole::Addition | LineRole::Context => {
                target_line = Some(self.counter);
                self.counter = self.counter.saturating_add(1);
            }
            LineRole::Deletion => {}
        }

        let target_file = if role.carries_file() {
            self.current_file.clone()
        } else {
            None
        };
        let line = Line::new(
            role,
            raw.to_vec(),
            target_file,
            target_line,
            self.counter_known,
        );
        (self, line)
    }

    fn observe_header<P: PathProbe + ?Sized>(&mut self, raw: &[u8], probe: &P) {
        let path = header_path(raw);
        match raw.first() {
            Some(b'-') => self.saw_old_prefix = contains(path, b"a/"),
            Some(b'+') => {
                let name = derive_file_name(path, self.saw_old_prefix, probe);
                tracing::debug!(file = %name, "target file");
                self.current_file = Some(Arc::from(name));
            }
            _ => {}
        }
    }

    fn seed_counter(&mut self, raw: &[u8]) {
        match parse_new_start(raw) {
            Some(start) => {
                self.counter = start;
                self.counter_known = true;
            }
            None => {
                tracing::debug!(
                    header = %String::from_utf8_lossy(raw),
                    "malformed hunk header"
                );
                self.counter = UNKNOWN_LINE;
                self.counter_known = false;
            }
        }
    }
}

/// Fold every row through a fresh [`ParserState`]
pub fn classify_all<I, B, P>(rows: I, probe: &P) -> (ParserState, Vec<Line>)
where
    I: IntoIterator<Item = B>,
    B: AsRef<[u8]>,
    P: PathProbe + ?Sized,
{
    rows.into_iter()
        .fold((ParserState::new(), Vec::new()), |(state, mut lines), row| {
            let (state, line) = state.step(row.as_ref(), probe);
            lines.push(line);
            (state, lines)
        })
}

/// Path part of a header row: the fixed prefix skipped and any
/// tab-separated timestamp removed
fn header_path(raw: &[u8]) -> &[u8] {
    let rest = raw.get(HEADER_PREFIX_LEN..).unwrap_or(&[]);
    match rest.iter().position(|&b| b == b'\t') {
        Some(tab) => &rest[..tab],
        None => rest,
    }
}

fn derive_file_name<P: PathProbe + ?Sized>(path: &[u8], saw_old_prefix: bool, probe: &P) -> String {
    let candidate = String::from_utf8_lossy(path);
    if !(saw_old_prefix && contains(path, b"b/")) {
        return candidate.into_owned();
    }

    let stripped = match candidate.find('/') {
        Some(slash) => &candidate[slash + 1..],
        None => &candidate[..],
    };
    if probe.exists(Path::new(stripped)) {
        return stripped.to_string();
    }

    let mut chars = stripped.chars();
    chars.next();
    chars.as_str().to_string()
}

/// New-file start `c` from `@@ -a,b +c,d @@`
fn parse_new_start(raw: &[u8]) -> Option<i64> {
    let text = std::str::from_utf8(raw).ok()?;
    let range = text.split_ascii_whitespace().nth(2)?;
    let range = range.strip_prefix('+').unwrap_or(range);
    let start = range.split(',').next()?;
    start.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn nothing_exists(_: &Path) -> bool {
        false
    }

    fn run(rows: &[&str], probe: &dyn PathProbe) -> Vec<Line> {
        classify_all(rows.iter().map(|r| r.as_bytes()), probe).1
    }

    #[test]
    fn test_parse_new_start() {
        assert_eq!(parse_new_start(b"@@ -1,5 +10,5 @@"), Some(10));
        assert_eq!(parse_new_start(b"@@ -1 +7 @@ fn main()"), Some(7));
        assert_eq!(parse_new_start(b"@@ -0,0 +0,0 @@"), Some(0));
        assert_eq!(parse_new_start(b"@@ bogus @@"), None);
        assert_eq!(parse_new_start(b"@@"), None);
    }

    #[test]
    fn test_separator_seeds_counter() {
        let (state, _) = ParserState::new().step(b"@@ -1,5 +10,5 @@", &nothing_exists);
        assert_eq!(state.counter(), 10);
    }

    #[test]
    fn test_malformed_separator_seeds_sentinel() {
        let lines = run(&["@@ bogus @@", " a", " b"], &nothing_exists);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].target_line(), Some(UNKNOWN_LINE));
        assert_eq!(lines[2].target_line(), Some(0));
        assert!(!lines[1].target_line_known());
        assert!(!lines[2].target_line_known());
    }

    #[test]
    fn test_deletions_do_not_advance() {
        let lines = run(&["@@ -3,3 +3,3 @@", " keep", "-old", "+new", " tail"], &nothing_exists);
        let numbers: Vec<_> = lines.iter().map(|l| l.target_line()).collect();
        assert_eq!(numbers, vec![None, Some(3), None, Some(4), Some(5)]);
        assert!(lines[1].target_line_known());
    }

    #[test]
    fn test_prefixed_name_exists() {
        let probe = |p: &Path| p == Path::new("foo.txt");
        let lines = run(&["--- a/foo.txt", "+++ b/foo.txt", "@@ -1 +1 @@", " x"], &probe);
        assert_eq!(lines[0].target_file(), None);
        assert_eq!(lines[1].target_file(), None);
        assert_eq!(lines[2].target_file(), None);
        assert_eq!(lines[3].target_file(), Some("foo.txt"));
    }

    #[test]
    fn test_prefixed_name_missing_drops_one_more_char() {
        let lines = run(&["--- a/foo.txt", "+++ b/foo.txt", " x"], &nothing_exists);
        assert_eq!(lines[2].target_file(), Some("oo.txt"));
    }

    #[test]
    fn test_unprefixed_name_is_not_probed() {
        let probe = |_: &Path| -> bool { panic!("probe must not run") };
        let lines = run(&["--- foo.txt", "+++ foo.txt", " x"], &probe);
        assert_eq!(lines[2].target_file(), Some("foo.txt"));
    }

    #[test]
    fn test_timestamp_excluded_from_name() {
        let lines = run(
            &["--- old/x.c\t2024-01-01 10:00:00", "+++ new/x.c\t2024-01-02 10:00:00", " y"],
            &nothing_exists,
        );
        assert_eq!(lines[2].target_file(), Some("new/x.c"));
    }

    #[test]
    fn test_old_prefix_does_not_leak_into_next_pair() {
        let existing: HashSet<&Path> = [Path::new("one.rs")].into_iter().collect();
        let probe = |p: &Path| existing.contains(p);
        let lines = run(
            &[
                "--- a/one.rs",
                "+++ b/one.rs",
                " first",
                "--- lib/two.rs",
                "+++ sub/two.rs",
                " second",
            ],
            &probe,
        );
        assert_eq!(lines[2].target_file(), Some("one.rs"));
        assert_eq!(lines[5].target_file(), Some("sub/two.rs"));
    }

    #[test]
    fn test_huge_hunk_start_does_not_overflow() {
        let lines = run(&["@@ -1 +9223372036854775807 @@", " a", " b"], &nothing_exists);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].target_line(), Some(i64::MAX));
        assert_eq!(lines[2].target_line(), Some(i64::MAX));
    }

    #[test]
    fn test_current_file_carries_to_next_row() {
        let always = |_: &Path| true;
        let state = ParserState::new();
        assert_eq!(state.current_file(), None);
        let (state, _) = state.step(b"--- a/lib.rs", &always);
        let (state, _) = state.step(b"+++ b/lib.rs", &always);
        assert_eq!(state.current_file(), Some("lib.rs"));
        let (state, line) = state.step(b"@@ -1 +1 @@", &always);
        assert_eq!(line.target_file(), None);
        assert_eq!(state.current_file(), Some("lib.rs"));
    }

    #[test]
    fn test_rows_before_any_header_have_no_file() {
        let lines = run(&["unrelated text"], &nothing_exists);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].role(), LineRole::Context);
        assert_eq!(lines[0].target_file(), None);
    }

    #[test]
    fn test_max_length_is_monotonic() {
        let rows = ["ab", "abcdef", "a", ""];
        let mut state = ParserState::new();
        let mut seen = Vec::new();
        for row in rows {
            let (next, _) = state.step(row.as_bytes(), &nothing_exists);
            seen.push(next.max_length());
            state = next;
        }
        assert_eq!(seen, vec![2, 6, 6, 6]);
    }

    #[test]
    fn test_fs_probe_rooted() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("present.txt"), "x").expect("write");
        let probe = FsProbe::rooted(dir.path());
        assert!(probe.exists(Path::new("present.txt")));
        assert!(!probe.exists(Path::new("absent.txt")));

        let lines = run(&["--- a/present.txt", "+++ b/present.txt", "+y"], &probe);
        assert_eq!(lines[2].target_file(), Some("present.txt"));
        let lines = run(&["--- a/absent.txt", "+++ b/absent.txt", "+y"], &probe);
        assert_eq!(lines[2].target_file(), Some("bsent.txt"));
    }
}
