//! vdiff-core - diff line classification and viewport model
//!
//! The classifier turns a unified diff into an ordered list of typed
//! [`Line`] records carrying the file and new-file line number each row
//! belongs to. The viewport model maps that list onto a bounded window and
//! converts wheel and pointer input into offset changes.

pub mod classify;
pub mod document;
pub mod line;
pub mod parser;
pub mod viewport;

pub use classify::classify;
pub use document::{DiffDocument, DiffStats, DocumentError};
pub use line::{Line, LineRole};
pub use parser::{FsProbe, ParserState, PathProbe, UNKNOWN_LINE};
pub use viewport::{
    Geometry, HitTarget, Region, ScrollDirection, ScrollThumb, ViewportState,
};
