//! View rendering modules

mod diff_list;
mod scrollbar;

pub use diff_list::{clip_row, display_width, render_diff_list};
pub use scrollbar::render_scrollbar;
