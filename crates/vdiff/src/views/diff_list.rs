//! Row list: one coloured row per classified diff line

use crate::app::App;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthChar;
use vdiff_core::Line as DiffLine;

/// Marks a row cut at the right edge
const ELLIPSIS: &str = "...";

pub fn render_diff_list(frame: &mut Frame, app: &App, area: Rect) {
    let gutter = usize::from(app.gutter_width());
    let text_width = app.visible_columns;
    let pan = app.viewport.pan();

    for (row, line) in (area.y..area.bottom()).zip(app.visible_lines()) {
        let colors = app.theme.row(line.role());
        let style = Style::default().fg(colors.fg).bg(colors.bg);

        let mut spans = Vec::with_capacity(2);
        if gutter > 0 {
            spans.push(Span::raw(gutter_text(line, gutter)));
        }
        spans.push(Span::raw(clip_row(
            &line.display_text(),
            pan,
            text_width,
            app.tab_width,
        )));

        let rect = Rect::new(area.x, row, area.width, 1);
        frame.render_widget(Paragraph::new(Line::from(spans)).style(style), rect);
    }
}

/// Right-aligned line number padded to `width` (number plus one space)
fn gutter_text(line: &DiffLine, width: usize) -> String {
    let digits = width.saturating_sub(1);
    match line.target_line() {
        Some(n) if line.target_line_known() => format!("{:>digits$} ", n),
        Some(_) => format!("{:>digits$} ", "?"),
        None => " ".repeat(width),
    }
}

/// Columns a row occupies once tabs are expanded
pub fn display_width(text: &str, tab_width: usize) -> usize {
    let tab_width = tab_width.max(1);
    text.chars().fold(0, |col, ch| match ch {
        '\t' => col + tab_width - col % tab_width,
        ch if ch.is_control() => col + 1,
        ch => col + ch.width().unwrap_or(0),
    })
}

/// Cut a row to `width` columns starting at column `pan`.
///
/// Tabs expand to the next multiple of `tab_width`; control characters
/// show as `?`. A row that does not fit ends with the ellipsis.
pub fn clip_row(text: &str, pan: usize, width: usize, tab_width: usize) -> String {
    let tab_width = tab_width.max(1);
    let mut cells: Vec<(char, usize)> = Vec::new();
    let mut col = 0usize;

    for ch in text.chars() {
        if ch == '\t' {
            let spaces = tab_width - col % tab_width;
            for _ in 0..spaces {
                if col >= pan {
                    cells.push((' ', 1));
                }
                col += 1;
            }
            continue;
        }
        let ch = if ch.is_control() { '?' } else { ch };
        let w = ch.width().unwrap_or(0);
        if col >= pan {
            cells.push((ch, w));
        } else if col + w > pan {
            // wide glyph cut by the pan edge
            for _ in pan..col + w {
                cells.push((' ', 1));
            }
        }
        col += w;
    }

    let used: usize = cells.iter().map(|&(_, w)| w).sum();
    if used <= width {
        return cells.into_iter().map(|(ch, _)| ch).collect();
    }

    let budget = width.saturating_sub(ELLIPSIS.len());
    let mut out = String::new();
    let mut taken = 0;
    for (ch, w) in cells {
        if taken + w > budget {
            break;
        }
        out.push(ch);
        taken += w;
    }
    out.push_str(&ELLIPSIS[..width.min(ELLIPSIS.len())]);
    out
}
