//! UI rendering for the TUI

use crate::app::App;
use crate::views::{render_diff_list, render_scrollbar};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};
use vdiff_core::{Geometry, Region};

/// Width of the scrollbar track
const SCROLL_WIDTH: u16 = 1;
/// Blank columns between the scrollbar and the rows
const SCROLL_GAP: u16 = 1;

/// Screen areas for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Areas {
    pub list: Rect,
    pub scrollbar: Option<Rect>,
    pub status: Rect,
}

pub fn layout(area: Rect, scrollbar: bool) -> Areas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Rows
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    if !scrollbar {
        return Areas {
            list: rows[0],
            scrollbar: None,
            status: rows[1],
        };
    }

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(SCROLL_WIDTH),
            Constraint::Length(SCROLL_GAP),
            Constraint::Min(0),
        ])
        .split(rows[0]);

    Areas {
        list: cols[2],
        scrollbar: Some(cols[0]),
        status: rows[1],
    }
}

fn region(rect: Rect) -> Region {
    Region::new(rect.x, rect.y, rect.width, rect.height)
}

/// Main drawing function
pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let areas = layout(area, app.scrollbar_visible);

    let geometry = Geometry {
        list: region(areas.list),
        scrollbar: areas.scrollbar.map(region).unwrap_or_default(),
        row_height: 1,
    };
    let text_columns = areas.list.width.saturating_sub(app.gutter_width());
    app.resize(geometry, usize::from(text_columns));

    let background = Style::default().bg(app.theme.context.bg);
    frame.render_widget(Block::default().style(background), area);

    render_diff_list(frame, app, areas.list);
    if let Some(track) = areas.scrollbar {
        render_scrollbar(frame, app, track);
    }
    draw_status_bar(frame, app, areas.status);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let colors = app.theme.file;
    let style = Style::default().fg(colors.fg).bg(colors.bg);

    let location = match app.current_location() {
        Some(line) => {
            let file = line.target_file().unwrap_or_default();
            match line.target_line() {
                Some(n) if line.target_line_known() => format!(" {}:{}", file, n),
                _ => format!(" {}", file),
            }
        }
        None => " -".to_string(),
    };

    let stats = app.doc.stats();
    let total = app.total();
    let position = format!(
        "+{} -{}  {}/{} ",
        stats.additions,
        stats.deletions,
        (app.viewport.offset() + 1).min(total),
        total
    );

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(position.chars().count() as u16),
        ])
        .split(area);

    let left_width = usize::from(chunks[0].width);
    let left = crate::views::clip_row(&location, 0, left_width, 1);
    frame.render_widget(
        Paragraph::new(Line::from(Span::raw(left))).style(style),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::raw(position))).style(style),
        chunks[1],
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_with_scrollbar() {
        let areas = layout(Rect::new(0, 0, 80, 24), true);
        assert_eq!(areas.scrollbar, Some(Rect::new(0, 0, 1, 23)));
        assert_eq!(areas.list, Rect::new(2, 0, 78, 23));
        assert_eq!(areas.status, Rect::new(0, 23, 80, 1));
    }

    #[test]
    fn test_layout_without_scrollbar() {
        let areas = layout(Rect::new(0, 0, 80, 24), false);
        assert_eq!(areas.scrollbar, None);
        assert_eq!(areas.list, Rect::new(0, 0, 80, 23));
    }
}
