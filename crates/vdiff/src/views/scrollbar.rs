//! Proportional scrollbar drawn from the viewport's thumb geometry

use crate::app::App;
use ratatui::{layout::Rect, style::Style, widgets::Block, Frame};

pub fn render_scrollbar(frame: &mut Frame, app: &App, track: Rect) {
    if track.is_empty() {
        return;
    }
    let colors = app.theme.scrollbar;
    frame.render_widget(Block::default().style(Style::default().bg(colors.bg)), track);

    let thumb = app.viewport.scroll_thumb(app.total());
    let thumb_rect = Rect::new(track.x, thumb.start, track.width, thumb.len).intersection(track);
    if !thumb_rect.is_empty() {
        frame.render_widget(
            Block::default().style(Style::default().bg(colors.fg)),
            thumb_rect,
        );
    }
}
