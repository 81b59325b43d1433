//! Application state and input dispatch

use crate::config::{Config, ResolvedTheme};
use crate::views::display_width;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use vdiff_core::{DiffDocument, Geometry, HitTarget, Line, ScrollDirection, ViewportState};


/// The main application state
pub struct App {
    /// Classified diff, read once at startup
    pub doc: DiffDocument,
    /// Scroll offset, pan and derived geometry
    pub viewport: ViewportState,
    pub theme: ResolvedTheme,
    /// Show the scrollbar
    pub scrollbar_visible: bool,
    pub tab_width: usize,
    /// Columns moved per pan step
    pub pan_columns: usize,
    /// Text columns available right of the gutter, as of the last draw
    pub visible_columns: usize,
    /// Last pointer row while dragging on the scrollbar
    drag_row: Option<u16>,
    gutter_width: u16,
    /// Widest row in display columns, the pan limit
    content_width: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(doc: DiffDocument, config: &Config, dark: bool) -> Self {
        let gutter_width = if config.ui.line_numbers {
            gutter_width_for(&doc)
        } else {
            0
        };
        let tab_width = usize::from(config.ui.tab_width.max(1));
        let content_width = doc
            .lines()
            .iter()
            .map(|line| display_width(&line.display_text(), tab_width))
            .max()
            .unwrap_or(0);
        Self {
            doc,
            viewport: ViewportState::new().with_wheel_step(config.scroll.wheel_lines),
            theme: config.theme.resolve(dark),
            scrollbar_visible: config.ui.scrollbar,
            tab_width,
            pan_columns: config.scroll.pan_columns.max(1),
            visible_columns: 0,
            drag_row: None,
            gutter_width,
            content_width,
            should_quit: false,
        }
    }

    pub fn total(&self) -> usize {
        self.doc.len()
    }

    /// Width of the line-number gutter, zero when hidden
    pub fn gutter_width(&self) -> u16 {
        self.gutter_width
    }

    /// Apply geometry reported by the renderer
    pub fn resize(&mut self, geometry: Geometry, visible_columns: usize) {
        let total = self.total();
        self.visible_columns = visible_columns;
        self.viewport.on_resize(geometry, total);
        self.viewport.pan_by(0, self.content_width, visible_columns);
    }

    /// Rows currently in the window
    pub fn visible_lines(&self) -> &[Line] {
        &self.doc.lines()[self.viewport.visible_range(self.total())]
    }

    /// First visible row that belongs to a file, for the status bar
    pub fn current_location(&self) -> Option<&Line> {
        self.visible_lines()
            .iter()
            .find(|line| line.target_file().is_some())
    }

    pub fn scroll_by(&mut self, delta: isize) {
        let total = self.total();
        self.viewport.scroll_by(delta, total);
    }

    pub fn pan_by(&mut self, steps: isize) {
        let delta = steps * self.pan_columns as isize;
        self.viewport
            .pan_by(delta, self.content_width, self.visible_columns);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let total = self.total();
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('d') if ctrl => self.viewport.half_page_down(total),
            KeyCode::Char('u') if ctrl => self.viewport.half_page_up(total),
            KeyCode::Char('f') if ctrl => self.viewport.page_down(total),
            KeyCode::Char('b') if ctrl => self.viewport.page_up(total),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_by(1),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_by(-1),
            KeyCode::PageDown | KeyCode::Char(' ') => self.viewport.page_down(total),
            KeyCode::PageUp => self.viewport.page_up(total),
            KeyCode::Home | KeyCode::Char('g') => self.viewport.scroll_to_start(),
            KeyCode::End | KeyCode::Char('G') => self.viewport.scroll_to_end(total),
            KeyCode::Right | KeyCode::Char('l') => self.pan_by(1),
            KeyCode::Left | KeyCode::Char('h') => self.pan_by(-1),
            KeyCode::Char('0') => self.viewport.reset_pan(),
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let total = self.total();
        match mouse.kind {
            MouseEventKind::ScrollUp => self.viewport.on_wheel(ScrollDirection::Up, 1, total),
            MouseEventKind::ScrollDown => self.viewport.on_wheel(ScrollDirection::Down, 1, total),
            MouseEventKind::ScrollLeft => self.pan_by(-1),
            MouseEventKind::ScrollRight => self.pan_by(1),
            MouseEventKind::Down(MouseButton::Left) => {
                match self
                    .viewport
                    .hit_test_scrollbar(mouse.column, mouse.row, total)
                {
                    HitTarget::Thumb => self.drag_row = Some(mouse.row),
                    HitTarget::Track => {
                        self.viewport.jump_to_track_position(mouse.row, total);
                        self.drag_row = Some(mouse.row);
                    }
                    // reserved for selection
                    HitTarget::Content | HitTarget::Outside => {}
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(last) = self.drag_row {
                    let delta = i32::from(mouse.row) - i32::from(last);
                    self.viewport.on_pointer_drag(delta, total);
                    self.drag_row = Some(mouse.row);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => self.drag_row = None,
            _ => {}
        }
    }

    #[cfg(test)]
    pub fn is_dragging(&self) -> bool {
        self.drag_row.is_some()
    }
}

/// Digits of the largest line number plus one separating space
fn gutter_width_for(doc: &DiffDocument) -> u16 {
    let widest = doc
        .lines()
        .iter()
        .filter_map(|line| line.target_line())
        .map(|n| n.unsigned_abs().to_string().len())
        .max();
    match widest {
        Some(digits) => digits as u16 + 1,
        None => 0,
    }
}
