//! Viewport over the classified line list
//!
//! The only persistent value is `offset`, the index of the first visible
//! row. Everything else (visible row count, thumb geometry, hit testing) is
//! re-derived from the reported geometry on every resize or input event.
//!
//! Units are whatever the rendering shell measures in (pixels, terminal
//! cells); the model only divides them by the row height.

use std::ops::Range;

/// Lines scrolled per wheel notch unless configured otherwise
pub const DEFAULT_WHEEL_STEP: usize = 3;

/// Axis-aligned rectangle in shell units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Region {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Region {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x
            && y >= self.y
            && u32::from(x) < u32::from(self.x) + u32::from(self.width)
            && u32::from(y) < u32::from(self.y) + u32::from(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Geometry reported by the rendering shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    /// Area the rows are drawn into
    pub list: Region,
    /// Scrollbar track
    pub scrollbar: Region,
    /// Height of one rendered row
    pub row_height: u16,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            list: Region::default(),
            scrollbar: Region::default(),
            row_height: 1,
        }
    }
}

/// Scrollbar thumb, in absolute track coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollThumb {
    pub start: u16,
    pub len: u16,
}

impl ScrollThumb {
    pub fn end(&self) -> u16 {
        self.start.saturating_add(self.len)
    }

    pub fn contains(&self, y: u16) -> bool {
        y >= self.start && y < self.end()
    }
}

/// What a pointer position lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// Scrollbar thumb: drag-scroll
    Thumb,
    /// Scrollbar track outside the thumb
    Track,
    /// Row list: passed through to the shell
    Content,
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// Largest offset allowed for `total` rows shown `visible` at a time.
///
/// Leaves one row of slack past the last full page so the final row is not
/// pinned flush to the bottom edge. The offset never points past the last
/// row, which only matters when fewer than two rows fit.
pub(crate) fn max_offset(total_lines: usize, visible_rows: usize) -> usize {
    (total_lines + 1)
        .saturating_sub(visible_rows)
        .min(total_lines.saturating_sub(1))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewportState {
    offset: usize,
    visible_rows: usize,
    geometry: Geometry,
    pan: usize,
    wheel_step: usize,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportState {
    pub fn new() -> Self {
        Self {
            offset: 0,
            visible_rows: 0,
            geometry: Geometry::default(),
            pan: 0,
            wheel_step: DEFAULT_WHEEL_STEP,
        }
    }

    /// Lines moved per wheel notch (at least one)
    pub fn with_wheel_step(mut self, lines: usize) -> Self {
        self.wheel_step = lines.max(1);
        self
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// First visible column
    pub fn pan(&self) -> usize {
        self.pan
    }

    /// Rows to draw: `lines[range]`
    pub fn visible_range(&self, total_lines: usize) -> Range<usize> {
        let start = self.offset.min(total_lines);
        let end = (self.offset + self.visible_rows).min(total_lines);
        start..end
    }

    /// Recompute the visible row count and re-clamp the offset
    pub fn on_resize(&mut self, geometry: Geometry, total_lines: usize) {
        let row_height = geometry.row_height.max(1);
        self.geometry = Geometry {
            row_height,
            ..geometry
        };
        self.visible_rows = usize::from(geometry.list.height / row_height);
        self.clamp(total_lines);
    }

    fn clamp(&mut self, total_lines: usize) {
        self.offset = self.offset.min(max_offset(total_lines, self.visible_rows));
    }

    /// Move the offset by `delta` rows and re-clamp
    pub fn scroll_by(&mut self, delta: isize, total_lines: usize) {
        self.offset = if delta < 0 {
            self.offset.saturating_sub(delta.unsigned_abs())
        } else {
            self.offset.saturating_add(delta.unsigned_abs())
        };
        self.clamp(total_lines);
    }

    pub fn on_wheel(&mut self, direction: ScrollDirection, notches: usize, total_lines: usize) {
        let lines = isize::try_from(notches.saturating_mul(self.wheel_step)).unwrap_or(isize::MAX);
        match direction {
            ScrollDirection::Up => self.scroll_by(-lines, total_lines),
            ScrollDirection::Down => self.scroll_by(lines, total_lines),
        }
    }

    /// Convert a pointer drag in shell units into whole rows.
    /// Positive deltas move towards the end of the list.
    pub fn on_pointer_drag(&mut self, delta: i32, total_lines: usize) {
        let rows = delta / i32::from(self.geometry.row_height.max(1));
        self.scroll_by(rows as isize, total_lines);
    }

    pub fn page_down(&mut self, total_lines: usize) {
        self.scroll_by(self.page() as isize, total_lines);
    }

    pub fn page_up(&mut self, total_lines: usize) {
        self.scroll_by(-(self.page() as isize), total_lines);
    }

    pub fn half_page_down(&mut self, total_lines: usize) {
        self.scroll_by((self.page() / 2).max(1) as isize, total_lines);
    }

    pub fn half_page_up(&mut self, total_lines: usize) {
        self.scroll_by(-((self.page() / 2).max(1) as isize), total_lines);
    }

    pub fn scroll_to_start(&mut self) {
        self.offset = 0;
    }

    pub fn scroll_to_end(&mut self, total_lines: usize) {
        self.offset = max_offset(total_lines, self.visible_rows);
    }

    fn page(&self) -> usize {
        self.visible_rows.max(1)
    }

    /// Thumb length in track units. Proportional to `visible / total`,
    /// the whole track when everything fits.
    pub fn scroll_thumb_size(&self, total_lines: usize) -> u16 {
        let track = self.geometry.scrollbar.height;
        if total_lines <= self.visible_rows || track == 0 {
            return track;
        }
        let len = usize::from(track) * self.visible_rows / total_lines;
        len.clamp(1, usize::from(track)) as u16
    }

    pub fn scroll_thumb(&self, total_lines: usize) -> ScrollThumb {
        let track = self.geometry.scrollbar;
        let len = self.scroll_thumb_size(total_lines);
        if total_lines == 0 {
            return ScrollThumb { start: track.y, len };
        }
        let room = usize::from(track.height - len);
        let start = (usize::from(track.height) * self.offset / total_lines).min(room);
        ScrollThumb {
            start: track.y + start as u16,
            len,
        }
    }

    /// Position the offset so the thumb is centred on track position `y`
    pub fn jump_to_track_position(&mut self, y: u16, total_lines: usize) {
        let track = self.geometry.scrollbar;
        if track.height == 0 {
            return;
        }
        let rel = usize::from(y.saturating_sub(track.y)).min(usize::from(track.height) - 1);
        let target = rel * total_lines / usize::from(track.height);
        self.offset = target.saturating_sub(self.visible_rows / 2);
        self.clamp(total_lines);
    }

    pub fn hit_test_scrollbar(&self, x: u16, y: u16, total_lines: usize) -> HitTarget {
        if self.geometry.scrollbar.contains(x, y) {
            if self.scroll_thumb(total_lines).contains(y) {
                HitTarget::Thumb
            } else {
                HitTarget::Track
            }
        } else if self.geometry.list.contains(x, y) {
            HitTarget::Content
        } else {
            HitTarget::Outside
        }
    }

    /// Shift the first visible column, keeping the widest row reachable
    pub fn pan_by(&mut self, delta: isize, max_length: usize, visible_columns: usize) {
        let limit = max_length.saturating_sub(visible_columns);
        let pan = if delta < 0 {
            self.pan.saturating_sub(delta.unsigned_abs())
        } else {
            self.pan.saturating_add(delta.unsigned_abs())
        };
        self.pan = pan.min(limit);
    }

    pub fn reset_pan(&mut self) {
        self.pan = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(height: u16) -> Geometry {
        Geometry {
            list: Region::new(2, 0, 40, height),
            scrollbar: Region::new(0, 0, 1, height),
            row_height: 1,
        }
    }

    fn sized(height: u16, total: usize) -> ViewportState {
        let mut vp = ViewportState::new();
        vp.on_resize(geometry(height), total);
        vp
    }

    #[test]
    fn test_max_offset() {
        assert_eq!(max_offset(100, 20), 81);
        assert_eq!(max_offset(20, 20), 1);
        assert_eq!(max_offset(5, 20), 0);
        assert_eq!(max_offset(0, 20), 0);
        assert_eq!(max_offset(10, 1), 9);
        assert_eq!(max_offset(10, 0), 9);
    }

    #[test]
    fn test_visible_rows_uses_row_height() {
        let mut vp = ViewportState::new();
        vp.on_resize(
            Geometry {
                row_height: 16,
                ..geometry(100)
            },
            50,
        );
        assert_eq!(vp.visible_rows(), 6);
    }

    #[test]
    fn test_resize_keeps_reported_geometry() {
        let vp = sized(12, 50);
        assert_eq!(vp.geometry(), geometry(12));
        assert!(!vp.geometry().scrollbar.is_empty());
        assert!(ViewportState::new().geometry().list.is_empty());
        assert!(Region::new(3, 3, 0, 10).is_empty());
    }

    #[test]
    fn test_zero_row_height_is_treated_as_one() {
        let mut vp = ViewportState::new();
        vp.on_resize(
            Geometry {
                row_height: 0,
                ..geometry(10)
            },
            50,
        );
        assert_eq!(vp.visible_rows(), 10);
    }

    #[test]
    fn test_resize_keeps_slack_row() {
        let mut vp = sized(10, 100);
        vp.scroll_by(95, 100);
        assert_eq!(vp.offset(), 91);
        assert_eq!(vp.visible_range(100), 91..100);

        // growing the window pulls the offset back
        vp.on_resize(geometry(30), 100);
        assert_eq!(vp.offset(), 71);
    }

    #[test]
    fn test_resize_clamp_invariant() {
        for total in 0..40usize {
            for height in 0..25u16 {
                for start in [0usize, 1, 5, 17, 39, 1000] {
                    let mut vp = sized(25, total);
                    vp.offset = start;
                    vp.on_resize(geometry(height), total);
                    let visible = vp.visible_rows();
                    assert!(
                        vp.offset() <= (total + 1).saturating_sub(visible),
                        "total={total} height={height} start={start} offset={}",
                        vp.offset()
                    );
                }
            }
        }
    }

    #[test]
    fn test_offset_survives_resize_when_it_fits() {
        let mut vp = sized(10, 100);
        vp.scroll_by(40, 100);
        vp.on_resize(geometry(12), 100);
        assert_eq!(vp.offset(), 40);
    }

    #[test]
    fn test_scroll_up_saturates() {
        let mut vp = sized(10, 100);
        vp.scroll_by(3, 100);
        vp.scroll_by(-10, 100);
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_wheel() {
        let mut vp = sized(10, 100).with_wheel_step(3);
        vp.on_wheel(ScrollDirection::Down, 2, 100);
        assert_eq!(vp.offset(), 6);
        vp.on_wheel(ScrollDirection::Up, 1, 100);
        assert_eq!(vp.offset(), 3);
        vp.on_wheel(ScrollDirection::Down, 1000, 100);
        assert_eq!(vp.offset(), 91);
    }

    #[test]
    fn test_pointer_drag_in_rows() {
        let mut vp = ViewportState::new();
        vp.on_resize(
            Geometry {
                row_height: 10,
                ..geometry(100)
            },
            100,
        );
        vp.on_pointer_drag(35, 100);
        assert_eq!(vp.offset(), 3);
        vp.on_pointer_drag(-9, 100);
        assert_eq!(vp.offset(), 3);
        vp.on_pointer_drag(-20, 100);
        assert_eq!(vp.offset(), 1);
    }

    #[test]
    fn test_pages() {
        let mut vp = sized(10, 100);
        vp.page_down(100);
        assert_eq!(vp.offset(), 10);
        vp.half_page_down(100);
        assert_eq!(vp.offset(), 15);
        vp.half_page_up(100);
        vp.page_up(100);
        assert_eq!(vp.offset(), 0);
        vp.scroll_to_end(100);
        assert_eq!(vp.offset(), 91);
        vp.scroll_to_start();
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_thumb_size() {
        let vp = sized(20, 100);
        assert_eq!(vp.scroll_thumb_size(100), 4);
        assert_eq!(vp.scroll_thumb_size(20), 20);
        assert_eq!(vp.scroll_thumb_size(5), 20);
        assert_eq!(vp.scroll_thumb_size(100_000), 1);
    }

    #[test]
    fn test_thumb_size_ignores_offset() {
        let mut vp = sized(20, 100);
        let before = vp.scroll_thumb_size(100);
        vp.scroll_by(50, 100);
        assert_eq!(vp.scroll_thumb_size(100), before);
    }

    #[test]
    fn test_thumb_position_stays_in_track() {
        let mut vp = sized(20, 100);
        assert_eq!(vp.scroll_thumb(100), ScrollThumb { start: 0, len: 4 });
        vp.scroll_by(50, 100);
        assert_eq!(vp.scroll_thumb(100), ScrollThumb { start: 10, len: 4 });
        vp.scroll_to_end(100);
        let thumb = vp.scroll_thumb(100);
        assert!(thumb.end() <= 20);
    }

    #[test]
    fn test_hit_test() {
        let mut vp = sized(20, 100);
        vp.scroll_by(50, 100);
        assert_eq!(vp.hit_test_scrollbar(0, 11, 100), HitTarget::Thumb);
        assert_eq!(vp.hit_test_scrollbar(0, 2, 100), HitTarget::Track);
        assert_eq!(vp.hit_test_scrollbar(5, 2, 100), HitTarget::Content);
        assert_eq!(vp.hit_test_scrollbar(1, 2, 100), HitTarget::Outside);
        assert_eq!(vp.hit_test_scrollbar(0, 25, 100), HitTarget::Outside);
    }

    #[test]
    fn test_track_jump_centres_thumb() {
        let mut vp = sized(20, 100);
        vp.jump_to_track_position(10, 100);
        assert_eq!(vp.offset(), 40);
        vp.jump_to_track_position(0, 100);
        assert_eq!(vp.offset(), 0);
        vp.jump_to_track_position(19, 100);
        assert_eq!(vp.offset(), 81);
    }

    #[test]
    fn test_pan() {
        let mut vp = ViewportState::new();
        vp.pan_by(8, 100, 40);
        assert_eq!(vp.pan(), 8);
        vp.pan_by(1000, 100, 40);
        assert_eq!(vp.pan(), 60);
        vp.pan_by(-100, 100, 40);
        assert_eq!(vp.pan(), 0);
        vp.pan_by(5, 30, 40);
        assert_eq!(vp.pan(), 0);
        vp.pan_by(8, 100, 40);
        vp.reset_pan();
        assert_eq!(vp.pan(), 0);
    }
}
