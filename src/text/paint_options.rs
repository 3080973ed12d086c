use std::ops::Range;

use palette::Srgba;

/// Selection and caret state handed to the painter.
///
/// Indices use the caret convention of the hit-tester: `-1` is "before the
/// first character", `i` is "between character `i` and `i + 1`". Every
/// mutation clamps indices to `>= -1` and keeps `selection_start <=
/// selection_end` when both are set. Clamping against the text length only
/// happens in [`TextPaintOptions::revalidate`], which callers run whenever
/// the bound text changes.
#[derive(Clone, Debug, PartialEq)]
pub struct TextPaintOptions {
    selection_start: Option<isize>,
    selection_end: Option<isize>,
    cursor_position: Option<isize>,
    pub selection_color: Srgba<u8>,
}

impl Default for TextPaintOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl TextPaintOptions {
    /// Windows text box selection blue.
    pub const DEFAULT_SELECTION_COLOR: Srgba<u8> = Srgba::new(0, 120, 215, 255);

    pub fn new() -> Self {
        Self {
            selection_start: None,
            selection_end: None,
            cursor_position: None,
            selection_color: Self::DEFAULT_SELECTION_COLOR,
        }
    }

    pub fn with_selection(mut self, start: isize, end: isize) -> Self {
        self.selection_start = Some(start);
        self.selection_end = Some(end);
        self.normalize(None);
        self
    }

    pub fn with_cursor(mut self, position: isize) -> Self {
        self.set_cursor_position(Some(position));
        self
    }

    pub fn selection_start(&self) -> Option<isize> {
        self.selection_start
    }

    pub fn selection_end(&self) -> Option<isize> {
        self.selection_end
    }

    pub fn cursor_position(&self) -> Option<isize> {
        self.cursor_position
    }

    pub fn set_selection_start(&mut self, value: Option<isize>) {
        self.selection_start = value;
        self.normalize(None);
    }

    pub fn set_selection_end(&mut self, value: Option<isize>) {
        self.selection_end = value;
        self.normalize(None);
    }

    pub fn set_cursor_position(&mut self, value: Option<isize>) {
        self.cursor_position = value;
        self.normalize(None);
    }

    /// Re-clamps every index against a new text of `text_len` characters.
    pub fn revalidate(&mut self, text_len: usize) {
        self.normalize(Some(text_len));
    }

    pub fn clear(&mut self) {
        self.selection_start = None;
        self.selection_end = None;
        self.cursor_position = None;
    }

    /// Character indices flagged as selected, `start..end` with `end` exclusive.
    ///
    /// `None` when either bound is unset or the range is empty.
    pub fn selection_range(&self) -> Option<Range<usize>> {
        let (start, end) = (self.selection_start?, self.selection_end?);
        let start = start.max(0) as usize;
        let end = end.max(0) as usize;
        (start < end).then_some(start..end)
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selection_range()
            .is_some_and(|range| range.contains(&index))
    }

    fn normalize(&mut self, text_len: Option<usize>) {
        let clamp = |value: &mut Option<isize>| {
            if let Some(v) = value.as_mut() {
                if *v < -1 {
                    *v = -1;
                } else if let Some(len) = text_len
                    && *v > len as isize - 1
                {
                    *v = len as isize - 1;
                }
            }
        };

        clamp(&mut self.cursor_position);
        clamp(&mut self.selection_start);
        clamp(&mut self.selection_end);

        if let (Some(start), Some(end)) = (self.selection_start, self.selection_end)
            && start > end
        {
            self.selection_start = Some(end);
            self.selection_end = Some(start);
        }
    }
}
