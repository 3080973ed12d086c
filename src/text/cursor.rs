//! Mapping between points and caret indices.
//!
//! A caret index `i` sits between character `i` and `i + 1`; `-1` is the
//! position before the first character.

use std::ops::Range;

use euclid::default::Point2D;

use crate::text::layout::LayoutResult;
use crate::text::paint_options::TextPaintOptions;

/// Returns the caret index closest to `point`, or `-1`.
///
/// The line is picked by truncating `(point.y - text_top) / line_height`
/// toward zero, so a point a little above the first line still hits it.
/// Points whose line does not exist yield `-1`. Within the line a click
/// left of a glyph's midpoint lands before the glyph, right of it after
/// the glyph; a click past the last glyph snaps to the line end. On a line
/// without glyphs the caret lands after the line break that opened it.
pub fn cursor_from_point(layout: &LayoutResult, point: Point2D<f32>) -> isize {
    if layout.is_empty() || layout.line_height <= 0.0 {
        return -1;
    }

    let relative = (point.y - layout.text_top) / layout.line_height;
    if !relative.is_finite() {
        return -1;
    }
    let line = relative.trunc();
    if line < 0.0 || line >= layout.lines.len() as f32 {
        return -1;
    }
    let line = line as usize;

    let mut last_on_line = None;
    for (index, letter) in layout.visible_letters_on_line(line) {
        let before = index as isize - 1;

        if point.x <= letter.position_x {
            return before;
        }

        if point.x <= letter.position_x + letter.advance {
            return if point.x <= letter.position_x + letter.advance / 2.0 {
                before
            } else {
                index as isize
            };
        }

        last_on_line = Some(index as isize);
    }

    match last_on_line {
        Some(index) => index,
        // A blank line: the caret goes right after the newline that opened it.
        None => layout
            .letters
            .iter()
            .position(|letter| letter.line_index >= line)
            .map_or(layout.letters.len() as isize - 1, |first| first as isize - 1),
    }
}

/// Top end of the caret for `index`; the caret spans one `line_height` down.
///
/// The caret is drawn at the left edge of character `index + 1`, or right
/// after the last character when `index` addresses it. `None` for an empty
/// layout or an index outside `-1..len`.
pub fn cursor_draw_position(layout: &LayoutResult, index: isize) -> Option<Point2D<f32>> {
    let len = layout.letters.len() as isize;
    if len == 0 || index < -1 || index >= len {
        return None;
    }

    if index == len - 1 {
        let letter = layout.letters.last()?;
        return Some(Point2D::new(letter.position_x + letter.advance, letter.position_y));
    }

    let next = layout.letters.get((index + 1) as usize)?;
    Some(Point2D::new(next.position_x, next.position_y))
}

/// Character indices the painter should flag as selected.
///
/// Options are revalidated against the layout's text length first, so stale
/// indices from a longer text select nothing beyond the end.
pub fn selected_range(layout: &LayoutResult, options: &TextPaintOptions) -> Option<Range<usize>> {
    let mut options = options.clone();
    options.revalidate(layout.letters.len());
    options.selection_range()
}
