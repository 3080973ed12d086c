//! Turning a [`LayoutResult`] into drawing commands.
//!
//! Layout never touches pixels. [`paint_layout`] walks a finished layout and
//! issues glyph, line and rectangle commands to a [`SurfacePainter`]
//! implemented by the caller's graphics backend.

use euclid::default::{Point2D, Rect, Size2D};
use palette::Srgba;

use crate::font::FontStyle;
use crate::text::cursor::{cursor_draw_position, selected_range};
use crate::text::layout::LayoutResult;
use crate::text::paint_options::TextPaintOptions;

/// A glyph ready to draw, positioned at its baseline origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionedGlyph {
    /// Index of the source character.
    pub index: usize,
    pub character: char,
    pub position: Point2D<f32>,
}

/// Drawing backend consumed by [`paint_layout`].
///
/// Text color and line thickness are the painter's own state.
pub trait SurfacePainter {
    /// Draws a run of glyphs. `style.skew_x()` gives the italic shear.
    fn draw_glyphs(&mut self, glyphs: &[PositionedGlyph], style: FontStyle);

    /// Draws a straight line, used for underline, strikeout and the caret.
    fn draw_line(&mut self, from: Point2D<f32>, to: Point2D<f32>);

    /// Fills a rectangle, used for selection highlights.
    fn fill_rect(&mut self, rect: Rect<f32>, color: Srgba<u8>);
}

/// Paints `layout` in order: selection, glyphs, decoration lines, caret.
///
/// Options are revalidated against the layout's text before use.
pub fn paint_layout<S: SurfacePainter + ?Sized>(
    layout: &LayoutResult,
    style: FontStyle,
    options: &TextPaintOptions,
    painter: &mut S,
) {
    let mut options = options.clone();
    options.revalidate(layout.letters.len());

    if layout.is_empty() {
        if options.cursor_position().is_some() {
            let origin = layout.bounds.origin;
            painter.draw_line(origin, Point2D::new(origin.x, origin.y + layout.line_height));
        }
        return;
    }

    paint_selection(layout, &options, painter);

    let glyphs: Vec<PositionedGlyph> = layout
        .letters
        .iter()
        .enumerate()
        .filter(|(_, letter)| letter.valid)
        .map(|(index, letter)| PositionedGlyph {
            index,
            character: letter.character,
            position: Point2D::new(letter.position_x, letter.position_y + layout.ascender),
        })
        .collect();
    painter.draw_glyphs(&glyphs, style);

    let decoration = match style {
        FontStyle::Underline => Some(layout.underline_offset.unwrap_or(0.0)),
        FontStyle::Strikeout => Some(layout.strikeout_offset.unwrap_or(0.0)),
        _ => None,
    };
    if let Some(offset) = decoration {
        paint_decoration(layout, offset, painter);
    }

    if let Some(cursor) = options.cursor_position()
        && let Some(top) = cursor_draw_position(layout, cursor)
    {
        painter.draw_line(top, Point2D::new(top.x, top.y + layout.line_height));
    }
}

/// One filled rectangle per run of selected glyphs sharing a line.
fn paint_selection<S: SurfacePainter + ?Sized>(
    layout: &LayoutResult,
    options: &TextPaintOptions,
    painter: &mut S,
) {
    let Some(range) = selected_range(layout, options) else {
        return;
    };

    // (line index, top, left, right)
    let mut run: Option<(usize, f32, f32, f32)> = None;
    let flush = |run: Option<(usize, f32, f32, f32)>, painter: &mut S| {
        if let Some((_, top, left, right)) = run {
            painter.fill_rect(
                Rect::new(
                    Point2D::new(left, top),
                    Size2D::new(right - left, layout.line_height),
                ),
                options.selection_color,
            );
        }
    };

    for letter in &layout.letters[range] {
        if !letter.valid {
            continue;
        }
        let right = letter.position_x + letter.advance;
        run = match run {
            Some((line, top, left, _)) if line == letter.line_index => {
                Some((line, top, left, right))
            }
            previous => {
                flush(previous, painter);
                Some((letter.line_index, letter.position_y, letter.position_x, right))
            }
        };
    }
    flush(run, painter);
}

/// Underline or strikeout, once per line from its first glyph over the line width.
fn paint_decoration<S: SurfacePainter + ?Sized>(
    layout: &LayoutResult,
    offset: f32,
    painter: &mut S,
) {
    for (line_index, line) in layout.lines.iter().enumerate() {
        let Some((_, first)) = layout.visible_letters_on_line(line_index).next() else {
            continue;
        };
        let y = first.position_y + layout.ascender + offset;
        painter.draw_line(
            Point2D::new(first.position_x, y),
            Point2D::new(first.position_x + line.width, y),
        );
    }
}

/// A command captured by [`RecordingPainter`].
#[derive(Clone, Debug, PartialEq)]
pub enum PaintCommand {
    Glyphs {
        glyphs: Vec<PositionedGlyph>,
        style: FontStyle,
    },
    Line {
        from: Point2D<f32>,
        to: Point2D<f32>,
    },
    FillRect {
        rect: Rect<f32>,
        color: Srgba<u8>,
    },
}

/// Painter that stores every command, for debugging and tests.
#[derive(Clone, Debug, Default)]
pub struct RecordingPainter {
    pub commands: Vec<PaintCommand>,
}

impl RecordingPainter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> impl Iterator<Item = (Point2D<f32>, Point2D<f32>)> + '_ {
        self.commands.iter().filter_map(|command| match command {
            PaintCommand::Line { from, to } => Some((*from, *to)),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = Rect<f32>> + '_ {
        self.commands.iter().filter_map(|command| match command {
            PaintCommand::FillRect { rect, .. } => Some(*rect),
            _ => None,
        })
    }
}

impl SurfacePainter for RecordingPainter {
    fn draw_glyphs(&mut self, glyphs: &[PositionedGlyph], style: FontStyle) {
        self.commands.push(PaintCommand::Glyphs {
            glyphs: glyphs.to_vec(),
            style,
        });
    }

    fn draw_line(&mut self, from: Point2D<f32>, to: Point2D<f32>) {
        self.commands.push(PaintCommand::Line { from, to });
    }

    fn fill_rect(&mut self, rect: Rect<f32>, color: Srgba<u8>) {
        self.commands.push(PaintCommand::FillRect { rect, color });
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_cache::FontMetricsCache;
    use crate::test_font::{TestMetrics, test_font};
    use crate::text::flags::TextFormatFlags;
    use crate::text::layout::{LayoutEngine, bounds_from_size};

    fn layout(text: &str, width: f32) -> LayoutResult {
        layout_with(text, width, TextFormatFlags::NO_PADDING)
    }

    fn layout_with(text: &str, width: f32, flags: TextFormatFlags) -> LayoutResult {
        let cache = FontMetricsCache::new();
        let provider = TestMetrics::new();
        let bounds = bounds_from_size(Size2D::new(width, 100.0));
        LayoutEngine::new(&cache, &provider).layout(text, &test_font(), bounds, flags)
    }

    fn paint(
        layout: &LayoutResult,
        style: FontStyle,
        options: &TextPaintOptions,
    ) -> RecordingPainter {
        let mut painter = RecordingPainter::new();
        paint_layout(layout, style, options, &mut painter);
        painter
    }

    #[test]
    fn test_glyphs_are_drawn_on_the_baseline() {
        let layout = layout("a\u{feff}b", 100.0);
        let painter = paint(&layout, FontStyle::Regular, &TextPaintOptions::new());

        let PaintCommand::Glyphs { glyphs, style } = &painter.commands[0] else {
            panic!("expected glyphs first, got {:?}", painter.commands);
        };
        assert_eq!(*style, FontStyle::Regular);
        assert_eq!(glyphs.len(), 2);
        assert_eq!(glyphs[0].position, Point2D::new(0.0, 17.0));
        assert_eq!(glyphs[1].index, 2);
        assert_eq!(glyphs[1].position, Point2D::new(10.0, 17.0));
        assert_eq!(painter.lines().count(), 0);
    }

    #[test]
    fn test_selection_merges_runs_per_line() {
        let layout = layout("abc def", 40.0);
        let options = TextPaintOptions::new().with_selection(-1, 6);
        let painter = paint(&layout, FontStyle::Regular, &options);

        let rects: Vec<_> = painter.rects().collect();
        assert_eq!(
            rects,
            vec![
                Rect::new(Point2D::new(0.0, 0.0), Size2D::new(40.0, 20.0)),
                Rect::new(Point2D::new(0.0, 20.0), Size2D::new(20.0, 20.0)),
            ]
        );
        let PaintCommand::FillRect { color, .. } = &painter.commands[0] else {
            panic!("expected the selection first, got {:?}", painter.commands);
        };
        assert_eq!(*color, TextPaintOptions::DEFAULT_SELECTION_COLOR);
    }

    #[test]
    fn test_selection_follows_external_leading() {
        let flags = TextFormatFlags::NO_PADDING | TextFormatFlags::EXTERNAL_LEADING;
        let layout = layout_with("ab\ncd", 100.0, flags);
        let options = TextPaintOptions::new().with_selection(0, 4);
        let painter = paint(&layout, FontStyle::Regular, &options);

        let rects: Vec<_> = painter.rects().collect();
        assert_eq!(
            rects,
            vec![
                Rect::new(Point2D::new(0.0, 2.0), Size2D::new(20.0, 20.0)),
                Rect::new(Point2D::new(0.0, 22.0), Size2D::new(10.0, 20.0)),
            ]
        );
    }

    #[test]
    fn test_underline_once_per_line() {
        let layout = layout("ab\ncde", 100.0);
        let painter = paint(&layout, FontStyle::Underline, &TextPaintOptions::new());
        let lines: Vec<_> = painter.lines().collect();
        assert_eq!(
            lines,
            vec![
                (Point2D::new(0.0, 19.0), Point2D::new(20.0, 19.0)),
                (Point2D::new(0.0, 39.0), Point2D::new(30.0, 39.0)),
            ]
        );
    }

    #[test]
    fn test_strikeout_uses_strikeout_offset() {
        let layout = layout("ab", 100.0);
        let painter = paint(&layout, FontStyle::Strikeout, &TextPaintOptions::new());
        let lines: Vec<_> = painter.lines().collect();
        assert_eq!(lines, vec![(Point2D::new(0.0, 11.0), Point2D::new(20.0, 11.0))]);
    }

    #[test]
    fn test_caret_is_drawn_last() {
        let layout = layout("ab", 100.0);
        let painter = paint(&layout, FontStyle::Regular, &TextPaintOptions::new().with_cursor(0));
        assert_eq!(
            painter.commands.last(),
            Some(&PaintCommand::Line {
                from: Point2D::new(10.0, 0.0),
                to: Point2D::new(10.0, 20.0),
            })
        );
    }

    #[test]
    fn test_caret_for_empty_text() {
        let layout = layout("", 100.0);
        let painter = paint(&layout, FontStyle::Regular, &TextPaintOptions::new().with_cursor(3));
        assert_eq!(
            painter.commands,
            vec![PaintCommand::Line {
                from: Point2D::new(0.0, 0.0),
                to: Point2D::new(0.0, 20.0),
            }]
        );

        let painter = paint(&layout, FontStyle::Regular, &TextPaintOptions::new());
        assert!(painter.commands.is_empty());
    }
}
