use euclid::default::{Point2D, Rect, Size2D};

use crate::font::Font;
use crate::font_cache::FontMetricsCache;
use crate::metrics::FontMetricsProvider;
use crate::text::flags::{FormatPolicy, HorizontalAlign, TextFormatFlags, VerticalAlign};
use crate::text::line_breaker::{self, LetterInfo, WrappedText};

/// A single visual line of a [`LayoutResult`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextLine {
    /// Width without trailing whitespace.
    pub width: f32,
    /// Alignment offset inside the bounds; `0.0` for measurement-only results.
    pub offset_x: f32,
}

/// Final layout output produced by [`LayoutEngine::layout`].
///
/// **Y-axis goes down.** Letter positions are absolute: bounds origin,
/// alignment, padding and external leading are already applied, so painters
/// and hit-testing can use them directly.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutResult {
    pub content_size: Size2D<f32>,
    pub lines: Vec<TextLine>,
    /// One entry per input `char`.
    pub letters: Vec<LetterInfo>,
    pub line_height: f32,
    /// Distance from a line's top to its baseline.
    pub ascender: f32,
    /// Baseline-relative underline offset, if the font declares one.
    pub underline_offset: Option<f32>,
    /// Baseline-relative strikeout offset, if the font declares one.
    pub strikeout_offset: Option<f32>,
    pub bounds: Rect<f32>,
    /// Top of the first line after vertical alignment.
    pub text_top: f32,
}

impl LayoutResult {
    fn empty(bounds: Rect<f32>, line_height: f32, ascender: f32) -> Self {
        Self {
            content_size: Size2D::zero(),
            lines: Vec::new(),
            letters: Vec::new(),
            line_height,
            ascender,
            underline_offset: None,
            strikeout_offset: None,
            bounds,
            text_top: bounds.origin.y,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Total height of the text block, `lines.len() * line_height`.
    pub fn text_height(&self) -> f32 {
        self.lines.len() as f32 * self.line_height
    }

    /// Letters of line `line_index` that have a glyph, with their source indices.
    pub fn visible_letters_on_line(
        &self,
        line_index: usize,
    ) -> impl Iterator<Item = (usize, &LetterInfo)> {
        self.letters
            .iter()
            .enumerate()
            .filter(move |(_, letter)| letter.valid && letter.line_index == line_index)
    }
}

/// Measures and positions text using a shared metrics cache.
///
/// The engine itself holds no per-call state: every `measure` or `layout`
/// call builds its own working data, so one engine (and one cache) can serve
/// several threads at once.
pub struct LayoutEngine<'a, P: FontMetricsProvider + ?Sized> {
    cache: &'a FontMetricsCache,
    provider: &'a P,
}

impl<'a, P: FontMetricsProvider + ?Sized> LayoutEngine<'a, P> {
    pub fn new(cache: &'a FontMetricsCache, provider: &'a P) -> Self {
        Self { cache, provider }
    }

    /// Computes the size `text` needs when wrapped at `max_line_width`.
    ///
    /// A width of zero or less means unconstrained. The result includes the
    /// left and right padding selected by `flags`.
    pub fn measure(
        &self,
        text: &str,
        font: &Font,
        max_line_width: f32,
        flags: TextFormatFlags,
    ) -> Size2D<f32> {
        if text.is_empty() {
            return Size2D::zero();
        }

        let policy = FormatPolicy::from(flags);
        let (wrapped, padding) = self.wrap(text, font, max_line_width, &policy);
        content_size(&wrapped, padding)
    }

    /// Lays `text` out inside `bounds`.
    ///
    /// Lines wrap at the bounds width minus padding. Horizontal alignment is
    /// applied per line, vertical alignment to the block as a whole.
    pub fn layout(
        &self,
        text: &str,
        font: &Font,
        bounds: Rect<f32>,
        flags: TextFormatFlags,
    ) -> LayoutResult {
        let policy = FormatPolicy::from(flags);
        let metrics = self.cache.get(font, self.provider);

        if text.is_empty() {
            return LayoutResult::empty(bounds, metrics.line_spacing(), metrics.ascender());
        }

        let line_spacing = metrics.line_spacing();
        let left_padding = policy.padding.left(line_spacing);
        let right_padding = policy.padding.right(line_spacing);
        let max_line_width = bounds.size.width - left_padding - right_padding;

        let (wrapped, padding) = self.wrap(text, font, max_line_width, &policy);
        let content_size = content_size(&wrapped, padding);

        let lines: Vec<TextLine> = wrapped
            .line_widths
            .iter()
            .map(|&width| TextLine {
                width,
                offset_x: match policy.horizontal_align {
                    HorizontalAlign::Left => 0.0,
                    HorizontalAlign::Center => (bounds.size.width - width) / 2.0,
                    HorizontalAlign::Right => bounds.size.width - width,
                },
            })
            .collect();

        let vertical_offset = match policy.vertical_align {
            VerticalAlign::Top => 0.0,
            VerticalAlign::Middle => (bounds.size.height - wrapped.desired_height) / 2.0,
            VerticalAlign::Bottom => bounds.size.height - wrapped.desired_height,
        };

        // Centering already spends the free space, padding would count twice.
        let padding_x = if matches!(policy.horizontal_align, HorizontalAlign::Center) {
            0.0
        } else {
            left_padding
        };
        let leading_y = if policy.external_leading {
            metrics.external_leading()
        } else {
            0.0
        };

        let origin = bounds.origin;
        let mut letters = wrapped.letters;
        for letter in &mut letters {
            let offset_x = lines
                .get(letter.line_index)
                .map(|line| line.offset_x)
                .unwrap_or(0.0);
            letter.position_x += offset_x + origin.x + padding_x;
            letter.position_y += vertical_offset + origin.y + leading_y;
        }

        LayoutResult {
            content_size,
            lines,
            letters,
            line_height: wrapped.line_height,
            ascender: metrics.ascender(),
            underline_offset: metrics.underline_offset(),
            strikeout_offset: metrics.strikeout_offset(),
            bounds,
            text_top: origin.y + vertical_offset,
        }
    }

    /// Prepares the cache for `text` and runs the line breaker.
    ///
    /// Returns the wrapped text and the `(left, right)` padding.
    fn wrap(
        &self,
        text: &str,
        font: &Font,
        max_line_width: f32,
        policy: &FormatPolicy,
    ) -> (WrappedText, (f32, f32)) {
        let metrics = self.cache.get(font, self.provider);
        metrics.prepare(text, self.provider);

        let chars: Vec<char> = text.chars().collect();
        let wrapped = line_breaker::wrap(&chars, &metrics, max_line_width, policy);

        let line_spacing = metrics.line_spacing();
        let padding = (
            policy.padding.left(line_spacing),
            policy.padding.right(line_spacing),
        );
        (wrapped, padding)
    }
}

fn content_size(wrapped: &WrappedText, (left, right): (f32, f32)) -> Size2D<f32> {
    Size2D::new(wrapped.longest_line() + left + right, wrapped.desired_height)
}

/// Rectangle of the given size anchored at the origin.
pub fn bounds_from_size(size: Size2D<f32>) -> Rect<f32> {
    Rect::new(Point2D::origin(), size)
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_font::{HELLO, TestMetrics, test_font};

    fn engine_parts() -> (FontMetricsCache, TestMetrics) {
        (FontMetricsCache::new(), TestMetrics::new())
    }

    #[test]
    fn test_measure_empty_text() {
        let (cache, provider) = engine_parts();
        let engine = LayoutEngine::new(&cache, &provider);
        let size = engine.measure("", &test_font(), 0.0, TextFormatFlags::default());
        assert_eq!(size, Size2D::zero());
    }

    #[test]
    fn test_measure_single_line_with_default_padding() {
        let (cache, provider) = engine_parts();
        let engine = LayoutEngine::new(&cache, &provider);
        let size = engine.measure(HELLO, &test_font(), 0.0, TextFormatFlags::default());
        // 170 of glyphs, 4 left and 5 right padding
        assert_eq!(size, Size2D::new(179.0, 20.0));

        let no_padding = engine.measure(HELLO, &test_font(), 0.0, TextFormatFlags::NO_PADDING);
        assert_eq!(no_padding, Size2D::new(170.0, 20.0));
    }

    #[test]
    fn test_measure_is_idempotent() {
        let (cache, provider) = engine_parts();
        let engine = LayoutEngine::new(&cache, &provider);
        let flags = TextFormatFlags::WORD_BREAK;
        let first = engine.measure(HELLO, &test_font(), 71.0, flags);
        let second = engine.measure(HELLO, &test_font(), 71.0, flags);
        assert_eq!(first, second);
        assert_eq!(provider.calls(), 1);
    }

    #[test]
    fn test_negative_width_is_unconstrained() {
        let (cache, provider) = engine_parts();
        let engine = LayoutEngine::new(&cache, &provider);
        let unconstrained = engine.measure(HELLO, &test_font(), 0.0, TextFormatFlags::WORD_BREAK);
        let negative = engine.measure(HELLO, &test_font(), -10.0, TextFormatFlags::WORD_BREAK);
        assert_eq!(unconstrained, negative);
    }

    #[test]
    fn test_layout_matches_measure() {
        let (cache, provider) = engine_parts();
        let engine = LayoutEngine::new(&cache, &provider);
        for flags in [
            TextFormatFlags::default(),
            TextFormatFlags::WORD_BREAK,
            TextFormatFlags::LEFT_AND_RIGHT_PADDING | TextFormatFlags::RIGHT,
            TextFormatFlags::HORIZONTAL_CENTER | TextFormatFlags::VERTICAL_CENTER,
        ] {
            let size = engine.measure(HELLO, &test_font(), 0.0, flags);
            let layout = engine.layout(HELLO, &test_font(), bounds_from_size(size), flags);
            assert_eq!(layout.content_size, size, "{flags:?}");
        }
    }

    #[test]
    fn test_layout_covers_every_character() {
        let (cache, provider) = engine_parts();
        let engine = LayoutEngine::new(&cache, &provider);
        let text = "line one\r\nline\u{8}two 你好\u{feff}";
        let layout = engine.layout(
            text,
            &test_font(),
            Rect::new(Point2D::new(5.0, 5.0), Size2D::new(60.0, 200.0)),
            TextFormatFlags::WORD_BREAK,
        );
        assert_eq!(layout.letters.len(), text.chars().count());
        for (letter, ch) in layout.letters.iter().zip(text.chars()) {
            assert_eq!(letter.character, ch);
            assert!(letter.line_index < layout.lines.len());
        }
    }

    #[test]
    fn test_layout_empty_text() {
        let (cache, provider) = engine_parts();
        let engine = LayoutEngine::new(&cache, &provider);
        let bounds = Rect::new(Point2D::new(3.0, 4.0), Size2D::new(10.0, 10.0));
        let layout = engine.layout("", &test_font(), bounds, TextFormatFlags::default());
        assert!(layout.is_empty());
        assert!(layout.lines.is_empty());
        assert_eq!(layout.content_size, Size2D::zero());
        assert_eq!(layout.line_height, 20.0);
        assert_eq!(layout.text_top, 4.0);
    }

    #[test]
    fn test_word_break_with_vertical_center() {
        let (cache, provider) = engine_parts();
        let engine = LayoutEngine::new(&cache, &provider);
        let flags = TextFormatFlags::VERTICAL_CENTER | TextFormatFlags::WORD_BREAK;
        let bounds = Rect::new(Point2D::origin(), Size2D::new(80.0, 100.0));
        let layout = engine.layout(HELLO, &test_font(), bounds, flags);

        assert_eq!(layout.lines.len(), 3);
        assert_eq!(layout.content_size.height, layout.lines.len() as f32 * layout.line_height);
        assert_eq!(layout.content_size.width, 69.0);
        assert_eq!(layout.text_top, 20.0);

        // "world!" starts the third line, after the left padding
        let w = layout.letters[10];
        assert_eq!(w.character, 'w');
        assert_eq!(w.line_index, 2);
        assert_eq!(w.position_x, 4.0);
        assert_eq!(w.position_y, 60.0);
    }

    #[test]
    fn test_horizontal_alignment_offsets() {
        let (cache, provider) = engine_parts();
        let engine = LayoutEngine::new(&cache, &provider);
        let bounds = Rect::new(Point2D::new(10.0, 0.0), Size2D::new(100.0, 40.0));

        let right = engine.layout("ab\nc", &test_font(), bounds, TextFormatFlags::RIGHT);
        assert_eq!(right.lines[0].offset_x, 80.0);
        assert_eq!(right.lines[1].offset_x, 90.0);
        // bounds x + offset + left padding
        assert_eq!(right.letters[0].position_x, 94.0);

        let center = engine.layout(
            "ab\nc",
            &test_font(),
            bounds,
            TextFormatFlags::HORIZONTAL_CENTER,
        );
        assert_eq!(center.lines[0].offset_x, 40.0);
        assert_eq!(center.letters[0].position_x, 50.0);
        assert_eq!(center.letters[3].position_x, 55.0);
    }

    #[test]
    fn test_bottom_alignment_and_external_leading() {
        let (cache, provider) = engine_parts();
        let engine = LayoutEngine::new(&cache, &provider);
        let bounds = Rect::new(Point2D::origin(), Size2D::new(100.0, 50.0));

        let bottom = engine.layout("ab", &test_font(), bounds, TextFormatFlags::BOTTOM);
        assert_eq!(bottom.text_top, 30.0);
        assert_eq!(bottom.letters[0].position_y, 30.0);

        let leading = engine.layout("ab", &test_font(), bounds, TextFormatFlags::EXTERNAL_LEADING);
        assert_eq!(leading.letters[0].position_y, 2.0);
        assert_eq!(leading.text_top, 0.0);
    }

    #[test]
    fn test_concurrent_layouts_do_not_interfere() {
        let (cache, provider) = engine_parts();
        let engine = LayoutEngine::new(&cache, &provider);
        let run_a = || {
            engine.layout(
                "aaaa bbbb",
                &test_font(),
                bounds_from_size(Size2D::new(60.0, 100.0)),
                TextFormatFlags::WORD_BREAK,
            )
        };
        let run_b = || {
            engine.layout(
                HELLO,
                &test_font(),
                bounds_from_size(Size2D::new(300.0, 100.0)),
                TextFormatFlags::RIGHT,
            )
        };
        let expected_a = run_a();
        let expected_b = run_b();

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..50 {
                        assert_eq!(run_a(), expected_a);
                        assert_eq!(run_b(), expected_b);
                    }
                });
            }
        });
    }
}
