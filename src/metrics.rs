use crate::font::Font;

/// Glyph existence and advance for one character at one (typeface, size).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FontLetterDefinition {
    /// `false` when the font has no glyph for the character.
    pub valid_definition: bool,
    /// Horizontal distance to the next character's origin.
    pub advance_x: f32,
}

impl FontLetterDefinition {
    pub fn valid(advance_x: f32) -> Self {
        Self {
            valid_definition: true,
            advance_x,
        }
    }

    pub fn invalid() -> Self {
        Self::default()
    }
}

/// Source of glyph and line metrics.
///
/// Layout never touches font files; everything it knows about a face comes
/// through this trait. Implementations must be callable from several threads
/// at once because a [`crate::font_cache::FontMetricsCache`] may be shared.
pub trait FontMetricsProvider: Send + Sync {
    /// Resolves glyph existence and advance width for every character, in order.
    ///
    /// The returned vector must have the same length as `characters`.
    fn resolve(&self, font: &Font, characters: &[char]) -> Vec<FontLetterDefinition>;

    /// Distance from the top of a line to the baseline.
    fn ascender(&self, font: &Font) -> f32;

    /// Height of one line of text.
    fn line_spacing(&self, font: &Font) -> f32;

    /// Extra leading the font recommends between lines.
    fn external_leading(&self, _font: &Font) -> f32 {
        0.0
    }

    /// Baseline-relative offset of the underline, if the font declares one.
    fn underline_offset(&self, _font: &Font) -> Option<f32> {
        None
    }

    /// Baseline-relative offset of the strikeout line, if the font declares one.
    fn strikeout_offset(&self, _font: &Font) -> Option<f32> {
        None
    }
}
