bitflags::bitflags! {
    /// Formatting switches accepted by the public entry points.
    ///
    /// Values with no bit set (`LEFT`, `TOP`, `GLYPH_OVERHANG_PADDING`) are the
    /// defaults. Flags are folded into a [`FormatPolicy`] before layout so that
    /// conflicting bits resolve in one place.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TextFormatFlags: u32 {
        const LEFT = 0;
        const TOP = 0;
        const GLYPH_OVERHANG_PADDING = 0;
        const HORIZONTAL_CENTER = 1;
        const RIGHT = 1 << 1;
        const VERTICAL_CENTER = 1 << 2;
        const BOTTOM = 1 << 3;
        /// Break lines at word boundaries instead of between any two characters.
        const WORD_BREAK = 1 << 4;
        /// Ignore newlines and never wrap.
        const SINGLE_LINE = 1 << 5;
        /// Never wrap; newlines still break.
        const NO_CLIPPING = 1 << 8;
        /// Shift glyphs down by the font's external leading.
        const EXTERNAL_LEADING = 1 << 9;
        const NO_PADDING = 1 << 28;
        const LEFT_AND_RIGHT_PADDING = 1 << 29;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Horizontal justification applied after each line is assembled.
pub enum HorizontalAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Vertical alignment strategy for the entire block of text.
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Wrapping rules that define where line breaks may occur.
pub enum WrapStyle {
    NoWrap,
    WordWrap,
    #[default]
    CharWrap,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Horizontal room reserved around the text for overhanging ink.
pub enum PaddingMode {
    None,
    LeftAndRight,
    #[default]
    GlyphOverhang,
}

impl PaddingMode {
    /// Left padding for a font with the given line spacing.
    pub fn left(&self, line_spacing: f32) -> f32 {
        match self {
            PaddingMode::None => 0.0,
            PaddingMode::LeftAndRight => (line_spacing / 6.0 * 2.0).ceil(),
            PaddingMode::GlyphOverhang => (line_spacing / 6.0).ceil(),
        }
    }

    /// Right padding for a font with the given line spacing.
    pub fn right(&self, line_spacing: f32) -> f32 {
        match self {
            PaddingMode::None => 0.0,
            PaddingMode::LeftAndRight => (line_spacing / 6.0 * 2.5).ceil(),
            PaddingMode::GlyphOverhang => (line_spacing / 6.0 * 1.5).ceil(),
        }
    }
}

/// Resolved layout policy, one independent choice per concern.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FormatPolicy {
    pub horizontal_align: HorizontalAlign,
    pub vertical_align: VerticalAlign,
    pub wrap_style: WrapStyle,
    pub padding: PaddingMode,
    /// Newlines are recorded but do not start a new line.
    pub single_line: bool,
    pub external_leading: bool,
}

impl FormatPolicy {
    /// Whether width-driven line breaks may happen at all.
    pub fn wraps(&self) -> bool {
        !matches!(self.wrap_style, WrapStyle::NoWrap)
    }
}

impl From<TextFormatFlags> for FormatPolicy {
    fn from(flags: TextFormatFlags) -> Self {
        // Center wins over right, and vertical center over bottom.
        let horizontal_align = if flags.contains(TextFormatFlags::HORIZONTAL_CENTER) {
            HorizontalAlign::Center
        } else if flags.contains(TextFormatFlags::RIGHT) {
            HorizontalAlign::Right
        } else {
            HorizontalAlign::Left
        };

        let vertical_align = if flags.contains(TextFormatFlags::VERTICAL_CENTER) {
            VerticalAlign::Middle
        } else if flags.contains(TextFormatFlags::BOTTOM) {
            VerticalAlign::Bottom
        } else {
            VerticalAlign::Top
        };

        let no_wrap = TextFormatFlags::NO_CLIPPING | TextFormatFlags::SINGLE_LINE;
        let wrap_style = if flags.intersects(no_wrap) {
            WrapStyle::NoWrap
        } else if flags.contains(TextFormatFlags::WORD_BREAK) {
            WrapStyle::WordWrap
        } else {
            WrapStyle::CharWrap
        };

        let padding = if flags.contains(TextFormatFlags::NO_PADDING) {
            PaddingMode::None
        } else if flags.contains(TextFormatFlags::LEFT_AND_RIGHT_PADDING) {
            PaddingMode::LeftAndRight
        } else {
            PaddingMode::GlyphOverhang
        };

        Self {
            horizontal_align,
            vertical_align,
            wrap_style,
            padding,
            single_line: flags.contains(TextFormatFlags::SINGLE_LINE),
            external_leading: flags.contains(TextFormatFlags::EXTERNAL_LEADING),
        }
    }
}
