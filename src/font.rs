use crate::font_key::FontKey;

/// Rendering style requested for a run of text.
///
/// Only `Italic`, `Underline` and `Strikeout` change what the painter emits;
/// `Bold` is expected to be expressed through the face itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontStyle {
    #[default]
    Regular,
    Bold,
    Italic,
    Underline,
    Strikeout,
}

impl FontStyle {
    /// Horizontal skew the painter should apply to glyphs of this style.
    pub fn skew_x(&self) -> f32 {
        match self {
            FontStyle::Italic => -0.4,
            _ => 0.0,
        }
    }
}

/// A typeface at a given pixel size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Font {
    /// Face identifier inside the font database.
    pub face: fontdb::ID,
    /// Size of the font in pixels.
    pub size: f32,
    pub style: FontStyle,
}

impl Font {
    pub fn new(face: fontdb::ID, size: f32) -> Self {
        Self {
            face,
            size,
            style: FontStyle::Regular,
        }
    }

    pub fn with_style(mut self, style: FontStyle) -> Self {
        self.style = style;
        self
    }

    /// Key of the metrics cache entry this font resolves to.
    pub fn key(&self) -> FontKey {
        FontKey::new(self.face, self.size)
    }
}
