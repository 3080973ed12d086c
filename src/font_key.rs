/// Fixed-point scale applied to font sizes inside a [`FontKey`].
///
/// Sizes keep two decimal digits; anything finer is truncated so that
/// `12.0` and `12.000001` share one cache entry.
pub const SIZE_QUANTIZE: f32 = 100f32;

/// Structural key for one (typeface, size) pair.
///
/// The same face is not guaranteed to receive the same `FontKey` across program runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FontKey {
    face: fontdb::ID,
    size: u32, // font size * SIZE_QUANTIZE as u32
}

impl FontKey {
    pub fn new(face: fontdb::ID, font_size: f32) -> Self {
        Self {
            face,
            size: (font_size.max(0.0) * SIZE_QUANTIZE) as u32,
        }
    }

    pub fn face(&self) -> fontdb::ID {
        self.face
    }

    pub fn font_size(&self) -> f32 {
        self.size as f32 / SIZE_QUANTIZE
    }
}
