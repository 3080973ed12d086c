use std::{collections::HashMap, path::PathBuf, sync::Arc};

use parking_lot::Mutex;

use crate::font::Font;
use crate::metrics::{FontLetterDefinition, FontMetricsProvider};

/// Manages font loading and retrieval using `fontdb` and `fontdue`.
///
/// This struct combines a database of available fonts (`fontdb`) with a cache of loaded
/// font instances (`fontdue`). Faces are parsed lazily on first use; the parsed set sits
/// behind its own lock so metric queries only need `&self`.
///
/// `FontStorage` is the default [`FontMetricsProvider`]: glyph index `0` means the face
/// has no glyph for a character.
pub struct FontStorage {
    /// This is the font set that has been loaded by fontdb.
    font_db: fontdb::Database,
    /// This is the font that has been loaded by fontdue.
    /// Not all fonts in fontdb are necessarily loaded here.
    loaded_font: Mutex<HashMap<fontdb::ID, Arc<fontdue::Font>, fxhash::FxBuildHasher>>,
}

impl Default for FontStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl FontStorage {
    /// Creates a new empty font storage.
    pub fn new() -> Self {
        Self {
            font_db: fontdb::Database::new(),
            loaded_font: Mutex::new(HashMap::with_hasher(fxhash::FxBuildHasher::default())),
        }
    }
}

/// Loading fonts into fontdb and setting up fontdb.
impl FontStorage {
    /// Loads a font from binary data.
    pub fn load_font_binary(&mut self, data: impl Into<Vec<u8>>) {
        self.font_db.load_font_data(data.into());
    }

    /// Loads a font from a file path.
    pub fn load_font_file(&mut self, path: PathBuf) -> Result<(), std::io::Error> {
        self.font_db.load_font_file(path)
    }

    /// Loads all fonts from a directory.
    pub fn load_fonts_dir(&mut self, dir: PathBuf) {
        self.font_db.load_fonts_dir(dir)
    }

    /// Loads the system fonts.
    pub fn load_system_fonts(&mut self) {
        self.font_db.load_system_fonts();
    }

    /// Removes a face by ID.
    pub fn remove_face(&mut self, id: fontdb::ID) {
        self.font_db.remove_face(id);
        self.loaded_font.get_mut().remove(&id);
    }

    /// Checks if the storage is empty.
    pub fn is_empty(&self) -> bool {
        self.font_db.is_empty()
    }

    /// Returns the number of loaded faces.
    pub fn len(&self) -> usize {
        self.font_db.len()
    }
}

/// Get `Font`
impl FontStorage {
    /// Queries for a face matching the description.
    pub fn query(&self, query: &fontdb::Query) -> Option<fontdb::ID> {
        self.font_db.query(query)
    }

    /// Retrieves a parsed face by ID, parsing it if necessary.
    pub fn face(&self, id: fontdb::ID) -> Option<Arc<fontdue::Font>> {
        if let Some(font) = self.loaded_font.lock().get(&id) {
            return Some(Arc::clone(font));
        }

        // Parsing happens outside the lock; a concurrent parse of the same
        // face is harmless and the first stored instance wins.
        let font_result = self.font_db.with_face_data(id, |data, index| {
            fontdue::Font::from_bytes(
                data,
                fontdue::FontSettings {
                    collection_index: index,
                    scale: 40.0,
                    load_substitutions: true,
                },
            )
        })?;

        match font_result {
            Ok(font) => {
                let mut loaded = self.loaded_font.lock();
                let stored = loaded.entry(id).or_insert_with(|| Arc::new(font));
                Some(Arc::clone(stored))
            }
            Err(e) => {
                log::error!("Failed to load font (id: {:?}): {}", id, e);
                None
            }
        }
    }

    /// Returns face info for an ID.
    pub fn face_info(&self, id: fontdb::ID) -> Option<&fontdb::FaceInfo> {
        self.font_db.face(id)
    }
}

impl FontMetricsProvider for FontStorage {
    fn resolve(&self, font: &Font, characters: &[char]) -> Vec<FontLetterDefinition> {
        let Some(face) = self.face(font.face) else {
            log::warn!(
                "Resolving {} characters against a missing face {:?}.",
                characters.len(),
                font.face
            );
            return vec![FontLetterDefinition::invalid(); characters.len()];
        };

        characters
            .iter()
            .map(|&ch| match face.lookup_glyph_index(ch) {
                0 => FontLetterDefinition::invalid(),
                glyph => FontLetterDefinition::valid(
                    face.metrics_indexed(glyph, font.size).advance_width,
                ),
            })
            .collect()
    }

    fn ascender(&self, font: &Font) -> f32 {
        self.line_metrics(font).map(|m| m.ascent).unwrap_or(font.size)
    }

    fn line_spacing(&self, font: &Font) -> f32 {
        self.line_metrics(font)
            .map(|m| m.new_line_size)
            .unwrap_or(font.size)
    }

    fn external_leading(&self, font: &Font) -> f32 {
        self.line_metrics(font).map(|m| m.line_gap).unwrap_or(0.0)
    }

    fn underline_offset(&self, font: &Font) -> Option<f32> {
        self.decoration_offset(font, |face| face.underline_metrics())
    }

    fn strikeout_offset(&self, font: &Font) -> Option<f32> {
        self.decoration_offset(font, |face| face.strikeout_metrics())
    }
}

impl FontStorage {
    fn line_metrics(&self, font: &Font) -> Option<fontdue::LineMetrics> {
        self.face(font.face)?.horizontal_line_metrics(font.size)
    }

    /// Underline or strikeout position read straight from the face tables.
    fn decoration_offset(
        &self,
        font: &Font,
        select: impl FnOnce(&ttf_parser::Face<'_>) -> Option<ttf_parser::LineMetrics>,
    ) -> Option<f32> {
        self.font_db
            .with_face_data(font.face, |data, index| {
                let face = ttf_parser::Face::parse(data, index).ok()?;
                let metrics = select(&face)?;
                Some(baseline_offset(metrics.position, face.units_per_em(), font.size))
            })
            .flatten()
    }
}

/// Converts a position in font units, positive above the baseline, into a
/// y-down pixel offset from the baseline.
fn baseline_offset(position: i16, units_per_em: u16, font_size: f32) -> f32 {
    -(position as f32) * font_size / units_per_em as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_face_resolves_everything_invalid() {
        let storage = FontStorage::new();
        let font = Font::new(fontdb::ID::dummy(), 16.0);

        let definitions = storage.resolve(&font, &['a', '你']);
        assert_eq!(definitions, vec![FontLetterDefinition::invalid(); 2]);
    }

    #[test]
    fn test_missing_face_falls_back_to_font_size() {
        let storage = FontStorage::new();
        let font = Font::new(fontdb::ID::dummy(), 16.0);

        assert!(storage.is_empty());
        assert_eq!(storage.line_spacing(&font), 16.0);
        assert_eq!(storage.ascender(&font), 16.0);
        assert_eq!(storage.external_leading(&font), 0.0);
        assert_eq!(storage.underline_offset(&font), None);
        assert_eq!(storage.strikeout_offset(&font), None);
    }

    #[test]
    fn test_baseline_offset_scales_and_points_down() {
        // underline below the baseline, strikeout above it
        assert_eq!(baseline_offset(-150, 1000, 20.0), 3.0);
        assert_eq!(baseline_offset(300, 1000, 20.0), -6.0);
        assert_eq!(baseline_offset(-256, 2048, 16.0), 2.0);
    }
}
