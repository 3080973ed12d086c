use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::font::Font;
use crate::font_key::FontKey;
use crate::metrics::{FontLetterDefinition, FontMetricsProvider};
use crate::text::chars::{NO_BREAK_SPACE, SPACE};

/// Per (typeface, size) cache of letter definitions and line metrics.
///
/// Entries are never evicted on their own. Callers that need bounded memory
/// scope the cache themselves (one per document, per font picker session, ...)
/// or call [`FontMetricsCache::clear`].
///
/// The cache is safe to share between threads: the key map and each entry's
/// letter map sit behind their own `RwLock`, and new letters are inserted
/// with insert-if-absent semantics so a racing writer never replaces a
/// definition another thread already published.
pub struct FontMetricsCache {
    entries: RwLock<HashMap<FontKey, Arc<FontMetrics>, fxhash::FxBuildHasher>>,
}

impl Default for FontMetricsCache {
    fn default() -> Self {
        Self::new()
    }
}

impl FontMetricsCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::with_hasher(fxhash::FxBuildHasher::default())),
        }
    }

    /// Returns the handle for `font`, creating it from `provider` on first use.
    pub fn get<P: FontMetricsProvider + ?Sized>(
        &self,
        font: &Font,
        provider: &P,
    ) -> Arc<FontMetrics> {
        let key = font.key();

        if let Some(entry) = self.entries.read().get(&key) {
            return Arc::clone(entry);
        }

        // Line metrics are queried outside the lock; if two threads race the
        // first insert wins and the other result is dropped.
        let created = Arc::new(FontMetrics::new(*font, provider));
        let mut entries = self.entries.write();
        Arc::clone(entries.entry(key).or_insert(created))
    }

    pub fn contains(&self, font: &Font) -> bool {
        self.entries.read().contains_key(&font.key())
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drops every entry. Handles that are still held keep working.
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

/// Cached metrics of one (typeface, size) pair.
///
/// Letter definitions are append-only: once a character is resolved its
/// answer never changes for the lifetime of the handle.
pub struct FontMetrics {
    font: Font,
    ascender: f32,
    line_spacing: f32,
    external_leading: f32,
    underline_offset: Option<f32>,
    strikeout_offset: Option<f32>,
    letters: RwLock<HashMap<char, FontLetterDefinition, fxhash::FxBuildHasher>>,
}

impl FontMetrics {
    fn new<P: FontMetricsProvider + ?Sized>(font: Font, provider: &P) -> Self {
        Self {
            font,
            ascender: provider.ascender(&font),
            line_spacing: provider.line_spacing(&font),
            external_leading: provider.external_leading(&font),
            underline_offset: provider.underline_offset(&font),
            strikeout_offset: provider.strikeout_offset(&font),
            letters: RwLock::new(HashMap::with_hasher(fxhash::FxBuildHasher::default())),
        }
    }

    pub fn key(&self) -> FontKey {
        self.font.key()
    }

    pub fn ascender(&self) -> f32 {
        self.ascender
    }

    pub fn line_spacing(&self) -> f32 {
        self.line_spacing
    }

    pub fn external_leading(&self) -> f32 {
        self.external_leading
    }

    pub fn underline_offset(&self) -> Option<f32> {
        self.underline_offset
    }

    pub fn strikeout_offset(&self) -> Option<f32> {
        self.strikeout_offset
    }

    /// Looks up a prepared character.
    ///
    /// Characters that were never prepared report an invalid definition, the
    /// same as characters the font has no glyph for.
    pub fn letter_definition(&self, character: char) -> FontLetterDefinition {
        self.letters
            .read()
            .get(&normalize(character))
            .copied()
            .unwrap_or_default()
    }

    /// Number of distinct characters resolved so far.
    pub fn resolved_len(&self) -> usize {
        self.letters.read().len()
    }

    /// Resolves every character of `text` not yet in the cache with a single
    /// provider call.
    ///
    /// Returns `true` iff at least one character was newly stored. Missing
    /// glyphs are stored as invalid definitions so later lookups stay O(1).
    pub fn prepare<P: FontMetricsProvider + ?Sized>(&self, text: &str, provider: &P) -> bool {
        let new_chars: Vec<char> = {
            let letters = self.letters.read();
            let mut seen = std::collections::HashSet::with_hasher(fxhash::FxBuildHasher::default());
            text.chars()
                .map(normalize)
                .filter(|ch| !letters.contains_key(ch) && seen.insert(*ch))
                .collect()
        };

        if new_chars.is_empty() {
            return false;
        }

        let definitions = provider.resolve(&self.font, &new_chars);
        if definitions.len() != new_chars.len() {
            log::error!(
                "Metrics provider returned {} definitions for {} characters.",
                definitions.len(),
                new_chars.len()
            );
        }

        let mut inserted = false;
        let mut letters = self.letters.write();
        for (index, ch) in new_chars.into_iter().enumerate() {
            let definition = definitions.get(index).copied().unwrap_or_default();

            if let std::collections::hash_map::Entry::Vacant(entry) = letters.entry(ch) {
                if !definition.valid_definition && !ch.is_control() {
                    log::warn!(
                        "No glyph for {:?} (U+{:04X}) in font {:?}.",
                        ch,
                        ch as u32,
                        self.font.key()
                    );
                }
                entry.insert(definition);
                inserted = true;
            }
        }

        inserted
    }
}

/// Many fonts draw U+00A0 inconsistently, so it shares the regular space's entry.
fn normalize(character: char) -> char {
    if character == NO_BREAK_SPACE {
        SPACE
    } else {
        character
    }
}
