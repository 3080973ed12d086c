//! Deterministic metrics used by the unit tests.
//!
//! Mimics SimSun at 20px: half-width ASCII, full-width CJK, a line spacing
//! equal to the font size and no glyph for U+FEFF or control characters.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::font::Font;
use crate::metrics::{FontLetterDefinition, FontMetricsProvider};
use crate::text::chars::is_cjk;

pub struct TestMetrics {
    pub resolve_calls: AtomicUsize,
    pub resolved_chars: AtomicUsize,
}

impl TestMetrics {
    pub fn new() -> Self {
        Self {
            resolve_calls: AtomicUsize::new(0),
            resolved_chars: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.resolve_calls.load(Ordering::SeqCst)
    }

    pub fn resolved(&self) -> usize {
        self.resolved_chars.load(Ordering::SeqCst)
    }
}

pub fn test_font() -> Font {
    Font::new(fontdb::ID::dummy(), 20.0)
}

/// Text used by the hit-testing fixtures; starts with a BOM the font cannot draw.
pub const HELLO: &str = "\u{feff}Hello 你好 world!";

impl FontMetricsProvider for TestMetrics {
    fn resolve(&self, font: &Font, characters: &[char]) -> Vec<FontLetterDefinition> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        self.resolved_chars.fetch_add(characters.len(), Ordering::SeqCst);

        let unit = font.size / 2.0;
        characters
            .iter()
            .map(|&ch| {
                if ch.is_control() || ch == '\u{feff}' || ch == '\u{a0}' {
                    FontLetterDefinition::invalid()
                } else if is_cjk(ch) {
                    FontLetterDefinition::valid(unit * 2.0)
                } else {
                    FontLetterDefinition::valid(unit)
                }
            })
            .collect()
    }

    fn ascender(&self, font: &Font) -> f32 {
        font.size * 0.85
    }

    fn line_spacing(&self, font: &Font) -> f32 {
        font.size
    }

    fn external_leading(&self, _font: &Font) -> f32 {
        2.0
    }

    fn underline_offset(&self, _font: &Font) -> Option<f32> {
        Some(2.0)
    }

    fn strikeout_offset(&self, _font: &Font) -> Option<f32> {
        Some(-6.0)
    }
}
