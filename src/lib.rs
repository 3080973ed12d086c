//! # Mojiwari
//!
//! Text measurement, line breaking, layout and caret hit testing for GUI widgets.
//!
//! ## Overview
//!
//! `Mojiwari` turns a string, a font and a set of [`TextFormatFlags`] into positioned
//! letters inside a bounding rectangle. Per-font glyph metrics are resolved once through a
//! [`FontMetricsProvider`] and kept in a shared [`FontMetricsCache`].
//! Drawing is left to the caller through the [`SurfacePainter`] trait.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mojiwari::{Font, FontSystem, RecordingPainter, TextFormatFlags, TextPaintOptions};
//! use mojiwari::euclid::default::{Point2D, Rect, Size2D};
//!
//! // 1. Create a FontSystem
//! let font_system = FontSystem::new();
//! font_system.load_system_fonts();
//!
//! // 2. Pick a face
//! let query = mojiwari::fontdb::Query {
//!     families: &[mojiwari::fontdb::Family::SansSerif],
//!     ..Default::default()
//! };
//! let face = font_system.query(&query).unwrap();
//! let font = Font::new(face, 16.0);
//!
//! // 3. Layout, paint and hit test
//! let bounds = Rect::new(Point2D::new(0.0, 0.0), Size2D::new(200.0, 60.0));
//! let flags = TextFormatFlags::WORD_BREAK | TextFormatFlags::VERTICAL_CENTER;
//! let mut painter = RecordingPainter::new();
//! let options = TextPaintOptions::new().with_cursor(3);
//! let layout =
//!     font_system.paint_text("Hello 你好", &font, bounds, flags, &options, &mut painter);
//! let caret = mojiwari::text::cursor_from_point(&layout, Point2D::new(30.0, 30.0));
//! ```
//!
//! ## Features
//!
//! *   **Word and character wrapping**: greedy line breaking with CJK and non-breaking space rules.
//! *   **Alignment and padding**: horizontal and vertical alignment, padding derived from line spacing.
//! *   **Hit testing**: map points to caret indices and back.
//! *   **Thread Safety**: the metrics cache can be shared between threads.

pub mod font;
pub mod font_cache;
pub mod font_key;
pub mod font_storage;
pub mod font_system;
pub mod metrics;
pub mod painter;
pub mod text;

#[cfg(test)]
mod test_font;

// common re-exports
pub use font::{Font, FontStyle};
pub use font_cache::{FontMetrics, FontMetricsCache};
pub use font_key::FontKey;
pub use font_storage::FontStorage;
pub use font_system::FontSystem;
pub use metrics::{FontLetterDefinition, FontMetricsProvider};
pub use painter::{PaintCommand, PositionedGlyph, RecordingPainter, SurfacePainter, paint_layout};
pub use text::{LayoutEngine, LayoutResult, TextFormatFlags, TextPaintOptions};

// re-export dependencies
pub use euclid;
pub use fontdb;
pub use fontdue;
pub use palette;
pub use parking_lot;
