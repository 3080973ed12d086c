use std::{path::PathBuf, sync::Arc};

use euclid::default::{Point2D, Rect, Size2D};
use parking_lot::RwLock;

use crate::{
    font::Font,
    font_cache::FontMetricsCache,
    font_storage::FontStorage,
    painter::{SurfacePainter, paint_layout},
    text::{
        cursor,
        flags::TextFormatFlags,
        layout::{LayoutEngine, LayoutResult},
        paint_options::TextPaintOptions,
    },
};

/// High-level entry point for measuring, laying out and painting text.
///
/// This struct coordinates a `FontStorage` and the `FontMetricsCache` built on
/// top of it. Every method takes `&self`, so one `FontSystem` can be shared
/// between threads.
///
/// The fields are public to allow direct access to the underlying storage and cache
/// when necessary.
pub struct FontSystem {
    /// The underlying font storage.
    ///
    /// Loading takes the write lock; metric queries only need the read lock.
    pub font_storage: RwLock<FontStorage>,

    /// Metrics resolved so far, keyed by (face, size).
    pub metrics_cache: FontMetricsCache,
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FontSystem {
    /// Creates a new font system with empty storage and an empty cache.
    pub fn new() -> Self {
        Self {
            font_storage: RwLock::new(FontStorage::new()),
            metrics_cache: FontMetricsCache::new(),
        }
    }
}

/// font storage initialization
impl FontSystem {
    /// Loads the system fonts into the storage.
    pub fn load_system_fonts(&self) {
        self.font_storage.write().load_system_fonts();
    }

    /// Loads a font from binary data.
    pub fn load_font_binary(&self, data: impl Into<Vec<u8>>) {
        self.font_storage.write().load_font_binary(data);
    }

    /// Loads a font from a file path.
    pub fn load_font_file(&self, path: PathBuf) -> Result<(), std::io::Error> {
        self.font_storage.write().load_font_file(path)
    }

    /// Loads all fonts from a directory.
    pub fn load_fonts_dir(&self, dir: PathBuf) {
        self.font_storage.write().load_fonts_dir(dir)
    }

    /// Removes a face by ID.
    ///
    /// Cached metrics are dropped too, since they may belong to the removed face.
    pub fn remove_face(&self, id: fontdb::ID) {
        self.font_storage.write().remove_face(id);
        self.metrics_cache.clear();
    }

    /// Checks if the storage is empty.
    pub fn is_empty(&self) -> bool {
        self.font_storage.read().is_empty()
    }

    /// Returns the number of loaded faces.
    pub fn len(&self) -> usize {
        self.font_storage.read().len()
    }

    /// Drops every cached metric. Fonts stay loaded.
    pub fn clear_metrics_cache(&self) {
        self.metrics_cache.clear();
    }
}

/// font querying
impl FontSystem {
    /// Queries for a face matching the description.
    pub fn query(&self, query: &fontdb::Query) -> Option<fontdb::ID> {
        self.font_storage.read().query(query)
    }

    /// Retrieves a parsed face by ID.
    pub fn face(&self, id: fontdb::ID) -> Option<Arc<fontdue::Font>> {
        self.font_storage.read().face(id)
    }

    /// Returns face info for an ID.
    ///
    /// # Performance
    /// This method clones the face info to avoid holding a lock on the storage.
    pub fn face_info(&self, id: fontdb::ID) -> Option<fontdb::FaceInfo> {
        self.font_storage.read().face_info(id).cloned()
    }
}

/// text layout
impl FontSystem {
    /// Size of the box `text` needs. `max_line_width <= 0` means unconstrained.
    pub fn measure_text(
        &self,
        text: &str,
        font: &Font,
        max_line_width: f32,
        flags: TextFormatFlags,
    ) -> Size2D<f32> {
        let storage = self.font_storage.read();
        let engine = LayoutEngine::new(&self.metrics_cache, &*storage);
        engine.measure(text, font, max_line_width, flags)
    }

    /// Lays `text` out inside `bounds`.
    pub fn layout_text(
        &self,
        text: &str,
        font: &Font,
        bounds: Rect<f32>,
        flags: TextFormatFlags,
    ) -> LayoutResult {
        let storage = self.font_storage.read();
        LayoutEngine::new(&self.metrics_cache, &*storage).layout(text, font, bounds, flags)
    }

    /// Lays `text` out and returns the caret index under `point`, or `-1`.
    pub fn cursor_from_point(
        &self,
        text: &str,
        font: &Font,
        bounds: Rect<f32>,
        flags: TextFormatFlags,
        point: Point2D<f32>,
    ) -> isize {
        if text.is_empty() {
            return -1;
        }
        let layout = self.layout_text(text, font, bounds, flags);
        cursor::cursor_from_point(&layout, point)
    }

    /// Top end of the caret for `index` in an existing layout.
    pub fn cursor_draw_position(
        &self,
        layout: &LayoutResult,
        index: isize,
    ) -> Option<Point2D<f32>> {
        cursor::cursor_draw_position(layout, index)
    }
}

/// painting
impl FontSystem {
    /// Lays `text` out and paints it through `painter`.
    ///
    /// Returns the layout so the caller can keep it for hit testing.
    pub fn paint_text<S: SurfacePainter + ?Sized>(
        &self,
        text: &str,
        font: &Font,
        bounds: Rect<f32>,
        flags: TextFormatFlags,
        options: &TextPaintOptions,
        painter: &mut S,
    ) -> LayoutResult {
        let layout = self.layout_text(text, font, bounds, flags);
        paint_layout(&layout, font.style, options, painter);
        layout
    }
}
