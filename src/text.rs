/// Character classes used by line breaking.
pub mod chars;
/// Hit testing and caret placement on a finished layout.
pub mod cursor;
/// Format flags and the policy derived from them.
pub mod flags;
/// Alignment, padding and final letter positions.
pub mod layout;
/// Greedy wrapping of characters into lines.
pub mod line_breaker;
/// Selection and caret state for painting.
pub mod paint_options;

pub use cursor::{cursor_draw_position, cursor_from_point, selected_range};
pub use flags::{
    FormatPolicy, HorizontalAlign, PaddingMode, TextFormatFlags, VerticalAlign, WrapStyle,
};
pub use layout::{LayoutEngine, LayoutResult, TextLine, bounds_from_size};
pub use line_breaker::{LetterInfo, WrappedText};
pub use paint_options::TextPaintOptions;
