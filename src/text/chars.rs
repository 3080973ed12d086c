//! Character classes that drive line breaking.

pub const NEW_LINE: char = '\n';
pub const CARRIAGE_RETURN: char = '\r';
/// Backspace: the character after it is drawn at the same x position.
pub const NEXT_CHAR_NO_ADVANCE: char = '\u{8}';
pub const SPACE: char = ' ';
pub const NO_BREAK_SPACE: char = '\u{a0}';

/// Unicode whitespace, see <https://en.wikipedia.org/wiki/Whitespace_character#Unicode>.
pub fn is_unicode_space(ch: char) -> bool {
    matches!(
        ch,
        '\u{9}'..='\u{d}'
            | '\u{20}'
            | '\u{85}'
            | '\u{a0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200a}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202f}'
            | '\u{205f}'
            | '\u{3000}'
    )
}

/// Ideographs, kana, hangul and the emoji block, each of which is its own word.
pub fn is_cjk(ch: char) -> bool {
    matches!(
        ch,
        '\u{4e00}'..='\u{9fbf}'     // CJK unified ideographs
            | '\u{2e80}'..='\u{2fdf}' // radicals supplement, kangxi radicals
            | '\u{2ff0}'..='\u{30ff}' // description characters, symbols and punctuation, kana
            | '\u{3100}'..='\u{31bf}' // bopomofo, hangul compatibility jamo
            | '\u{31c0}'..='\u{4dff}' // strokes and extension A
            | '\u{ac00}'..='\u{d7af}' // hangul syllables
            | '\u{f900}'..='\u{faff}' // compatibility ideographs
            | '\u{fe30}'..='\u{fe4f}' // compatibility forms
            | '\u{1f004}'..='\u{1f682}'
    )
}

/// Whitespace-like characters that must not open a break opportunity.
pub fn is_non_breaking(ch: char) -> bool {
    matches!(ch, '\u{a0}' | '\u{202f}' | '\u{2007}' | '\u{2060}')
}

/// Whether a word token ends before `ch`.
pub(crate) fn is_word_boundary(ch: char) -> bool {
    ch == NEW_LINE
        || ch == CARRIAGE_RETURN
        || (!is_non_breaking(ch) && (is_unicode_space(ch) || is_cjk(ch)))
}
