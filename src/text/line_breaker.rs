use crate::font_cache::FontMetrics;
use crate::text::chars::{
    CARRIAGE_RETURN, NEW_LINE, NEXT_CHAR_NO_ADVANCE, is_unicode_space, is_word_boundary,
};
use crate::text::flags::{FormatPolicy, WrapStyle};

/// Placement of one source character.
///
/// There is exactly one `LetterInfo` per input `char`, in input order, so the
/// index of a letter is the index of the character it came from. Characters
/// that are never drawn (newline, carriage return, the no-advance marker,
/// glyphs missing from the font) get a placeholder with `valid == false`
/// positioned at the pen location where they occurred.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LetterInfo {
    pub character: char,
    pub valid: bool,
    /// Left edge of the letter's advance box.
    pub position_x: f32,
    /// Top of the line the letter sits on.
    pub position_y: f32,
    pub line_index: usize,
    /// Advance width, `0.0` for placeholders.
    pub advance: f32,
}

impl LetterInfo {
    fn placeholder(character: char) -> Self {
        Self {
            character,
            valid: false,
            position_x: 0.0,
            position_y: 0.0,
            line_index: 0,
            advance: 0.0,
        }
    }
}

/// Output of [`wrap`], positions relative to the text block's own origin.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WrappedText {
    /// Width of every visual line, trailing whitespace excluded.
    pub line_widths: Vec<f32>,
    pub letters: Vec<LetterInfo>,
    pub line_height: f32,
    /// `line_widths.len() * line_height`.
    pub desired_height: f32,
}

impl WrappedText {
    pub fn line_count(&self) -> usize {
        self.line_widths.len()
    }

    pub fn longest_line(&self) -> f32 {
        self.line_widths.iter().copied().fold(0.0, f32::max)
    }
}

/// Running state of one `wrap` call. Never outlives the call.
struct WrapState<'a> {
    text: &'a [char],
    metrics: &'a FontMetrics,
    max_line_width: f32,
    policy: FormatPolicy,
    word_tokens: bool,
    line_height: f32,

    line_index: usize,
    next_token_x: f32,
    next_token_y: f32,
    letter_right: f32,
    next_whitespace_width: f32,
    next_advances: bool,

    line_widths: Vec<f32>,
    letters: Vec<LetterInfo>,
}

/// Splits `text` into visual lines no wider than `max_line_width`.
///
/// `max_line_width <= 0` means unconstrained. With
/// [`WrapStyle::WordWrap`] and a positive width, break opportunities are
/// word boundaries (whitespace, CJK characters, newlines); otherwise a line
/// may break between any two characters. A token that does not fit is moved
/// to the next line as a whole, unless it is the first thing on the line.
///
/// The metrics handle must already be prepared for `text`; characters it has
/// not resolved are treated as missing glyphs.
pub fn wrap(
    text: &[char],
    metrics: &FontMetrics,
    max_line_width: f32,
    policy: &FormatPolicy,
) -> WrappedText {
    let line_height = metrics.line_spacing();

    if text.is_empty() {
        return WrappedText {
            line_height,
            ..Default::default()
        };
    }

    let mut state = WrapState {
        text,
        metrics,
        max_line_width,
        policy: *policy,
        word_tokens: max_line_width > 0.0 && matches!(policy.wrap_style, WrapStyle::WordWrap),
        line_height,
        line_index: 0,
        next_token_x: 0.0,
        next_token_y: 0.0,
        letter_right: 0.0,
        next_whitespace_width: 0.0,
        next_advances: true,
        line_widths: Vec::new(),
        letters: text.iter().map(|&character| LetterInfo::placeholder(character)).collect(),
    };

    state.run();
    state.finish()
}

impl WrapState<'_> {
    fn run(&mut self) {
        let mut index = 0usize;

        while index < self.text.len() {
            let character = self.text[index];

            if character == NEW_LINE {
                self.record_placeholder(index, character, self.next_token_x);
                if !self.policy.single_line {
                    self.close_line(self.next_whitespace_width);
                }
                index += 1;
                continue;
            }

            let token_len = self.token_length(index);
            let whitespace_before_token = self.next_whitespace_width;
            let mut token_right = self.letter_right;
            let mut next_letter_x = self.next_token_x;
            let mut new_line = false;

            for letter_index in index..index + token_len {
                let character = self.text[letter_index];

                if character == CARRIAGE_RETURN {
                    self.record_placeholder(letter_index, character, next_letter_x);
                    continue;
                }

                if character == NEXT_CHAR_NO_ADVANCE {
                    self.next_advances = false;
                    self.record_placeholder(letter_index, character, next_letter_x);
                    continue;
                }

                let definition = self.metrics.letter_definition(character);
                if !definition.valid_definition {
                    log::trace!("Skipping {:?} at {}: no glyph.", character, letter_index);
                    self.record_placeholder(letter_index, character, next_letter_x);
                    continue;
                }

                if self.policy.wraps()
                    && self.max_line_width > 0.0
                    && self.next_token_x > 0.0
                    && next_letter_x + definition.advance_x > self.max_line_width
                    && !is_unicode_space(character)
                    && self.next_advances
                {
                    self.close_line(whitespace_before_token);
                    new_line = true;
                    break;
                }

                self.letters[letter_index] = LetterInfo {
                    character,
                    valid: true,
                    position_x: next_letter_x,
                    position_y: self.next_token_y,
                    line_index: self.line_index,
                    advance: definition.advance_x,
                };

                if self.next_advances {
                    next_letter_x += definition.advance_x;
                    token_right = next_letter_x;

                    if is_unicode_space(character) {
                        self.next_whitespace_width += definition.advance_x;
                    } else {
                        self.next_whitespace_width = 0.0;
                    }
                }

                self.next_advances = true;
            }

            // The token is laid out again from its first character on the new line.
            if new_line {
                continue;
            }

            self.next_token_x = next_letter_x;
            self.letter_right = token_right;
            index += token_len;
        }
    }

    /// Length of the token starting at `start`, always at least one.
    fn token_length(&self, start: usize) -> usize {
        if !self.word_tokens {
            return 1;
        }

        let mut length = 0;
        let mut next_letter_x = 0.0;

        for &character in &self.text[start..] {
            if is_word_boundary(character) {
                break;
            }

            let definition = self.metrics.letter_definition(character);
            if !definition.valid_definition {
                break;
            }

            if self.policy.wraps()
                && self.max_line_width > 0.0
                && next_letter_x + definition.advance_x > self.max_line_width
            {
                break;
            }

            next_letter_x += definition.advance_x;
            length += 1;
        }

        length.max(1)
    }

    /// Pushes the current line, dropping `trailing_whitespace` from its width.
    fn close_line(&mut self, trailing_whitespace: f32) {
        self.line_widths.push((self.letter_right - trailing_whitespace).max(0.0));
        self.next_whitespace_width = 0.0;
        self.letter_right = 0.0;
        self.line_index += 1;
        self.next_token_x = 0.0;
        self.next_token_y += self.line_height;
    }

    fn record_placeholder(&mut self, index: usize, character: char, pen_x: f32) {
        self.letters[index] = LetterInfo {
            character,
            valid: false,
            position_x: pen_x,
            position_y: self.next_token_y,
            line_index: self.line_index,
            advance: 0.0,
        };
    }

    fn finish(mut self) -> WrappedText {
        self.line_widths.push((self.letter_right - self.next_whitespace_width).max(0.0));

        let line_count = self.line_widths.len();
        log::trace!(
            "Wrapped {} characters into {} lines (max width {}).",
            self.text.len(),
            line_count,
            self.max_line_width
        );

        WrappedText {
            line_widths: self.line_widths,
            letters: self.letters,
            line_height: self.line_height,
            desired_height: line_count as f32 * self.line_height,
        }
    }
}
