use crate::font::Font;
use crate::model::Align;
use crate::units::Pt;
use std::str::{Split, SplitWhitespace};

/// Wraps text into lines no wider than `max_width`.
///
/// # Wrapping Behavior
///
/// - `\n` always starts a new line; `\r`, tabs and runs of spaces are plain
///   whitespace and collapse into a single space between words
/// - words are packed greedily, the next word moving to a new line as soon as it
///   would overflow the current one
/// - a word wider than a whole line is broken between characters, with at least
///   one character per line so wrapping always makes progress
/// - a blank paragraph (e.g. the middle of `"a\n\nb"`) yields an empty line;
///   an empty string yields no lines at all
///
/// The returned iterator is lazy and can only be walked once. Measuring and
/// drawing both go through it, so the height a block is measured at is exactly
/// the height it is drawn at.
pub fn wrap_text<'a>(text: &'a str, font: &'a Font, size: Pt, max_width: Pt) -> WrappedLines<'a> {
    WrappedLines {
        font,
        size,
        max_width,
        space: font.advance(' ', size),
        paragraphs: (!text.is_empty()).then(|| text.split('\n')),
        words: None,
        pending: None,
        emitted: false,
    }
}

/// Lines of text produced by [`wrap_text`]
pub struct WrappedLines<'a> {
    font: &'a Font,
    size: Pt,
    max_width: Pt,
    space: Pt,
    paragraphs: Option<Split<'a, char>>,
    /// words of the paragraph currently being wrapped
    words: Option<SplitWhitespace<'a>>,
    /// a word (or what's left of a broken word) that didn't fit on the last line
    pending: Option<String>,
    /// whether the current paragraph has produced a line yet
    emitted: bool,
}

impl WrappedLines<'_> {
    /// Split a word that is too wide for a line in two, the head being the longest
    /// prefix that fits (but never empty)
    fn break_word(&self, word: String) -> (String, Option<String>) {
        let mut width = Pt::ZERO;
        let mut split_at = word.len();
        for (i, ch) in word.char_indices() {
            let advance = self.font.advance(ch, self.size);
            if i > 0 && width + advance > self.max_width {
                split_at = i;
                break;
            }
            width += advance;
        }

        if split_at >= word.len() {
            (word, None)
        } else {
            let tail = word[split_at..].to_string();
            let mut head = word;
            head.truncate(split_at);
            (head, Some(tail))
        }
    }
}

impl Iterator for WrappedLines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            if self.words.is_none() {
                let paragraph = self.paragraphs.as_mut()?.next()?;
                self.words = Some(paragraph.split_whitespace());
                self.emitted = false;
            }

            let mut line = String::new();
            let mut width = Pt::ZERO;
            loop {
                let word = match self.pending.take() {
                    Some(word) => word,
                    None => match self.words.as_mut().and_then(|w| w.next()) {
                        Some(word) => word.to_string(),
                        None => break,
                    },
                };
                let word_width = self.font.width_of_text(&word, self.size);

                if line.is_empty() {
                    if word_width <= self.max_width {
                        line = word;
                        width = word_width;
                    } else {
                        let (head, tail) = self.break_word(word);
                        self.pending = tail;
                        self.emitted = true;
                        return Some(head);
                    }
                } else if width + self.space + word_width <= self.max_width {
                    line.push(' ');
                    line.push_str(&word);
                    width += self.space + word_width;
                } else {
                    self.pending = Some(word);
                    break;
                }
            }

            if line.is_empty() {
                // paragraph exhausted
                self.words = None;
                if !self.emitted {
                    self.emitted = true;
                    return Some(line);
                }
                continue;
            }

            self.emitted = true;
            return Some(line);
        }
    }
}

/// Height of a block of wrapped text: line count × line height
pub fn text_height(text: &str, font: &Font, size: Pt, max_width: Pt) -> Pt {
    font.line_height(size) * wrap_text(text, font, size, max_width).count() as f32
}

/// Offset from the top of a line box down to the baseline of the text in it,
/// with the leading split evenly above and below the glyphs
pub fn baseline_offset(font: &Font, size: Pt) -> Pt {
    let ascent = font.ascent(size);
    let glyph_height = ascent - font.descent(size);
    (font.line_height(size) - glyph_height) / 2.0 + ascent
}

/// Where a line `text_width` wide starts when aligned within `width` starting at `left`
pub fn aligned_x(align: Align, left: Pt, width: Pt, text_width: Pt) -> Pt {
    match align {
        Align::Left => left,
        Align::Center => left + ((width - text_width) / 2.0).max(Pt::ZERO),
        Align::Right => left + (width - text_width).max(Pt::ZERO),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn wrap(text: &str, max_width: f32) -> Vec<String> {
        let font = Font::helvetica();
        wrap_text(text, &font, Pt(10.0), Pt(max_width)).collect()
    }

    #[test]
    fn packs_words_greedily() {
        // "aaa" is 16.68pt wide at 10pt, a space 2.78pt
        assert_eq!(wrap("aaa aaa aaa", 40.0), vec!["aaa aaa", "aaa"]);
        assert_eq!(wrap("aaa   aaa\taaa", 60.0), vec!["aaa aaa aaa"]);
    }

    #[test]
    fn breaks_long_words_between_characters() {
        assert_eq!(wrap("aaaaaaaaaa", 20.0), vec!["aaa", "aaa", "aaa", "a"]);
        assert_eq!(wrap("xy aaaaaaaaaa", 20.0), vec!["xy", "aaa", "aaa", "aaa", "a"]);
    }

    #[test]
    fn always_makes_progress() {
        assert_eq!(wrap("ab", 1.0), vec!["a", "b"]);
    }

    #[test]
    fn newlines_start_paragraphs() {
        assert_eq!(wrap("a\n\nb", 100.0), vec!["a", "", "b"]);
        assert_eq!(wrap("a\r\nb", 100.0), vec!["a", "b"]);
        assert_eq!(wrap("", 100.0), Vec::<String>::new());
    }

    #[test]
    fn long_text_stays_within_width() {
        let font = Font::helvetica();
        let text = lipsum::lipsum(300);
        let lines: Vec<String> = wrap_text(&text, &font, Pt(10.0), Pt(200.0)).collect();
        assert!(lines.len() > 10);
        for line in lines.iter() {
            assert!(font.width_of_text(line, Pt(10.0)) <= Pt(200.0), "{line}");
        }
        let rewrapped: Vec<&str> = lines.iter().flat_map(|l| l.split(' ')).collect();
        let original: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(rewrapped, original);
    }

    #[test]
    fn height_is_lines_times_line_height() {
        let font = Font::helvetica();
        let height = text_height("aaa aaa aaa", &font, Pt(10.0), Pt(40.0));
        assert!((height.0 - 23.0).abs() < 1e-4);
    }

    #[test]
    fn alignment() {
        assert_eq!(aligned_x(Align::Left, Pt(10.0), Pt(100.0), Pt(40.0)), Pt(10.0));
        assert_eq!(aligned_x(Align::Center, Pt(10.0), Pt(100.0), Pt(40.0)), Pt(40.0));
        assert_eq!(aligned_x(Align::Right, Pt(10.0), Pt(100.0), Pt(40.0)), Pt(70.0));
        assert_eq!(aligned_x(Align::Right, Pt(10.0), Pt(30.0), Pt(40.0)), Pt(10.0));
    }
}
