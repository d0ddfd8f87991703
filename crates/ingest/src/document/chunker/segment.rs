//! Tokenization adapters: lazy word, sentence and paragraph segmentation.
//!
//! Word and sentence boundaries follow Unicode UAX #29. Paragraphs are runs of
//! non-blank lines. Every segment is trimmed and its range is the character
//! span of the trimmed text, so `text.chars().count() == range.len()`.

use std::iter::Peekable;
use std::str::SplitInclusive;

use unicode_segmentation::{USentenceBoundIndices, UWordBoundIndices, UnicodeSegmentation};

use super::types::Segment;

/// Granularity of [`segment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentUnit {
    Word,
    Sentence,
    Paragraph,
}

/// Split `text` into trimmed segments of the given unit, in source order.
pub fn segment(text: &str, unit: SegmentUnit) -> Segments<'_> {
    match unit {
        SegmentUnit::Word => Segments::Words(Words::new(text)),
        SegmentUnit::Sentence => Segments::Sentences(Sentences::new(text)),
        SegmentUnit::Paragraph => Segments::Paragraphs(Paragraphs::new(text)),
    }
}

pub enum Segments<'a> {
    Words(Words<'a>),
    Sentences(Sentences<'a>),
    Paragraphs(Paragraphs<'a>),
}

impl Iterator for Segments<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        match self {
            Segments::Words(it) => it.next(),
            Segments::Sentences(it) => it.next(),
            Segments::Paragraphs(it) => it.next(),
        }
    }
}

// ── Byte → char offsets ─────────────────────────────────────────────────────

/// Converts byte offsets to character offsets, scanning forward only as far
/// as needed. Queries are expected in non-decreasing order; an earlier offset
/// restarts the scan.
pub(crate) struct CharCursor<'a> {
    text: &'a str,
    byte: usize,
    chars: usize,
}

impl<'a> CharCursor<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            text,
            byte: 0,
            chars: 0,
        }
    }

    pub(crate) fn offset(&mut self, byte: usize) -> usize {
        if byte < self.byte {
            self.byte = 0;
            self.chars = 0;
        }
        self.chars += self.text[self.byte..byte].chars().count();
        self.byte = byte;
        self.chars
    }
}

/// Trim `text[start..end]` and build a segment spanning exactly the trimmed text.
fn trimmed(text: &str, start: usize, end: usize, cursor: &mut CharCursor<'_>) -> Option<Segment> {
    let raw = &text[start..end];
    let body = raw.trim_start();
    if body.is_empty() {
        return None;
    }
    let start = start + (raw.len() - body.len());
    let body = body.trim_end();
    let end = start + body.len();
    let range = cursor.offset(start)..cursor.offset(end);
    Some(Segment::new(body, range))
}

// ── Words ───────────────────────────────────────────────────────────────────

fn is_word_like(token: &str) -> bool {
    token.chars().any(char::is_alphanumeric)
}

/// Words are whitespace-separated runs of UAX #29 word-bound tokens.
///
/// Punctuation sticks to its neighbors (`"Hello,"`, `"foo-bar"`), while two
/// word-like tokens that touch without whitespace (ideographic scripts) are
/// separate words.
pub struct Words<'a> {
    text: &'a str,
    bounds: Peekable<UWordBoundIndices<'a>>,
    cursor: CharCursor<'a>,
}

impl<'a> Words<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            bounds: text.split_word_bound_indices().peekable(),
            cursor: CharCursor::new(text),
        }
    }
}

impl Iterator for Words<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        let mut start: Option<usize> = None;
        let mut end = 0;
        let mut last_word_like = false;

        while let Some(&(idx, token)) = self.bounds.peek() {
            if token.chars().all(char::is_whitespace) {
                if start.is_some() {
                    break;
                }
                self.bounds.next();
                continue;
            }
            let word_like = is_word_like(token);
            if start.is_some() && word_like && last_word_like {
                break;
            }
            start.get_or_insert(idx);
            end = idx + token.len();
            last_word_like = word_like;
            self.bounds.next();
        }

        let start = start?;
        let range = self.cursor.offset(start)..self.cursor.offset(end);
        Some(Segment::new(&self.text[start..end], range))
    }
}

// ── Sentences ───────────────────────────────────────────────────────────────

pub struct Sentences<'a> {
    text: &'a str,
    bounds: USentenceBoundIndices<'a>,
    cursor: CharCursor<'a>,
}

impl<'a> Sentences<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            bounds: text.split_sentence_bound_indices(),
            cursor: CharCursor::new(text),
        }
    }
}

impl Iterator for Sentences<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        for (idx, sentence) in self.bounds.by_ref() {
            if let Some(seg) = trimmed(self.text, idx, idx + sentence.len(), &mut self.cursor) {
                return Some(seg);
            }
        }
        None
    }
}

// ── Lines ───────────────────────────────────────────────────────────────────

/// One source line without its terminator (`\n` or `\r\n`).
#[derive(Debug, Clone, Copy)]
pub(crate) struct Line<'a> {
    pub(crate) text: &'a str,
    /// Byte offset of the line start.
    pub(crate) start: usize,
    /// Character offset of the line start.
    pub(crate) char_start: usize,
}

impl Line<'_> {
    pub(crate) fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    fn indent(&self) -> &str {
        &self.text[..self.text.len() - self.text.trim_start().len()]
    }

    /// Byte offset just past the last non-whitespace character.
    pub(crate) fn content_end(&self) -> usize {
        self.start + self.text.trim_end().len()
    }

    pub(crate) fn content_char_end(&self) -> usize {
        self.char_start + self.text.trim_end().chars().count()
    }

    /// The line with trailing whitespace removed; indentation is kept.
    pub(crate) fn to_segment(&self) -> Segment {
        Segment::new(self.text.trim_end(), self.char_start..self.content_char_end())
    }
}

pub(crate) struct Lines<'a> {
    raw: SplitInclusive<'a, char>,
    byte: usize,
    chars: usize,
}

/// Lazily split `text` into lines carrying byte and character offsets.
pub(crate) fn lines(text: &str) -> Lines<'_> {
    Lines {
        raw: text.split_inclusive('\n'),
        byte: 0,
        chars: 0,
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Line<'a>> {
        let raw = self.raw.next()?;
        let body = raw.strip_suffix('\n').unwrap_or(raw);
        let body = body.strip_suffix('\r').unwrap_or(body);
        let line = Line {
            text: body,
            start: self.byte,
            char_start: self.chars,
        };
        self.byte += raw.len();
        self.chars += raw.chars().count();
        Some(line)
    }
}

/// Segment spanning from the first to the last non-blank line of `lines`.
///
/// Trailing whitespace is always dropped; the first line's indentation only
/// when `trim_indent` is set. The text is the exact source slice, so interior
/// blank lines and line terminators are preserved.
pub(crate) fn span_segment(text: &str, lines: &[Line<'_>], trim_indent: bool) -> Option<Segment> {
    let first = lines.iter().find(|l| !l.is_blank())?;
    let last = lines.iter().rev().find(|l| !l.is_blank())?;

    let (start, char_start) = if trim_indent {
        let indent = first.indent();
        (
            first.start + indent.len(),
            first.char_start + indent.chars().count(),
        )
    } else {
        (first.start, first.char_start)
    };

    Some(Segment::new(
        &text[start..last.content_end()],
        char_start..last.content_char_end(),
    ))
}

// ── Paragraphs ──────────────────────────────────────────────────────────────

/// Paragraphs are runs of non-blank lines separated by blank lines.
pub struct Paragraphs<'a> {
    text: &'a str,
    lines: Peekable<Lines<'a>>,
}

impl<'a> Paragraphs<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            lines: lines(text).peekable(),
        }
    }
}

impl Iterator for Paragraphs<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        while self.lines.next_if(|l| l.is_blank()).is_some() {}

        let mut group = Vec::new();
        while let Some(line) = self.lines.next_if(|l| !l.is_blank()) {
            group.push(line);
        }
        span_segment(self.text, &group, true)
    }
}
