//! Page geometry, layout cursors and Helvetica text measurement.
//!
//! Coordinates are points measured from the top-left corner of the page;
//! the document writer flips them into PDF space.

use std::cmp::Ordering;

/// A4 portrait in points
pub const A4_WIDTH: f32 = 595.28;
pub const A4_HEIGHT: f32 = 841.89;

const HEADER_BAND: f32 = 96.0;
const FOOTER_BAND: f32 = 48.0;
const MARGIN: f32 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    /// First usable y below the header band
    pub content_top: f32,
    /// Last usable y above the footer band
    pub content_bottom: f32,
}

impl PageGeometry {
    pub fn a4() -> Self {
        Self {
            width: A4_WIDTH,
            height: A4_HEIGHT,
            margin_left: MARGIN,
            margin_right: MARGIN,
            content_top: HEADER_BAND,
            content_bottom: A4_HEIGHT - FOOTER_BAND,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    pub fn right_edge(&self) -> f32 {
        self.width - self.margin_right
    }

    pub fn top_of(&self, page: usize) -> Cursor {
        Cursor {
            page,
            y: self.content_top,
        }
    }

    pub fn fits(&self, cursor: Cursor, height: f32) -> bool {
        cursor.y + height <= self.content_bottom
    }

    /// Cursor where a block of `height` can start: unchanged when it fits,
    /// otherwise the top of the next page. The flag reports a page break.
    pub fn ensure_space(&self, cursor: Cursor, height: f32) -> (Cursor, bool) {
        if self.fits(cursor, height) || cursor.y <= self.content_top {
            (cursor, false)
        } else {
            (self.top_of(cursor.page + 1), true)
        }
    }
}

/// Position of a layout stream: page index plus y offset on that page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub page: usize,
    pub y: f32,
}

impl Cursor {
    pub fn advance(self, dy: f32) -> Self {
        Self {
            page: self.page,
            y: self.y + dy,
        }
    }

    fn order(&self, other: &Self) -> Ordering {
        self.page
            .cmp(&other.page)
            .then(self.y.partial_cmp(&other.y).unwrap_or(Ordering::Equal))
    }
}

/// The later of two column cursors, ordered by page and then y.
///
/// Shared layout after side-by-side columns continues below whichever column
/// finished last.
pub fn resume_at_max(a: Cursor, b: Cursor) -> Cursor {
    match a.order(&b) {
        Ordering::Less => b,
        _ => a,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
}

// Helvetica advance widths (1/1000 em) for printable ASCII 0x20..=0x7E
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

const DEFAULT_GLYPH_WIDTH: u16 = 556;
const BOLD_FACTOR: f32 = 1.07;

/// Rendered width of `text` in points
pub fn text_width(text: &str, size: f32, style: FontStyle) -> f32 {
    let units: u32 = text
        .chars()
        .map(|c| {
            let code = c as u32;
            if (0x20..=0x7E).contains(&code) {
                HELVETICA_WIDTHS[(code - 0x20) as usize] as u32
            } else {
                DEFAULT_GLYPH_WIDTH as u32
            }
        })
        .sum();

    let width = units as f32 * size / 1000.0;
    match style {
        FontStyle::Bold => width * BOLD_FACTOR,
        _ => width,
    }
}

/// Greedy word wrap. Explicit newlines are kept; words wider than the line
/// are split by character.
pub fn wrap_text(text: &str, size: f32, style: FontStyle, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for raw_line in text.split('\n') {
        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if text_width(&candidate, size, style) <= max_width {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            if text_width(word, size, style) <= max_width {
                current = word.to_string();
            } else {
                for ch in word.chars() {
                    let mut next = current.clone();
                    next.push(ch);
                    if !current.is_empty() && text_width(&next, size, style) > max_width {
                        lines.push(std::mem::take(&mut current));
                        current.push(ch);
                    } else {
                        current = next;
                    }
                }
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}
