//! Helvetica glyph metrics and text fitting
//!
//! Widths come from the Adobe AFM files for the standard 14 fonts, in 1/1000
//! em units, indexed from ASCII 32. Oblique faces share the upright widths.

use crate::style::FontFace;

/// Millimetres per PostScript point
pub const MM_PER_PT: f32 = 25.4 / 72.0;

/// Baseline-to-baseline distance as a multiple of the font size
pub const LINE_HEIGHT_FACTOR: f32 = 1.15;

const ELLIPSIS: &str = "...";

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

fn glyph_width(c: char, face: FontFace) -> u16 {
    let bold = face.is_bold();
    match c {
        ' '..='~' => {
            let table = if bold { &HELVETICA_BOLD } else { &HELVETICA };
            table[c as usize - 32]
        }
        '\u{2022}' => 350,
        '\u{2013}' => 556,
        '\u{2014}' | '\u{2026}' => 1000,
        '\u{2018}' | '\u{2019}' => {
            if bold {
                278
            } else {
                222
            }
        }
        '\u{201C}' | '\u{201D}' => {
            if bold {
                500
            } else {
                333
            }
        }
        _ => 556,
    }
}

/// Replace characters the WinAnsi-encoded standard fonts cannot show.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{20B9}' => out.push_str("Rs."),
            '\t' | '\r' => out.push(' '),
            _ => out.push(c),
        }
    }
    out
}

/// Rendered width of `text` in millimetres at `size` points
pub fn text_width(text: &str, face: FontFace, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| glyph_width(c, face) as u32).sum();
    units as f32 / 1000.0 * size * MM_PER_PT
}

pub fn line_height(size: f32) -> f32 {
    size * LINE_HEIGHT_FACTOR * MM_PER_PT
}

/// Greedy word wrap to `max_width` millimetres.
///
/// Explicit newlines start a new line. A word wider than the line on its own
/// is broken between characters.
pub fn split_text_to_size(text: &str, face: FontFace, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();

        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };
            if text_width(&candidate, face, size) <= max_width {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            if text_width(word, face, size) <= max_width {
                current = word.to_string();
                continue;
            }

            for c in word.chars() {
                let mut next = current.clone();
                next.push(c);
                if !current.is_empty() && text_width(&next, face, size) > max_width {
                    lines.push(std::mem::take(&mut current));
                    current.push(c);
                } else {
                    current = next;
                }
            }
        }

        lines.push(current);
    }

    lines
}

/// Shorten `text` with a trailing ellipsis until it fits `max_width`.
pub fn fit_text(text: &str, face: FontFace, size: f32, max_width: f32) -> String {
    if text_width(text, face, size) <= max_width {
        return text.to_string();
    }

    let mut chars: Vec<char> = text.chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let candidate: String = chars.iter().collect::<String>().trim_end().to_string() + ELLIPSIS;
        if text_width(&candidate, face, size) <= max_width {
            return candidate;
        }
    }
    ELLIPSIS.to_string()
}

/// Keep at most `max_lines`, marking the cut on the last kept line.
pub fn clamp_lines(
    mut lines: Vec<String>,
    max_lines: usize,
    face: FontFace,
    size: f32,
    max_width: f32,
) -> Vec<String> {
    if lines.len() <= max_lines {
        return lines;
    }
    lines.truncate(max_lines);
    if let Some(last) = lines.last_mut() {
        let marked = format!("{}{}", last.trim_end(), ELLIPSIS);
        *last = fit_text(&marked, face, size, max_width);
        if !last.ends_with(ELLIPSIS) {
            last.push_str(ELLIPSIS);
        }
    }
    lines
}
