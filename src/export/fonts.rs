//! Advance widths of the standard Helvetica faces used by the textual export.
//!
//! Widths are in 1/1000 em, indexed by the WinAnsi byte that [`encode_win_ansi`]
//! actually writes, so measuring matches what the PDF viewer draws.

use super::text::{FontStyle, encode_win_ansi};

/// Helvetica, bytes 0x20..=0x7E.
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // space-/
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0-9
    278, 278, 584, 584, 584, 556, 1015, // :-@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A-M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N-Z
    278, 278, 278, 469, 556, 333, // [-`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a-m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n-z
    334, 260, 334, 584, // {-~
];

/// Helvetica-Bold, bytes 0x20..=0x7E.
const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // space-/
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0-9
    333, 333, 584, 584, 584, 611, 975, // :-@
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // A-M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N-Z
    333, 278, 333, 584, 556, 333, // [-`
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // a-m
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // n-z
    389, 280, 389, 584, // {-~
];

/// Bytes 0xA0..=0xFF, the wider of the two faces at each position.
const LATIN1_SUPPLEMENT: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333, // A0
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611, // B0
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // C0
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // D0
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278, // E0
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556, // F0
];

/// Glyphs without a table entry are measured as a full em.
const FALLBACK_WIDTH: u16 = 1000;

fn glyph_width(byte: u8, font: FontStyle) -> u16 {
    match byte {
        0x20..=0x7e => {
            let table = match font {
                FontStyle::Regular => &HELVETICA_ASCII,
                FontStyle::Bold => &HELVETICA_BOLD_ASCII,
            };
            table[(byte - 0x20) as usize]
        }
        0xa0..=0xff => LATIN1_SUPPLEMENT[(byte - 0xa0) as usize],
        0x80 | 0x96 => 556,
        0x85 | 0x97 => 1000,
        0x91 | 0x92 => match font {
            FontStyle::Regular => 222,
            FontStyle::Bold => 278,
        },
        0x93 | 0x94 => match font {
            FontStyle::Regular => 333,
            FontStyle::Bold => 500,
        },
        0x95 => 350,
        _ => FALLBACK_WIDTH,
    }
}

/// Width of `text` in points when drawn in `font` at `size`.
pub fn text_width(text: &str, font: FontStyle, size: f64) -> f64 {
    let units: u32 = encode_win_ansi(text)
        .into_iter()
        .map(|b| glyph_width(b, font) as u32)
        .sum();
    units as f64 / 1000.0 * size
}
