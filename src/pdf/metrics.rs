/// Advance widths of Helvetica-Bold for the printable ASCII range, in 1/1000 em.
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 0..?
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // P.._
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // `..o
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // p..~
];

/// Width of `text` set in Helvetica-Bold at `size` (same unit as `size`).
///
/// Characters outside printable ASCII count as a digit width.
pub fn helvetica_bold_width(text: &str, size: f64) -> f64 {
    let units = text
        .chars()
        .map(|c| {
            let code = c as u32;
            if (32..127).contains(&code) {
                f64::from(HELVETICA_BOLD[(code - 32) as usize])
            } else {
                556.0
            }
        })
        .sum::<f64>();
    units * size / 1000.0
}

/// WinAnsi (cp1252) code for `ch`, the encoding declared for the base-14 title font.
pub fn winansi_byte(ch: char) -> Option<u8> {
    let byte = match ch {
        '\u{0020}'..='\u{007E}' | '\u{00A0}'..='\u{00FF}' => ch as u8,
        '\u{20AC}' => 0x80,
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        _ => return None,
    };
    Some(byte)
}

/// Encode `text` for the title font, or return the first character it cannot show.
pub fn encode_winansi(text: &str) -> Result<Vec<u8>, char> {
    text.chars().map(|c| winansi_byte(c).ok_or(c)).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/pdf/metrics.rs"]
mod tests;
