//! Color argument parsing: hex (#RGB, #RGBA, #RRGGBB, #RRGGBBAA) and a few names.

use crate::geometry::Color;

/// Parse a color string.
///
/// The leading `#` is optional. Names are case-insensitive.
pub(crate) fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let hex = s.strip_prefix('#').unwrap_or(s);
    parse_hex(hex).or_else(|| lookup_named(s))
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let b = hex.as_bytes();
    match b.len() {
        3 => Some(Color::rgb(nibble(b[0])?, nibble(b[1])?, nibble(b[2])?)),
        4 => Some(Color::rgba(
            nibble(b[0])?,
            nibble(b[1])?,
            nibble(b[2])?,
            nibble(b[3])?,
        )),
        6 => Some(Color::rgb(byte(&b[0..2])?, byte(&b[2..4])?, byte(&b[4..6])?)),
        8 => Some(Color::rgba(
            byte(&b[0..2])?,
            byte(&b[2..4])?,
            byte(&b[4..6])?,
            byte(&b[6..8])?,
        )),
        _ => None,
    }
}

/// Single hex digit doubled: `f` → `0xff`.
fn nibble(ch: u8) -> Option<u8> {
    let n = (ch as char).to_digit(16)? as u8;
    Some(n << 4 | n)
}

fn byte(pair: &[u8]) -> Option<u8> {
    let hi = (pair[0] as char).to_digit(16)? as u8;
    let lo = (pair[1] as char).to_digit(16)? as u8;
    Some(hi << 4 | lo)
}

/// Names likely to show up on a dark caption border. Sorted for binary search.
const NAMED: &[(&str, Color)] = &[
    ("black", Color::rgb(0, 0, 0)),
    ("darkgray", Color::rgb(169, 169, 169)),
    ("darkgrey", Color::rgb(169, 169, 169)),
    ("dimgray", Color::rgb(105, 105, 105)),
    ("dimgrey", Color::rgb(105, 105, 105)),
    ("gold", Color::rgb(255, 215, 0)),
    ("gray", Color::rgb(128, 128, 128)),
    ("grey", Color::rgb(128, 128, 128)),
    ("lightgray", Color::rgb(211, 211, 211)),
    ("lightgrey", Color::rgb(211, 211, 211)),
    ("navy", Color::rgb(0, 0, 128)),
    ("orange", Color::rgb(255, 165, 0)),
    ("red", Color::rgb(255, 0, 0)),
    ("silver", Color::rgb(192, 192, 192)),
    ("transparent", Color::transparent()),
    ("white", Color::rgb(255, 255, 255)),
    ("yellow", Color::rgb(255, 255, 0)),
];

fn lookup_named(name: &str) -> Option<Color> {
    let mut buf = [0u8; 16];
    let bytes = name.as_bytes();
    if bytes.len() > buf.len() {
        return None;
    }
    for (dst, src) in buf.iter_mut().zip(bytes) {
        *dst = src.to_ascii_lowercase();
    }
    let lower = core::str::from_utf8(&buf[..bytes.len()]).ok()?;
    NAMED
        .binary_search_by_key(&lower, |&(n, _)| n)
        .ok()
        .map(|i| NAMED[i].1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_table_sorted() {
        for w in NAMED.windows(2) {
            assert!(w[0].0 < w[1].0, "{} >= {}", w[0].0, w[1].0);
        }
    }

    #[test]
    fn six_digit_hex() {
        assert_eq!(parse_color("#303030"), Some(Color::rgb(0x30, 0x30, 0x30)));
        assert_eq!(parse_color("FFcc00"), Some(Color::rgb(0xff, 0xcc, 0x00)));
    }

    #[test]
    fn short_hex_expands() {
        assert_eq!(parse_color("#fff"), Some(Color::white()));
        assert_eq!(parse_color("#f008"), Some(Color::rgba(0xff, 0, 0, 0x88)));
    }

    #[test]
    fn eight_digit_hex_keeps_alpha() {
        assert_eq!(parse_color("#11223344"), Some(Color::rgba(0x11, 0x22, 0x33, 0x44)));
    }

    #[test]
    fn names_case_insensitive() {
        assert_eq!(parse_color("White"), Some(Color::white()));
        assert_eq!(parse_color("TRANSPARENT"), Some(Color::transparent()));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_color(""), None);
        assert_eq!(parse_color("#12345"), None);
        assert_eq!(parse_color("#gggggg"), None);
        assert_eq!(parse_color("chartreusepurplehaze"), None);
    }
}
