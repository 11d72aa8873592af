use crate::palette::color::Color;

const fn c(hex: u32) -> Color {
    Color::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

// Searched in order; the first keyword contained in the text wins.
const THEME_SCHEMES: &[(&str, [Color; 3])] = &[
    ("宠物", [c(0xFFB6C1), c(0x87CEEB), c(0x98FB98)]),
    ("科技", [c(0x1E90FF), c(0x00CED1), c(0xFFD700)]),
    ("自然", [c(0x228B22), c(0x90EE90), c(0xF0E68C)]),
    ("美食", [c(0xFF6347), c(0xFFD700), c(0x98D8C8)]),
    ("旅行", [c(0x4682B4), c(0xFFA500), c(0x32CD32)]),
    ("时尚", [c(0xFF69B4), c(0x4169E1), c(0xFFD700)]),
    ("儿童", [c(0xFF6B6B), c(0x4ECDC4), c(0x45B7D1)]),
    ("商务", [c(0x2C3E50), c(0x3498DB), c(0xE74C3C)]),
    ("艺术", [c(0x9B59B6), c(0xE67E22), c(0x1ABC9C)]),
    ("运动", [c(0xE74C3C), c(0x3498DB), c(0x2ECC71)]),
];

fn find_scheme(text: &str) -> Option<&'static (&'static str, [Color; 3])> {
    THEME_SCHEMES.iter().find(|(keyword, _)| text.contains(keyword))
}

pub fn theme_keyword(text: &str) -> Option<&'static str> {
    find_scheme(text).map(|(keyword, _)| *keyword)
}

pub fn colors_for_theme(text: &str) -> Option<[Color; 3]> {
    find_scheme(text).map(|(_, colors)| *colors)
}

pub fn known_keywords() -> impl Iterator<Item = &'static str> {
    THEME_SCHEMES.iter().map(|(keyword, _)| *keyword)
}
