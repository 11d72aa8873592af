use crate::data::deck::Card;
use crate::palette::color::{Color, BLACK, WHITE};

const fn c(hex: u32) -> Color {
    Color::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

struct Preset {
    id: &'static str,
    name: &'static str,
    number: &'static str,
    title: &'static str,
    mood: &'static str,
    colors: [Color; 3],
    text_color: Color,
}

const PRESETS: &[Preset] = &[
    Preset { id: "p1", name: "氛围感", number: "8", title: "种氛围感", mood: "氛围感", colors: [c(0xF4F3E3), c(0xA6B48B), c(0x2D5016)], text_color: BLACK },
    Preset { id: "p2", name: "治愈感", number: "8", title: "种治愈感", mood: "治愈感", colors: [c(0xE0F7FA), c(0x80DEEA), c(0x0097A7)], text_color: BLACK },
    Preset { id: "p3", name: "高级感", number: "8", title: "种高级感", mood: "高级感", colors: [c(0xEFEBE9), c(0xA1887F), c(0x4E342E)], text_color: BLACK },
    Preset { id: "p4", name: "机械感", number: "4", title: "种机械感", mood: "机械感", colors: [c(0x263238), c(0x546E7A), c(0xB0BEC5)], text_color: WHITE },
    Preset { id: "p5", name: "清新感", number: "7", title: "种清新感", mood: "清新感", colors: [c(0xF1F8E9), c(0xDCEDC8), c(0x8BC34A)], text_color: BLACK },
    Preset { id: "p6", name: "柔和感", number: "7", title: "种柔和感", mood: "柔和感", colors: [c(0xFFF3E0), c(0xFFCCBC), c(0xFF9800)], text_color: BLACK },
    Preset { id: "p7", name: "治愈感2", number: "8", title: "种治愈感", mood: "治愈感", colors: [c(0xE8F5E8), c(0xC8E6C9), c(0x4CAF50)], text_color: BLACK },
    Preset { id: "p8", name: "柔和", number: "3", title: "种宠物之家温馨感", mood: "柔和", colors: [c(0xF5F5F5), c(0xE0E0E0), c(0xBDBDBD)], text_color: BLACK },
    Preset { id: "p9", name: "横版示例", number: "3", title: "种横版展示效果", mood: "柔和", colors: [c(0xF5F5F5), c(0xE0E0E0), c(0xBDBDBD)], text_color: BLACK },
];

pub const INITIAL_SELECTION: &str = "p8";

/// First id handed out to cards added during the session.
pub const FIRST_FREE_ID: u64 = 10;

pub fn preset_cards() -> Vec<Card> {
    PRESETS
        .iter()
        .map(|p| Card {
            id: p.id.to_string(),
            name: p.name.to_string(),
            number: p.number.to_string(),
            title: p.title.to_string(),
            mood: p.mood.to_string(),
            colors: p.colors,
            text_color: p.text_color,
            image: None,
        })
        .collect()
}

pub fn blank_card(id: String) -> Card {
    Card {
        id,
        name: "新卡片".to_string(),
        number: "0".to_string(),
        title: "新配色".to_string(),
        mood: "新风格".to_string(),
        colors: [c(0xF0F0F0), c(0xE0E0E0), c(0xD0D0D0)],
        text_color: BLACK,
        image: None,
    }
}
