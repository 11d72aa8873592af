use crate::palette::color::Color;
use crate::palette::hsl::{hsl_to_rgb, rgb_to_hsl};

/// Lightness / saturation deltas applied in HSL space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MoodStyle {
    pub brightness: f64,
    pub saturation: f64,
}

impl MoodStyle {
    pub const NEUTRAL: MoodStyle = MoodStyle { brightness: 0.0, saturation: 0.0 };

    const fn new(brightness: f64, saturation: f64) -> Self {
        Self { brightness, saturation }
    }

    pub fn apply(&self, color: Color) -> Color {
        let (h, s, l) = rgb_to_hsl(color.r, color.g, color.b);
        let l = (l + self.brightness).clamp(0.0, 1.0);
        let s = (s + self.saturation).clamp(0.0, 1.0);
        let (r, g, b) = hsl_to_rgb(h, s, l);
        Color::new(r, g, b)
    }
}

const MOOD_STYLES: &[(&str, MoodStyle)] = &[
    ("温馨", MoodStyle::new(0.1, 0.2)),
    ("活力", MoodStyle::new(0.2, 0.3)),
    ("科技感", MoodStyle::new(-0.1, 0.1)),
    ("简约", MoodStyle::new(0.1, -0.2)),
    ("自然", MoodStyle::new(0.05, 0.1)),
    ("奢华", MoodStyle::new(-0.05, 0.2)),
    ("清新", MoodStyle::new(0.15, 0.1)),
    ("沉稳", MoodStyle::new(-0.1, -0.1)),
    ("浪漫", MoodStyle::new(0.1, 0.2)),
    ("复古", MoodStyle::new(-0.05, 0.15)),
];

pub fn known_moods() -> impl Iterator<Item = &'static str> {
    MOOD_STYLES.iter().map(|(name, _)| *name)
}

pub fn lookup_mood(word: &str) -> Option<MoodStyle> {
    let word = word.trim();
    MOOD_STYLES.iter().find(|(name, _)| *name == word).map(|(_, style)| *style)
}

/// Unknown (or empty) mood words resolve to [`MoodStyle::NEUTRAL`].
pub fn mood_style(word: &str) -> MoodStyle {
    lookup_mood(word).unwrap_or(MoodStyle::NEUTRAL)
}

pub fn adjust_colors_by_mood(colors: &[Color], mood: &str) -> Vec<Color> {
    let style = mood_style(mood);
    colors.iter().map(|c| style.apply(*c)).collect()
}
