use crate::palette::Color as Rgb;
use crate::ui::theme::Theme;
use crate::utils::text::center;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Fill in the swatch color, label in its contrast text color.
pub fn style(theme: &Theme, color: Rgb) -> Style {
    Style::default()
        .fg(theme.swatch(color.contrast_text()))
        .bg(theme.swatch(color))
}

/// Fills `area` with `color` and centers its hex code on the middle row.
pub fn render(f: &mut Frame, area: Rect, theme: &Theme, color: Rgb) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let width = area.width as usize;
    let label_row = area.height / 2;
    let hex = color.to_string();

    let lines: Vec<Line> = (0..area.height)
        .map(|row| {
            if row == label_row {
                Line::raw(center(&hex, width))
            } else {
                Line::raw(" ".repeat(width))
            }
        })
        .collect();

    f.render_widget(Paragraph::new(lines).style(style(theme, color)), area);
}
