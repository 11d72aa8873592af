use crate::app::state::AppState;
use crate::palette::mood::{known_moods, lookup_mood};
use crate::palette::theme_keywords::{known_keywords, theme_keyword};
use crate::ui::borders;
use crate::ui::components::swatch;
use crate::utils::text::fit_width;
use ratatui::layout::{Alignment, Margin, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

const LABEL_W: usize = 8;

#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleLayout {
    pub inner: Rect,
    pub body: Rect,
    pub analyze_button: Rect,
}

pub fn layout(area: Rect) -> ConsoleLayout {
    let inner = area.inner(&Margin { horizontal: 2, vertical: 1 });
    let button_y = inner.y + inner.height.saturating_sub(1);
    ConsoleLayout {
        inner,
        body: Rect {
            height: inner.height.saturating_sub(2),
            ..inner
        },
        analyze_button: Rect {
            x: inner.x,
            y: button_y,
            width: inner.width,
            height: inner.height.min(1),
        },
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &AppState, l: &ConsoleLayout) {
    f.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .border_set(borders::for_theme(&app.theme))
            .title(" Console ")
            .style(Style::default().fg(app.theme.color_subtext())),
        area,
    );

    let text = Style::default().fg(app.theme.color_text());
    let sub = Style::default().fg(app.theme.color_subtext());
    let head = Style::default().fg(app.theme.color_accent()).add_modifier(Modifier::BOLD);
    let width = l.inner.width as usize;

    let field = |label: &str, key: &str, value: &str| -> Line<'static> {
        let value_w = width.saturating_sub(LABEL_W + key.len() + 3);
        Line::from(vec![
            Span::styled(format!("{label:<LABEL_W$}"), sub),
            Span::styled(fit_width(value, value_w), text),
            Span::styled(format!("  [{key}]"), sub),
        ])
    };

    let mut lines: Vec<Line> = Vec::new();

    // analysis inputs
    lines.push(Line::styled("Analysis", head));
    let image = app
        .uploaded_image
        .as_ref()
        .map(|img| img.file_name())
        .unwrap_or_else(|| "(none)".to_string());
    lines.push(field("Image", "i", &image));
    lines.push(field("Theme", "t", &app.theme_word));
    let theme_hint = match theme_keyword(&app.theme_word) {
        Some(keyword) => format!("matches {keyword}"),
        None => "no theme keyword".to_string(),
    };
    lines.push(Line::styled(format!("{:LABEL_W$}{theme_hint}", ""), sub));
    lines.push(field("Mood", "m", &app.mood_word));
    let mood_hint = match lookup_mood(&app.mood_word) {
        Some(style) => format!("light {:+.2}  sat {:+.2}", style.brightness, style.saturation),
        None => "neutral".to_string(),
    };
    lines.push(Line::styled(format!("{:LABEL_W$}{mood_hint}", ""), sub));
    lines.push(Line::raw(""));

    if let Some(card) = app.deck.selected() {
        lines.push(Line::styled(format!("Card {}", card.id), head));
        lines.push(field("Name", "r", &card.name));
        lines.push(field("Number", "#", &card.number));
        lines.push(field("Title", "T", &card.title));
        lines.push(field("Style", "s", &card.mood));

        let mut spans = vec![Span::styled(format!("{:<LABEL_W$}", "Colors"), sub)];
        for (i, color) in card.colors.iter().enumerate() {
            spans.push(Span::styled(format!(" {} ", color), swatch::style(&app.theme, *color)));
            spans.push(Span::styled(format!("{} ", i + 1), sub));
        }
        lines.push(Line::from(spans));
        lines.push(Line::raw(""));
    }

    lines.push(Line::styled(
        format!("Themes: {}", known_keywords().collect::<Vec<_>>().join(" ")),
        sub,
    ));
    lines.push(Line::styled(
        format!("Moods: {}", known_moods().collect::<Vec<_>>().join(" ")),
        sub,
    ));

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), l.body);

    let analyzing = app.deck.selected().is_some_and(|c| app.is_analyzing(&c.id));
    let (label, style) = if analyzing {
        ("Analyzing…", Style::default().fg(app.theme.color_accent3()))
    } else {
        (
            "[ Analyze (a) ]",
            Style::default()
                .fg(app.theme.color_base())
                .bg(app.theme.color_accent())
                .add_modifier(Modifier::BOLD),
        )
    };
    f.render_widget(
        Paragraph::new(label).style(style).alignment(Alignment::Center),
        l.analyze_button,
    );
}
