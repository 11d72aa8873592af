use crate::app::state::AppState;
use crate::data::deck::{Card, CardImage};
use crate::render::image_preview::{is_landscape, PreviewCells};
use crate::render::preview_cache::PreviewKey;
use crate::ui::borders;
use crate::ui::components::swatch;
use crate::ui::theme::Theme;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::block::{Position, Title};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(card) = app.deck.selected() else {
        return;
    };

    f.render_widget(Clear, area);
    let mut base = Style::default().fg(app.theme.color_subtext());
    if !app.config.transparent_background {
        base = base.bg(app.theme.color_base());
    }
    f.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .border_set(borders::for_theme(&app.theme))
            .title(format!(" {} · {} ", card.name, card.id))
            .title(Title::from(" Esc Close  ←/→ Prev/Next ").position(Position::Bottom))
            .style(base),
        area,
    );

    let inner = area.inner(&Margin { horizontal: 2, vertical: 1 });

    // landscape images get the full width on top; everything else sits beside the info column
    let landscape = card.image.as_ref().is_some_and(|img| is_landscape(&img.bytes));
    let parts = if landscape {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Min(6)])
            .split(inner)
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(inner)
    };

    match &card.image {
        Some(img) => render_image(f, parts[0], app, img),
        None => render_bands(f, parts[0], card, &app.theme),
    }
    render_info(f, parts[1].inner(&Margin { horizontal: 1, vertical: 0 }), card, &app.theme);
}

fn render_image(f: &mut Frame, area: Rect, app: &AppState, img: &CardImage) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let key = PreviewKey {
        hash: img.hash,
        width: area.width,
        height: area.height,
    };

    let Some(cells) = app.preview(key) else {
        app.queue_preview_render(key, img.bytes.clone());
        f.render_widget(
            Paragraph::new("Rendering preview…")
                .style(Style::default().fg(app.theme.color_subtext()))
                .alignment(Alignment::Center),
            area,
        );
        return;
    };

    if cells.is_empty() {
        f.render_widget(
            Paragraph::new(format!("Cannot preview {}", img.file_name()))
                .style(Style::default().fg(app.theme.color_accent3()))
                .alignment(Alignment::Center),
            area,
        );
        return;
    }

    let target = Rect {
        x: area.x + area.width.saturating_sub(cells.width) / 2,
        y: area.y + area.height.saturating_sub(cells.height) / 2,
        width: cells.width.min(area.width),
        height: cells.height.min(area.height),
    };
    f.render_widget(Paragraph::new(preview_lines(&cells, &app.theme)), target);
}

fn preview_lines(cells: &PreviewCells, theme: &Theme) -> Vec<Line<'static>> {
    (0..cells.height)
        .map(|y| {
            let spans: Vec<Span> = cells
                .row(y)
                .iter()
                .map(|(top, bottom)| match (top, bottom) {
                    (Some(t), Some(b)) => Span::styled("▀", Style::default().fg(theme.swatch(*t)).bg(theme.swatch(*b))),
                    (Some(t), None) => Span::styled("▀", Style::default().fg(theme.swatch(*t))),
                    (None, Some(b)) => Span::styled("▄", Style::default().fg(theme.swatch(*b))),
                    (None, None) => Span::raw(" "),
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

/// Without an image the card's colors fill the preview area as vertical bands.
fn render_bands(f: &mut Frame, area: Rect, card: &Card, theme: &Theme) {
    let bands = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3), Constraint::Ratio(1, 3), Constraint::Ratio(1, 3)])
        .split(area);
    for (rect, color) in bands.iter().zip(card.colors.iter()) {
        swatch::render(f, *rect, theme, *color);
    }
}

fn render_info(f: &mut Frame, area: Rect, card: &Card, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(3),
            Constraint::Min(3),
            Constraint::Min(3),
        ])
        .split(area);

    let title = Style::default()
        .fg(theme.swatch(card.text_color))
        .bg(theme.swatch(card.colors[0]))
        .add_modifier(Modifier::BOLD);
    let sub = Style::default().fg(theme.color_subtext());
    let head = vec![
        Line::styled(format!(" {}  {} ", card.number, card.title), title),
        Line::raw(""),
        Line::from(vec![
            Span::styled("Style ", sub),
            Span::styled(card.mood.clone(), Style::default().fg(theme.color_text())),
        ]),
    ];
    f.render_widget(Paragraph::new(head), rows[0]);

    for (rect, color) in rows[1..].iter().zip(card.colors.iter()) {
        let r = Rect {
            height: rect.height.saturating_sub(1).max(1),
            ..*rect
        };
        swatch::render(f, r, theme, *color);
    }
}
