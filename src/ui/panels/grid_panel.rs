use crate::app::state::AppState;
use crate::data::deck::Card;
use crate::ui::borders;
use crate::ui::components::swatch;
use crate::ui::theme::Theme;
use crate::utils::text::fit_width;
use ratatui::layout::{Margin, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub const CARD_W: u16 = 24;
pub const CARD_H: u16 = 8;

#[derive(Debug, Default, Clone)]
pub struct GridLayout {
    pub columns: usize,
    /// Visible cards only: (deck index, rect).
    pub cards: Vec<(usize, Rect)>,
}

/// Lays cards out row by row, scrolled so the selected card is on screen.
pub fn layout(area: Rect, card_count: usize, selected: usize) -> GridLayout {
    let inner = area.inner(&Margin { horizontal: 1, vertical: 1 });
    let columns = (inner.width / CARD_W).max(1) as usize;
    let visible_rows = (inner.height / CARD_H).max(1) as usize;

    let selected_row = selected / columns;
    let first_row = selected_row.saturating_sub(visible_rows - 1);

    let mut cards = Vec::new();
    for i in 0..card_count {
        let row = i / columns;
        if row < first_row || row >= first_row + visible_rows {
            continue;
        }
        let col = (i % columns) as u16;
        let y_off = (row - first_row) as u16 * CARD_H;
        cards.push((
            i,
            Rect {
                x: inner.x + col * CARD_W,
                y: inner.y + y_off,
                width: CARD_W.min(inner.width),
                height: CARD_H.min(inner.height.saturating_sub(y_off)),
            },
        ));
    }

    GridLayout { columns, cards }
}

pub fn render(f: &mut Frame, area: Rect, app: &AppState, l: &GridLayout) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(borders::for_theme(&app.theme))
        .title(format!(" Cards ({}) ", app.deck.len()))
        .style(Style::default().fg(app.theme.color_subtext()));
    f.render_widget(block, area);

    let selected = app.deck.selected_index();
    for (idx, rect) in &l.cards {
        if let Some(card) = app.deck.cards().get(*idx) {
            render_card(f, *rect, card, *idx == selected, app.is_analyzing(&card.id), &app.theme);
        }
    }
}

fn render_card(f: &mut Frame, area: Rect, card: &Card, selected: bool, analyzing: bool, theme: &Theme) {
    let border_style = if selected {
        Style::default().fg(theme.color_accent()).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.color_subtext())
    };
    f.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .border_set(borders::for_theme(theme))
            .style(border_style),
        area,
    );

    let inner = area.inner(&Margin { horizontal: 1, vertical: 1 });
    if inner.width == 0 || inner.height == 0 {
        return;
    }
    let width = inner.width as usize;
    let row = |n: u16| Rect {
        x: inner.x,
        y: inner.y + n,
        width: inner.width,
        height: 1,
    };

    // title bar uses the card's own first color and text color
    let title = fit_width(&format!("{} {}", card.number, card.title), width);
    let title_style = Style::default()
        .fg(theme.swatch(card.text_color))
        .bg(theme.swatch(card.colors[0]))
        .add_modifier(Modifier::BOLD);
    f.render_widget(
        Paragraph::new(format!("{title:<width$}", width = width)).style(title_style),
        row(0),
    );

    for (n, color) in card.colors.iter().enumerate() {
        let r = row(1 + n as u16);
        if r.y < inner.y + inner.height {
            swatch::render(f, r, theme, *color);
        }
    }

    if inner.height > 4 {
        f.render_widget(
            Paragraph::new(fit_width(&card.mood, width)).style(Style::default().fg(theme.color_text())),
            row(4),
        );
    }

    if inner.height > 5 {
        let mut spans = Vec::new();
        if let Some(img) = &card.image {
            spans.push(Span::styled(
                fit_width(&format!("▣ {}", img.file_name()), width),
                Style::default().fg(theme.color_accent2()),
            ));
        }
        if analyzing {
            spans.push(Span::styled(" …", Style::default().fg(theme.color_accent3())));
        }
        f.render_widget(Paragraph::new(Line::from(spans)), row(5));
    }
}
