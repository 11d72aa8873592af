use crate::app::state::{AppState, Overlay};
use crate::ui::panels::console_panel::{self, ConsoleLayout};
use crate::ui::panels::fullscreen_panel;
use crate::ui::panels::grid_panel::{self, GridLayout};
use crate::utils::input::Action;
use anyhow::Result;
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{event, terminal};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Terminal;
use std::io::{self, Stdout};

pub const SETTINGS_ITEMS: usize = 3;

#[derive(Debug, Default, Clone)]
pub struct UiLayout {
    pub full: Rect,
    /// Zero-sized when the console is hidden.
    pub console: ConsoleLayout,
    pub grid: GridLayout,
}

pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Tui {
    pub fn new() -> Result<Self> {
        let stdout = io::stdout();
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }

    pub fn enter(&mut self) -> Result<()> {
        execute!(io::stdout(), EnterAlternateScreen, event::EnableMouseCapture)?;
        terminal::enable_raw_mode()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        execute!(io::stdout(), event::DisableMouseCapture, LeaveAlternateScreen)?;
        Ok(())
    }

    pub fn draw(&mut self, app: &AppState) -> Result<UiLayout> {
        let mut layout_out = UiLayout::default();

        self.terminal.draw(|f| {
            let size = f.size();
            layout_out.full = size;

            f.render_widget(Clear, size);
            let mut base_style = Style::default().fg(app.theme.color_text());
            if !app.config.transparent_background {
                base_style = base_style.bg(app.theme.color_base());
            }
            f.render_widget(Block::default().style(base_style), size);

            // small terminal: keep stable, hide everything else
            if size.width < 40 || size.height < 12 {
                f.render_widget(
                    Paragraph::new("Terminal too small").style(Style::default().fg(app.theme.color_subtext())),
                    size,
                );
                return;
            }

            // last row is the footer
            let body = Rect {
                height: size.height - 1,
                ..size
            };

            let grid_area = if app.show_console {
                let cols = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(33), Constraint::Percentage(67)])
                    .split(body);
                layout_out.console = console_panel::layout(cols[0]);
                console_panel::render(f, cols[0], app, &layout_out.console);
                cols[1]
            } else {
                body
            };

            layout_out.grid = grid_panel::layout(grid_area, app.deck.len(), app.deck.selected_index());
            grid_panel::render(f, grid_area, app, &layout_out.grid);

            if app.overlay == Overlay::FullScreen {
                fullscreen_panel::render(f, body, app);
            }

            let footer = "a Analyze  Enter Full screen  n New  d Delete  ? Keys  o Settings  q Quit";
            let footer_area = Rect {
                x: size.x,
                y: size.y + size.height.saturating_sub(1),
                width: size.width,
                height: 1,
            };
            f.render_widget(
                Paragraph::new(footer).style(Style::default().fg(app.theme.color_subtext())),
                footer_area,
            );

            // one-line prompt above the footer
            if let Overlay::Prompt(target) = app.overlay {
                let prompt = format!("{}: {}▏  (Enter ok, Esc cancel)", target.label(), app.prompt.buf);
                let area = Rect {
                    x: size.x,
                    y: size.y + size.height.saturating_sub(2),
                    width: size.width,
                    height: 1,
                };
                f.render_widget(
                    Paragraph::new(prompt)
                        .style(Style::default().fg(app.theme.color_text()).bg(app.theme.color_surface())),
                    area,
                );
            }

            if let Some((msg, _)) = &app.toast {
                let area = Rect {
                    x: size.x,
                    y: size.y,
                    width: size.width,
                    height: 1,
                };
                f.render_widget(
                    Paragraph::new(msg.as_str()).style(Style::default().fg(app.theme.color_accent3())),
                    area,
                );
            }

            // modals (top-most)
            match app.overlay {
                Overlay::SettingsModal => render_settings_modal(f, size, app),
                Overlay::HelpModal => render_help_modal(f, size, app),
                _ => {}
            }
        })?;

        Ok(layout_out)
    }
}

fn centered_rect(size: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(size.width.saturating_sub(4)).max(10);
    let h = height.min(size.height.saturating_sub(4)).max(6);
    Rect {
        x: size.x + (size.width.saturating_sub(w)) / 2,
        y: size.y + (size.height.saturating_sub(h)) / 2,
        width: w,
        height: h,
    }
}

fn render_settings_modal(f: &mut ratatui::Frame, size: Rect, app: &AppState) {
    let area = centered_rect(size, 48, 9);
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(crate::ui::borders::for_theme(&app.theme))
        .title("Settings")
        .style(Style::default().fg(app.theme.color_subtext()).bg(app.theme.color_surface()));
    f.render_widget(block, area);

    let inner = area.inner(&Margin { horizontal: 1, vertical: 1 });

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::styled(
        "Up/Down Select  Left/Right Change  Esc Close",
        Style::default().fg(app.theme.color_subtext()).bg(app.theme.color_surface()),
    ));
    lines.push(Line::styled("", Style::default().bg(app.theme.color_surface())));

    let on_off = |b: bool| if b { "On" } else { "Off" };
    let items: [String; SETTINGS_ITEMS] = [
        format!("Theme: {}", app.theme.name.as_label()),
        format!("Transparent background: {}", on_off(app.config.transparent_background)),
        format!("Show console: {}", on_off(app.show_console)),
    ];

    for (idx, text) in items.iter().enumerate() {
        let style = if idx == app.settings_selected {
            Style::default()
                .fg(app.theme.color_base())
                .bg(app.theme.color_accent())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.color_text()).bg(app.theme.color_surface())
        };
        lines.push(Line::styled(format!("  {}", text), style));
    }

    let p = Paragraph::new(lines)
        .style(Style::default().bg(app.theme.color_surface()))
        .wrap(Wrap { trim: true });
    f.render_widget(p, inner);
}

fn render_help_modal(f: &mut ratatui::Frame, size: Rect, app: &AppState) {
    let area = centered_rect(size, 56, 22);
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(crate::ui::borders::for_theme(&app.theme))
        .title("Keys")
        .style(Style::default().fg(app.theme.color_subtext()).bg(app.theme.color_surface()));
    f.render_widget(block, area);

    let inner = area.inner(&Margin { horizontal: 1, vertical: 1 });

    let mut lines: Vec<Line> = Vec::new();
    let bg = Style::default().bg(app.theme.color_surface());
    let text = Style::default().fg(app.theme.color_text()).bg(app.theme.color_surface());
    let sub = Style::default().fg(app.theme.color_subtext()).bg(app.theme.color_surface());

    lines.push(Line::styled("Esc = Close", sub));
    lines.push(Line::styled("", bg));

    for l in [
        "Arrows/hjkl  Select card",
        "Enter/F      Full screen (or double click)",
        "I            Image file",
        "t / m        Theme word / Mood word",
        "A / Space    Analyze colors",
        "X            Clear image",
        "1 2 3        Edit color",
        "r # T s      Name / Number / Title / Style",
        "N / D        New card / Delete card",
        "C            Toggle console",
        "O            Settings",
        "Ctrl+K       This help",
        "Q            Quit",
    ] {
        lines.push(Line::styled(l, text));
    }

    let p = Paragraph::new(lines).style(bg).wrap(Wrap { trim: true });
    f.render_widget(p, inner);
}

pub fn hit_test(layout: &UiLayout, col: u16, row: u16) -> Option<Action> {
    if contains(layout.console.analyze_button, col, row) {
        return Some(Action::StartAnalysis);
    }

    layout
        .grid
        .cards
        .iter()
        .find(|(_, r)| contains(*r, col, row))
        .map(|(idx, _)| Action::SelectCard(*idx))
}

fn contains(r: Rect, col: u16, row: u16) -> bool {
    col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> UiLayout {
        let full = Rect { x: 0, y: 0, width: 120, height: 40 };
        UiLayout {
            full,
            console: console_panel::layout(Rect { width: 40, ..full }),
            grid: grid_panel::layout(Rect { x: 40, width: 80, ..full }, 9, 0),
        }
    }

    #[test]
    fn click_on_card_selects_it() {
        let l = layout();
        let (idx, r) = l.grid.cards[4];
        assert_eq!(hit_test(&l, r.x + 1, r.y + 1), Some(Action::SelectCard(idx)));
    }

    #[test]
    fn click_on_analyze_button() {
        let l = layout();
        let b = l.console.analyze_button;
        assert_eq!(hit_test(&l, b.x, b.y), Some(Action::StartAnalysis));
    }

    #[test]
    fn click_on_nothing() {
        let l = layout();
        assert_eq!(hit_test(&l, 0, 0), None);
    }

    #[test]
    fn centered_rect_stays_inside() {
        let size = Rect { x: 0, y: 0, width: 30, height: 10 };
        let r = centered_rect(size, 56, 22);
        assert!(r.x + r.width <= size.width);
        assert!(r.y + r.height <= size.height);
    }
}
