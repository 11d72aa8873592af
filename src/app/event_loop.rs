use crate::app::state::{AppState, Overlay, DOUBLE_CLICK};
use crate::data::deck::DeckEdit;
use crate::ui::tui::{hit_test, Tui, UiLayout, SETTINGS_ITEMS};
use crate::utils::input::{map_key, map_mouse, Action};
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::time::{Duration, Instant};

pub fn run(app: &mut AppState) -> Result<()> {
    enable_raw_mode()?;
    let mut tui = Tui::new()?;
    tui.enter()?;

    let mut last_layout = UiLayout::default();

    loop {
        let frame_start = Instant::now();

        // apply finished palette analyses
        for res in app.drain_analysis_results() {
            app.apply_analysis_result(res);
        }

        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(k) if k.kind != KeyEventKind::Release => {
                    let action = map_key(k, app.overlay);
                    handle_action(app, action, &last_layout, frame_start);
                }
                Event::Mouse(m) => {
                    let action = map_mouse(m);
                    handle_action(app, action, &last_layout, frame_start);
                }
                _ => {}
            }
        }

        app.tick(frame_start);

        last_layout = tui.draw(app)?;

        // frame pacing
        let frame_dt = fps_to_dt(app.config.ui_fps);
        let elapsed = frame_start.elapsed();
        if elapsed < frame_dt {
            std::thread::sleep(frame_dt - elapsed);
        }

        if app.should_quit {
            break;
        }
    }

    tui.exit()?;
    disable_raw_mode()?;
    Ok(())
}

fn fps_to_dt(fps: u32) -> Duration {
    let fps = fps.clamp(15, 60);
    Duration::from_millis((1000 / fps) as u64)
}

fn handle_action(app: &mut AppState, action: Action, layout: &UiLayout, now: Instant) {
    let columns = layout.grid.columns.max(1);
    match action {
        Action::Quit => app.should_quit = true,

        Action::MoveLeft => app.edit_deck(DeckEdit::Move { dx: -1, dy: 0, columns }),
        Action::MoveRight => app.edit_deck(DeckEdit::Move { dx: 1, dy: 0, columns }),
        Action::MoveUp => app.edit_deck(DeckEdit::Move { dx: 0, dy: -1, columns }),
        Action::MoveDown => app.edit_deck(DeckEdit::Move { dx: 0, dy: 1, columns }),
        Action::SelectCard(i) => app.edit_deck(DeckEdit::SelectIndex(i)),

        Action::OpenFullScreen => app.overlay = Overlay::FullScreen,
        Action::CloseOverlay => app.close_overlay(),
        Action::Confirm => match app.overlay {
            Overlay::Prompt(_) => app.commit_prompt(),
            Overlay::SettingsModal => change_setting(app, true),
            _ => {}
        },

        Action::OpenPrompt(target) => app.open_prompt(target),
        Action::PromptChar(c) => {
            if matches!(app.overlay, Overlay::Prompt(_)) {
                app.prompt.buf.push(c);
            }
        }
        Action::PromptBackspace => {
            app.prompt.buf.pop();
        }

        Action::StartAnalysis => {
            app.start_analysis();
        }
        Action::AddCard => app.edit_deck(DeckEdit::AddCard),
        Action::DeleteCard => {
            if app.deck.len() <= 1 {
                app.set_toast("Cannot delete the last card");
            } else {
                app.edit_deck(DeckEdit::DeleteSelected);
            }
        }
        Action::ClearImage => app.clear_image(),
        Action::ToggleConsole => app.show_console = !app.show_console,

        Action::OpenHelpModal => app.overlay = Overlay::HelpModal,
        Action::OpenSettingsModal => {
            app.overlay = Overlay::SettingsModal;
            app.settings_selected = 0;
        }
        Action::ModalUp => {
            app.settings_selected = (app.settings_selected + SETTINGS_ITEMS - 1) % SETTINGS_ITEMS;
        }
        Action::ModalDown => {
            app.settings_selected = (app.settings_selected + 1) % SETTINGS_ITEMS;
        }
        Action::ModalLeft => change_setting(app, false),
        Action::ModalRight => change_setting(app, true),

        Action::MouseClick { col, row } => handle_click(app, layout, col, row, now),

        Action::None => {}
    }
}

fn change_setting(app: &mut AppState, forward: bool) {
    match app.settings_selected {
        0 => app.cycle_theme(forward),
        1 => {
            app.config.transparent_background = !app.config.transparent_background;
            app.save_config();
        }
        2 => {
            app.show_console = !app.show_console;
            app.config.show_console = app.show_console;
            app.save_config();
        }
        _ => {}
    }
}

fn handle_click(app: &mut AppState, layout: &UiLayout, col: u16, row: u16, now: Instant) {
    match app.overlay {
        Overlay::None => {}
        Overlay::FullScreen => {
            app.close_overlay();
            return;
        }
        // modals and prompts are keyboard only
        _ => return,
    }

    match hit_test(layout, col, row) {
        Some(Action::SelectCard(i)) => {
            let double = app
                .last_mouse_click
                .is_some_and(|(at, prev)| prev == i && now.duration_since(at) <= DOUBLE_CLICK);
            app.edit_deck(DeckEdit::SelectIndex(i));
            if double {
                app.overlay = Overlay::FullScreen;
                app.last_mouse_click = None;
            } else {
                app.last_mouse_click = Some((now, i));
            }
        }
        Some(Action::StartAnalysis) => {
            app.start_analysis();
        }
        _ => {}
    }
}
