use crate::app::state::{InputTarget, Overlay};
use crate::data::deck::CardField;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Quit,

    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    SelectCard(usize),

    OpenFullScreen,
    CloseOverlay,
    Confirm,

    OpenPrompt(InputTarget),
    PromptChar(char),
    PromptBackspace,

    StartAnalysis,
    AddCard,
    DeleteCard,
    ClearImage,
    ToggleConsole,

    OpenHelpModal,
    OpenSettingsModal,

    ModalUp,
    ModalDown,
    ModalLeft,
    ModalRight,

    MouseClick { col: u16, row: u16 },

    None,
}

pub fn map_key(ev: KeyEvent, overlay: Overlay) -> Action {
    if let Overlay::Prompt(_) = overlay {
        return match ev.code {
            KeyCode::Esc => Action::CloseOverlay,
            KeyCode::Enter => Action::Confirm,
            KeyCode::Backspace => Action::PromptBackspace,
            KeyCode::Char(c) if !ev.modifiers.contains(KeyModifiers::CONTROL) => Action::PromptChar(c),
            _ => Action::None,
        };
    }

    if overlay == Overlay::SettingsModal {
        return match ev.code {
            KeyCode::Esc => Action::CloseOverlay,
            KeyCode::Enter => Action::Confirm,
            KeyCode::Up => Action::ModalUp,
            KeyCode::Down => Action::ModalDown,
            KeyCode::Left => Action::ModalLeft,
            KeyCode::Right => Action::ModalRight,
            _ => Action::None,
        };
    }

    if overlay == Overlay::HelpModal {
        return match ev.code {
            KeyCode::Esc | KeyCode::Char('?') => Action::CloseOverlay,
            _ => Action::None,
        };
    }

    if ev.modifiers.contains(KeyModifiers::CONTROL) {
        return match ev.code {
            KeyCode::Char('k') | KeyCode::Char('K') => Action::OpenHelpModal,
            KeyCode::Char('c') | KeyCode::Char('C') => Action::Quit,
            _ => Action::None,
        };
    }

    if overlay == Overlay::FullScreen {
        return match ev.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => Action::Quit,
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('f') => Action::CloseOverlay,
            KeyCode::Left | KeyCode::Char('h') => Action::MoveLeft,
            KeyCode::Right | KeyCode::Char('l') => Action::MoveRight,
            _ => Action::None,
        };
    }

    match ev.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => Action::Quit,
        KeyCode::Left | KeyCode::Char('h') => Action::MoveLeft,
        KeyCode::Right | KeyCode::Char('l') => Action::MoveRight,
        KeyCode::Up | KeyCode::Char('k') => Action::MoveUp,
        KeyCode::Down | KeyCode::Char('j') => Action::MoveDown,
        KeyCode::Enter | KeyCode::Char('f') => Action::OpenFullScreen,
        KeyCode::Esc => Action::CloseOverlay,

        KeyCode::Char('i') => Action::OpenPrompt(InputTarget::ImagePath),
        KeyCode::Char('t') => Action::OpenPrompt(InputTarget::ThemeWord),
        KeyCode::Char('m') => Action::OpenPrompt(InputTarget::MoodWord),
        KeyCode::Char('r') => Action::OpenPrompt(InputTarget::Field(CardField::Name)),
        KeyCode::Char('#') => Action::OpenPrompt(InputTarget::Field(CardField::Number)),
        KeyCode::Char('T') => Action::OpenPrompt(InputTarget::Field(CardField::Title)),
        KeyCode::Char('s') => Action::OpenPrompt(InputTarget::Field(CardField::Mood)),
        KeyCode::Char('1') => Action::OpenPrompt(InputTarget::Color(0)),
        KeyCode::Char('2') => Action::OpenPrompt(InputTarget::Color(1)),
        KeyCode::Char('3') => Action::OpenPrompt(InputTarget::Color(2)),

        KeyCode::Char('a') | KeyCode::Char(' ') => Action::StartAnalysis,
        KeyCode::Char('n') => Action::AddCard,
        KeyCode::Char('d') | KeyCode::Delete => Action::DeleteCard,
        KeyCode::Char('x') => Action::ClearImage,
        KeyCode::Char('c') => Action::ToggleConsole,
        KeyCode::Char('o') => Action::OpenSettingsModal,
        KeyCode::Char('?') => Action::OpenHelpModal,
        _ => Action::None,
    }
}

pub fn map_mouse(ev: MouseEvent) -> Action {
    if let MouseEventKind::Down(MouseButton::Left) = ev.kind {
        return Action::MouseClick {
            col: ev.column,
            row: ev.row,
        };
    }
    Action::None
}
