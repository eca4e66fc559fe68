//! Key bindings

use crossterm::event::{KeyCode, KeyModifiers};

/// Vim-style key mapping (basic, without modifiers)
pub fn vim_key_to_action(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('j') | KeyCode::Down => Some(Action::Down),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::Up),
        KeyCode::Char('h') | KeyCode::Left => Some(Action::Collapse),
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Enter => Some(Action::Select),
        KeyCode::Char(' ') => Some(Action::ToggleModule),
        KeyCode::Char('g') | KeyCode::Home => Some(Action::Top),
        KeyCode::Char('G') | KeyCode::End => Some(Action::Bottom),
        KeyCode::Tab => Some(Action::SwitchPanel),
        KeyCode::Char('m') => Some(Action::MarkComplete),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// Plain arrow/enter mapping for users with vim mode off
pub fn basic_key_to_action(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Down => Some(Action::Down),
        KeyCode::Up => Some(Action::Up),
        KeyCode::Left => Some(Action::Collapse),
        KeyCode::Right | KeyCode::Enter => Some(Action::Select),
        KeyCode::Char(' ') => Some(Action::ToggleModule),
        KeyCode::Home => Some(Action::Top),
        KeyCode::End => Some(Action::Bottom),
        KeyCode::Tab => Some(Action::SwitchPanel),
        KeyCode::Char('m') => Some(Action::MarkComplete),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// Key mapping with modifiers
pub fn key_to_action(key: KeyCode, modifiers: KeyModifiers, vim_mode: bool) -> Option<Action> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match key {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }
    if vim_mode { vim_key_to_action(key) } else { basic_key_to_action(key) }
}

/// Actions that can be taken in the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    Up,
    Down,
    Top,
    Bottom,
    SwitchPanel,

    // Tree
    Select,
    Collapse,
    ToggleModule,

    // Progress
    MarkComplete,

    Quit,
}

impl Action {
    /// Acts on the highlighted curriculum row
    pub fn targets_tree(self) -> bool {
        matches!(
            self,
            Action::Up
                | Action::Down
                | Action::Top
                | Action::Bottom
                | Action::Select
                | Action::Collapse
                | Action::ToggleModule
        )
    }
}
