use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use revolve_core::ArrowKey;

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Arrow(ArrowKey),
    JumpFirst,
    JumpLast,
    JumpTo(i64), // 1-9: jump to that slide
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Esc, KeyModifiers::NONE) => Action::Quit,

        // Arrow navigation; the engine maps these through orientation
        // and rtl itself
        (KeyCode::Left, KeyModifiers::NONE) => Action::Arrow(ArrowKey::Left),
        (KeyCode::Right, KeyModifiers::NONE) => Action::Arrow(ArrowKey::Right),
        (KeyCode::Up, KeyModifiers::NONE) => Action::Arrow(ArrowKey::Up),
        (KeyCode::Down, KeyModifiers::NONE) => Action::Arrow(ArrowKey::Down),

        // Vim-style movement
        (KeyCode::Char('h'), KeyModifiers::NONE) => Action::Arrow(ArrowKey::Left),
        (KeyCode::Char('l'), KeyModifiers::NONE) => Action::Arrow(ArrowKey::Right),
        (KeyCode::Char('k'), KeyModifiers::NONE) => Action::Arrow(ArrowKey::Up),
        (KeyCode::Char('j'), KeyModifiers::NONE) => Action::Arrow(ArrowKey::Down),

        // Jump to first/last slide
        (KeyCode::Char('g'), KeyModifiers::NONE) => Action::JumpFirst,
        (KeyCode::Home, KeyModifiers::NONE) => Action::JumpFirst,
        (KeyCode::Char('G'), KeyModifiers::SHIFT) => Action::JumpLast,
        (KeyCode::End, KeyModifiers::NONE) => Action::JumpLast,

        // Direct jump
        (KeyCode::Char(c), KeyModifiers::NONE) if c.is_ascii_digit() && c != '0' => {
            Action::JumpTo(c as i64 - '1' as i64)
        }

        _ => Action::None,
    }
}
