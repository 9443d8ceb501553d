/// Centralized keybindings and help text for the Learnora TUI

use crossterm::event::{KeyCode, KeyModifiers};

pub struct KeyMap;

impl KeyMap {
    /// Get help text for all keybindings
    pub fn help_text() -> Vec<(&'static str, &'static str)> {
        vec![
            ("Tab", "Next panel"),
            ("Shift+Tab", "Previous panel"),
            ("Enter/s", "Start assessment"),
            ("j/↓", "Next learning path"),
            ("k/↑", "Previous learning path"),
            ("Enter/Space", "Expand or collapse path"),
            ("h/←  l/→", "Progress -1 / +1"),
            ("H  L", "Progress -10 / +10"),
            ("Enter", "Send chat message"),
            ("PgUp/PgDn", "Scroll chat"),
            ("R", "Refresh dashboard"),
            ("t", "Toggle high-contrast"),
            ("?", "Show help"),
            ("q/Esc", "Quit/Close"),
        ]
    }

    /// Check if key is quit
    pub fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
        matches!(code, KeyCode::Char('q') | KeyCode::Esc) || Self::is_force_quit(code, modifiers)
    }

    /// Ctrl-C quits from anywhere, including the chat input
    pub fn is_force_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
        matches!(code, KeyCode::Char('c')) && modifiers.contains(KeyModifiers::CONTROL)
    }

    /// Check if key is help
    pub fn is_help(code: KeyCode) -> bool {
        matches!(code, KeyCode::Char('?'))
    }

    /// Check if key is down
    pub fn is_down(code: KeyCode) -> bool {
        matches!(code, KeyCode::Char('j') | KeyCode::Down)
    }

    /// Check if key is up
    pub fn is_up(code: KeyCode) -> bool {
        matches!(code, KeyCode::Char('k') | KeyCode::Up)
    }

    pub fn is_focus_next(code: KeyCode) -> bool {
        matches!(code, KeyCode::Tab)
    }

    pub fn is_focus_prev(code: KeyCode) -> bool {
        matches!(code, KeyCode::BackTab)
    }

    /// Check if key is refresh
    pub fn is_refresh(code: KeyCode) -> bool {
        matches!(code, KeyCode::Char('R'))
    }

    /// Check if key is toggle theme
    pub fn is_toggle_theme(code: KeyCode) -> bool {
        matches!(code, KeyCode::Char('t'))
    }

    pub fn is_start_assessment(code: KeyCode) -> bool {
        matches!(code, KeyCode::Enter | KeyCode::Char('s'))
    }

    /// Expand/collapse the path under the cursor
    pub fn is_toggle(code: KeyCode) -> bool {
        matches!(code, KeyCode::Enter | KeyCode::Char(' '))
    }

    /// Slider step for a key, if it moves the progress slider
    pub fn slider_step(code: KeyCode) -> Option<i16> {
        match code {
            KeyCode::Left | KeyCode::Char('h') => Some(-1),
            KeyCode::Right | KeyCode::Char('l') => Some(1),
            KeyCode::Char('H') => Some(-10),
            KeyCode::Char('L') => Some(10),
            _ => None,
        }
    }

    /// Only a bare Enter submits; Shift/Alt/Ctrl+Enter never does.
    pub fn is_submit(code: KeyCode, modifiers: KeyModifiers) -> bool {
        matches!(code, KeyCode::Enter) && modifiers.is_empty()
    }

    /// Check if key dismisses a blocking alert
    pub fn is_dismiss(code: KeyCode) -> bool {
        matches!(code, KeyCode::Enter | KeyCode::Esc)
    }
}
