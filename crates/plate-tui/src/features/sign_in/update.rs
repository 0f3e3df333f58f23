use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::effects::UiEffect;

pub fn handle_key(key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => vec![UiEffect::Quit],
        KeyCode::Char('q') | KeyCode::Esc => vec![UiEffect::Quit],
        _ => vec![],
    }
}
