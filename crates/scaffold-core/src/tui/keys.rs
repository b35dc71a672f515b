//! Key event translation

use crate::wizard::Input;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Maps a key press to a wizard input
///
/// Text steps receive printable characters verbatim, so `q`, `j`, `k` and
/// space only act as shortcuts on choice steps.
pub fn translate(key: KeyEvent, text_entry: bool) -> Option<Input> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Input::Quit);
    }

    let input = match key.code {
        KeyCode::Esc => Input::Quit,
        KeyCode::Enter => Input::Confirm,
        KeyCode::Up => Input::Up,
        KeyCode::Down => Input::Down,
        KeyCode::PageUp => Input::PageUp,
        KeyCode::PageDown => Input::PageDown,
        KeyCode::Home => Input::Home,
        KeyCode::End => Input::End,
        KeyCode::Left if text_entry => Input::Left,
        KeyCode::Right if text_entry => Input::Right,
        KeyCode::Backspace if text_entry => Input::Backspace,
        KeyCode::Char(c) if text_entry => Input::Char(c),
        KeyCode::Char('q') => Input::Quit,
        KeyCode::Char('k') => Input::Up,
        KeyCode::Char('j') => Input::Down,
        KeyCode::Char(' ') => Input::Toggle,
        _ => return None,
    };
    Some(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_choice_shortcuts() {
        assert_eq!(translate(press(KeyCode::Char('q')), false), Some(Input::Quit));
        assert_eq!(translate(press(KeyCode::Char('j')), false), Some(Input::Down));
        assert_eq!(translate(press(KeyCode::Char('k')), false), Some(Input::Up));
        assert_eq!(translate(press(KeyCode::Char(' ')), false), Some(Input::Toggle));
        assert_eq!(translate(press(KeyCode::Char('x')), false), None);
        assert_eq!(translate(press(KeyCode::Backspace), false), None);
    }

    #[test]
    fn test_text_entry_keeps_characters() {
        assert_eq!(translate(press(KeyCode::Char('q')), true), Some(Input::Char('q')));
        assert_eq!(translate(press(KeyCode::Char(' ')), true), Some(Input::Char(' ')));
        assert_eq!(translate(press(KeyCode::Backspace), true), Some(Input::Backspace));
        assert_eq!(translate(press(KeyCode::Left), true), Some(Input::Left));
        assert_eq!(translate(press(KeyCode::Esc), true), Some(Input::Quit));
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(translate(ctrl_c, true), Some(Input::Quit));
        assert_eq!(translate(ctrl_c, false), Some(Input::Quit));
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(translate(press(KeyCode::Enter), false), Some(Input::Confirm));
        assert_eq!(translate(press(KeyCode::PageDown), false), Some(Input::PageDown));
        assert_eq!(translate(press(KeyCode::End), true), Some(Input::End));
    }
}
