//! Key mapping from terminal events to game commands.

use crate::types::Direction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the front end to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    Move(Direction),
    /// Show only the given depth layer (0-based). Pressing the same layer
    /// again shows all layers.
    FocusLayer(usize),
    Restart,
    KeepPlaying,
    ToggleRotation,
    Quit,
}

/// Map keyboard input to a command.
///
/// Arrows, `hjkl` and `wasd` move in the screen plane, `q`/`e` move toward
/// the front/back. Digits `1..=9` focus a layer and `0` restarts. Every other
/// letter flips the camera.
pub fn map_key(key: KeyEvent) -> Option<InputCommand> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if should_quit(key) {
        return Some(InputCommand::Quit);
    }

    let command = match key.code {
        KeyCode::Up => InputCommand::Move(Direction::Up),
        KeyCode::Right => InputCommand::Move(Direction::Right),
        KeyCode::Down => InputCommand::Move(Direction::Down),
        KeyCode::Left => InputCommand::Move(Direction::Left),

        KeyCode::Backspace | KeyCode::Esc => InputCommand::Restart,
        KeyCode::Enter => InputCommand::KeepPlaying,

        KeyCode::Char('0') => InputCommand::Restart,
        KeyCode::Char(c @ '1'..='9') => InputCommand::FocusLayer(c as usize - '1' as usize),

        KeyCode::Char(c) if c.is_ascii_alphabetic() => match c.to_ascii_lowercase() {
            'k' | 'w' => InputCommand::Move(Direction::Up),
            'l' | 'd' => InputCommand::Move(Direction::Right),
            'j' | 's' => InputCommand::Move(Direction::Down),
            'h' | 'a' => InputCommand::Move(Direction::Left),
            'q' => InputCommand::Move(Direction::Front),
            'e' => InputCommand::Move(Direction::Back),
            _ => InputCommand::ToggleRotation,
        },

        _ => return None,
    };
    Some(command)
}

/// Ctrl-C quits. Plain `q` is a move, so it never quits.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};

    fn press(code: KeyCode) -> Option<InputCommand> {
        map_key(KeyEvent::from(code))
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(press(KeyCode::Up), Some(InputCommand::Move(Direction::Up)));
        assert_eq!(press(KeyCode::Right), Some(InputCommand::Move(Direction::Right)));
        assert_eq!(press(KeyCode::Down), Some(InputCommand::Move(Direction::Down)));
        assert_eq!(press(KeyCode::Left), Some(InputCommand::Move(Direction::Left)));

        assert_eq!(press(KeyCode::Char('k')), Some(InputCommand::Move(Direction::Up)));
        assert_eq!(press(KeyCode::Char('L')), Some(InputCommand::Move(Direction::Right)));
        assert_eq!(press(KeyCode::Char('s')), Some(InputCommand::Move(Direction::Down)));
        assert_eq!(press(KeyCode::Char('A')), Some(InputCommand::Move(Direction::Left)));
    }

    #[test]
    fn test_depth_keys() {
        assert_eq!(press(KeyCode::Char('q')), Some(InputCommand::Move(Direction::Front)));
        assert_eq!(press(KeyCode::Char('E')), Some(InputCommand::Move(Direction::Back)));
    }

    #[test]
    fn test_digit_keys() {
        assert_eq!(press(KeyCode::Char('1')), Some(InputCommand::FocusLayer(0)));
        assert_eq!(press(KeyCode::Char('3')), Some(InputCommand::FocusLayer(2)));
        assert_eq!(press(KeyCode::Char('0')), Some(InputCommand::Restart));
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(press(KeyCode::Backspace), Some(InputCommand::Restart));
        assert_eq!(press(KeyCode::Esc), Some(InputCommand::Restart));
        assert_eq!(press(KeyCode::Enter), Some(InputCommand::KeepPlaying));
        assert_eq!(press(KeyCode::Char('r')), Some(InputCommand::ToggleRotation));
        assert_eq!(press(KeyCode::Char('X')), Some(InputCommand::ToggleRotation));
        assert_eq!(press(KeyCode::Char(' ')), None);
        assert_eq!(press(KeyCode::Tab), None);
    }

    #[test]
    fn test_quit_keys() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(should_quit(ctrl_c));
        assert_eq!(map_key(ctrl_c), Some(InputCommand::Quit));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
    }

    #[test]
    fn test_release_events_ignored() {
        let release = KeyEvent::new_with_kind_and_state(
            KeyCode::Left,
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );
        assert_eq!(map_key(release), None);
    }
}
