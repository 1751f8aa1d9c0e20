use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::player::Command;

/// What a key press asks the event loop to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyAction {
    Command(Command),
    /// Play whichever row is currently active.
    PlayActive,
    Quit,
}

/// Map a key press to an action. Unbound keys map to `None`.
pub fn action_for_key(key: KeyEvent) -> Option<KeyAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let action = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('c') if ctrl => KeyAction::Quit,
        KeyCode::Char(' ') => KeyAction::Command(Command::TogglePlay),
        KeyCode::Left if ctrl => KeyAction::Command(Command::Mute),
        KeyCode::Right if ctrl => KeyAction::Command(Command::MaxVolume),
        KeyCode::Left => KeyAction::Command(Command::Previous),
        KeyCode::Right => KeyAction::Command(Command::Next),
        KeyCode::Up => KeyAction::Command(Command::VolumeUp),
        KeyCode::Down => KeyAction::Command(Command::VolumeDown),
        KeyCode::Char('a') => KeyAction::Command(Command::Upload),
        KeyCode::Enter => KeyAction::PlayActive,
        _ => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::CONTROL)
    }

    #[test]
    fn arrows_navigate_and_adjust_volume() {
        assert_eq!(
            action_for_key(press(KeyCode::Left)),
            Some(KeyAction::Command(Command::Previous))
        );
        assert_eq!(
            action_for_key(press(KeyCode::Right)),
            Some(KeyAction::Command(Command::Next))
        );
        assert_eq!(
            action_for_key(press(KeyCode::Up)),
            Some(KeyAction::Command(Command::VolumeUp))
        );
        assert_eq!(
            action_for_key(press(KeyCode::Down)),
            Some(KeyAction::Command(Command::VolumeDown))
        );
    }

    #[test]
    fn ctrl_arrows_jump_volume_to_the_limits() {
        assert_eq!(
            action_for_key(ctrl(KeyCode::Left)),
            Some(KeyAction::Command(Command::Mute))
        );
        assert_eq!(
            action_for_key(ctrl(KeyCode::Right)),
            Some(KeyAction::Command(Command::MaxVolume))
        );
    }

    #[test]
    fn remaining_bindings() {
        assert_eq!(
            action_for_key(press(KeyCode::Char(' '))),
            Some(KeyAction::Command(Command::TogglePlay))
        );
        assert_eq!(
            action_for_key(press(KeyCode::Char('a'))),
            Some(KeyAction::Command(Command::Upload))
        );
        assert_eq!(action_for_key(press(KeyCode::Enter)), Some(KeyAction::PlayActive));
        assert_eq!(action_for_key(press(KeyCode::Char('q'))), Some(KeyAction::Quit));
        assert_eq!(action_for_key(press(KeyCode::Esc)), Some(KeyAction::Quit));
        assert_eq!(action_for_key(ctrl(KeyCode::Char('c'))), Some(KeyAction::Quit));
        assert_eq!(action_for_key(press(KeyCode::Char('x'))), None);
    }
}
