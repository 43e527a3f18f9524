use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::InputEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Game(InputEvent),
    Quit,
    None,
}

/// Maps terminal keys onto the engine's named input symbols
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        let symbol = match key.code {
            KeyCode::Up => "arrowup".to_string(),
            KeyCode::Down => "arrowdown".to_string(),
            KeyCode::Left => "arrowleft".to_string(),
            KeyCode::Right => "arrowright".to_string(),
            KeyCode::Tab => "tab".to_string(),
            KeyCode::Esc => "escape".to_string(),
            // q and e are z moves
            KeyCode::Char('x') | KeyCode::Char('X') => return KeyAction::Quit,
            KeyCode::Char(c) => c.to_string(),
            _ => return KeyAction::None,
        };

        InputEvent::from_symbol(&symbol)
            .map(KeyAction::Game)
            .unwrap_or(KeyAction::None)
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrow_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(press(KeyCode::Up)),
            KeyAction::Game(InputEvent::Move(Direction::PosY))
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Down)),
            KeyAction::Game(InputEvent::Move(Direction::NegY))
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Left)),
            KeyAction::Game(InputEvent::Move(Direction::NegX))
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Right)),
            KeyAction::Game(InputEvent::Move(Direction::PosX))
        );
    }

    #[test]
    fn test_wasd_qe_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('w'))),
            KeyAction::Game(InputEvent::Move(Direction::PosY))
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('a'))),
            KeyAction::Game(InputEvent::Move(Direction::NegX))
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('q'))),
            KeyAction::Game(InputEvent::Move(Direction::NegZ))
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('e'))),
            KeyAction::Game(InputEvent::Move(Direction::PosZ))
        );
    }

    #[test]
    fn test_uppercase() {
        let handler = InputHandler::new();

        let d_upper = KeyEvent::new(KeyCode::Char('D'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.handle_key_event(d_upper),
            KeyAction::Game(InputEvent::Move(Direction::PosX))
        );
    }

    #[test]
    fn test_control_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('p'))),
            KeyAction::Game(InputEvent::TogglePause)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('r'))),
            KeyAction::Game(InputEvent::Restart)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Tab)),
            KeyAction::Game(InputEvent::ToggleSettings)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Esc)),
            KeyAction::Game(InputEvent::CloseSettings)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('['))),
            KeyAction::Game(InputEvent::GridSizeDelta(-1))
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('='))),
            KeyAction::Game(InputEvent::SpeedDelta(1))
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('t'))),
            KeyAction::Game(InputEvent::ToggleAutopilot)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('f'))),
            KeyAction::Game(InputEvent::TogglePathOverlay)
        );
    }

    #[test]
    fn test_quit_keys() {
        let handler = InputHandler::new();

        assert_eq!(handler.handle_key_event(press(KeyCode::Char('x'))), KeyAction::Quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn test_unknown_key() {
        let handler = InputHandler::new();

        assert_eq!(handler.handle_key_event(press(KeyCode::Char('z'))), KeyAction::None);
        assert_eq!(handler.handle_key_event(press(KeyCode::F(5))), KeyAction::None);
    }
}
