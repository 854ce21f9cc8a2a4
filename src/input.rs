use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::snake::Direction::{self, *};

/// What a key press asks the game to do.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    Pause,
    Quit,
}

impl Command {
    /// Unmapped keys and key releases yield `None`.
    pub fn from_key_event(ev: &KeyEvent) -> Option<Command> {
        if ev.kind == KeyEventKind::Release {
            return None;
        }
        if is_ctrl_c(ev) {
            return Some(Command::Quit);
        }

        match ev.code {
            KeyCode::Char('w') | KeyCode::Up => Some(Command::Steer(Up)),
            KeyCode::Char('a') | KeyCode::Left => Some(Command::Steer(Left)),
            KeyCode::Char('s') | KeyCode::Down => Some(Command::Steer(Down)),
            KeyCode::Char('d') | KeyCode::Right => Some(Command::Steer(Right)),
            KeyCode::Esc | KeyCode::Char('p') => Some(Command::Pause),
            KeyCode::Char('q') => Some(Command::Quit),
            _ => None,
        }
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}

/// A turn is accepted only onto the other axis. Any direction is accepted
/// while the snake has not moved yet.
///
/// `heading` is the direction the snake moved on the last tick, not the
/// pending one, so several presses between two ticks can never add up to a
/// reversal.
pub fn accepts(requested: Direction, heading: Option<Direction>) -> bool {
    match heading {
        None => true,
        Some(current) => current.is_horizontal() != requested.is_horizontal(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversals_are_rejected() {
        for dir in [Up, Down, Left, Right] {
            assert!(!accepts(dir.opposite(), Some(dir)));
            assert!(!accepts(dir, Some(dir)));
        }
    }

    #[test]
    fn perpendicular_turns_are_accepted() {
        assert!(accepts(Up, Some(Left)));
        assert!(accepts(Down, Some(Right)));
        assert!(accepts(Left, Some(Up)));
        assert!(accepts(Right, Some(Down)));
    }

    #[test]
    fn anything_goes_before_the_first_move() {
        for dir in [Up, Down, Left, Right] {
            assert!(accepts(dir, None));
        }
    }

    #[test]
    fn key_mapping() {
        let key = |code| Command::from_key_event(&KeyEvent::new(code, KeyModifiers::NONE));
        assert_eq!(key(KeyCode::Char('w')), Some(Command::Steer(Up)));
        assert_eq!(key(KeyCode::Right), Some(Command::Steer(Right)));
        assert_eq!(key(KeyCode::Esc), Some(Command::Pause));
        assert_eq!(key(KeyCode::Char('q')), Some(Command::Quit));
        assert_eq!(key(KeyCode::Tab), None);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(Command::from_key_event(&ctrl_c), Some(Command::Quit));
    }
}
