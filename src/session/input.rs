#[cfg(feature = "tui")]
use crossterm::event::{KeyCode, KeyEvent};

/// Discrete commands a UI surface can issue against the active cook session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookCommand {
    Next,
    Prev,
    JumpTo(usize),
    StartTimer,
    PauseTimer,
    ToggleTimer,
    ResetTimer,
    Exit,
}

/// Maps keyboard events onto cook-session commands and scopes the keyboard
/// subscription to the session lifetime.
///
/// The router is attached when a session starts and detached at teardown; the
/// event loop asks the router for a command before forwarding any key, and a
/// detached router maps nothing, so no cook binding can fire once the session
/// is gone.
#[derive(Debug)]
pub struct InputRouter {
    attached: bool,
}

impl InputRouter {
    pub fn attach() -> Self {
        Self { attached: true }
    }

    /// Lower the subscription. Idempotent.
    pub fn detach(&mut self) {
        self.attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Translate a key press into a session command, or None for keys the
    /// session does not own. Digits jump to the corresponding step.
    #[cfg(feature = "tui")]
    pub fn route_key(&self, key: KeyEvent) -> Option<CookCommand> {
        if !self.attached {
            return None;
        }
        match key.code {
            KeyCode::Right | KeyCode::Char(' ') => Some(CookCommand::Next),
            KeyCode::Left => Some(CookCommand::Prev),
            KeyCode::Char('t') => Some(CookCommand::ToggleTimer),
            KeyCode::Char('r') => Some(CookCommand::ResetTimer),
            KeyCode::Char(c) if c.is_ascii_digit() && c != '0' => {
                Some(CookCommand::JumpTo(c as usize - '1' as usize))
            }
            KeyCode::Esc | KeyCode::Char('x') => Some(CookCommand::Exit),
            _ => None,
        }
    }
}

#[cfg(all(test, feature = "tui"))]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn arrows_and_space_navigate() {
        let router = InputRouter::attach();
        assert_eq!(router.route_key(key(KeyCode::Right)), Some(CookCommand::Next));
        assert_eq!(
            router.route_key(key(KeyCode::Char(' '))),
            Some(CookCommand::Next)
        );
        assert_eq!(router.route_key(key(KeyCode::Left)), Some(CookCommand::Prev));
    }

    #[test]
    fn digits_jump_to_zero_based_index() {
        let router = InputRouter::attach();
        assert_eq!(
            router.route_key(key(KeyCode::Char('1'))),
            Some(CookCommand::JumpTo(0))
        );
        assert_eq!(
            router.route_key(key(KeyCode::Char('9'))),
            Some(CookCommand::JumpTo(8))
        );
        assert_eq!(router.route_key(key(KeyCode::Char('0'))), None);
    }

    #[test]
    fn timer_and_exit_bindings() {
        let router = InputRouter::attach();
        assert_eq!(
            router.route_key(key(KeyCode::Char('t'))),
            Some(CookCommand::ToggleTimer)
        );
        assert_eq!(
            router.route_key(key(KeyCode::Char('r'))),
            Some(CookCommand::ResetTimer)
        );
        assert_eq!(router.route_key(key(KeyCode::Esc)), Some(CookCommand::Exit));
    }

    #[test]
    fn unowned_keys_pass_through() {
        let router = InputRouter::attach();
        assert_eq!(router.route_key(key(KeyCode::Char('q'))), None);
        assert_eq!(router.route_key(key(KeyCode::Tab)), None);
    }

    #[test]
    fn detached_router_routes_nothing() {
        let mut router = InputRouter::attach();
        router.detach();
        assert!(!router.is_attached());
        assert_eq!(router.route_key(key(KeyCode::Right)), None);
        // Detach is idempotent.
        router.detach();
        assert!(!router.is_attached());
    }
}
