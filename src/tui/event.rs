use crossterm::event::{KeyCode, KeyEvent};

use super::app::{App, Message};

/// Map key events to messages based on current app state
pub fn handle_key(key: KeyEvent, app: &App) -> Option<Message> {
    // Handle help toggle globally
    if key.code == KeyCode::Char('?') && !app.show_help {
        return Some(Message::ToggleHelp);
    }

    // If help is shown, any key closes it
    if app.show_help {
        return Some(Message::ToggleHelp);
    }

    match key.code {
        KeyCode::Char('q') => Some(Message::Quit),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Message::ResetTimer),
        // The test control only reacts while it is visible.
        KeyCode::Char('t') => {
            if app.show_test {
                Some(Message::StartTest)
            } else {
                None
            }
        }
        KeyCode::Char('T') => Some(Message::ToggleTestControl),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn hidden_test_control_ignores_its_key() {
        let app = App::new(false);
        assert_eq!(handle_key(key('t'), &app), None);
    }

    #[test]
    fn visible_test_control_starts_the_test_timer() {
        let app = App::new(true);
        assert_eq!(handle_key(key('t'), &app), Some(Message::StartTest));
    }

    #[test]
    fn reset_is_always_reachable() {
        let app = App::new(false);
        assert_eq!(handle_key(key('r'), &app), Some(Message::ResetTimer));
        assert_eq!(handle_key(key('R'), &app), Some(Message::ResetTimer));
    }

    #[test]
    fn any_key_closes_help() {
        let mut app = App::new(false);
        app.show_help = true;
        assert_eq!(handle_key(key('x'), &app), Some(Message::ToggleHelp));
    }
}
