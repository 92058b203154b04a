use tracing::debug;

use crate::notify::{BREAK_MESSAGE, NotificationSink, Notifier, PermissionSource};
use crate::timer::{Countdown, Tick};

/// Running state of the application
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RunningState {
    #[default]
    Running,
    Done,
}

/// Main application state
#[derive(Debug)]
pub struct App {
    // Core state
    pub running_state: RunningState,
    pub countdown: Countdown,

    // UI state
    /// Reset control, revealed once a countdown has expired.
    pub show_reset: bool,
    /// Test control; hidden unless toggled by hand.
    pub show_test: bool,
    /// Message region under the timer.
    pub message: Option<String>,
    pub show_help: bool,
}

/// All possible application messages/events
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Quit,

    // Timer actions
    StartTimer,
    ResetTimer,
    StartTest,
    Tick,

    // Terminal events
    FocusLost,

    // Notification interaction
    AlertClicked,
    AlertClosed,

    // UI
    ToggleTestControl,
    ToggleHelp,
}

impl App {
    pub fn new(show_test: bool) -> Self {
        App {
            running_state: RunningState::default(),
            countdown: Countdown::new(),
            show_reset: false,
            show_test,
            message: None,
            show_help: false,
        }
    }

    /// Core update function
    pub fn update<P, S>(&mut self, msg: Message, notifier: &mut Notifier<P, S>) -> Option<Message>
    where
        P: PermissionSource,
        S: NotificationSink,
    {
        match msg {
            Message::Quit => {
                self.running_state = RunningState::Done;
                None
            }

            // Timer actions
            Message::StartTimer => {
                if self.countdown.start() {
                    self.message = None;
                }
                None
            }
            Message::ResetTimer => {
                self.countdown.reset();
                self.show_reset = false;
                self.message = None;
                None
            }
            Message::StartTest => {
                self.countdown.start_test();
                self.message = None;
                None
            }
            Message::Tick => {
                if self.countdown.tick() == Tick::Expired {
                    notifier.fire_once(&mut self.countdown);
                    self.show_reset = true;
                }
                None
            }

            // The user switching away from the terminal counts as
            // starting to work.
            Message::FocusLost => {
                if !self.countdown.is_running() {
                    debug!("terminal lost focus while idle, starting timer");
                    return Some(Message::StartTimer);
                }
                None
            }

            // Notification interaction
            Message::AlertClicked => {
                // Same as the reset control, then invite the user to
                // step away.
                self.countdown.reset();
                self.show_reset = false;
                self.message = Some(BREAK_MESSAGE.to_string());
                None
            }
            Message::AlertClosed => {
                debug!("notification closed without interaction");
                None
            }

            // UI
            Message::ToggleTestControl => {
                self.show_test = !self.show_test;
                debug!(visible = self.show_test, "test control toggled");
                None
            }
            Message::ToggleHelp => {
                self.show_help = !self.show_help;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::testing::{FakePermissions, RecordingSink, granted_notifier};
    use crate::notify::{Alert, Notifier};
    use crate::timer::TEST_SECS;
    use std::cell::RefCell;
    use std::rc::Rc;

    type TestNotifier = Notifier<FakePermissions, RecordingSink>;

    fn fixture() -> (App, TestNotifier, Rc<RefCell<Vec<Alert>>>) {
        let (notifier, shown) = granted_notifier();
        (App::new(false), notifier, shown)
    }

    /// Process a message and its follow-ups, like the event loop does.
    fn drive(app: &mut App, notifier: &mut TestNotifier, msg: Message) {
        let mut current = Some(msg);
        while let Some(m) = current {
            current = app.update(m, notifier);
        }
    }

    #[test]
    fn fresh_reset_scenario() {
        let (mut app, mut notifier, shown) = fixture();

        drive(&mut app, &mut notifier, Message::ResetTimer);

        assert_eq!(app.countdown.display(), "25:00");
        assert!(!app.show_reset);
        assert!(shown.borrow().is_empty());
    }

    #[test]
    fn test_countdown_scenario() {
        let (mut app, mut notifier, shown) = fixture();

        drive(&mut app, &mut notifier, Message::StartTest);
        for _ in 0..TEST_SECS {
            drive(&mut app, &mut notifier, Message::Tick);
        }

        assert_eq!(app.countdown.display(), "00:00");
        assert!(app.show_reset);
        assert!(!app.countdown.is_running());
        assert_eq!(shown.borrow().len(), 1);

        // Extra ticks at zero must not re-notify.
        drive(&mut app, &mut notifier, Message::Tick);
        assert_eq!(shown.borrow().len(), 1);
    }

    #[test]
    fn focus_lost_while_idle_starts_and_clears_message() {
        let (mut app, mut notifier, _shown) = fixture();
        app.message = Some("stale".to_string());

        drive(&mut app, &mut notifier, Message::FocusLost);

        assert!(app.countdown.is_running());
        assert!(app.message.is_none());
    }

    #[test]
    fn focus_lost_while_running_is_a_noop() {
        let (mut app, mut notifier, _shown) = fixture();
        drive(&mut app, &mut notifier, Message::FocusLost);
        drive(&mut app, &mut notifier, Message::Tick);
        let remaining = app.countdown.remaining_secs();

        drive(&mut app, &mut notifier, Message::FocusLost);

        assert_eq!(app.countdown.remaining_secs(), remaining);
    }

    #[test]
    fn alert_click_resets_and_shows_break_message() {
        let (mut app, mut notifier, _shown) = fixture();
        drive(&mut app, &mut notifier, Message::StartTest);
        for _ in 0..TEST_SECS {
            drive(&mut app, &mut notifier, Message::Tick);
        }

        drive(&mut app, &mut notifier, Message::AlertClicked);

        assert_eq!(app.countdown.display(), "25:00");
        assert!(!app.show_reset);
        assert!(!app.countdown.notified());
        assert_eq!(app.message.as_deref(), Some(BREAK_MESSAGE));
    }

    #[test]
    fn next_expiry_notifies_again_after_click() {
        let (mut app, mut notifier, shown) = fixture();
        let expire = |app: &mut App, notifier: &mut TestNotifier| {
            drive(app, notifier, Message::StartTest);
            for _ in 0..TEST_SECS {
                drive(app, notifier, Message::Tick);
            }
        };

        expire(&mut app, &mut notifier);
        drive(&mut app, &mut notifier, Message::AlertClicked);
        expire(&mut app, &mut notifier);

        assert_eq!(shown.borrow().len(), 2);
    }

    #[test]
    fn starting_clears_break_message() {
        let (mut app, mut notifier, _shown) = fixture();
        app.message = Some(BREAK_MESSAGE.to_string());

        drive(&mut app, &mut notifier, Message::StartTest);

        assert!(app.message.is_none());
    }

    #[test]
    fn quit_finishes_the_loop() {
        let (mut app, mut notifier, _shown) = fixture();
        drive(&mut app, &mut notifier, Message::Quit);
        assert_eq!(app.running_state, RunningState::Done);
    }
}
