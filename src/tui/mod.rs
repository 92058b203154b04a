pub mod app;
pub mod event;
pub mod ui;
pub mod views;

use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::{
    event::{DisableFocusChange, EnableFocusChange, Event, poll, read},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::notify::{AlertEvent, DesktopNotifier, NotificationSink, Notifier, PermissionSource};
use app::{App, Message, RunningState};

/// Interval between countdown decrements.
const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Main entry point for TUI mode
pub fn run_tui(test_timer: bool, show_test: bool) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Alert click/close outcomes arrive from the notifier thread
    let (alert_tx, alert_rx) = mpsc::channel();
    let mut notifier = DesktopNotifier::desktop(alert_tx);
    notifier.request_permission();

    // Create app state
    let mut app = App::new(show_test);
    if test_timer {
        dispatch(&mut app, &mut notifier, Message::StartTest);
    }

    // Main loop
    let result = run_app(&mut terminal, &mut app, &mut notifier, &alert_rx);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app<P, S>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    notifier: &mut Notifier<P, S>,
    alerts: &mpsc::Receiver<AlertEvent>,
) -> io::Result<()>
where
    P: PermissionSource,
    S: NotificationSink,
{
    let mut last_tick = Instant::now();
    loop {
        // Render
        terminal.draw(|f| ui::draw(f, app))?;

        // Handle events with timeout (for timer updates)
        if poll(Duration::from_millis(250))? {
            match read()? {
                Event::Key(key) => {
                    if let Some(msg) = event::handle_key(key, app) {
                        dispatch(app, notifier, msg);
                    }
                }
                Event::FocusLost => dispatch(app, notifier, Message::FocusLost),
                _ => {}
            }
        }

        // Alert interactions reported by the notifier thread
        while let Ok(alert_event) = alerts.try_recv() {
            let msg = match alert_event {
                AlertEvent::Clicked => Message::AlertClicked,
                AlertEvent::Closed => Message::AlertClosed,
            };
            dispatch(app, notifier, msg);
        }

        // One countdown tick per elapsed wall-clock second
        if last_tick.elapsed() >= TICK_INTERVAL {
            last_tick += TICK_INTERVAL;
            dispatch(app, notifier, Message::Tick);
        }

        // Check if we should quit
        if app.running_state == RunningState::Done {
            return Ok(());
        }
    }
}

/// Process a message and any follow-up messages
fn dispatch<P, S>(app: &mut App, notifier: &mut Notifier<P, S>, msg: Message)
where
    P: PermissionSource,
    S: NotificationSink,
{
    let mut current_msg = Some(msg);
    while let Some(m) = current_msg {
        current_msg = app.update(m, notifier);
    }
}
