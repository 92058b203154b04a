//! One-shot desktop notification for timer expiry.
//!
//! The platform notification daemon sits behind [`PermissionSource`] and
//! [`NotificationSink`] so the fire-once and degradation policy can be
//! exercised with fakes.

use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

use crate::timer::Countdown;

pub const ALERT_TITLE: &str = "Pomodoro Timer";
pub const ALERT_BODY: &str = "Time is up. CLICK ME!";
pub const BREAK_MESSAGE: &str = "Go take a break. I will be here waiting for you.";

/// Icon shown on the expiry alert, resolved relative to the working
/// directory. Missing is fine; the alert degrades to no icon.
pub const ICON_FILE: &str = "tomato.svg";

/// How long an untouched alert stays up before it is dismissed.
pub const AUTO_DISMISS: Duration = Duration::from_secs(300);

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification backend error: {0}")]
    Backend(String),
}

/// Whether the platform will let us show notifications.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Permission {
    Granted,
    Denied,
    Unsupported,
}

pub trait PermissionSource {
    fn query(&self) -> Permission;
    /// Ask the platform to (re)resolve permission.
    fn request(&mut self) -> Permission;
}

/// What the user did with a displayed alert.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlertEvent {
    Clicked,
    Closed,
}

/// A single alert to raise.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub title: String,
    pub body: String,
    pub icon: Option<PathBuf>,
    /// Keep the alert up until the user acts on it.
    pub require_interaction: bool,
    pub auto_dismiss: Duration,
}

pub trait NotificationSink {
    fn show(&mut self, alert: &Alert) -> Result<(), NotifyError>;
}

/// Permission checks against the desktop notification daemon. There is no
/// prompt on the desktop; a reachable daemon counts as granted and an
/// unreachable one as unsupported.
pub struct DesktopPermissions;

impl PermissionSource for DesktopPermissions {
    fn query(&self) -> Permission {
        #[cfg(all(unix, not(target_os = "macos")))]
        {
            match notify_rust::get_server_information() {
                Ok(info) => {
                    debug!(server = %info.name, "notification server present");
                    Permission::Granted
                }
                Err(e) => {
                    debug!(error = %e, "notifications not supported, no server");
                    Permission::Unsupported
                }
            }
        }
        #[cfg(not(all(unix, not(target_os = "macos"))))]
        {
            Permission::Granted
        }
    }

    fn request(&mut self) -> Permission {
        self.query()
    }
}

/// Shows alerts via notify-rust and forwards the user's click/close to the
/// event loop over a channel.
pub struct DesktopSink {
    events: Sender<AlertEvent>,
}

impl DesktopSink {
    pub fn new(events: Sender<AlertEvent>) -> Self {
        Self { events }
    }
}

impl NotificationSink for DesktopSink {
    fn show(&mut self, alert: &Alert) -> Result<(), NotifyError> {
        let mut notification = notify_rust::Notification::new();
        notification
            .appname("pomo")
            .summary(&alert.title)
            .body(&alert.body);
        if let Some(icon) = alert.icon.as_deref().and_then(Path::to_str) {
            notification.icon(icon);
        }

        #[cfg(all(unix, not(target_os = "macos")))]
        {
            if alert.require_interaction {
                notification.urgency(notify_rust::Urgency::Critical);
            }
            notification.timeout(notify_rust::Timeout::Milliseconds(
                alert.auto_dismiss.as_millis() as u32,
            ));
            let handle = notification
                .show()
                .map_err(|e| NotifyError::Backend(e.to_string()))?;

            // Waiting for the interaction blocks, so it happens off the UI
            // thread; the event loop drains the channel.
            let events = self.events.clone();
            std::thread::spawn(move || {
                handle.wait_for_action(|action| {
                    let event = match action {
                        "__closed" => AlertEvent::Closed,
                        _ => AlertEvent::Clicked,
                    };
                    let _ = events.send(event);
                });
            });
            Ok(())
        }
        #[cfg(not(all(unix, not(target_os = "macos"))))]
        {
            // No action support off XDG; show and forget.
            let _ = &self.events;
            notification
                .show()
                .map_err(|e| NotifyError::Backend(e.to_string()))?;
            Ok(())
        }
    }
}

/// Raises the expiry alert, at most once per countdown.
pub struct Notifier<P, S> {
    permissions: P,
    sink: S,
    icon_path: PathBuf,
}

pub type DesktopNotifier = Notifier<DesktopPermissions, DesktopSink>;

impl DesktopNotifier {
    pub fn desktop(events: Sender<AlertEvent>) -> Self {
        Notifier::new(DesktopPermissions, DesktopSink::new(events))
    }
}

impl<P: PermissionSource, S: NotificationSink> Notifier<P, S> {
    pub fn new(permissions: P, sink: S) -> Self {
        Self {
            permissions,
            sink,
            icon_path: PathBuf::from(ICON_FILE),
        }
    }

    #[cfg(test)]
    pub fn with_icon_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.icon_path = path.into();
        self
    }

    /// Probe the notification facility up front so a missing backend shows
    /// in the log before the first expiry.
    pub fn request_permission(&mut self) -> Permission {
        let permission = self.permissions.request();
        debug!(?permission, "notification permission");
        permission
    }

    /// Raise the expiry alert. Guarded by the countdown's fire-once flag.
    ///
    /// Permission is requested once more if the first check comes back
    /// negative; a second refusal is logged and swallowed. An unavailable
    /// icon degrades to an alert without one.
    pub fn fire_once(&mut self, countdown: &mut Countdown) {
        if countdown.notified() {
            debug!("notification already sent, skipping");
            return;
        }

        let mut permission = self.permissions.query();
        if permission != Permission::Granted {
            debug!("notification permission not granted, requesting");
            permission = self.permissions.request();
        }
        if permission != Permission::Granted {
            warn!(?permission, "cannot raise notification, giving up");
            return;
        }

        let alert = Alert {
            title: ALERT_TITLE.to_string(),
            body: ALERT_BODY.to_string(),
            icon: check_icon(&self.icon_path),
            require_interaction: true,
            auto_dismiss: AUTO_DISMISS,
        };
        match self.sink.show(&alert) {
            Ok(()) => debug!(icon = alert.icon.is_some(), "notification sent"),
            Err(e) => warn!(error = %e, "failed to raise notification"),
        }
        countdown.mark_notified();
    }
}

/// Existence check for the alert icon. Any failure means "no icon", never
/// an error surfaced to the user.
fn check_icon(path: &Path) -> Option<PathBuf> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => Some(path.to_path_buf()),
        Ok(_) => {
            warn!(path = %path.display(), "icon path is not a file, sending without icon");
            None
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "icon unavailable, sending without icon");
            None
        }
    }
}
