use tracing::debug;

/// Length of a work period, in seconds (25 minutes).
pub const WORK_SECS: u32 = 25 * 60;

/// Length of the shortened test countdown, in seconds.
pub const TEST_SECS: u32 = 10;

/// Outcome of a single one-second tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    /// Timer is not running; nothing happened.
    Idle,
    /// One second elapsed.
    Counted,
    /// The countdown reached zero and stopped.
    Expired,
}

/// Remaining time plus the run/notify flags that drive the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct Countdown {
    remaining: u32,
    running: bool,
    notified: bool,
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}

impl Countdown {
    pub fn new() -> Self {
        Self {
            remaining: WORK_SECS,
            running: false,
            notified: false,
        }
    }

    /// Begin counting down. No-op when already running, so a second start
    /// can never produce a second ticker. Returns whether the timer
    /// actually transitioned to running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        debug!("starting timer");
        self.running = true;
        true
    }

    /// Back to a fresh 25-minute work period. Callable in any state.
    pub fn reset(&mut self) {
        debug!("resetting timer");
        self.running = false;
        self.remaining = WORK_SECS;
        self.notified = false;
    }

    /// Shorten the countdown to ten seconds and start it, to exercise the
    /// expiry path without waiting out a full work period.
    pub fn start_test(&mut self) {
        debug!("setting test timer ({TEST_SECS} seconds)");
        self.running = false;
        self.remaining = TEST_SECS;
        self.start();
    }

    /// Advance by one second of wall-clock time. Reports [`Tick::Expired`]
    /// on the tick that brings the countdown to zero; the timer stops and
    /// stays at zero until reset.
    pub fn tick(&mut self) -> Tick {
        if !self.running {
            return Tick::Idle;
        }
        if self.remaining > 0 {
            self.remaining -= 1;
        }
        if self.remaining == 0 {
            debug!("timer finished");
            self.running = false;
            Tick::Expired
        } else {
            Tick::Counted
        }
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn notified(&self) -> bool {
        self.notified
    }

    /// Fire-once guard: returns true the first time after an expiry and
    /// false until the next [`Countdown::reset`].
    pub fn mark_notified(&mut self) -> bool {
        if self.notified {
            return false;
        }
        self.notified = true;
        true
    }

    /// The `MM:SS` text shown in the time display.
    pub fn display(&self) -> String {
        format_mmss(self.remaining as i64)
    }
}

/// Format a second count as zero-padded `MM:SS`. Negative input is clamped
/// to zero; the minute field wraps at 100 to stay two digits.
pub fn format_mmss(secs: i64) -> String {
    let secs = secs.max(0);
    format!("{:02}:{:02}", (secs / 60) % 100, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_work_period() {
        assert_eq!(format_mmss(1500), "25:00");
        assert_eq!(format_mmss(59), "00:59");
        assert_eq!(format_mmss(0), "00:00");
        assert_eq!(format_mmss(610), "10:10");
        assert_eq!(format_mmss(5999), "99:59");
    }

    #[test]
    fn clamps_negative_input() {
        assert_eq!(format_mmss(-1), "00:00");
        assert_eq!(format_mmss(i64::MIN), "00:00");
    }

    #[test]
    fn minute_field_wraps_at_two_digits() {
        assert_eq!(format_mmss(6000), "00:00");
        assert_eq!(format_mmss(6061), "01:01");
    }

    #[test]
    fn starts_once() {
        let mut countdown = Countdown::new();
        assert!(countdown.start());
        assert!(!countdown.start());
        assert!(countdown.is_running());

        // Only one logical ticker: one tick decrements by exactly one.
        assert_eq!(countdown.tick(), Tick::Counted);
        assert_eq!(countdown.remaining_secs(), WORK_SECS - 1);
    }

    #[test]
    fn tick_without_start_does_nothing() {
        let mut countdown = Countdown::new();
        assert_eq!(countdown.tick(), Tick::Idle);
        assert_eq!(countdown.remaining_secs(), WORK_SECS);
    }

    #[test]
    fn reset_restores_initial_state_from_anywhere() {
        let mut countdown = Countdown::new();
        countdown.start_test();
        for _ in 0..TEST_SECS {
            countdown.tick();
        }
        countdown.mark_notified();

        countdown.reset();
        assert_eq!(countdown.remaining_secs(), WORK_SECS);
        assert!(!countdown.is_running());
        assert!(!countdown.notified());

        // Idempotent.
        countdown.reset();
        assert_eq!(countdown.remaining_secs(), WORK_SECS);
    }

    #[test]
    fn test_timer_expires_after_ten_ticks() {
        let mut countdown = Countdown::new();
        countdown.start_test();
        assert_eq!(countdown.remaining_secs(), TEST_SECS);
        assert!(countdown.is_running());

        for _ in 0..TEST_SECS - 1 {
            assert_eq!(countdown.tick(), Tick::Counted);
        }
        assert_eq!(countdown.tick(), Tick::Expired);
        assert!(!countdown.is_running());
        assert_eq!(countdown.display(), "00:00");
    }

    #[test]
    fn start_test_cancels_a_running_countdown() {
        let mut countdown = Countdown::new();
        countdown.start();
        countdown.tick();
        countdown.start_test();
        assert_eq!(countdown.remaining_secs(), TEST_SECS);
        assert!(countdown.is_running());
    }

    #[test]
    fn restart_after_expiry_expires_immediately() {
        let mut countdown = Countdown::new();
        countdown.start_test();
        for _ in 0..TEST_SECS {
            countdown.tick();
        }
        assert!(countdown.start());
        assert_eq!(countdown.tick(), Tick::Expired);
    }

    #[test]
    fn notified_guard_fires_once() {
        let mut countdown = Countdown::new();
        assert!(countdown.mark_notified());
        assert!(!countdown.mark_notified());
        countdown.reset();
        assert!(countdown.mark_notified());
    }
}
