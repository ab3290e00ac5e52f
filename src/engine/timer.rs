use std::fmt;

use crate::error::ConfigError;

/// Notification fired by a [`Timer`] when it starts or stops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerEvent {
    Started,
    Stopped,
}

/// Callback invoked synchronously from inside [`Timer::start`] / [`Timer::stop`].
pub type TimerListener = Box<dyn FnMut(TimerEvent) + Send + Sync>;

/// Countdown timer used to gate state entry/exit (jump window, dash window,
/// cooldowns, detection hysteresis).
///
/// Counts `elapsed` up from 0 while running and stops itself once `elapsed`
/// reaches `duration`. A zero duration is legal (a cooldown that is disabled)
/// and stops on the first tick after starting.
///
/// # Usage
/// ```
/// use lance_ai::engine::timer::Timer;
///
/// let mut jump = Timer::new("jump", 0.5).unwrap();
/// jump.start();
/// jump.tick(0.25);
/// assert_eq!(jump.progress(), 0.5);
/// jump.tick(0.25);
/// assert!(!jump.is_running());
/// ```
pub struct Timer {
    label: &'static str,
    duration: f32,
    elapsed: f32,
    running: bool,
    listeners: Vec<TimerListener>,
}

impl Timer {
    /// Rejects negative and non-finite durations.
    pub fn new(label: &'static str, duration: f32) -> Result<Self, ConfigError> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(ConfigError::InvalidDuration {
                name: label,
                value: duration,
            });
        }
        Ok(Self {
            label,
            duration,
            elapsed: 0.0,
            running: false,
            listeners: Vec::new(),
        })
    }

    /// Register a listener. Listeners run in subscription order.
    pub fn subscribe(&mut self, listener: impl FnMut(TimerEvent) + Send + Sync + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Rewind to zero and run. Restarting a running timer rewinds it without
    /// firing a second `Started`.
    pub fn start(&mut self) {
        self.elapsed = 0.0;
        if !self.running {
            self.running = true;
            tracing::trace!(timer = self.label, "timer started");
            self.notify(TimerEvent::Started);
        }
    }

    /// Halt and rewind. Stopping an idle timer is a no-op.
    pub fn stop(&mut self) {
        self.elapsed = 0.0;
        if self.running {
            self.running = false;
            tracing::trace!(timer = self.label, "timer stopped");
            self.notify(TimerEvent::Stopped);
        }
    }

    /// Advance by `dt` seconds. Returns `Some(TimerEvent::Stopped)` on the tick
    /// that ran the timer out, so owners can chain follow-up work (e.g. start
    /// a cooldown) without holding a listener that borrows them.
    pub fn tick(&mut self, dt: f32) -> Option<TimerEvent> {
        if !self.running {
            return None;
        }
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        if self.elapsed >= self.duration {
            self.stop();
            return Some(TimerEvent::Stopped);
        }
        None
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// `elapsed / duration` clamped to `[0, 1]`. A zero-duration timer is
    /// always complete and reports 1.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    fn notify(&mut self, event: TimerEvent) {
        for listener in &mut self.listeners {
            listener(event);
        }
    }
}

impl fmt::Debug for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timer")
            .field("label", &self.label)
            .field("duration", &self.duration)
            .field("elapsed", &self.elapsed)
            .field("running", &self.running)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn rejects_negative_and_nan_durations() {
        assert!(matches!(
            Timer::new("bad", -1.0),
            Err(ConfigError::InvalidDuration { name: "bad", .. })
        ));
        assert!(Timer::new("nan", f32::NAN).is_err());
        assert!(Timer::new("zero", 0.0).is_ok());
    }

    #[test]
    fn tick_is_noop_while_stopped() {
        let mut timer = Timer::new("t", 1.0).unwrap();
        assert_eq!(timer.tick(0.5), None);
        assert_eq!(timer.elapsed(), 0.0);
        assert!(!timer.is_running());
    }

    #[test]
    fn stops_exactly_when_duration_is_reached() {
        let mut timer = Timer::new("t", 0.5).unwrap();
        timer.start();
        assert_eq!(timer.tick(0.25), None);
        assert!(timer.is_running());
        assert_eq!(timer.tick(0.25), Some(TimerEvent::Stopped));
        assert!(!timer.is_running());
        assert_eq!(timer.elapsed(), 0.0);
    }

    #[test]
    fn negative_dt_does_not_rewind() {
        let mut timer = Timer::new("t", 1.0).unwrap();
        timer.start();
        timer.tick(0.25);
        assert_eq!(timer.tick(-0.5), None);
        assert_eq!(timer.elapsed(), 0.25);
        timer.tick(-1.0);
        assert!(timer.elapsed() >= 0.0);
    }

    #[test]
    fn progress_is_clamped() {
        let mut timer = Timer::new("t", 1.0).unwrap();
        timer.start();
        timer.tick(0.75);
        assert_eq!(timer.progress(), 0.75);
        assert_eq!(Timer::new("z", 0.0).unwrap().progress(), 1.0);
    }

    #[test]
    fn zero_duration_stops_on_first_tick() {
        let mut timer = Timer::new("cooldown", 0.0).unwrap();
        timer.start();
        assert!(timer.is_running());
        assert_eq!(timer.tick(0.016), Some(TimerEvent::Stopped));
        assert!(!timer.is_running());
    }

    #[test]
    fn listeners_fire_in_subscription_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut timer = Timer::new("t", 0.1).unwrap();
        for id in 0..3 {
            let log = Arc::clone(&log);
            timer.subscribe(move |event| log.lock().unwrap().push((id, event)));
        }

        timer.start();
        timer.start();
        timer.stop();
        timer.stop();

        let log = log.lock().unwrap();
        assert_eq!(
            *log,
            vec![
                (0, TimerEvent::Started),
                (1, TimerEvent::Started),
                (2, TimerEvent::Started),
                (0, TimerEvent::Stopped),
                (1, TimerEvent::Stopped),
                (2, TimerEvent::Stopped),
            ]
        );
    }

    #[test]
    fn auto_stop_notifies_listeners() {
        let stops = Arc::new(Mutex::new(0));
        let mut timer = Timer::new("t", 0.25).unwrap();
        let counter = Arc::clone(&stops);
        timer.subscribe(move |event| {
            if event == TimerEvent::Stopped {
                *counter.lock().unwrap() += 1;
            }
        });
        timer.start();
        timer.tick(1.0);
        timer.tick(1.0);
        assert_eq!(*stops.lock().unwrap(), 1);
    }
}
