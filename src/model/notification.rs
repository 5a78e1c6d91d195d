//! Transient notification state
//!
//! At most one notification is active. It stays visible for the display
//! duration, fades for the fade duration, then disappears. Phases advance
//! on `tick`, so the event loop's tick action is the only clock.

use std::time::{Duration, Instant};

/// Lifecycle phase of the active notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPhase {
    Visible,
    Fading,
}

/// A displayed notification
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub phase: NotificationPhase,
    /// When the current phase started
    pub phase_started: Instant,
}

/// Owns the single notification slot
#[derive(Debug, Clone)]
pub struct Notifier {
    current: Option<Notification>,
    display: Duration,
    fade: Duration,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(Duration::from_millis(2500), Duration::from_millis(300))
    }
}

impl Notifier {
    pub fn new(display: Duration, fade: Duration) -> Self {
        Self {
            current: None,
            display,
            fade,
        }
    }

    /// Show a message, replacing whatever is on screen
    pub fn show(&mut self, message: impl Into<String>, now: Instant) {
        let message = message.into();
        log::debug!("notification: {}", message);
        self.current = Some(Notification {
            message,
            phase: NotificationPhase::Visible,
            phase_started: now,
        });
    }

    /// Advance phases; returns true when something changed on screen
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(notification) = self.current.as_mut() else {
            return false;
        };

        let elapsed = now.saturating_duration_since(notification.phase_started);
        match notification.phase {
            NotificationPhase::Visible if elapsed >= self.display => {
                notification.phase = NotificationPhase::Fading;
                notification.phase_started = now;
                true
            }
            NotificationPhase::Fading if elapsed >= self.fade => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    /// Fade progress in `0.0..=1.0`; zero while fully visible
    pub fn fade_progress(&self, now: Instant) -> f64 {
        match self.current.as_ref() {
            Some(n) if n.phase == NotificationPhase::Fading && !self.fade.is_zero() => {
                let elapsed = now.saturating_duration_since(n.phase_started);
                (elapsed.as_secs_f64() / self.fade.as_secs_f64()).min(1.0)
            }
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notifier() -> Notifier {
        Notifier::new(Duration::from_millis(2500), Duration::from_millis(300))
    }

    #[test]
    fn test_new_notification_replaces_current() {
        let mut n = notifier();
        let t0 = Instant::now();
        n.show("first", t0);
        n.show("second", t0 + Duration::from_millis(10));

        let current = n.current().unwrap();
        assert_eq!(current.message, "second");
        assert_eq!(current.phase, NotificationPhase::Visible);
    }

    #[test]
    fn test_two_phase_dismissal() {
        let mut n = notifier();
        let t0 = Instant::now();
        n.show("Export complete.", t0);

        assert!(!n.tick(t0 + Duration::from_millis(2000)));
        assert_eq!(n.current().unwrap().phase, NotificationPhase::Visible);

        assert!(n.tick(t0 + Duration::from_millis(2500)));
        assert_eq!(n.current().unwrap().phase, NotificationPhase::Fading);

        assert!(!n.tick(t0 + Duration::from_millis(2700)));
        assert!(n.current().is_some());

        assert!(n.tick(t0 + Duration::from_millis(2800)));
        assert!(n.current().is_none());
    }

    #[test]
    fn test_replacement_restarts_timer() {
        let mut n = notifier();
        let t0 = Instant::now();
        n.show("first", t0);
        n.show("second", t0 + Duration::from_millis(2000));

        n.tick(t0 + Duration::from_millis(3000));
        assert_eq!(n.current().unwrap().phase, NotificationPhase::Visible);
    }

    #[test]
    fn test_fade_progress() {
        let mut n = notifier();
        let t0 = Instant::now();
        n.show("msg", t0);
        assert_eq!(n.fade_progress(t0), 0.0);

        let fade_start = t0 + Duration::from_millis(2500);
        n.tick(fade_start);
        let half = n.fade_progress(fade_start + Duration::from_millis(150));
        assert!((half - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_tick_without_notification() {
        let mut n = notifier();
        assert!(!n.tick(Instant::now()));
    }
}
