//! Repeating session timer

use crossbeam_channel::Receiver;
use std::time::{Duration, Instant};
use tracing::debug;

/// An armed repeating timer.
///
/// Fired ticks are counted from the time the timer was armed, so polls
/// that arrive late still see every cadence that elapsed. The crossbeam
/// ticker only signals that a tick is due. Dropping the timer disarms it;
/// no tick can be observed afterwards.
#[derive(Debug)]
pub struct SessionTimer {
    wake: Receiver<Instant>,
    armed_at: Instant,
    cadence: Duration,
    consumed: u64,
}

impl SessionTimer {
    /// Arm a timer that fires every `cadence`
    pub fn arm(cadence: Duration) -> Self {
        let cadence = cadence.max(Duration::from_millis(1));
        debug!("Arming session timer every {:?}", cadence);
        Self {
            wake: crossbeam_channel::tick(cadence),
            armed_at: Instant::now(),
            cadence,
            consumed: 0,
        }
    }

    pub fn armed_at(&self) -> Instant {
        self.armed_at
    }

    /// Whether the ticker has signalled since the last drain
    pub fn is_due(&self) -> bool {
        !self.wake.is_empty()
    }

    /// Time left until the next tick, measured from `now`
    pub fn until_next(&self, now: Instant) -> Duration {
        let elapsed = now.saturating_duration_since(self.armed_at).as_nanos();
        let cadence = self.cadence.as_nanos();
        let remaining = cadence - elapsed % cadence;
        Duration::from_nanos(remaining as u64)
    }

    /// Number of ticks fired since the last drain
    pub fn drain(&mut self) -> u64 {
        self.drain_at(Instant::now())
    }

    /// Number of ticks due at `now` that were not yet drained
    pub fn drain_at(&mut self, now: Instant) -> u64 {
        while self.wake.try_recv().is_ok() {}

        let elapsed = now.saturating_duration_since(self.armed_at).as_nanos();
        let due = (elapsed / self.cadence.as_nanos()) as u64;
        let fired = due.saturating_sub(self.consumed);
        self.consumed = self.consumed.max(due);
        fired
    }
}

impl Drop for SessionTimer {
    fn drop(&mut self) {
        debug!("Disarming session timer ({:?})", self.cadence);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_tick_before_cadence() {
        let mut timer = SessionTimer::arm(Duration::from_secs(60));
        assert_eq!(timer.drain(), 0);
        assert!(!timer.is_due());
    }

    #[test]
    fn test_every_elapsed_cadence_is_counted() {
        let mut timer = SessionTimer::arm(Duration::from_secs(5));
        let start = timer.armed_at();

        assert_eq!(timer.drain_at(start + Duration::from_secs(4)), 0);
        assert_eq!(timer.drain_at(start + Duration::from_secs(15)), 3);
        // Already drained ticks are not reported again
        assert_eq!(timer.drain_at(start + Duration::from_secs(16)), 0);
        assert_eq!(timer.drain_at(start + Duration::from_secs(50)), 7);
    }

    #[test]
    fn test_ticks_accumulate_between_late_drains() {
        let mut timer = SessionTimer::arm(Duration::from_millis(10));
        std::thread::sleep(Duration::from_millis(105));
        let fired = timer.drain();
        assert!(fired >= 10, "expected at least 10 ticks, got {}", fired);
        assert!(fired < 40, "expected about 10 ticks, got {}", fired);
    }

    #[test]
    fn test_until_next_tick() {
        let timer = SessionTimer::arm(Duration::from_secs(5));
        let start = timer.armed_at();
        assert_eq!(timer.until_next(start), Duration::from_secs(5));
        assert_eq!(timer.until_next(start + Duration::from_secs(7)), Duration::from_secs(3));
    }

    #[test]
    fn test_ticker_signals_due() {
        let timer = SessionTimer::arm(Duration::from_millis(5));
        std::thread::sleep(Duration::from_millis(30));
        assert!(timer.is_due());
    }
}
