// ── Expiration countdown ──
//
// Derives the remaining hold time from an offer's `expires_at`. Expiry is
// display-only: nothing is removed or refetched when the clock runs out.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::debug;

const TICK: Duration = Duration::from_secs(1);

// ── Clock ────────────────────────────────────────────────────────────

/// Source of "now" for the ticker.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

// ── State ────────────────────────────────────────────────────────────

/// Whole hours, minutes and seconds left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Remaining {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Remaining {
    fn from_delta(delta: TimeDelta) -> Self {
        let total = delta.num_seconds().max(0);
        Self {
            hours: total / 3600,
            minutes: (total % 3600) / 60,
            seconds: total % 60,
        }
    }
}

impl fmt::Display for Remaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CountdownState {
    /// The offer carries no expiry.
    NoDeadline,
    Running(Remaining),
    Expired,
}

impl CountdownState {
    /// No further updates will follow this state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::NoDeadline | Self::Expired)
    }
}

impl fmt::Display for CountdownState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDeadline => f.write_str("-- : -- : --"),
            Self::Running(remaining) => write!(f, "{remaining}"),
            Self::Expired => f.write_str("00:00:00"),
        }
    }
}

// ── Countdown ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    expires_at: Option<DateTime<Utc>>,
}

impl Countdown {
    pub fn new(expires_at: Option<DateTime<Utc>>) -> Self {
        Self { expires_at }
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// `max(0, expires_at - now)`, or `None` without a deadline.
    pub fn remaining_at(&self, now: DateTime<Utc>) -> Option<TimeDelta> {
        self.expires_at
            .map(|at| (at - now).max(TimeDelta::zero()))
    }

    pub fn state_at(&self, now: DateTime<Utc>) -> CountdownState {
        match self.remaining_at(now) {
            None => CountdownState::NoDeadline,
            Some(left) if left <= TimeDelta::zero() => CountdownState::Expired,
            Some(left) => CountdownState::Running(Remaining::from_delta(left)),
        }
    }
}

// ── Ticker ───────────────────────────────────────────────────────────

/// Once-a-second countdown publisher.
///
/// The current state is available immediately; the task then republishes
/// every second and exits after the first terminal state. Dropping the
/// ticker (or calling [`stop`](Self::stop)) cancels the task.
pub struct CountdownTicker {
    rx: watch::Receiver<CountdownState>,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl CountdownTicker {
    /// Spawn on the current tokio runtime.
    pub fn spawn(countdown: Countdown, clock: impl Clock) -> Self {
        let initial = countdown.state_at(clock.now());
        let (tx, rx) = watch::channel(initial);
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            if initial.is_terminal() {
                return;
            }

            let mut interval = tokio::time::interval(TICK);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; the initial state is
            // already published.
            interval.tick().await;

            loop {
                tokio::select! {
                    biased;
                    () = token.cancelled() => {
                        debug!("countdown ticker cancelled");
                        break;
                    }
                    _ = interval.tick() => {
                        let state = countdown.state_at(clock.now());
                        if tx.send(state).is_err() {
                            break;
                        }
                        if state.is_terminal() {
                            debug!("countdown expired");
                            break;
                        }
                    }
                }
            }
        });

        Self { rx, cancel, handle }
    }

    /// Latest published state.
    pub fn current(&self) -> CountdownState {
        *self.rx.borrow()
    }

    /// A fresh receiver for change notifications.
    pub fn subscribe(&self) -> watch::Receiver<CountdownState> {
        self.rx.clone()
    }

    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// `true` once the task has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for CountdownTicker {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0).unwrap()
    }

    /// Wall clock driven by tokio's (pausable) time.
    struct PausedClock {
        base: DateTime<Utc>,
        start: tokio::time::Instant,
    }

    impl PausedClock {
        fn new() -> Self {
            Self {
                base: base(),
                start: tokio::time::Instant::now(),
            }
        }
    }

    impl Clock for PausedClock {
        fn now(&self) -> DateTime<Utc> {
            let elapsed = tokio::time::Instant::now() - self.start;
            self.base + TimeDelta::from_std(elapsed).unwrap()
        }
    }

    #[test]
    fn no_deadline_shows_placeholder() {
        let state = Countdown::new(None).state_at(base());
        assert_eq!(state, CountdownState::NoDeadline);
        assert_eq!(state.to_string(), "-- : -- : --");
    }

    #[test]
    fn running_splits_hours_minutes_seconds() {
        let countdown = Countdown::new(Some(base() + TimeDelta::seconds(3723)));
        let state = countdown.state_at(base());
        assert_eq!(
            state,
            CountdownState::Running(Remaining {
                hours: 1,
                minutes: 2,
                seconds: 3
            })
        );
        assert_eq!(state.to_string(), "01:02:03");
    }

    #[test]
    fn thirty_minute_hold_reads_29_59_after_one_second() {
        let countdown = Countdown::new(Some(base() + TimeDelta::minutes(30)));
        let state = countdown.state_at(base() + TimeDelta::seconds(1));
        assert_eq!(state.to_string(), "00:29:59");
    }

    #[test]
    fn remaining_is_clamped_at_zero() {
        let countdown = Countdown::new(Some(base()));
        let later = base() + TimeDelta::hours(5);
        assert_eq!(countdown.remaining_at(later), Some(TimeDelta::zero()));
        assert_eq!(countdown.state_at(later), CountdownState::Expired);
        assert_eq!(countdown.state_at(base()), CountdownState::Expired);
    }

    #[test]
    fn remaining_never_increases() {
        let countdown = Countdown::new(Some(base() + TimeDelta::seconds(90)));
        let mut previous = countdown.remaining_at(base()).unwrap();
        for step in 1..200 {
            let now = base() + TimeDelta::milliseconds(step * 700);
            let left = countdown.remaining_at(now).unwrap();
            assert!(left <= previous);
            assert!(left >= TimeDelta::zero());
            previous = left;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_counts_down_then_stops() {
        let countdown = Countdown::new(Some(base() + TimeDelta::seconds(3)));
        let ticker = CountdownTicker::spawn(countdown, PausedClock::new());
        let mut rx = ticker.subscribe();

        let mut seen = vec![rx.borrow_and_update().to_string()];
        while rx.changed().await.is_ok() {
            let state = *rx.borrow_and_update();
            seen.push(state.to_string());
            if state.is_terminal() {
                break;
            }
        }

        assert_eq!(seen, vec!["00:00:03", "00:00:02", "00:00:01", "00:00:00"]);
        assert_eq!(ticker.current(), CountdownState::Expired);

        tokio::time::sleep(TICK).await;
        assert!(ticker.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_without_deadline_publishes_once() {
        let ticker = CountdownTicker::spawn(Countdown::new(None), PausedClock::new());
        assert_eq!(ticker.current(), CountdownState::NoDeadline);

        tokio::time::sleep(TICK).await;
        assert!(ticker.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_the_task() {
        let countdown = Countdown::new(Some(base() + TimeDelta::minutes(30)));
        let ticker = CountdownTicker::spawn(countdown, PausedClock::new());

        tokio::time::sleep(TICK * 2).await;
        assert!(!ticker.is_finished());

        ticker.stop();
        tokio::time::sleep(TICK).await;
        assert!(ticker.is_finished());
        assert!(matches!(ticker.current(), CountdownState::Running(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_ticker_closes_the_channel() {
        let countdown = Countdown::new(Some(base() + TimeDelta::minutes(30)));
        let ticker = CountdownTicker::spawn(countdown, PausedClock::new());
        let mut rx = ticker.subscribe();
        drop(ticker);

        // The task exits and drops its sender; pending updates may still
        // drain first.
        while rx.changed().await.is_ok() {}
        assert!(rx.has_changed().is_err());
    }
}
