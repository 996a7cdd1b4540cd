use std::time::Duration;
use tokio::{
    sync::{mpsc, oneshot},
    time,
};

/// Identity of one attempt. Signals from a superseded countdown carry a stale
/// id and are dropped by the controller.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SessionId(pub(crate) u64);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TimerEvent {
    /// One second elapsed; `remaining` seconds are left of the original `duration`.
    Tick { session: SessionId, remaining: u32, duration: u32 },
    /// The countdown ran out. Emitted exactly once per countdown.
    Expired { session: SessionId },
}

/// Countdown arithmetic, decoupled from the clock that drives it.
struct Ticker {
    remaining: u32,
    duration: u32,
}

impl Ticker {
    const fn new(duration: u32) -> Self {
        Self { remaining: duration, duration }
    }

    /// Advances by one second, clamping at zero. The final second yields the
    /// expiry signal instead of a tick.
    fn tick(&mut self, session: SessionId) -> TimerEvent {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            TimerEvent::Expired { session }
        } else {
            TimerEvent::Tick { session, remaining: self.remaining, duration: self.duration }
        }
    }
}

/// Whether fewer than 15% of the original duration remains. Exactly 15% is
/// not yet a warning.
pub const fn is_warning(remaining: u32, duration: u32) -> bool {
    (remaining as u64) * 20 < (duration as u64) * 3
}

/// `M:SS` readout for the view.
pub fn format_remaining(remaining: u32) -> String {
    format!("{}:{:02}", remaining / 60, remaining % 60)
}

/// Handle to one scheduled countdown. The controller keeps at most one alive:
/// opening a new attempt stops the previous handle first, and dropping a
/// handle cancels its schedule outright.
pub struct Countdown {
    cancel: Option<oneshot::Sender<()>>,
}

impl Countdown {
    /// Spawns the ticking task. The caller guarantees a positive duration.
    pub fn start(session: SessionId, duration: u32, events: mpsc::UnboundedSender<TimerEvent>) -> Self {
        debug_assert!(duration > 0);
        let (cancel, mut cancelled) = oneshot::channel();
        tokio::spawn(async move {
            let mut interval = time::interval(Duration::from_secs(1));
            interval.tick().await; // the first tick completes immediately
            let mut ticker = Ticker::new(duration);
            loop {
                tokio::select! {
                    biased;
                    _ = &mut cancelled => return,
                    _ = interval.tick() => {}
                }
                let event = ticker.tick(session);
                let expired = matches!(event, TimerEvent::Expired { .. });
                if events.send(event).is_err() || expired {
                    return;
                }
            }
        });
        Self { cancel: Some(cancel) }
    }

    /// Cancels the schedule. No-op once the countdown has stopped or expired.
    pub fn stop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::{format_remaining, is_warning, Countdown, SessionId, Ticker, TimerEvent};
    use tokio::sync::mpsc;

    #[test]
    fn ticker_counts_down_by_one_and_expires_once() {
        let session = SessionId(1);
        let mut ticker = Ticker::new(4);
        let mut previous = 4;
        for _ in 0..3 {
            match ticker.tick(session) {
                TimerEvent::Tick { remaining, duration, .. } => {
                    assert_eq!(remaining, previous - 1);
                    assert_eq!(duration, 4);
                    previous = remaining;
                }
                event => panic!("unexpected event: {event:?}"),
            }
        }
        assert_eq!(ticker.tick(session), TimerEvent::Expired { session });
    }

    #[test]
    fn warning_threshold_is_strict() {
        // 15% of 60 seconds is exactly 9 seconds.
        assert!(!is_warning(10, 60));
        assert!(!is_warning(9, 60));
        assert!(is_warning(8, 60));
        assert!(is_warning(0, 60));
        assert!(!is_warning(600, 600));
    }

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_remaining(605), "10:05");
        assert_eq!(format_remaining(59), "0:59");
        assert_eq!(format_remaining(0), "0:00");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn countdown_ticks_then_expires() {
        let session = SessionId(7);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _countdown = Countdown::start(session, 2, tx);
        assert_eq!(rx.recv().await, Some(TimerEvent::Tick { session, remaining: 1, duration: 2 }));
        assert_eq!(rx.recv().await, Some(TimerEvent::Expired { session }));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn stopped_countdown_never_fires() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut countdown = Countdown::start(SessionId(3), 5, tx);
        countdown.stop();
        assert_eq!(rx.recv().await, None);
    }
}
