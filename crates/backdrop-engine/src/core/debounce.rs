/// Trailing-edge debouncer driven by caller-supplied timestamps.
///
/// Every `trigger` replaces the pending value and pushes the deadline out by
/// `quiet_ms`; `poll` hands the value back once, after the deadline passes.
/// The host's timers are only wake-ups: an early or stale wake-up yields nothing.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    quiet_ms: f64,
    pending: Option<(f64, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet_ms: f64) -> Self {
        Self {
            quiet_ms: quiet_ms.max(0.0),
            pending: None,
        }
    }

    /// Record a new event. Returns the deadline at which the value becomes due.
    pub fn trigger(&mut self, now_ms: f64, value: T) -> f64 {
        let deadline = now_ms + self.quiet_ms;
        self.pending = Some((deadline, value));
        deadline
    }

    /// Take the pending value if its quiet period has elapsed.
    pub fn poll(&mut self, now_ms: f64) -> Option<T> {
        match &self.pending {
            Some((deadline, _)) if now_ms >= *deadline => self.pending.take().map(|(_, v)| v),
            _ => None,
        }
    }

    /// Drop any pending value. Idempotent.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value becomes due, if any.
    pub fn deadline(&self) -> Option<f64> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }
}
