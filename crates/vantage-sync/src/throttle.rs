//! Rate limiting primitives
//!
//! Emission is throttled by a time gate: values arriving inside the window
//! are dropped, not queued. Persistence is debounced: a burst of activity
//! collapses into one write after quiescence. Both measure time through
//! the caller-supplied clock, never the system clock.

/// Time gate for throttled emission.
///
/// `pass` returns true when enough time has elapsed since the last passing
/// call. Values rejected by the gate are dropped; there is no queue.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThrottleGate {
    last_pass_ms: Option<u64>,
}

impl ThrottleGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to pass the gate at `now_ms` with the given window.
    pub fn pass(&mut self, now_ms: u64, interval_ms: u64) -> bool {
        match self.last_pass_ms {
            Some(last) if now_ms.saturating_sub(last) < interval_ms => false,
            _ => {
                self.last_pass_ms = Some(now_ms);
                true
            }
        }
    }

    /// Forget the last pass (on disconnect).
    pub fn reset(&mut self) {
        self.last_pass_ms = None;
    }
}

/// Quiescence detector for debounced persistence.
#[derive(Debug, Clone, Copy, Default)]
pub struct Debouncer {
    last_activity_ms: Option<u64>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a state-changing event.
    pub fn note(&mut self, now_ms: u64) {
        self.last_activity_ms = Some(now_ms);
    }

    /// Whether there is pending activity at all.
    pub fn is_pending(&self) -> bool {
        self.last_activity_ms.is_some()
    }

    /// Whether the quiet period has elapsed since the last activity.
    pub fn is_due(&self, now_ms: u64, delay_ms: u64) -> bool {
        matches!(self.last_activity_ms, Some(last) if now_ms.saturating_sub(last) >= delay_ms)
    }

    /// Clear pending activity (after a write, or on disconnect).
    pub fn reset(&mut self) {
        self.last_activity_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_drops_inside_window() {
        let mut gate = ThrottleGate::new();

        assert!(gate.pass(1000, 33));
        for t in 1001..1033 {
            assert!(!gate.pass(t, 33));
        }
        assert!(gate.pass(1033, 33));
    }

    #[test]
    fn test_gate_first_call_passes() {
        let mut gate = ThrottleGate::new();
        assert!(gate.pass(0, 1000));
    }

    #[test]
    fn test_gate_reset() {
        let mut gate = ThrottleGate::new();
        assert!(gate.pass(1000, 100));
        gate.reset();
        assert!(gate.pass(1001, 100));
    }

    #[test]
    fn test_debouncer_waits_for_quiescence() {
        let mut debouncer = Debouncer::new();
        assert!(!debouncer.is_pending());
        assert!(!debouncer.is_due(10_000, 500));

        debouncer.note(1000);
        assert!(debouncer.is_pending());
        assert!(!debouncer.is_due(1400, 500));

        // Renewed activity pushes the deadline out.
        debouncer.note(1450);
        assert!(!debouncer.is_due(1900, 500));
        assert!(debouncer.is_due(1950, 500));

        debouncer.reset();
        assert!(!debouncer.is_due(5000, 500));
    }
}
