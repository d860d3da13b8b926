//! Per-thread bookkeeping of [`Probe`][crate::Probe] lifetimes.
//!
//! The test harness runs every test on its own thread, so the ledger of one test is never
//! affected by probes created in another. Call [`reset()`] at the start of a test that makes
//! assertions about absolute counts.

use std::cell::Cell;

thread_local! {
    static CONSTRUCTED: Cell<usize> = const { Cell::new(0) };
    static DROPPED: Cell<usize> = const { Cell::new(0) };

    /// Number of constructions that may still succeed before the next one panics.
    /// `None` means no failure is armed.
    static REMAINING_BEFORE_PANIC: Cell<Option<usize>> = const { Cell::new(None) };
}

/// Message carried by the panic raised from an armed construction.
pub const INJECTED_PANIC_MESSAGE: &str = "injected probe construction failure";

/// Clears all counters and disarms any pending failure.
pub fn reset() {
    CONSTRUCTED.set(0);
    DROPPED.set(0);
    REMAINING_BEFORE_PANIC.set(None);
}

/// Number of probes constructed on this thread since the last [`reset()`].
#[must_use]
pub fn constructed() -> usize {
    CONSTRUCTED.get()
}

/// Number of probes dropped on this thread since the last [`reset()`].
#[must_use]
pub fn dropped() -> usize {
    DROPPED.get()
}

/// Number of probes currently alive on this thread.
///
/// # Panics
///
/// Panics if more probes were dropped than constructed, which means some value was
/// dropped twice.
#[must_use]
pub fn live() -> usize {
    constructed().checked_sub(dropped()).unwrap_or_else(|| {
        panic!(
            "{} probes dropped but only {} constructed - a value was dropped twice",
            dropped(),
            constructed()
        )
    })
}

/// Arms a construction failure: the next `successes` constructions succeed and the one after
/// them panics with [`INJECTED_PANIC_MESSAGE`]. The failure fires once, then disarms itself.
pub fn panic_after(successes: usize) {
    REMAINING_BEFORE_PANIC.set(Some(successes));
}

/// Cancels an armed construction failure, if any.
pub fn disarm() {
    REMAINING_BEFORE_PANIC.set(None);
}

/// Records a construction that is about to happen, panicking instead if a failure is armed
/// and due. A construction that panics is not counted.
pub(crate) fn record_construction() {
    match REMAINING_BEFORE_PANIC.get() {
        Some(0) => {
            REMAINING_BEFORE_PANIC.set(None);
            panic!("{INJECTED_PANIC_MESSAGE}");
        }
        Some(remaining) => {
            REMAINING_BEFORE_PANIC.set(Some(remaining.wrapping_sub(1)));
        }
        None => {}
    }

    CONSTRUCTED.set(CONSTRUCTED.get().wrapping_add(1));
}

pub(crate) fn record_drop() {
    DROPPED.set(DROPPED.get().wrapping_add(1));
}

#[cfg(test)]
mod tests {
    use std::panic;

    use super::*;
    use crate::Probe;

    #[test]
    fn counts_constructions_and_drops() {
        reset();

        let a = Probe::new(1);
        let b = Probe::default();
        let c = a.clone();

        assert_eq!(constructed(), 3);
        assert_eq!(live(), 3);

        drop((a, b, c));

        assert_eq!(dropped(), 3);
        assert_eq!(live(), 0);
    }

    #[test]
    fn armed_failure_fires_once() {
        reset();
        panic_after(1);

        let first = Probe::new(1);
        let second = panic::catch_unwind(|| Probe::new(2));
        assert!(second.is_err());

        // Disarmed after firing.
        let third = Probe::new(3);

        assert_eq!(live(), 2);
        drop((first, third));
    }

    #[test]
    fn disarm_cancels_failure() {
        reset();
        panic_after(0);
        disarm();

        let probe = Probe::new(7);
        assert_eq!(probe.value(), 7);
    }
}
