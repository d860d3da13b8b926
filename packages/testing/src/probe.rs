use std::fmt::{self, Debug, Formatter};

use crate::ledger;

/// A small value type that reports its lifetime to the thread's [`ledger`].
///
/// Every way of creating a `Probe` ([`new()`][Probe::new], [`Default`], [`Clone`]) counts as a
/// construction and may be made to panic via [`ledger::panic_after()`]. Dropping a `Probe`
/// counts as a destruction. Probes compare and order by their carried value.
#[derive(Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Probe {
    value: u32,
}

impl Probe {
    /// Creates a probe carrying `value`.
    ///
    /// # Panics
    ///
    /// Panics if a construction failure is armed and due.
    #[must_use]
    pub fn new(value: u32) -> Self {
        ledger::record_construction();

        Self { value }
    }

    /// The value this probe carries.
    #[must_use]
    pub fn value(&self) -> u32 {
        self.value
    }
}

impl Default for Probe {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Clone for Probe {
    fn clone(&self) -> Self {
        Self::new(self.value)
    }
}

impl Drop for Probe {
    fn drop(&mut self) {
        ledger::record_drop();
    }
}

impl Debug for Probe {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Probe({})", self.value)
    }
}

impl From<u32> for Probe {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

/// Creates one probe per value, in order.
#[must_use]
pub fn probes(values: impl IntoIterator<Item = u32>) -> Vec<Probe> {
    values.into_iter().map(Probe::new).collect()
}

/// Extracts the carried values of a sequence of probes, in order.
#[must_use]
pub fn values<'a>(probes: impl IntoIterator<Item = &'a Probe>) -> Vec<u32> {
    probes.into_iter().map(Probe::value).collect()
}
