use std::fmt::{self, Debug, Formatter};
use std::iter::FusedIterator;
use std::{ptr, slice};

use crate::{GrowVec, RawBuffer};

/// An iterator that moves the values out of a [`GrowVec`].
///
/// Values not consumed by the time the iterator is dropped are dropped with it, after which
/// the memory block is released.
pub struct IntoIter<T> {
    buffer: RawBuffer<T>,

    /// Slots `front..back` hold the values not yet yielded.
    front: usize,
    back: usize,
}

impl<T> IntoIter<T> {
    /// The values not yet yielded, as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        let remaining = self.back.wrapping_sub(self.front);

        // SAFETY: Slots `front..back` hold live values that nobody else references.
        unsafe { slice::from_raw_parts(self.buffer.slot(self.front).as_ptr(), remaining) }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }

        let index = self.front;
        self.front = self.front.wrapping_add(1);

        // SAFETY: The slot was in the remaining range and is now outside it, so we are its
        // only owner.
        Some(unsafe { self.buffer.slot(index).read() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back.wrapping_sub(self.front);
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }

        self.back = self.back.wrapping_sub(1);

        // SAFETY: The slot was in the remaining range and is now outside it, so we are its
        // only owner.
        Some(unsafe { self.buffer.slot(self.back).read() })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let remaining = ptr::slice_from_raw_parts_mut(
            self.buffer.slot(self.front).as_ptr(),
            self.back.wrapping_sub(self.front),
        );

        // Mark everything as consumed first so a panicking drop cannot cause a second drop.
        self.front = self.back;

        // SAFETY: The range held the values not yet yielded; the buffer itself is released
        // after this, without touching the slots.
        unsafe {
            ptr::drop_in_place(remaining);
        }
    }
}

impl<T: Debug> Debug for IntoIter<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T> IntoIterator for GrowVec<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let (buffer, len) = self.into_raw_parts();

        IntoIter {
            buffer,
            front: 0,
            back: len,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use static_assertions::assert_impl_all;
    use testing::{ledger, probes};

    use super::*;
    use crate::grow_vec;

    assert_impl_all!(IntoIter<String>: Send, Sync, Debug);

    #[test]
    fn yields_values_in_order() {
        let vec = grow_vec!["a".to_string(), "b".to_string(), "c".to_string()];

        let collected: Vec<String> = vec.into_iter().collect();

        assert_eq!(collected, ["a", "b", "c"]);
    }

    #[test]
    fn yields_from_both_ends() {
        let mut iter = grow_vec![1, 2, 3, 4].into_iter();

        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.next_back(), Some(4));
        assert_eq!(iter.as_slice(), [2, 3]);
        assert_eq!(iter.next_back(), Some(3));
        assert_eq!(iter.next(), Some(2));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn drop_releases_unconsumed_values() {
        ledger::reset();

        let vec: GrowVec<_> = probes(0..5).into_iter().collect();
        let mut iter = vec.into_iter();

        let first = iter.next();
        drop(iter);

        assert_eq!(ledger::live(), 1);
        drop(first);
        assert_eq!(ledger::live(), 0);
    }

    #[test]
    fn empty_array_yields_nothing() {
        let mut iter = GrowVec::<u8>::new().into_iter();

        assert_eq!(iter.next(), None);
        assert_eq!(format!("{iter:?}"), "IntoIter([])");
    }
}
