/// A request for a [`SimpleVec`][crate::SimpleVec] with a given capacity and no values.
///
/// Created by [`reserve()`]. Converting it into a `SimpleVec` yields an empty container whose
/// storage is already filled with `capacity` default values.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ReserveCapacity {
    capacity: usize,
}

impl ReserveCapacity {
    /// The capacity being requested.
    #[must_use]
    #[inline]
    pub fn capacity(self) -> usize {
        self.capacity
    }
}

/// Requests a [`SimpleVec`][crate::SimpleVec] with room for `capacity` values.
///
/// # Example
///
/// ```
/// use grow_vec::{SimpleVec, reserve};
///
/// let names: SimpleVec<String> = reserve(8).into();
///
/// assert!(names.is_empty());
/// assert_eq!(names.capacity(), 8);
/// ```
#[must_use]
#[inline]
pub fn reserve(capacity: usize) -> ReserveCapacity {
    ReserveCapacity { capacity }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn carries_capacity() {
        assert_eq!(reserve(12).capacity(), 12);
        assert_eq!(reserve(0), reserve(0));
    }
}
