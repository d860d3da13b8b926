use std::cell::Cell;
use std::marker::PhantomData;

use crate::{GrowVec, Result};

/// Builder for creating an instance of [`GrowVec`].
///
/// All settings are optional. Without any, the builder produces the same empty array as
/// [`GrowVec::new()`].
///
/// # Examples
///
/// ```
/// use grow_vec::GrowVec;
///
/// let names = GrowVec::<String>::builder().capacity(16).build();
///
/// assert_eq!(names.capacity(), 16);
/// ```
///
/// Handling allocation failure instead of panicking:
///
/// ```
/// use grow_vec::GrowVec;
///
/// let result = GrowVec::<u64>::builder().capacity(usize::MAX).try_build();
///
/// assert!(result.is_err());
/// ```
///
/// # Thread safety
///
/// The builder is thread-mobile ([`Send`]) and can be safely transferred between threads,
/// allowing configuration to happen on different threads than where the array is used.
/// However, it is not thread-safe ([`Sync`]) as it contains mutable configuration state.
#[derive(Debug)]
#[must_use]
pub struct GrowVecBuilder<T> {
    capacity: usize,

    _item: PhantomData<fn() -> T>,

    // Prevents Sync while allowing Send - builders are thread-mobile but not thread-safe
    _not_sync: PhantomData<Cell<()>>,
}

impl<T> GrowVecBuilder<T> {
    #[inline]
    pub(crate) fn new() -> Self {
        Self {
            capacity: 0,
            _item: PhantomData,
            _not_sync: PhantomData,
        }
    }

    /// Sets the number of values the array has room for before its first reallocation.
    ///
    /// Defaults to zero, in which case no memory is allocated until the first insertion.
    #[inline]
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Builds the array with the specified configuration.
    ///
    /// # Panics
    ///
    /// Panics if the requested capacity cannot be allocated. Use
    /// [`try_build()`](Self::try_build) to handle that as an error.
    #[must_use]
    #[inline]
    pub fn build(self) -> GrowVec<T> {
        GrowVec::with_capacity(self.capacity)
    }

    /// Builds the array with the specified configuration, reporting allocation failure as an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns an error if the requested capacity cannot be allocated.
    #[inline]
    pub fn try_build(self) -> Result<GrowVec<T>> {
        GrowVec::try_with_capacity(self.capacity)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use static_assertions::{assert_impl_all, assert_not_impl_any};

    use super::*;
    use crate::Error;

    // Test trait implementations.
    assert_impl_all!(GrowVecBuilder<String>: Send, std::fmt::Debug);
    assert_not_impl_any!(GrowVecBuilder<String>: Sync);

    #[test]
    fn builder_new_creates_default_state() {
        let builder = GrowVecBuilder::<u32>::new();
        assert_eq!(builder.capacity, 0);
    }

    #[test]
    fn default_build_owns_nothing() {
        let vec = GrowVecBuilder::<u32>::new().build();

        assert!(vec.is_empty());
        assert_eq!(vec.capacity(), 0);
    }

    #[test]
    fn capacity_sets_capacity_correctly() {
        let vec = GrowVecBuilder::<u32>::new().capacity(12).build();

        assert!(vec.is_empty());
        assert_eq!(vec.capacity(), 12);
    }

    #[test]
    fn try_build_reports_overflow() {
        let result = GrowVecBuilder::<u32>::new().capacity(usize::MAX).try_build();

        assert!(matches!(result, Err(Error::CapacityOverflow { .. })));
    }

    #[test]
    #[should_panic]
    fn build_panics_on_overflow() {
        let _vec = GrowVecBuilder::<u32>::new().capacity(usize::MAX).build();
    }
}
