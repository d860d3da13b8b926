use std::alloc::{Layout, alloc, dealloc};
use std::any::type_name;
use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;
use std::mem;
use std::ptr::{self, NonNull};

use crate::{Error, Result};

/// A block of uninitialized memory with room for exactly `capacity` values of `T`.
///
/// The buffer owns memory, not values. It never constructs, reads or drops a `T` on its own:
/// whoever writes values into it is responsible for dropping them before the buffer goes away,
/// as dropping the buffer only releases the memory block. This is what lets a container hold
/// memory for values that do not exist yet, and is the foundation of [`GrowVec`][crate::GrowVec].
///
/// A buffer with zero capacity owns no memory at all. A buffer for a zero-sized `T` never
/// allocates either, though it still reports the capacity it was created with.
///
/// Buffers cannot be cloned, as that would duplicate ownership of the memory block. Ownership
/// can only be transferred, via [`swap()`][Self::swap] or [`take()`][Self::take].
///
/// # Example
///
/// ```
/// use grow_vec::RawBuffer;
///
/// let mut buffer = RawBuffer::<String>::with_capacity(2);
/// assert_eq!(buffer.capacity(), 2);
///
/// // SAFETY: Slot 0 is in bounds and holds no value yet.
/// unsafe { buffer.slot(0).write("hello".to_string()) };
///
/// // SAFETY: We initialized slot 0 above.
/// assert_eq!(unsafe { buffer.get(0) }, "hello");
///
/// // The buffer does not drop what we put in it, so we take the value back out ourselves.
/// // SAFETY: Slot 0 holds a value and we never touch it through the buffer again.
/// let value = unsafe { buffer.slot(0).read() };
/// assert_eq!(value, "hello");
/// ```
pub struct RawBuffer<T> {
    /// Start of the memory block. `None` if and only if the capacity is zero.
    ptr: Option<NonNull<T>>,

    capacity: usize,

    _values: PhantomData<T>,
}

impl<T> RawBuffer<T> {
    /// Creates a buffer that owns no memory.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ptr: None,
            capacity: 0,
            _values: PhantomData,
        }
    }

    /// Creates a buffer with room for exactly `capacity` values.
    ///
    /// # Panics
    ///
    /// Panics if the memory block cannot be described by a valid layout or if the
    /// allocation fails. Use [`try_with_capacity()`][Self::try_with_capacity] to handle
    /// these conditions as errors.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        match Self::try_with_capacity(capacity) {
            Ok(buffer) => buffer,
            Err(e) => panic!(
                "cannot allocate buffer for {capacity} items of {}: {e}",
                type_name::<T>()
            ),
        }
    }

    /// Creates a buffer with room for exactly `capacity` values, reporting failure as an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityOverflow`] if the total size does not fit in a valid layout
    /// and [`Error::AllocationFailed`] if the global allocator returns no memory.
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Ok(Self::new());
        }

        let layout = Self::layout(capacity)?;

        let ptr = if layout.size() == 0 {
            NonNull::dangling()
        } else {
            // SAFETY: The layout is valid (calculated by `Layout::array`) and not zero-sized
            // (checked above).
            let block = unsafe { alloc(layout) };

            NonNull::new(block.cast::<T>()).ok_or(Error::AllocationFailed { layout })?
        };

        Ok(Self {
            ptr: Some(ptr),
            capacity,
            _values: PhantomData,
        })
    }

    fn layout(capacity: usize) -> Result<Layout> {
        Layout::array::<T>(capacity)
            .ok()
            .ok_or(Error::CapacityOverflow {
                requested: capacity,
            })
    }

    /// The number of values the buffer has room for.
    #[must_use]
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the buffer owns any memory.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ptr.is_none()
    }

    /// Pointer to the start of the block. For an empty buffer this is a dangling but
    /// well-aligned pointer, valid only for zero-length access.
    #[must_use]
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.base().as_ptr()
    }

    /// Mutable pointer to the start of the block. For an empty buffer this is a dangling but
    /// well-aligned pointer, valid only for zero-length access.
    #[must_use]
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.base().as_ptr()
    }

    #[inline]
    fn base(&self) -> NonNull<T> {
        self.ptr.unwrap_or(NonNull::dangling())
    }

    /// Pointer to slot `index`.
    ///
    /// `index == capacity` is accepted and yields the one-past-the-end pointer, which may be
    /// used for pointer arithmetic and comparison but must never be read or written.
    ///
    /// The buffer does not know whether the slot holds a value; that is for the caller to track.
    #[must_use]
    #[inline]
    pub fn slot(&self, index: usize) -> NonNull<T> {
        debug_assert!(
            index <= self.capacity,
            "slot {index} out of bounds in buffer of {} {}",
            self.capacity,
            type_name::<T>()
        );

        // SAFETY: With `index <= capacity` the offset stays within the block or one past its
        // end, which is always a valid offset. For an empty buffer the only valid index is 0,
        // leaving the dangling pointer unchanged.
        unsafe { self.base().add(index) }
    }

    /// Shared reference to the value in slot `index`.
    ///
    /// # Safety
    ///
    /// The caller must ensure that `index < capacity` and that the slot holds an initialized
    /// value that is not mutably borrowed elsewhere.
    #[must_use]
    #[inline]
    pub unsafe fn get(&self, index: usize) -> &T {
        debug_assert!(index < self.capacity, "index {index} beyond capacity");

        // SAFETY: Forwarding guarantees from the caller.
        unsafe { self.slot(index).as_ref() }
    }

    /// Exclusive reference to the value in slot `index`.
    ///
    /// # Safety
    ///
    /// The caller must ensure that `index < capacity` and that the slot holds an initialized
    /// value.
    #[must_use]
    #[inline]
    pub unsafe fn get_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.capacity, "index {index} beyond capacity");

        // SAFETY: Forwarding guarantees from the caller; we hold the buffer exclusively.
        unsafe { self.slot(index).as_mut() }
    }

    /// Exchanges the memory blocks owned by two buffers. Never allocates and never fails.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Takes ownership of the memory block, leaving an empty buffer in its place.
    #[must_use]
    #[inline]
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    /// Moves `count` values from slots `from..from + count` of this buffer into slots
    /// `to..to + count` of `target`.
    ///
    /// A Rust move is a bitwise copy that cannot fail, so relocation always moves and never
    /// needs to fall back to cloning: a partially completed relocation cannot occur. After the
    /// call the source slots are logically uninitialized and must not be dropped.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the source range is within this buffer and holds initialized
    /// values, and that the target range is within `target` and holds no values.
    #[inline]
    pub unsafe fn relocate(&self, from: usize, count: usize, target: &mut Self, to: usize) {
        debug_assert!(
            from.checked_add(count)
                .is_some_and(|end| end <= self.capacity),
            "relocation source out of bounds"
        );
        debug_assert!(
            to.checked_add(count)
                .is_some_and(|end| end <= target.capacity),
            "relocation target out of bounds"
        );

        // SAFETY: Forwarding guarantees from the caller. The two buffers are distinct blocks
        // (we hold `target` exclusively), so the ranges cannot overlap.
        unsafe {
            ptr::copy_nonoverlapping(
                self.slot(from).as_ptr(),
                target.slot(to).as_ptr(),
                count,
            );
        }
    }
}

impl<T> Default for RawBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for RawBuffer<T> {
    fn drop(&mut self) {
        let Some(ptr) = self.ptr else {
            return;
        };

        let layout = Self::layout(self.capacity)
            .expect("layout was valid when the block was allocated so it must still be valid");

        if layout.size() == 0 {
            return;
        }

        // SAFETY: The block was allocated in `try_with_capacity()` with this same layout.
        unsafe {
            dealloc(ptr.as_ptr().cast(), layout);
        }
    }
}

impl<T> Debug for RawBuffer<T> {
    #[cfg_attr(test, mutants::skip)] // No API contract.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawBuffer")
            .field("item", &type_name::<T>())
            .field("capacity", &self.capacity)
            .field("ptr", &self.ptr)
            .finish_non_exhaustive()
    }
}

// SAFETY: The buffer is a plain owner of memory meant for `T` values. Moving it to another
// thread is as safe as moving the values themselves.
unsafe impl<T: Send> Send for RawBuffer<T> {}

// SAFETY: Shared access to the buffer only hands out shared access to the values.
unsafe impl<T: Sync> Sync for RawBuffer<T> {}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
#[allow(
    clippy::arithmetic_side_effects,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    reason = "tests focus on succinct code and do not need to tick all the boxes"
)]
mod tests {
    use std::cell::Cell;

    use static_assertions::{assert_impl_all, assert_not_impl_any};
    use testing::{Probe, ledger};

    use super::*;

    assert_impl_all!(RawBuffer<u32>: Send, Sync, Debug, Default);
    assert_not_impl_any!(RawBuffer<u32>: Clone, Copy);
    assert_not_impl_any!(RawBuffer<Cell<u32>>: Sync);

    #[test]
    fn zero_capacity_owns_nothing() {
        let buffer = RawBuffer::<u64>::with_capacity(0);

        assert_eq!(buffer.capacity(), 0);
        assert!(buffer.is_empty());
        assert_eq!(buffer.slot(0).as_ptr().cast_const(), buffer.as_ptr());
    }

    #[test]
    fn allocates_requested_capacity() {
        let mut buffer = RawBuffer::<u64>::with_capacity(4);

        assert_eq!(buffer.capacity(), 4);
        assert!(!buffer.is_empty());

        for index in 0..4 {
            unsafe { buffer.slot(index).write(u64::try_from(index).unwrap() * 10) };
        }

        for index in 0..4 {
            assert_eq!(unsafe { *buffer.get(index) }, u64::try_from(index).unwrap() * 10);
        }

        unsafe { *buffer.get_mut(2) = 99 };
        assert_eq!(unsafe { *buffer.get(2) }, 99);
    }

    #[test]
    fn slots_are_contiguous() {
        let buffer = RawBuffer::<u32>::with_capacity(3);

        let first = buffer.slot(0).as_ptr() as usize;
        let end = buffer.slot(3).as_ptr() as usize;

        assert_eq!(end - first, 3 * size_of::<u32>());
    }

    #[test]
    fn drop_does_not_touch_contents() {
        ledger::reset();

        let buffer = RawBuffer::<Probe>::with_capacity(2);
        unsafe { buffer.slot(0).write(Probe::new(1)) };

        drop(buffer);

        assert_eq!(ledger::dropped(), 0);
    }

    #[test]
    fn swap_exchanges_blocks() {
        let mut a = RawBuffer::<u8>::with_capacity(8);
        let mut b = RawBuffer::<u8>::new();
        let a_ptr = a.as_ptr();

        a.swap(&mut b);

        assert_eq!(a.capacity(), 0);
        assert!(a.is_empty());
        assert_eq!(b.capacity(), 8);
        assert_eq!(b.as_ptr(), a_ptr);
    }

    #[test]
    fn take_leaves_empty_buffer() {
        let mut buffer = RawBuffer::<u16>::with_capacity(5);

        let taken = buffer.take();

        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), 0);
        assert_eq!(taken.capacity(), 5);
    }

    #[test]
    fn relocate_moves_values_between_blocks() {
        let source = RawBuffer::<String>::with_capacity(2);
        let mut target = RawBuffer::<String>::with_capacity(4);

        unsafe {
            source.slot(0).write("a".to_string());
            source.slot(1).write("b".to_string());

            source.relocate(0, 2, &mut target, 1);

            assert_eq!(target.get(1), "a");
            assert_eq!(target.get(2), "b");

            // The values now belong to the target slots.
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(target.slot(1).as_ptr(), 2));
        }
    }

    #[test]
    fn zero_sized_items_never_allocate() {
        let buffer = RawBuffer::<()>::with_capacity(1_000);

        assert_eq!(buffer.capacity(), 1_000);
        assert!(!buffer.is_empty());
        assert_eq!(buffer.as_ptr(), NonNull::<()>::dangling().as_ptr());
    }

    #[test]
    fn unsatisfiable_allocation_is_error() {
        // The layout is valid but far larger than any allocator can provide.
        let capacity = usize::try_from(isize::MAX).unwrap() - 7;

        let result = RawBuffer::<u8>::try_with_capacity(capacity);

        match result {
            Err(Error::AllocationFailed { layout }) => {
                assert_eq!(layout.size(), capacity);
                assert_eq!(layout.align(), 1);
            }
            other => panic!("expected allocation failure, got {other:?}"),
        }
    }

    #[test]
    fn overflowing_capacity_is_error() {
        let result = RawBuffer::<u64>::try_with_capacity(usize::MAX);

        assert!(matches!(
            result,
            Err(Error::CapacityOverflow {
                requested: usize::MAX
            })
        ));
    }

    #[test]
    #[should_panic]
    fn overflowing_capacity_panics() {
        let _buffer = RawBuffer::<u64>::with_capacity(usize::MAX);
    }
}
