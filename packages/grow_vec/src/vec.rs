use std::any::type_name;
use std::cmp::Ordering;
use std::fmt::{self, Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::ptr::{self, NonNull};
use std::slice::{self, SliceIndex};
use std::{iter, mem};

use scopeguard::ScopeGuard;

use crate::{GrowVecBuilder, RawBuffer, Result};

/// A contiguous, growable array of `T` values.
///
/// The array is a [`RawBuffer`] plus a count of live values: exactly the first
/// [`len()`][Self::len] slots of the buffer hold values, the remaining slots up to
/// [`capacity()`][Self::capacity] are uninitialized memory. Every public operation preserves
/// that invariant, including when it is interrupted by a panic.
///
/// # Panic safety
///
/// Operations that construct values by calling user code (`Default`, `Clone`, constructor
/// closures) provide the strong guarantee wherever growth is involved: if the user code panics,
/// the array keeps exactly the values it had before the call, nothing is leaked and nothing is
/// dropped twice. New values are always constructed before any existing value is touched, and
/// existing values are relocated into new storage by moving, which cannot fail.
///
/// [`resize()`][Self::resize] may keep capacity it reserved before construction failed, but
/// never changes the length or the values in that case.
///
/// # Growth
///
/// When an insertion finds the array full, capacity becomes `max(1, 2 * len)`. Explicit
/// [`reserve()`][Self::reserve] calls allocate exactly the requested capacity. Capacity never
/// shrinks.
///
/// # Example
///
/// ```
/// use grow_vec::GrowVec;
///
/// let mut numbers = GrowVec::new();
///
/// for n in 1..=5 {
///     numbers.push_back(n);
/// }
///
/// numbers.erase(2);
///
/// assert_eq!(numbers, [1, 2, 4, 5]);
/// assert!(numbers.capacity() >= 5);
/// ```
pub struct GrowVec<T> {
    buffer: RawBuffer<T>,

    /// Number of live values at the start of `buffer`.
    len: usize,
}

impl<T> GrowVec<T> {
    /// Creates an empty array that owns no memory.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: RawBuffer::new(),
            len: 0,
        }
    }

    /// Creates a builder for configuring and constructing a [`GrowVec`].
    ///
    /// # Example
    ///
    /// ```
    /// use grow_vec::GrowVec;
    ///
    /// let numbers = GrowVec::<u64>::builder().capacity(32).build();
    ///
    /// assert!(numbers.is_empty());
    /// assert_eq!(numbers.capacity(), 32);
    /// ```
    #[inline]
    pub fn builder() -> GrowVecBuilder<T> {
        GrowVecBuilder::new()
    }

    /// Creates an empty array with room for exactly `capacity` values.
    ///
    /// # Panics
    ///
    /// Panics if the memory cannot be allocated.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: RawBuffer::with_capacity(capacity),
            len: 0,
        }
    }

    /// Creates an empty array with room for exactly `capacity` values, reporting allocation
    /// failure as an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the memory cannot be allocated.
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        Ok(Self {
            buffer: RawBuffer::try_with_capacity(capacity)?,
            len: 0,
        })
    }

    /// Creates an array of `len` values where each value is created by calling `f`.
    ///
    /// Capacity is exactly `len`. If `f` panics, the values created so far are dropped and the
    /// memory is released.
    ///
    /// # Panics
    ///
    /// Panics if the memory cannot be allocated or if `f` panics.
    #[must_use]
    pub fn from_fn(len: usize, f: impl FnMut() -> T) -> Self {
        let mut buffer = RawBuffer::with_capacity(len);

        // SAFETY: The fresh buffer has exactly `len` uninitialized slots, and the iterator
        // yields exactly `len` values. If construction panics, `write_all` drops what it wrote
        // and `buffer` releases the memory as it unwinds.
        let written = unsafe { write_all(buffer.slot(0), iter::repeat_with(f).take(len)) };
        debug_assert_eq!(written, len);

        Self { buffer, len }
    }

    /// The number of live values.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the array holds no values.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of values the array can hold without allocating new memory.
    #[must_use]
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// The live values as a slice.
    #[must_use]
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: The first `len` slots hold live values and the buffer pointer is valid and
        // aligned even when no memory is owned (then `len` is zero).
        unsafe { slice::from_raw_parts(self.buffer.as_ptr(), self.len) }
    }

    /// The live values as a mutable slice.
    #[must_use]
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: See `as_slice()`; we hold the array exclusively.
        unsafe { slice::from_raw_parts_mut(self.buffer.as_mut_ptr(), self.len) }
    }

    /// Iterates over the live values in order.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Iterates mutably over the live values in order.
    #[inline]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Reference to the value at `index`, without bounds checking.
    ///
    /// # Safety
    ///
    /// The caller must ensure that `index < len()`. Violating this is undefined behavior.
    /// Use indexing or [`get()`][slice::get] for checked access.
    #[must_use]
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(
            index < self.len,
            "get_unchecked({index}) out of bounds in GrowVec<{}> of length {}",
            type_name::<T>(),
            self.len
        );

        // SAFETY: Forwarding guarantee from the caller; slots below `len` hold live values.
        unsafe { self.buffer.get(index) }
    }

    /// Mutable reference to the value at `index`, without bounds checking.
    ///
    /// # Safety
    ///
    /// The caller must ensure that `index < len()`. Violating this is undefined behavior.
    #[must_use]
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(
            index < self.len,
            "get_unchecked_mut({index}) out of bounds in GrowVec<{}> of length {}",
            type_name::<T>(),
            self.len
        );

        // SAFETY: Forwarding guarantee from the caller; slots below `len` hold live values.
        unsafe { self.buffer.get_mut(index) }
    }

    /// Ensures the capacity is at least `new_capacity`, allocating exactly that much if it
    /// is not.
    ///
    /// Does nothing if the capacity is already sufficient. Otherwise all live values are moved
    /// into the new memory block, which never fails once the block has been allocated.
    ///
    /// # Panics
    ///
    /// Panics if the memory cannot be allocated. The array is unchanged in that case.
    pub fn reserve(&mut self, new_capacity: usize) {
        expect_allocated::<T, ()>(self.try_reserve(new_capacity));
    }

    /// Ensures the capacity is at least `new_capacity`, reporting allocation failure as an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns an error if the memory cannot be allocated. The array is unchanged in that case.
    pub fn try_reserve(&mut self, new_capacity: usize) -> Result<()> {
        if new_capacity <= self.capacity() {
            return Ok(());
        }

        let mut new_buffer = RawBuffer::try_with_capacity(new_capacity)?;

        // SAFETY: The first `len` slots hold live values and the new buffer is larger than
        // the current one, with all slots uninitialized.
        unsafe {
            self.buffer.relocate(0, self.len, &mut new_buffer, 0);
        }

        self.adopt(new_buffer);
        Ok(())
    }

    /// Replaces the buffer with one whose values were already relocated from it. The old
    /// block is released without dropping anything, as every value in it has moved.
    fn adopt(&mut self, mut new_buffer: RawBuffer<T>) {
        tracing::trace!(
            item = type_name::<T>(),
            len = self.len,
            old_capacity = self.capacity(),
            new_capacity = new_buffer.capacity(),
            "moved live values into a new buffer"
        );

        self.buffer.swap(&mut new_buffer);
    }

    /// The capacity to grow to when an insertion finds the array full.
    fn grown_capacity(&self) -> usize {
        if self.len == 0 {
            1
        } else {
            self.len.checked_mul(2).unwrap_or_else(|| {
                panic!(
                    "capacity overflow growing GrowVec<{}> of length {}",
                    type_name::<T>(),
                    self.len
                )
            })
        }
    }

    fn incremented_len(&self) -> usize {
        self.len
            .checked_add(1)
            .expect("length cannot overflow because capacity would have overflowed first")
    }

    /// Appends a value created by `f` and returns a reference to it.
    ///
    /// If the array is full, new memory is allocated and the value is created directly in its
    /// final slot there before the existing values are moved over. If `f` panics, the array
    /// is untouched.
    ///
    /// # Panics
    ///
    /// Panics if growth is needed and the memory cannot be allocated, or if `f` panics.
    pub fn emplace_back_with(&mut self, f: impl FnOnce() -> T) -> &mut T {
        let index = self.len;

        if self.len == self.capacity() {
            let mut new_buffer = RawBuffer::with_capacity(self.grown_capacity());

            // SAFETY: `index < new capacity` and the slot is uninitialized. If `f` panics,
            // nothing was written and `new_buffer` releases its memory during unwinding.
            unsafe {
                new_buffer.slot(index).write(f());
            }

            // SAFETY: The first `len` slots hold live values and the same slots of the new
            // buffer are uninitialized.
            unsafe {
                self.buffer.relocate(0, self.len, &mut new_buffer, 0);
            }

            self.adopt(new_buffer);
        } else {
            // SAFETY: `index < capacity` and the slot is past the live values.
            unsafe {
                self.buffer.slot(index).write(f());
            }
        }

        self.len = self.incremented_len();

        // SAFETY: We just wrote a value to this slot and counted it as live.
        unsafe { self.buffer.get_mut(index) }
    }

    /// Appends `value` and returns a reference to it.
    ///
    /// # Panics
    ///
    /// Panics if growth is needed and the memory cannot be allocated.
    #[inline]
    pub fn push_back(&mut self, value: T) -> &mut T {
        self.emplace_back_with(|| value)
    }

    /// Drops the last value.
    ///
    /// # Panics
    ///
    /// Panics if the array is empty. Popping an empty array is a programming error; use
    /// [`pop()`][Self::pop] if emptiness is an expected condition.
    pub fn pop_back(&mut self) {
        assert!(
            !self.is_empty(),
            "pop_back() called on an empty GrowVec<{}>",
            type_name::<T>()
        );

        drop(self.pop());
    }

    /// Removes the last value and returns it, or `None` if the array is empty.
    pub fn pop(&mut self) -> Option<T> {
        let index = self.len.checked_sub(1)?;

        // Shrink first so the slot is already outside the live range when we read it.
        self.len = index;

        // SAFETY: The slot held a live value, which we now take ownership of.
        Some(unsafe { self.buffer.slot(index).read() })
    }

    /// Inserts a value created by `f` at `index`, shifting all values from `index` onward one
    /// slot later, and returns a reference to the new value.
    ///
    /// `index == len()` appends. If `f` panics, the array is untouched.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`, if growth is needed and the memory cannot be allocated, or
    /// if `f` panics.
    pub fn emplace_with(&mut self, index: usize, f: impl FnOnce() -> T) -> &mut T {
        assert!(
            index <= self.len,
            "insertion index {index} out of bounds in GrowVec<{}> of length {}",
            type_name::<T>(),
            self.len
        );

        if index == self.len {
            return self.emplace_back_with(f);
        }

        let tail_len = self
            .len
            .checked_sub(index)
            .expect("guarded by index < len above");

        if self.len == self.capacity() {
            let mut new_buffer = RawBuffer::with_capacity(self.grown_capacity());

            // SAFETY: `index < new capacity` and the slot is uninitialized. If `f` panics,
            // nothing was written and `new_buffer` releases its memory during unwinding.
            unsafe {
                new_buffer.slot(index).write(f());
            }

            // SAFETY: Slots `0..index` are live in the old buffer and uninitialized in the new.
            unsafe {
                self.buffer.relocate(0, index, &mut new_buffer, 0);
            }

            // SAFETY: Slots `index..len` are live in the old buffer; the new buffer has room
            // for them after the inserted value because its capacity is at least `len + 1`.
            unsafe {
                self.buffer
                    .relocate(index, tail_len, &mut new_buffer, index.wrapping_add(1));
            }

            self.adopt(new_buffer);
        } else {
            // Construct before moving anything so a panic leaves the array as it was.
            let value = f();

            let gap = self.buffer.slot(index);

            // SAFETY: `len < capacity`, so there is an uninitialized slot after the live values
            // for the tail to shift into. Source and destination overlap, hence `copy`.
            unsafe {
                ptr::copy(gap.as_ptr(), gap.add(1).as_ptr(), tail_len);
            }

            // SAFETY: The value previously in the gap was moved one slot later, so the slot is
            // logically uninitialized and may be overwritten without dropping.
            unsafe {
                gap.write(value);
            }
        }

        self.len = self.incremented_len();

        // SAFETY: We just placed a value at `index`, which is below the new length.
        unsafe { self.buffer.get_mut(index) }
    }

    /// Inserts `value` at `index`, shifting all values from `index` onward one slot later, and
    /// returns a reference to it.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()` or if growth is needed and the memory cannot be allocated.
    #[inline]
    pub fn insert(&mut self, index: usize, value: T) -> &mut T {
        self.emplace_with(index, || value)
    }

    /// Removes the value at `index` and returns it, shifting all later values one slot
    /// earlier. Capacity is unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn remove(&mut self, index: usize) -> T {
        assert!(
            index < self.len,
            "removal index {index} out of bounds in GrowVec<{}> of length {}",
            type_name::<T>(),
            self.len
        );

        let gap = self.buffer.slot(index);

        // SAFETY: The slot holds a live value; we take ownership and close the gap below
        // before anything else can observe the slot.
        let value = unsafe { gap.read() };

        let trailing = self
            .len
            .wrapping_sub(index)
            .checked_sub(1)
            .expect("guarded by index < len above");

        // SAFETY: Slots `index + 1..len` are live; moving them one slot earlier stays within
        // the live range. Source and destination overlap, hence `copy`.
        unsafe {
            ptr::copy(gap.add(1).as_ptr(), gap.as_ptr(), trailing);
        }

        self.len = self.len.wrapping_sub(1);

        value
    }

    /// Drops the value at `index`, shifting all later values one slot earlier. Capacity is
    /// unchanged.
    ///
    /// `index == len()` drops the last value, like [`pop_back()`][Self::pop_back].
    ///
    /// # Panics
    ///
    /// Panics if `index > len()` or if the array is empty.
    pub fn erase(&mut self, index: usize) {
        if index == self.len {
            self.pop_back();
        } else {
            drop(self.remove(index));
        }
    }

    /// Drops all values past the first `new_len`. Does nothing if the array is not longer
    /// than that. Capacity is unchanged.
    pub fn truncate(&mut self, new_len: usize) {
        let Some(excess) = self.len.checked_sub(new_len) else {
            return;
        };

        // Shrink first so a panicking drop cannot lead to the same values being dropped again.
        self.len = new_len;

        let tail = ptr::slice_from_raw_parts_mut(self.buffer.slot(new_len).as_ptr(), excess);

        // SAFETY: The tail held live values which are now outside the live range.
        unsafe {
            ptr::drop_in_place(tail);
        }
    }

    /// Drops all values. Capacity is unchanged.
    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Changes the length to `new_len`, creating new values with `f` or dropping surplus
    /// values from the end.
    ///
    /// When growing, capacity is first raised to exactly `new_len` if needed. If `f` panics,
    /// the values created by this call are dropped and the length and existing values are
    /// unchanged.
    ///
    /// # Panics
    ///
    /// Panics if the memory cannot be allocated or if `f` panics.
    pub fn resize_with(&mut self, new_len: usize, f: impl FnMut() -> T) {
        let Some(additional) = new_len.checked_sub(self.len) else {
            self.truncate(new_len);
            return;
        };

        self.reserve(new_len);

        // SAFETY: Capacity is at least `new_len`, so the `additional` slots after the live
        // values are uninitialized. If `f` panics, `write_all` drops what it wrote and we
        // never reach the length update.
        let written = unsafe {
            write_all(
                self.buffer.slot(self.len),
                iter::repeat_with(f).take(additional),
            )
        };
        debug_assert_eq!(written, additional);

        self.len = new_len;
    }

    /// Takes the buffer and length out of the array without dropping any values, leaving an
    /// empty array behind.
    pub(crate) fn into_raw_parts(mut self) -> (RawBuffer<T>, usize) {
        let buffer = self.buffer.take();
        let len = mem::replace(&mut self.len, 0);

        (buffer, len)
    }
}

impl<T: Default> GrowVec<T> {
    /// Creates an array of `len` default values. Capacity is exactly `len`.
    ///
    /// # Panics
    ///
    /// Panics if the memory cannot be allocated or if `T::default()` panics. No values are
    /// leaked in either case.
    #[must_use]
    pub fn with_len(len: usize) -> Self {
        Self::from_fn(len, T::default)
    }

    /// Changes the length to `new_len`, default-constructing new values or dropping surplus
    /// values from the end.
    ///
    /// # Panics
    ///
    /// Panics if the memory cannot be allocated or if `T::default()` panics. The length and
    /// the existing values are unchanged in that case.
    pub fn resize(&mut self, new_len: usize) {
        self.resize_with(new_len, T::default);
    }
}

impl<T: Clone> GrowVec<T> {
    /// Creates an array of `len` clones of `value`. Capacity is exactly `len`.
    ///
    /// # Panics
    ///
    /// Panics if the memory cannot be allocated or if cloning panics. No values are leaked in
    /// either case.
    #[must_use]
    pub fn from_elem(len: usize, value: &T) -> Self {
        Self::from_fn(len, || value.clone())
    }

    /// Creates an array holding clones of the values in `items`. Capacity is exactly
    /// `items.len()`.
    ///
    /// # Panics
    ///
    /// Panics if the memory cannot be allocated or if cloning panics.
    #[must_use]
    pub fn from_slice(items: &[T]) -> Self {
        let mut buffer = RawBuffer::with_capacity(items.len());

        // SAFETY: The fresh buffer has exactly `items.len()` uninitialized slots.
        let written = unsafe { write_all(buffer.slot(0), items.iter().cloned()) };

        Self {
            buffer,
            len: written,
        }
    }
}

/// Writes the values yielded by `items` into consecutive slots starting at `first` and returns
/// how many were written.
///
/// This is all-or-nothing: if producing a value panics, every value this call already wrote is
/// dropped before the panic continues, leaving the slots uninitialized again.
///
/// # Safety
///
/// The caller must ensure that there are at least as many uninitialized slots starting at
/// `first` as `items` yields values.
unsafe fn write_all<T>(first: NonNull<T>, items: impl Iterator<Item = T>) -> usize {
    let mut written = scopeguard::guard(0_usize, |written| {
        // SAFETY: Exactly `written` slots starting at `first` were initialized below and have
        // not been handed to anyone else.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(first.as_ptr(), written));
        }
    });

    for item in items {
        // SAFETY: Forwarding guarantee from the caller that the slot exists and is free.
        unsafe {
            first.add(*written).write(item);
        }

        *written = written
            .checked_add(1)
            .expect("cannot write more values than fit in memory");
    }

    ScopeGuard::into_inner(written)
}

fn expect_allocated<T, R>(result: Result<R>) -> R {
    result.unwrap_or_else(|e| panic!("cannot grow GrowVec<{}>: {e}", type_name::<T>()))
}

impl<T> Drop for GrowVec<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for GrowVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for GrowVec<T> {
    /// Creates an array with capacity equal to this array's length and clones every value
    /// into it. If a clone panics, the clones made so far are dropped, the new memory is
    /// released and this array is not affected.
    fn clone(&self) -> Self {
        Self::from_slice(self.as_slice())
    }

    /// Makes this array a copy of `source`, reusing the existing memory when it is large
    /// enough.
    ///
    /// When `source` does not fit, a complete copy is built first and then replaces this array,
    /// so a panic during cloning leaves this array unchanged. When it fits, values are assigned
    /// in place and a panic may leave a mix of old and new values, though never an invalid
    /// array.
    fn clone_from(&mut self, source: &Self) {
        if source.len > self.capacity() {
            let copy = source.clone();
            *self = copy;
            return;
        }

        for (target, value) in self.iter_mut().zip(source.iter()) {
            target.clone_from(value);
        }

        if source.len > self.len {
            let rest = source
                .as_slice()
                .get(self.len..)
                .expect("guarded by length comparison above");

            // SAFETY: `source.len <= capacity`, so the slots after our live values have room
            // for the remaining clones and are uninitialized.
            let written = unsafe { write_all(self.buffer.slot(self.len), rest.iter().cloned()) };

            self.len = self
                .len
                .checked_add(written)
                .expect("bounded by source length");
        } else {
            self.truncate(source.len);
        }
    }
}

impl<T> Deref for GrowVec<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for GrowVec<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, I: SliceIndex<[T]>> Index<I> for GrowVec<T> {
    type Output = I::Output;

    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, I: SliceIndex<[T]>> IndexMut<I> for GrowVec<T> {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<T: Debug> Debug for GrowVec<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for GrowVec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for GrowVec<T> {}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for GrowVec<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialOrd> PartialOrd for GrowVec<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord> Ord for GrowVec<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash> Hash for GrowVec<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T> Extend<T> for GrowVec<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();

        let (lower_bound, _) = iter.size_hint();
        let required = self.len.saturating_add(lower_bound);

        if required > self.capacity() {
            self.reserve(required.max(self.grown_capacity()));
        }

        for item in iter {
            self.push_back(item);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for GrowVec<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T> FromIterator<T> for GrowVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vec = Self::new();
        vec.extend(iter);
        vec
    }
}

impl<T, const N: usize> From<[T; N]> for GrowVec<T> {
    fn from(items: [T; N]) -> Self {
        let mut buffer = RawBuffer::with_capacity(N);

        // SAFETY: The fresh buffer has exactly `N` uninitialized slots. Moving out of an array
        // cannot panic.
        let written = unsafe { write_all(buffer.slot(0), items.into_iter()) };

        Self {
            buffer,
            len: written,
        }
    }
}

impl<T: Clone> From<&[T]> for GrowVec<T> {
    fn from(items: &[T]) -> Self {
        Self::from_slice(items)
    }
}

impl<'a, T> IntoIterator for &'a GrowVec<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut GrowVec<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
#[allow(
    clippy::indexing_slicing,
    clippy::undocumented_unsafe_blocks,
    clippy::arithmetic_side_effects,
    reason = "tests focus on succinct code and do not need to tick all the boxes"
)]
mod tests {
    use std::cell::Cell;
    use std::collections::hash_map::DefaultHasher;
    use std::rc::Rc;

    use static_assertions::{assert_impl_all, assert_not_impl_any};
    use testing::{Probe, ledger, probes, values};

    use super::*;
    use crate::grow_vec;

    assert_impl_all!(GrowVec<u32>: Send, Sync, Debug, Default, Clone);
    assert_not_impl_any!(GrowVec<Rc<u32>>: Send, Sync);
    assert_not_impl_any!(GrowVec<Cell<u32>>: Sync);

    #[test]
    fn smoke_test() {
        let mut vec = GrowVec::with_len(0);
        assert!(vec.is_empty());

        for n in 1..=5 {
            vec.push_back(n);
        }

        assert_eq!(vec.len(), 5);
        assert!(vec.capacity() >= 5);
        assert_eq!(vec.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5]);

        vec.erase(2);

        assert_eq!(vec, [1, 2, 4, 5]);
    }

    #[test]
    fn new_owns_nothing() {
        let vec = GrowVec::<String>::new();

        assert_eq!(vec.len(), 0);
        assert_eq!(vec.capacity(), 0);
        assert!(vec.as_slice().is_empty());
    }

    #[test]
    fn with_len_default_constructs_exact_capacity() {
        let vec = GrowVec::<u32>::with_len(4);

        assert_eq!(vec.len(), 4);
        assert_eq!(vec.capacity(), 4);
        assert_eq!(vec, [0, 0, 0, 0]);
    }

    #[test]
    fn from_elem_clones_value() {
        let vec = GrowVec::from_elem(3, &"x".to_string());

        assert_eq!(vec.len(), 3);
        assert_eq!(vec.capacity(), 3);
        assert!(vec.iter().all(|s| s == "x"));
    }

    #[test]
    fn growth_doubles_from_one() {
        let mut vec = GrowVec::new();
        let mut observed = Vec::new();

        for n in 0..9 {
            vec.push_back(n);
            observed.push(vec.capacity());
        }

        assert_eq!(observed, [1, 2, 4, 4, 8, 8, 8, 8, 16]);
    }

    #[test]
    fn growth_from_presized_doubles_len() {
        let mut vec = GrowVec::<u8>::with_len(3);

        vec.push_back(1);

        assert_eq!(vec.capacity(), 6);
    }

    #[test]
    fn push_back_returns_reference_to_new_value() {
        let mut vec = GrowVec::new();
        vec.push_back(1);

        *vec.push_back(2) += 40;

        assert_eq!(vec, [1, 42]);
    }

    #[test]
    fn push_then_pop_tracks_net_count() {
        let mut vec = GrowVec::new();

        for n in 0..10 {
            vec.push_back(n);
        }

        for _ in 0..4 {
            vec.pop_back();
        }

        assert_eq!(vec.len(), 6);
        assert_eq!(vec, [0, 1, 2, 3, 4, 5]);
        assert_eq!(vec.pop(), Some(5));
    }

    #[test]
    fn pop_on_empty_is_none() {
        let mut vec = GrowVec::<u32>::new();

        assert_eq!(vec.pop(), None);
    }

    #[test]
    #[should_panic]
    fn pop_back_on_empty_panics() {
        let mut vec = GrowVec::<u32>::new();
        vec.pop_back();
    }

    #[test]
    fn pop_back_drops_value() {
        ledger::reset();

        let mut vec = GrowVec::from_iter(probes([1, 2]));
        vec.pop_back();

        assert_eq!(ledger::live(), 1);
        assert_eq!(values(&vec), [1]);
    }

    #[test]
    fn reserve_smaller_is_noop() {
        let mut vec = GrowVec::with_capacity(8);
        vec.push_back(1);
        vec.push_back(2);
        let address = vec.as_ptr();

        vec.reserve(4);
        vec.reserve(8);

        assert_eq!(vec.capacity(), 8);
        assert_eq!(vec.as_ptr(), address);
        assert_eq!(vec, [1, 2]);
    }

    #[test]
    fn reserve_larger_is_exact_and_preserves_values() {
        let mut vec = grow_vec!["a".to_string(), "b".to_string()];

        vec.reserve(10);

        assert_eq!(vec.capacity(), 10);
        assert_eq!(vec, ["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn reserve_moves_without_cloning_or_dropping() {
        ledger::reset();

        let mut vec = GrowVec::from_iter(probes([1, 2, 3]));
        let constructed = ledger::constructed();

        vec.reserve(100);

        assert_eq!(ledger::constructed(), constructed);
        assert_eq!(ledger::dropped(), 0);
        assert_eq!(values(&vec), [1, 2, 3]);
    }

    #[test]
    fn try_reserve_allocation_failure_leaves_array_unchanged() {
        let mut vec: GrowVec<u8> = (1..=3).collect();
        let capacity = vec.capacity();
        let address = vec.as_ptr();

        // A valid layout that no allocator can satisfy.
        let result = vec.try_reserve(usize::try_from(isize::MAX).unwrap() - 7);

        assert!(matches!(
            result,
            Err(crate::Error::AllocationFailed { .. })
        ));
        assert_eq!(vec, [1, 2, 3]);
        assert_eq!(vec.capacity(), capacity);
        assert_eq!(vec.as_ptr(), address);
    }

    #[test]
    fn try_reserve_overflow_leaves_array_unchanged() {
        let mut vec = grow_vec![1_u64, 2, 3];

        let result = vec.try_reserve(usize::MAX);

        assert!(matches!(result, Err(crate::Error::CapacityOverflow { .. })));
        assert_eq!(vec, [1, 2, 3]);
        assert_eq!(vec.capacity(), 3);
    }

    #[test]
    fn resize_grows_with_defaults() {
        let mut vec = grow_vec![7_u32];

        vec.resize(4);

        assert_eq!(vec, [7, 0, 0, 0]);
        assert_eq!(vec.capacity(), 4);
    }

    #[test]
    fn resize_shrinks_without_touching_capacity() {
        ledger::reset();

        let mut vec = GrowVec::from_iter(probes(0..6));
        let capacity = vec.capacity();

        vec.resize(2);

        assert_eq!(vec.len(), 2);
        assert_eq!(vec.capacity(), capacity);
        assert_eq!(ledger::live(), 2);
    }

    #[test]
    fn resize_with_uses_closure() {
        let mut vec = GrowVec::new();
        let mut next = 0;

        vec.resize_with(3, || {
            next += 1;
            next
        });

        assert_eq!(vec, [1, 2, 3]);
    }

    #[test]
    fn insert_shifts_later_values() {
        let mut vec = grow_vec![1, 2, 3, 4];
        vec.reserve(10);

        *vec.insert(1, 10) += 1;

        assert_eq!(vec, [1, 11, 2, 3, 4]);
    }

    #[test]
    fn insert_when_full_grows_and_shifts() {
        let mut vec = grow_vec![1, 2, 3];
        assert_eq!(vec.capacity(), 3);

        vec.insert(0, 0);

        assert_eq!(vec, [0, 1, 2, 3]);
        assert_eq!(vec.capacity(), 6);
    }

    #[test]
    fn insert_at_end_appends() {
        let mut vec = grow_vec![1, 2];

        vec.insert(2, 3);

        assert_eq!(vec, [1, 2, 3]);
    }

    #[test]
    fn insert_into_empty() {
        let mut vec = GrowVec::new();

        vec.insert(0, "only");

        assert_eq!(vec, ["only"]);
        assert_eq!(vec.capacity(), 1);
    }

    #[test]
    #[should_panic]
    fn insert_past_end_panics() {
        let mut vec = grow_vec![1, 2];
        vec.insert(3, 3);
    }

    #[test]
    fn emplace_does_not_clone_existing() {
        ledger::reset();

        let mut vec = GrowVec::from_iter(probes([1, 2, 3, 4]));
        let constructed = ledger::constructed();

        vec.emplace_with(2, || Probe::new(9));
        vec.emplace_with(0, || Probe::new(8));

        assert_eq!(ledger::constructed(), constructed + 2);
        assert_eq!(values(&vec), [8, 1, 2, 9, 3, 4]);
    }

    #[test]
    fn remove_returns_value_and_keeps_capacity() {
        let mut vec = grow_vec!["a", "b", "c"];

        assert_eq!(vec.remove(0), "a");

        assert_eq!(vec, ["b", "c"]);
        assert_eq!(vec.capacity(), 3);
    }

    #[test]
    fn erase_drops_exactly_one_value() {
        ledger::reset();

        let mut vec = GrowVec::from_iter(probes([1, 2, 3, 4]));
        let capacity = vec.capacity();

        vec.erase(1);

        assert_eq!(ledger::dropped(), 1);
        assert_eq!(values(&vec), [1, 3, 4]);
        assert_eq!(vec.capacity(), capacity);
    }

    #[test]
    fn erase_at_end_pops_last() {
        let mut vec = grow_vec![1, 2, 3];

        vec.erase(3);

        assert_eq!(vec, [1, 2]);
    }

    #[test]
    #[should_panic]
    fn erase_past_end_panics() {
        let mut vec = grow_vec![1, 2, 3];
        vec.erase(4);
    }

    #[test]
    fn clone_is_deep_and_exactly_sized() {
        let mut original = GrowVec::with_capacity(10);
        original.extend(["x".to_string(), "y".to_string()]);

        let copy = original.clone();
        original[0].push('!');
        original.push_back("z".to_string());

        assert_eq!(copy, ["x".to_string(), "y".to_string()]);
        assert_eq!(copy.capacity(), 2);
    }

    #[test]
    fn clone_from_reuses_memory_when_it_fits() {
        let mut target = GrowVec::with_capacity(8);
        target.extend([9, 9, 9, 9, 9]);
        let address = target.as_ptr();

        target.clone_from(&grow_vec![1, 2]);
        assert_eq!(target, [1, 2]);

        target.clone_from(&grow_vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(target, [1, 2, 3, 4, 5, 6]);

        assert_eq!(target.as_ptr(), address);
    }

    #[test]
    fn clone_from_larger_source_replaces_memory() {
        let mut target = grow_vec![1];

        target.clone_from(&grow_vec![4, 5, 6]);

        assert_eq!(target, [4, 5, 6]);
        assert_eq!(target.capacity(), 3);
    }

    #[test]
    fn take_leaves_source_empty() {
        let mut source = grow_vec![1, 2, 3];

        let taken = mem::take(&mut source);

        assert!(source.is_empty());
        assert_eq!(source.capacity(), 0);
        assert_eq!(taken, [1, 2, 3]);
    }

    #[test]
    fn swap_exchanges_contents() {
        let mut a = grow_vec![1, 2, 3];
        let mut b = grow_vec![4];

        mem::swap(&mut a, &mut b);

        assert_eq!(a, [4]);
        assert_eq!(b, [1, 2, 3]);
    }

    #[test]
    fn swap_exchanges_values_by_position() {
        let mut vec = grow_vec![1, 2, 3];

        vec.swap(0, 2);

        assert_eq!(vec, [3, 2, 1]);
    }

    #[test]
    fn drop_drops_every_live_value() {
        ledger::reset();

        let mut vec = GrowVec::with_capacity(10);
        vec.extend(probes(0..5));

        drop(vec);

        assert_eq!(ledger::live(), 0);
    }

    #[test]
    fn comparisons_are_lexicographic() {
        assert!(grow_vec![1, 2, 3] < grow_vec![1, 2, 4]);
        assert!(grow_vec![1, 2] < grow_vec![1, 2, 0]);
        assert!(grow_vec![2] > grow_vec![1, 9, 9]);
        assert_eq!(grow_vec![1, 2].cmp(&grow_vec![1, 2]), Ordering::Equal);
        assert_ne!(grow_vec![1, 2], grow_vec![2, 1]);
    }

    #[test]
    fn equal_arrays_hash_equally() {
        fn hash_of(vec: &GrowVec<u32>) -> u64 {
            let mut hasher = DefaultHasher::new();
            vec.hash(&mut hasher);
            hasher.finish()
        }

        let mut spacious = GrowVec::with_capacity(100);
        spacious.extend([1, 2, 3]);

        assert_eq!(hash_of(&spacious), hash_of(&grow_vec![1, 2, 3]));
    }

    #[test]
    fn traversal_is_restartable() {
        let mut vec = grow_vec![1, 2, 3];

        for value in &mut vec {
            *value *= 2;
        }

        let first: Vec<_> = (&vec).into_iter().copied().collect();
        let second: Vec<_> = vec.iter().copied().collect();

        assert_eq!(first, [2, 4, 6]);
        assert_eq!(first, second);
    }

    #[test]
    fn unchecked_access_reads_live_values() {
        let mut vec = grow_vec![10, 20];

        assert_eq!(unsafe { *vec.get_unchecked(1) }, 20);

        unsafe { *vec.get_unchecked_mut(0) = 11 };
        assert_eq!(vec[0], 11);
    }

    #[test]
    #[should_panic]
    fn index_past_len_panics() {
        let mut vec = GrowVec::with_capacity(4);
        vec.push_back(1);

        let _value = vec[1];
    }

    #[test]
    fn debug_lists_values() {
        assert_eq!(format!("{:?}", grow_vec![1, 2]), "[1, 2]");
    }

    #[test]
    fn zero_sized_values() {
        let mut vec = GrowVec::new();

        for _ in 0..100 {
            vec.push_back(());
        }
        vec.insert(50, ());
        vec.erase(0);

        assert_eq!(vec.len(), 100);
    }

    #[test]
    fn extend_from_references() {
        let mut vec = grow_vec![1];

        vec.extend(&[2, 3]);

        assert_eq!(vec, [1, 2, 3]);
    }
}
