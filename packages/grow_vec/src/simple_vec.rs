use std::any::type_name;
use std::cmp::Ordering;
use std::fmt::{self, Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::slice::{self, SliceIndex};

use crate::{Error, GrowVec, ReserveCapacity, Result};

/// A growable array that keeps every slot of its storage initialized.
///
/// Unlike [`GrowVec`], whose spare capacity is uninitialized memory, a `SimpleVec` fills all of
/// its capacity with default values up front. Growing the length within the capacity merely
/// resets slots to their default value, and shrinking it (via [`pop_back()`][Self::pop_back],
/// [`erase()`][Self::erase] or [`clear()`][Self::clear]) does not drop anything: values past
/// the length stay in storage until they are overwritten or the container is dropped.
///
/// Indexing panics on an out-of-range index, while [`at()`][Self::at] reports it as an
/// [`Error::OutOfRange`].
///
/// # Example
///
/// ```
/// use grow_vec::{SimpleVec, reserve};
///
/// let mut items = SimpleVec::from(reserve(4));
/// assert_eq!(items.capacity(), 4);
///
/// items.push_back(10);
/// items.push_back(20);
///
/// assert_eq!(items[1], 20);
/// assert!(items.at(2).is_err());
/// ```
#[derive(Clone)]
pub struct SimpleVec<T> {
    /// Fully initialized storage; its length is our capacity.
    items: GrowVec<T>,

    len: usize,
}

impl<T> SimpleVec<T> {
    /// Creates an empty container that owns no memory.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: GrowVec::new(),
            len: 0,
        }
    }

    /// The number of values in the container.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// The number of slots in storage.
    #[must_use]
    #[inline]
    pub fn capacity(&self) -> usize {
        self.items.len()
    }

    /// Whether the container holds no values.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The values as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        self.items
            .get(..self.len)
            .expect("length never exceeds storage size")
    }

    /// The values as a mutable slice.
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.items
            .get_mut(..self.len)
            .expect("length never exceeds storage size")
    }

    /// Iterates over the values in order.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Iterates mutably over the values in order.
    #[inline]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Reference to the value at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `index >= len()`.
    pub fn at(&self, index: usize) -> Result<&T> {
        let len = self.len;

        self.as_slice()
            .get(index)
            .ok_or(Error::OutOfRange { index, len })
    }

    /// Mutable reference to the value at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `index >= len()`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.len;

        self.as_mut_slice()
            .get_mut(index)
            .ok_or(Error::OutOfRange { index, len })
    }

    /// Sets the length to zero without touching storage.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Shortens the container by one. Does nothing if it is empty.
    #[inline]
    pub fn pop_back(&mut self) {
        self.len = self.len.saturating_sub(1);
    }

    /// Removes the value at `index` from the sequence, shifting all later values one slot
    /// earlier. The removed value moves to the unused part of storage.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn erase(&mut self, index: usize) {
        assert!(
            index < self.len,
            "erase index {index} out of bounds in SimpleVec<{}> of length {}",
            type_name::<T>(),
            self.len
        );

        self.as_mut_slice()
            .get_mut(index..)
            .expect("guarded by assertion above")
            .rotate_left(1);

        self.len = self.len.wrapping_sub(1);
    }
}

impl<T: Default> SimpleVec<T> {
    /// Creates a container of `len` default values, with capacity `len`.
    #[must_use]
    pub fn with_len(len: usize) -> Self {
        Self {
            items: GrowVec::with_len(len),
            len,
        }
    }

    /// Replaces storage with `new_capacity` slots, moving the values over and filling the rest
    /// with defaults.
    ///
    /// Slots past the length are dropped first. If creating a default value panics, the values
    /// are intact and the capacity equals the length.
    fn reallocate(&mut self, new_capacity: usize) {
        self.items.truncate(self.len);
        self.items.reserve(new_capacity);
        self.items.resize(new_capacity);
    }

    /// Capacity to grow to when `required` slots are needed and storage is too small.
    fn grown_capacity(&self, required: usize) -> usize {
        required.max(self.capacity().saturating_mul(2))
    }

    /// Changes the length to `new_len`. Slots that become part of the sequence are reset to
    /// their default value.
    ///
    /// If storage is too small, capacity becomes `max(new_len, 2 * capacity())`.
    pub fn resize(&mut self, new_len: usize) {
        if new_len > self.capacity() {
            self.reallocate(self.grown_capacity(new_len));
        }

        if let Some(exposed) = self.items.get_mut(self.len..new_len) {
            exposed.fill_with(T::default);
        }

        self.len = new_len;
    }

    /// Ensures the capacity is at least `new_capacity`, allocating exactly that much if it
    /// is not.
    pub fn reserve(&mut self, new_capacity: usize) {
        if new_capacity > self.capacity() {
            self.reallocate(new_capacity);
        }
    }

    fn make_room_for_one(&mut self) -> usize {
        let new_len = self
            .len
            .checked_add(1)
            .expect("length cannot overflow because storage would not fit in memory");

        if new_len > self.capacity() {
            self.reallocate(self.grown_capacity(new_len));
        }

        new_len
    }

    /// Appends `value`.
    ///
    /// If storage is full, capacity becomes `max(len() + 1, 2 * capacity())`, so an empty
    /// container grows to 1 and a full one doubles.
    pub fn push_back(&mut self, value: T) {
        let new_len = self.make_room_for_one();

        *self
            .items
            .get_mut(self.len)
            .expect("room was made above") = value;

        self.len = new_len;
    }

    /// Inserts `value` at `index`, shifting all values from `index` onward one slot later, and
    /// returns a reference to it. Grows like [`push_back()`][Self::push_back].
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert(&mut self, index: usize, value: T) -> &mut T {
        assert!(
            index <= self.len,
            "insertion index {index} out of bounds in SimpleVec<{}> of length {}",
            type_name::<T>(),
            self.len
        );

        let new_len = self.make_room_for_one();

        let affected = self
            .items
            .get_mut(index..new_len)
            .expect("room was made above");

        // The spare slot at the end takes the value, then rotates it into place.
        *affected.last_mut().expect("range includes the spare slot") = value;
        affected.rotate_right(1);

        self.len = new_len;

        self.items.get_mut(index).expect("index is below the new length")
    }
}

impl<T: Clone> SimpleVec<T> {
    /// Creates a container of `len` clones of `value`, with capacity `len`.
    #[must_use]
    pub fn from_elem(len: usize, value: &T) -> Self {
        Self {
            items: GrowVec::from_elem(len, value),
            len,
        }
    }
}

impl<T: Default> From<ReserveCapacity> for SimpleVec<T> {
    /// Creates an empty container whose storage already holds `capacity` default values.
    fn from(reserve: ReserveCapacity) -> Self {
        Self {
            items: GrowVec::with_len(reserve.capacity()),
            len: 0,
        }
    }
}

impl<T, const N: usize> From<[T; N]> for SimpleVec<T> {
    fn from(values: [T; N]) -> Self {
        Self {
            items: GrowVec::from(values),
            len: N,
        }
    }
}

impl<T> FromIterator<T> for SimpleVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let items: GrowVec<T> = iter.into_iter().collect();
        let len = items.len();

        Self { items, len }
    }
}

impl<T> Default for SimpleVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for SimpleVec<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for SimpleVec<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, I: SliceIndex<[T]>> Index<I> for SimpleVec<T> {
    type Output = I::Output;

    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, I: SliceIndex<[T]>> IndexMut<I> for SimpleVec<T> {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<T: Debug> Debug for SimpleVec<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for SimpleVec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for SimpleVec<T> {}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for SimpleVec<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialOrd> PartialOrd for SimpleVec<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord> Ord for SimpleVec<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash> Hash for SimpleVec<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<'a, T> IntoIterator for &'a SimpleVec<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut SimpleVec<T> {
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
    reason = "tests focus on succinct code and do not need to tick all the boxes"
)]
mod tests {
    use static_assertions::assert_impl_all;

    use std::mem;

    use super::*;
    use crate::reserve;

    assert_impl_all!(SimpleVec<u32>: Send, Sync, Debug, Default, Clone);

    #[test]
    fn with_len_fills_defaults() {
        let vec = SimpleVec::<i32>::with_len(3);

        assert_eq!(vec.len(), 3);
        assert_eq!(vec.capacity(), 3);
        assert_eq!(vec, [0, 0, 0]);
    }

    #[test]
    fn from_elem_fills_value() {
        let vec = SimpleVec::from_elem(2, &7);

        assert_eq!(vec, [7, 7]);
    }

    #[test]
    fn reserve_proxy_sets_capacity_only() {
        let vec = SimpleVec::<String>::from(reserve(5));

        assert!(vec.is_empty());
        assert_eq!(vec.capacity(), 5);
    }

    #[test]
    fn at_is_checked() {
        let mut vec = SimpleVec::from([1, 2, 3]);

        assert_eq!(*vec.at(2).unwrap(), 3);
        *vec.at_mut(0).unwrap() = 9;
        assert_eq!(vec[0], 9);

        let error = vec.at(3).unwrap_err();
        assert!(matches!(error, Error::OutOfRange { index: 3, len: 3 }));
        assert!(vec.at_mut(10).is_err());
    }

    #[test]
    #[should_panic]
    fn index_past_len_panics() {
        let mut vec = SimpleVec::from(reserve(4));
        vec.push_back(1);

        let _value = vec[1];
    }

    #[test]
    fn push_back_growth_policy() {
        let mut vec = SimpleVec::new();
        let mut observed = Vec::new();

        for n in 0..5 {
            vec.push_back(n);
            observed.push(vec.capacity());
        }

        assert_eq!(observed, [1, 2, 4, 4, 8]);
        assert_eq!(vec, [0, 1, 2, 3, 4]);
    }

    #[test]
    fn insert_within_capacity() {
        let mut vec = SimpleVec::from(reserve(8));
        vec.push_back(1);
        vec.push_back(3);

        *vec.insert(1, 2) *= 10;
        vec.insert(0, 0);
        vec.insert(4, 4);

        assert_eq!(vec, [0, 1, 20, 3, 4]);
        assert_eq!(vec.capacity(), 8);
    }

    #[test]
    fn insert_when_full_doubles() {
        let mut vec = SimpleVec::from([1, 2]);

        vec.insert(1, 5);

        assert_eq!(vec, [1, 5, 2]);
        assert_eq!(vec.capacity(), 4);
    }

    #[test]
    fn insert_into_empty_allocates_one() {
        let mut vec = SimpleVec::new();

        vec.insert(0, 'x');

        assert_eq!(vec.capacity(), 1);
        assert_eq!(vec, ['x']);
    }

    #[test]
    fn erase_shifts_later_values() {
        let mut vec = SimpleVec::from([1, 2, 3, 4]);

        vec.erase(1);

        assert_eq!(vec, [1, 3, 4]);
        assert_eq!(vec.capacity(), 4);
    }

    #[test]
    fn pop_back_on_empty_is_noop() {
        let mut vec = SimpleVec::<u8>::new();

        vec.pop_back();

        assert!(vec.is_empty());
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut vec = SimpleVec::from([1, 2, 3]);

        vec.clear();

        assert!(vec.is_empty());
        assert_eq!(vec.capacity(), 3);
    }

    #[test]
    fn resize_resets_exposed_slots() {
        let mut vec = SimpleVec::from([1, 2, 3]);

        vec.resize(1);
        vec.resize(3);

        assert_eq!(vec, [1, 0, 0]);
        assert_eq!(vec.capacity(), 3);
    }

    #[test]
    fn resize_beyond_capacity_grows() {
        let mut vec = SimpleVec::from([1, 2]);

        vec.resize(3);
        assert_eq!(vec.capacity(), 4);

        vec.resize(20);
        assert_eq!(vec.capacity(), 20);
        assert_eq!(vec.len(), 20);
        assert_eq!(vec[..3], [1, 2, 0]);
    }

    #[test]
    fn reserve_is_exact_and_keeps_values() {
        let mut vec = SimpleVec::from(["a".to_string()]);

        vec.reserve(10);
        vec.reserve(3);

        assert_eq!(vec.capacity(), 10);
        assert_eq!(vec, ["a".to_string()]);
    }

    #[test]
    fn clone_is_deep() {
        let mut original = SimpleVec::from(["a".to_string(), "b".to_string()]);

        let copy = original.clone();
        original[0].push('!');

        assert_eq!(copy, ["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn swap_exchanges_contents() {
        let mut a = SimpleVec::from([1, 2]);
        let mut b = SimpleVec::from(reserve(5));

        mem::swap(&mut a, &mut b);

        assert!(a.is_empty());
        assert_eq!(a.capacity(), 5);
        assert_eq!(b, [1, 2]);
    }

    #[test]
    fn swap_by_position_reaches_slice_method() {
        let mut vec = SimpleVec::from(reserve(6));
        vec.push_back('a');
        vec.push_back('b');

        vec.swap(0, 1);

        assert_eq!(vec, ['b', 'a']);
    }

    #[test]
    fn comparisons_ignore_spare_storage() {
        let mut spacious = SimpleVec::from(reserve(10));
        spacious.push_back(1);
        spacious.push_back(2);

        assert_eq!(spacious, SimpleVec::from([1, 2]));
        assert!(spacious < SimpleVec::from([1, 3]));
        assert!(SimpleVec::from([2]) > spacious);
    }

    #[test]
    fn iteration_covers_only_values() {
        let mut vec = SimpleVec::from(reserve(4));
        vec.push_back(1);
        vec.push_back(2);

        for value in &mut vec {
            *value += 1;
        }

        assert_eq!((&vec).into_iter().copied().collect::<Vec<_>>(), [2, 3]);
        assert_eq!(format!("{vec:?}"), "[2, 3]");
    }

    #[test]
    fn collects_from_iterator() {
        let vec: SimpleVec<u32> = (1..=3).collect();

        assert_eq!(vec, [1, 2, 3]);
    }
}
