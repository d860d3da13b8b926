/// Creates a [`GrowVec`][crate::GrowVec] holding the given values.
///
/// - `grow_vec![]` creates an empty array.
/// - `grow_vec![a, b, c]` creates an array holding the values in order, with capacity for
///   exactly that many.
/// - `grow_vec![value; n]` creates an array of `n` clones of `value`.
///
/// ```
/// use grow_vec::grow_vec;
///
/// let listed = grow_vec![1, 2, 3];
/// assert_eq!(listed, [1, 2, 3]);
///
/// let repeated = grow_vec!["x"; 2];
/// assert_eq!(repeated, ["x", "x"]);
/// ```
#[macro_export]
macro_rules! grow_vec {
    () => {
        $crate::GrowVec::new()
    };
    ($value:expr; $len:expr) => {
        $crate::GrowVec::from_elem($len, &$value)
    };
    ($($value:expr),+ $(,)?) => {
        $crate::GrowVec::from([$($value),+])
    };
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use crate::GrowVec;

    #[test]
    fn empty() {
        let vec: GrowVec<u32> = grow_vec![];

        assert!(vec.is_empty());
        assert_eq!(vec.capacity(), 0);
    }

    #[test]
    fn listed_values_are_exactly_sized() {
        let vec = grow_vec![1, 2, 3,];

        assert_eq!(vec, [1, 2, 3]);
        assert_eq!(vec.capacity(), 3);
    }

    #[test]
    fn repeated_value() {
        let vec = grow_vec![String::from("ab"); 3];

        assert_eq!(vec.len(), 3);
        assert!(vec.iter().all(|s| s == "ab"));
    }
}
