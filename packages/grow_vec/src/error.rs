use std::alloc::Layout;

use thiserror::Error;

/// Errors reported by the fallible operations of the containers in this crate.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The requested number of items does not fit in a valid memory layout for the item type.
    #[error("capacity overflow: {requested} items do not fit in a valid memory layout")]
    CapacityOverflow {
        /// The number of items the caller asked room for.
        requested: usize,
    },

    /// The global allocator could not satisfy the request.
    #[error(
        "allocation of {} bytes (alignment {}) failed",
        .layout.size(),
        .layout.align()
    )]
    AllocationFailed {
        /// The layout of the block that could not be allocated.
        layout: Layout,
    },

    /// A checked accessor was given an index that does not refer to a live item.
    #[error("index {index} is out of range for a container of length {len}")]
    OutOfRange {
        /// The index the caller asked for.
        index: usize,

        /// The number of live items at the time of the call.
        len: usize,
    },
}

/// A specialized `Result` type for container operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Error: Send, Sync, Debug);

    #[test]
    fn out_of_range_mentions_index_and_len() {
        let error = Error::OutOfRange { index: 7, len: 3 };

        let message = error.to_string();
        assert!(message.contains('7'));
        assert!(message.contains('3'));
    }

    #[test]
    fn allocation_failed_mentions_size() {
        let layout = Layout::array::<u64>(16).unwrap();
        let error = Error::AllocationFailed { layout };

        assert!(error.to_string().contains("128 bytes"));
    }

    #[test]
    fn capacity_overflow_mentions_requested_count() {
        let error = Error::CapacityOverflow { requested: 42 };

        let message = error.to_string();
        assert!(message.starts_with("capacity overflow"));
        assert!(message.contains("42 items"));
    }
}
