#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Contiguous growable arrays built on an explicitly managed raw memory block.
//!
//! This crate provides [`GrowVec`], a growable array that separates its memory block
//! ([`RawBuffer`]) from the values living in it. The array tracks exactly which slots hold live
//! values and keeps that bookkeeping correct even when constructing a value panics halfway
//! through an operation.
//!
//! # Key Features
//!
//! - **Separate storage and values**: [`RawBuffer`] owns uninitialized memory and never drops
//!   what is in it; [`GrowVec`] owns the values and their lifetimes
//! - **Strong panic safety**: construction of new values happens before existing values are
//!   touched, so a panicking `Clone`, `Default` or constructor closure leaves the array as it was
//! - **Move-based growth**: existing values are moved into new memory, never cloned
//! - **Predictable capacity**: growth on insertion doubles from one; explicit reservations are
//!   exact; capacity never shrinks
//! - **Fallible allocation**: `try_*` methods report allocation failure as an [`Error`] instead
//!   of panicking
//! - **Fully initialized variant**: [`SimpleVec`] keeps every slot of its storage initialized
//!   and offers checked access via [`SimpleVec::at()`]
//!
//! # Examples
//!
//! ```rust
//! use grow_vec::{GrowVec, grow_vec};
//!
//! let mut words = GrowVec::new();
//! words.push_back("hello".to_string());
//! words.insert(0, "well,".to_string());
//!
//! assert_eq!(words.len(), 2);
//! assert_eq!(words[0], "well,");
//!
//! let numbers = grow_vec![3, 1, 2];
//! let mut sorted = numbers.clone();
//! sorted.sort_unstable();
//!
//! assert_eq!(sorted, [1, 2, 3]);
//! assert!(numbers > sorted);
//! ```
//!
//! Reserving memory up front, with allocation failure as an error:
//!
//! ```rust
//! use grow_vec::GrowVec;
//!
//! let mut buffer = GrowVec::<u8>::new();
//!
//! buffer.try_reserve(4096).unwrap();
//! assert_eq!(buffer.capacity(), 4096);
//!
//! assert!(buffer.try_reserve(usize::MAX).is_err());
//! ```
//!
//! # Thread safety
//!
//! The containers are [`Send`] and [`Sync`] whenever their value type is, just like the
//! standard library collections.

mod builder;
mod error;
mod into_iter;
mod macros;
mod raw_buffer;
mod reserve;
mod simple_vec;
mod vec;

pub use builder::*;
pub use error::Error;
pub(crate) use error::Result;
pub use into_iter::IntoIter;
pub use raw_buffer::RawBuffer;
pub use reserve::*;
pub use simple_vec::SimpleVec;
pub use vec::GrowVec;
