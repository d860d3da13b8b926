#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(coverage_nightly, coverage(off))] // This is all test code, no need to test it.

//! Private helpers for testing and examples in `grow_vec` packages.
//!
//! The centerpiece is [`Probe`], an element type that reports every construction and
//! destruction to a per-thread [`ledger`]. Tests use it to verify that containers never leak
//! or double-drop values, and to inject construction panics at a chosen point so that
//! unwinding paths can be exercised.
//!
//! ```rust
//! use testing::{Probe, ledger};
//!
//! ledger::reset();
//!
//! let a = Probe::new(1);
//! let b = a.clone();
//! assert_eq!(ledger::live(), 2);
//!
//! drop(a);
//! drop(b);
//! assert_eq!(ledger::live(), 0);
//! ```

pub mod ledger;
mod probe;

pub use probe::*;
