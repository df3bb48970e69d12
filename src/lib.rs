#![no_std]
#![deny(unsafe_code)]

//! `DynVec`: A growable vector with capacity doubling and a bounds-checked cursor.
//!
//! `DynVec<T>` owns one contiguous buffer. When a `push` finds the buffer full,
//! the capacity doubles (an empty buffer grows to one slot) and the elements
//! move to the new allocation. Reads never panic: out-of-range indexes and
//! exhausted cursors are reported as errors and leave the vector untouched.
//!
//! This crate is `no_std` compatible; it needs only the `alloc` crate.
//!
//! # Time Complexity
//! - `push()`: amortized O(1), O(n) when the buffer grows
//! - `get()`, `try_get()`: O(1)
//! - Cursor operations: O(1) per element
//!
//! # Allocation Failure
//!
//! Construction reports `DynVecError::AllocationFailed` or
//! `DynVecError::CapacityOverflow` and leaves nothing allocated. A failed growth
//! inside `push` is final for the stored data: the elements are dropped, the
//! buffer is released, and the vector is left empty.
//!
//! # Indexed Access
//!
//! ```
//! # use dynvec::{DynVec, DynVecError};
//! let mut dynvec = DynVec::with_capacity(2).unwrap();
//! for i in 0..5i32 {
//!     dynvec.push(f64::from(i) * 5.0).unwrap();
//! }
//!
//! assert_eq!(dynvec.len(), 5);
//! assert_eq!(dynvec.capacity(), 8);
//! assert_eq!(dynvec.try_get(3), Ok(&15.0));
//!
//! // Out-of-range reads are recoverable
//! assert_eq!(
//!     dynvec.try_get(100),
//!     Err(DynVecError::IndexOutOfBounds { index: 100, length: 5 })
//! );
//! assert_eq!(dynvec.get(100), None);
//! assert_eq!(dynvec.len(), 5);
//! ```
//!
//! # Cursor Interface
//!
//! `begin()` returns a cursor at the first element and `end()` one past the
//! last. `has_next()` and `try_next()` walk forward; the cursor also
//! implements `Iterator`:
//!
//! ```
//! # use dynvec::{DynVec, DynVecError};
//! let mut dynvec = DynVec::with_default_capacity().unwrap();
//! dynvec.push(1).unwrap();
//! dynvec.push(2).unwrap();
//!
//! let mut cursor = dynvec.begin();
//! while cursor.has_next() {
//!     println!("{}", cursor.try_next().unwrap());
//! }
//! assert_eq!(
//!     cursor.try_next(),
//!     Err(DynVecError::IteratorExhausted { position: 2 })
//! );
//!
//! assert!(!dynvec.end().has_next());
//!
//! let collected: Vec<_> = dynvec.iter().copied().collect();
//! assert_eq!(collected, vec![1, 2]);
//! ```
//!
//! # Detached Cursors
//!
//! A borrowed cursor keeps the vector immutable for its lifetime. When the
//! vector must be appended to between reads, use a detached cursor. It fails
//! fast once the buffer has been reallocated:
//!
//! ```
//! # use dynvec::{DynVec, DynVecError};
//! let mut dynvec = DynVec::with_capacity(2).unwrap();
//! dynvec.push('a').unwrap();
//!
//! let mut cursor = dynvec.detached_begin();
//! assert_eq!(cursor.try_next(&dynvec), Ok(&'a'));
//!
//! dynvec.push('b').unwrap(); // fits, cursor stays valid
//! assert_eq!(cursor.try_next(&dynvec), Ok(&'b'));
//!
//! dynvec.push('c').unwrap(); // grows the buffer
//! assert!(matches!(
//!     cursor.try_next(&dynvec),
//!     Err(DynVecError::IteratorInvalidated { .. })
//! ));
//! ```

extern crate alloc;

mod core;
mod error;
mod iter;
mod raw;

// Re-export public types and traits
pub use crate::core::{DynVec, DEFAULT_CAPACITY};
pub use error::DynVecError;
pub use iter::{Cursor, DetachedCursor};
