use core::iter::FusedIterator;

use tracing::trace;

use crate::core::DynVec;
use crate::error::DynVecError;

/// Forward cursor over the elements of a `DynVec`
///
/// The cursor borrows the vector, so the vector cannot grow while the cursor
/// is alive. Once every element has been yielded the cursor stays exhausted;
/// start over with `DynVec::begin`.
pub struct Cursor<'a, T> {
    dynvec: &'a DynVec<T>,
    position: usize,
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(dynvec: &'a DynVec<T>, position: usize) -> Self {
        Self { dynvec, position }
    }

    /// Index of the next element to yield.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.position < self.dynvec.len()
    }

    /// Yields the next element and advances the cursor.
    ///
    /// # Errors
    ///
    /// Returns `DynVecError::IteratorExhausted` if no elements remain. The
    /// cursor does not move.
    pub fn try_next(&mut self) -> Result<&'a T, DynVecError> {
        self.next().ok_or_else(|| {
            trace!(position = self.position, "cursor exhausted");
            DynVecError::IteratorExhausted {
                position: self.position,
            }
        })
    }
}

// Manual impl: deriving would require `T: Clone`
impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        Self {
            dynvec: self.dynvec,
            position: self.position,
        }
    }
}

impl<'a, T> Iterator for Cursor<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.dynvec.get(self.position)?;
        self.position += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.dynvec.len().saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Cursor<'_, T> {}

impl<T> FusedIterator for Cursor<'_, T> {}

impl<'a, T> IntoIterator for &'a DynVec<T> {
    type Item = &'a T;
    type IntoIter = Cursor<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.begin()
    }
}

/// Forward cursor that remembers its position without borrowing the vector
///
/// The cursor records the generation of the vector it was created from. If
/// the vector reallocates its buffer afterwards, reads fail with
/// `DynVecError::IteratorInvalidated` instead of observing moved storage.
/// Pushes that fit in the current capacity keep the cursor valid.
///
/// The cursor does not know which vector it came from; passing a different
/// vector is a logic error that is only caught if the generations differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetachedCursor {
    position: usize,
    generation: u64,
}

impl DetachedCursor {
    pub(crate) fn new(position: usize, generation: u64) -> Self {
        Self {
            position,
            generation,
        }
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Generation of the vector when the cursor was created.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns `true` if an element remains at the cursor position.
    ///
    /// The length is read from `dynvec` on every call.
    #[must_use]
    pub fn has_next<T>(&self, dynvec: &DynVec<T>) -> bool {
        self.position < dynvec.len()
    }

    /// Yields the next element of `dynvec` and advances the cursor.
    ///
    /// # Errors
    ///
    /// - `DynVecError::IteratorInvalidated` if the vector reallocated since the
    ///   cursor was created
    /// - `DynVecError::IteratorExhausted` if no elements remain
    ///
    /// On error the cursor does not move.
    pub fn try_next<'v, T>(&mut self, dynvec: &'v DynVec<T>) -> Result<&'v T, DynVecError> {
        if dynvec.generation() != self.generation {
            trace!(
                expected = self.generation,
                actual = dynvec.generation(),
                "detached cursor invalidated"
            );
            return Err(DynVecError::IteratorInvalidated {
                expected: self.generation,
                actual: dynvec.generation(),
            });
        }

        let item = dynvec
            .get(self.position)
            .ok_or(DynVecError::IteratorExhausted {
                position: self.position,
            })?;
        self.position += 1;
        Ok(item)
    }
}
