use core::fmt;
use core::marker::PhantomData;
use core::mem;
use core::ptr::{self, NonNull};
use core::slice;

use tracing::{debug, trace, warn};

use crate::error::DynVecError;
use crate::iter::{Cursor, DetachedCursor};
use crate::raw;

/// Capacity used by `DynVec::with_default_capacity`
pub const DEFAULT_CAPACITY: usize = 10;

/// A growable vector that doubles its buffer when full
pub struct DynVec<T> {
    ptr: NonNull<T>,
    len: usize,
    cap: usize,
    generation: u64,
    _marker: PhantomData<T>,
}

// SAFETY: `DynVec<T>` owns its elements the same way `Vec<T>` does
#[allow(unsafe_code)]
unsafe impl<T: Send> Send for DynVec<T> {}
// SAFETY: shared access only hands out `&T`
#[allow(unsafe_code)]
unsafe impl<T: Sync> Sync for DynVec<T> {}

impl<T> DynVec<T> {
    /// Creates an empty `DynVec` with room for `initial_capacity` elements.
    ///
    /// A capacity of 0 allocates nothing; the first `push` grows the buffer.
    ///
    /// # Errors
    ///
    /// - `DynVecError::InvalidInitialization` if `T` is zero-sized
    /// - `DynVecError::CapacityOverflow` if the buffer size overflows `isize::MAX`
    /// - `DynVecError::AllocationFailed` if the allocator returns no memory
    pub fn with_capacity(initial_capacity: usize) -> Result<Self, DynVecError> {
        if mem::size_of::<T>() == 0 {
            return Err(DynVecError::InvalidInitialization {
                reason: "zero-sized element types are not supported",
            });
        }

        let ptr = if initial_capacity == 0 {
            NonNull::dangling()
        } else {
            raw::allocate(initial_capacity).inspect_err(|err| {
                warn!(error = %err, initial_capacity, "failed to allocate vector");
            })?
        };
        debug!(
            capacity = initial_capacity,
            element_size = mem::size_of::<T>(),
            "allocated vector"
        );

        Ok(Self {
            ptr,
            len: 0,
            cap: initial_capacity,
            generation: 0,
            _marker: PhantomData,
        })
    }

    /// Creates an empty `DynVec` with the default capacity (10).
    ///
    /// # Errors
    ///
    /// Same as `with_capacity`.
    pub fn with_default_capacity() -> Result<Self, DynVecError> {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Width of one element in bytes.
    #[must_use]
    pub fn element_size(&self) -> usize {
        mem::size_of::<T>()
    }

    /// Number of times the buffer has been replaced.
    ///
    /// Detached cursors compare against this value to notice that the
    /// storage moved under them.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Appends an element, doubling the capacity first if the vector is full.
    ///
    /// # Errors
    ///
    /// Returns `DynVecError::AllocationFailed` or `DynVecError::CapacityOverflow`
    /// if the buffer cannot grow. The failure is final for the contents: all
    /// stored elements and `value` are dropped, and the vector is left empty
    /// with no buffer.
    pub fn push(&mut self, value: T) -> Result<(), DynVecError> {
        if self.len == self.cap {
            self.grow()?;
        }

        // SAFETY: `len < cap` after growth, so the slot is inside the buffer
        // and not yet initialized
        #[allow(unsafe_code)]
        unsafe {
            ptr::write(self.ptr.as_ptr().add(self.len), value);
        }
        self.len += 1;

        Ok(())
    }

    /// Gets the element at the specified index.
    ///
    /// Returns `None` if the index is out of bounds.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Gets the element at the specified index.
    ///
    /// # Errors
    ///
    /// Returns `DynVecError::IndexOutOfBounds` if `index >= len()`. The vector
    /// is left untouched and stays usable.
    pub fn try_get(&self, index: usize) -> Result<&T, DynVecError> {
        self.get(index).ok_or_else(|| {
            trace!(index, length = self.len, "index out of bounds");
            DynVecError::IndexOutOfBounds {
                index,
                length: self.len,
            }
        })
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: the first `len` slots are initialized; with `len == 0` the
        // pointer is dangling but aligned and non-null
        #[allow(unsafe_code)]
        unsafe {
            slice::from_raw_parts(self.ptr.as_ptr(), self.len)
        }
    }

    /// Returns a cursor positioned at the first element.
    #[must_use]
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::new(self, 0)
    }

    /// Returns a cursor positioned one past the last element.
    ///
    /// The cursor is already exhausted.
    #[must_use]
    pub fn end(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.len)
    }

    /// Returns an iterator over the elements.
    #[must_use]
    pub fn iter(&self) -> Cursor<'_, T> {
        self.begin()
    }

    /// Returns a cursor that does not borrow the vector.
    ///
    /// The vector can be pushed to while the cursor is alive; reads through
    /// the cursor fail once the buffer has been reallocated.
    #[must_use]
    pub fn detached_begin(&self) -> DetachedCursor {
        DetachedCursor::new(0, self.generation)
    }

    /// Drops all elements and releases the buffer.
    ///
    /// Equivalent to letting the vector go out of scope.
    pub fn destroy(self) {
        debug!(len = self.len, capacity = self.cap, "destroying vector");
        drop(self);
    }

    fn grow(&mut self) -> Result<(), DynVecError> {
        let new_cap = if self.cap == 0 {
            1
        } else {
            self.cap.saturating_mul(2)
        };
        self.grow_to(new_cap)
    }

    fn grow_to(&mut self, new_cap: usize) -> Result<(), DynVecError> {
        let result = self.reallocate(new_cap);
        if let Err(err) = &result {
            warn!(
                error = %err,
                len = self.len,
                capacity = self.cap,
                "failed to grow vector, releasing contents"
            );
            self.release();
        }
        result
    }

    fn reallocate(&mut self, new_cap: usize) -> Result<(), DynVecError> {
        // SAFETY: `ptr` holds `cap` elements, or is dangling with `cap == 0`
        #[allow(unsafe_code)]
        let ptr = unsafe { raw::reallocate(self.ptr, self.cap, new_cap)? };
        debug!(
            old_capacity = self.cap,
            new_capacity = new_cap,
            "reallocated vector"
        );

        self.ptr = ptr;
        self.cap = new_cap;
        self.generation += 1;
        Ok(())
    }

    fn release(&mut self) {
        let len = self.len;
        // Elements are forgotten before dropping so a panicking destructor
        // cannot cause a double drop
        self.len = 0;

        // SAFETY: the first `len` slots were initialized and are no longer
        // reachable through `self`; the buffer was allocated for `cap` elements
        #[allow(unsafe_code)]
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), len));
            raw::release(self.ptr, self.cap);
        }
        if self.cap != 0 {
            debug!(len, capacity = self.cap, "released vector buffer");
            self.generation += 1;
        }

        self.ptr = NonNull::dangling();
        self.cap = 0;
    }
}

impl<T> Drop for DynVec<T> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<T: fmt::Debug> fmt::Debug for DynVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;

    #[test]
    fn test_push_doubles_capacity() {
        let mut dynvec = DynVec::with_capacity(2).unwrap();
        let mut capacities = Vec::new();
        for i in 0..9u32 {
            dynvec.push(i).unwrap();
            capacities.push(dynvec.capacity());
        }
        assert_eq!(capacities, [2, 2, 4, 4, 8, 8, 8, 8, 16]);
    }

    #[test]
    fn test_generation_counts_reallocations() {
        let mut dynvec = DynVec::with_capacity(0).unwrap();
        assert_eq!(dynvec.generation(), 0);

        dynvec.push(1u8).unwrap(); // 0 -> 1
        dynvec.push(2).unwrap(); // 1 -> 2
        dynvec.push(3).unwrap(); // 2 -> 4
        dynvec.push(4).unwrap();
        assert_eq!(dynvec.capacity(), 4);
        assert_eq!(dynvec.generation(), 3);
    }

    #[test]
    fn test_failed_growth_releases_contents() {
        let marker = Rc::new(());
        let mut dynvec = DynVec::with_capacity(2).unwrap();
        dynvec.push(Rc::clone(&marker)).unwrap();
        dynvec.push(Rc::clone(&marker)).unwrap();
        assert_eq!(Rc::strong_count(&marker), 3);

        // Capacity no allocator can satisfy
        let err = dynvec.reallocate(usize::MAX).unwrap_err();
        assert!(matches!(err, DynVecError::CapacityOverflow { .. }));
        // A failed reallocation alone keeps the old buffer intact
        assert_eq!(dynvec.len(), 2);
        assert_eq!(dynvec.capacity(), 2);

        let err = dynvec.grow_to(usize::MAX).unwrap_err();
        assert!(matches!(err, DynVecError::CapacityOverflow { .. }));
        assert_eq!(dynvec.len(), 0);
        assert_eq!(dynvec.capacity(), 0);
        assert_eq!(Rc::strong_count(&marker), 1);
    }

    #[test]
    fn test_vector_reusable_after_failed_growth() {
        let mut dynvec = DynVec::with_capacity(0).unwrap();
        dynvec.release();
        dynvec.push(5i64).unwrap();
        assert_eq!(dynvec.as_slice(), &[5]);
    }

    #[test]
    fn test_release_bumps_generation_only_with_buffer() {
        let mut dynvec = DynVec::<u32>::with_capacity(0).unwrap();
        dynvec.release();
        assert_eq!(dynvec.generation(), 0);

        let mut dynvec = DynVec::<u32>::with_capacity(3).unwrap();
        dynvec.release();
        assert_eq!(dynvec.generation(), 1);
    }
}
