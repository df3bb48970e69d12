//! Allocation helpers for the backing buffer of a `DynVec`.
//!
//! Every function here deals in element counts; byte sizes come from
//! `Layout::array`, which also rejects sizes above `isize::MAX`.

use alloc::alloc::{alloc, dealloc, realloc, Layout};
use core::mem;
use core::ptr::NonNull;

use crate::error::DynVecError;

fn layout_for<T>(capacity: usize) -> Result<Layout, DynVecError> {
    Layout::array::<T>(capacity).map_err(|_| DynVecError::CapacityOverflow {
        capacity,
        element_size: mem::size_of::<T>(),
    })
}

/// Allocates an uninitialized buffer for `capacity` elements.
///
/// The caller guarantees `capacity > 0` and that `T` is not zero-sized.
pub(crate) fn allocate<T>(capacity: usize) -> Result<NonNull<T>, DynVecError> {
    debug_assert!(capacity > 0 && mem::size_of::<T>() > 0);
    let layout = layout_for::<T>(capacity)?;

    // SAFETY: `layout` has a non-zero size, see the caller contract above
    #[allow(unsafe_code)]
    let ptr = unsafe { alloc(layout) };

    NonNull::new(ptr.cast::<T>()).ok_or(DynVecError::AllocationFailed {
        requested_bytes: layout.size(),
    })
}

/// Moves a buffer of `old_capacity` elements into one of `new_capacity`
/// elements, preserving the first `old_capacity` elements.
///
/// On error the old buffer is left as it was.
///
/// # Safety
///
/// `ptr` must come from `allocate`/`reallocate` with `old_capacity`, or be
/// dangling with `old_capacity == 0`. `new_capacity` must be greater than
/// `old_capacity`.
#[allow(unsafe_code)]
pub(crate) unsafe fn reallocate<T>(
    ptr: NonNull<T>,
    old_capacity: usize,
    new_capacity: usize,
) -> Result<NonNull<T>, DynVecError> {
    debug_assert!(new_capacity > old_capacity);
    if old_capacity == 0 {
        return allocate(new_capacity);
    }

    let new_layout = layout_for::<T>(new_capacity)?;
    let old_layout = layout_for::<T>(old_capacity)?;

    // SAFETY: `ptr` was allocated with `old_layout` (caller contract), and
    // `new_layout.size()` is non-zero and was validated by `Layout::array`
    let new_ptr = unsafe { realloc(ptr.as_ptr().cast::<u8>(), old_layout, new_layout.size()) };

    NonNull::new(new_ptr.cast::<T>()).ok_or(DynVecError::AllocationFailed {
        requested_bytes: new_layout.size(),
    })
}

/// Returns the buffer to the allocator. Elements are not dropped.
///
/// # Safety
///
/// Same provenance contract as `reallocate`. The buffer must not be used
/// afterwards.
#[allow(unsafe_code)]
pub(crate) unsafe fn release<T>(ptr: NonNull<T>, capacity: usize) {
    if capacity == 0 {
        return;
    }
    // A buffer of this capacity was allocated, so the layout is valid
    if let Ok(layout) = layout_for::<T>(capacity) {
        // SAFETY: `ptr` was allocated with exactly this layout
        unsafe { dealloc(ptr.as_ptr().cast::<u8>(), layout) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_rejects_overflowing_capacity() {
        let err = allocate::<u64>(usize::MAX).unwrap_err();
        assert_eq!(
            err,
            DynVecError::CapacityOverflow {
                capacity: usize::MAX,
                element_size: 8,
            }
        );
    }

    #[test]
    #[allow(unsafe_code)]
    fn reallocate_preserves_prefix() {
        let ptr = allocate::<u32>(2).unwrap();
        unsafe {
            ptr.as_ptr().write(7);
            ptr.as_ptr().add(1).write(9);

            let grown = reallocate(ptr, 2, 4).unwrap();
            assert_eq!(grown.as_ptr().read(), 7);
            assert_eq!(grown.as_ptr().add(1).read(), 9);

            release(grown, 4);
        }
    }

    #[test]
    #[allow(unsafe_code)]
    fn reallocate_from_dangling_allocates() {
        unsafe {
            let ptr = reallocate(NonNull::<u16>::dangling(), 0, 1).unwrap();
            ptr.as_ptr().write(3);
            assert_eq!(ptr.as_ptr().read(), 3);
            release(ptr, 1);
        }
    }

    #[test]
    #[allow(unsafe_code)]
    fn reallocate_overflow_keeps_old_buffer() {
        let ptr = allocate::<u64>(1).unwrap();
        unsafe {
            ptr.as_ptr().write(42);
            let err = reallocate(ptr, 1, usize::MAX).unwrap_err();
            assert!(matches!(err, DynVecError::CapacityOverflow { .. }));
            assert_eq!(ptr.as_ptr().read(), 42);
            release(ptr, 1);
        }
    }
}
