use thiserror::Error;

/// Error types for `DynVec` operations
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum DynVecError {
    /// The allocator could not provide the backing buffer
    #[error("Allocation failed: could not obtain {requested_bytes} bytes")]
    AllocationFailed {
        /// Size of the rejected allocation in bytes
        requested_bytes: usize,
    },
    /// The requested capacity does not fit in the address space
    #[error("Capacity overflow: {capacity} elements of {element_size} bytes")]
    CapacityOverflow {
        /// Number of elements requested
        capacity: usize,
        /// Size of one element in bytes
        element_size: usize,
    },
    /// Index is beyond the current vector length
    #[error("Index out of bounds: index {index} is beyond vector length {length}")]
    IndexOutOfBounds {
        /// Index that was accessed
        index: usize,
        /// Current length of the vector
        length: usize,
    },
    /// The cursor has already yielded every element
    #[error("Iterator exhausted at position {position}")]
    IteratorExhausted {
        /// Cursor position when the read was attempted
        position: usize,
    },
    /// The vector was reallocated after the detached cursor was created
    #[error("Iterator invalidated: created at generation {expected}, vector is at generation {actual}")]
    IteratorInvalidated {
        /// Generation captured by the cursor
        expected: u64,
        /// Current generation of the vector
        actual: u64,
    },
    /// Invalid parameters provided to a `DynVec` constructor
    #[error("Invalid DynVec initialization: {reason}")]
    InvalidInitialization {
        /// Description of why initialization failed
        reason: &'static str,
    },
}
