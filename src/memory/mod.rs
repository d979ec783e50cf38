//! Foreign process memory access
//!
//! Everything the pipeline knows about the target lives behind [`MemoryView`]:
//! byte-range reads of an externally running, concurrently mutating process.
//! Nothing here is ever written back.

pub mod channel;
pub mod dolphin;
pub mod fake;

pub use channel::{MemoryView, Ptr, VALID_BASE};
pub use dolphin::DolphinMemory;
