//! Fixed-Capacity Ring Buffer
//!
//! Provides a pre-allocated sliding window for per-frame signal histories
//! (EAR values, yawn flags). Pushing into a full window evicts the oldest entry.

mod buffer;

pub use buffer::RingBuffer;
