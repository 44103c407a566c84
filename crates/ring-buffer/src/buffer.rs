//! Fixed-Capacity Ring Buffer Implementation

/// Single-owner ring buffer over `Copy` samples.
///
/// Storage is allocated once in [`RingBuffer::new`]; pushes never allocate.
/// Iteration always runs oldest to newest.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    /// Pre-allocated storage
    storage: Box<[T]>,
    /// Next write position
    head: usize,
    /// Number of live entries
    len: usize,
}

impl<T: Copy + Default> RingBuffer<T> {
    /// Create a new ring buffer holding at most `capacity` items.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ring buffer capacity must be non-zero");
        Self {
            storage: vec![T::default(); capacity].into_boxed_slice(),
            head: 0,
            len: 0,
        }
    }

    /// Push an item, overwriting the oldest one once the buffer is full
    pub fn push(&mut self, item: T) {
        let capacity = self.capacity();
        if self.len < capacity {
            self.len += 1;
        }
        self.storage[self.head] = item;
        self.head = (self.head + 1) % capacity;
    }
}

impl<T> RingBuffer<T> {
    /// Get the number of items currently in the buffer
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the buffer capacity
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Iterate live items from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let capacity = self.capacity();
        let tail = (self.head + capacity - self.len) % capacity;
        (0..self.len).map(move |i| &self.storage[(tail + i) % capacity])
    }

    /// Count live items matching a predicate
    pub fn count_where<F>(&self, mut predicate: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().filter(|item| predicate(item)).count()
    }
}

impl RingBuffer<f64> {
    /// Sum of live items, accumulated oldest to newest
    pub fn sum(&self) -> f64 {
        self.iter().sum()
    }

    /// Arithmetic mean of live items, `None` when empty
    pub fn mean(&self) -> Option<f64> {
        if self.len == 0 {
            None
        } else {
            Some(self.sum() / self.len as f64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_push_and_iter() {
        let mut buffer = RingBuffer::new(10);

        for i in 0..5 {
            buffer.push(i as f64 * 0.1);
        }

        assert_eq!(buffer.len(), 5);
        assert_eq!(buffer.capacity(), 10);

        let items: Vec<f64> = buffer.iter().copied().collect();
        assert_eq!(items.len(), 5);
        assert!((items[0] - 0.0).abs() < 1e-12); // Oldest
        assert!((items[4] - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_overwrite_oldest() {
        let mut buffer = RingBuffer::new(5);

        for i in 0..7u32 {
            buffer.push(i);
        }
        assert_eq!(buffer.len(), 5);

        let items: Vec<u32> = buffer.iter().copied().collect();
        assert_eq!(items, vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_mean_tracks_window() {
        let mut buffer = RingBuffer::new(3);
        assert_eq!(buffer.mean(), None);

        buffer.push(1.0);
        buffer.push(2.0);
        assert_eq!(buffer.mean(), Some(1.5));

        buffer.push(3.0);
        buffer.push(10.0);
        // 1.0 evicted
        assert_eq!(buffer.mean(), Some(5.0));
    }

    #[test]
    fn test_count_where() {
        let mut buffer = RingBuffer::new(4);
        for flag in [true, false, true, true, false] {
            buffer.push(flag);
        }
        // Window is [false, true, true, false]
        assert_eq!(buffer.count_where(|&f| f), 2);
    }

    #[test]
    fn test_new_buffer_is_empty() {
        let buffer = RingBuffer::<u8>::new(100);
        assert!(buffer.is_empty());
        assert_eq!(buffer.iter().count(), 0);
        assert_eq!(buffer.count_where(|_| true), 0);
    }

    #[test]
    #[should_panic(expected = "capacity must be non-zero")]
    fn test_zero_capacity_rejected() {
        let _ = RingBuffer::<f64>::new(0);
    }

    proptest! {
        #[test]
        fn prop_keeps_last_capacity_items(
            capacity in 1usize..32,
            values in proptest::collection::vec(0u32..1000, 0..100),
        ) {
            let mut buffer = RingBuffer::new(capacity);
            for &v in &values {
                buffer.push(v);
            }

            let start = values.len().saturating_sub(capacity);
            let expected: Vec<u32> = values[start..].to_vec();
            let actual: Vec<u32> = buffer.iter().copied().collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
