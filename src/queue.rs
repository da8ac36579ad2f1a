use std::collections::VecDeque;

/// A bounded history: pushing past the capacity evicts the oldest item.
pub struct Queue<T> {
    capacity: usize,
    items: VecDeque<T>,
}

impl<T> Queue<T> {
    /// A zero capacity is bumped to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            items: VecDeque::with_capacity(capacity),
        }
    }

    /// Returns the evicted item, if any.
    pub fn push(&mut self, item: T) -> Option<T> {
        let evicted = if self.items.len() == self.capacity {
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(item);
        evicted
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn latest(&self) -> Option<&T> {
        self.items.back()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> + ExactSizeIterator + DoubleEndedIterator {
        self.items.iter()
    }

    /// Newest first.
    pub fn newest(&self) -> impl Iterator<Item = &T> + ExactSizeIterator {
        self.items.iter().rev()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_the_oldest() {
        let mut queue = Queue::with_capacity(3);
        let evicted = (0..5).filter_map(|i| queue.push(i)).collect::<Vec<_>>();
        assert_eq!(evicted, vec![0, 1]);
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
        assert_eq!(queue.newest().copied().collect::<Vec<_>>(), vec![4, 3, 2]);
        assert_eq!(queue.latest(), Some(&4));
    }

    #[test]
    fn zero_capacity_keeps_one() {
        let mut queue = Queue::with_capacity(0);
        assert!(queue.is_empty());
        assert_eq!(queue.push("a"), None);
        assert_eq!(queue.push("b"), Some("a"));
        assert_eq!(queue.latest(), Some(&"b"));
    }
}
