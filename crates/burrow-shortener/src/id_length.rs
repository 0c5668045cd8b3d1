use std::sync::atomic::{AtomicUsize, Ordering};

/// The length used for newly generated link ids.
///
/// Shared by every create running in the process. It only ever grows, and
/// concurrent growth from the same observed length raises it once. Lost
/// races are harmless: the store's primary key still rejects duplicates.
#[derive(Debug)]
pub struct IdLength {
    current: AtomicUsize,
    max: usize,
}

impl IdLength {
    pub fn new(initial: usize, max: usize) -> Self {
        Self {
            current: AtomicUsize::new(initial.min(max)),
            max,
        }
    }

    pub fn current(&self) -> usize {
        self.current.load(Ordering::Relaxed)
    }

    /// Raises the length to one past `observed`, capped at the maximum.
    /// Returns the length now in effect.
    pub fn grow_from(&self, observed: usize) -> usize {
        let next = (observed + 1).min(self.max);
        let previous = self.current.fetch_max(next, Ordering::Relaxed);
        previous.max(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn starts_at_initial() {
        assert_eq!(IdLength::new(4, 32).current(), 4);
    }

    #[test]
    fn grows_by_one() {
        let length = IdLength::new(4, 32);

        assert_eq!(length.grow_from(4), 5);
        assert_eq!(length.current(), 5);
    }

    #[test]
    fn stale_observation_does_not_shrink_or_double_grow() {
        let length = IdLength::new(4, 32);
        length.grow_from(4);

        // Another request still saw 4.
        assert_eq!(length.grow_from(4), 5);
        assert_eq!(length.current(), 5);
    }

    #[test]
    fn capped_at_max() {
        let length = IdLength::new(4, 5);

        assert_eq!(length.grow_from(4), 5);
        assert_eq!(length.grow_from(5), 5);
        assert_eq!(length.current(), 5);
    }

    #[test]
    fn concurrent_growth_from_same_length_raises_once() {
        let length = Arc::new(IdLength::new(4, 32));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let length = Arc::clone(&length);
                std::thread::spawn(move || length.grow_from(4))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 5);
        }
        assert_eq!(length.current(), 5);
    }
}
