//! Fixed-capacity moving average

/// Moving average over the last `N` samples
///
/// The window starts zero-filled and always averages over its full
/// capacity, so the first `N - 1` outputs ramp up from zero. A running sum
/// replaces recomputation over the window on every insert.
#[derive(Debug, Clone)]
pub struct MovingAverage<const N: usize> {
    samples: [i32; N],
    next: usize,
    sum: i64,
}

impl<const N: usize> Default for MovingAverage<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> MovingAverage<N> {
    const NON_EMPTY: () = assert!(N > 0, "window capacity must be non-zero");

    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NON_EMPTY;
        Self {
            samples: [0; N],
            next: 0,
            sum: 0,
        }
    }

    /// Insert a sample, evicting the oldest; returns the evicted sample
    pub fn push(&mut self, sample: i32) -> i32 {
        let evicted = core::mem::replace(&mut self.samples[self.next], sample);
        self.sum += sample as i64 - evicted as i64;
        self.next = (self.next + 1) % N;
        evicted
    }

    /// Arithmetic mean over the full capacity
    pub fn mean(&self) -> f32 {
        self.sum as f32 / N as f32
    }

    /// Mean truncated for an unsigned output channel
    ///
    /// Negative means saturate to zero.
    pub fn output(&self) -> u32 {
        self.mean() as u32
    }

    pub fn sum(&self) -> i64 {
        self.sum
    }

    /// Samples from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        let (newer, older) = self.samples.split_at(self.next);
        older.iter().chain(newer.iter()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_zero_filled() {
        let window = MovingAverage::<4>::new();
        assert_eq!(window.mean(), 0.0);
        assert!(window.iter().all(|s| s == 0));
    }

    #[test]
    fn test_ramp_up_divides_by_capacity() {
        let mut window = MovingAverage::<4>::new();
        window.push(100);
        assert_eq!(window.mean(), 25.0);
        assert_eq!(window.output(), 25);
    }

    #[test]
    fn test_eviction_order() {
        let mut window = MovingAverage::<3>::new();
        window.push(1);
        window.push(2);
        window.push(3);
        assert_eq!(window.push(4), 1);
        assert_eq!(window.iter().collect::<heapless::Vec<i32, 3>>(), [2, 3, 4]);
        assert_eq!(window.mean(), 3.0);
    }

    #[test]
    fn test_truncates_toward_zero() {
        let mut window = MovingAverage::<3>::new();
        window.push(1);
        window.push(1);
        assert_eq!(window.output(), 0);
        window.push(2);
        assert_eq!(window.output(), 1);
    }

    #[test]
    fn test_negative_mean_saturates() {
        let mut window = MovingAverage::<2>::new();
        window.push(-40);
        assert_eq!(window.mean(), -20.0);
        assert_eq!(window.output(), 0);
    }
}
