//! Property-based tests for the filter window, mode cycle and command
//! validation.

use kairos_core::config::{PriorityConfig, FILTER_WINDOW_LEN};
use kairos_core::control::{ControlPlane, SystemInfo};
use kairos_core::filter::MovingAverage;
use kairos_core::state::{BlinkMode, ModeCell, SharedState};
use kairos_core::tasks::task_table;
use proptest::prelude::*;

const SYSTEM: SystemInfo = SystemInfo {
    heap_bytes: 4096,
    stack_bytes: 8192,
};

fn clock() -> u64 {
    0
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(256))]

    /// A full window averages exactly the last N samples.
    #[test]
    fn prop_full_window_mean(samples in proptest::collection::vec(0i32..4096, FILTER_WINDOW_LEN)) {
        let mut window = MovingAverage::<FILTER_WINDOW_LEN>::new();
        for &s in &samples {
            window.push(s);
        }
        let sum: i64 = samples.iter().map(|&s| s as i64).sum();
        prop_assert_eq!(window.sum(), sum);
        prop_assert_eq!(window.output(), (sum / FILTER_WINDOW_LEN as i64) as u32);
    }

    /// Inserting sample N+1 evicts the first and the mean tracks v2..v(N+1).
    #[test]
    fn prop_overflow_evicts_oldest(samples in proptest::collection::vec(0i32..4096, FILTER_WINDOW_LEN + 1)) {
        let mut window = MovingAverage::<FILTER_WINDOW_LEN>::new();
        let mut evicted = 0;
        for &s in &samples {
            evicted = window.push(s);
        }
        prop_assert_eq!(evicted, samples[0]);
        let tail: Vec<i32> = samples[1..].to_vec();
        prop_assert_eq!(window.iter().collect::<Vec<_>>(), tail.clone());
        let sum: i64 = tail.iter().map(|&s| s as i64).sum();
        prop_assert_eq!(window.sum(), sum);
    }

    /// Four edges from any mode return to that mode.
    #[test]
    fn prop_four_advances_are_identity(start in 0u8..4, edges in 0usize..64) {
        let cell = ModeCell::new(BlinkMode::from_bits(start));
        for _ in 0..edges * 4 {
            cell.advance();
        }
        prop_assert_eq!(cell.load(), BlinkMode::from_bits(start));
    }

    /// Any positive period set from the shell is reported back exactly.
    #[test]
    fn prop_blink_period_roundtrip(period in 1u32..=u32::MAX) {
        let shared = SharedState::new(1000, 1000);
        let tasks = task_table(&PriorityConfig::new());
        let plane = ControlPlane::new(&shared, &tasks, SYSTEM, clock);

        let text = period.to_string();
        prop_assert_eq!(plane.set_blink_period(&text), Ok(period));
        prop_assert_eq!(shared.blink_period_ms(), period);
    }

    /// Every accepted frequency stores floor(1e6 / f).
    #[test]
    fn prop_sample_rate_period(hz in 1u32..=100_000) {
        let shared = SharedState::new(1000, 1000);
        let tasks = task_table(&PriorityConfig::new());
        let plane = ControlPlane::new(&shared, &tasks, SYSTEM, clock);

        plane.set_sample_rate(&hz.to_string()).unwrap();
        prop_assert_eq!(shared.sample_period_us(), 1_000_000 / hz);
    }

    /// Text with anything but digits never changes the blink period.
    #[test]
    fn prop_non_numeric_rejected(text in "[^0-9]{1,12}|[0-9]*[^0-9]+[0-9]*") {
        let shared = SharedState::new(1000, 1000);
        let tasks = task_table(&PriorityConfig::new());
        let plane = ControlPlane::new(&shared, &tasks, SYSTEM, clock);

        prop_assert!(plane.set_blink_period(&text).is_err());
        prop_assert_eq!(shared.blink_period_ms(), 1000);
    }
}
