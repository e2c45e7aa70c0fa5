//! Shared state under concurrent access
//!
//! Threads stand in for the edge handler, the periodic tasks and the
//! shell. Every observed mode must be one of the four variants and no
//! edge may be lost.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use kairos_core::config::PriorityConfig;
use kairos_core::control::{execute, ControlPlane, SystemInfo, TaskDetail, TaskReport};
use kairos_core::state::{BlinkMode, SharedState};
use kairos_core::tasks::task_table;

static SHARED: SharedState = SharedState::new(1000, 1000);

fn clock() -> u64 {
    1
}

#[test]
fn test_concurrent_edges_and_reads() {
    const EDGE_THREADS: usize = 4;
    const EDGES_PER_THREAD: usize = 10_000;

    let done = AtomicBool::new(false);
    let tasks = task_table(&PriorityConfig::new());
    let plane = ControlPlane::new(
        &SHARED,
        &tasks,
        SystemInfo {
            heap_bytes: 4096,
            stack_bytes: 8192,
        },
        clock,
    );

    thread::scope(|s| {
        let edges: Vec<_> = (0..EDGE_THREADS)
            .map(|_| {
                s.spawn(|| {
                    for _ in 0..EDGES_PER_THREAD {
                        let next = SHARED.mode.advance();
                        assert!(BlinkMode::ALL.contains(&next));
                    }
                })
            })
            .collect();

        // Filter task publishing telemetry
        s.spawn(|| {
            let mut raw = 0;
            while !done.load(Ordering::Relaxed) {
                SHARED.telemetry.publish_raw(raw);
                SHARED.telemetry.publish_filtered(raw as u32);
                raw = (raw + 1) % 4096;
            }
        });

        // Shell reading
        s.spawn(|| {
            let mut out = String::new();
            execute(&plane, "led 5", &mut out).unwrap();
            while !done.load(Ordering::Relaxed) {
                match plane.task_info(Some("led_task")) {
                    Ok(TaskReport::Detail(TaskDetail::Led { mode, .. })) => {
                        assert!(BlinkMode::ALL.contains(&mode));
                    }
                    other => panic!("unexpected report {:?}", other),
                }
                out.clear();
                execute(&plane, "task_info filter_task", &mut out).unwrap();
                execute(&plane, "led 5", &mut out).unwrap();
            }
        });

        for handle in edges {
            handle.join().unwrap();
        }
        done.store(true, Ordering::Relaxed);
    });

    // A multiple of four edges returns to the start
    assert_eq!((EDGE_THREADS * EDGES_PER_THREAD) % 4, 0);
    assert_eq!(SHARED.mode.load(), BlinkMode::Alternating);
    assert_eq!(SHARED.blink_period_ms(), 5);
}
