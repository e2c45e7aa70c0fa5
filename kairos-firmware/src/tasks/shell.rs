//! Serial command shell
//!
//! Runs on the thread-mode executor, below every real-time task. Prints
//! the banner and help once the host has had time to attach, then reads
//! lines and dispatches them to the control plane. Each executed line
//! counts as one cycle of `shell_task`; time spent waiting for input or
//! on the UART is not busy time.

use alloc::string::String;

use defmt::*;
use embassy_rp::uart::BufferedUart;
use embassy_time::{Instant, Timer};
use embedded_io_async::{Read, Write};

use kairos_core::control::{execute, write_help, ControlPlane, Edit, LineBuffer};
use kairos_core::tasks::{TaskId, TaskStats};

use crate::shared::SHARED;

/// Delay before the banner, so a terminal opened at reset sees it
const BANNER_DELAY_SECS: u64 = 2;

/// Initial reply buffer capacity (bytes)
const REPLY_CAPACITY: usize = 1024;

const PROMPT: &str = "kairos> ";

#[embassy_executor::task]
pub async fn shell_task(mut uart: BufferedUart, plane: ControlPlane<'static>) {
    info!("Shell task started");
    let stats = SHARED.stats(TaskId::Shell);

    Timer::after_secs(BANNER_DELAY_SECS).await;

    // Allocated once, cleared per command
    let mut reply = String::with_capacity(REPLY_CAPACITY);

    reply.push('\n');
    reply.push_str("=== Kairos real-time controller started ===\n");
    reply.push_str("Type 'help' to list the available commands\n");
    reply.push_str("===========================================\n\n");
    let started = begin(stats);
    if let Err(e) = write_help(&plane, &mut reply) {
        warn!("Help listing failed: {}", e);
    }
    stats.end_cycle(started.elapsed().as_micros());
    reply.push_str(PROMPT);
    send(&mut uart, &reply).await;

    let mut line = LineBuffer::new();
    let mut rx = [0u8; 16];

    loop {
        let n = match uart.read(&mut rx).await {
            Ok(n) => n,
            Err(e) => {
                warn!("Shell read error: {}", e);
                continue;
            }
        };

        for &byte in &rx[..n] {
            match line.feed(byte) {
                Edit::Insert(b) => {
                    write_raw(&mut uart, &[b]).await;
                }
                Edit::Erase => {
                    write_raw(&mut uart, b"\x08 \x08").await;
                }
                Edit::Ignore => {}
                Edit::Submit => {
                    reply.clear();
                    reply.push('\n');
                    let started = begin(stats);
                    run_line(&plane, line.as_str(), &mut reply);
                    stats.end_cycle(started.elapsed().as_micros());
                    reply.push_str(PROMPT);
                    send(&mut uart, &reply).await;
                    line.clear();
                }
            }
        }
    }
}

/// Start a cycle; the shell is never suspended
fn begin(stats: &TaskStats) -> Instant {
    stats.begin_cycle();
    Instant::now()
}

fn run_line(plane: &ControlPlane<'static>, text: &str, reply: &mut String) {
    use core::fmt::Write as _;

    if let Err(e) = execute(plane, text, reply) {
        debug!("Command '{}' failed: {}", text, e);
        // String writes cannot fail
        let _ = writeln!(reply, "error: {} ({})", e, e.status());
    }
}

/// Write text with LF expanded to CR LF
async fn send(uart: &mut BufferedUart, text: &str) {
    for (i, segment) in text.split('\n').enumerate() {
        if i > 0 && !write_raw(uart, b"\r\n").await {
            return;
        }
        if !write_raw(uart, segment.as_bytes()).await {
            return;
        }
    }
}

/// Returns false if the write failed
async fn write_raw(uart: &mut BufferedUart, bytes: &[u8]) -> bool {
    match uart.write_all(bytes).await {
        Ok(()) => true,
        Err(e) => {
            warn!("Shell write error: {}", e);
            false
        }
    }
}
