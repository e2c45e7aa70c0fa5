//! Kairos - Dual-Task Real-Time Controller Firmware
//!
//! Main firmware binary for RP2040 boards. Runs a hard real-time
//! ADC -> moving average -> PWM output loop, a soft real-time LED blink
//! pattern switched by a button, and a serial command shell.
//!
//! Executors, highest priority first:
//!
//! | Executor        | Runs          | NVIC level           |
//! |-----------------|---------------|----------------------|
//! | SWI_IRQ_0       | button_task   | `priorities.edge`    |
//! | SWI_IRQ_1       | filter_task   | `priorities.filter`  |
//! | SWI_IRQ_2       | led_task      | `priorities.led`     |
//! | thread mode     | shell_task    | -                    |

#![no_std]
#![no_main]

extern crate alloc;

use core::cell::RefCell;

use cortex_m_rt::entry;
use defmt::*;
use embassy_executor::{Executor, InterruptExecutor};
use embassy_rp::adc::{Adc, Channel as AdcInput, Config as AdcConfig};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::Instant;
use embedded_alloc::LlffHeap as Heap;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use kairos_core::blink::LinePair;
use kairos_core::config::FILTER_WINDOW_LEN;
use kairos_core::control::{ControlPlane, SystemInfo};
use kairos_drivers::{AdcCalibration, LedLine};
use kairos_hal_rp2040::{AdcChannel, PwmOutput, RpAdcBank};

use crate::config::CONTROLLER;
use crate::shared::{SharedLines, TASKS};

mod config;
mod shared;
mod tasks;

#[global_allocator]
static HEAP: Heap = Heap::empty();

/// Heap size from controller.toml
const HEAP_SIZE: usize = CONTROLLER.system.heap_bytes as usize;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

static EXECUTOR_EDGE: InterruptExecutor = InterruptExecutor::new();
static EXECUTOR_FILTER: InterruptExecutor = InterruptExecutor::new();
static EXECUTOR_LED: InterruptExecutor = InterruptExecutor::new();
static EXECUTOR_SHELL: StaticCell<Executor> = StaticCell::new();

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 512]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

static LINES: StaticCell<SharedLines> = StaticCell::new();

#[interrupt]
unsafe fn SWI_IRQ_0() {
    EXECUTOR_EDGE.on_interrupt()
}

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_FILTER.on_interrupt()
}

#[interrupt]
unsafe fn SWI_IRQ_2() {
    EXECUTOR_LED.on_interrupt()
}

#[entry]
fn main() -> ! {
    info!("Kairos firmware starting...");

    init_heap();

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Both LEDs start lit; the LED task puts them out of phase
    let lines = LINES.init(Mutex::new(RefCell::new(LinePair::new(
        LedLine::new_active_high(Output::new(p.PIN_25, Level::High)),
        LedLine::new_active_high(Output::new(p.PIN_15, Level::High)),
    ))));
    let lines: &'static SharedLines = lines;

    let button = Input::new(p.PIN_14, Pull::Down);

    let sampling = &CONTROLLER.sampling;
    let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
    let inputs = RpAdcBank::new(
        adc,
        [AdcInput::new_pin(p.PIN_26, Pull::None)],
        [AdcChannel::Adc0],
        sampling.adc_resolution_bits,
        sampling.adc_reference_mv,
        sampling.differential,
    );
    let pwm = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_16, PwmConfig::default());
    let output = PwmOutput::new(pwm, sampling.dac_resolution_bits);
    let calibration = AdcCalibration::from_config(sampling);
    info!(
        "Filter: ADC0 -> PWM0A at {} Hz, {} sample window",
        sampling.rate_hz(),
        FILTER_WINDOW_LEN
    );

    let tx_buf = TX_BUF.init([0u8; 512]);
    let rx_buf = RX_BUF.init([0u8; 64]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, UartConfig::default());
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    info!("Shell UART initialized");

    let priorities = &CONTROLLER.priorities;

    interrupt::SWI_IRQ_0.set_priority(nvic_priority(priorities.edge));
    let spawner = EXECUTOR_EDGE.start(interrupt::SWI_IRQ_0);
    spawner.spawn(unwrap!(tasks::button_task(
        button,
        lines,
        CONTROLLER.blink.debounce_ms
    )));

    interrupt::SWI_IRQ_1.set_priority(nvic_priority(priorities.filter));
    let spawner = EXECUTOR_FILTER.start(interrupt::SWI_IRQ_1);
    spawner.spawn(unwrap!(tasks::filter_task(inputs, output, calibration)));

    interrupt::SWI_IRQ_2.set_priority(nvic_priority(priorities.led));
    let spawner = EXECUTOR_LED.start(interrupt::SWI_IRQ_2);
    spawner.spawn(unwrap!(tasks::led_task(lines)));

    let plane = ControlPlane::new(
        &shared::SHARED,
        &TASKS,
        SystemInfo {
            heap_bytes: CONTROLLER.system.heap_bytes,
            stack_bytes: main_stack_bytes(),
        },
        uptime_us,
    );

    info!("All tasks spawned, entering shell");

    let executor = EXECUTOR_SHELL.init(Executor::new());
    executor.run(|spawner| {
        spawner.spawn(unwrap!(tasks::shell_task(uart, plane)));
    })
}

fn init_heap() {
    use core::mem::MaybeUninit;
    static mut HEAP_MEM: [MaybeUninit<u8>; HEAP_SIZE] = [MaybeUninit::uninit(); HEAP_SIZE];
    #[allow(static_mut_refs)]
    unsafe {
        HEAP.init(HEAP_MEM.as_ptr() as usize, HEAP_SIZE)
    }
}

/// Map a validated 0..=3 level onto the RP2040's two priority bits
fn nvic_priority(level: u8) -> Priority {
    match level {
        0 => Priority::P0,
        1 => Priority::P1,
        2 => Priority::P2,
        _ => Priority::P3,
    }
}

fn uptime_us() -> u64 {
    Instant::now().as_micros()
}

/// Space between the end of static data and the top of RAM
///
/// Every executor runs on this one stack; embassy tasks have no stack of
/// their own.
fn main_stack_bytes() -> u32 {
    extern "C" {
        static _stack_start: u32;
        static __sheap: u32;
    }
    // Linker symbols; only their addresses are taken
    let (top, bottom) = unsafe {
        (
            core::ptr::addr_of!(_stack_start) as usize,
            core::ptr::addr_of!(__sheap) as usize,
        )
    };
    top.saturating_sub(bottom) as u32
}
