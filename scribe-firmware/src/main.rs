//! Scribe - serial-to-character-display relay firmware
//!
//! Bytes received on UART0 are rendered on a 16x2 SPI character LCD, with
//! the running byte count on the second row. The report button sends the
//! count back over the UART; the reset button clears it.
//!
//! Board wiring (Raspberry Pi Pico):
//!
//! | Function      | Pin    |
//! |---------------|--------|
//! | UART0 TX / RX | GPIO0 / GPIO1 |
//! | LCD SCK / SDO | GPIO18 / GPIO19 |
//! | Report button | GPIO14 (active low) |
//! | Reset button  | GPIO15 (active low) |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::spi::{Config as SpiConfig, Spi};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use scribe_core::config::BoardConfig;
use scribe_core::console::Console;
use scribe_core::control::ControlLoop;
use scribe_core::guard::GuardedEdgeInput;
use scribe_core::queue::ByteQueue;
use scribe_core::timer::PeriodicTimer;
use scribe_core::outbox::QueuedSerial;
use scribe_hal_rp2040::{ButtonEdge, SignalLatch, SpiLcd, TickCountdown};

mod channels;
mod tasks;

/// Receive queue capacity
pub const QUEUE_CAPACITY: usize = scribe_core::queue::DEFAULT_CAPACITY;

/// LCD SPI clock
const LCD_SPI_HZ: u32 = 1_000_000;

/// Embedded board configuration (compiled into firmware)
/// Edit board.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../board.toml");

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

static QUEUE: StaticCell<ByteQueue<QUEUE_CAPACITY>> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Scribe firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();

    // UART: receiver feeds the queue, transmitter drains the outbox
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = config.serial.baudrate;

    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 64]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    let serial = QueuedSerial::new(&channels::SERIAL_TX);

    info!("UART initialized at {} baud", config.serial.baudrate);

    // LCD on SPI0, transmit only
    let mut spi_config = SpiConfig::default();
    spi_config.frequency = LCD_SPI_HZ;
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config);
    let lcd = SpiLcd::new(spi, config.display.columns);
    let console = Console::new(lcd, config.display, config.console.label.clone());

    // Receive queue, split between the RX task and the control loop
    let queue = QUEUE.init(ByteQueue::new(config.queue.overflow));
    let (producer, consumer) = queue.split();
    let tally = consumer.tally();

    let timer = || PeriodicTimer::new(TickCountdown::new(config.timer.clock_hz), config.timer.clone());

    let ctl = ControlLoop::new(
        consumer,
        console,
        serial.clone(),
        SignalLatch::new(&channels::RESET_REQUEST),
        timer(),
        timer(),
        &config,
    );

    // Buttons
    let report_pin = Input::new(p.PIN_14, Pull::Up);
    let reset_pin = Input::new(p.PIN_15, Pull::Up);
    let report_button =
        GuardedEdgeInput::new(ButtonEdge::new(report_pin), timer(), config.timing.guard_ms);

    info!("Buttons initialized");

    // Spawn tasks
    spawner.spawn(tasks::uart_rx_task(rx, producer)).unwrap();
    spawner.spawn(tasks::uart_tx_task(tx)).unwrap();
    spawner.spawn(tasks::control_task(ctl)).unwrap();
    spawner
        .spawn(tasks::report_button_task(report_button, tally, serial))
        .unwrap();
    spawner.spawn(tasks::reset_button_task(reset_pin)).unwrap();

    info!("All tasks spawned, firmware running");
}

/// Parse the embedded board configuration
///
/// Falls back to the built-in defaults if the file does not parse or
/// validate.
fn load_config() -> BoardConfig {
    match BoardConfig::from_toml(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Board config: timer {} Hz, period {} ms, workload {} ms, guard {} ms, overflow {}",
                config.timer.clock_hz,
                config.timing.period_ms,
                config.timing.workload_ms,
                config.timing.guard_ms,
                config.queue.overflow
            );
            config
        }
        Err(e) => {
            error!("Invalid board config: {:?}, using defaults", e);
            BoardConfig::default()
        }
    }
}
