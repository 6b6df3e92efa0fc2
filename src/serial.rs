//! UART console - drives [`Cli`] from a buffered UARTE.
//!
//! The nRF52840-DK routes UARTE0 to the J-Link virtual COM port
//! (TX = P0.06, RX = P0.08). The task reads whatever is available and
//! feeds it through the CLI one line at a time, flushing what the CLI
//! printed after each line.

use ble_mouse_cli::cli::OutputBuffer;
use ble_mouse_cli::config::{CliConfig, DEFAULT_BAUD_RATE, OUTPUT_BUFFER_LEN, SERIAL_READ_CHUNK};
use ble_mouse_cli::Cli;
use defmt::{info, warn};
use embassy_futures::yield_now;
use embassy_nrf::buffered_uarte::{self, BufferedUarte};
use embassy_nrf::interrupt::{self, InterruptExt, Priority};
use embassy_nrf::uarte::{self, Baudrate};
use embassy_nrf::{bind_interrupts, peripherals};
use embedded_io_async::{Read, Write};
use static_cell::StaticCell;

use crate::ble::mouse::BleMouse;
use crate::error::Error;

bind_interrupts!(struct Irqs {
    UARTE0_UART0 => buffered_uarte::InterruptHandler<peripherals::UARTE0>;
});

const RX_BUFFER_LEN: usize = 256;
const TX_BUFFER_LEN: usize = 1024;

static RX_BUFFER: StaticCell<[u8; RX_BUFFER_LEN]> = StaticCell::new();
static TX_BUFFER: StaticCell<[u8; TX_BUFFER_LEN]> = StaticCell::new();

/// UARTE0 with TIMER1 counting received bytes (TIMER0 belongs to the SoftDevice).
pub type SerialPort = BufferedUarte<'static, peripherals::UARTE0, peripherals::TIMER1>;

/// Map a baud rate to the UARTE setting. Unsupported rates fall back to
/// [`DEFAULT_BAUD_RATE`].
fn baudrate(rate: u32) -> Baudrate {
    match rate {
        9_600 => Baudrate::BAUD9600,
        19_200 => Baudrate::BAUD19200,
        38_400 => Baudrate::BAUD38400,
        57_600 => Baudrate::BAUD57600,
        115_200 => Baudrate::BAUD115200,
        230_400 => Baudrate::BAUD230400,
        460_800 => Baudrate::BAUD460800,
        921_600 => Baudrate::BAUD921600,
        1_000_000 => Baudrate::BAUD1M,
        other => {
            warn!("Unsupported baud rate {}, using {}", other, DEFAULT_BAUD_RATE);
            Baudrate::BAUD115200
        }
    }
}

/// Initialise UARTE0 as a buffered serial port.
///
/// Must be called exactly once.  The ring buffers are consumed here.
#[allow(clippy::too_many_arguments)]
pub fn init(
    uarte: peripherals::UARTE0,
    timer: peripherals::TIMER1,
    ppi_ch1: peripherals::PPI_CH0,
    ppi_ch2: peripherals::PPI_CH1,
    ppi_group: peripherals::PPI_GROUP0,
    rxd: peripherals::P0_08,
    txd: peripherals::P0_06,
    baud_rate: u32,
) -> SerialPort {
    // Priorities 0, 1 and 4 are reserved by the SoftDevice.
    interrupt::UARTE0_UART0.set_priority(Priority::P3);

    let mut config = uarte::Config::default();
    config.parity = uarte::Parity::EXCLUDED;
    config.baudrate = baudrate(baud_rate);

    let rx_buffer = RX_BUFFER.init([0u8; RX_BUFFER_LEN]);
    let tx_buffer = TX_BUFFER.init([0u8; TX_BUFFER_LEN]);

    info!("UART console at {} baud", baud_rate);
    BufferedUarte::new(
        uarte, timer, ppi_ch1, ppi_ch2, ppi_group, Irqs, rxd, txd, config, rx_buffer, tx_buffer,
    )
}

async fn flush(port: &mut SerialPort, out: &mut OutputBuffer<OUTPUT_BUFFER_LEN>) -> Result<(), Error> {
    if out.is_truncated() {
        warn!("CLI output truncated to {} bytes", OUTPUT_BUFFER_LEN);
    }
    let result = if out.is_empty() {
        Ok(())
    } else {
        port.write_all(out.as_bytes())
            .await
            .map_err(|_| Error::Serial)
    };
    out.clear();
    result
}

/// Console loop. Never returns.
pub async fn run(mut port: SerialPort, mouse: BleMouse, config: CliConfig) -> ! {
    let mut cli = Cli::new(mouse, &config);
    let mut out: OutputBuffer<OUTPUT_BUFFER_LEN> = OutputBuffer::new();
    let mut chunk = [0u8; SERIAL_READ_CHUNK];

    cli.begin(&mut out);
    if let Err(e) = flush(&mut port, &mut out).await {
        warn!("Banner write failed: {}", e);
    }

    loop {
        let n = match port.read(&mut chunk).await {
            Ok(n) => n,
            Err(_) => {
                warn!("UART read failed");
                0
            }
        };

        // One line at a time, letting the BLE task drain between lines.
        let mut offset = 0;
        while offset < n {
            cli.mouse().ready().await;
            offset += cli.poll_line(&chunk[offset..n], &mut out);
            if let Err(e) = flush(&mut port, &mut out).await {
                warn!("UART write failed: {}", e);
            }
        }
        yield_now().await;
    }
}
