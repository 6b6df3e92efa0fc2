//! Application-wide constants and compile-time configuration.
//!
//! Device identity, input limits, argument ranges, and BLE timing
//! parameters live here so they can be tuned in one place.

// Device identity

/// Name advertised over BLE and reported by `status`.
pub const DEVICE_NAME: &str = "BLE Mouse CLI";

/// Manufacturer string (Device Information Service + `status`).
pub const DEVICE_MANUFACTURER: &str = "ble-mouse-cli";

/// Battery level reported before any `battery` command.
pub const DEFAULT_BATTERY_LEVEL: u8 = 100;

// Serial console

/// UART baud rate used when none is configured.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Echo received commands back to the terminal by default.
pub const DEFAULT_ECHO: bool = true;

/// Longest command line accepted (characters, terminator excluded).
/// Longer input is discarded and reported.
pub const LINE_MAX_LEN: usize = 128;

/// Capacity of the per-poll output buffer (bytes, after CRLF expansion).
/// Sized for the full `help` text.
pub const OUTPUT_BUFFER_LEN: usize = 2048;

/// Size of one UART read chunk.
pub const SERIAL_READ_CHUNK: usize = 64;

// Argument ranges

/// Movement and scroll axes are signed 8-bit HID fields.
pub const AXIS_MIN: i32 = -127;
pub const AXIS_MAX: i32 = 127;

/// Battery level is a percentage.
pub const BATTERY_MIN: i32 = 0;
pub const BATTERY_MAX: i32 = 100;

// BLE

/// Depth of the CLI → BLE report queue.
pub const REPORT_QUEUE_DEPTH: usize = 8;

/// Most reports a single command queues (`click` = press + release).
pub const REPORTS_PER_COMMAND: usize = 2;

/// BLE connection interval range (in 1.25 ms units).
/// 6 = 7.5 ms (lowest latency for HID).
pub const BLE_CONN_INTERVAL_MIN: u16 = 6;
pub const BLE_CONN_INTERVAL_MAX: u16 = 12;

/// BLE slave latency (number of connection events the peripheral can skip).
pub const BLE_SLAVE_LATENCY: u16 = 0;

/// BLE supervision timeout (in 10 ms units). 400 = 4 s.
pub const BLE_SUP_TIMEOUT: u16 = 400;

/// Advertising interval (in 0.625 ms units). 50 = 31.25 ms.
pub const BLE_ADV_INTERVAL: u32 = 50;

/// Runtime configuration handed to [`crate::cli::Cli::new`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CliConfig {
    /// Initial echo mode.
    pub echo: bool,
    /// Serial baud rate (consumed by the UART driver, not the CLI).
    pub baud_rate: u32,
}

impl CliConfig {
    pub const fn new() -> Self {
        Self {
            echo: DEFAULT_ECHO,
            baud_rate: DEFAULT_BAUD_RATE,
        }
    }

    pub const fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub const fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self::new()
    }
}
