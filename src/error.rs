//! Firmware error type for ble-mouse-cli.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.
//! Command-level errors live in `ble_mouse_cli::cli::CliError`.

use defmt::Format;
use nrf_softdevice::ble::gatt_server::RegisterError;
use nrf_softdevice::ble::peripheral::AdvertiseError;

/// Top-level error type used across the firmware.
#[derive(Debug, Format)]
pub enum Error {
    // BLE
    /// The SoftDevice returned a BLE-level error.
    Ble(BleError),

    // Serial
    /// UARTE read or write failed.
    Serial,
}

/// Subset of BLE errors we propagate (keeps the enum `Copy`-friendly).
#[derive(Debug, Clone, Copy, Format)]
pub enum BleError {
    /// GATT service or characteristic registration failed.
    RegisterFailed,
    /// Advertising could not start or timed out.
    AdvertiseFailed,
    /// Notification could not be queued (CCCD off or buffers full).
    NotifyFailed,
    /// Attribute value could not be updated.
    SetValueFailed,
}

// Convenience conversions

impl From<BleError> for Error {
    fn from(e: BleError) -> Self {
        Error::Ble(e)
    }
}

impl From<RegisterError> for Error {
    fn from(_: RegisterError) -> Self {
        Error::Ble(BleError::RegisterFailed)
    }
}

impl From<AdvertiseError> for Error {
    fn from(_: AdvertiseError) -> Self {
        Error::Ble(BleError::AdvertiseFailed)
    }
}
