//! GATT server exposing a BLE HID mouse.
//!
//! Services:
//! - Device Information (0x180A): manufacturer, model, PnP ID
//! - Battery (0x180F): battery level, readable and notifiable
//! - HID (0x1812): report map, one input report, HID info, control point,
//!   protocol mode

use core::sync::atomic::{AtomicBool, Ordering};

use ble_mouse_cli::config::{DEVICE_MANUFACTURER, DEVICE_NAME};
use ble_mouse_cli::hid::LinkStatus;
use ble_mouse_cli::hid::mouse::{
    MouseReport, MOUSE_REPORT_DESCRIPTOR, MOUSE_REPORT_ID, MOUSE_REPORT_SIZE,
};
use defmt::{debug, info};
use nrf_softdevice::ble::gatt_server::builder::ServiceBuilder;
use nrf_softdevice::ble::gatt_server::characteristic::{Attribute, Metadata, Properties};
use nrf_softdevice::ble::gatt_server::{self, RegisterError, WriteOp};
use nrf_softdevice::ble::{Connection, SecurityMode, Uuid};
use nrf_softdevice::Softdevice;

use crate::error::BleError;

const DEVICE_INFORMATION: Uuid = Uuid::new_16(0x180A);
const BATTERY_SERVICE: Uuid = Uuid::new_16(0x180F);
const HID_SERVICE: Uuid = Uuid::new_16(0x1812);

const MODEL_NUMBER: Uuid = Uuid::new_16(0x2A24);
const MANUFACTURER_NAME: Uuid = Uuid::new_16(0x2A29);
const PNP_ID: Uuid = Uuid::new_16(0x2A50);
const BATTERY_LEVEL: Uuid = Uuid::new_16(0x2A19);
const HID_INFO: Uuid = Uuid::new_16(0x2A4A);
const REPORT_MAP: Uuid = Uuid::new_16(0x2A4B);
const HID_CONTROL_POINT: Uuid = Uuid::new_16(0x2A4C);
const HID_REPORT: Uuid = Uuid::new_16(0x2A4D);
const PROTOCOL_MODE: Uuid = Uuid::new_16(0x2A4E);
const REPORT_REFERENCE: Uuid = Uuid::new_16(0x2908);

/// Report Reference type for an Input report.
const INPUT_REPORT_TYPE: u8 = 1;
/// Protocol Mode value for Report Protocol.
const REPORT_PROTOCOL: u8 = 1;

/// bcdHID 1.11, country 0, flags RemoteWake | NormallyConnectable.
const HID_INFO_VALUE: [u8; 4] = [0x11, 0x01, 0x00, 0x03];
/// Vendor ID source USB-IF, placeholder VID/PID, version 1.0.
const PNP_ID_VALUE: [u8; 7] = [0x02, 0xE5, 0x02, 0x01, 0x00, 0x00, 0x01];

struct DeviceInformationService;

impl DeviceInformationService {
    fn new(sd: &mut Softdevice) -> Result<Self, RegisterError> {
        let mut sb = ServiceBuilder::new(sd, DEVICE_INFORMATION)?;
        add_read_only(&mut sb, MANUFACTURER_NAME, DEVICE_MANUFACTURER.as_bytes())?;
        add_read_only(&mut sb, MODEL_NUMBER, DEVICE_NAME.as_bytes())?;
        add_read_only(&mut sb, PNP_ID, &PNP_ID_VALUE)?;
        let _ = sb.build();
        Ok(Self)
    }
}

fn add_read_only(
    sb: &mut ServiceBuilder,
    uuid: Uuid,
    value: &'static [u8],
) -> Result<(), RegisterError> {
    let attr = Attribute::new(value);
    let md = Metadata::new(Properties::new().read());
    sb.add_characteristic(uuid, attr, md)?.build();
    Ok(())
}

struct BatteryService {
    value_handle: u16,
    cccd_handle: u16,
    notify: AtomicBool,
}

impl BatteryService {
    fn new(sd: &mut Softdevice, level: u8) -> Result<Self, RegisterError> {
        let mut sb = ServiceBuilder::new(sd, BATTERY_SERVICE)?;
        let attr = Attribute::new([level]);
        let md = Metadata::new(Properties::new().read().notify());
        let handles = sb.add_characteristic(BATTERY_LEVEL, attr, md)?.build();
        let _ = sb.build();

        Ok(Self {
            value_handle: handles.value_handle,
            cccd_handle: handles.cccd_handle,
            notify: AtomicBool::new(false),
        })
    }

    fn on_write(&self, handle: u16, data: &[u8]) -> bool {
        if handle == self.cccd_handle && !data.is_empty() {
            let enabled = data[0] & 0x01 != 0;
            self.notify.store(enabled, Ordering::Relaxed);
            info!("Battery notifications: {}", enabled);
            return true;
        }
        false
    }
}

struct HidService {
    input_value_handle: u16,
    input_cccd_handle: u16,
    control_point_handle: u16,
    protocol_mode_handle: u16,
    link: &'static LinkStatus,
}

impl HidService {
    fn new(sd: &mut Softdevice, link: &'static LinkStatus) -> Result<Self, RegisterError> {
        let mut sb = ServiceBuilder::new(sd, HID_SERVICE)?;

        sb.add_characteristic(
            HID_INFO,
            Attribute::new(HID_INFO_VALUE).security(SecurityMode::JustWorks),
            Metadata::new(Properties::new().read()),
        )?
        .build();

        sb.add_characteristic(
            REPORT_MAP,
            Attribute::new(MOUSE_REPORT_DESCRIPTOR).security(SecurityMode::JustWorks),
            Metadata::new(Properties::new().read()),
        )?
        .build();

        let mut input = sb.add_characteristic(
            HID_REPORT,
            Attribute::new([0u8; MOUSE_REPORT_SIZE]).security(SecurityMode::JustWorks),
            Metadata::new(Properties::new().read().notify()),
        )?;
        input.add_descriptor(
            REPORT_REFERENCE,
            Attribute::new([MOUSE_REPORT_ID, INPUT_REPORT_TYPE]).security(SecurityMode::JustWorks),
        )?;
        let input = input.build();

        let control_point = sb
            .add_characteristic(
                HID_CONTROL_POINT,
                Attribute::new([0u8]).security(SecurityMode::JustWorks),
                Metadata::new(Properties::new().write_without_response()),
            )?
            .build();

        let protocol_mode = sb
            .add_characteristic(
                PROTOCOL_MODE,
                Attribute::new([REPORT_PROTOCOL]).security(SecurityMode::JustWorks),
                Metadata::new(Properties::new().read().write_without_response()),
            )?
            .build();

        let _ = sb.build();

        Ok(Self {
            input_value_handle: input.value_handle,
            input_cccd_handle: input.cccd_handle,
            control_point_handle: control_point.value_handle,
            protocol_mode_handle: protocol_mode.value_handle,
            link,
        })
    }

    fn on_write(&self, handle: u16, data: &[u8]) -> bool {
        let Some(&first) = data.first() else {
            return false;
        };
        if handle == self.input_cccd_handle {
            let enabled = first & 0x01 != 0;
            self.link.set_subscribed(enabled);
            info!("Mouse report notifications: {}", enabled);
        } else if handle == self.control_point_handle {
            // 0x00 = Suspend, 0x01 = Exit Suspend
            debug!("HID control point: {}", first);
        } else if handle == self.protocol_mode_handle {
            debug!("HID protocol mode: {}", first);
        } else {
            return false;
        }
        true
    }
}

/// Mouse GATT server: DIS + BAS + HID.
pub struct MouseServer {
    _dis: DeviceInformationService,
    bas: BatteryService,
    hid: HidService,
}

impl MouseServer {
    /// Register all services. Must run before the SoftDevice task starts.
    pub fn new(sd: &mut Softdevice, link: &'static LinkStatus) -> Result<Self, RegisterError> {
        let dis = DeviceInformationService::new(sd)?;
        let bas = BatteryService::new(sd, link.battery())?;
        let hid = HidService::new(sd, link)?;
        Ok(Self {
            _dis: dis,
            bas,
            hid,
        })
    }

    /// Clear the battery subscription; the HID one lives in [`LinkStatus`].
    pub fn reset_subscriptions(&self) {
        self.bas.notify.store(false, Ordering::Relaxed);
    }

    /// Send one input report. Fails while the host is unsubscribed.
    pub fn notify_report(&self, conn: &Connection, report: &MouseReport) -> Result<(), BleError> {
        if !self.hid.link.is_ready() {
            return Err(BleError::NotifyFailed);
        }
        let bytes = report.to_bytes();
        gatt_server::notify_value(conn, self.hid.input_value_handle, &bytes)
            .map_err(|_| BleError::NotifyFailed)
    }

    /// Update the battery level attribute and notify a subscribed host.
    pub fn update_battery(
        &self,
        sd: &Softdevice,
        conn: Option<&Connection>,
        percent: u8,
    ) -> Result<(), BleError> {
        gatt_server::set_value(sd, self.bas.value_handle, &[percent])
            .map_err(|_| BleError::SetValueFailed)?;
        match conn {
            Some(conn) if self.bas.notify.load(Ordering::Relaxed) => {
                gatt_server::notify_value(conn, self.bas.value_handle, &[percent])
                    .map_err(|_| BleError::NotifyFailed)
            }
            _ => Ok(()),
        }
    }
}

impl gatt_server::Server for MouseServer {
    type Event = ();

    fn on_write(
        &self,
        _conn: &Connection,
        handle: u16,
        _op: WriteOp,
        _offset: usize,
        data: &[u8],
    ) -> Option<Self::Event> {
        if !self.hid.on_write(handle, data) && !self.bas.on_write(handle, data) {
            debug!("Unhandled GATT write on handle {}", handle);
        }
        None
    }
}
