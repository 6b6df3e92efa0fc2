//! Advertising and connection handling for the mouse peripheral.
//!
//! One host at a time. Each cycle:
//! 1. Advertise connectable + scannable with the HID appearance.
//! 2. On connect, request the configured connection parameters, sync the
//!    battery level and mark the link connected. Mouse actions are
//!    accepted once the host subscribes to input reports.
//! 3. Run the GATT server and forward queued reports until disconnect.

use core::cell::RefCell;

use ble_mouse_cli::config::{
    BLE_ADV_INTERVAL, BLE_CONN_INTERVAL_MAX, BLE_CONN_INTERVAL_MIN, BLE_SLAVE_LATENCY,
    BLE_SUP_TIMEOUT, DEVICE_NAME, REPORT_QUEUE_DEPTH,
};
use ble_mouse_cli::hid::MouseReport;
use defmt::{info, warn};
use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Receiver;
use embassy_time::{Duration, Timer};
use nrf_softdevice::ble::advertisement_builder::{
    AdvertisementDataType, Flag, LegacyAdvertisementBuilder, LegacyAdvertisementPayload,
    ServiceList, ServiceUuid16,
};
use nrf_softdevice::ble::security::{IoCapabilities, SecurityHandler};
use nrf_softdevice::ble::{
    gatt_server, peripheral, Connection, EncryptionInfo, IdentityKey, MasterId, SecurityMode,
};
use nrf_softdevice::{raw, Softdevice};
use static_cell::StaticCell;

use crate::ble::server::MouseServer;
use crate::ble::LinkState;
use crate::error::Error;

pub type ReportReceiver =
    Receiver<'static, CriticalSectionRawMutex, MouseReport, REPORT_QUEUE_DEPTH>;

/// Back-off after a failed advertising attempt.
const ADVERTISE_RETRY_DELAY: Duration = Duration::from_secs(1);

/// GAP appearance: HID Mouse (0x03C2), little-endian.
const APPEARANCE_MOUSE: [u8; 2] = [0xC2, 0x03];

static ADV_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
    .flags(&[Flag::GeneralDiscovery, Flag::LE_Only])
    .services_16(
        ServiceList::Incomplete,
        &[ServiceUuid16::HUMAN_INTERFACE_DEVICE, ServiceUuid16::BATTERY],
    )
    .raw(AdvertisementDataType::APPEARANCE, &APPEARANCE_MOUSE)
    .build();

static SCAN_DATA: LegacyAdvertisementPayload =
    LegacyAdvertisementBuilder::new().full_name(DEVICE_NAME).build();

/// Bond kept in RAM only; a reset forgets the host.
struct PeerBond {
    master_id: MasterId,
    key: EncryptionInfo,
    peer_id: IdentityKey,
}

/// Just Works pairing with a single in-memory bond.
struct Bonder {
    peer: RefCell<Option<PeerBond>>,
}

impl Bonder {
    fn new() -> Self {
        Self {
            peer: RefCell::new(None),
        }
    }
}

impl SecurityHandler for Bonder {
    fn io_capabilities(&self) -> IoCapabilities {
        IoCapabilities::None
    }

    fn can_bond(&self, _conn: &Connection) -> bool {
        true
    }

    fn on_bonded(
        &self,
        conn: &Connection,
        master_id: MasterId,
        key: EncryptionInfo,
        peer_id: IdentityKey,
    ) {
        info!("Bonded with {}", conn.peer_address());
        self.peer.replace(Some(PeerBond {
            master_id,
            key,
            peer_id,
        }));
    }

    fn get_key(&self, conn: &Connection, master_id: MasterId) -> Option<EncryptionInfo> {
        self.peer.borrow().as_ref().and_then(|p| {
            (p.master_id == master_id && p.peer_id.is_match(conn.peer_address())).then_some(p.key)
        })
    }

    fn on_security_update(&self, _conn: &Connection, mode: SecurityMode) {
        info!("BLE security mode updated: {}", mode);
    }
}

fn bonder() -> &'static Bonder {
    static BONDER: StaticCell<Bonder> = StaticCell::new();
    BONDER.init(Bonder::new())
}

async fn advertise(sd: &Softdevice, bonder: &'static Bonder) -> Result<Connection, Error> {
    let config = peripheral::Config {
        interval: BLE_ADV_INTERVAL,
        ..Default::default()
    };
    let adv = peripheral::ConnectableAdvertisement::ScannableUndirected {
        adv_data: &ADV_DATA,
        scan_data: &SCAN_DATA,
    };
    let conn = peripheral::advertise_pairable(sd, adv, &config, bonder).await?;
    Ok(conn)
}

fn request_conn_params(conn: &Connection) {
    let params = raw::ble_gap_conn_params_t {
        min_conn_interval: BLE_CONN_INTERVAL_MIN,
        max_conn_interval: BLE_CONN_INTERVAL_MAX,
        slave_latency: BLE_SLAVE_LATENCY,
        conn_sup_timeout: BLE_SUP_TIMEOUT,
    };
    if let Err(e) = conn.set_conn_params(params) {
        warn!("Connection parameter request failed: {}", e);
    }
}

/// Forward queued reports and battery changes to the connected host.
async fn forward(
    sd: &Softdevice,
    conn: &Connection,
    server: &MouseServer,
    link: &LinkState,
    reports: &ReportReceiver,
) -> ! {
    loop {
        match select(reports.receive(), link.battery_changed()).await {
            Either::First(report) => {
                if let Err(e) = server.notify_report(conn, &report) {
                    warn!("Mouse report not sent: {}", e);
                }
            }
            Either::Second(percent) => {
                if let Err(e) = server.update_battery(sd, Some(conn), percent) {
                    warn!("Battery update not sent: {}", e);
                }
            }
        }
    }
}

/// Advertise, serve one host, repeat. Never returns.
pub async fn run(
    sd: &'static Softdevice,
    server: &'static MouseServer,
    link: &'static LinkState,
    reports: ReportReceiver,
) -> ! {
    let bonder = bonder();

    loop {
        info!("Advertising as \"{}\"", DEVICE_NAME);
        let conn = match advertise(sd, bonder).await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("Advertising failed: {}", e);
                Timer::after(ADVERTISE_RETRY_DELAY).await;
                continue;
            }
        };

        info!("Host connected: {}", conn.peer_address());
        request_conn_params(&conn);
        if let Err(e) = server.update_battery(sd, None, link.status().battery()) {
            warn!("Battery sync failed: {}", e);
        }
        // Mouse actions stay refused until the host subscribes to reports.
        link.status().on_connect();

        // `forward` never returns, so this only ends on disconnect.
        let _ = select(
            gatt_server::run(&conn, server, |_| {}),
            forward(sd, &conn, server, link, &reports),
        )
        .await;

        info!("Host disconnected");
        link.status().on_disconnect();
        server.reset_subscriptions();
        while reports.try_receive().is_ok() {}
    }
}
