//! ble-mouse-cli - nRF52840 BLE HID mouse driven from a serial terminal.
//!
//! Tasks:
//! - `softdevice_task` runs the S140 event loop
//! - `ble_task` advertises, serves one host and sends queued reports
//! - `cli_task` reads the UART, dispatches commands, and prints feedback
//!
//! The CLI task talks to the BLE task only through `LINK` and `REPORTS`.

#![no_std]
#![no_main]

mod ble;
mod error;
mod serial;

use core::mem;

use ble_mouse_cli::config::{CliConfig, DEVICE_NAME};
use defmt::{info, unwrap};
use embassy_executor::Spawner;
use embassy_nrf::interrupt::Priority;
use embassy_sync::channel::Channel;
use nrf_softdevice::{raw, Softdevice};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use crate::ble::mouse::BleMouse;
use crate::ble::server::MouseServer;
use crate::ble::{LinkState, ReportChannel};
use crate::error::Error;

static LINK: LinkState = LinkState::new();
static REPORTS: ReportChannel = Channel::new();
static SERVER: StaticCell<MouseServer> = StaticCell::new();

#[embassy_executor::task]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

#[embassy_executor::task]
async fn ble_task(sd: &'static Softdevice, server: &'static MouseServer) -> ! {
    ble::advertiser::run(sd, server, &LINK, REPORTS.receiver()).await
}

#[embassy_executor::task]
async fn cli_task(port: serial::SerialPort, mouse: BleMouse, config: CliConfig) -> ! {
    serial::run(port, mouse, config).await
}

fn softdevice_config() -> nrf_softdevice::Config {
    nrf_softdevice::Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_RC as u8,
            rc_ctiv: 16,
            rc_temp_ctiv: 2,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_500_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        conn_gatt: Some(raw::ble_gatt_conn_cfg_t { att_mtu: 128 }),
        gatts_attr_tab_size: Some(raw::ble_gatts_cfg_attr_tab_size_t {
            attr_tab_size: raw::BLE_GATTS_ATTR_TAB_SIZE_DEFAULT,
        }),
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 1,
            periph_role_count: 1,
            central_role_count: 0,
            central_sec_count: 0,
            _bitfield_1: raw::ble_gap_cfg_role_count_t::new_bitfield_1(0),
        }),
        gap_device_name: Some(raw::ble_gap_cfg_device_name_t {
            p_value: DEVICE_NAME.as_ptr() as _,
            current_len: DEVICE_NAME.len() as u16,
            max_len: DEVICE_NAME.len() as u16,
            // SAFETY: an all-zero permission struct means "no write access".
            write_perm: unsafe { mem::zeroed() },
            _bitfield_1: raw::ble_gap_cfg_device_name_t::new_bitfield_1(
                raw::BLE_GATTS_VLOC_STACK as u8,
            ),
        }),
        ..Default::default()
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("ble-mouse-cli starting");

    // Embassy interrupts must stay below the SoftDevice's reserved levels.
    let mut nrf_config = embassy_nrf::config::Config::default();
    nrf_config.gpiote_interrupt_priority = Priority::P2;
    nrf_config.time_interrupt_priority = Priority::P2;
    let p = embassy_nrf::init(nrf_config);

    let cli_config = CliConfig::new();
    let port = serial::init(
        p.UARTE0,
        p.TIMER1,
        p.PPI_CH0,
        p.PPI_CH1,
        p.PPI_GROUP0,
        p.P0_08,
        p.P0_06,
        cli_config.baud_rate,
    );

    let sd = Softdevice::enable(&softdevice_config());
    let server = match MouseServer::new(sd, LINK.status()) {
        Ok(server) => SERVER.init(server),
        Err(e) => defmt::panic!("GATT registration failed: {}", Error::from(e)),
    };
    let sd: &'static Softdevice = sd;

    unwrap!(spawner.spawn(softdevice_task(sd)));
    unwrap!(spawner.spawn(ble_task(sd, server)));

    let mouse = BleMouse::new(&LINK, &REPORTS);
    unwrap!(spawner.spawn(cli_task(port, mouse, cli_config)));

    info!("ble-mouse-cli running");
}
