//! TagHound firmware: BLE tracker-tag sniffer for ESP32.
//!
//! Scans continuously for tracker-tag advertisements, classifies each
//! sighting on-device, and streams one text record per sighting over
//! the serial line. Diagnostics go through `log`; the record stream
//! prints directly so it stays machine-readable.

#![no_std]
#![no_main]

extern crate alloc;

use esp_backtrace as _;

esp_bootloader_esp_idf::esp_app_desc!();

use core::sync::atomic::{AtomicU32, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Duration, Instant, Timer};
use esp_hal::interrupt::software::SoftwareInterruptControl;
use esp_hal::timer::timg::TimerGroup;
use static_cell::StaticCell;

use bt_hci::param::LeAdvEventKind;
use trouble_host::prelude::*;

use taghound::board;
use taghound::classify::classify_adv;
use taghound::filter::FilterConfig;
use taghound::report::{Record, RecordBuffer, ReportFormat, VERSION};
use taghound::scanner::{AdvEvent, AdvParser, AdvType};

// ── Channel type aliases ──────────────────────────────────────────────

type ScanChannel = Channel<CriticalSectionRawMutex, AdvEvent, 16>;
type RecordChannel = Channel<CriticalSectionRawMutex, RecordBuffer, 8>;

// ── Static channels and shared state ──────────────────────────────────

/// Static channel for parsed advertisement events from the BLE runner
static SCAN_CHANNEL: ScanChannel = Channel::new();

/// Static channel for rendered records awaiting the serial sink
static RECORD_CHANNEL: RecordChannel = Channel::new();

/// Process-wide filter policy. Fixed at startup and never written
/// afterward, so tasks share it without locking.
static FILTER_CONFIG: FilterConfig = FilterConfig::new();

/// Output encoding for the record stream
const REPORT_FORMAT: ReportFormat = ReportFormat::Csv;

/// Classified sightings reported since boot
static MATCH_COUNT: AtomicU32 = AtomicU32::new(0);

/// Events or records dropped on a full channel since boot
static DROPPED_COUNT: AtomicU32 = AtomicU32::new(0);

// ── BLE scan event handler ────────────────────────────────────────────

/// EventHandler for BLE advertisement reports from trouble-host.
///
/// Receives advertisement reports from the BLE stack runner, parses
/// them with `AdvParser`, and pushes events to the scan channel.
/// Called synchronously from the runner; must not block.
struct ScanEventHandler;

impl EventHandler for ScanEventHandler {
    fn on_adv_reports(&self, mut it: LeAdvReportsIter<'_>) {
        while let Some(Ok(report)) = it.next() {
            let addr_bytes: &[u8; 6] = report.addr.raw().try_into().unwrap();
            let adv_type = map_event_kind(report.event_kind);
            let event = AdvParser::parse(addr_bytes, report.rssi, adv_type, report.data);
            if SCAN_CHANNEL.try_send(event).is_err() {
                DROPPED_COUNT.fetch_add(1, Ordering::Relaxed);
            }
        }
    }
}

/// Map the HCI advertising-report event type onto record PDU names.
/// Anything outside the legacy set is reported as UNKNOWN rather than
/// dropped.
fn map_event_kind(kind: LeAdvEventKind) -> AdvType {
    match kind {
        LeAdvEventKind::AdvInd => AdvType::AdvInd,
        LeAdvEventKind::AdvDirectInd => AdvType::DirInd,
        LeAdvEventKind::AdvScanInd => AdvType::ScanInd,
        LeAdvEventKind::AdvNonconnInd => AdvType::NonConn,
        LeAdvEventKind::ScanRsp => AdvType::ScanRsp,
        _ => AdvType::Unknown,
    }
}

// ── Entry point ───────────────────────────────────────────────────────

#[esp_rtos::main]
async fn main(spawner: embassy_executor::Spawner) {
    esp_println::logger::init_logger_from_env();

    let peripherals = esp_hal::init(esp_hal::Config::default());

    // Set up heap allocator (needed for the BLE host stack).
    // ESP32 is tighter on DRAM than the S3.
    #[cfg(feature = "esp32")]
    {
        esp_alloc::heap_allocator!(size: 64 * 1024);
    }
    #[cfg(not(feature = "esp32"))]
    {
        esp_alloc::heap_allocator!(size: 128 * 1024);
    }

    // Start the RTOS (requires timer + software interrupt)
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_int = SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_int.software_interrupt0);

    log::info!("TagHound v{} starting on {}", VERSION, board::BOARD_NAME);
    log::info!(
        "Filter: min_rssi={} apple={} google={} samsung={} xiaomi={}",
        FILTER_CONFIG.min_rssi,
        FILTER_CONFIG.apple_enabled,
        FILTER_CONFIG.google_enabled,
        FILTER_CONFIG.samsung_enabled,
        FILTER_CONFIG.xiaomi_enabled,
    );
    log::info!("Output format: {}", REPORT_FORMAT.as_str());

    // Encoding preamble goes out before any record can render.
    if let Some(header) = REPORT_FORMAT.header() {
        esp_println::println!("{}", header);
    }

    spawner.spawn(classify_task()).unwrap();
    spawner.spawn(output_task()).unwrap();
    spawner.spawn(status_task()).unwrap();

    // ── BLE radio initialization ───────────────────────────────────────

    let connector =
        esp_radio::ble::controller::BleConnector::new(peripherals.BT, Default::default())
            .expect("BLE connector init failed");

    log::info!("BLE connector initialized");

    let controller: ExternalController<_, 20> = ExternalController::new(connector);

    static HOST_RESOURCES: StaticCell<HostResources<DefaultPacketPool, 1, 2>> = StaticCell::new();
    let resources = HOST_RESOURCES.init(HostResources::new());

    let address = Address::random([0x02, 0x4b, 0x77, 0x31, 0x9c, 0xde]);

    let stack = trouble_host::new(controller, resources).set_random_address(address);
    let Host {
        central,
        mut runner,
        ..
    } = stack.build();

    log::info!("BLE radio initialized");

    let scan_handler = ScanEventHandler;

    // ── BLE orchestration ──────────────────────────────────────────────
    //
    // Two concurrent futures via join:
    //   1. BLE stack runner (drives HCI, delivers scan reports to handler)
    //   2. BLE scanner (starts scan, keeps session alive)

    let _ = embassy_futures::join::join(
        // ── Runner: drives the BLE stack ────────────────────────────────
        async {
            loop {
                if let Err(e) = runner.run_with_handler(&scan_handler).await {
                    log::error!("BLE runner error: {:?}", e);
                    Timer::after(Duration::from_secs(1)).await;
                }
            }
        },
        // ── Scanner: start BLE scan and keep session alive ──────────────
        async {
            let mut scanner = trouble_host::scan::Scanner::new(central);
            // Window equal to interval: the radio listens continuously.
            // Active scan pulls in scan responses; duplicates are kept
            // so a tag parked next to the antenna keeps reporting.
            let config = ScanConfig {
                active: true,
                interval: Duration::from_millis(10),
                window: Duration::from_millis(10),
                ..Default::default()
            };

            let result = scanner.scan(&config).await;
            let _session = match result {
                Ok(session) => session,
                Err(e) => {
                    log::error!("BLE scan failed to start: {:?}", e);
                    return;
                }
            };

            log::info!("BLE scan started (active, continuous)");
            // Session stays alive as long as _session exists.
            // Reports flow through ScanEventHandler on the runner.
            loop {
                Timer::after(Duration::from_secs(60)).await;
            }
        },
    )
    .await;
}

/// Classification task. Drains the scan channel, runs each event
/// through the RSSI gate, the decoders, and the vendor filter, then
/// renders passing sightings into the record channel.
#[embassy_executor::task]
async fn classify_task() {
    log::info!("Classify task started");

    let scan_rx = SCAN_CHANNEL.receiver();
    let record_tx = RECORD_CHANNEL.sender();

    loop {
        let event = scan_rx.receive().await;

        let classification = match classify_adv(&event, &FILTER_CONFIG) {
            Some(c) => c,
            None => continue,
        };

        MATCH_COUNT.fetch_add(1, Ordering::Relaxed);

        let time_ms = (Instant::now().as_millis() & 0xFFFF_FFFF) as u32;
        let record = Record {
            time_ms,
            event: &event,
            classification,
        };

        if record_tx.try_send(record.render(REPORT_FORMAT)).is_err() {
            DROPPED_COUNT.fetch_add(1, Ordering::Relaxed);
        }
    }
}

/// Serial output task. Records go through esp-println directly rather
/// than the log facade so the stream stays free of log prefixes.
#[embassy_executor::task]
async fn output_task() {
    log::info!("Output task started");

    let record_rx = RECORD_CHANNEL.receiver();

    loop {
        let record = record_rx.receive().await;
        esp_println::println!("{}", record);
    }
}

/// Periodic status heartbeat on the log facade.
#[embassy_executor::task]
async fn status_task() {
    loop {
        Timer::after(Duration::from_secs(30)).await;

        let uptime_secs = (Instant::now().as_millis() / 1000) as u32;
        log::info!(
            "status: uptime={}s matches={} dropped={} heap_free={} board={}",
            uptime_secs,
            MATCH_COUNT.load(Ordering::Relaxed),
            DROPPED_COUNT.load(Ordering::Relaxed),
            esp_alloc::HEAP.free(),
            board::BOARD_NAME,
        );
    }
}
