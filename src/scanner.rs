/// BLE advertisement parsing.
///
/// Walks the AD structures of a raw advertisement payload and extracts
/// the two byte sources the classifier consumes: 16-bit-UUID service
/// data and manufacturer-specific data. Everything else in the payload
/// (flags, names, TX power) is skipped without error.
///
/// The radio stack owns scan parameters, duplicate handling, and packet
/// reception; this module starts at the raw AD bytes.
use heapless::{String, Vec};

/// Advertiser address rendered as "7b:59:8d:19:f3:a9"
pub type AddrString = String<18>;

/// Most payload bytes retained per evidence source. A legacy
/// advertisement is 31 bytes; minus the AD length/type header that
/// leaves 29 for the largest possible single structure. Extended
/// advertising can carry more, but nothing past this cap changes a
/// classification, so longer payloads are truncated.
pub const MAX_AD_DATA: usize = 29;

/// Service-data entries kept per event. Tracker tags advertise one,
/// occasionally two; four absorbs anything seen in the field.
pub const MAX_SERVICE_ENTRIES: usize = 4;

/// PDU type of a legacy advertising report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvType {
    /// Connectable scannable undirected
    AdvInd,
    /// Connectable directed
    DirInd,
    /// Scannable undirected
    ScanInd,
    /// Non-connectable non-scannable undirected
    NonConn,
    /// Scan response
    ScanRsp,
    Unknown,
}

impl AdvType {
    pub const fn as_str(self) -> &'static str {
        match self {
            AdvType::AdvInd => "ADV_IND",
            AdvType::DirInd => "DIR_IND",
            AdvType::ScanInd => "SCAN_IND",
            AdvType::NonConn => "NONCONN",
            AdvType::ScanRsp => "SCAN_RSP",
            AdvType::Unknown => "UNKNOWN",
        }
    }

    /// Connectable flag implied by the PDU type.
    pub const fn connectable(self) -> bool {
        matches!(self, AdvType::AdvInd | AdvType::DirInd)
    }

    /// Scannable flag implied by the PDU type.
    pub const fn scannable(self) -> bool {
        matches!(self, AdvType::AdvInd | AdvType::ScanInd)
    }
}

/// One service-data entry: 16-bit UUID plus the bytes that followed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceData {
    pub uuid: u16,
    pub data: Vec<u8, MAX_AD_DATA>,
}

/// A parsed advertisement event. Owned by the caller and read-only to
/// the pipeline; lives for one classification call.
#[derive(Debug, Clone)]
pub struct AdvEvent {
    pub addr: AddrString,
    pub rssi: i8,
    pub adv_type: AdvType,
    pub connectable: bool,
    pub scannable: bool,
    /// Service-data entries in advertisement order. Order matters: the
    /// classifier takes the first qualifying entry.
    pub service_data: Vec<ServiceData, MAX_SERVICE_ENTRIES>,
    pub manufacturer_data: Option<Vec<u8, MAX_AD_DATA>>,
}

/// Parse advertisement data (AD structures) into an [`AdvEvent`].
///
/// AD structure format: [length] [type] [data...]
/// Types we care about:
///   0x16 = Service data, 16-bit UUID (first 2 bytes = UUID, little-endian)
///   0xFF = Manufacturer specific data (first 2 bytes = company ID, little-endian)
pub struct AdvParser;

impl AdvParser {
    /// Parse raw advertisement bytes into an event.
    /// `addr` is the 6-byte advertiser address.
    /// `rssi` is the received signal strength.
    /// `ad_data` is the raw advertisement data bytes.
    pub fn parse(addr: &[u8; 6], rssi: i8, adv_type: AdvType, ad_data: &[u8]) -> AdvEvent {
        let mut event = AdvEvent {
            addr: format_addr(addr),
            rssi,
            adv_type,
            connectable: adv_type.connectable(),
            scannable: adv_type.scannable(),
            service_data: Vec::new(),
            manufacturer_data: None,
        };

        let mut pos = 0;
        while pos < ad_data.len() {
            let len = ad_data[pos] as usize;
            if len == 0 || pos + 1 + len > ad_data.len() {
                break;
            }

            let ad_type = ad_data[pos + 1];
            let data = &ad_data[pos + 2..pos + 1 + len];

            match ad_type {
                // Service data, 16-bit UUID
                0x16 => {
                    if data.len() >= 2 {
                        let uuid = u16::from_le_bytes([data[0], data[1]]);
                        let payload = &data[2..];
                        let take = payload.len().min(MAX_AD_DATA);
                        let mut bytes = Vec::new();
                        let _ = bytes.extend_from_slice(&payload[..take]);
                        let _ = event.service_data.push(ServiceData { uuid, data: bytes });
                    }
                }
                // Manufacturer specific data
                0xFF => {
                    let take = data.len().min(MAX_AD_DATA);
                    let mut bytes = Vec::new();
                    let _ = bytes.extend_from_slice(&data[..take]);
                    event.manufacturer_data = Some(bytes);
                }
                _ => {}
            }

            pos += 1 + len;
        }

        event
    }
}

/// Format a 6-byte advertiser address into "7b:59:8d:19:f3:a9" form.
pub fn format_addr(addr: &[u8; 6]) -> AddrString {
    use core::fmt::Write;
    let mut s = AddrString::new();
    let _ = write!(
        s,
        "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
        addr[0], addr[1], addr[2], addr[3], addr[4], addr[5]
    );
    s
}
