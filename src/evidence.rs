/// Evidence decoders for the two advertisement byte sources.
///
/// Service data and manufacturer data are decoded independently; each
/// decoder either produces a [`Classification`] or declines. The
/// structural gates are minimum-length checks and type-byte tables keyed
/// by vendor, reproduced from field observation of shipping tags. They
/// are heuristics, not published protocol, and are kept exactly as
/// observed even where they look inconsistent across vendors.
use crate::tables::{self, Manufacturer};

/// Which byte source produced a classification. Required in every output
/// record for auditing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvidenceKind {
    Service,
    Manufacturer,
}

impl EvidenceKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            EvidenceKind::Service => "Service",
            EvidenceKind::Manufacturer => "Manufacturer",
        }
    }
}

/// One classified sighting, borrowing its evidentiary bytes from the
/// advertisement event. Produced fresh per event, never retained.
///
/// Invariant: `manufacturer` is always one of the four tracked vendors;
/// `Other`/`Unknown` identifiers never get this far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification<'a> {
    pub manufacturer: Manufacturer,
    /// Device-type tag, e.g. "FindMy/AirTag".
    pub device_type: &'static str,
    pub evidence: EvidenceKind,
    /// The bytes that produced this classification: the service-data
    /// payload, or the whole manufacturer buffer including its company
    /// identifier.
    pub raw: &'a [u8],
}

// Minimum service-data lengths per vendor. Length gates only, no
// checksum or content validation.
const MIN_SVC_LEN_FAST_PAIR: usize = 3;
const MIN_SVC_LEN_FIND_MY: usize = 6;
const MIN_SVC_LEN_SAMSUNG_FIND: usize = 4;

/// Decode one service-data entry.
///
/// The UUID selects the vendor and its length gate; any UUID outside the
/// three tracked services is never evidence. Fast Pair frames carry a
/// frame type in byte 0; Apple and Samsung service data map to fixed tags
/// regardless of content.
pub fn decode_service_data(uuid: u16, data: &[u8]) -> Option<Classification<'_>> {
    let manufacturer = Manufacturer::from_service_uuid(uuid);
    let device_type = match manufacturer {
        Manufacturer::Google => {
            if data.len() < MIN_SVC_LEN_FAST_PAIR {
                return None;
            }
            match data[0] {
                0x11 => "FastPair/FindDevice",
                0x10 => "FastPair/Generic",
                _ => "FastPair/Unknown",
            }
        }
        Manufacturer::Apple => {
            if data.len() < MIN_SVC_LEN_FIND_MY {
                return None;
            }
            "FindMy/Service"
        }
        Manufacturer::Samsung => {
            if data.len() < MIN_SVC_LEN_SAMSUNG_FIND {
                return None;
            }
            "SmartTag/Service"
        }
        // No tracked service UUID maps to Xiaomi.
        Manufacturer::Xiaomi | Manufacturer::Other | Manufacturer::Unknown => return None,
    };

    Some(Classification {
        manufacturer,
        device_type,
        evidence: EvidenceKind::Service,
        raw: data,
    })
}

/// Decode a manufacturer-specific data buffer.
///
/// The first two bytes are the little-endian company identifier; shorter
/// buffers get the [`tables::COMPANY_ID_NONE`] sentinel, which matches no
/// vendor. Three bytes (identifier plus one type byte) are the floor for
/// any match; Samsung frames need a fourth byte. Byte offset 2 is always
/// the type.
pub fn decode_manufacturer_data(data: &[u8]) -> Option<Classification<'_>> {
    let manufacturer = Manufacturer::from_company_id(company_id(data));
    let device_type = match manufacturer {
        Manufacturer::Apple => {
            if data.len() < 3 {
                return None;
            }
            match data[2] {
                0x12 => "FindMy/AirTag",
                0x10 => "FindMy/Offline",
                _ => "FindMy/Other",
            }
        }
        Manufacturer::Google => {
            if data.len() < 3 {
                return None;
            }
            match data[2] {
                0x06 => "FastPair/FindMy",
                _ => "FindMy/Other",
            }
        }
        Manufacturer::Samsung => {
            if data.len() < 4 {
                return None;
            }
            match data[2] {
                0x01 => "SmartTag",
                0x02 => "SmartTag+",
                _ => "SmartTag/Other",
            }
        }
        Manufacturer::Xiaomi => {
            if data.len() < 3 {
                return None;
            }
            match data[2] {
                0x30 => "Anti-Lost",
                _ => "FindMy/Other",
            }
        }
        Manufacturer::Other | Manufacturer::Unknown => return None,
    };

    Some(Classification {
        manufacturer,
        device_type,
        evidence: EvidenceKind::Manufacturer,
        raw: data,
    })
}

/// Extract the little-endian company identifier, or the sentinel when the
/// buffer cannot hold one.
pub fn company_id(data: &[u8]) -> u16 {
    if data.len() < 2 {
        tables::COMPANY_ID_NONE
    } else {
        u16::from_le_bytes([data[0], data[1]])
    }
}
