/// Vendor identifier tables for the tracked tag families.
///
/// The four recognized vendors are reachable from two independent
/// identifier spaces: Bluetooth SIG company identifiers (carried in
/// manufacturer-specific data) and 16-bit service UUIDs (carried in
/// service data). Both lookups are total: unrecognized identifiers fall
/// back to `Other`/`Unknown` instead of failing, so classification can
/// only ever decline, never error.
///
/// Adding a tag family means extending [`Manufacturer`] and both lookup
/// functions together, plus the decoder tables in `evidence.rs`.

// ── Bluetooth SIG company identifiers ───────────────────────────────

/// Apple, Inc. (AirTag, Find My network accessories)
pub const COMPANY_ID_APPLE: u16 = 0x004C;
/// Google LLC (Fast Pair, Find My Device network)
pub const COMPANY_ID_GOOGLE: u16 = 0x00E0;
/// Samsung Electronics Co. Ltd. (Galaxy SmartTag, SmartThings Find)
pub const COMPANY_ID_SAMSUNG: u16 = 0x0075;
/// Xiaomi Inc. (anti-lost tags)
pub const COMPANY_ID_XIAOMI: u16 = 0x038F;

/// Sentinel for manufacturer buffers too short to carry an identifier.
/// Not assigned by the Bluetooth SIG; matches no vendor.
pub const COMPANY_ID_NONE: u16 = 0xFFFF;

// ── 16-bit service UUIDs ────────────────────────────────────────────

/// Google Fast Pair / Find My Device service
pub const SVC_UUID_FAST_PAIR: u16 = 0xFEF3;
/// Apple Find My service
pub const SVC_UUID_FIND_MY: u16 = 0xFD6F;
/// Samsung Find (SmartTag) service
pub const SVC_UUID_SAMSUNG_FIND: u16 = 0xFD5A;

/// A tag vendor, or one of two fallbacks: `Other` for a company
/// identifier that parsed but is not tracked, `Unknown` for an identifier
/// that could not be parsed at all (or a service UUID outside the tracked
/// set).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Manufacturer {
    Apple,
    Google,
    Samsung,
    Xiaomi,
    Other,
    Unknown,
}

impl Manufacturer {
    /// Map a company identifier to a vendor. Identifiers outside the
    /// tracked set come back as `Other`.
    pub const fn from_company_id(cid: u16) -> Self {
        match cid {
            COMPANY_ID_APPLE => Manufacturer::Apple,
            COMPANY_ID_GOOGLE => Manufacturer::Google,
            COMPANY_ID_SAMSUNG => Manufacturer::Samsung,
            COMPANY_ID_XIAOMI => Manufacturer::Xiaomi,
            _ => Manufacturer::Other,
        }
    }

    /// Map a 16-bit service UUID to a vendor. UUIDs outside the tracked
    /// set come back as `Unknown`: not an error, just not evidence this
    /// pipeline accepts.
    pub const fn from_service_uuid(uuid: u16) -> Self {
        match uuid {
            SVC_UUID_FAST_PAIR => Manufacturer::Google,
            SVC_UUID_FIND_MY => Manufacturer::Apple,
            SVC_UUID_SAMSUNG_FIND => Manufacturer::Samsung,
            _ => Manufacturer::Unknown,
        }
    }

    /// Fixed display name used in output records.
    pub const fn name(self) -> &'static str {
        match self {
            Manufacturer::Apple => "Apple",
            Manufacturer::Google => "Google",
            Manufacturer::Samsung => "Samsung",
            Manufacturer::Xiaomi => "Xiaomi",
            Manufacturer::Other => "Other",
            Manufacturer::Unknown => "Unknown",
        }
    }
}
