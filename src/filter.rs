/// Runtime acceptance policy for classified sightings.
///
/// One immutable config gates which vendors are reported and how weak a
/// signal is still worth decoding. Evaluated per advertisement; no
/// scoring or history tracking, correlation is the listener's job.
use crate::board;
use crate::tables::Manufacturer;

/// Filter configuration. Built once at startup and shared read-only with
/// every task; there is no runtime mutation path.
#[derive(Debug, Clone, Copy)]
pub struct FilterConfig {
    /// Minimum RSSI threshold (dBm). Signals weaker than this are
    /// dropped before any decoding; equal passes.
    pub min_rssi: i8,
    /// Whether Apple devices are reported
    pub apple_enabled: bool,
    /// Whether Google devices are reported
    pub google_enabled: bool,
    /// Whether Samsung devices are reported
    pub samsung_enabled: bool,
    /// Whether Xiaomi devices are reported
    pub xiaomi_enabled: bool,
}

impl FilterConfig {
    pub const fn new() -> Self {
        Self {
            min_rssi: board::DEFAULT_MIN_RSSI,
            apple_enabled: true,
            google_enabled: true,
            samsung_enabled: true,
            xiaomi_enabled: true,
        }
    }

    /// Whether sightings attributed to `manufacturer` should be reported.
    /// Only the four tracked vendors can ever be enabled.
    pub const fn enabled(&self, manufacturer: Manufacturer) -> bool {
        match manufacturer {
            Manufacturer::Apple => self.apple_enabled,
            Manufacturer::Google => self.google_enabled,
            Manufacturer::Samsung => self.samsung_enabled,
            Manufacturer::Xiaomi => self.xiaomi_enabled,
            Manufacturer::Other | Manufacturer::Unknown => false,
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self::new()
    }
}
