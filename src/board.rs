/// Hardware profiles for supported boards.
///
/// Each board module defines the constants that vary per deployment,
/// selected at compile time via feature flags. The M5StickC's PCB
/// antenna hears far less than the XIAO's external antenna, hence the
/// higher RSSI floor.

#[cfg(feature = "board-xiao")]
mod hw {
    pub const BOARD_NAME: &str = "xiao_esp32s3";
    /// Weakest signal worth reporting (dBm).
    pub const DEFAULT_MIN_RSSI: i8 = -80;
}

#[cfg(feature = "board-m5stickc")]
mod hw {
    pub const BOARD_NAME: &str = "m5stickc_plus2";
    /// Weakest signal worth reporting (dBm).
    pub const DEFAULT_MIN_RSSI: i8 = -60;
}

#[cfg(not(any(feature = "board-xiao", feature = "board-m5stickc")))]
mod hw {
    pub const BOARD_NAME: &str = "generic";
    /// Weakest signal worth reporting (dBm).
    pub const DEFAULT_MIN_RSSI: i8 = -80;
}

pub use hw::*;
