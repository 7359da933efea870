/// Record rendering for classified sightings.
///
/// Three fixed encodings over the same ten fields: an aligned human log
/// line, CSV, and a YAML list item. Uses `heapless` types for
/// no_std/no-alloc operation; every record renders into a bounded
/// scratch buffer that is never retained across calls.
///
/// The raw evidence bytes render identically in all three encodings:
/// uppercase two-digit pairs, single space between pairs, no trailing
/// separator.
use core::fmt::{self, Write};
use heapless::String;

use crate::evidence::Classification;
use crate::scanner::AdvEvent;

/// Firmware version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Worst-case size of one rendered record. The widest record (longest
/// vendor and tag names, 29 evidence bytes, YAML's per-key overhead)
/// stays well under this; the headroom is proven in tests.
pub const MAX_RECORD_LEN: usize = 512;

/// Buffer type for rendered records
pub type RecordBuffer = String<MAX_RECORD_LEN>;

/// CSV header line, emitted once before any data records.
pub const CSV_HEADER: &str =
    "time,manufacturer,deviceType,addr,rssi,advType,isConnectable,isScannable,dataType,dataHex";

/// YAML document-start line, emitted once before any data records.
pub const YAML_DOC_START: &str = "---";

/// Output encoding, selected once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    Log,
    #[default]
    Csv,
    Yaml,
}

impl ReportFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            ReportFormat::Log => "log",
            ReportFormat::Csv => "csv",
            ReportFormat::Yaml => "yaml",
        }
    }

    /// Preamble line emitted once before any records, if the encoding
    /// has one.
    pub const fn header(self) -> Option<&'static str> {
        match self {
            ReportFormat::Log => None,
            ReportFormat::Csv => Some(CSV_HEADER),
            ReportFormat::Yaml => Some(YAML_DOC_START),
        }
    }
}

/// One reportable sighting: the classification plus its event metadata
/// and capture timestamp. Single-use; rendered, written, discarded.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    /// Capture time in milliseconds since boot
    pub time_ms: u32,
    pub event: &'a AdvEvent,
    pub classification: Classification<'a>,
}

impl Record<'_> {
    /// Render into a fresh bounded buffer, without a trailing newline.
    /// A record that would overflow the buffer is truncated at the
    /// overflow point; sizing tests keep that path unreachable.
    pub fn render(&self, format: ReportFormat) -> RecordBuffer {
        let mut buf = RecordBuffer::new();
        let _ = match format {
            ReportFormat::Log => self.render_log(&mut buf),
            ReportFormat::Csv => self.render_csv(&mut buf),
            ReportFormat::Yaml => self.render_yaml(&mut buf),
        };
        buf
    }

    fn render_log(&self, buf: &mut RecordBuffer) -> fmt::Result {
        write!(
            buf,
            "{:>10} | {:<7} | {:<19} | {:<17} | {:>4} | {:<8} | {:<12} | {:<12} | ",
            self.time_ms,
            self.classification.manufacturer.name(),
            self.classification.device_type,
            self.event.addr,
            self.event.rssi,
            self.event.adv_type.as_str(),
            conn_label(self.event.connectable, self.event.scannable),
            self.classification.evidence.as_str(),
        )?;
        write_hex(buf, self.classification.raw)?;
        buf.write_str(" |")
    }

    fn render_csv(&self, buf: &mut RecordBuffer) -> fmt::Result {
        write!(
            buf,
            "{},{},{},{},{},{},{},{},{},",
            self.time_ms,
            self.classification.manufacturer.name(),
            self.classification.device_type,
            self.event.addr,
            self.event.rssi,
            self.event.adv_type.as_str(),
            self.event.connectable,
            self.event.scannable,
            self.classification.evidence.as_str(),
        )?;
        write_hex(buf, self.classification.raw)
    }

    fn render_yaml(&self, buf: &mut RecordBuffer) -> fmt::Result {
        write!(
            buf,
            "- time: {}\n  manufacturer: {}\n  deviceType: {}\n  addr: {}\n  rssi: {}\n  advType: {}\n  isConnectable: {}\n  isScannable: {}\n  dataType: {}\n  dataHex: ",
            self.time_ms,
            self.classification.manufacturer.name(),
            self.classification.device_type,
            self.event.addr,
            self.event.rssi,
            self.event.adv_type.as_str(),
            self.event.connectable,
            self.event.scannable,
            self.classification.evidence.as_str(),
        )?;
        write_hex(buf, self.classification.raw)
    }
}

/// Connectable column for the log encoding: `CONN`/`NONCONN`, with a
/// `/SCAN` suffix when the event is scannable.
fn conn_label(connectable: bool, scannable: bool) -> String<12> {
    let mut s = String::new();
    let _ = s.push_str(if connectable { "CONN" } else { "NONCONN" });
    if scannable {
        let _ = s.push_str("/SCAN");
    }
    s
}

/// Render bytes as uppercase hex pairs separated by single spaces.
/// The empty buffer renders as the empty string.
pub fn write_hex(buf: &mut RecordBuffer, bytes: &[u8]) -> fmt::Result {
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            buf.write_char(' ')?;
        }
        write!(buf, "{b:02X}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_adv;
    use crate::filter::FilterConfig;
    use crate::scanner::{format_addr, AdvType, ServiceData, MAX_AD_DATA};
    use crate::tables::SVC_UUID_FAST_PAIR;
    use heapless::Vec;

    fn fast_pair_event() -> AdvEvent {
        let mut data = Vec::new();
        let _ = data.extend_from_slice(&[0x11, 0x01, 0x8D]);
        let mut service_data = Vec::new();
        let _ = service_data.push(ServiceData {
            uuid: SVC_UUID_FAST_PAIR,
            data,
        });
        AdvEvent {
            addr: format_addr(&[0x7B, 0x59, 0x8D, 0x19, 0xF3, 0xA9]),
            rssi: -46,
            adv_type: AdvType::NonConn,
            connectable: false,
            scannable: true,
            service_data,
            manufacturer_data: None,
        }
    }

    fn samsung_event() -> AdvEvent {
        let mut mfr = Vec::new();
        let _ = mfr.extend_from_slice(&[0x75, 0x00, 0x01, 0x02, 0x03]);
        AdvEvent {
            addr: format_addr(&[0x10, 0x20, 0x30, 0x40, 0x50, 0x60]),
            rssi: -40,
            adv_type: AdvType::AdvInd,
            connectable: true,
            scannable: true,
            service_data: Vec::new(),
            manufacturer_data: Some(mfr),
        }
    }

    // ── Hex rendering ───────────────────────────────────────────────

    #[test]
    fn hex_uppercase_space_separated_no_trailing() {
        let mut buf = RecordBuffer::new();
        write_hex(&mut buf, &[0x11, 0x01, 0x8D]).unwrap();
        assert_eq!(buf.as_str(), "11 01 8D");
    }

    #[test]
    fn hex_single_byte_and_empty() {
        let mut buf = RecordBuffer::new();
        write_hex(&mut buf, &[0x0F]).unwrap();
        assert_eq!(buf.as_str(), "0F");

        let mut buf = RecordBuffer::new();
        write_hex(&mut buf, &[]).unwrap();
        assert_eq!(buf.as_str(), "");
    }

    #[test]
    fn hex_round_trips_to_original_bytes() {
        let bytes: Vec<u8, 64> = (0u16..=255).step_by(7).map(|b| b as u8).collect();
        let mut buf = RecordBuffer::new();
        write_hex(&mut buf, &bytes).unwrap();

        let decoded: Vec<u8, 64> = buf
            .split(' ')
            .map(|pair| u8::from_str_radix(pair, 16).unwrap())
            .collect();
        assert_eq!(decoded, bytes);
    }

    // ── Log encoding ────────────────────────────────────────────────

    #[test]
    fn log_line_fast_pair_scenario() {
        let event = fast_pair_event();
        let c = classify_adv(&event, &FilterConfig::new()).unwrap();
        let record = Record {
            time_ms: 123456,
            event: &event,
            classification: c,
        };

        assert_eq!(
            record.render(ReportFormat::Log).as_str(),
            "    123456 | Google  | FastPair/FindDevice | 7b:59:8d:19:f3:a9 |  -46 | NONCONN  | NONCONN/SCAN | Service      | 11 01 8D |"
        );
    }

    #[test]
    fn log_conn_label_variants() {
        assert_eq!(conn_label(true, true).as_str(), "CONN/SCAN");
        assert_eq!(conn_label(true, false).as_str(), "CONN");
        assert_eq!(conn_label(false, true).as_str(), "NONCONN/SCAN");
        assert_eq!(conn_label(false, false).as_str(), "NONCONN");
    }

    #[test]
    fn log_line_ends_with_field_terminator() {
        let event = samsung_event();
        let c = classify_adv(&event, &FilterConfig::new()).unwrap();
        let record = Record {
            time_ms: 1,
            event: &event,
            classification: c,
        };
        let line = record.render(ReportFormat::Log);
        assert!(line.ends_with("75 00 01 02 03 |"));
    }

    // ── CSV encoding ────────────────────────────────────────────────

    #[test]
    fn csv_header_field_names() {
        assert_eq!(
            CSV_HEADER,
            "time,manufacturer,deviceType,addr,rssi,advType,isConnectable,isScannable,dataType,dataHex"
        );
    }

    #[test]
    fn csv_line_fast_pair_scenario() {
        let event = fast_pair_event();
        let c = classify_adv(&event, &FilterConfig::new()).unwrap();
        let record = Record {
            time_ms: 123456,
            event: &event,
            classification: c,
        };

        assert_eq!(
            record.render(ReportFormat::Csv).as_str(),
            "123456,Google,FastPair/FindDevice,7b:59:8d:19:f3:a9,-46,NONCONN,false,true,Service,11 01 8D"
        );
    }

    #[test]
    fn csv_line_has_ten_fields() {
        let event = samsung_event();
        let c = classify_adv(&event, &FilterConfig::new()).unwrap();
        let record = Record {
            time_ms: 99,
            event: &event,
            classification: c,
        };
        let line = record.render(ReportFormat::Csv);

        let fields: Vec<&str, 12> = line.split(',').collect();
        assert_eq!(fields.len(), 10);
        assert_eq!(fields.len(), CSV_HEADER.split(',').count());
        assert_eq!(fields[1], "Samsung");
        assert_eq!(fields[2], "SmartTag");
        assert_eq!(fields[6], "true");
        assert_eq!(fields[8], "Manufacturer");
        assert_eq!(fields[9], "75 00 01 02 03");
    }

    // ── YAML encoding ───────────────────────────────────────────────

    #[test]
    fn yaml_block_fast_pair_scenario() {
        let event = fast_pair_event();
        let c = classify_adv(&event, &FilterConfig::new()).unwrap();
        let record = Record {
            time_ms: 123456,
            event: &event,
            classification: c,
        };

        assert_eq!(
            record.render(ReportFormat::Yaml).as_str(),
            concat!(
                "- time: 123456\n",
                "  manufacturer: Google\n",
                "  deviceType: FastPair/FindDevice\n",
                "  addr: 7b:59:8d:19:f3:a9\n",
                "  rssi: -46\n",
                "  advType: NONCONN\n",
                "  isConnectable: false\n",
                "  isScannable: true\n",
                "  dataType: Service\n",
                "  dataHex: 11 01 8D"
            )
        );
    }

    // ── Cross-encoding invariants ───────────────────────────────────

    #[test]
    fn identical_hex_in_all_encodings() {
        let event = samsung_event();
        let c = classify_adv(&event, &FilterConfig::new()).unwrap();
        let record = Record {
            time_ms: 7,
            event: &event,
            classification: c,
        };

        let log = record.render(ReportFormat::Log);
        let csv = record.render(ReportFormat::Csv);
        let yaml = record.render(ReportFormat::Yaml);

        let expected = "75 00 01 02 03";
        assert!(log.contains(expected));
        assert!(csv.ends_with(expected));
        assert!(yaml.ends_with(expected));
    }

    #[test]
    fn render_is_deterministic() {
        let event = fast_pair_event();
        let c = classify_adv(&event, &FilterConfig::new()).unwrap();
        let record = Record {
            time_ms: 5000,
            event: &event,
            classification: c,
        };

        for format in [ReportFormat::Log, ReportFormat::Csv, ReportFormat::Yaml] {
            assert_eq!(record.render(format), record.render(format));
        }
    }

    // ── Buffer sizing ───────────────────────────────────────────────

    #[test]
    fn worst_case_record_fits_buffer() {
        // Longest tag, longest PDU name, widest timestamp and a
        // max-size evidence buffer. If any encoding ever gets near the
        // cap this test is the place that fails, not the device.
        let mut payload = Vec::<u8, MAX_AD_DATA>::new();
        for i in 0..MAX_AD_DATA {
            let _ = payload.push(i as u8);
        }
        let mut service_data = Vec::new();
        let _ = service_data.push(ServiceData {
            uuid: SVC_UUID_FAST_PAIR,
            data: {
                let mut d = Vec::new();
                let _ = d.extend_from_slice(&[0x11]);
                let _ = d.extend_from_slice(&payload[..MAX_AD_DATA - 1]);
                d
            },
        });
        let event = AdvEvent {
            addr: format_addr(&[0xFF; 6]),
            rssi: i8::MIN,
            adv_type: AdvType::ScanRsp,
            connectable: true,
            scannable: true,
            service_data,
            manufacturer_data: None,
        };
        let config = FilterConfig {
            min_rssi: i8::MIN,
            ..FilterConfig::new()
        };
        let c = classify_adv(&event, &config).unwrap();
        assert_eq!(c.raw.len(), MAX_AD_DATA);
        let record = Record {
            time_ms: u32::MAX,
            event: &event,
            classification: c,
        };

        for format in [ReportFormat::Log, ReportFormat::Csv, ReportFormat::Yaml] {
            let buf = record.render(format);
            assert!(
                buf.len() < MAX_RECORD_LEN,
                "{} record hit the buffer cap at {} bytes",
                format.as_str(),
                buf.len()
            );
            // Truncation would cut the hex tail short.
            assert!(buf.contains("1A 1B"), "{} record truncated", format.as_str());
        }
    }

    // ── Format selection ────────────────────────────────────────────

    #[test]
    fn default_format_is_csv() {
        assert_eq!(ReportFormat::default(), ReportFormat::Csv);
    }

    #[test]
    fn header_per_format() {
        assert_eq!(ReportFormat::Log.header(), None);
        assert_eq!(ReportFormat::Csv.header(), Some(CSV_HEADER));
        assert_eq!(ReportFormat::Yaml.header(), Some("---"));
    }

    #[test]
    fn format_names() {
        assert_eq!(ReportFormat::Log.as_str(), "log");
        assert_eq!(ReportFormat::Csv.as_str(), "csv");
        assert_eq!(ReportFormat::Yaml.as_str(), "yaml");
    }

    // ── Version constant ────────────────────────────────────────────

    #[test]
    fn version_is_semver() {
        let parts: Vec<&str, 4> = VERSION.split('.').collect();
        assert_eq!(parts.len(), 3, "VERSION should be semver (major.minor.patch)");
        for part in &parts {
            assert!(part.parse::<u32>().is_ok(), "'{part}' is not a number");
        }
    }
}
