/// Per-event classification: one advertisement in, at most one
/// classification out.
///
/// Evidence priority is fixed: service data outranks manufacturer data,
/// and within service data the entries are tried in advertisement
/// order. The first structurally valid match whose vendor is enabled
/// wins outright. A valid match for a disabled vendor does not veto the
/// event; the search keeps going, so a Samsung manufacturer frame can
/// still report an event whose Apple service data was filtered off.
///
/// Stateless and re-entrant. Nothing is carried between calls and the
/// config is never written, so concurrent callers need no locking.
use crate::evidence::{self, Classification};
use crate::filter::FilterConfig;
use crate::scanner::AdvEvent;

/// Classify one advertisement event, or decide it is not reportable.
///
/// The RSSI gate runs before any decoding: a signal below the threshold
/// costs nothing but the comparison. Equality passes.
pub fn classify_adv<'a>(event: &'a AdvEvent, config: &FilterConfig) -> Option<Classification<'a>> {
    if event.rssi < config.min_rssi {
        return None;
    }

    let service_match = event.service_data.iter().find_map(|entry| {
        evidence::decode_service_data(entry.uuid, &entry.data)
            .filter(|c| config.enabled(c.manufacturer))
    });
    if let Some(c) = service_match {
        return Some(c);
    }

    event
        .manufacturer_data
        .as_deref()
        .and_then(evidence::decode_manufacturer_data)
        .filter(|c| config.enabled(c.manufacturer))
}
