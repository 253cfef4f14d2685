use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};

use crate::constants::{DROPPED_LOCATION_CODES, FIPS_TO_STATE, TERRITORY_CODES};
use crate::types::{LocationEntry, StateSeparations};

static FIPS: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| FIPS_TO_STATE.iter().copied().collect());

static TERRITORIES: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| TERRITORY_CODES.iter().copied().collect());

static DROPPED: Lazy<HashSet<&'static str>> =
    Lazy::new(|| DROPPED_LOCATION_CODES.iter().copied().collect());

/// How a raw location code is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationClass {
    /// Aggregate or overseas code with no domestic region.
    Dropped,
    /// Mapped to a postal abbreviation.
    Mapped(&'static str),
    /// Not recognized; kept as-is so consumers can see the gap.
    Unknown,
}

pub fn classify_location(code: &str) -> LocationClass {
    if DROPPED.contains(code) {
        LocationClass::Dropped
    } else if let Some(&state) = FIPS.get(code) {
        LocationClass::Mapped(state)
    } else if let Some(&state) = TERRITORIES.get(code) {
        LocationClass::Mapped(state)
    } else {
        LocationClass::Unknown
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DroppedLocation {
    pub code: String,
    pub separations: Value,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoNormalization {
    /// Replacement list, in input order.
    pub entries: Vec<StateSeparations>,
    pub mapped: usize,
    /// Entries that were already in `{state, separations}` form.
    pub already_normalized: usize,
    pub dropped: Vec<DroppedLocation>,
    /// Codes passed through unmapped.
    pub unknown: Vec<String>,
}

/// Convert location codes to state abbreviations, dropping aggregate and
/// overseas codes. Output order follows input order.
pub fn normalize_locations(entries: Vec<LocationEntry>) -> GeoNormalization {
    let mut result = GeoNormalization::default();

    for entry in entries {
        let (code, separations) = match entry {
            LocationEntry::Normalized(existing) => {
                result.already_normalized += 1;
                result.entries.push(existing);
                continue;
            }
            LocationEntry::Coded { code, separations } => (code, separations),
        };

        match classify_location(&code) {
            LocationClass::Dropped => {
                info!("Dropped: {} ({} separations)", code, separations);
                result.dropped.push(DroppedLocation { code, separations });
            }
            LocationClass::Mapped(state) => {
                result.mapped += 1;
                result.entries.push(StateSeparations {
                    state: state.to_string(),
                    separations,
                });
            }
            LocationClass::Unknown => {
                warn!("Unknown code \"{}\", keeping as-is", code);
                result.unknown.push(code.clone());
                result.entries.push(StateSeparations {
                    state: code,
                    separations,
                });
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn coded(code: &str, separations: u64) -> LocationEntry {
        LocationEntry::Coded {
            code: code.to_string(),
            separations: json!(separations),
        }
    }

    #[test]
    fn test_classification_priority() {
        assert_eq!(classify_location("06"), LocationClass::Mapped("CA"));
        assert_eq!(classify_location("11"), LocationClass::Mapped("DC"));
        assert_eq!(classify_location("RQ"), LocationClass::Mapped("PR"));
        assert_eq!(classify_location("GQ"), LocationClass::Mapped("GU"));
        assert_eq!(classify_location("US"), LocationClass::Dropped);
        assert_eq!(classify_location("**"), LocationClass::Dropped);
        assert_eq!(classify_location("KS"), LocationClass::Dropped);
        assert_eq!(classify_location("20"), LocationClass::Mapped("KS"));
        assert_eq!(classify_location("ZZ"), LocationClass::Unknown);
    }

    #[test]
    fn test_normalize_maps_drops_and_passes_through() {
        let result = normalize_locations(vec![
            coded("06", 1234),
            coded("US", 99999),
            coded("ZZ", 7),
            coded("RQ", 12),
        ]);

        assert_eq!(
            result.entries,
            vec![
                StateSeparations { state: "CA".to_string(), separations: json!(1234) },
                StateSeparations { state: "ZZ".to_string(), separations: json!(7) },
                StateSeparations { state: "PR".to_string(), separations: json!(12) },
            ]
        );
        assert_eq!(result.mapped, 2);
        assert_eq!(result.dropped.len(), 1);
        assert_eq!(result.dropped[0].code, "US");
        assert_eq!(result.unknown, vec!["ZZ".to_string()]);
    }

    #[test]
    fn test_rerun_on_normalized_output_is_a_no_op() {
        let first = normalize_locations(vec![coded("06", 5), coded("48", 9), coded("**", 1)]);
        let second_input: Vec<LocationEntry> = first
            .entries
            .iter()
            .cloned()
            .map(LocationEntry::Normalized)
            .collect();

        let second = normalize_locations(second_input);

        assert_eq!(second.entries, first.entries);
        assert_eq!(second.already_normalized, 2);
        assert!(second.dropped.is_empty());
        assert!(second.unknown.is_empty());
    }
}
