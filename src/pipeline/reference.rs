use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

use crate::config::DataPaths;
use crate::error::Result;
use crate::storage::{list_json_files, read_json};
use crate::types::{AgencyListEntry, SubagencyListing};

/// Canonical code -> name tables, built once per run and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    /// Top-level agencies, already in display casing.
    pub agency_names: HashMap<String, String>,
    /// Subagencies, in source (upper) casing.
    pub subagency_names: HashMap<String, String>,
    /// Parent agency display names declared by each subagency listing,
    /// keyed by the listing's file stem (the parent code).
    pub parent_names: HashMap<String, String>,
}

impl ReferenceData {
    /// Load `agency-list.json`, `agency-subagencies/*.json` and
    /// `agencies/*.json`. Any missing or malformed file is fatal.
    pub fn load(paths: &DataPaths) -> Result<Self> {
        let agencies: Vec<AgencyListEntry> = read_json(&paths.agency_list())?;

        let primary = load_listings(&paths.subagency_listings_dir())?;
        let secondary: Vec<SubagencyListing> = load_listings(&paths.agency_details_dir())?
            .into_iter()
            .map(|(_, listing)| listing)
            .collect();

        let reference = Self::from_sources(&agencies, &primary, &secondary);
        info!(
            agencies = reference.agency_names.len(),
            subagencies = reference.subagency_names.len(),
            parent_listings = reference.parent_names.len(),
            "loaded reference data"
        );
        Ok(reference)
    }

    /// Merge the sources. Within the primary listings a later file overwrites
    /// an earlier one; the secondary listings only fill codes still missing.
    pub fn from_sources(
        agencies: &[AgencyListEntry],
        primary: &[(String, SubagencyListing)],
        secondary: &[SubagencyListing],
    ) -> Self {
        let mut reference = Self::default();

        for agency in agencies {
            reference
                .agency_names
                .insert(agency.code.clone(), agency.name.clone());
        }

        for (parent_code, listing) in primary {
            if let Some(parent_name) = &listing.parent_name {
                reference
                    .parent_names
                    .insert(parent_code.clone(), parent_name.clone());
            }
            for sub in listing.subagencies.iter().flatten() {
                if let Some(name) = &sub.name {
                    reference
                        .subagency_names
                        .insert(sub.code.clone(), name.clone());
                }
            }
        }

        for listing in secondary {
            for sub in listing.subagencies.iter().flatten() {
                let Some(name) = &sub.name else { continue };
                let known = reference
                    .subagency_names
                    .get(&sub.code)
                    .map_or(false, |existing| !existing.is_empty());
                if !known {
                    reference
                        .subagency_names
                        .insert(sub.code.clone(), name.clone());
                }
            }
        }

        reference
    }
}

fn load_listings(dir: &Path) -> Result<Vec<(String, SubagencyListing)>> {
    let mut listings = Vec::new();
    for path in list_json_files(dir)? {
        let listing: SubagencyListing = read_json(&path)?;
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        debug!(file = %path.display(), "loaded subagency listing");
        listings.push((stem, listing));
    }
    Ok(listings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CodeName;

    fn sub(code: &str, name: &str) -> CodeName {
        CodeName {
            code: code.to_string(),
            name: Some(name.to_string()),
        }
    }

    fn listing(parent: Option<&str>, subs: Vec<CodeName>) -> SubagencyListing {
        SubagencyListing {
            parent_name: parent.map(str::to_string),
            subagencies: Some(subs),
        }
    }

    #[test]
    fn test_primary_listing_wins_over_secondary() {
        let primary = vec![(
            "DJ".to_string(),
            listing(Some("DEPARTMENT OF JUSTICE"), vec![sub("DJ15", "FEDERAL BUREAU OF INVESTIGATION")]),
        )];
        let secondary = vec![listing(
            None,
            vec![sub("DJ15", "FBI"), sub("DJ02", "BUREAU OF PRISONS")],
        )];

        let reference = ReferenceData::from_sources(&[], &primary, &secondary);

        assert_eq!(reference.subagency_names["DJ15"], "FEDERAL BUREAU OF INVESTIGATION");
        assert_eq!(reference.subagency_names["DJ02"], "BUREAU OF PRISONS");
        assert_eq!(reference.parent_names["DJ"], "DEPARTMENT OF JUSTICE");
    }

    #[test]
    fn test_later_primary_file_overwrites_earlier() {
        let primary = vec![
            ("AA".to_string(), listing(None, vec![sub("X1", "FIRST")])),
            ("BB".to_string(), listing(None, vec![sub("X1", "SECOND")])),
        ];
        let reference = ReferenceData::from_sources(&[], &primary, &[]);
        assert_eq!(reference.subagency_names["X1"], "SECOND");
    }

    #[test]
    fn test_secondary_fills_empty_names() {
        let primary = vec![("AA".to_string(), listing(None, vec![sub("X1", "")]))];
        let secondary = vec![listing(None, vec![sub("X1", "FILLED")])];
        let reference = ReferenceData::from_sources(&[], &primary, &secondary);
        assert_eq!(reference.subagency_names["X1"], "FILLED");
    }

    #[test]
    fn test_agency_names_come_from_agency_list() {
        let agencies = vec![AgencyListEntry {
            code: "VA".to_string(),
            name: "Department of Veterans Affairs".to_string(),
            employees: Some(480000.0),
            avg_salary: None,
        }];
        let reference = ReferenceData::from_sources(&agencies, &[], &[]);
        assert_eq!(reference.agency_names["VA"], "Department of Veterans Affairs");
        assert!(reference.subagency_names.is_empty());
    }
}
