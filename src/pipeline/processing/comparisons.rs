use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::warn;

use crate::constants::{AGENCY_ACRONYMS, AGENCY_NAME_FIXES, COMPARISON_SMALL_WORDS};

static NAME_FIXES: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| AGENCY_NAME_FIXES.iter().copied().collect());

static NAME_FIXES_LOWER: Lazy<HashMap<String, &'static str>> = Lazy::new(|| {
    AGENCY_NAME_FIXES
        .iter()
        .map(|(from, to)| (from.to_lowercase(), *to))
        .collect()
});

static ACRONYMS: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| AGENCY_ACRONYMS.iter().copied().collect());

fn lookup_fix(name: &str) -> Option<&'static str> {
    NAME_FIXES
        .get(name)
        .or_else(|| NAME_FIXES_LOWER.get(&name.to_lowercase()))
        .copied()
}

/// Title case for comparison pages. Splits on single spaces only, so
/// hyphenated parts stay lowercase: `"BOARD-OIG" -> "Board-oig"`.
/// There is no `U.S.` fix here; those names come from the fix table.
pub fn comparison_title_case(name: &str) -> String {
    name.split(' ')
        .enumerate()
        .map(|(i, word)| {
            let lower = word.to_lowercase();
            if i > 0 && COMPARISON_SMALL_WORDS.contains(&lower.as_str()) {
                return lower;
            }
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Expand truncated source abbreviations and normalize casing.
pub fn clean_agency_name(name: &str) -> String {
    if let Some(fixed) = lookup_fix(name) {
        return fixed.to_string();
    }
    let titled = comparison_title_case(name);
    match lookup_fix(&titled) {
        Some(fixed) => fixed.to_string(),
        None => titled,
    }
}

/// `"Department of the Treasury" -> "Treasury"`, `"Environmental Protection Agency" -> "EPA"`
pub fn short_name(full_name: &str) -> String {
    let stripped = full_name
        .strip_prefix("Department of the ")
        .unwrap_or(full_name);
    let stripped = stripped.strip_prefix("Department of ").unwrap_or(stripped);
    ACRONYMS
        .get(stripped)
        .copied()
        .unwrap_or(stripped)
        .to_string()
}

/// A head-to-head page: both agencies' full records with cleaned names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub slug: String,
    pub title: String,
    pub agency1: Map<String, Value>,
    pub agency2: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonIndexEntry {
    pub slug: String,
    pub title: String,
    pub agency1_name: String,
    pub agency2_name: String,
}

impl From<&Comparison> for ComparisonIndexEntry {
    fn from(comparison: &Comparison) -> Self {
        let name = |agency: &Map<String, Value>| {
            agency
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        Self {
            slug: comparison.slug.clone(),
            title: comparison.title.clone(),
            agency1_name: name(&comparison.agency1),
            agency2_name: name(&comparison.agency2),
        }
    }
}

/// A matchup that could not be built because an agency code is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedMatchup {
    pub slug: String,
    pub missing_code: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonSet {
    pub comparisons: Vec<Comparison>,
    pub skipped: Vec<SkippedMatchup>,
}

impl ComparisonSet {
    pub fn index(&self) -> Vec<ComparisonIndexEntry> {
        self.comparisons.iter().map(ComparisonIndexEntry::from).collect()
    }
}

fn with_clean_name(agency: &Map<String, Value>) -> (Map<String, Value>, String) {
    let raw = agency.get("name").and_then(Value::as_str).unwrap_or_default();
    let name = clean_agency_name(raw);
    let mut cleaned = agency.clone();
    cleaned.insert("name".to_string(), Value::String(name.clone()));
    (cleaned, name)
}

/// Build one comparison per `(slug, code1, code2)` matchup, in matchup order.
pub fn build_comparisons(
    agencies: &[Map<String, Value>],
    matchups: &[(&str, &str, &str)],
) -> ComparisonSet {
    let by_code: HashMap<&str, &Map<String, Value>> = agencies
        .iter()
        .filter_map(|a| Some((a.get("code")?.as_str()?, a)))
        .collect();

    let mut set = ComparisonSet::default();
    for &(slug, code1, code2) in matchups {
        let (raw1, raw2) = match (by_code.get(code1), by_code.get(code2)) {
            (Some(raw1), Some(raw2)) => (*raw1, *raw2),
            (first, _) => {
                let missing = if first.is_none() { code1 } else { code2 };
                warn!("Skipping {}: agency code {} not found", slug, missing);
                set.skipped.push(SkippedMatchup {
                    slug: slug.to_string(),
                    missing_code: missing.to_string(),
                });
                continue;
            }
        };

        let (agency1, name1) = with_clean_name(raw1);
        let (agency2, name2) = with_clean_name(raw2);
        set.comparisons.push(Comparison {
            slug: slug.to_string(),
            title: format!("{} vs {}", short_name(&name1), short_name(&name2)),
            agency1,
            agency2,
        });
    }
    set
}
