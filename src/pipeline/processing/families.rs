use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::cmp::Ordering;

use super::format::{round_half_up, serialize_number, serialize_opt_number};
use crate::constants::{INVALID_CODE, INVALID_FAMILY, TOP_OCCUPATIONS};
use crate::types::OccupationEntry;

static NON_ALNUM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("slug pattern is valid"));

/// `"Medical & Health Sciences" -> "medical-health-sciences"`
pub fn slugify(name: &str) -> String {
    NON_ALNUM
        .replace_all(&name.to_lowercase(), "-")
        .trim_matches('-')
        .to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupationSummary {
    pub code: String,
    pub name: String,
    #[serde(serialize_with = "serialize_opt_number")]
    pub employees: Option<f64>,
    #[serde(serialize_with = "serialize_opt_number")]
    pub avg_salary: Option<f64>,
}

impl From<&OccupationEntry> for OccupationSummary {
    fn from(entry: &OccupationEntry) -> Self {
        Self {
            code: entry.code.clone(),
            name: entry.name.clone(),
            employees: entry.employees,
            avg_salary: entry.avg_salary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupationFamily {
    pub slug: String,
    pub name: String,
    #[serde(serialize_with = "serialize_number")]
    pub total_employees: f64,
    #[serde(serialize_with = "serialize_number")]
    pub avg_salary: f64,
    pub occupation_count: usize,
    pub top_occupations: Vec<OccupationSummary>,
    pub all_occupations: Vec<OccupationSummary>,
}

fn belongs_to_family(entry: &OccupationEntry) -> Option<&str> {
    match entry.family.as_deref() {
        Some(family) if !family.is_empty() && family != INVALID_FAMILY => {
            (entry.code != INVALID_CODE).then_some(family)
        }
        _ => None,
    }
}

fn build_family(name: String, members: Vec<&OccupationEntry>) -> OccupationFamily {
    let total_employees: f64 = members.iter().map(|o| o.employees.unwrap_or(0.0)).sum();
    let weighted: f64 = members
        .iter()
        .map(|o| o.employees.unwrap_or(0.0) * o.avg_salary.unwrap_or(0.0))
        .sum();
    let avg_salary = if total_employees > 0.0 {
        round_half_up(weighted / total_employees)
    } else {
        0.0
    };

    let mut sorted = members.clone();
    sorted.sort_by(|a, b| {
        b.employees
            .unwrap_or(0.0)
            .partial_cmp(&a.employees.unwrap_or(0.0))
            .unwrap_or(Ordering::Equal)
    });
    let all_occupations: Vec<OccupationSummary> =
        sorted.into_iter().map(OccupationSummary::from).collect();

    OccupationFamily {
        slug: slugify(&name),
        name,
        total_employees,
        avg_salary,
        occupation_count: members.len(),
        top_occupations: all_occupations.iter().take(TOP_OCCUPATIONS).cloned().collect(),
        all_occupations,
    }
}

/// Group occupations into families, largest family first.
pub fn rollup_families(occupations: &[OccupationEntry]) -> Vec<OccupationFamily> {
    let mut groups: Vec<(String, Vec<&OccupationEntry>)> = Vec::new();
    for entry in occupations {
        let Some(family) = belongs_to_family(entry) else {
            continue;
        };
        match groups.iter_mut().find(|(name, _)| name == family) {
            Some((_, members)) => members.push(entry),
            None => groups.push((family.to_string(), vec![entry])),
        }
    }

    let mut families: Vec<OccupationFamily> = groups
        .into_iter()
        .map(|(name, members)| build_family(name, members))
        .collect();
    families.sort_by(|a, b| {
        b.total_employees
            .partial_cmp(&a.total_employees)
            .unwrap_or(Ordering::Equal)
    });
    families
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn occ(code: &str, family: Option<&str>, employees: f64, salary: f64) -> OccupationEntry {
        OccupationEntry {
            code: code.to_string(),
            name: format!("Series {}", code),
            family: family.map(str::to_string),
            employees: Some(employees),
            avg_salary: Some(salary),
        }
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Medical & Health Sciences"), "medical-health-sciences");
        assert_eq!(slugify("  IT / Computing  "), "it-computing");
        assert_eq!(slugify("Engineering"), "engineering");
    }

    #[test]
    fn test_sentinels_are_skipped() {
        let families = rollup_families(&[
            occ("0801", Some("Engineering"), 10.0, 100.0),
            occ("*", Some("Engineering"), 1000.0, 1.0),
            occ("9999", Some("Invalid"), 1000.0, 1.0),
            occ("0000", None, 1000.0, 1.0),
        ]);
        assert_eq!(families.len(), 1);
        assert_eq!(families[0].occupation_count, 1);
        assert_eq!(families[0].total_employees, 10.0);
    }

    #[test]
    fn test_weighted_salary_and_ordering() {
        let families = rollup_families(&[
            occ("0301", Some("Administration"), 100.0, 60000.0),
            occ("0801", Some("Engineering"), 300.0, 100000.0),
            occ("0343", Some("Administration"), 100.0, 80000.0),
            occ("0830", Some("Engineering"), 500.0, 110000.0),
        ]);

        let names: Vec<&str> = families.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Engineering", "Administration"]);

        assert_eq!(families[0].slug, "engineering");
        assert_eq!(families[0].total_employees, 800.0);
        assert_eq!(families[0].avg_salary, 106250.0);
        assert_eq!(families[0].all_occupations[0].code, "0830");
        assert_eq!(families[1].avg_salary, 70000.0);
    }

    #[test]
    fn test_top_occupations_are_capped() {
        let entries: Vec<OccupationEntry> = (0..15)
            .map(|i| occ(&format!("{:04}", i), Some("Clerical"), i as f64, 40000.0))
            .collect();
        let families = rollup_families(&entries);
        assert_eq!(families[0].top_occupations.len(), 10);
        assert_eq!(families[0].all_occupations.len(), 15);
        assert_eq!(families[0].top_occupations[0].code, "0014");
    }

    #[test]
    fn test_serialized_shape() {
        let families = rollup_families(&[occ("0801", Some("Engineering"), 10.0, 95000.0)]);
        let value = serde_json::to_value(&families[0]).unwrap();
        assert_eq!(value["totalEmployees"], json!(10));
        assert_eq!(value["avgSalary"], json!(95000));
        assert_eq!(value["occupationCount"], json!(1));
        assert_eq!(value["topOccupations"][0]["avgSalary"], json!(95000));
    }
}
