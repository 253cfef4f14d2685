use once_cell::sync::Lazy;
use std::collections::HashMap;
use tracing::debug;

use super::format::{format_grouped, format_number, json_number, round_half_up};
use crate::constants::{INVALID_CODE, NO_DATA_REPORTED_CODE, STATE_NARRATIVES};
use crate::error::{PipelineError, Result};
use crate::storage::DetailFile;
use crate::types::{StateSeparations, StateSummary};

static CURATED_NARRATIVES: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| STATE_NARRATIVES.iter().copied().collect());

/// Employee-weighted national average salary, rounded to whole dollars.
///
/// Invalid (`*`) and no-data (`NDR`) regions are excluded, as are regions
/// without an average salary, from both sums.
pub fn national_average_salary(states: &[StateSummary]) -> Result<f64> {
    let (weighted, employees) = states
        .iter()
        .filter(|s| s.code != INVALID_CODE && s.code != NO_DATA_REPORTED_CODE)
        .filter_map(|s| Some((s.employees.unwrap_or(0.0), s.avg_salary?)))
        .fold((0.0, 0.0), |(weighted, total), (employees, salary)| {
            (weighted + employees * salary, total + employees)
        });

    if employees <= 0.0 {
        return Err(PipelineError::NoValidRegions);
    }
    Ok(round_half_up(weighted / employees))
}

/// Separations per state abbreviation. Later entries win; non-numeric
/// counts read as 0.
pub fn separations_by_state(entries: &[StateSeparations]) -> HashMap<String, f64> {
    entries
        .iter()
        .map(|e| (e.state.clone(), e.separations.as_f64().unwrap_or(0.0)))
        .collect()
}

/// Percentage deviation from the national figure, one decimal place.
pub fn salary_vs_national(avg_salary: Option<f64>, national: f64) -> f64 {
    match avg_salary {
        Some(salary) if salary != 0.0 && national != 0.0 => {
            round_half_up(((salary - national) / national) * 1000.0) / 10.0
        }
        _ => 0.0,
    }
}

/// The published narrative for a state: curated text for the largest federal
/// footprints, a generated sentence otherwise.
pub fn state_narrative(
    code: &str,
    name: &str,
    employees: f64,
    avg_salary: Option<f64>,
    pct_diff: f64,
    separations: f64,
) -> String {
    if let Some(text) = CURATED_NARRATIVES.get(code) {
        return text.to_string();
    }

    let reductions = format!(
        "DOGE workforce reductions in 2025 resulted in {} separations statewide.",
        format_grouped(separations)
    );

    match avg_salary {
        Some(salary) => {
            let direction = if pct_diff >= 0.0 {
                format!("{}% above", format_number(pct_diff))
            } else {
                format!("{}% below", format_number(pct_diff.abs()))
            };
            format!(
                "{} employs {} federal workers with an average salary of ${}, {} the national average. {}",
                name,
                format_grouped(employees),
                format_grouped(salary),
                direction,
                reductions
            )
        }
        None => format!(
            "{} employs {} federal workers. {}",
            name,
            format_grouped(employees),
            reductions
        ),
    }
}

/// What was attached to one state detail file.
#[derive(Debug, Clone, PartialEq)]
pub struct StateEnrichment {
    pub code: String,
    pub separations: f64,
    pub salary_vs_national: f64,
    pub curated_narrative: bool,
}

/// Attaches national comparisons, separations and a narrative to state
/// detail files.
#[derive(Debug, Clone)]
pub struct StateEnricher {
    pub national_avg_salary: f64,
    pub separations: HashMap<String, f64>,
}

impl StateEnricher {
    pub fn new(states: &[StateSummary], separations: &[StateSeparations]) -> Result<Self> {
        Ok(Self {
            national_avg_salary: national_average_salary(states)?,
            separations: separations_by_state(separations),
        })
    }

    /// Set `separations2025`, `nationalAvgSalary`, `salaryVsNational` and
    /// `dogeNarrative`. Existing values of those keys are replaced, so a
    /// rerun produces the same file.
    pub fn enrich(&self, detail: &mut DetailFile) -> Result<StateEnrichment> {
        let code = detail.code()?.to_string();
        let name = detail.str_field("name").unwrap_or(&code).to_string();
        let employees = detail.number("employees").unwrap_or(0.0);
        let avg_salary = detail.number("avgSalary");

        let separations = self.separations.get(&code).copied().unwrap_or(0.0);
        let pct_diff = salary_vs_national(avg_salary, self.national_avg_salary);
        let narrative = state_narrative(&code, &name, employees, avg_salary, pct_diff, separations);

        detail.set("separations2025", json_number(separations));
        detail.set("nationalAvgSalary", json_number(self.national_avg_salary));
        detail.set("salaryVsNational", json_number(pct_diff));
        detail.set("dogeNarrative", narrative);

        debug!(code = %code, separations, pct_diff, "enriched state detail");

        Ok(StateEnrichment {
            curated_narrative: CURATED_NARRATIVES.contains_key(code.as_str()),
            code,
            separations,
            salary_vs_national: pct_diff,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn state(code: &str, employees: f64, avg_salary: Option<f64>) -> StateSummary {
        StateSummary {
            code: code.to_string(),
            name: Some(code.to_string()),
            employees: Some(employees),
            avg_salary,
        }
    }

    fn detail(value: serde_json::Value) -> DetailFile {
        DetailFile::from_map(value.as_object().unwrap().clone())
    }

    #[test]
    fn test_weighted_national_average() {
        let states = vec![
            state("AA", 100.0, Some(50000.0)),
            state("BB", 300.0, Some(70000.0)),
        ];
        assert_eq!(national_average_salary(&states).unwrap(), 65000.0);
    }

    #[test]
    fn test_invalid_and_unreported_regions_are_excluded() {
        let states = vec![
            state("AA", 100.0, Some(50000.0)),
            state("*", 1000.0, Some(10.0)),
            state("NDR", 1000.0, Some(10.0)),
            state("CC", 500.0, None),
        ];
        assert_eq!(national_average_salary(&states).unwrap(), 50000.0);
    }

    #[test]
    fn test_no_valid_regions_is_an_error() {
        let states = vec![state("*", 10.0, Some(1.0))];
        assert!(matches!(
            national_average_salary(&states),
            Err(PipelineError::NoValidRegions)
        ));
    }

    #[test]
    fn test_salary_vs_national() {
        assert_eq!(salary_vs_national(Some(71500.0), 65000.0), 10.0);
        assert_eq!(salary_vs_national(Some(58500.0), 65000.0), -10.0);
        assert_eq!(salary_vs_national(Some(65432.0), 65000.0), 0.7);
        assert_eq!(salary_vs_national(None, 65000.0), 0.0);
        assert_eq!(salary_vs_national(Some(0.0), 65000.0), 0.0);
    }

    #[test]
    fn test_generated_narrative() {
        let text = state_narrative("OH", "Ohio", 48123.0, Some(81234.0), -3.4, 2150.0);
        assert_eq!(
            text,
            "Ohio employs 48,123 federal workers with an average salary of $81,234, 3.4% below the national average. DOGE workforce reductions in 2025 resulted in 2,150 separations statewide."
        );
    }

    #[test]
    fn test_curated_narrative_wins() {
        let text = state_narrative("DC", "District of Columbia", 1.0, Some(1.0), 0.0, 0.0);
        assert!(text.starts_with("The Beltway Bubble"));
    }

    #[test]
    fn test_enrich_sets_fields_and_is_idempotent() {
        let enricher = StateEnricher {
            national_avg_salary: 65000.0,
            separations: HashMap::from([("OH".to_string(), 2150.0)]),
        };
        let mut file = detail(json!({
            "code": "OH",
            "name": "Ohio",
            "employees": 48123,
            "avgSalary": 71500,
            "topOccupations": []
        }));

        let summary = enricher.enrich(&mut file).unwrap();
        assert_eq!(summary.separations, 2150.0);
        assert_eq!(summary.salary_vs_national, 10.0);
        assert!(!summary.curated_narrative);
        assert_eq!(file.get("separations2025"), Some(&json!(2150)));
        assert_eq!(file.get("nationalAvgSalary"), Some(&json!(65000)));
        assert_eq!(file.get("salaryVsNational"), Some(&json!(10)));
        assert_eq!(file.get("employees"), Some(&json!(48123)));

        let first = file.clone();
        enricher.enrich(&mut file).unwrap();
        assert_eq!(file.get("dogeNarrative"), first.get("dogeNarrative"));
        assert_eq!(file.get("salaryVsNational"), first.get("salaryVsNational"));
    }

    #[test]
    fn test_missing_separations_default_to_zero() {
        let enricher = StateEnricher {
            national_avg_salary: 65000.0,
            separations: HashMap::new(),
        };
        let mut file = detail(json!({"code": "WY", "name": "Wyoming", "employees": 10}));
        let summary = enricher.enrich(&mut file).unwrap();
        assert_eq!(summary.separations, 0.0);
        assert_eq!(file.get("separations2025"), Some(&json!(0)));
        assert_eq!(file.get("salaryVsNational"), Some(&json!(0)));
        assert_eq!(
            file.str_field("dogeNarrative"),
            Some("Wyoming employs 10 federal workers. DOGE workforce reductions in 2025 resulted in 0 separations statewide.")
        );
    }

    #[test]
    fn test_missing_code_is_an_error() {
        let enricher = StateEnricher {
            national_avg_salary: 65000.0,
            separations: HashMap::new(),
        };
        let mut file = detail(json!({"name": "Nowhere"}));
        assert!(matches!(
            enricher.enrich(&mut file),
            Err(PipelineError::MissingField(_))
        ));
    }
}
