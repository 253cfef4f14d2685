use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::cmp::Ordering;

use super::format::{format_number, format_percent, number_cell};
use crate::constants::{
    INVALID_CODE, INVALID_NAME, INVALID_STATE, NO_DATA_REPORTED_STATE,
};
use crate::error::Result;
use crate::types::{AgencyListEntry, OccupationEntry, SeparationsDataset, StateImpactEntry};

pub const AGENCIES_CSV: &str = "agencies.csv";
pub const OCCUPATIONS_CSV: &str = "occupations.csv";
pub const SEPARATIONS_CSV: &str = "separations.csv";
pub const STATE_IMPACT_CSV: &str = "state-impact.csv";

/// A flattened export: fixed headers plus one row of cells per record.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvTable {
    pub file_name: &'static str,
    pub headers: &'static [&'static str],
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Header line first, `\n` after every line, fields quoted only when
    /// they contain a comma, quote or line break.
    /// A bare `\r` also counts as a line break and gets quoted.
    pub fn to_csv_string(&self) -> Result<String> {
        let mut writer = WriterBuilder::new()
            .terminator(Terminator::Any(b'\n'))
            .quote_style(QuoteStyle::Necessary)
            .from_writer(Vec::new());

        writer.write_record(self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

pub fn agencies_table(agencies: &[AgencyListEntry]) -> CsvTable {
    CsvTable {
        file_name: AGENCIES_CSV,
        headers: &["code", "name", "employees", "avg_salary"],
        rows: agencies
            .iter()
            .map(|a| {
                vec![
                    a.code.clone(),
                    a.name.clone(),
                    number_cell(a.employees),
                    number_cell(a.avg_salary),
                ]
            })
            .collect(),
    }
}

pub fn occupations_table(occupations: &[OccupationEntry]) -> CsvTable {
    CsvTable {
        file_name: OCCUPATIONS_CSV,
        headers: &["code", "name", "family", "employees", "avg_salary"],
        rows: occupations
            .iter()
            .filter(|o| o.code != INVALID_CODE && o.name.to_lowercase() != INVALID_NAME)
            .map(|o| {
                vec![
                    o.code.clone(),
                    o.name.clone(),
                    o.family.clone().unwrap_or_default(),
                    number_cell(o.employees),
                    number_cell(o.avg_salary),
                ]
            })
            .collect(),
    }
}

/// Grand total of one separation type across every month.
#[derive(Debug, Clone, PartialEq)]
pub struct SeparationTotal {
    pub code: String,
    pub label: String,
    pub count: f64,
}

/// Per-type totals, largest first. Ties keep the order of `types`.
pub fn separation_totals(dataset: &SeparationsDataset) -> Vec<SeparationTotal> {
    let mut totals: Vec<SeparationTotal> = dataset
        .types
        .iter()
        .map(|(code, label)| SeparationTotal {
            code: code.clone(),
            label: label
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| label.to_string()),
            count: dataset
                .monthly
                .iter()
                .map(|month| month.get(code).and_then(|v| v.as_f64()).unwrap_or(0.0))
                .sum(),
        })
        .collect();

    totals.sort_by(|a, b| b.count.partial_cmp(&a.count).unwrap_or(Ordering::Equal));
    totals
}

pub fn separations_table(dataset: &SeparationsDataset) -> CsvTable {
    let totals = separation_totals(dataset);
    let grand_total: f64 = totals.iter().map(|t| t.count).sum();

    CsvTable {
        file_name: SEPARATIONS_CSV,
        headers: &["code", "type", "count", "percentage"],
        rows: totals
            .into_iter()
            .map(|t| {
                let share = if grand_total > 0.0 {
                    t.count / grand_total * 100.0
                } else {
                    0.0
                };
                vec![t.code, t.label, format_number(t.count), format_percent(share)]
            })
            .collect(),
    }
}

pub fn state_impact_table(rows: &[StateImpactEntry]) -> CsvTable {
    CsvTable {
        file_name: STATE_IMPACT_CSV,
        headers: &[
            "state",
            "current_employees",
            "separations_2025",
            "separations_2024",
            "change_pct",
            "rifs",
            "quits",
            "impact_pct",
        ],
        rows: rows
            .iter()
            .filter(|s| s.state != INVALID_STATE && s.state != NO_DATA_REPORTED_STATE)
            .map(|s| {
                vec![
                    s.state.clone(),
                    number_cell(s.current_employees),
                    number_cell(s.seps2025),
                    number_cell(s.seps2024),
                    number_cell(s.sep_change),
                    number_cell(s.rifs),
                    number_cell(s.quits),
                    number_cell(s.impact_pct),
                ]
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn occupation(code: &str, name: &str) -> OccupationEntry {
        OccupationEntry {
            code: code.to_string(),
            name: name.to_string(),
            family: Some("Engineering".to_string()),
            employees: Some(10.0),
            avg_salary: Some(95000.5),
        }
    }

    #[test]
    fn test_quoting_doubles_embedded_quotes() {
        let table = CsvTable {
            file_name: "t.csv",
            headers: &["code", "name"],
            rows: vec![vec!["X1".to_string(), "Bureau, of \"Things\"".to_string()]],
        };
        assert_eq!(
            table.to_csv_string().unwrap(),
            "code,name\nX1,\"Bureau, of \"\"Things\"\"\"\n"
        );
    }

    #[test]
    fn test_carriage_return_is_quoted() {
        let table = CsvTable {
            file_name: "t.csv",
            headers: &["code", "name"],
            rows: vec![vec!["X2".to_string(), "Office\rof Records".to_string()]],
        };
        assert_eq!(
            table.to_csv_string().unwrap(),
            "code,name\nX2,\"Office\rof Records\"\n"
        );
    }

    #[test]
    fn test_plain_values_are_not_quoted() {
        let table = agencies_table(&[AgencyListEntry {
            code: "VA".to_string(),
            name: "Department of Veterans Affairs".to_string(),
            employees: Some(482000.0),
            avg_salary: None,
        }]);
        assert_eq!(
            table.to_csv_string().unwrap(),
            "code,name,employees,avg_salary\nVA,Department of Veterans Affairs,482000,\n"
        );
    }

    #[test]
    fn test_occupation_sentinels_are_filtered() {
        let table = occupations_table(&[
            occupation("0801", "General Engineering"),
            occupation("*", "All"),
            occupation("9999", "INVALID"),
        ]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(
            table.rows[0],
            vec!["0801", "General Engineering", "Engineering", "10", "95000.5"]
        );
    }

    #[test]
    fn test_separation_percentages_and_order() {
        let dataset: SeparationsDataset = serde_json::from_value(json!({
            "types": {"A": "Quit", "B": "RIF"},
            "monthly": [
                {"month": "202501", "A": 10, "B": 30},
                {"month": "202502", "A": 20, "B": 40}
            ]
        }))
        .unwrap();

        let table = separations_table(&dataset);
        assert_eq!(
            table.rows,
            vec![
                vec!["B", "RIF", "70", "70.0"],
                vec!["A", "Quit", "30", "30.0"],
            ]
        );
    }

    #[test]
    fn test_separation_share_ties_round_up() {
        let dataset: SeparationsDataset = serde_json::from_value(json!({
            "types": {"A": "Quit", "B": "RIF"},
            "monthly": [{"month": "202501", "A": 1, "B": 15}]
        }))
        .unwrap();

        let table = separations_table(&dataset);
        assert_eq!(
            table.rows,
            vec![
                vec!["B", "RIF", "15", "93.8"],
                vec!["A", "Quit", "1", "6.3"],
            ]
        );
    }

    #[test]
    fn test_missing_months_count_as_zero() {
        let dataset: SeparationsDataset = serde_json::from_value(json!({
            "types": {"SA": "Transfer Out", "SH": "RIF", "SK": "Death"},
            "monthly": [{"month": "202501", "SA": 5}, {"month": "202502", "SH": 5}]
        }))
        .unwrap();

        let totals = separation_totals(&dataset);
        let codes: Vec<&str> = totals.iter().map(|t| t.code.as_str()).collect();
        assert_eq!(codes, vec!["SA", "SH", "SK"]);
        assert_eq!(totals[2].count, 0.0);
    }

    #[test]
    fn test_empty_grand_total_reports_zero_share() {
        let dataset: SeparationsDataset =
            serde_json::from_value(json!({"types": {"SA": "Transfer Out"}, "monthly": []}))
                .unwrap();
        assert_eq!(separations_table(&dataset).rows[0][3], "0.0");
    }

    #[test]
    fn test_state_impact_filters_sentinels() {
        let row = |state: &str| StateImpactEntry {
            state: state.to_string(),
            current_employees: Some(100.0),
            seps2025: Some(10.0),
            seps2024: Some(5.0),
            sep_change: Some(100.0),
            rifs: Some(1.0),
            quits: Some(2.0),
            impact_pct: Some(10.0),
        };
        let table = state_impact_table(&[row("VA"), row("INVALID"), row("NO DATA REPORTED")]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0], vec!["VA", "100", "10", "5", "100", "1", "2", "10"]);
    }
}
