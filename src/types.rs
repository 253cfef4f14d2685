use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A top-level agency from `agency-list.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgencyListEntry {
    pub code: String,
    pub name: String,
    pub employees: Option<f64>,
    pub avg_salary: Option<f64>,
}

/// A `{code, name}` pair inside a subagency listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeName {
    pub code: String,
    pub name: Option<String>,
}

/// One file from `agency-subagencies/` or `agencies/`. Only the primary
/// listings carry `parentName`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubagencyListing {
    pub parent_name: Option<String>,
    pub subagencies: Option<Vec<CodeName>>,
}

/// A record identified by a bureaucratic code whose `name` gets resolved.
/// Held as its raw JSON object so every field, a `null` name and the key
/// order all survive a rewrite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodedRecord(Map<String, Value>);

impl CodedRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn code(&self) -> Option<&str> {
        self.0.get("code").and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    /// Sets `name`, in place when the key exists and last otherwise.
    pub fn set_name(&mut self, name: String) {
        self.0.insert("name".to_string(), Value::String(name));
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// A separations count keyed by a state abbreviation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSeparations {
    pub state: String,
    #[serde(default)]
    pub separations: Value,
}

/// An entry of `separations_by_location`, either still carrying its raw
/// location code or already normalized by an earlier run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocationEntry {
    Coded {
        code: String,
        #[serde(default)]
        separations: Value,
    },
    Normalized(StateSeparations),
}

/// Per-state headline figures from `states.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSummary {
    pub code: String,
    pub name: Option<String>,
    pub employees: Option<f64>,
    pub avg_salary: Option<f64>,
}

/// An occupational series from `occupations.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupationEntry {
    pub code: String,
    pub name: String,
    pub family: Option<String>,
    pub employees: Option<f64>,
    pub avg_salary: Option<f64>,
}

/// `separations.json`: type labels keyed by separation code, plus one row per
/// month holding a count for each code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeparationsDataset {
    pub types: Map<String, Value>,
    pub monthly: Vec<Map<String, Value>>,
}

/// A row of `state-impact.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateImpactEntry {
    pub state: String,
    pub current_employees: Option<f64>,
    pub seps2025: Option<f64>,
    pub seps2024: Option<f64>,
    pub sep_change: Option<f64>,
    pub rifs: Option<f64>,
    pub quits: Option<f64>,
    pub impact_pct: Option<f64>,
}
