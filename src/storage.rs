//! Whole-file JSON document storage.
//!
//! Every step reads its inputs fully into memory and writes each output as a
//! single pretty-printed file (2-space indent, trailing newline). Nothing is
//! patched in place on disk.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{PipelineError, Result};

/// What happened when an output file was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// The file already held exactly this content.
    Unchanged,
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| PipelineError::json(path, e))
}

/// Render a value the way every data file is stored.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut out = serde_json::to_string_pretty(value)?;
    out.push('\n');
    Ok(out)
}

pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<WriteOutcome> {
    let content = to_pretty_json(value)?;
    write_text(path, &content)
}

/// Overwrite `path` with `content`, creating parent directories as needed.
pub fn write_text(path: &Path, content: &str) -> Result<WriteOutcome> {
    if let Ok(existing) = fs::read(path) {
        if existing == content.as_bytes() {
            debug!(path = %path.display(), "content unchanged");
            return Ok(WriteOutcome::Unchanged);
        }
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_dir(parent)?;
        }
    }
    fs::write(path, content).map_err(|e| PipelineError::io(path, e))?;
    debug!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(WriteOutcome::Written)
}

pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| PipelineError::io(dir, e))
}

/// All `*.json` files directly under `dir`, sorted by file name so that
/// merge precedence does not depend on directory iteration order.
pub fn list_json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| PipelineError::io(dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| PipelineError::io(dir, e))?.path();
        if path.is_file() && path.extension().map_or(false, |ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// A top-level JSON object holding one named collection of records among
/// other, untouched keys.
#[derive(Debug, Clone)]
pub struct AggregateDocument {
    body: Map<String, Value>,
}

impl AggregateDocument {
    pub fn load(path: &Path) -> Result<Self> {
        let value: Value = read_json(path)?;
        Self::from_value(value).map_err(|e| match e {
            PipelineError::MissingField(field) => {
                PipelineError::MissingField(format!("{} in {}", field, path.display()))
            }
            other => other,
        })
    }

    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(body) => Ok(Self { body }),
            _ => Err(PipelineError::MissingField(
                "top-level object".to_string(),
            )),
        }
    }

    pub fn records<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        let collection = self
            .body
            .get(key)
            .ok_or_else(|| PipelineError::MissingField(key.to_string()))?;
        Ok(serde_json::from_value(collection.clone())?)
    }

    /// Replace the whole collection. The key keeps its position in the document.
    pub fn replace_records<T: Serialize>(&mut self, key: &str, records: &[T]) -> Result<()> {
        let value = serde_json::to_value(records)?;
        self.body.insert(key.to_string(), value);
        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<WriteOutcome> {
        write_json(path, &self.body)
    }

    pub fn as_value(&self) -> Value {
        Value::Object(self.body.clone())
    }
}

/// A per-entity JSON object that is enriched by adding derived keys.
/// Existing values are never decoded and re-encoded, so numbers keep their
/// exact source representation.
#[derive(Debug, Clone)]
pub struct DetailFile {
    body: Map<String, Value>,
}

impl DetailFile {
    pub fn load(path: &Path) -> Result<Self> {
        let value: Value = read_json(path)?;
        match value {
            Value::Object(body) => Ok(Self { body }),
            _ => Err(PipelineError::MissingField(format!(
                "top-level object in {}",
                path.display()
            ))),
        }
    }

    pub fn from_map(body: Map<String, Value>) -> Self {
        Self { body }
    }

    pub fn code(&self) -> Result<&str> {
        self.str_field("code")
            .ok_or_else(|| PipelineError::MissingField("code".to_string()))
    }

    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.body.get(key).and_then(Value::as_str)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.body.get(key).and_then(Value::as_f64)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.body.get(key)
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.body.insert(key.to_string(), value.into());
    }

    pub fn save(&self, path: &Path) -> Result<WriteOutcome> {
        write_json(path, &self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use tempfile::tempdir;

    #[derive(Debug, Serialize, Deserialize)]
    struct Entry {
        code: String,
        value: u64,
    }

    #[test]
    fn test_pretty_json_has_two_space_indent_and_newline() {
        let out = to_pretty_json(&json!({"a": [1]})).unwrap();
        assert_eq!(out, "{\n  \"a\": [\n    1\n  ]\n}\n");
    }

    #[test]
    fn test_replace_records_keeps_key_position_and_siblings() {
        let mut doc = AggregateDocument::from_value(json!({
            "title": "t",
            "items": [{"code": "A", "value": 1}],
            "footer": true
        }))
        .unwrap();

        let mut items: Vec<Entry> = doc.records("items").unwrap();
        items[0].value = 2;
        doc.replace_records("items", &items).unwrap();

        let keys: Vec<String> = doc.as_value().as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["title", "items", "footer"]);
        assert_eq!(doc.as_value()["items"][0]["value"], json!(2));
    }

    #[test]
    fn test_missing_collection_is_an_error() {
        let doc = AggregateDocument::from_value(json!({"other": []})).unwrap();
        let result: Result<Vec<Entry>> = doc.records("items");
        assert!(matches!(result, Err(PipelineError::MissingField(_))));
    }

    #[test]
    fn test_write_reports_unchanged_on_second_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("out.json");
        let value = json!({"x": 1});
        assert_eq!(write_json(&path, &value).unwrap(), WriteOutcome::Written);
        assert_eq!(write_json(&path, &value).unwrap(), WriteOutcome::Unchanged);
    }

    #[test]
    fn test_list_json_files_is_sorted_and_filtered() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.json"), "{}").unwrap();
        fs::write(dir.path().join("a.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        let files = list_json_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.json", "b.json"]);
    }

    #[test]
    fn test_malformed_json_names_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();
        let err = read_json::<Value>(&path).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_detail_file_keeps_integer_encoding() {
        let mut detail = DetailFile::from_map(
            json!({"code": "CA", "employees": 1200})
                .as_object()
                .unwrap()
                .clone(),
        );
        detail.set("extra", 1);
        let out = to_pretty_json(&detail.body).unwrap();
        assert!(out.contains("\"employees\": 1200,"));
        assert_eq!(detail.number("employees"), Some(1200.0));
    }
}
