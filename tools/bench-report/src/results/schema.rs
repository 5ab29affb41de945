use crate::error::IdentityError;
use crate::group::{GroupKey, ToolKey};
use serde::Deserialize;
use serde_json::Value;
use std::borrow::Cow;
use std::path::PathBuf;

// -- RESULT DOCUMENTS (results/submitted/*.json) --

/// Shape of a submitted result document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SchemaVersion {
    /// Flat `result_data.metrics` / `result_data.scores`.
    V1,
    /// Per-implementation `result_data.implementations.{api,ui}`.
    V2,
}

impl SchemaVersion {
    pub fn as_str(self) -> &'static str {
        match self {
            SchemaVersion::V1 => "1.0",
            SchemaVersion::V2 => "2.0",
        }
    }

    /// An `implementations` mapping under `result_data` always means v2, whatever
    /// `schema_version` claims.
    pub fn detect(doc: &Value) -> Self {
        if doc
            .get("result_data")
            .and_then(|rd| rd.get("implementations"))
            .is_some()
        {
            return SchemaVersion::V2;
        }
        match doc.get("schema_version").and_then(Value::as_str) {
            Some("2.0") => SchemaVersion::V2,
            _ => SchemaVersion::V1,
        }
    }
}

/// One parsed result file plus the metadata injected at load time.
#[derive(Debug, Clone)]
pub struct RawResult {
    pub filename: String,
    pub path: PathBuf,
    pub schema: SchemaVersion,
    pub document: Value,
}

impl RawResult {
    pub fn new(filename: impl Into<String>, path: impl Into<PathBuf>, document: Value) -> Self {
        let schema = SchemaVersion::detect(&document);
        Self {
            filename: filename.into(),
            path: path.into(),
            schema,
            document,
        }
    }

    pub fn result_data(&self) -> Option<&Value> {
        self.document.get("result_data")
    }

    pub fn run_identity(&self) -> Result<RunIdentity, IdentityError> {
        let ri = self
            .result_data()
            .and_then(|rd| rd.get("run_identity"))
            .ok_or(IdentityError::Missing)?;
        Ok(RunIdentity::deserialize(ri)?)
    }
}

/// `result_data.run_identity`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RunIdentity {
    pub spec_reference: String,
    pub target_model: String,
    pub api_style: String,
    pub tool_name: String,
    #[serde(default)]
    pub tool_version: Option<Value>,
    /// Missing is `Null`, which lands in no slot.
    #[serde(default)]
    pub run_number: Value,
}

impl RunIdentity {
    pub fn group_key(&self) -> GroupKey {
        GroupKey {
            spec_reference: self.spec_reference.clone(),
            target_model: self.target_model.clone(),
            api_style: self.api_style.clone(),
        }
    }

    pub fn tool_key(&self) -> ToolKey {
        let version = self.tool_version.as_ref().map(scalar_text).unwrap_or_default();
        ToolKey::new(&self.tool_name, &version)
    }

    pub fn run_slot(&self) -> Option<RunSlot> {
        RunSlot::from_run_number(&self.run_number)
    }
}

/// Which of a tool's two benchmark runs a result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunSlot {
    First,
    Second,
}

impl RunSlot {
    pub fn from_run_number(v: &Value) -> Option<Self> {
        let n = v
            .as_u64()
            .or_else(|| v.as_f64().filter(|f| *f >= 0.0 && f.fract() == 0.0).map(|f| f as u64))?;
        match n {
            1 => Some(RunSlot::First),
            2 => Some(RunSlot::Second),
            _ => None,
        }
    }
}

/// Text form of a JSON scalar as it should appear in a report. `Null` is empty.
pub fn scalar_text(v: &Value) -> Cow<'_, str> {
    match v {
        Value::Null => Cow::Borrowed(""),
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}
