//! JSON scenario persistence
//!
//! A saved scenario is a `{ name, savedAt, inputs }` document. Loading is
//! all-or-nothing: missing fields fall back to the baseline defaults,
//! unknown fields are ignored, and anything unparseable or invalid leaves
//! the caller's current assumption set untouched.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{AssumptionError, AssumptionSet};

/// Failure to save or load a scenario document.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("scenario file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("scenario document malformed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("scenario rejected: {0}")]
    Invalid(#[from] AssumptionError),
}

/// On-disk scenario document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioFile {
    /// Human-readable scenario name
    #[serde(default)]
    pub name: String,

    /// When the document was written
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,

    /// The assumption set itself
    pub inputs: AssumptionSet,
}

/// Write an assumption set to `path` as a named, timestamped document.
pub fn save_scenario(path: &Path, inputs: &AssumptionSet, name: &str) -> Result<(), ScenarioError> {
    let doc = ScenarioFile {
        name: name.to_string(),
        saved_at: Some(Utc::now()),
        inputs: inputs.clone(),
    };
    use std::io::Write;
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &doc)?;
    writer.flush()?;
    Ok(())
}

/// Read and validate an assumption set from `path`.
///
/// Returns the fully-merged set or an error; never a partially-parsed one.
pub fn load_scenario(path: &Path) -> Result<AssumptionSet, ScenarioError> {
    let file = File::open(path)?;
    let doc: ScenarioFile = serde_json::from_reader(BufReader::new(file))?;
    doc.inputs.validate()?;
    Ok(doc.inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::FinancingType;
    use std::fs;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("locker_model_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_round_trip_preserves_every_field() {
        let mut inputs = AssumptionSet::default();
        inputs.company_name = "Campus North".to_string();
        inputs.financing_type = FinancingType::Loan;
        inputs.loan_amount = 250_000.0;
        inputs.subscriber_growth_rate = 2.5;

        let path = temp_path("round_trip.json");
        save_scenario(&path, &inputs, "round trip").unwrap();
        let loaded = load_scenario(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(loaded, inputs);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let path = temp_path("sparse.json");
        fs::write(&path, r#"{ "inputs": { "deliveriesPerMonth": 4000 } }"#).unwrap();
        let loaded = load_scenario(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(loaded.deliveries_per_month, 4000.0);
        // Everything else is the baseline
        assert_eq!(loaded.num_student_lockers, 30);
        assert_eq!(loaded.financing_type, FinancingType::Equity);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let path = temp_path("unknown.json");
        fs::write(
            &path,
            r#"{ "inputs": { "pricePerTransfer": 9.5, "legacyField": 42 } }"#,
        )
        .unwrap();
        let loaded = load_scenario(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(loaded.price_per_transfer, 9.5);
    }

    #[test]
    fn test_malformed_document_rejected() {
        let path = temp_path("malformed.json");
        fs::write(&path, "{ not json").unwrap();
        let result = load_scenario(&path);
        fs::remove_file(&path).ok();

        assert!(matches!(result, Err(ScenarioError::Parse(_))));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let path = temp_path("invalid.json");
        fs::write(&path, r#"{ "inputs": { "loanAmount": -5000 } }"#).unwrap();
        let result = load_scenario(&path);
        fs::remove_file(&path).ok();

        assert!(matches!(result, Err(ScenarioError::Invalid(_))));
    }

    #[test]
    fn test_financing_enum_round_trip() {
        let mut inputs = AssumptionSet::default();
        inputs.financing_type = FinancingType::Loan;

        let json = serde_json::to_string(&ScenarioFile {
            name: String::new(),
            saved_at: None,
            inputs: inputs.clone(),
        })
        .unwrap();
        assert!(json.contains("\"financingType\":\"loan\""));

        let doc: ScenarioFile = serde_json::from_str(&json).unwrap();
        assert_eq!(doc.inputs, inputs);
    }
}
