//! Reporting and output generation
//!
//! Global invariants enforced:
//! - Deterministic output: identical sessions yield byte-for-byte identical
//!   text and JSON
//! - The out-of-range outcome renders distinctly; labels, colors, and
//!   thresholds are omitted rather than guessed

use crate::criteria;
use crate::measurement::{Ear, Gender};
use crate::severity::ClassificationResult;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Band code reported when the age has no criteria row
pub const AGE_OUT_OF_RANGE_BAND: &str = "age_out_of_range";

/// Evaluation outcome for a single ear
///
/// Label, color, and thresholds are present only when the age had a criteria
/// row; an out-of-range age reports the sum and the sentinel band alone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct EarReport {
    pub ear: String,
    pub threshold_sum: i32,
    pub band: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mild_threshold: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub significant_threshold: Option<i32>,
}

/// Patient attributes echoed into the report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatientReport {
    pub age: u8,
    pub gender: String,
}

/// Complete evaluation report for one session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct SessionReport {
    pub patient: PatientReport,
    pub left: EarReport,
    pub right: EarReport,
}

impl EarReport {
    /// Materialize one ear's classification outcome
    pub fn new(ear: Ear, threshold_sum: i32, result: ClassificationResult) -> Self {
        match result {
            ClassificationResult::Classified(c) => EarReport {
                ear: ear.as_str().to_string(),
                threshold_sum,
                band: c.band.as_str().to_string(),
                label: Some(c.band.label().to_string()),
                color: Some(c.band.display_color().to_string()),
                mild_threshold: Some(c.thresholds.mild),
                significant_threshold: Some(c.thresholds.significant),
            },
            ClassificationResult::AgeOutOfRange => EarReport {
                ear: ear.as_str().to_string(),
                threshold_sum,
                band: AGE_OUT_OF_RANGE_BAND.to_string(),
                label: None,
                color: None,
                mild_threshold: None,
                significant_threshold: None,
            },
        }
    }
}

/// Render a session report as text output
pub fn render_text(report: &SessionReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Patient: age {}, {}\n\n",
        report.patient.age, report.patient.gender
    ));

    // Header
    output.push_str(&format!(
        "{:<8} {:<7} {:<18} {:<26} {:<7} {}\n",
        "EAR", "SUM", "BAND", "OUTCOME", "MILD", "SIGNIFICANT"
    ));

    // One row per ear, left then right
    for row in [&report.left, &report.right] {
        let label = row.label.as_deref().unwrap_or("-");
        let mild = row
            .mild_threshold
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".to_string());
        let significant = row
            .significant_threshold
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".to_string());
        output.push_str(&format!(
            "{:<8} {:<7} {:<18} {:<26} {:<7} {}\n",
            row.ear, row.threshold_sum, row.band, label, mild, significant
        ));
    }

    output
}

/// Render a session report as JSON output
pub fn render_json(report: &SessionReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
}

/// One reference-table row materialized for listings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct CriteriaRow {
    pub age: u8,
    pub gender: String,
    pub mild_threshold: i32,
    pub significant_threshold: i32,
}

/// Collect criteria rows, optionally filtered by age and gender
///
/// Rows come out in deterministic order: ascending age, male before female.
/// Asking for an age outside the table is an error here (unlike evaluation,
/// there is no outcome to report, just nothing to show).
pub fn criteria_rows(age: Option<u8>, gender: Option<Gender>) -> Result<Vec<CriteriaRow>> {
    if let Some(age) = age {
        if criteria::thresholds(age, Gender::Male).is_none() {
            bail!(
                "no criteria row for age {} (tabulated ages are {}-{})",
                age,
                criteria::MIN_TABULATED_AGE,
                criteria::MAX_TABULATED_AGE
            );
        }
    }

    let ages: Vec<u8> = match age {
        Some(age) => vec![age],
        None => (criteria::MIN_TABULATED_AGE..=criteria::MAX_TABULATED_AGE).collect(),
    };
    let genders: Vec<Gender> = match gender {
        Some(gender) => vec![gender],
        None => vec![Gender::Male, Gender::Female],
    };

    let mut rows = Vec::new();
    for age in ages {
        for gender in &genders {
            if let Some(t) = criteria::thresholds(age, *gender) {
                rows.push(CriteriaRow {
                    age,
                    gender: gender.as_str().to_string(),
                    mild_threshold: t.mild,
                    significant_threshold: t.significant,
                });
            }
        }
    }
    Ok(rows)
}

/// Render criteria rows as text output
pub fn render_criteria_text(rows: &[CriteriaRow]) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:<6} {:<8} {:<7} {}\n",
        "AGE", "GENDER", "MILD", "SIGNIFICANT"
    ));
    for row in rows {
        output.push_str(&format!(
            "{:<6} {:<8} {:<7} {}\n",
            row.age, row.gender, row.mild_threshold, row.significant_threshold
        ));
    }

    output
}

/// Render criteria rows as JSON output
pub fn render_criteria_json(rows: &[CriteriaRow]) -> String {
    serde_json::to_string_pretty(rows).unwrap_or_else(|_| "[]".to_string())
}
