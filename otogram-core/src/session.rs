//! Session documents: the inbound boundary with the measurement UI
//!
//! A session carries one patient's attributes plus readings for both ears.
//! Loading is strict: unknown fields, malformed gender text, and readings
//! outside the discrete selectable set all fail fast with the offending file
//! named. Age is deliberately not checked here; an age outside the criteria
//! table is a defined evaluation outcome, not a load error.

use crate::measurement::{Ear, EarMeasurement, Gender};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Patient attributes used for the criteria lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Patient {
    pub age: u8,
    pub gender: Gender,
}

/// One hearing-test session: patient attributes plus both ears' readings
///
/// Either ear may be omitted from the document; it then keeps the untouched
/// -10 dB defaults, matching a patient who never adjusted the selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Session {
    pub patient: Patient,
    #[serde(default)]
    pub left: EarMeasurement,
    #[serde(default)]
    pub right: EarMeasurement,
}

impl Session {
    /// Validate both ears' readings against the selectable set
    pub fn validate(&self) -> Result<()> {
        self.left.validate(Ear::Left)?;
        self.right.validate(Ear::Right)?;
        Ok(())
    }
}

/// Load a session document from a JSON file
///
/// Reads, parses strictly, and validates the readings; each failure names
/// the offending file.
pub fn load_session_file(path: &Path) -> Result<Session> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read session file: {}", path.display()))?;

    let session: Session = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse session file: {}", path.display()))?;

    session
        .validate()
        .with_context(|| format!("invalid session in: {}", path.display()))?;

    Ok(session)
}
