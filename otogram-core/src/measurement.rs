//! Ear measurements and patient categories
//!
//! Global invariants enforced:
//! - Readings come from the discrete selectable set {-10, -5, ..., 70} dB
//! - The threshold sum uses exactly the five mid frequencies
//!   (1000/2000/3000/4000/6000 Hz); 500 Hz and 8000 Hz are charted
//!   but never scored

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The seven standard test frequencies, ascending
pub const FREQUENCIES_HZ: [u32; 7] = [500, 1000, 2000, 3000, 4000, 6000, 8000];

/// Lowest selectable threshold reading (dB)
pub const MIN_READING_DB: i32 = -10;

/// Highest selectable threshold reading (dB)
pub const MAX_READING_DB: i32 = 70;

/// Readings move in 5 dB steps
pub const READING_STEP_DB: i32 = 5;

/// Patient gender category
///
/// The criteria table carries exactly these two columns; any other inbound
/// text is rejected at the parse boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    /// Column index into a criteria table row
    pub(crate) fn table_index(&self) -> usize {
        match self {
            Gender::Male => 0,
            Gender::Female => 1,
        }
    }
}

impl FromStr for Gender {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => bail!("invalid gender: {:?} (expected \"male\" or \"female\")", other),
        }
    }
}

/// Ear side, used for report rows and display titles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ear {
    Left,
    Right,
}

impl Ear {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ear::Left => "left",
            Ear::Right => "right",
        }
    }

    /// Capitalized side used in display titles ("Left Ear: ...")
    pub fn side_name(&self) -> &'static str {
        match self {
            Ear::Left => "Left",
            Ear::Right => "Right",
        }
    }
}

fn default_reading() -> i32 {
    MIN_READING_DB
}

/// Threshold readings for one ear, one per standard frequency
///
/// The measurement UI starts every selector at -10 dB; a field the patient
/// never adjusted keeps that value, which the serde defaults mirror. Readings
/// are stored as plain decibel values keyed by frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EarMeasurement {
    #[serde(default = "default_reading")]
    pub hz500: i32,
    #[serde(default = "default_reading")]
    pub hz1000: i32,
    #[serde(default = "default_reading")]
    pub hz2000: i32,
    #[serde(default = "default_reading")]
    pub hz3000: i32,
    #[serde(default = "default_reading")]
    pub hz4000: i32,
    #[serde(default = "default_reading")]
    pub hz6000: i32,
    #[serde(default = "default_reading")]
    pub hz8000: i32,
}

impl Default for EarMeasurement {
    fn default() -> Self {
        EarMeasurement::from_readings([MIN_READING_DB; 7])
    }
}

impl EarMeasurement {
    /// Build a measurement from readings ordered by ascending frequency
    pub fn from_readings(readings: [i32; 7]) -> Self {
        EarMeasurement {
            hz500: readings[0],
            hz1000: readings[1],
            hz2000: readings[2],
            hz3000: readings[3],
            hz4000: readings[4],
            hz6000: readings[5],
            hz8000: readings[6],
        }
    }

    /// Readings ordered by ascending frequency, matching FREQUENCIES_HZ
    pub fn readings_db(&self) -> [i32; 7] {
        [
            self.hz500,
            self.hz1000,
            self.hz2000,
            self.hz3000,
            self.hz4000,
            self.hz6000,
            self.hz8000,
        ]
    }

    /// Readings paired with their frequencies, ascending
    pub fn readings(&self) -> [(u32, i32); 7] {
        let db = self.readings_db();
        std::array::from_fn(|i| (FREQUENCIES_HZ[i], db[i]))
    }

    /// Sum of the five mid-frequency readings used for severity scoring
    ///
    /// The reference criteria are normed on this exact selection: 500 Hz and
    /// 8000 Hz appear on the audiogram but never contribute to the score.
    pub fn threshold_sum(&self) -> i32 {
        self.hz1000 + self.hz2000 + self.hz3000 + self.hz4000 + self.hz6000
    }

    /// Check every reading against the discrete selectable set
    pub fn validate(&self, ear: Ear) -> Result<()> {
        for (hz, db) in self.readings() {
            if !(MIN_READING_DB..=MAX_READING_DB).contains(&db) {
                bail!(
                    "{} ear: {} Hz reading {} dB is outside [{}, {}]",
                    ear.as_str(),
                    hz,
                    db,
                    MIN_READING_DB,
                    MAX_READING_DB
                );
            }
            if db % READING_STEP_DB != 0 {
                bail!(
                    "{} ear: {} Hz reading {} dB is not a multiple of {} dB",
                    ear.as_str(),
                    hz,
                    db,
                    READING_STEP_DB
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_measurement_sums_to_minus_fifty() {
        let measurement = EarMeasurement::default();
        assert_eq!(measurement.threshold_sum(), -50);
    }

    #[test]
    fn test_threshold_sum_ignores_edge_frequencies() {
        let mut measurement = EarMeasurement::from_readings([0, 10, 15, 20, 25, 30, 0]);
        let sum = measurement.threshold_sum();
        assert_eq!(sum, 100);

        // Pushing 500 Hz and 8000 Hz to the ceiling must not move the score
        measurement.hz500 = MAX_READING_DB;
        measurement.hz8000 = MAX_READING_DB;
        assert_eq!(measurement.threshold_sum(), sum);
    }

    #[test]
    fn test_readings_order_matches_frequencies() {
        let measurement = EarMeasurement::from_readings([0, 5, 10, 15, 20, 25, 30]);
        assert_eq!(measurement.readings_db(), [0, 5, 10, 15, 20, 25, 30]);
        assert_eq!(measurement.readings()[0], (500, 0));
        assert_eq!(measurement.readings()[6], (8000, 30));
    }

    #[test]
    fn test_validate_accepts_extremes() {
        let low = EarMeasurement::from_readings([MIN_READING_DB; 7]);
        low.validate(Ear::Left).unwrap();
        let high = EarMeasurement::from_readings([MAX_READING_DB; 7]);
        high.validate(Ear::Right).unwrap();
    }

    #[test]
    fn test_validate_rejects_reading_above_range() {
        let measurement = EarMeasurement::from_readings([-10, -10, 75, -10, -10, -10, -10]);
        let err = measurement.validate(Ear::Left).unwrap_err();
        assert!(err.to_string().contains("2000 Hz"));
        assert!(err.to_string().contains("left ear"));
    }

    #[test]
    fn test_validate_rejects_reading_below_range() {
        let measurement = EarMeasurement::from_readings([-15, -10, -10, -10, -10, -10, -10]);
        assert!(measurement.validate(Ear::Right).is_err());
    }

    #[test]
    fn test_validate_rejects_off_step_reading() {
        let measurement = EarMeasurement::from_readings([-10, -10, -10, -10, 33, -10, -10]);
        let err = measurement.validate(Ear::Right).unwrap_err();
        assert!(err.to_string().contains("multiple of 5"));
    }

    #[test]
    fn test_parse_measurement_fills_missing_fields() {
        let measurement: EarMeasurement = serde_json::from_str(r#"{"hz2000": 40}"#).unwrap();
        assert_eq!(measurement.hz2000, 40);
        assert_eq!(measurement.hz500, MIN_READING_DB);
        // 40 plus four untouched -10 readings
        assert_eq!(measurement.threshold_sum(), 0);
    }

    #[test]
    fn test_parse_measurement_rejects_unknown_field() {
        let result: Result<EarMeasurement, _> = serde_json::from_str(r#"{"hz250": 10}"#);
        assert!(result.is_err(), "unknown frequencies should be rejected");
    }

    #[test]
    fn test_gender_from_str() {
        assert_eq!("male".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!("female".parse::<Gender>().unwrap(), Gender::Female);
        assert!("m".parse::<Gender>().is_err());
        assert!("Male".parse::<Gender>().is_err());
        assert!("".parse::<Gender>().is_err());
    }

    #[test]
    fn test_gender_wire_form_is_lowercase() {
        assert_eq!(serde_json::to_string(&Gender::Male).unwrap(), r#""male""#);
        let parsed: Gender = serde_json::from_str(r#""female""#).unwrap();
        assert_eq!(parsed, Gender::Female);
        let rejected: Result<Gender, _> = serde_json::from_str(r#""other""#);
        assert!(rejected.is_err());
    }

    #[test]
    fn test_ear_names() {
        assert_eq!(Ear::Left.as_str(), "left");
        assert_eq!(Ear::Right.side_name(), "Right");
    }
}
