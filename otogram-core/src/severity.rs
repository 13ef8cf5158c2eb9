//! Severity band classification
//!
//! Global invariants enforced:
//! - Classification is a pure function of (age, gender, threshold sum)
//! - Band boundaries are inclusive on the severe side: a sum equal to the
//!   mild threshold is Mild, equal to the significant threshold is Significant

use crate::criteria::{self, Thresholds};
use crate::measurement::Gender;

/// Severity band for a classified ear
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityBand {
    None,        // sum < mild
    Mild,        // mild <= sum < significant
    Significant, // sum >= significant
}

impl SeverityBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityBand::None => "none",
            SeverityBand::Mild => "mild",
            SeverityBand::Significant => "significant",
        }
    }

    /// Outcome label shown alongside the gauge
    pub fn label(&self) -> &'static str {
        match self {
            SeverityBand::None => "No Hearing Loss",
            SeverityBand::Mild => "Mild Hearing Loss",
            SeverityBand::Significant => "Significant Hearing Loss",
        }
    }

    /// Gauge needle/bar color for this band
    pub fn display_color(&self) -> &'static str {
        match self {
            SeverityBand::None => "#309143",
            SeverityBand::Mild => "#e39802",
            SeverityBand::Significant => "#b60a1c",
        }
    }

    /// Assign a band from a threshold sum and the row boundaries
    pub fn for_sum(threshold_sum: i32, thresholds: &Thresholds) -> SeverityBand {
        if threshold_sum < thresholds.mild {
            SeverityBand::None
        } else if threshold_sum < thresholds.significant {
            SeverityBand::Mild
        } else {
            SeverityBand::Significant
        }
    }
}

/// A severity judgement together with the boundaries that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub band: SeverityBand,
    pub thresholds: Thresholds,
}

/// Outcome of classifying one ear
///
/// An age outside the tabulated range is a defined outcome, not an error:
/// callers render it distinctly instead of guessing a nearby row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationResult {
    Classified(Classification),
    AgeOutOfRange,
}

impl ClassificationResult {
    /// The classification, unless the age fell outside the table
    pub fn classification(&self) -> Option<&Classification> {
        match self {
            ClassificationResult::Classified(classification) => Some(classification),
            ClassificationResult::AgeOutOfRange => None,
        }
    }
}

/// Classify one ear's threshold sum for an age/gender pair
///
/// Pure and total: no I/O, no shared state, and every input maps to a
/// defined outcome. Identical inputs always produce identical results.
pub fn classify(age: u8, gender: Gender, threshold_sum: i32) -> ClassificationResult {
    match criteria::thresholds(age, gender) {
        Some(thresholds) => ClassificationResult::Classified(Classification {
            band: SeverityBand::for_sum(threshold_sum, &thresholds),
            thresholds,
        }),
        None => ClassificationResult::AgeOutOfRange,
    }
}
