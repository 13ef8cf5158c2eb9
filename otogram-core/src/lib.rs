//! Otogram core library - hearing-test severity classification

#![deny(warnings)]

// Global invariants enforced in this crate:
// - Classification is strictly per-ear
// - No global mutable state; the criteria table is fixed at compile time
// - No randomness, clocks, threads, or async
// - An age outside the criteria table is a defined outcome, never a panic
// - Identical input yields byte-for-byte identical output

pub mod criteria;
pub mod measurement;
pub mod render;
pub mod report;
pub mod session;
pub mod severity;

pub use criteria::{thresholds, Thresholds, MAX_TABULATED_AGE, MIN_TABULATED_AGE};
pub use measurement::{Ear, EarMeasurement, Gender, FREQUENCIES_HZ};
pub use render::{render_plan, render_plan_json, RenderPlan};
pub use report::{
    criteria_rows, render_criteria_json, render_criteria_text, render_json, render_text,
    CriteriaRow, EarReport, SessionReport,
};
pub use session::{load_session_file, Patient, Session};
pub use severity::{classify, Classification, ClassificationResult, SeverityBand};

/// Evaluate a session: classify each ear once and materialize the report
///
/// Infallible by construction; the only irregular outcome (an age outside
/// the criteria table) is carried in the per-ear reports.
pub fn evaluate_session(session: &Session) -> SessionReport {
    let age = session.patient.age;
    let gender = session.patient.gender;
    let left_sum = session.left.threshold_sum();
    let right_sum = session.right.threshold_sum();

    SessionReport {
        patient: report::PatientReport {
            age,
            gender: gender.as_str().to_string(),
        },
        left: EarReport::new(Ear::Left, left_sum, classify(age, gender, left_sum)),
        right: EarReport::new(Ear::Right, right_sum, classify(age, gender, right_sum)),
    }
}
