//! Render-plan construction for the gauge and audiogram widgets
//!
//! The drawing layer is an external collaborator: this module only assembles
//! the numbers, colors, and labels it consumes. Nothing here draws. Plans are
//! plain data, serialized as JSON for whatever widget library sits on top.

use crate::measurement::{Ear, EarMeasurement, FREQUENCIES_HZ, MAX_READING_DB, MIN_READING_DB};
use crate::session::Session;
use crate::severity::{classify, Classification};
use serde::{Deserialize, Serialize};

/// Upper bound of the gauge axis (summed dB)
pub const GAUGE_AXIS_MAX: i32 = 350;

/// Gauge zone fills in severity order: below mild, mild band, significant band
pub const ZONE_COLORS: [&str; 3] = ["#8ace7e", "#ffda66", "#ff684c"];

/// Audiogram series colors
pub const LEFT_SERIES_COLOR: &str = "blue";
pub const RIGHT_SERIES_COLOR: &str = "red";

/// dB spacing of audiogram y-axis ticks
const AUDIOGRAM_TICK_STEP_DB: i32 = 10;

/// One colored span on the gauge axis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GaugeZone {
    pub from: i32,
    pub to: i32,
    pub color: String,
}

/// Everything the gauge widget needs for one classified ear
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct GaugeSpec {
    /// Display title, e.g. "Left Ear: Mild Hearing Loss"
    pub title: String,
    /// Needle position: the ear's threshold sum
    pub value: i32,
    pub axis_max: i32,
    /// Axis ticks at the row's two severity boundaries
    pub tick_values: [i32; 2],
    /// Needle/bar color for the classified band
    pub bar_color: String,
    pub zones: [GaugeZone; 3],
}

/// One ear's line on the audiogram
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AudiogramSeries {
    /// Legend label, e.g. "Left Ear"
    pub label: String,
    pub color: String,
    /// Readings ordered by ascending frequency, matching `frequencies_hz`
    pub readings_db: [i32; 7],
}

/// Audiogram y-axis layout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AudiogramAxis {
    pub title: String,
    /// Descending range draws the axis inverted: quieter (better) readings
    /// plot toward the top
    pub range: [i32; 2],
    pub tick_values: Vec<i32>,
    pub tick_labels: Vec<String>,
}

/// Everything the audiogram chart needs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct AudiogramSpec {
    pub frequencies_hz: [u32; 7],
    pub frequency_labels: [String; 7],
    pub left: AudiogramSeries,
    pub right: AudiogramSeries,
    pub y_axis: AudiogramAxis,
}

/// Complete drawing plan for one session
///
/// Gauges are present only for ears that were actually classified; an age
/// outside the criteria table yields a plan with the audiogram alone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct RenderPlan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_gauge: Option<GaugeSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_gauge: Option<GaugeSpec>,
    pub audiogram: AudiogramSpec,
}

/// Assemble the gauge spec for one classified ear
pub fn gauge_spec(ear: Ear, threshold_sum: i32, classification: &Classification) -> GaugeSpec {
    let t = classification.thresholds;
    GaugeSpec {
        title: format!("{} Ear: {}", ear.side_name(), classification.band.label()),
        value: threshold_sum,
        axis_max: GAUGE_AXIS_MAX,
        tick_values: [t.mild, t.significant],
        bar_color: classification.band.display_color().to_string(),
        zones: [
            GaugeZone {
                from: 0,
                to: t.mild,
                color: ZONE_COLORS[0].to_string(),
            },
            GaugeZone {
                from: t.mild,
                to: t.significant,
                color: ZONE_COLORS[1].to_string(),
            },
            GaugeZone {
                from: t.significant,
                to: GAUGE_AXIS_MAX,
                color: ZONE_COLORS[2].to_string(),
            },
        ],
    }
}

fn audiogram_series(ear: Ear, measurement: &EarMeasurement) -> AudiogramSeries {
    AudiogramSeries {
        label: format!("{} Ear", ear.side_name()),
        color: match ear {
            Ear::Left => LEFT_SERIES_COLOR.to_string(),
            Ear::Right => RIGHT_SERIES_COLOR.to_string(),
        },
        readings_db: measurement.readings_db(),
    }
}

/// Assemble the audiogram spec for both ears
///
/// Independent of classification: the chart shows raw readings even when the
/// age has no criteria row.
pub fn audiogram_spec(left: &EarMeasurement, right: &EarMeasurement) -> AudiogramSpec {
    let tick_values: Vec<i32> = (MIN_READING_DB..=MAX_READING_DB)
        .step_by(AUDIOGRAM_TICK_STEP_DB as usize)
        .collect();
    let tick_labels = tick_values.iter().map(|db| format!("{} dB", db)).collect();

    AudiogramSpec {
        frequencies_hz: FREQUENCIES_HZ,
        frequency_labels: FREQUENCIES_HZ.map(|hz| format!("{} Hz", hz)),
        left: audiogram_series(Ear::Left, left),
        right: audiogram_series(Ear::Right, right),
        y_axis: AudiogramAxis {
            title: "Threshold".to_string(),
            range: [MAX_READING_DB, MIN_READING_DB],
            tick_values,
            tick_labels,
        },
    }
}

/// Build the complete render plan for a session
pub fn render_plan(session: &Session) -> RenderPlan {
    let age = session.patient.age;
    let gender = session.patient.gender;
    let left_sum = session.left.threshold_sum();
    let right_sum = session.right.threshold_sum();

    let left_gauge = classify(age, gender, left_sum)
        .classification()
        .map(|c| gauge_spec(Ear::Left, left_sum, c));
    let right_gauge = classify(age, gender, right_sum)
        .classification()
        .map(|c| gauge_spec(Ear::Right, right_sum, c));

    RenderPlan {
        left_gauge,
        right_gauge,
        audiogram: audiogram_spec(&session.left, &session.right),
    }
}

/// Render a plan as JSON output
pub fn render_plan_json(plan: &RenderPlan) -> String {
    serde_json::to_string_pretty(plan).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurement::Gender;
    use crate::session::Patient;
    use crate::severity::ClassificationResult;

    fn classification_for(age: u8, gender: Gender, sum: i32) -> Classification {
        match classify(age, gender, sum) {
            ClassificationResult::Classified(c) => c,
            ClassificationResult::AgeOutOfRange => panic!("age {} should be tabulated", age),
        }
    }

    fn session(age: u8, gender: Gender) -> Session {
        Session {
            patient: Patient { age, gender },
            left: EarMeasurement::from_readings([10, 20, 30, 40, 50, 60, 70]),
            right: EarMeasurement::default(),
        }
    }

    #[test]
    fn test_gauge_ticks_sit_on_row_thresholds() {
        let c = classification_for(45, Gender::Male, 150);
        let gauge = gauge_spec(Ear::Left, 150, &c);
        assert_eq!(gauge.tick_values, [134, 200]);
        assert_eq!(gauge.value, 150);
        assert_eq!(gauge.axis_max, GAUGE_AXIS_MAX);
    }

    #[test]
    fn test_gauge_zones_partition_the_axis() {
        let c = classification_for(20, Gender::Female, 50);
        let gauge = gauge_spec(Ear::Right, 50, &c);

        assert_eq!(gauge.zones[0].from, 0);
        assert_eq!(gauge.zones[0].to, gauge.zones[1].from);
        assert_eq!(gauge.zones[1].to, gauge.zones[2].from);
        assert_eq!(gauge.zones[2].to, GAUGE_AXIS_MAX);

        assert_eq!(gauge.zones[0].color, "#8ace7e");
        assert_eq!(gauge.zones[1].color, "#ffda66");
        assert_eq!(gauge.zones[2].color, "#ff684c");
    }

    #[test]
    fn test_gauge_title_and_bar_color_follow_band() {
        let c = classification_for(45, Gender::Male, 205);
        let gauge = gauge_spec(Ear::Right, 205, &c);
        assert_eq!(gauge.title, "Right Ear: Significant Hearing Loss");
        assert_eq!(gauge.bar_color, "#b60a1c");
    }

    #[test]
    fn test_audiogram_axis_is_inverted() {
        let spec = audiogram_spec(&EarMeasurement::default(), &EarMeasurement::default());
        assert_eq!(spec.y_axis.range, [70, -10]);
        assert_eq!(
            spec.y_axis.tick_values,
            vec![-10, 0, 10, 20, 30, 40, 50, 60, 70]
        );
        assert_eq!(spec.y_axis.tick_labels[0], "-10 dB");
        assert_eq!(spec.y_axis.tick_labels[8], "70 dB");
        assert_eq!(spec.y_axis.title, "Threshold");
    }

    #[test]
    fn test_audiogram_series_carry_readings_and_colors() {
        let left = EarMeasurement::from_readings([0, 5, 10, 15, 20, 25, 30]);
        let right = EarMeasurement::from_readings([5, 10, 15, 20, 25, 30, 35]);
        let spec = audiogram_spec(&left, &right);

        assert_eq!(spec.left.label, "Left Ear");
        assert_eq!(spec.left.color, "blue");
        assert_eq!(spec.left.readings_db, [0, 5, 10, 15, 20, 25, 30]);
        assert_eq!(spec.right.label, "Right Ear");
        assert_eq!(spec.right.color, "red");
        assert_eq!(spec.right.readings_db, [5, 10, 15, 20, 25, 30, 35]);
        assert_eq!(spec.frequency_labels[0], "500 Hz");
        assert_eq!(spec.frequency_labels[6], "8000 Hz");
    }

    #[test]
    fn test_plan_for_tabulated_age_has_both_gauges() {
        let plan = render_plan(&session(45, Gender::Male));
        assert!(plan.left_gauge.is_some());
        assert!(plan.right_gauge.is_some());
    }

    #[test]
    fn test_plan_for_out_of_range_age_keeps_audiogram_only() {
        let plan = render_plan(&session(17, Gender::Male));
        assert!(plan.left_gauge.is_none());
        assert!(plan.right_gauge.is_none());
        // The chart still shows raw readings
        assert_eq!(plan.audiogram.left.readings_db, [10, 20, 30, 40, 50, 60, 70]);

        let json = render_plan_json(&plan);
        assert!(!json.contains("left_gauge"));
        assert!(json.contains("audiogram"));
    }

    #[test]
    fn test_plan_json_is_deterministic() {
        let plan = render_plan(&session(30, Gender::Female));
        assert_eq!(render_plan_json(&plan), render_plan_json(&plan));
    }
}
