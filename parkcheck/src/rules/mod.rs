//! Violation rule engine.
//!
//! A fixed, ordered table of proximity rules. Each rule looks at the nearest
//! feature of its kind and fires when that feature is within the rule's
//! threshold (inclusive). Evaluation is pure: no I/O, no clock, no state.
//!
//! ```
//! use parkcheck::geodata::{FeatureKind, NearbyFeature};
//! use parkcheck::rules::evaluate;
//!
//! let result = evaluate(vec![NearbyFeature::new(FeatureKind::Crossing, 8.0, 1)]);
//! assert!(result.is_violation);
//! assert_eq!(result.reasons[0].code, "15.9(г)");
//! ```

use serde::Serialize;

use crate::geodata::{FeatureKind, NearbyFeature};

/// One entry in the verdict's reason list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViolationReason {
    pub code: String,
    pub description: String,
}

/// Verdict for one location.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub is_violation: bool,
    pub reasons: Vec<ViolationReason>,
    /// Every feature that was evaluated, in input order.
    #[serde(rename = "nearbyObjects")]
    pub nearby_features: Vec<NearbyFeature>,
}

/// A proximity rule.
#[derive(Debug, Clone, Copy)]
pub struct ViolationRule {
    pub kind: FeatureKind,
    pub threshold_meters: f64,
    pub code: &'static str,
    /// Informational rules add a reason without setting `is_violation`.
    pub determinative: bool,
    describe: fn(f64) -> String,
}

impl ViolationRule {
    /// Renders the reason text for a feature at `distance` meters.
    pub fn describe(&self, distance: f64) -> String {
        (self.describe)(distance)
    }

    /// Nearest feature of this rule's kind. Ties keep the earliest feature.
    fn nearest<'a>(&self, features: &'a [NearbyFeature]) -> Option<&'a NearbyFeature> {
        features
            .iter()
            .filter(|f| f.kind == self.kind)
            .fold(None, |best: Option<&NearbyFeature>, f| match best {
                Some(b) if b.distance_meters <= f.distance_meters => Some(b),
                _ => Some(f),
            })
    }

    fn fires(&self, features: &[NearbyFeature]) -> Option<ViolationReason> {
        let nearest = self.nearest(features)?;
        if nearest.distance_meters <= self.threshold_meters {
            Some(ViolationReason {
                code: self.code.to_string(),
                description: self.describe(nearest.distance_meters),
            })
        } else {
            None
        }
    }
}

/// Rule table in evaluation order. The order is also the order of reasons
/// in the result.
pub const VIOLATION_RULES: &[ViolationRule] = &[
    ViolationRule {
        kind: FeatureKind::Crossing,
        threshold_meters: 10.0,
        code: "15.9(г)",
        determinative: true,
        describe: |d| {
            format!(
                "Пішохідний перехід на відстані {:.1} м (допустимо не ближче 10 м)",
                d
            )
        },
    },
    ViolationRule {
        kind: FeatureKind::BusStop,
        threshold_meters: 30.0,
        code: "15.9(е)",
        determinative: true,
        describe: |d| {
            format!(
                "Зупинка громадського транспорту на відстані {:.1} м (допустимо не ближче 30 м)",
                d
            )
        },
    },
    ViolationRule {
        kind: FeatureKind::Entrance,
        threshold_meters: 10.0,
        code: "15.9(и)",
        determinative: true,
        describe: |d| {
            format!(
                "Виїзд з прилеглої території на відстані {:.1} м (допустимо не ближче 10 м)",
                d
            )
        },
    },
    ViolationRule {
        kind: FeatureKind::TramTrack,
        threshold_meters: 3.0,
        code: "15.9(б)",
        determinative: true,
        describe: |d| format!("Стоянка на трамвайних коліях: до осі колії {:.1} м", d),
    },
    ViolationRule {
        kind: FeatureKind::BridgeOrTunnel,
        threshold_meters: 5.0,
        code: "15.9(в)",
        determinative: true,
        describe: |d| format!("Стоянка на мосту, естакаді або в тунелі: {:.1} м", d),
    },
    ViolationRule {
        kind: FeatureKind::Cycleway,
        threshold_meters: 3.0,
        code: "bike_lane",
        determinative: true,
        describe: |d| format!("Стоянка на велодоріжці або велосмузі: {:.1} м", d),
    },
    ViolationRule {
        kind: FeatureKind::FootwayOrPedestrian,
        threshold_meters: 3.0,
        code: "sidewalk",
        determinative: true,
        describe: |d| format!("Стоянка на тротуарі або в пішохідній зоні: {:.1} м", d),
    },
    ViolationRule {
        kind: FeatureKind::TrafficSignals,
        threshold_meters: 10.0,
        code: "traffic_signals_hint",
        determinative: false,
        describe: |d| {
            format!(
                "Світлофор на відстані {:.1} м: перевірте, чи авто не закриває його",
                d
            )
        },
    },
];

/// Evaluates the rule table against `features`.
///
/// Deterministic: the same input always yields the same result.
pub fn evaluate(features: Vec<NearbyFeature>) -> AnalysisResult {
    let mut is_violation = false;
    let mut reasons = Vec::new();

    for rule in VIOLATION_RULES {
        if let Some(reason) = rule.fires(&features) {
            is_violation |= rule.determinative;
            reasons.push(reason);
        }
    }

    AnalysisResult {
        is_violation,
        reasons,
        nearby_features: features,
    }
}
