//! Tag classification.
//!
//! An ordered table of (all-of tag conditions, kind) pairs. The first row
//! whose conditions all hold decides the kind; elements that match no row
//! are dropped.

use std::collections::HashMap;

use super::types::FeatureKind;

/// A classification row: every `(key, value)` tag must be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationRule {
    pub conditions: &'static [(&'static str, &'static str)],
    pub kind: FeatureKind,
}

const fn rule(
    conditions: &'static [(&'static str, &'static str)],
    kind: FeatureKind,
) -> ClassificationRule {
    ClassificationRule { conditions, kind }
}

/// Classification table in precedence order.
pub const CLASSIFICATION_RULES: &[ClassificationRule] = &[
    rule(&[("highway", "crossing")], FeatureKind::Crossing),
    rule(&[("highway", "bus_stop")], FeatureKind::BusStop),
    rule(&[("highway", "traffic_signals")], FeatureKind::TrafficSignals),
    rule(&[("highway", "cycleway")], FeatureKind::Cycleway),
    rule(&[("highway", "footway")], FeatureKind::FootwayOrPedestrian),
    rule(&[("highway", "pedestrian")], FeatureKind::FootwayOrPedestrian),
    rule(
        &[("highway", "path"), ("bicycle", "designated")],
        FeatureKind::Cycleway,
    ),
    rule(
        &[("highway", "path"), ("foot", "designated")],
        FeatureKind::FootwayOrPedestrian,
    ),
    rule(
        &[("highway", "track"), ("bicycle", "designated")],
        FeatureKind::Cycleway,
    ),
    rule(
        &[("highway", "service"), ("service", "driveway")],
        FeatureKind::Entrance,
    ),
    rule(&[("railway", "tram")], FeatureKind::TramTrack),
    rule(&[("railway", "level_crossing")], FeatureKind::RailwayCrossing),
    rule(&[("bridge", "yes")], FeatureKind::BridgeOrTunnel),
    rule(&[("tunnel", "yes")], FeatureKind::BridgeOrTunnel),
    rule(&[("cycleway", "lane")], FeatureKind::Cycleway),
    rule(&[("cycleway:left", "lane")], FeatureKind::Cycleway),
    rule(&[("cycleway:right", "lane")], FeatureKind::Cycleway),
];

impl ClassificationRule {
    pub fn matches(&self, tags: &HashMap<String, String>) -> bool {
        self.conditions
            .iter()
            .all(|(key, value)| tags.get(*key).map(String::as_str) == Some(*value))
    }
}

/// Returns the kind of the first matching row, or `None`.
pub fn classify(tags: &HashMap<String, String>) -> Option<FeatureKind> {
    CLASSIFICATION_RULES
        .iter()
        .find(|rule| rule.matches(tags))
        .map(|rule| rule.kind)
}
