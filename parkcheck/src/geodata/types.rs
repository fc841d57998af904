//! Feature model produced by the geodata client.

use std::fmt;

use serde::Serialize;

/// Category of a map feature relevant to parking rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    Crossing,
    BusStop,
    TrafficSignals,
    TramTrack,
    RailwayCrossing,
    Cycleway,
    FootwayOrPedestrian,
    Entrance,
    BridgeOrTunnel,
}

impl FeatureKind {
    /// Wire name of the kind, identical to its JSON form.
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureKind::Crossing => "crossing",
            FeatureKind::BusStop => "bus_stop",
            FeatureKind::TrafficSignals => "traffic_signals",
            FeatureKind::TramTrack => "tram_track",
            FeatureKind::RailwayCrossing => "railway_crossing",
            FeatureKind::Cycleway => "cycleway",
            FeatureKind::FootwayOrPedestrian => "footway_or_pedestrian",
            FeatureKind::Entrance => "entrance",
            FeatureKind::BridgeOrTunnel => "bridge_or_tunnel",
        }
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified map feature and its distance from the query point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyFeature {
    pub kind: FeatureKind,
    pub distance_meters: f64,
    /// OpenStreetMap element id.
    #[serde(rename = "osmId")]
    pub source_id: i64,
}

impl NearbyFeature {
    pub fn new(kind: FeatureKind, distance_meters: f64, source_id: i64) -> Self {
        Self {
            kind,
            distance_meters,
            source_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&FeatureKind::FootwayOrPedestrian).unwrap();
        assert_eq!(json, "\"footway_or_pedestrian\"");
        assert_eq!(
            serde_json::to_string(&FeatureKind::BridgeOrTunnel).unwrap(),
            format!("\"{}\"", FeatureKind::BridgeOrTunnel)
        );
    }

    #[test]
    fn test_feature_json_shape() {
        let feature = NearbyFeature::new(FeatureKind::BusStop, 12.5, 4242);
        let value = serde_json::to_value(&feature).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "kind": "bus_stop",
                "distanceMeters": 12.5,
                "osmId": 4242
            })
        );
    }
}
