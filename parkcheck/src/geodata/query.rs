//! Overpass QL query construction.
//!
//! One query is issued per check: a union of `around` selectors centered on
//! the query point, ending in `out body center;` so that ways come back with
//! a centroid.

use std::fmt::Write as _;

use crate::coord::GeoPoint;

/// Header selecting JSON output and the server-side timeout in seconds.
pub const QUERY_HEADER: &str = "[out:json][timeout:25];";

/// Output statement. `center` adds a centroid to ways.
pub const QUERY_OUTPUT: &str = "out body center;";

/// OSM element type matched by a selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    Node,
    Way,
}

impl ElementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Node => "node",
            ElementType::Way => "way",
        }
    }
}

/// One `{element}(around:{radius},{lat},{lon})[k=v]...;` statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureSelector {
    pub element: ElementType,
    pub radius_meters: u32,
    /// Tag equality filters, all of which must hold.
    pub filters: &'static [(&'static str, &'static str)],
}

impl FeatureSelector {
    const fn new(
        element: ElementType,
        radius_meters: u32,
        filters: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self {
            element,
            radius_meters,
            filters,
        }
    }

    fn write_to(&self, out: &mut String, point: GeoPoint) {
        let _ = write!(
            out,
            "{}(around:{},{},{})",
            self.element.as_str(),
            self.radius_meters,
            point.lat,
            point.lon
        );
        for (key, value) in self.filters {
            let _ = write!(out, "[{}={}]", quote_if_needed(key), quote_if_needed(value));
        }
        out.push(';');
    }
}

/// Every selector sent to Overpass, in query order.
pub const FEATURE_SELECTORS: &[FeatureSelector] = &[
    FeatureSelector::new(ElementType::Node, 10, &[("highway", "crossing")]),
    FeatureSelector::new(ElementType::Node, 30, &[("highway", "bus_stop")]),
    FeatureSelector::new(ElementType::Node, 20, &[("highway", "traffic_signals")]),
    FeatureSelector::new(ElementType::Way, 10, &[("railway", "tram")]),
    FeatureSelector::new(ElementType::Node, 10, &[("railway", "level_crossing")]),
    FeatureSelector::new(ElementType::Way, 20, &[("highway", "cycleway")]),
    FeatureSelector::new(
        ElementType::Way,
        20,
        &[("highway", "path"), ("bicycle", "designated")],
    ),
    FeatureSelector::new(
        ElementType::Way,
        20,
        &[("highway", "track"), ("bicycle", "designated")],
    ),
    FeatureSelector::new(ElementType::Way, 20, &[("cycleway", "lane")]),
    FeatureSelector::new(ElementType::Way, 20, &[("cycleway:left", "lane")]),
    FeatureSelector::new(ElementType::Way, 20, &[("cycleway:right", "lane")]),
    FeatureSelector::new(ElementType::Way, 10, &[("highway", "footway")]),
    FeatureSelector::new(ElementType::Way, 10, &[("highway", "pedestrian")]),
    FeatureSelector::new(
        ElementType::Way,
        10,
        &[("highway", "path"), ("foot", "designated")],
    ),
    FeatureSelector::new(
        ElementType::Way,
        20,
        &[("highway", "service"), ("service", "driveway")],
    ),
    FeatureSelector::new(ElementType::Way, 10, &[("bridge", "yes")]),
    FeatureSelector::new(ElementType::Way, 10, &[("tunnel", "yes")]),
];

/// Builds the Overpass QL query for features around `point`.
pub fn build_query(point: GeoPoint) -> String {
    let mut query = String::with_capacity(1024);
    query.push_str(QUERY_HEADER);
    query.push('(');
    for selector in FEATURE_SELECTORS {
        selector.write_to(&mut query, point);
    }
    query.push_str(");");
    query.push_str(QUERY_OUTPUT);
    query
}

/// Overpass needs quotes around tokens with characters outside `[A-Za-z0-9_]`.
fn quote_if_needed(token: &str) -> String {
    if token.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        token.to_string()
    } else {
        format!("\"{}\"", token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kyiv() -> GeoPoint {
        GeoPoint::new(50.4501, 30.5234)
    }

    #[test]
    fn test_query_header_and_footer() {
        let query = build_query(kyiv());
        assert!(query.starts_with("[out:json][timeout:25];("));
        assert!(query.ends_with(");out body center;"));
    }

    #[test]
    fn test_query_contains_every_selector_with_radius() {
        let query = build_query(kyiv());
        let expected = [
            "node(around:10,50.4501,30.5234)[highway=crossing];",
            "node(around:30,50.4501,30.5234)[highway=bus_stop];",
            "node(around:20,50.4501,30.5234)[highway=traffic_signals];",
            "way(around:10,50.4501,30.5234)[railway=tram];",
            "node(around:10,50.4501,30.5234)[railway=level_crossing];",
            "way(around:20,50.4501,30.5234)[highway=cycleway];",
            "way(around:20,50.4501,30.5234)[highway=path][bicycle=designated];",
            "way(around:20,50.4501,30.5234)[highway=track][bicycle=designated];",
            "way(around:20,50.4501,30.5234)[cycleway=lane];",
            "way(around:20,50.4501,30.5234)[\"cycleway:left\"=lane];",
            "way(around:20,50.4501,30.5234)[\"cycleway:right\"=lane];",
            "way(around:10,50.4501,30.5234)[highway=footway];",
            "way(around:10,50.4501,30.5234)[highway=pedestrian];",
            "way(around:10,50.4501,30.5234)[highway=path][foot=designated];",
            "way(around:20,50.4501,30.5234)[highway=service][service=driveway];",
            "way(around:10,50.4501,30.5234)[bridge=yes];",
            "way(around:10,50.4501,30.5234)[tunnel=yes];",
        ];

        for statement in expected {
            assert!(query.contains(statement), "missing {statement} in {query}");
        }
        assert_eq!(FEATURE_SELECTORS.len(), expected.len());
    }

    #[test]
    fn test_query_negative_coordinates() {
        let query = build_query(GeoPoint::new(-33.8688, -151.2093));
        assert!(query.contains("node(around:10,-33.8688,-151.2093)[highway=crossing];"));
    }

    #[test]
    fn test_quote_if_needed() {
        assert_eq!(quote_if_needed("highway"), "highway");
        assert_eq!(quote_if_needed("cycleway:left"), "\"cycleway:left\"");
    }
}
