//! Overpass JSON response structures.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

use crate::coord::GeoPoint;

/// Top-level Overpass response.
///
/// A missing or `null` `elements` array is treated as an empty result.
#[derive(Debug, Default, Deserialize)]
pub struct OverpassResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub elements: Vec<OverpassElement>,

    /// Runtime error or warning reported by the server inside a 200 response.
    #[serde(default)]
    pub remark: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OverpassElement {
    #[serde(rename = "type", default)]
    pub element_type: String,
    pub id: i64,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub center: Option<OverpassCenter>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: HashMap<String, String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct OverpassCenter {
    pub lat: f64,
    pub lon: f64,
}

/// Reads an explicit JSON `null` as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl OverpassElement {
    /// Node coordinates, else the way centroid, else `None`.
    pub fn representative_point(&self) -> Option<GeoPoint> {
        match (self.lat, self.lon, self.center) {
            (Some(lat), Some(lon), _) => Some(GeoPoint::new(lat, lon)),
            (_, _, Some(center)) => Some(GeoPoint::new(center.lat, center.lon)),
            _ => None,
        }
    }
}
