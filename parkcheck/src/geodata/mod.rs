//! Geodata client.
//!
//! Turns a coordinate into a list of classified [`NearbyFeature`]s by issuing
//! a single Overpass QL query, parsing the JSON reply, classifying each
//! element's tags and measuring its great-circle distance from the point.
//!
//! Ways are reduced to the centroid Overpass returns for them, so distances
//! to long linear features are point-to-centroid approximations.

mod classify;
mod client;
mod error;
mod query;
mod response;
mod types;

pub use classify::{classify, ClassificationRule, CLASSIFICATION_RULES};
pub use client::{parse_response, GeodataSource, OverpassClient, DEFAULT_OVERPASS_ENDPOINT};
pub use error::GeodataError;
pub use query::{build_query, ElementType, FeatureSelector, FEATURE_SELECTORS};
pub use response::{OverpassCenter, OverpassElement, OverpassResponse};
pub use types::{FeatureKind, NearbyFeature};
