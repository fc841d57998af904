//! Overpass API client.

use reqwest::Url;
use tracing::{debug, info, warn};

use super::classify::classify;
use super::error::GeodataError;
use super::query::build_query;
use super::response::OverpassResponse;
use super::types::NearbyFeature;
use crate::cache::BoxFuture;
use crate::coord::{haversine_distance, GeoPoint};
use crate::provider::AsyncHttpClient;

/// Public Overpass endpoint.
pub const DEFAULT_OVERPASS_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";

/// Source of classified features around a point.
///
/// Dyn-compatible so the analysis service and tests can swap sources.
pub trait GeodataSource: Send + Sync {
    /// Fetches, classifies and distance-annotates the features near `point`.
    fn fetch_nearby_features(
        &self,
        point: GeoPoint,
    ) -> BoxFuture<'_, Result<Vec<NearbyFeature>, GeodataError>>;
}

/// Overpass-backed [`GeodataSource`].
pub struct OverpassClient<C: AsyncHttpClient> {
    http_client: C,
    endpoint: Url,
}

impl<C: AsyncHttpClient> OverpassClient<C> {
    /// Creates a client for the given interpreter endpoint.
    ///
    /// # Errors
    ///
    /// Returns `GeodataError::InvalidEndpoint` if `endpoint` is not an
    /// absolute URL.
    pub fn new(http_client: C, endpoint: &str) -> Result<Self, GeodataError> {
        let endpoint = Url::parse(endpoint).map_err(|e| GeodataError::InvalidEndpoint {
            url: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            http_client,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Builds `{endpoint}?data=<url-encoded query>`.
    fn request_url(&self, point: GeoPoint) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("data", &build_query(point));
        url
    }

    async fn fetch(&self, point: GeoPoint) -> Result<Vec<NearbyFeature>, GeodataError> {
        let url = self.request_url(point);
        debug!(point = %point, "Querying Overpass");

        let body = self.http_client.get(url.as_str()).await.map_err(|e| {
            warn!(error = %e, point = %point, "Overpass request failed");
            GeodataError::from(e)
        })?;

        let features = parse_response(&body, point)?;
        info!(point = %point, count = features.len(), "Fetched nearby features");
        Ok(features)
    }
}

impl<C: AsyncHttpClient> GeodataSource for OverpassClient<C> {
    fn fetch_nearby_features(
        &self,
        point: GeoPoint,
    ) -> BoxFuture<'_, Result<Vec<NearbyFeature>, GeodataError>> {
        Box::pin(self.fetch(point))
    }
}

/// Parses an Overpass JSON body into classified features around `origin`.
///
/// Elements without a position or without a recognised tag combination are
/// skipped. Input order is preserved.
pub fn parse_response(body: &[u8], origin: GeoPoint) -> Result<Vec<NearbyFeature>, GeodataError> {
    let response: OverpassResponse = serde_json::from_slice(body)
        .map_err(|e| GeodataError::MalformedResponse(e.to_string()))?;

    if let Some(remark) = &response.remark {
        warn!(remark = %remark, "Overpass reported a runtime remark");
    }

    let total = response.elements.len();
    let features: Vec<NearbyFeature> = response
        .elements
        .iter()
        .filter_map(|element| {
            let position = element.representative_point()?;
            let kind = classify(&element.tags)?;
            Some(NearbyFeature::new(
                kind,
                haversine_distance(origin, position),
                element.id,
            ))
        })
        .collect();

    debug!(
        elements = total,
        classified = features.len(),
        "Parsed Overpass response"
    );
    Ok(features)
}
