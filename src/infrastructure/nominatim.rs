// Nominatim geocoding adapter (reverse lookup and place search)
use crate::application::ports::{FetchError, Geocoder};
use crate::domain::coordinate::Coordinate;
use crate::domain::suggestion::Suggestion;
use crate::domain::weather::PlaceAddress;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

const SERVICE: &str = "geocoder";

#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: reqwest::Client,
    base_url: String,
    user_agent: String,
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    address: Option<AddressParts>,
}

#[derive(Debug, Deserialize)]
struct AddressParts {
    city: Option<String>,
    town: Option<String>,
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    display_name: String,
    lat: String,
    lon: String,
}

impl NominatimClient {
    pub fn new(client: reqwest::Client, base_url: String, user_agent: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent,
        }
    }

    fn reverse_url(&self, at: Coordinate) -> String {
        format!(
            "{}/reverse?format=json&lat={}&lon={}&zoom=10",
            self.base_url, at.latitude, at.longitude
        )
    }

    fn search_url(&self, query: &str, limit: usize) -> String {
        format!(
            "{}/search?format=json&q={}&limit={}",
            self.base_url,
            urlencoding::encode(query),
            limit
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                service: SERVICE,
                source,
            })?;

        response.json::<T>().await.map_err(|e| FetchError::Decode {
            service: SERVICE,
            message: e.to_string(),
        })
    }
}

fn to_address(response: ReverseResponse) -> Option<PlaceAddress> {
    response.address.map(|a| PlaceAddress {
        city: a.city,
        town: a.town,
        country: a.country,
    })
}

/// Hits whose coordinates don't parse are skipped
fn to_suggestions(hits: Vec<SearchHit>) -> Vec<Suggestion> {
    hits.into_iter()
        .filter_map(|hit| match Coordinate::parse(&hit.lat, &hit.lon) {
            Ok(coordinate) => Some(Suggestion::new(hit.display_name, coordinate)),
            Err(e) => {
                tracing::warn!("Skipping search hit {:?}: {}", hit.display_name, e);
                None
            }
        })
        .collect()
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn reverse(&self, at: Coordinate) -> Result<Option<PlaceAddress>, FetchError> {
        let response: ReverseResponse = self.get_json(&self.reverse_url(at)).await?;
        Ok(to_address(response))
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Suggestion>, FetchError> {
        let hits: Vec<SearchHit> = self.get_json(&self.search_url(query, limit)).await?;
        Ok(to_suggestions(hits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> NominatimClient {
        NominatimClient::new(
            reqwest::Client::new(),
            "https://nominatim.openstreetmap.org/".to_string(),
            "garden-dashboard/test".to_string(),
        )
    }

    #[test]
    fn test_urls() {
        let client = client();
        assert_eq!(
            client.reverse_url(Coordinate::new(-6.2, 106.8)),
            "https://nominatim.openstreetmap.org/reverse?format=json&lat=-6.2&lon=106.8&zoom=10"
        );
        assert_eq!(
            client.search_url("Jalan Thamrin & co", 5),
            "https://nominatim.openstreetmap.org/search?format=json&q=Jalan%20Thamrin%20%26%20co&limit=5"
        );
    }

    #[test]
    fn test_reverse_without_address() {
        let response: ReverseResponse =
            serde_json::from_str(r#"{"error": "Unable to geocode"}"#).unwrap();
        assert_eq!(to_address(response), None);

        let response: ReverseResponse = serde_json::from_str(
            r#"{"display_name": "Bogor", "address": {"town": "Bogor", "country": "Indonesia"}}"#,
        )
        .unwrap();
        let address = to_address(response).unwrap();
        assert_eq!(address.town.as_deref(), Some("Bogor"));
        assert_eq!(address.city, None);
    }

    #[test]
    fn test_search_hits_to_suggestions() {
        let hits: Vec<SearchHit> = serde_json::from_str(
            r#"[
                {"place_id": 1, "display_name": "Jakarta, Indonesia", "lat": "-6.1753942", "lon": "106.827183"},
                {"place_id": 2, "display_name": "Broken", "lat": "", "lon": "106.8"}
            ]"#,
        )
        .unwrap();

        let suggestions = to_suggestions(hits);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].label, "Jakarta, Indonesia");
        assert_eq!(suggestions[0].coordinate, Coordinate::new(-6.1753942, 106.827183));
    }
}
