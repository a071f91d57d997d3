use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OttServiceType {
    Stream,
    Rent,
    Buy,
}

impl OttServiceType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stream" | "streaming" | "subscription" => Some(Self::Stream),
            "rent" | "rental" => Some(Self::Rent),
            "buy" | "purchase" => Some(Self::Buy),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stream => "stream",
            Self::Rent => "rent",
            Self::Buy => "buy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoQuality {
    SD,
    HD,
    #[serde(rename = "4K")]
    UHD,
}

impl VideoQuality {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SD" => Some(Self::SD),
            "HD" => Some(Self::HD),
            "4K" | "UHD" => Some(Self::UHD),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SD => "SD",
            Self::HD => "HD",
            Self::UHD => "4K",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OttService {
    pub name: String,
    #[serde(rename = "type")]
    pub service_type: OttServiceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<VideoQuality>,
    pub regions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl OttService {
    fn fixed(
        name: &str,
        service_type: OttServiceType,
        price: Option<f64>,
        quality: VideoQuality,
        regions: &[&str],
    ) -> Self {
        Self {
            name: name.to_string(),
            service_type,
            price,
            quality: Some(quality),
            regions: regions.iter().map(|r| r.to_string()).collect(),
            url: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OttAvailability {
    pub movie_id: String,
    pub movie_title: String,
    pub year: i32,
    pub services: Vec<OttService>,
    pub last_updated: DateTime<Utc>,
}

/// Served whenever the lookup is unavailable or yields nothing.
pub fn fallback_services() -> Vec<OttService> {
    use OttServiceType::*;
    use VideoQuality::*;

    vec![
        OttService::fixed("Netflix", Stream, None, HD, &["US", "UK", "CA"]),
        OttService::fixed("Prime Video", Stream, None, UHD, &["US", "UK", "CA", "DE"]),
        OttService::fixed("Apple TV+", Rent, Some(3.99), HD, &["US", "UK", "CA"]),
        OttService::fixed("Google Play", Buy, Some(14.99), HD, &["US", "UK", "CA"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_has_four_entries() {
        let services = fallback_services();
        assert_eq!(services.len(), 4);
        assert_eq!(services[1].quality, Some(VideoQuality::UHD));
        assert_eq!(services[1].regions.len(), 4);
        assert_eq!(services[3].price, Some(14.99));
    }

    #[test]
    fn serializes_wire_names() {
        let json = serde_json::to_value(&fallback_services()[1]).unwrap();
        assert_eq!(json["type"], "stream");
        assert_eq!(json["quality"], "4K");
        assert!(json.get("price").is_none());
    }
}
