//! Turning free-form lookup answers into [`OttService`] lists.

use serde::Deserialize;

use super::{OttService, OttServiceType, VideoQuality};

const KNOWN_STREAMING_SERVICES: [&str; 10] = [
    "Netflix",
    "Prime Video",
    "Disney+",
    "HBO Max",
    "Hulu",
    "Apple TV+",
    "Paramount+",
    "Peacock",
    "Showtime",
    "Starz",
];

const RENT_PRICE: f64 = 3.99;
const BUY_PRICE: f64 = 14.99;

#[derive(Deserialize)]
struct RawAnswer {
    #[serde(default)]
    services: Vec<RawService>,
}

#[derive(Deserialize)]
struct RawService {
    name: Option<String>,
    #[serde(rename = "type")]
    service_type: Option<String>,
    price: Option<serde_json::Value>,
    quality: Option<String>,
    #[serde(default)]
    regions: Vec<String>,
    url: Option<String>,
}

impl RawService {
    fn into_service(self) -> Option<OttService> {
        let name = self.name.filter(|n| !n.trim().is_empty())?;
        let service_type = OttServiceType::parse(self.service_type.as_deref()?)?;
        let price = match self.price {
            Some(serde_json::Value::Number(n)) => n.as_f64(),
            Some(serde_json::Value::String(s)) => s.trim().trim_start_matches('$').parse().ok(),
            _ => None,
        };
        Some(OttService {
            name,
            service_type,
            price,
            quality: self.quality.as_deref().and_then(VideoQuality::parse),
            regions: self.regions,
            url: self.url.filter(|u| !u.is_empty()),
        })
    }
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Parses a `{"services": [...]}` answer. `None` when the content is not
/// JSON of that shape; malformed entries are skipped.
pub fn parse_services_json(content: &str) -> Option<Vec<OttService>> {
    let answer: RawAnswer = serde_json::from_str(strip_code_fence(content)).ok()?;
    Some(
        answer
            .services
            .into_iter()
            .filter_map(RawService::into_service)
            .collect(),
    )
}

/// Keyword scan used when the answer is prose.
pub fn extract_services_from_text(content: &str) -> Vec<OttService> {
    let text = content.to_lowercase();
    let us_hd = |name: &str, service_type, price| OttService {
        name: name.to_string(),
        service_type,
        price,
        quality: Some(VideoQuality::HD),
        regions: vec!["US".to_string()],
        url: None,
    };

    let mut services: Vec<OttService> = KNOWN_STREAMING_SERVICES
        .iter()
        .filter(|name| text.contains(&name.to_lowercase()))
        .map(|name| us_hd(name, OttServiceType::Stream, None))
        .collect();

    if text.contains("rent") {
        services.push(us_hd("Various Platforms", OttServiceType::Rent, Some(RENT_PRICE)));
    }
    if text.contains("buy") || text.contains("purchase") {
        services.push(us_hd("Various Platforms", OttServiceType::Buy, Some(BUY_PRICE)));
    }
    services
}
