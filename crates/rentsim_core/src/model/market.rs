//! Wire types shared by the market-data service and its clients
//!
//! Field names follow the JSON contract (`pricePerSqm`, `roomType`, ...).

use serde::{Deserialize, Serialize};

/// Long-term rent figures for one city (`GET /api/rent-data`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentData {
    /// The city key that was requested, normalised
    #[serde(default)]
    pub city: String,
    pub price_per_sqm: f64,
    /// Rent per m² per month, already adjusted for the room type
    pub rent_per_sqm: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Short-term rental figures for one city (`GET /api/airbnb-data`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirbnbData {
    #[serde(default)]
    pub city: String,
    pub nightly_rate: f64,
    /// Share of nights booked, between 0 and 1
    pub occupancy_rate: f64,
    pub monthly_revenue_estimate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Body of `POST /api/contact`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub consent: bool,
}

/// Reply to `POST /api/contact`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ContactResponse {
    pub fn success() -> Self {
        Self {
            ok: true,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rent_data_accepts_missing_source() {
        let data: RentData =
            serde_json::from_str(r#"{"pricePerSqm": 10500, "rentPerSqm": 32}"#).unwrap();
        assert_eq!(data.source, None);
        assert_eq!(data.city, "");
        assert_eq!(data.rent_per_sqm, 32.0);
    }

    #[test]
    fn test_contact_request_defaults() {
        let req: ContactRequest = serde_json::from_str(r#"{"name": "Ana"}"#).unwrap();
        assert_eq!(req.name, "Ana");
        assert!(!req.consent);
        assert!(req.message.is_empty());
    }

    #[test]
    fn test_contact_response_shape() {
        let json = serde_json::to_value(ContactResponse::success()).unwrap();
        assert_eq!(json, serde_json::json!({"ok": true}));
    }
}
