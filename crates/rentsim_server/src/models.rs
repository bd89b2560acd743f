use serde::{Deserialize, Serialize};

// ============================================================================
// Query Types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentDataQuery {
    #[serde(default)]
    pub city: String,
    /// Kept as text so an unknown value falls back to t2 instead of a 400
    pub room_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AirbnbDataQuery {
    #[serde(default)]
    pub city: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct CitiesQuery {
    #[serde(default)]
    pub q: String,
}

// ============================================================================
// Contact Types
// ============================================================================

/// An accepted contact submission, as handed to a [`crate::contact::ContactSink`]
#[derive(Debug, Clone, Serialize)]
pub struct ContactSubmission {
    pub id: String,
    pub received_at: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub message: String,
}
