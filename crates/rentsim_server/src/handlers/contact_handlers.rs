use axum::{Json, extract::State, extract::rejection::JsonRejection};
use rentsim_core::model::{ContactRequest, ContactResponse};
use uuid::Uuid;

use crate::contact::AppState;
use crate::error::ApiResult;
use crate::models::ContactSubmission;
use crate::validation;

// ============================================================================
// Contact Handlers
// ============================================================================

/// `POST /api/contact`
///
/// Malformed bodies and missing fields both answer 400 with `{ok: false, error}`.
pub async fn submit_contact(
    State(state): State<AppState>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> ApiResult<Json<ContactResponse>> {
    let Json(req) = payload?;
    validation::validate_contact(&req)?;

    let submission = ContactSubmission {
        id: Uuid::new_v4().to_string(),
        received_at: jiff::Timestamp::now().to_string(),
        name: req.name.trim().to_string(),
        email: req.email.trim().to_string(),
        phone: non_blank(req.phone),
        city: non_blank(req.city),
        message: req.message,
    };

    if !state.contact_delay.is_zero() {
        tokio::time::sleep(state.contact_delay).await;
    }
    state.contact_sink.deliver(&submission)?;

    Ok(Json(ContactResponse::success()))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
