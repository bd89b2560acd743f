use axum::{Router, routing::post};

use crate::contact::AppState;
use crate::handlers;

pub fn contact_routes() -> Router<AppState> {
    Router::new().route("/api/contact", post(handlers::submit_contact))
}
