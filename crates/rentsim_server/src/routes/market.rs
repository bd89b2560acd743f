use axum::{Router, routing::get};

use crate::contact::AppState;
use crate::handlers;

pub fn market_routes() -> Router<AppState> {
    Router::new()
        .route("/api/rent-data", get(handlers::get_rent_data))
        .route("/api/airbnb-data", get(handlers::get_airbnb_data))
        // Input assistance for the city field
        .route("/api/cities", get(handlers::get_city_suggestions))
}
