pub mod contact;
pub mod market;

use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::contact::AppState;

pub use contact::contact_routes;
pub use market::market_routes;

/// Assemble every route of the service.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "rentsim market data server" }))
        .merge(market_routes())
        .merge(contact_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::contact::MemoryContactSink;

    fn test_app() -> Router {
        build_router(AppState::new(Arc::new(MemoryContactSink::default()), Duration::ZERO))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    async fn post_contact(app: Router, body: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/contact")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_banner() {
        let response = test_app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_rent_data_known_city() {
        let (status, json) = get_json(test_app(), "/api/rent-data?city=Vincennes&roomType=t2").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["city"], "vincennes");
        assert_eq!(json["pricePerSqm"], 8500.0);
        assert_eq!(json["rentPerSqm"], 28.0);
        assert_eq!(json["source"], "meilleursagents|live");
    }

    #[tokio::test]
    async fn test_rent_data_unknown_city_and_room_type() {
        let (status, json) = get_json(test_app(), "/api/rent-data?city=Gotham&roomType=t9").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["pricePerSqm"], 10500.0);
        assert_eq!(json["rentPerSqm"], 32.0);
        assert_eq!(json["source"], "meilleursagents|fallback");
    }

    #[tokio::test]
    async fn test_rent_data_without_parameters() {
        let (status, json) = get_json(test_app(), "/api/rent-data").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["rentPerSqm"], 32.0);
    }

    #[tokio::test]
    async fn test_airbnb_data() {
        let (status, json) = get_json(test_app(), "/api/airbnb-data?city=Arcueil").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["nightlyRate"], 65.0);
        assert_eq!(json["occupancyRate"], 0.55);
        let estimate = json["monthlyRevenueEstimate"].as_f64().unwrap();
        assert!((estimate - 65.0 * 0.55 * 30.0).abs() < 1e-9);
        assert_eq!(json["source"], "airdna|live");
    }

    #[tokio::test]
    async fn test_city_suggestions() {
        let (status, json) = get_json(test_app(), "/api/cities?q=cret").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!(["Créteil"]));
    }

    #[tokio::test]
    async fn test_contact_success_reaches_sink() {
        let sink = Arc::new(MemoryContactSink::default());
        let app = build_router(AppState::new(sink.clone(), Duration::ZERO));

        let (status, json) = post_contact(
            app,
            r#"{"name": "Camille", "email": "camille@example.com", "phone": " ", "message": "Hello", "consent": true}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({"ok": true}));

        let submissions = sink.submissions();
        assert_eq!(submissions.len(), 1);
        assert_eq!(submissions[0].name, "Camille");
        assert_eq!(submissions[0].phone, None);
    }

    #[tokio::test]
    async fn test_contact_missing_fields() {
        let (status, json) =
            post_contact(test_app(), r#"{"name": "Camille", "consent": false}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["ok"], false);
        assert_eq!(
            json["error"],
            "Missing required fields: email, message, consent"
        );
    }

    #[tokio::test]
    async fn test_contact_invalid_json() {
        let (status, json) = post_contact(test_app(), "{not json").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["ok"], false);
        assert!(json["error"].as_str().unwrap().starts_with("Invalid JSON"));
    }
}
