use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, security_header_layers};
use crate::handlers::{health_check, render_ticket, send_ticket};
use crate::AppState;

pub fn create_routes(state: AppState) -> Router {
    let (nosniff, frame_deny) = security_header_layers();

    Router::new()
        .route("/health", get(health_check))
        .route("/send-ticket", post(send_ticket))
        .route("/render-ticket", post(render_ticket))
        .layer(TraceLayer::new_for_http())
        .layer(nosniff)
        .layer(frame_deny)
        .layer(create_cors_layer())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::SmtpConfig;
    use crate::mailer::Mailer;

    /// Router wired to a relay endpoint nothing listens on.
    fn test_app() -> Router {
        let config = SmtpConfig {
            host: Some("127.0.0.1".to_string()),
            port: 59999,
            username: Some("user".to_string()),
            password: Some("secret".to_string()),
            from: Some("tickets@example.com".to_string()),
        };
        create_routes(AppState {
            mailer: Mailer::new(config),
        })
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::X_CONTENT_TYPE_OPTIONS).unwrap(),
            "nosniff"
        );
    }

    #[tokio::test]
    async fn test_preflight_is_answered_permissively() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/send-ticket")
                    .header(header::ORIGIN, "https://tickets.example.net")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_json_returns_generic_failure() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/send-ticket")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({ "error": "Failed to send email" }));
    }

    #[tokio::test]
    async fn test_unreachable_relay_returns_generic_failure() {
        let payload = json!({
            "documentBase64": "JVBERi0xLjc=",
            "recipientEmail": "pax@example.com",
            "subject": "Flight Ticket - PNR: ABC123"
        });

        let response = test_app()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/send-ticket")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({ "error": "Failed to send email" }));
    }

    #[tokio::test]
    async fn test_render_ticket_returns_pdf_download() {
        let payload = json!({
            "passengerName": "Jane Doe",
            "pnr": "ABC123",
            "flights": [{
                "from": "CAI",
                "to": "DXB",
                "departureDate": "2024-01-01",
                "departureTime": "10:00",
                "arrivalDate": "2024-01-01",
                "arrivalTime": "12:30"
            }]
        });

        let response = test_app()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/render-ticket")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/pdf"
        );
        assert_eq!(
            response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
            "attachment; filename=\"flight-ticket-ABC123.pdf\""
        );

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(body.starts_with(b"%PDF"));
        // The derived duration must land in the rendered document.
        assert!(body
            .windows("2h 30m".len())
            .any(|window| window == b"2h 30m"));
    }
}
