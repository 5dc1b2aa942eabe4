//! Quote estimation route.
//!
//! - `POST /api/quote` — compute an estimate from `{ service, features?,
//!   description? }`; 400 with `{"error": "Service is required"}` when the
//!   service id is missing, 500 with a generic message on anything else.
//! - Other methods on the route answer 405 with a JSON body; OPTIONS is left
//!   to the CORS layer (a bare OPTIONS gets an empty 200).

use axum::body::Bytes;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use ballpark_core::{estimate, InterfaceError, QuoteRequest, QuoteResult};
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct QuoteApiError {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub fn router() -> Router {
    Router::new()
        .route("/api/quote", post(create_quote).options(preflight).fallback(method_not_allowed))
}

pub async fn create_quote(
    body: Bytes,
) -> Result<Json<QuoteResult>, (StatusCode, Json<QuoteApiError>)> {
    let correlation_id = Uuid::new_v4().simple().to_string();

    // An absent body estimates an empty request, which then fails service
    // validation rather than parsing.
    let request: QuoteRequest = if body.is_empty() {
        QuoteRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|parse_error| {
            internal_error(&correlation_id, &format!("request body parse failed: {parse_error}"))
        })?
    };

    match estimate(&request) {
        Ok(result) => {
            info!(
                event_name = "quote.estimate.computed",
                correlation_id = %correlation_id,
                service = %result.service,
                hours = result.hours,
                price_low = result.price_low,
                price_high = result.price_high,
                "quote estimate computed"
            );
            Ok(Json(result))
        }
        Err(domain_error) => {
            let interface = domain_error.into_interface(correlation_id.clone());
            warn!(
                event_name = "quote.estimate.rejected",
                correlation_id = %correlation_id,
                error = %interface,
                "quote request failed validation"
            );
            Err((
                StatusCode::BAD_REQUEST,
                Json(QuoteApiError { error: interface.user_message().to_string(), message: None }),
            ))
        }
    }
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> (StatusCode, Json<QuoteApiError>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(QuoteApiError { error: "Method not allowed".to_string(), message: None }),
    )
}

fn internal_error(correlation_id: &str, detail: &str) -> (StatusCode, Json<QuoteApiError>) {
    let interface = InterfaceError::internal(detail, correlation_id);
    error!(
        event_name = "quote.estimate.failed",
        correlation_id = %correlation_id,
        error = %interface,
        "quote request failed unexpectedly"
    );
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(QuoteApiError {
            error: "Internal server error".to_string(),
            message: Some(interface.user_message().to_string()),
        }),
    )
}

#[cfg(test)]
mod tests {
    use axum::body::Bytes;
    use axum::http::StatusCode;

    use super::{create_quote, method_not_allowed};

    #[tokio::test]
    async fn valid_request_returns_the_computed_estimate() {
        let body = Bytes::from_static(
            br#"{"service":"apps","features":["User Login / Authentication","Online Payments"]}"#,
        );

        let result = create_quote(body).await.expect("should succeed");

        assert_eq!(result.0.hours, 110);
        assert_eq!(result.0.price_low, 5500);
        assert_eq!(result.0.price_high, 11000);
        assert_eq!(result.0.breakdown.feature_hours, 30);
    }

    #[tokio::test]
    async fn missing_service_returns_bad_request() {
        let body = Bytes::from_static(br#"{"features":[]}"#);

        let (status, payload) = create_quote(body).await.expect_err("should fail validation");

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(payload.0.error, "Service is required");
        assert!(payload.0.message.is_none());
    }

    #[tokio::test]
    async fn empty_body_fails_service_validation_not_parsing() {
        let (status, payload) =
            create_quote(Bytes::new()).await.expect_err("should fail validation");

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(payload.0.error, "Service is required");
    }

    #[tokio::test]
    async fn malformed_body_is_translated_to_a_generic_internal_error() {
        let body = Bytes::from_static(b"{not json");

        let (status, payload) = create_quote(body).await.expect_err("should fail");

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(payload.0.error, "Internal server error");
        assert_eq!(
            payload.0.message.as_deref(),
            Some("Unable to calculate quote. Please try again or contact us directly.")
        );
    }

    #[tokio::test]
    async fn other_methods_get_a_json_405_body() {
        let (status, payload) = method_not_allowed().await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(payload.0.error, "Method not allowed");
    }
}
