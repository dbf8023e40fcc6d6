use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::{Body, Bytes},
    extract::{DefaultBodyLimit, State},
    http::{Method, Request, StatusCode},
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use config_rs::ServiceConfig;
use serde::Serialize;
use ticket_classifier::{Classification, Decision, TicketClassifier};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod samples;
pub mod validation;

use validation::{
    parse_batch_request, payload_limit_config, validate_content_type, ValidationErrorResponse,
};

/// Path of the batch classification endpoint
pub const CLASSIFY_BATCH_PATH: &str = "/classify_batch";

const CONSOLE_HTML: &str = include_str!("../static/index.html");

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub healthy: bool,
    pub service_name: String,
    pub uptime_seconds: u64,
    pub status: String,
}

/// Classifier gateway state shared by all handlers
pub struct ClassifierGateway {
    classifier: TicketClassifier,
    service_name: String,
    max_payload_bytes: usize,
    started_at: Instant,
}

impl ClassifierGateway {
    pub fn new(config: &ServiceConfig) -> Self {
        Self {
            classifier: TicketClassifier::new(),
            service_name: config.service_name.clone(),
            max_payload_bytes: config.max_payload_bytes,
            started_at: Instant::now(),
        }
    }

    /// Create the Axum router with all routes and middleware
    pub fn create_router(self: Arc<Self>) -> Router {
        let max_payload_bytes = self.max_payload_bytes;

        Router::new()
            .route("/", get(Self::console_handler))
            .route("/health", get(Self::health_handler))
            .route("/samples", get(Self::samples_handler))
            .route(CLASSIFY_BATCH_PATH, post(Self::classify_batch_handler))
            .layer(middleware::from_fn(Self::validate_content_type_middleware))
            // The tower-http limit below replaces axum's 2MB extractor default
            .layer(DefaultBodyLimit::disable())
            .layer(payload_limit_config(max_payload_bytes))
            .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
            .layer(TraceLayer::new_for_http())
            .with_state(self)
    }

    /// GET / - ticket console page
    async fn console_handler() -> Html<&'static str> {
        Html(CONSOLE_HTML)
    }

    async fn health_handler(State(state): State<Arc<Self>>) -> impl IntoResponse {
        Json(HealthResponse {
            healthy: true,
            service_name: state.service_name.clone(),
            uptime_seconds: state.started_at.elapsed().as_secs(),
            status: "SERVING".to_string(),
        })
    }

    async fn samples_handler() -> impl IntoResponse {
        Json(samples::sample_datasets())
    }

    /// POST /classify_batch - classify every ticket in the request, in order
    async fn classify_batch_handler(
        State(state): State<Arc<Self>>,
        body: Bytes,
    ) -> Result<Json<Vec<Classification>>, (StatusCode, Json<ValidationErrorResponse>)> {
        let batch_id = uuid::Uuid::new_v4();

        let tickets = parse_batch_request(&body, state.max_payload_bytes).map_err(|err| {
            tracing::warn!("Rejected batch {}: {}", batch_id, err);
            err.to_response()
        })?;

        let results = state.classifier.classify_batch(&tickets);

        let ai_patches = results
            .iter()
            .filter(|c| c.decision == Decision::AiCodePatch)
            .count();
        tracing::info!(
            "Classified batch {}: tickets={}, ai_code_patch={}, vibe_script={}",
            batch_id,
            results.len(),
            ai_patches,
            results.len() - ai_patches
        );

        Ok(Json(results))
    }

    async fn validate_content_type_middleware(
        req: Request<Body>,
        next: Next,
    ) -> Result<Response, (StatusCode, Json<ValidationErrorResponse>)> {
        if req.method() != Method::POST || req.uri().path() != CLASSIFY_BATCH_PATH {
            return Ok(next.run(req).await);
        }

        if let Err(err) = validate_content_type(req.headers(), "application/json") {
            tracing::warn!("Rejected request to {}: {}", CLASSIFY_BATCH_PATH, err);
            return Err(err.to_response());
        }

        Ok(next.run(req).await)
    }
}
