//! Thin HTTP layer over `EmailClassifier`. No classification logic lives here.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::analyze::{ClassificationResult, EmailClassifier};
use crate::error::ClassifyError;

#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<EmailClassifier>,
}

impl AppState {
    pub fn new(classifier: Arc<EmailClassifier>) -> Self {
        Self { classifier }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/api/classify", get(classify_query))
        .route("/classify", post(classify_json))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Deserialize)]
struct ClassifyReq {
    email_text: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ClassifyError {
    fn into_response(self) -> Response {
        let status = match self {
            ClassifyError::EmptyInput => StatusCode::BAD_REQUEST,
        };
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

async fn classify_query(
    State(state): State<AppState>,
    Query(q): Query<ClassifyReq>,
) -> Result<Json<ClassificationResult>, ClassifyError> {
    state.classifier.classify(&q.email_text).await.map(Json)
}

async fn classify_json(
    State(state): State<AppState>,
    Json(body): Json<ClassifyReq>,
) -> Result<Json<ClassificationResult>, ClassifyError> {
    state.classifier.classify(&body.email_text).await.map(Json)
}
