use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use factory_kpi::{domain::Period, GeneratorConfig};
use serde::{Deserialize, Serialize};

use crate::{
    export::summary_to_csv,
    pipeline::{render, PipelineError, RenderRequest},
};

#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<GeneratorConfig>,
}

impl AppState {
    pub fn new(dataset: GeneratorConfig) -> Self {
        Self {
            dataset: Arc::new(dataset),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SelectionQuery {
    pub period: Option<String>,
    pub line: Option<String>,
}

impl SelectionQuery {
    fn request(&self) -> Result<RenderRequest, PipelineError> {
        RenderRequest::parse(self.period.as_deref(), self.line.as_deref())
    }
}

#[derive(Debug, Serialize)]
pub struct LineOptions {
    pub lines: Vec<String>,
    pub options: Vec<String>,
    pub periods: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

pub struct ApiError(PipelineError);

impl From<PipelineError> for ApiError {
    fn from(e: PipelineError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            PipelineError::InvalidRequest(_) => {
                metrics::counter!("dashboard_request_rejected_total").increment(1);
                StatusCode::BAD_REQUEST
            }
            PipelineError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::warn!(error = %self.0, status = status.as_u16(), "dashboard request failed");
        (status, Json(ErrorBody { error: self.0.to_string() })).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/dashboard", get(dashboard))
        .route("/api/summary.csv", get(summary_csv))
        .route("/api/lines", get(lines))
        .route("/healthz", get(healthz))
        .with_state(state)
}

fn etag(fingerprint: &str) -> String {
    format!("\"{fingerprint}\"")
}

pub async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<SelectionQuery>,
) -> Result<Response, ApiError> {
    let request = query.request()?;
    let out = render(&state.dataset, &request);
    Ok(([(header::ETAG, etag(&out.fingerprint))], Json(out.view)).into_response())
}

pub async fn summary_csv(
    State(state): State<AppState>,
    Query(query): Query<SelectionQuery>,
) -> Result<Response, ApiError> {
    let request = query.request()?;
    let out = render(&state.dataset, &request);
    let body = summary_to_csv(&out.view.summary)?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::ETAG, etag(&out.fingerprint)),
        ],
        body,
    )
        .into_response())
}

pub async fn lines(State(state): State<AppState>) -> Json<LineOptions> {
    let lines = state.dataset.lines.clone();
    let options = std::iter::once("All".to_string()).chain(lines.iter().cloned()).collect();
    Json(LineOptions {
        lines,
        options,
        periods: Period::ALL.iter().map(|p| p.as_str()).collect(),
    })
}

pub async fn healthz() -> &'static str {
    "ok"
}
