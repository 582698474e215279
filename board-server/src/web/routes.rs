//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::board::{BoardSnapshot, load_board};
use crate::digitransit::DigitransitError;

use super::dto::{DeparturesResponse, ErrorResponse};
use super::state::AppState;
use super::templates::{DeparturesTemplate, ErrorTemplate, IndexTemplate};

/// Create the application router.
///
/// Static assets are served from the configured static directory.
pub fn create_router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();

    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/departures", get(departures))
        .route("/api/departures", get(departures_json))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Board page.
async fn index_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let now = (state.clock)();
    let html = IndexTemplate { clock: now.clock() }.render()?;
    Ok(Html(html))
}

/// Fetch and build the board for the current time.
async fn current_board(state: &AppState) -> Result<(BoardSnapshot, String), AppError> {
    let now = (state.clock)();
    let snapshot = load_board(&state.source, &state.config, now).await?;
    Ok((snapshot, now.clock()))
}

/// Departure tables as an HTML fragment.
async fn departures(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let (snapshot, updated) = current_board(&state).await?;
    let html = DeparturesTemplate::from_snapshot(&snapshot, updated).render()?;
    Ok(Html(html))
}

/// Departure board as JSON.
async fn departures_json(
    State(state): State<AppState>,
) -> Result<Json<DeparturesResponse>, ApiError> {
    let (snapshot, generated_at) = current_board(&state).await.map_err(ApiError)?;
    Ok(Json(DeparturesResponse::from_snapshot(&snapshot, generated_at)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// The transit API answered with something we could not use.
    BadGateway { message: String, details: String },
    Internal { message: String },
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadGateway { .. } => StatusCode::BAD_GATEWAY,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            AppError::BadGateway { message, .. } | AppError::Internal { message } => message,
        }
    }
}

impl From<DigitransitError> for AppError {
    fn from(e: DigitransitError) -> Self {
        match e {
            DigitransitError::Json { message, body } => {
                let details = match body {
                    Some(body) => format!("{message}\nResponse began: {body}"),
                    None => message,
                };
                AppError::BadGateway {
                    message: "Unexpected response from the transit API".to_string(),
                    details,
                }
            }
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Internal {
            message: format!("Template error: {e}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let details = match &self {
            AppError::BadGateway { details, .. } => {
                error!(%status, %details, "{}", self.message());
                Some(details.clone())
            }
            AppError::Internal { message } => {
                error!(%status, "{message}");
                None
            }
        };

        let page = ErrorTemplate {
            title: status
                .canonical_reason()
                .unwrap_or("Error")
                .to_string(),
            message: self.message().to_string(),
            details,
        };
        let html = page
            .render()
            .unwrap_or_else(|_| format!("{status}: {}", self.message()));

        (status, Html(html)).into_response()
    }
}

/// Errors from JSON endpoints, reported as `{"error": ...}`.
#[derive(Debug)]
pub struct ApiError(AppError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.0.status();
        error!(%status, "{}", self.0.message());
        let body = Json(ErrorResponse {
            error: self.0.message().to_string(),
        });
        (status, body).into_response()
    }
}
