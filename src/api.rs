//! HTTP interface to the preverb dataset

use crate::{
    config::Config,
    dataset::{Dataset, Record},
    stats::PreverbStats,
};
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Message served at the root of the API
pub const WELCOME: &str =
    "Welcome to the Preverbs API! Visit /api/preverbs to get a list of preverbs.";

/// State shared by all request handlers
#[derive(Clone, Debug)]
struct AppState {
    /// Dataset being queried
    dataset: Arc<Dataset>,

    /// Page size used when a dataset listing doesn't specify one
    default_per_page: i64,
}

/// Build the router that serves the API
///
/// Cross-origin requests are allowed from anywhere, as the API is meant to be
/// queried by a separately hosted front-end.
pub fn router(dataset: Arc<Dataset>, config: &Config) -> Router {
    let state = AppState {
        dataset,
        default_per_page: i64::from(config.per_page.get()),
    };
    Router::new()
        .route("/", get(welcome))
        .route("/api/preverbs", get(list_preverbs))
        .route("/api/preverbs/:preverb", get(preverb_statistics))
        .route("/api/meanings/:meaning_id", get(meaning_occurrences))
        .route("/api/dataset", get(dataset_page))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

async fn welcome() -> &'static str {
    WELCOME
}

async fn list_preverbs(State(state): State<AppState>) -> Response {
    Json(state.dataset.preverbs()).into_response()
}

async fn preverb_statistics(
    State(state): State<AppState>,
    Path(preverb): Path<String>,
) -> Response {
    log::debug!("Computing statistics of preverb {preverb:?}");
    Json(PreverbStats::compute(&state.dataset, &preverb)).into_response()
}

async fn meaning_occurrences(
    State(state): State<AppState>,
    Path(meaning_id): Path<String>,
) -> Result<Response, ApiError> {
    log::debug!("Listing occurrences of meaning {meaning_id:?}");
    let occurrences = state
        .dataset
        .meaning_occurrences(&meaning_id)
        .ok_or_else(|| ApiError::UnknownMeaning(meaning_id.clone()))?;
    Ok(Json(occurrences).into_response())
}

/// Query parameters of dataset listings
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
struct PageQuery {
    page: Option<i64>,
    per_page: Option<i64>,
}

/// One page of the raw dataset
///
/// Rows are served with the columns of [`Record`] only. Any other column of
/// the input CSV table was dropped at load time.
#[derive(Debug, Serialize)]
struct DatasetPage<'dataset> {
    data: &'dataset [Record],
    total: usize,
    page: i64,
    per_page: i64,
}

async fn dataset_page(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    let page = query.page.unwrap_or(1);
    let per_page = query.per_page.unwrap_or(state.default_per_page);
    log::debug!("Listing page {page} of the dataset with {per_page} records per page");
    Ok(Json(DatasetPage {
        data: state.dataset.page(page, per_page),
        total: state.dataset.len(),
        page,
        per_page,
    })
    .into_response())
}

/// Errors that a request can run into
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No record has the requested meaning
    #[error("no occurrence of meaning {0:?}")]
    UnknownMeaning(String),

    /// Query parameters could not be decoded
    #[error("invalid query parameters: {0}")]
    BadQuery(#[from] QueryRejection),
}
//
impl ApiError {
    /// HTTP status that this error maps into
    pub fn status(&self) -> StatusCode {
        match self {
            Self::UnknownMeaning(_) => StatusCode::NOT_FOUND,
            Self::BadQuery(_) => StatusCode::BAD_REQUEST,
        }
    }
}
//
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        log::debug!("Answering {status} to a request: {self}");
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
