use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use metrics::counter;
use tower_http::cors::CorsLayer;

use crate::consensus::compute_consensus;
use crate::history::{ConsensusRecord, History};
use crate::parse::parse_rating_value;
use crate::providers::{omdb::OmdbProvider, RatingProvider};
use crate::ratings::{ConsensusResult, RatingBundle};
use crate::sources::RatingSource;

#[derive(Clone)]
pub struct AppState {
    history: Arc<History>,
    omdb: Option<Arc<OmdbProvider>>,
}

impl AppState {
    pub fn new(history: History, omdb: Option<Arc<OmdbProvider>>) -> Self {
        Self {
            history: Arc::new(history),
            omdb,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/consensus", post(consensus_one))
        .route("/consensus/batch", post(consensus_batch))
        .route("/parse", post(parse_one))
        .route("/ratings/{imdb_id}", get(ratings_for_title))
        .route("/debug/weights", get(debug_weights))
        .route("/debug/history", get(debug_history))
        .route("/debug/last-consensus", get(debug_last_consensus))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

async fn consensus_one(
    State(state): State<AppState>,
    Json(bundle): Json<RatingBundle>,
) -> Json<ConsensusResult> {
    let result = compute_consensus(&bundle);
    counter!("consensus_computed_total").increment(1);
    state.history.push(&result);
    Json(result)
}

async fn consensus_batch(
    State(state): State<AppState>,
    Json(bundles): Json<Vec<RatingBundle>>,
) -> Json<Vec<ConsensusResult>> {
    let results = bundles
        .iter()
        .map(|b| {
            let r = compute_consensus(b);
            state.history.push(&r);
            r
        })
        .collect::<Vec<_>>();
    counter!("consensus_computed_total").increment(results.len() as u64);
    Json(results)
}

#[derive(serde::Deserialize)]
struct ParseReq {
    source: RatingSource,
    text: String,
}

#[derive(serde::Serialize)]
struct ParseResp {
    source: RatingSource,
    /// Native-scale value, or null when the text did not match the
    /// source's expected pattern.
    value: Option<f64>,
}

async fn parse_one(Json(body): Json<ParseReq>) -> Json<ParseResp> {
    let value = parse_rating_value(body.source, &body.text);
    if value.is_none() {
        counter!("rating_parse_failures_total").increment(1);
    }
    Json(ParseResp {
        source: body.source,
        value,
    })
}

#[derive(serde::Serialize)]
struct TitleRatings {
    imdb_id: String,
    bundle: RatingBundle,
    result: ConsensusResult,
}

/// Fetch upstream ratings for one title and score them in a single call.
/// Requires the OMDb provider to be configured.
async fn ratings_for_title(
    State(state): State<AppState>,
    Path(imdb_id): Path<String>,
) -> Result<Json<TitleRatings>, (StatusCode, String)> {
    let Some(provider) = state.omdb.as_ref() else {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            "OMDB_API_KEY is not configured".to_string(),
        ));
    };

    let bundle = provider.fetch_ratings(&imdb_id).await.map_err(|e| {
        tracing::warn!(error = ?e, %imdb_id, "upstream ratings fetch failed");
        (StatusCode::BAD_GATEWAY, "Upstream request failed".to_string())
    })?;

    let result = compute_consensus(&bundle);
    counter!("consensus_computed_total").increment(1);
    state.history.push(&result);

    Ok(Json(TitleRatings {
        imdb_id,
        bundle,
        result,
    }))
}

async fn debug_weights(State(_state): State<AppState>) -> Json<BTreeMap<RatingSource, f64>> {
    let table = RatingSource::ALL
        .iter()
        .map(|s| (*s, s.base_weight()))
        .collect();
    Json(table)
}

async fn debug_history(State(state): State<AppState>) -> Json<Vec<ConsensusRecord>> {
    Json(state.history.snapshot_last_n(10))
}

async fn debug_last_consensus(State(state): State<AppState>) -> Json<Option<ConsensusRecord>> {
    Json(state.history.snapshot_last_n(1).pop())
}
