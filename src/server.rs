use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use std::{net::SocketAddr, sync::Arc};
use tokio::sync::Mutex;
use tower_http::services::{ServeDir, ServeFile};

use crate::api::{
    ApiAnalyzeRequest, ApiAnalyzeResponse, ApiBestTimesRequest, ApiBestTimesResponse,
    ApiReplyRequest, ApiReplyResponse, ApiStatusRequest,
};
use engagement_insights::cache::InsightsCache;
use engagement_insights::config::EngineConfig;
use engagement_insights::decode_records;
use engagement_insights::recommendations::RecommendationStatus;
use engagement_insights::replies::suggest_reply;
use engagement_insights::store::{save_summary, StoredSummary, SummaryStore};
use engagement_insights::HistoricalPost;

#[derive(Clone)]
struct AppState {
    config: Arc<EngineConfig>,
    cache: Arc<Mutex<InsightsCache>>,
    store: Option<Arc<SummaryStore>>,
}

pub async fn serve(args: crate::ServeArgs, config: EngineConfig) -> Result<(), String> {
    let store_path = args.store.or_else(|| config.store.path.clone());
    let store = match store_path {
        Some(path) => Some(Arc::new(SummaryStore::load(path.into()).await?)),
        None => None,
    };

    let state = AppState {
        cache: Arc::new(Mutex::new(InsightsCache::new(&config.cache))),
        config: Arc::new(config),
        store,
    };

    let mut app = Router::new()
        .route("/api/health", get(health))
        .route("/api/analyze", post(analyze_handler))
        .route("/api/best-times", post(best_times_handler))
        .route("/api/reply", post(reply_handler))
        .route("/api/summaries", get(summaries_handler))
        .route(
            "/api/summaries/:id/recommendations/:index",
            post(recommendation_status_handler),
        );

    if let Some(web_root) = args.web_root {
        let index_path = format!("{}/index.html", web_root.trim_end_matches('/'));
        let static_service = ServeDir::new(web_root).not_found_service(ServeFile::new(index_path));
        app = app.nest_service("/", static_service);
    }
    let app = app.with_state(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|err| format!("invalid bind address: {}", err))?;

    tracing::info!(%addr, "serving engagement insights");
    axum::serve(tokio::net::TcpListener::bind(addr).await.map_err(|err| {
        format!("failed to bind server: {}", err)
    })?, app)
    .await
    .map_err(|err| format!("server error: {}", err))?;

    Ok(())
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn analyze_handler(
    State(state): State<AppState>,
    Json(request): Json<ApiAnalyzeRequest>,
) -> Result<Json<ApiAnalyzeResponse>, (StatusCode, String)> {
    let persist = request.persist.unwrap_or(true);
    let mut warnings = Vec::new();
    let (events, posts, platforms) = request.into_records(&mut warnings);
    let now = Utc::now();

    let ((report, report_cache), (best_times, best_times_cache)) = {
        let mut cache = state.cache.lock().await;
        cache.purge_stale(now);
        (
            cache.engagement_report(&events, &state.config, now),
            cache.best_times(&posts, &platforms, &state.config, now),
        )
    };

    let summary_id = match (&state.store, persist) {
        (Some(store), true) => {
            let summary = StoredSummary::new(Some(&report), best_times.clone(), now);
            save_summary(store, summary, &mut warnings).await
        }
        _ => None,
    };

    Ok(Json(ApiAnalyzeResponse {
        summary_id,
        report,
        report_cache,
        best_times,
        best_times_cache,
        warnings,
    }))
}

async fn best_times_handler(
    State(state): State<AppState>,
    Json(request): Json<ApiBestTimesRequest>,
) -> Result<Json<ApiBestTimesResponse>, (StatusCode, String)> {
    let mut warnings = Vec::new();
    let (posts, skipped) = decode_records::<HistoricalPost>(request.posts);
    if skipped > 0 {
        warnings.push(format!("skipped {} malformed posts", skipped));
    }

    let (best_times, cache) = {
        let mut cache = state.cache.lock().await;
        cache.best_times(&posts, &request.platforms, &state.config, Utc::now())
    };

    Ok(Json(ApiBestTimesResponse {
        best_times,
        cache,
        warnings,
    }))
}

async fn reply_handler(
    Json(request): Json<ApiReplyRequest>,
) -> Result<Json<ApiReplyResponse>, (StatusCode, String)> {
    let (text, tone) = request
        .into_parts()
        .map_err(|err| (StatusCode::BAD_REQUEST, err))?;
    Ok(Json(ApiReplyResponse {
        suggestion: suggest_reply(&text, tone),
    }))
}

async fn summaries_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<StoredSummary>>, (StatusCode, String)> {
    let store = state.store.as_ref().ok_or((
        StatusCode::NOT_FOUND,
        "summary store not configured".to_string(),
    ))?;
    Ok(Json(store.list().await))
}

async fn recommendation_status_handler(
    State(state): State<AppState>,
    Path((summary_id, index)): Path<(String, usize)>,
    Json(request): Json<ApiStatusRequest>,
) -> Result<Json<StoredSummary>, (StatusCode, String)> {
    let store = state.store.as_ref().ok_or((
        StatusCode::NOT_FOUND,
        "summary store not configured".to_string(),
    ))?;
    let status = RecommendationStatus::from_str(&request.status).ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            format!("invalid status: {}", request.status),
        )
    })?;
    let summary = store
        .set_recommendation_status(&summary_id, index, status)
        .await
        .map_err(|err| (StatusCode::NOT_FOUND, err))?;
    Ok(Json(summary))
}
