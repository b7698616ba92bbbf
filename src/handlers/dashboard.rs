use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::sse::{Event, Sse};
use axum::Json;
use serde::Deserialize;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use super::check_auth;
use crate::errors::AppError;
use crate::models::{DashboardEvent, DashboardSnapshot};
use crate::services::dashboard::{current_dashboard, refresh_dashboard};
use crate::state::AppState;

// GET /api/profile
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;
    Ok(Json(state.api.fetch_profile().await?))
}

// GET /api/dashboard
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<DashboardSnapshot>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;
    Ok(Json(current_dashboard(&state).await?))
}

// POST /api/dashboard/refresh
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<DashboardSnapshot>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;
    Ok(Json(refresh_dashboard(&state).await?))
}

// GET /api/dashboard/events — SSE stream
#[derive(Deserialize)]
pub struct SseQuery {
    pub token: Option<String>,
}

fn to_sse(event: &DashboardEvent) -> Event {
    match event {
        DashboardEvent::Snapshot(snapshot) => Event::default()
            .event("dashboard")
            .data(serde_json::to_string(snapshot).unwrap_or_default()),
        DashboardEvent::Error { kind, message } => Event::default()
            .event("dashboard_error")
            .data(serde_json::json!({ "kind": kind, "message": message }).to_string()),
    }
}

pub async fn events_stream(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SseQuery>,
) -> Result<Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>>, AppError> {
    // EventSource can't set headers, so the token comes in the query string
    let token = query.token.as_deref().unwrap_or("");
    if token.is_empty() || token != state.config.admin_token {
        return Err(AppError::Unauthorized);
    }

    let rx = state.dashboard_tx.subscribe();
    let current = state.dashboard.lock().unwrap().clone();

    let initial_stream = tokio_stream::iter(
        current
            .map(|snapshot| Ok::<_, Infallible>(to_sse(&DashboardEvent::Snapshot(snapshot)))),
    );

    let live_stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(event) => Some(Ok(to_sse(&event))),
        Err(tokio_stream::wrappers::errors::BroadcastStreamRecvError::Lagged(n)) => {
            tracing::debug!(skipped = n, "dashboard event subscriber lagged");
            None
        }
    });

    let keepalive_stream = tokio_stream::StreamExt::map(
        tokio_stream::wrappers::IntervalStream::new(tokio::time::interval(Duration::from_secs(30))),
        |_| Ok(Event::default().comment("keepalive")),
    );

    let combined = initial_stream.chain(live_stream);
    let merged = StreamExt::merge(combined, keepalive_stream);

    Ok(Sse::new(merged))
}
