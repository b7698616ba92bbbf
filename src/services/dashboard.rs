use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::errors::AppError;
use crate::models::{BookingCard, BookingKind, DashboardEvent, DashboardSnapshot};
use crate::services::lifecycle::{aggregate_stats, progress_step, sort_by_recent, subscription_progress};
use crate::services::normalizer::normalize_booking;
use crate::services::preferences::user_currency;
use crate::state::AppState;

/// Fetches bookings, rebuilds the snapshot, caches it and notifies subscribers.
pub async fn refresh_dashboard(state: &Arc<AppState>) -> Result<DashboardSnapshot, AppError> {
    let role = state.config.role;
    let raw = state.api.fetch_bookings(role).await?;

    let currency = {
        let db = state.db.lock().unwrap();
        user_currency(&*db)
    };

    let mut bookings: Vec<_> = raw
        .iter()
        .map(|record| normalize_booking(record, role, currency))
        .collect();
    sort_by_recent(&mut bookings);

    let stats = aggregate_stats(&bookings);

    let cards = bookings
        .into_iter()
        .map(|booking| {
            let (step, stage_known) = progress_step(&booking);
            let progress = (booking.kind() == BookingKind::Subscription)
                .then(|| subscription_progress(&booking.deliverables));
            BookingCard {
                booking,
                step,
                stage_known,
                progress,
            }
        })
        .collect();

    let snapshot = DashboardSnapshot {
        session_id: state.session_id,
        role,
        currency,
        bookings: cards,
        stats,
        fetched_at: Utc::now().to_rfc3339(),
    };

    *state.dashboard.lock().unwrap() = Some(snapshot.clone());
    // No receivers just means no UI is listening right now.
    let _ = state
        .dashboard_tx
        .send(DashboardEvent::Snapshot(snapshot.clone()));

    tracing::debug!(
        session = %state.session_id,
        bookings = snapshot.bookings.len(),
        "dashboard refreshed"
    );

    Ok(snapshot)
}

/// Cached snapshot, fetched on first use.
pub async fn current_dashboard(state: &Arc<AppState>) -> Result<DashboardSnapshot, AppError> {
    let cached = state.dashboard.lock().unwrap().clone();
    match cached {
        Some(snapshot) => Ok(snapshot),
        None => refresh_dashboard(state).await,
    }
}

fn report_refresh_error(state: &AppState, err: &AppError) {
    match err {
        AppError::Unauthorized => {
            tracing::warn!(session = %state.session_id, "marketplace session expired, login required")
        }
        _ => tracing::error!(session = %state.session_id, error = %err, "dashboard refresh failed"),
    }
    let _ = state.dashboard_tx.send(DashboardEvent::Error {
        kind: err.kind().to_string(),
        message: err.to_string(),
    });
}

/// Owns the background polling task. Dropping it stops the timer and abandons
/// any request still in flight.
pub struct PollerHandle {
    shutdown: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    pub async fn shutdown(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "dashboard poller ended abnormally");
            }
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

pub fn spawn_poller(state: Arc<AppState>, interval: Duration) -> PollerHandle {
    let (shutdown, mut stop) = watch::channel(false);

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tracing::info!(
            session = %state.session_id,
            interval_secs = interval.as_secs(),
            "dashboard poller started"
        );

        loop {
            tokio::select! {
                _ = stop.changed() => break,
                _ = ticker.tick() => {}
            }

            tokio::select! {
                _ = stop.changed() => break,
                result = refresh_dashboard(&state) => {
                    if let Err(e) = result {
                        report_refresh_error(&state, &e);
                    }
                }
            }
        }

        tracing::info!(session = %state.session_id, "dashboard poller stopped");
    });

    PollerHandle {
        shutdown,
        task: Some(task),
    }
}
