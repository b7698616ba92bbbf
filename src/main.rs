use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use sponsordesk::config::AppConfig;
use sponsordesk::db;
use sponsordesk::errors::AppError;
use sponsordesk::handlers;
use sponsordesk::services::api::http::HttpMarketplaceApi;
use sponsordesk::services::checkout::resume_pending_payment;
use sponsordesk::services::dashboard::spawn_poller;
use sponsordesk::services::payments::stripe::StripeProcessor;
use sponsordesk::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();
    anyhow::ensure!(
        !config.api_base_url.is_empty(),
        "API_BASE_URL must not be empty"
    );
    if config.stripe_publishable_key.is_empty() {
        tracing::warn!("STRIPE_PUBLISHABLE_KEY not set, card payments are disabled");
    }

    let conn = db::init_db(&config.database_url)?;

    let api = HttpMarketplaceApi::new(
        config.api_base_url.clone(),
        config.api_session_cookie.clone(),
    );
    let payments = StripeProcessor::new(
        config.stripe_publishable_key.clone(),
        config.stripe_api_url.clone(),
    );

    let state = Arc::new(AppState::new(
        conn,
        config.clone(),
        Box::new(api),
        Box::new(payments),
    ));
    tracing::info!(
        session = %state.session_id,
        role = config.role.as_str(),
        api = %config.api_base_url,
        "dashboard session created"
    );

    match state.api.fetch_profile().await {
        Ok(_) => tracing::info!("marketplace session is valid"),
        Err(AppError::Unauthorized) => {
            tracing::warn!("marketplace session rejected, set API_SESSION_COOKIE after logging in")
        }
        Err(e) => tracing::warn!(error = %e, "could not reach marketplace API"),
    }

    match resume_pending_payment(&state).await {
        Ok(Some(receipt)) => {
            tracing::info!(payment_intent_id = %receipt.payment_intent_id, "completed pending payment")
        }
        Ok(None) => {}
        Err(AppError::Payment(message)) => {
            tracing::warn!(error = %message, "pending payment was not successful and was discarded")
        }
        Err(e) => tracing::warn!(error = %e, "could not complete pending payment, will retry on next start"),
    }

    let poller = spawn_poller(
        Arc::clone(&state),
        Duration::from_secs(config.poll_interval_secs),
    );

    let app = handlers::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    poller.shutdown().await;

    Ok(())
}
