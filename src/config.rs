use std::env;

use crate::models::Role;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub admin_token: String,
    pub api_base_url: String,
    pub api_session_cookie: String,
    pub role: Role,
    pub poll_interval_secs: u64,
    pub stripe_publishable_key: String,
    pub stripe_api_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let role = match env::var("DASHBOARD_ROLE") {
            Ok(v) => Role::parse(&v).unwrap_or_else(|| {
                tracing::warn!(value = %v, "unknown DASHBOARD_ROLE, using brand");
                Role::Brand
            }),
            Err(_) => Role::Brand,
        };

        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "sponsordesk.db".to_string()),
            admin_token: env::var("ADMIN_TOKEN").unwrap_or_else(|_| "changeme".to_string()),
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000/api".to_string()),
            api_session_cookie: env::var("API_SESSION_COOKIE").unwrap_or_default(),
            role,
            poll_interval_secs: env::var("POLL_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v| *v > 0)
                .unwrap_or(5),
            stripe_publishable_key: env::var("STRIPE_PUBLISHABLE_KEY").unwrap_or_default(),
            stripe_api_url: env::var("STRIPE_API_URL")
                .unwrap_or_else(|_| "https://api.stripe.com".to_string()),
        }
    }
}
