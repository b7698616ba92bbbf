use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use sponsordesk::config::AppConfig;
use sponsordesk::db;
use sponsordesk::errors::AppError;
use sponsordesk::handlers;
use sponsordesk::models::{BidDraft, Role};
use sponsordesk::services::api::{MarketplaceApi, PaymentIntent};
use sponsordesk::services::checkout::resume_pending_payment;
use sponsordesk::services::dashboard::spawn_poller;
use sponsordesk::services::payments::{IntentStatus, PaymentOutcome, PaymentProcessor};
use sponsordesk::services::preferences;
use sponsordesk::state::AppState;

// ── Mock Providers ──

#[derive(Default)]
struct ApiLog {
    fetches: AtomicUsize,
    unauthorized: AtomicBool,
    invites: Mutex<Vec<(String, bool)>>,
    bids: Mutex<Vec<(String, f64)>>,
    completed: Mutex<Vec<(Option<String>, String)>>,
    intents: Mutex<HashMap<String, IntentStatus>>,
}

struct MockApi {
    bookings: Vec<Value>,
    offers: Vec<Value>,
    log: Arc<ApiLog>,
}

#[async_trait]
impl MarketplaceApi for MockApi {
    async fn fetch_profile(&self) -> Result<Value, AppError> {
        Ok(json!({"id": 1, "name": "Acme"}))
    }

    async fn fetch_bookings(&self, _role: Role) -> Result<Vec<Value>, AppError> {
        self.log.fetches.fetch_add(1, Ordering::SeqCst);
        if self.log.unauthorized.load(Ordering::SeqCst) {
            return Err(AppError::Unauthorized);
        }
        Ok(self.bookings.clone())
    }

    async fn fetch_offers(&self) -> Result<Vec<Value>, AppError> {
        Ok(self.offers.clone())
    }

    async fn respond_to_invite(&self, invite_id: &str, accept: bool) -> Result<(), AppError> {
        self.log
            .invites
            .lock()
            .unwrap()
            .push((invite_id.to_string(), accept));
        Ok(())
    }

    async fn submit_bid(&self, offer_id: &str, bid: &BidDraft) -> Result<(), AppError> {
        self.log
            .bids
            .lock()
            .unwrap()
            .push((offer_id.to_string(), bid.amount));
        Ok(())
    }

    async fn create_payment_intent(&self, booking_id: &str) -> Result<PaymentIntent, AppError> {
        Ok(PaymentIntent {
            client_secret: format!("pi_{booking_id}_secret_abc"),
            payment_intent_id: format!("pi_{booking_id}"),
            subscription_id: Some(format!("sub_{booking_id}")),
        })
    }

    async fn complete_payment(
        &self,
        booking_id: Option<&str>,
        payment_intent_id: &str,
    ) -> Result<(), AppError> {
        self.log
            .completed
            .lock()
            .unwrap()
            .push((booking_id.map(str::to_string), payment_intent_id.to_string()));
        Ok(())
    }
}

/// Declines any card whose payment method mentions "declined" and leaves
/// "3ds" cards waiting on authentication. Intent states are kept in the log so
/// tests can finish an authentication out of band.
struct MockPayments {
    log: Arc<ApiLog>,
}

#[async_trait]
impl PaymentProcessor for MockPayments {
    async fn confirm_card_payment(
        &self,
        client_secret: &str,
        payment_method: &str,
    ) -> Result<PaymentOutcome, AppError> {
        let id = client_secret
            .split_once("_secret_")
            .map(|(id, _)| id)
            .unwrap_or(client_secret)
            .to_string();

        let (status, outcome) = if payment_method.contains("declined") {
            let message = "Your card was declined.".to_string();
            (
                IntentStatus::Failed { message: message.clone() },
                PaymentOutcome::Failed { message },
            )
        } else if payment_method.contains("3ds") {
            (
                IntentStatus::Pending,
                PaymentOutcome::Failed {
                    message: "additional authentication is required".to_string(),
                },
            )
        } else {
            (
                IntentStatus::Succeeded,
                PaymentOutcome::Succeeded { payment_intent_id: id.clone() },
            )
        };

        self.log.intents.lock().unwrap().insert(id, status);
        Ok(outcome)
    }

    async fn retrieve_intent(
        &self,
        payment_intent_id: &str,
        client_secret: &str,
    ) -> Result<IntentStatus, AppError> {
        assert!(client_secret.starts_with(payment_intent_id));
        self.log
            .intents
            .lock()
            .unwrap()
            .get(payment_intent_id)
            .cloned()
            .ok_or_else(|| AppError::Api(format!("no such intent {payment_intent_id}")))
    }
}

// ── Helpers ──

fn test_config() -> AppConfig {
    AppConfig {
        port: 3000,
        database_url: ":memory:".to_string(),
        admin_token: "test-token".to_string(),
        api_base_url: "http://localhost:8000/api".to_string(),
        api_session_cookie: String::new(),
        role: Role::Brand,
        poll_interval_secs: 5,
        stripe_publishable_key: String::new(),
        stripe_api_url: "https://api.stripe.com".to_string(),
    }
}

fn sample_bookings() -> Vec<Value> {
    vec![
        json!({
            "id": 1,
            "type": "Sponsor",
            "bid_amount": 100,
            "status": "Completed",
            "creator_name": "Jo",
            "platforms": "[\"[\\\"Instagram\\\"]\"]",
            "updated_at": "2025-05-01T00:00:00Z"
        }),
        json!({
            "id": 2,
            "type": "Subscription",
            "total_cost": 150,
            "duration_months": 3,
            "status": "Active",
            "content_status": "Draft Submitted",
            "deliverables": [{"quantity": 4, "submitted": 2}, {"quantity": 6, "submitted": 6}],
            "updated_at": "2025-06-01T00:00:00Z"
        }),
    ]
}

fn sample_offers() -> Vec<Value> {
    vec![
        json!({"id": 10, "title": "Gear review", "platforms": "[\"YouTube\"]", "price": "1200", "created_at": "2025-03-01"}),
        json!({"id": 11, "title": "Morning reel", "platform": "Instagram", "price": 300, "created_at": "2025-01-01"}),
        json!({"id": 12, "title": "Unboxing", "platform": "YouTube", "price": 800, "created_at": "2025-02-01"}),
    ]
}

fn test_state_with_log() -> (Arc<AppState>, Arc<ApiLog>) {
    let conn = db::init_db(":memory:").unwrap();
    let log = Arc::new(ApiLog::default());
    let api = MockApi {
        bookings: sample_bookings(),
        offers: sample_offers(),
        log: Arc::clone(&log),
    };
    let state = Arc::new(AppState::new(
        conn,
        test_config(),
        Box::new(api),
        Box::new(MockPayments { log: Arc::clone(&log) }),
    ));
    (state, log)
}

fn test_app(state: Arc<AppState>) -> Router {
    handlers::router(state)
}

fn authed(method: &str, uri: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Authorization", "Bearer test-token")
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    authed(method, uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(res: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

// ── Tests ──

#[tokio::test]
async fn test_health() {
    let (state, _) = test_state_with_log();
    let res = test_app(state)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["status"], "ok");
}

#[tokio::test]
async fn test_profile_passthrough() {
    let (state, _) = test_state_with_log();
    let res = test_app(state)
        .oneshot(authed("GET", "/api/profile").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["name"], "Acme");
}

#[tokio::test]
async fn test_dashboard_requires_auth() {
    let (state, _) = test_state_with_log();

    let res = test_app(Arc::clone(&state))
        .oneshot(Request::builder().uri("/api/dashboard").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = test_app(state)
        .oneshot(
            Request::builder()
                .uri("/api/dashboard")
                .header("Authorization", "Bearer wrong-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_dashboard_snapshot() {
    let (state, log) = test_state_with_log();

    let res = test_app(state)
        .oneshot(authed("GET", "/api/dashboard").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(log.fetches.load(Ordering::SeqCst), 1);

    let json = body_json(res).await;
    assert_eq!(json["role"], "brand");
    assert_eq!(json["currency"], "EUR");
    assert_eq!(json["stats"]["total_spend"], 150.0);
    assert_eq!(json["stats"]["active_count"], 1);
    assert_eq!(json["stats"]["pending_review_count"], 1);
    assert_eq!(json["stats"]["completion_rate"], 50);

    let cards = json["bookings"].as_array().unwrap();
    assert_eq!(cards.len(), 2);

    // most recently updated first
    assert_eq!(cards[0]["id"], "2");
    assert_eq!(cards[0]["type"], "Subscription");
    assert_eq!(cards[0]["cost"], "€50/month");
    assert_eq!(cards[0]["step"], 1);
    assert_eq!(cards[0]["progress"]["delivered"], 8);
    assert_eq!(cards[0]["progress"]["total"], 10);
    assert_eq!(cards[0]["progress"]["percent"], 80);

    assert_eq!(cards[1]["id"], "1");
    assert_eq!(cards[1]["cost"], "€100");
    assert_eq!(cards[1]["step"], 5);
    assert_eq!(cards[1]["counterpart"], "Jo");
    assert_eq!(cards[1]["platforms"], json!(["Instagram"]));
    assert!(cards[1].get("progress").is_none());
}

#[tokio::test]
async fn test_dashboard_is_cached_until_refresh() {
    let (state, log) = test_state_with_log();

    for _ in 0..2 {
        let res = test_app(Arc::clone(&state))
            .oneshot(authed("GET", "/api/dashboard").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }
    assert_eq!(log.fetches.load(Ordering::SeqCst), 1);

    let res = test_app(state)
        .oneshot(authed("POST", "/api/dashboard/refresh").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(log.fetches.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_dashboard_upstream_unauthorized() {
    let (state, log) = test_state_with_log();
    log.unauthorized.store(true, Ordering::SeqCst);

    let res = test_app(state)
        .oneshot(authed("GET", "/api/dashboard").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_currency_preference() {
    let (state, _) = test_state_with_log();

    let res = test_app(Arc::clone(&state))
        .oneshot(authed("GET", "/api/preferences/currency").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert_eq!(json["code"], "EUR");
    assert_eq!(json["symbol"], "€");

    let res = test_app(Arc::clone(&state))
        .oneshot(json_request("POST", "/api/preferences/currency", json!({"code": "XYZ"})))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = test_app(Arc::clone(&state))
        .oneshot(json_request("POST", "/api/preferences/currency", json!({"code": "usd"})))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["code"], "USD");

    let res = test_app(state)
        .oneshot(authed("GET", "/api/dashboard").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let json = body_json(res).await;
    assert_eq!(json["currency"], "USD");
    assert_eq!(json["bookings"][1]["cost"], "$100");
}

#[tokio::test]
async fn test_offers_filtered() {
    let (state, _) = test_state_with_log();

    let res = test_app(Arc::clone(&state))
        .oneshot(
            authed("GET", "/api/offers?platform=youtube&sort=price_asc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    let ids: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["12", "10"]);
    assert_eq!(json[1]["price_display"], "€1,200");

    let res = test_app(state)
        .oneshot(
            authed("GET", "/api/offers?min_price=500&max_price=1000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let json = body_json(res).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["id"], "12");
}

#[tokio::test]
async fn test_saved_offers() {
    let (state, _) = test_state_with_log();

    let res = test_app(Arc::clone(&state))
        .oneshot(json_request("POST", "/api/offers/saved", json!({"title": "no id"})))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = test_app(Arc::clone(&state))
        .oneshot(json_request("POST", "/api/offers/saved", json!({"id": 10, "title": "Gear review"})))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = test_app(Arc::clone(&state))
        .oneshot(authed("GET", "/api/offers/saved").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let json = body_json(res).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["title"], "Gear review");

    let res = test_app(Arc::clone(&state))
        .oneshot(authed("DELETE", "/api/offers/saved/10").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = test_app(state)
        .oneshot(authed("DELETE", "/api/offers/saved/10").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bid_below_minimum_rejected() {
    let (state, log) = test_state_with_log();

    let res = test_app(Arc::clone(&state))
        .oneshot(json_request(
            "POST",
            "/api/offers/10/bids",
            json!({"amount": 50, "pitch": "Let's collaborate", "min_bid": 100}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(log.bids.lock().unwrap().is_empty());

    let db = state.db.lock().unwrap();
    assert!(preferences::bid_drafts(&*db).is_empty());
}

#[tokio::test]
async fn test_bid_submitted_and_filtered() {
    let (state, log) = test_state_with_log();

    let res = test_app(Arc::clone(&state))
        .oneshot(json_request(
            "POST",
            "/api/offers/10/bids",
            json!({"amount": 1100, "pitch": "  Two videos and a short  ", "min_bid": 1000}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert_eq!(json["pitch"], "Two videos and a short");
    assert_eq!(*log.bids.lock().unwrap(), vec![("10".to_string(), 1100.0)]);

    let res = test_app(Arc::clone(&state))
        .oneshot(authed("GET", "/api/bids").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let json = body_json(res).await;
    assert_eq!(json["10"]["amount"], 1100.0);

    let res = test_app(Arc::clone(&state))
        .oneshot(authed("GET", "/api/offers?bids=with_bid").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let json = body_json(res).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["id"], "10");

    let res = test_app(state)
        .oneshot(authed("DELETE", "/api/bids/10").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_invite_accept_refreshes_dashboard() {
    let (state, log) = test_state_with_log();

    let res = test_app(Arc::clone(&state))
        .oneshot(authed("POST", "/api/invites/77/accept").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = test_app(Arc::clone(&state))
        .oneshot(authed("POST", "/api/invites/78/reject").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    assert_eq!(
        *log.invites.lock().unwrap(),
        vec![("77".to_string(), true), ("78".to_string(), false)]
    );
    assert_eq!(log.fetches.load(Ordering::SeqCst), 2);
    assert!(state.dashboard.lock().unwrap().is_some());
}

#[tokio::test]
async fn test_payment_success_clears_pending() {
    let (state, log) = test_state_with_log();

    let res = test_app(Arc::clone(&state))
        .oneshot(json_request("POST", "/api/bookings/2/pay", json!({"payment_method": "pm_card_visa"})))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert_eq!(json["payment_intent_id"], "pi_2");
    assert_eq!(json["booking_id"], "2");

    assert_eq!(
        *log.completed.lock().unwrap(),
        vec![(Some("2".to_string()), "pi_2".to_string())]
    );
    let db = state.db.lock().unwrap();
    assert_eq!(preferences::pending_payment(&*db), None);
}

#[tokio::test]
async fn test_declined_payment_is_never_completed() {
    let (state, log) = test_state_with_log();

    let res = test_app(Arc::clone(&state))
        .oneshot(json_request(
            "POST",
            "/api/bookings/5/pay",
            json!({"payment_method": "pm_card_declined"}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::PAYMENT_REQUIRED);
    let json = body_json(res).await;
    assert!(json["error"].as_str().unwrap().contains("declined"));

    {
        let db = state.db.lock().unwrap();
        let pending = preferences::pending_payment(&*db).unwrap();
        assert_eq!(pending.payment_intent_id, "pi_5");
        assert_eq!(pending.subscription_id.as_deref(), Some("sub_5"));
        assert_eq!(pending.client_secret.as_deref(), Some("pi_5_secret_abc"));
    }

    // Startup runs the same resume path.
    let result = resume_pending_payment(&state).await;
    assert!(matches!(result, Err(AppError::Payment(_))));
    assert!(log.completed.lock().unwrap().is_empty());
    {
        let db = state.db.lock().unwrap();
        assert_eq!(preferences::pending_payment(&*db), None);
    }

    let res = test_app(state)
        .oneshot(authed("POST", "/api/payments/resume").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["resumed"], false);
    assert!(log.completed.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_declined_payment_resume_endpoint_reports_failure() {
    let (state, log) = test_state_with_log();

    test_app(Arc::clone(&state))
        .oneshot(json_request(
            "POST",
            "/api/bookings/6/pay",
            json!({"payment_method": "pm_card_declined"}),
        ))
        .await
        .unwrap();

    let res = test_app(state)
        .oneshot(authed("POST", "/api/payments/resume").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::PAYMENT_REQUIRED);
    assert!(log.completed.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_authenticated_payment_resumes_once_succeeded() {
    let (state, log) = test_state_with_log();

    let res = test_app(Arc::clone(&state))
        .oneshot(json_request(
            "POST",
            "/api/bookings/4/pay",
            json!({"payment_method": "pm_card_3ds"}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::PAYMENT_REQUIRED);

    // Authentication not finished yet: nothing is completed, the record stays.
    let res = test_app(Arc::clone(&state))
        .oneshot(authed("POST", "/api/payments/resume").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["resumed"], false);
    assert!(log.completed.lock().unwrap().is_empty());
    {
        let db = state.db.lock().unwrap();
        assert!(preferences::pending_payment(&*db).is_some());
    }

    log.intents
        .lock()
        .unwrap()
        .insert("pi_4".to_string(), IntentStatus::Succeeded);

    let res = test_app(Arc::clone(&state))
        .oneshot(authed("POST", "/api/payments/resume").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert_eq!(json["resumed"], true);
    assert_eq!(json["receipt"]["payment_intent_id"], "pi_4");
    assert_eq!(
        *log.completed.lock().unwrap(),
        vec![(None, "pi_4".to_string())]
    );

    let db = state.db.lock().unwrap();
    assert_eq!(preferences::pending_payment(&*db), None);
}

#[tokio::test]
async fn test_events_require_token() {
    let (state, _) = test_state_with_log();

    let res = test_app(state)
        .oneshot(
            Request::builder()
                .uri("/api/dashboard/events?token=nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_poller_refreshes_until_shutdown() {
    let (state, log) = test_state_with_log();
    let mut events = state.dashboard_tx.subscribe();

    let poller = spawn_poller(Arc::clone(&state), Duration::from_millis(20));

    let first = tokio::time::timeout(Duration::from_secs(2), events.recv())
        .await
        .expect("poller produced no snapshot")
        .unwrap();
    assert!(matches!(first, sponsordesk::models::DashboardEvent::Snapshot(_)));

    tokio::time::timeout(Duration::from_secs(2), async {
        while log.fetches.load(Ordering::SeqCst) < 3 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("poller stopped ticking");

    poller.shutdown().await;
    let after_shutdown = log.fetches.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(log.fetches.load(Ordering::SeqCst), after_shutdown);
}

#[tokio::test]
async fn test_poller_reports_expired_session() {
    let (state, log) = test_state_with_log();
    log.unauthorized.store(true, Ordering::SeqCst);
    let mut events = state.dashboard_tx.subscribe();

    let poller = spawn_poller(Arc::clone(&state), Duration::from_millis(20));

    let event = tokio::time::timeout(Duration::from_secs(2), events.recv())
        .await
        .expect("poller produced no event")
        .unwrap();
    match event {
        sponsordesk::models::DashboardEvent::Error { kind, .. } => assert_eq!(kind, "unauthorized"),
        other => panic!("expected error event, got {other:?}"),
    }

    drop(poller);
}
