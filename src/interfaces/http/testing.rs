//! Router fixtures for handler tests

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::Value;
use tower::ServiceExt;

use super::router::{create_api_router, ApiState};
use crate::application::testing::{seeded, Seed};
use crate::application::ReservationOrchestrator;
use crate::domain::{ActorRole, RepositoryProvider};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::storage::InMemoryRepositoryProvider;

pub const GUEST_ID: i64 = 7;
pub const MANAGER_ID: i64 = 900;

pub fn test_jwt() -> JwtConfig {
    JwtConfig::new("http-test-secret", 1)
}

pub fn bearer(user_id: i64, role: ActorRole) -> String {
    let token = create_token(user_id, "tester", role, &test_jwt()).unwrap();
    format!("Bearer {}", token)
}

pub fn guest() -> Option<String> {
    Some(bearer(GUEST_ID, ActorRole::Guest))
}

pub fn manager() -> Option<String> {
    Some(bearer(MANAGER_ID, ActorRole::Manager))
}

pub struct TestApp {
    pub router: Router,
    pub repos: Arc<InMemoryRepositoryProvider>,
    pub seed: Seed,
}

impl TestApp {
    pub async fn new() -> Self {
        let (repos, seed) = seeded().await;
        let provider: Arc<dyn RepositoryProvider> = repos.clone();
        let orchestrator = Arc::new(ReservationOrchestrator::new(provider.clone(), "USD"));
        let handle = PrometheusBuilder::new().build_recorder().handle();
        let state = ApiState::new(provider, orchestrator, test_jwt(), None, handle);
        Self {
            router: create_api_router(state),
            repos,
            seed,
        }
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        auth: Option<String>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut req = Request::builder().method(method).uri(uri);
        if let Some(auth) = auth {
            req = req.header(header::AUTHORIZATION, auth);
        }
        let req = match body {
            Some(json) => req
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => req.body(Body::empty()).unwrap(),
        };

        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    pub async fn get(&self, uri: &str, auth: Option<String>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, auth, None).await
    }

    /// Guest books `nights` nights of the standard room type from 2030-06-01.
    pub async fn book_standard(&self, nights: u32) -> Value {
        let check_out = format!("2030-06-{:02}", 1 + nights);
        let (status, body) = self
            .send(
                Method::POST,
                "/api/v1/reservations",
                guest(),
                Some(serde_json::json!({
                    "hotel_id": self.seed.hotel_id,
                    "room_type_id": self.seed.standard.id,
                    "check_in": "2030-06-01",
                    "check_out": check_out,
                    "num_guests": 2
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["data"].clone()
    }
}
