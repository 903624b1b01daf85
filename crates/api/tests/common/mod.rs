//! Shared helpers for HTTP integration tests.
//!
//! The router is wired over the in-memory store with inline side effects, so
//! activity and notifications are visible as soon as a request returns.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use clubs_api::app::{create_app, AppState};
use clubs_api::config::Config;
use domain::models::Role;
use domain::services::{InMemoryStore, WorkflowStores};
use serde_json::{json, Value};
use shared::jwt::JwtConfig;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryStore>,
    jwt: Arc<JwtConfig>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Value,
}

pub fn test_app() -> TestApp {
    let config = Config::load_for_test(&[]).expect("Failed to load test config");
    let store = Arc::new(InMemoryStore::new());
    let state = AppState::new(config, WorkflowStores::from_backend(store.clone()), None)
        .expect("Failed to build app state");
    let jwt = state.jwt.clone();

    TestApp {
        router: create_app(state),
        store,
        jwt,
    }
}

/// A user id and bearer token for the given role.
pub struct TestUser {
    pub id: Uuid,
    pub token: String,
}

impl TestApp {
    pub fn user(&self, role: Role) -> TestUser {
        let id = Uuid::new_v4();
        let (token, _) = self
            .jwt
            .generate_access_token(id, role.as_str())
            .expect("Failed to generate token");
        TestUser { id, token }
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send_request(request).await
    }

    pub async fn send_request(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Creates an event as `user` and returns its id.
    pub async fn create_event(&self, user: &TestUser, capacity: i32) -> Uuid {
        let response = self
            .send(
                Method::POST,
                "/api/v1/events",
                Some(&user.token),
                Some(event_body(capacity)),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body["id"].as_str().unwrap().parse().unwrap()
    }
}

pub fn event_body(capacity: i32) -> Value {
    use fake::faker::lorem::en::Sentence;
    use fake::Fake;

    let start = chrono::Utc::now() + chrono::Duration::days(7);
    let title: String = Sentence(2..5).fake();
    json!({
        "club_id": Uuid::new_v4(),
        "title": title,
        "description": "Bring a friend.",
        "event_type": "social",
        "location": "Main hall",
        "start_at": start,
        "end_at": start + chrono::Duration::hours(3),
        "capacity": capacity,
    })
}
