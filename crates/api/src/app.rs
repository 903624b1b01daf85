use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use domain::services::{WorkflowCoordinator, WorkflowStores};
use shared::jwt::JwtConfig;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware, security_headers_middleware, trace_id};
use crate::routes::{activity, events, health, news, notifications};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub coordinator: Arc<WorkflowCoordinator>,
    pub jwt: Arc<JwtConfig>,
    /// Present when backed by Postgres; used for health checks and pool gauges.
    pub pool: Option<PgPool>,
}

impl AppState {
    /// Wires the coordinator over the given stores.
    pub fn new(
        config: Config,
        stores: WorkflowStores,
        pool: Option<PgPool>,
    ) -> Result<Self, shared::jwt::JwtError> {
        let jwt = JwtConfig::with_leeway(
            &config.jwt.secret,
            config.jwt.access_token_expiry_secs,
            config.jwt.leeway_secs,
        )?;
        let coordinator = WorkflowCoordinator::new(stores, (&config.workflow).into());

        Ok(Self {
            config: Arc::new(config),
            coordinator: Arc::new(coordinator),
            jwt: Arc::new(jwt),
            pool,
        })
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn create_app(state: AppState) -> Router {
    let config = state.config.clone();

    let event_routes = Router::new()
        .route("/api/v1/events", post(events::create_event))
        .route("/api/v1/events/:event_id", get(events::get_event))
        .route("/api/v1/events/:event_id/approve", post(events::approve_event))
        .route("/api/v1/events/:event_id/reject", post(events::reject_event))
        .route("/api/v1/events/:event_id/complete", post(events::complete_event))
        .route("/api/v1/events/:event_id/cancel", post(events::cancel_event))
        .route(
            "/api/v1/events/:event_id/register",
            post(events::register).delete(events::cancel_registration),
        )
        .route(
            "/api/v1/events/:event_id/attendance",
            post(events::mark_attendance),
        )
        .route(
            "/api/v1/events/:event_id/feedback",
            post(events::submit_feedback),
        );

    let news_routes = Router::new()
        .route("/api/v1/news", post(news::create_news))
        .route("/api/v1/news/:post_id/approve", put(news::approve_news))
        .route("/api/v1/news/:post_id/reject", put(news::reject_news));

    let activity_routes = Router::new()
        .route("/api/v1/activity", get(activity::all_activity))
        .route("/api/v1/activity/me", get(activity::my_activity))
        .route(
            "/api/v1/activity/users/:user_id",
            get(activity::user_activity),
        );

    let notification_routes = Router::new()
        .route(
            "/api/v1/notifications",
            get(notifications::list_notifications),
        )
        .route(
            "/api/v1/notifications/unread-count",
            get(notifications::unread_count),
        )
        .route(
            "/api/v1/notifications/read-all",
            post(notifications::mark_all_read),
        )
        .route(
            "/api/v1/notifications/:notification_id/read",
            post(notifications::mark_read),
        )
        .route(
            "/api/v1/notifications/:notification_id",
            delete(notifications::delete_notification),
        );

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(event_routes)
        .merge(news_routes)
        .merge(activity_routes)
        .merge(notification_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            security_headers_middleware,
        ))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors_layer(&config.security.cors_origins))
        .with_state(state)
}
