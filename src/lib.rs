pub mod config;
pub mod modules;
pub mod services;

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use config::{environment::Config, DbPool};
use modules::account::schema::ApiResponse;
use modules::admin::admin_routes;
use modules::user::user_routes;
use services::email::MailClient;
use services::jwt::JwtService;
use services::rate_limit::{create_rate_limiter, rate_limit};
use services::security::security_headers;

pub struct AppState {
    pub db: DbPool,
    pub config: Config,
    pub jwt: JwtService,
    pub mailer: MailClient,
}

pub async fn create_app(db: DbPool, config: Config) -> Router {
    let jwt = JwtService::new(
        config.access_token_secret.clone(),
        config.refresh_token_secret.clone(),
    );
    let mailer = MailClient::new(config.resend_api_key.clone(), config.mail_from.clone());

    // The storefront runs on its own origin and sends credentialed requests.
    let cors_origin: HeaderValue = config
        .frontend_url
        .parse()
        .expect("FRONTEND_URL must be a valid origin");

    let state = Arc::new(AppState {
        db,
        config,
        jwt,
        mailer,
    });

    // 50 req/s refill with burst headroom across the whole API
    let rate_limiter = create_rate_limiter(50, 200);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/admin", admin_routes(state.clone()))
        .nest("/api/user", user_routes(state.clone()))
        .layer(middleware::from_fn(security_headers))
        .layer(RequestBodyLimitLayer::new(1024 * 100)) // 100KB max body
        .layer(middleware::from_fn_with_state(rate_limiter, rate_limit))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(cors_origin)
                .allow_credentials(true)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .with_state(state)
}

async fn root() -> Json<ApiResponse> {
    Json(ApiResponse::message("Server is running"))
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
