use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::controller;
use crate::services::auth::require_auth;
use crate::AppState;

pub fn user_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let protected = Router::new()
        .route("/details", get(controller::details))
        .route("/logout", post(controller::logout))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    Router::new()
        .route("/register", post(controller::register))
        .route("/login", post(controller::login))
        .route("/verify-email", post(controller::verify_email))
        .route("/refresh-token", post(controller::refresh_token))
        .route("/forgot-password", post(controller::forgot_password))
        .route("/reset-password", post(controller::reset_password))
        .merge(protected)
}
