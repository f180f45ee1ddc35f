use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::controller;
use crate::services::auth::require_admin;
use crate::AppState;

pub fn admin_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let protected = Router::new()
        .route("/details", get(controller::details))
        .route("/logout", post(controller::logout))
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    Router::new()
        .route("/register", post(controller::register))
        .route("/login", post(controller::login))
        .merge(protected)
}
