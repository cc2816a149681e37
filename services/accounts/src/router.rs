use axum::{
    Router,
    routing::{get, patch, post, put},
};
use tower_http::trace::TraceLayer;

use orzu_core::health::{healthz, readyz};
use orzu_core::middleware::request_id_layer;

use crate::handlers::{
    accounts::{get_me, sign_up, update_me, update_photo},
    password::{forgot_password, reset_password},
    token::{login, logout, refresh_session},
    verify::{check_verify, resend_code},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Registration + verification
        .route("/accounts/signup", post(sign_up))
        .route("/accounts/verify", post(check_verify))
        .route("/accounts/verify/new", get(resend_code))
        // Sessions
        .route("/accounts/login", post(login))
        .route("/accounts/login/refresh", post(refresh_session))
        .route("/accounts/logout", post(logout))
        // Password
        .route("/accounts/password/forgot", post(forgot_password))
        .route("/accounts/password/reset", patch(reset_password))
        // Profile
        .route("/accounts/me", get(get_me))
        .route("/accounts/me", patch(update_me))
        .route("/accounts/me/photo", put(update_photo))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
