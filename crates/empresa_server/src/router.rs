//! Router construction for the registry server.

use axum::middleware as axum_mw;
use axum::routing::get;
use axum::Router;

use crate::handlers::{companies, health, obligations};
use crate::middleware::log_requests;
use crate::AppState;

/// Builds the full axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route(
            "/empresas/",
            get(companies::list_companies).post(companies::create_company),
        )
        .route(
            "/empresas",
            get(companies::list_companies).post(companies::create_company),
        )
        .route(
            "/empresas/:id",
            get(companies::get_company)
                .put(companies::update_company)
                .delete(companies::delete_company),
        )
        .route(
            "/obrigacoes/",
            get(obligations::list_obligations).post(obligations::create_obligation),
        )
        .route(
            "/obrigacoes",
            get(obligations::list_obligations).post(obligations::create_obligation),
        )
        .route(
            "/obrigacoes/:id",
            get(obligations::get_obligation)
                .put(obligations::update_obligation)
                .delete(obligations::delete_obligation),
        )
        .layer(axum_mw::from_fn(log_requests))
        .with_state(state)
}
