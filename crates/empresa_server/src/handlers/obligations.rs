//! Obligation handlers.
//!
//! POST   /obrigacoes/      — create (owning company checked by foreign key only)
//! GET    /obrigacoes/      — list (empresa_id, limit, offset)
//! GET    /obrigacoes/:id   — read
//! PUT    /obrigacoes/:id   — full replace
//! DELETE /obrigacoes/:id   — delete

use axum::extract::{Path, Query, State};
use axum::Json;
use empresa_core::{
    CompanyId, Obligation, ObligationFields, ObligationId, ObligationListQuery, ObligationService,
    Page,
};
use serde::Deserialize;

use crate::error::{ApiError, Detail, OBLIGATION_DELETED};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ObligationListParams {
    pub empresa_id: Option<CompanyId>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl ObligationListParams {
    fn query(&self) -> ObligationListQuery {
        ObligationListQuery {
            company_id: self.empresa_id,
            page: Page {
                limit: self.limit,
                offset: self.offset.unwrap_or(0),
            },
        }
    }
}

pub async fn create_obligation(
    State(state): State<AppState>,
    Json(fields): Json<ObligationFields>,
) -> Result<Json<Obligation>, ApiError> {
    let obligation = state
        .run(move |db| {
            db.write(|conn| ObligationService::for_connection(conn)?.create_obligation(&fields))
        })
        .await?;
    Ok(Json(obligation))
}

pub async fn list_obligations(
    State(state): State<AppState>,
    Query(params): Query<ObligationListParams>,
) -> Result<Json<Vec<Obligation>>, ApiError> {
    let query = params.query();
    let obligations = state
        .run(move |db| {
            db.read(|conn| ObligationService::for_connection(conn)?.list_obligations(&query))
        })
        .await?;
    Ok(Json(obligations))
}

pub async fn get_obligation(
    State(state): State<AppState>,
    Path(id): Path<ObligationId>,
) -> Result<Json<Obligation>, ApiError> {
    let obligation = state
        .run(move |db| db.read(|conn| ObligationService::for_connection(conn)?.get_obligation(id)))
        .await?;
    Ok(Json(obligation))
}

pub async fn update_obligation(
    State(state): State<AppState>,
    Path(id): Path<ObligationId>,
    Json(fields): Json<ObligationFields>,
) -> Result<Json<Obligation>, ApiError> {
    let obligation = state
        .run(move |db| {
            db.write(|conn| ObligationService::for_connection(conn)?.update_obligation(id, &fields))
        })
        .await?;
    Ok(Json(obligation))
}

pub async fn delete_obligation(
    State(state): State<AppState>,
    Path(id): Path<ObligationId>,
) -> Result<Json<Detail>, ApiError> {
    state
        .run(move |db| {
            db.write(|conn| ObligationService::for_connection(conn)?.delete_obligation(id))
        })
        .await?;
    Ok(Json(Detail::new(OBLIGATION_DELETED)))
}
