//! Company handlers.
//!
//! POST   /empresas/      — create
//! GET    /empresas/      — list (limit, offset)
//! GET    /empresas/:id   — read with obligations
//! PUT    /empresas/:id   — full replace
//! DELETE /empresas/:id   — delete; owned obligations stay as they are

use axum::extract::{Path, Query, State};
use axum::Json;
use empresa_core::{Company, CompanyFields, CompanyId, CompanyService};

use super::PageParams;
use crate::error::{ApiError, Detail, COMPANY_DELETED};
use crate::AppState;

pub async fn create_company(
    State(state): State<AppState>,
    Json(fields): Json<CompanyFields>,
) -> Result<Json<Company>, ApiError> {
    let company = state
        .run(move |db| db.write(|conn| CompanyService::for_connection(conn)?.create_company(&fields)))
        .await?;
    Ok(Json(company))
}

pub async fn list_companies(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<Company>>, ApiError> {
    let page = params.page();
    let companies = state
        .run(move |db| db.read(|conn| CompanyService::for_connection(conn)?.list_companies(&page)))
        .await?;
    Ok(Json(companies))
}

pub async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<CompanyId>,
) -> Result<Json<Company>, ApiError> {
    let company = state
        .run(move |db| db.read(|conn| CompanyService::for_connection(conn)?.get_company(id)))
        .await?;
    Ok(Json(company))
}

pub async fn update_company(
    State(state): State<AppState>,
    Path(id): Path<CompanyId>,
    Json(fields): Json<CompanyFields>,
) -> Result<Json<Company>, ApiError> {
    let company = state
        .run(move |db| {
            db.write(|conn| CompanyService::for_connection(conn)?.update_company(id, &fields))
        })
        .await?;
    Ok(Json(company))
}

pub async fn delete_company(
    State(state): State<AppState>,
    Path(id): Path<CompanyId>,
) -> Result<Json<Detail>, ApiError> {
    state
        .run(move |db| {
            db.write_without_foreign_keys(|conn| {
                CompanyService::for_connection(conn)?.delete_company(id)
            })
        })
        .await?;
    Ok(Json(Detail::new(COMPANY_DELETED)))
}
