//! Core-error to HTTP-response mapping.
//!
//! Bodies follow `{"detail": "<message>"}` with localized messages.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use empresa_core::{RecordKind, RepoError, ServiceError, ValidationError};
use log::error;
use serde::{Deserialize, Serialize};

pub const COMPANY_NOT_FOUND: &str = "Empresa não encontrada";
pub const OBLIGATION_NOT_FOUND: &str = "Obrigação acessória não encontrada";
pub const COMPANY_DELETED: &str = "Empresa deletada com sucesso";
pub const OBLIGATION_DELETED: &str = "Obrigação acessória deletada com sucesso";

/// Message envelope shared by errors and delete confirmations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detail {
    pub detail: String,
}

impl Detail {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl ApiError {
    fn status_and_detail(&self) -> (StatusCode, String) {
        let service_error = match self {
            Self::Service(err) => err,
            Self::Join(_) => return internal(),
        };

        match service_error {
            ServiceError::NotFound(kind, _) => (StatusCode::NOT_FOUND, not_found(*kind).to_string()),
            ServiceError::Validation(err) => (StatusCode::UNPROCESSABLE_ENTITY, validation(err)),
            ServiceError::InvalidReference(company_id) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Empresa referenciada não existe: {company_id}"),
            ),
            ServiceError::Conflict(RepoError::DuplicateTaxId(tax_id)) => (
                StatusCode::CONFLICT,
                format!("CNPJ já cadastrado: {tax_id}"),
            ),
            ServiceError::Conflict(_)
            | ServiceError::Repo(_)
            | ServiceError::InconsistentState(_) => internal(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = self.status_and_detail();
        if status.is_server_error() {
            error!("event=http_error module=server status=error error={self}");
        }
        (status, Json(Detail::new(detail))).into_response()
    }
}

pub fn not_found(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Company => COMPANY_NOT_FOUND,
        RecordKind::Obligation => OBLIGATION_NOT_FOUND,
    }
}

fn validation(err: &ValidationError) -> String {
    match err {
        ValidationError::BlankField(field) => format!("Campo obrigatório vazio: {field}"),
        ValidationError::InvalidEmail(value) => format!("E-mail inválido: {value}"),
    }
}

fn internal() -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Erro interno do servidor".to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::{ApiError, COMPANY_NOT_FOUND, OBLIGATION_NOT_FOUND};
    use axum::http::StatusCode;
    use empresa_core::{RecordKind, RepoError, ServiceError, ValidationError};

    fn mapped(err: ServiceError) -> (StatusCode, String) {
        ApiError::from(err).status_and_detail()
    }

    #[test]
    fn not_found_uses_localized_messages() {
        assert_eq!(
            mapped(ServiceError::NotFound(RecordKind::Company, 1)),
            (StatusCode::NOT_FOUND, COMPANY_NOT_FOUND.to_string())
        );
        assert_eq!(
            mapped(ServiceError::NotFound(RecordKind::Obligation, 1)),
            (StatusCode::NOT_FOUND, OBLIGATION_NOT_FOUND.to_string())
        );
    }

    #[test]
    fn client_errors_keep_their_status() {
        let (status, _) = mapped(ServiceError::Validation(ValidationError::InvalidEmail(
            "x".to_string(),
        )));
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = mapped(ServiceError::Conflict(RepoError::DuplicateTaxId(
            "1".to_string(),
        )));
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = mapped(ServiceError::InvalidReference(9));
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn storage_failures_hide_details() {
        let (status, detail) = mapped(ServiceError::InconsistentState("read-back"));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!detail.contains("read-back"));
    }
}
