//! Record use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the create/read/update/delete use
//!   cases the HTTP surface exposes.
//! - Turn repository misses into typed not-found errors.
//!
//! # Invariants
//! - Every use case issues one logical persistence operation plus read-back.
//! - Services never open transactions; `Database::write` scopes them.

pub mod company_service;
pub mod obligation_service;

use crate::db::DbError;
use crate::model::validation::ValidationError;
use crate::model::RecordKind;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for record use cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Target record does not exist.
    NotFound(RecordKind, i64),
    /// Input failed field validation.
    Validation(ValidationError),
    /// Write collides with existing state (duplicate CNPJ).
    Conflict(RepoError),
    /// Obligation names a company that does not exist.
    InvalidReference(i64),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Write succeeded but the read-back did not find the row.
    InconsistentState(&'static str),
}

impl ServiceError {
    /// Returns whether this error reports a missing target record.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(..))
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(kind, id) => write!(f, "{kind} not found: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Conflict(err) => write!(f, "{err}"),
            Self::InvalidReference(company_id) => {
                write!(f, "referenced company does not exist: {company_id}")
            }
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent state: {details}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Conflict(err) | Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(kind, id) => Self::NotFound(kind, id),
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::InvalidReference(company_id) => Self::InvalidReference(company_id),
            err @ RepoError::DuplicateTaxId(_) => Self::Conflict(err),
            other => Self::Repo(other),
        }
    }
}

impl From<DbError> for ServiceError {
    fn from(value: DbError) -> Self {
        Self::Repo(RepoError::Db(value))
    }
}
