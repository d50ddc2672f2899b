//! Core domain logic for the company registry.
//! This crate is the single source of truth for record invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{Database, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::company::{Company, CompanyFields, CompanyId};
pub use model::obligation::{Obligation, ObligationFields, ObligationId, CONVENTIONAL_PERIODS};
pub use model::validation::ValidationError;
pub use model::RecordKind;
pub use repo::company_repo::{CompanyRepository, SqliteCompanyRepository};
pub use repo::obligation_repo::{
    ObligationListQuery, ObligationRepository, SqliteObligationRepository,
};
pub use repo::{Page, RepoError, RepoResult};
pub use service::company_service::CompanyService;
pub use service::obligation_service::ObligationService;
pub use service::{ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
