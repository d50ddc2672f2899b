//! Repository contracts and SQLite implementations.
//!
//! # Responsibility
//! - Keep SQL details inside the persistence boundary.
//! - Translate storage constraint failures into semantic errors.
//!
//! # Invariants
//! - Write paths call `*Fields::validate()` before SQL mutations.
//! - Repositories never open transactions; callers scope them.

pub mod company_repo;
pub mod obligation_repo;

use crate::db::DbError;
use crate::model::company::CompanyId;
use crate::model::validation::ValidationError;
use crate::model::RecordKind;
use rusqlite::{Connection, ErrorCode};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

const LIST_DEFAULT_LIMIT: u32 = 50;
const LIST_LIMIT_MAX: u32 = 200;

/// Repository error for company/obligation persistence.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    NotFound(RecordKind, i64),
    /// Another company already holds this CNPJ.
    DuplicateTaxId(String),
    /// Obligation references a company id that does not exist.
    InvalidReference(CompanyId),
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(kind, id) => write!(f, "{kind} not found: {id}"),
            Self::DuplicateTaxId(tax_id) => write!(f, "tax id already registered: `{tax_id}`"),
            Self::InvalidReference(company_id) => {
                write!(f, "referenced company does not exist: {company_id}")
            }
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Pagination options shared by list queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    /// Defaults to 50 and clamps to 200.
    pub limit: Option<u32>,
    pub offset: u32,
}

impl Page {
    pub fn applied_limit(&self) -> u32 {
        normalize_limit(self.limit)
    }
}

/// Applies the default/clamp policy to a requested list limit.
pub fn normalize_limit(limit: Option<u32>) -> u32 {
    match limit {
        Some(0) | None => LIST_DEFAULT_LIMIT,
        Some(value) => value.min(LIST_LIMIT_MAX),
    }
}

/// Constraint family reported by SQLite for a failed statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Constraint {
    Unique,
    ForeignKey,
}

pub(crate) fn constraint_violation(err: &rusqlite::Error) -> Option<Constraint> {
    match err {
        rusqlite::Error::SqliteFailure(failure, _) if failure.code == ErrorCode::ConstraintViolation => {
            match failure.extended_code {
                rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                | rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY => Some(Constraint::Unique),
                rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Some(Constraint::ForeignKey),
                _ => None,
            }
        }
        _ => None,
    }
}

pub(crate) fn ensure_table(conn: &Connection, table: &'static str) -> RepoResult<()> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    if exists == 1 {
        Ok(())
    } else {
        Err(RepoError::MissingRequiredTable(table))
    }
}
