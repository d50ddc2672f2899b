//! Company repository contract and SQLite implementation.
//!
//! # Invariants
//! - `replace_company` overwrites all five mutable columns; there is no
//!   partial update path.
//! - Deleting never cascades and never checks for dependents. Callers run it
//!   on a session without foreign-key enforcement
//!   (`Database::write_without_foreign_keys`), so obligations survive with
//!   their original `company_id`.
//! - Returned `Company` values carry an empty obligation list; services
//!   attach obligations through the obligation repository.

use super::{constraint_violation, ensure_table, Constraint, Page, RepoError, RepoResult};
use crate::model::company::{Company, CompanyFields, CompanyId};
use crate::model::RecordKind;
use rusqlite::{params, Connection, Row};

const COMPANY_SELECT_SQL: &str = "SELECT
    id,
    name,
    tax_id,
    address,
    email,
    phone
FROM companies";

/// Repository interface for company CRUD operations.
pub trait CompanyRepository {
    /// Inserts a company and returns its storage-assigned id.
    fn create_company(&self, fields: &CompanyFields) -> RepoResult<CompanyId>;
    fn get_company(&self, id: CompanyId) -> RepoResult<Option<Company>>;
    /// Lists companies ordered by id ascending.
    fn list_companies(&self, page: &Page) -> RepoResult<Vec<Company>>;
    /// Replaces every mutable field of an existing company.
    fn replace_company(&self, id: CompanyId, fields: &CompanyFields) -> RepoResult<()>;
    fn delete_company(&self, id: CompanyId) -> RepoResult<()>;
}

/// SQLite-backed company repository.
pub struct SqliteCompanyRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCompanyRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table(conn, "companies")?;
        Ok(Self { conn })
    }
}

impl CompanyRepository for SqliteCompanyRepository<'_> {
    fn create_company(&self, fields: &CompanyFields) -> RepoResult<CompanyId> {
        fields.validate()?;

        self.conn
            .execute(
                "INSERT INTO companies (
                    name,
                    tax_id,
                    address,
                    email,
                    phone
                ) VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    fields.name.as_str(),
                    fields.tax_id.as_str(),
                    fields.address.as_str(),
                    fields.email.as_str(),
                    fields.phone.as_str(),
                ],
            )
            .map_err(|err| map_write_error(err, fields))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_company(&self, id: CompanyId) -> RepoResult<Option<Company>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{COMPANY_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_company_row(row)?));
        }

        Ok(None)
    }

    fn list_companies(&self, page: &Page) -> RepoResult<Vec<Company>> {
        let mut stmt = self.conn.prepare(&format!(
            "{COMPANY_SELECT_SQL} ORDER BY id ASC LIMIT ?1 OFFSET ?2;"
        ))?;

        let mut rows = stmt.query(params![
            i64::from(page.applied_limit()),
            i64::from(page.offset)
        ])?;
        let mut companies = Vec::new();
        while let Some(row) = rows.next()? {
            companies.push(parse_company_row(row)?);
        }

        Ok(companies)
    }

    fn replace_company(&self, id: CompanyId, fields: &CompanyFields) -> RepoResult<()> {
        fields.validate()?;

        let changed = self
            .conn
            .execute(
                "UPDATE companies
                 SET
                    name = ?1,
                    tax_id = ?2,
                    address = ?3,
                    email = ?4,
                    phone = ?5,
                    updated_at = (strftime('%s', 'now') * 1000)
                 WHERE id = ?6;",
                params![
                    fields.name.as_str(),
                    fields.tax_id.as_str(),
                    fields.address.as_str(),
                    fields.email.as_str(),
                    fields.phone.as_str(),
                    id,
                ],
            )
            .map_err(|err| map_write_error(err, fields))?;

        if changed == 0 {
            return Err(RepoError::NotFound(RecordKind::Company, id));
        }

        Ok(())
    }

    fn delete_company(&self, id: CompanyId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM companies WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(RecordKind::Company, id));
        }

        Ok(())
    }
}

fn map_write_error(err: rusqlite::Error, fields: &CompanyFields) -> RepoError {
    match constraint_violation(&err) {
        Some(Constraint::Unique) => RepoError::DuplicateTaxId(fields.tax_id.clone()),
        _ => RepoError::from(err),
    }
}

fn parse_company_row(row: &Row<'_>) -> RepoResult<Company> {
    let fields = CompanyFields {
        name: row.get("name")?,
        tax_id: row.get("tax_id")?,
        address: row.get("address")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
    };
    Ok(Company::new(row.get("id")?, fields))
}
