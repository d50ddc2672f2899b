//! Obligation repository contract and SQLite implementation.
//!
//! # Invariants
//! - The owning company is never looked up explicitly; the foreign key on
//!   `obligations.company_id` rejects dangling references.
//! - Every list is ordered by obligation id ascending.

use super::{constraint_violation, ensure_table, Constraint, Page, RepoError, RepoResult};
use crate::model::company::CompanyId;
use crate::model::obligation::{Obligation, ObligationFields, ObligationId};
use crate::model::RecordKind;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const OBLIGATION_SELECT_SQL: &str = "SELECT
    id,
    name,
    period,
    company_id
FROM obligations";

/// Query options for listing obligations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObligationListQuery {
    /// Restricts the list to one owning company.
    pub company_id: Option<CompanyId>,
    pub page: Page,
}

/// Repository interface for obligation CRUD operations.
pub trait ObligationRepository {
    fn create_obligation(&self, fields: &ObligationFields) -> RepoResult<ObligationId>;
    fn get_obligation(&self, id: ObligationId) -> RepoResult<Option<Obligation>>;
    fn list_obligations(&self, query: &ObligationListQuery) -> RepoResult<Vec<Obligation>>;
    /// Returns every obligation owned by `company_id`, unpaginated.
    fn list_for_company(&self, company_id: CompanyId) -> RepoResult<Vec<Obligation>>;
    fn replace_obligation(&self, id: ObligationId, fields: &ObligationFields) -> RepoResult<()>;
    fn delete_obligation(&self, id: ObligationId) -> RepoResult<()>;
}

/// SQLite-backed obligation repository.
pub struct SqliteObligationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteObligationRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table(conn, "obligations")?;
        Ok(Self { conn })
    }
}

impl ObligationRepository for SqliteObligationRepository<'_> {
    fn create_obligation(&self, fields: &ObligationFields) -> RepoResult<ObligationId> {
        fields.validate()?;

        self.conn
            .execute(
                "INSERT INTO obligations (name, period, company_id) VALUES (?1, ?2, ?3);",
                params![fields.name.as_str(), fields.period.as_str(), fields.company_id],
            )
            .map_err(|err| map_write_error(err, fields))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_obligation(&self, id: ObligationId) -> RepoResult<Option<Obligation>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{OBLIGATION_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_obligation_row(row)?));
        }

        Ok(None)
    }

    fn list_obligations(&self, query: &ObligationListQuery) -> RepoResult<Vec<Obligation>> {
        let mut sql = format!("{OBLIGATION_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(company_id) = query.company_id {
            sql.push_str(" AND company_id = ?");
            bind_values.push(Value::Integer(company_id));
        }

        sql.push_str(" ORDER BY id ASC LIMIT ? OFFSET ?");
        bind_values.push(Value::Integer(i64::from(query.page.applied_limit())));
        bind_values.push(Value::Integer(i64::from(query.page.offset)));

        self.collect(&sql, bind_values)
    }

    fn list_for_company(&self, company_id: CompanyId) -> RepoResult<Vec<Obligation>> {
        self.collect(
            &format!("{OBLIGATION_SELECT_SQL} WHERE company_id = ? ORDER BY id ASC"),
            vec![Value::Integer(company_id)],
        )
    }

    fn replace_obligation(&self, id: ObligationId, fields: &ObligationFields) -> RepoResult<()> {
        fields.validate()?;

        let changed = self
            .conn
            .execute(
                "UPDATE obligations
                 SET
                    name = ?1,
                    period = ?2,
                    company_id = ?3,
                    updated_at = (strftime('%s', 'now') * 1000)
                 WHERE id = ?4;",
                params![
                    fields.name.as_str(),
                    fields.period.as_str(),
                    fields.company_id,
                    id,
                ],
            )
            .map_err(|err| map_write_error(err, fields))?;

        if changed == 0 {
            return Err(RepoError::NotFound(RecordKind::Obligation, id));
        }

        Ok(())
    }

    fn delete_obligation(&self, id: ObligationId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM obligations WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(RecordKind::Obligation, id));
        }

        Ok(())
    }
}

impl SqliteObligationRepository<'_> {
    fn collect(&self, sql: &str, bind_values: Vec<Value>) -> RepoResult<Vec<Obligation>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut obligations = Vec::new();
        while let Some(row) = rows.next()? {
            obligations.push(parse_obligation_row(row)?);
        }
        Ok(obligations)
    }
}

fn map_write_error(err: rusqlite::Error, fields: &ObligationFields) -> RepoError {
    match constraint_violation(&err) {
        Some(Constraint::ForeignKey) => RepoError::InvalidReference(fields.company_id),
        _ => RepoError::from(err),
    }
}

fn parse_obligation_row(row: &Row<'_>) -> RepoResult<Obligation> {
    Ok(Obligation {
        id: row.get("id")?,
        fields: ObligationFields {
            name: row.get("name")?,
            period: row.get("period")?,
            company_id: row.get("company_id")?,
        },
    })
}
