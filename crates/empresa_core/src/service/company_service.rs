//! Company use-case service.
//!
//! # Invariants
//! - Returned companies always carry their current obligation list.
//! - `update_company` is a full replace of the five mutable fields.
//! - `delete_company` never touches obligations.

use crate::model::company::{Company, CompanyFields, CompanyId};
use crate::model::RecordKind;
use crate::repo::company_repo::{CompanyRepository, SqliteCompanyRepository};
use crate::repo::obligation_repo::{ObligationRepository, SqliteObligationRepository};
use crate::repo::Page;
use crate::service::{ServiceError, ServiceResult};
use log::info;
use rusqlite::Connection;

/// Company service facade over repository implementations.
pub struct CompanyService<C: CompanyRepository, O: ObligationRepository> {
    companies: C,
    obligations: O,
}

impl<'conn> CompanyService<SqliteCompanyRepository<'conn>, SqliteObligationRepository<'conn>> {
    /// Builds the SQLite-backed service over one session connection.
    pub fn for_connection(conn: &'conn Connection) -> ServiceResult<Self> {
        Ok(Self::new(
            SqliteCompanyRepository::try_new(conn)?,
            SqliteObligationRepository::try_new(conn)?,
        ))
    }
}

impl<C: CompanyRepository, O: ObligationRepository> CompanyService<C, O> {
    pub fn new(companies: C, obligations: O) -> Self {
        Self {
            companies,
            obligations,
        }
    }

    /// Registers a company and returns it with its (empty) obligation list.
    pub fn create_company(&self, fields: &CompanyFields) -> ServiceResult<Company> {
        let id = self.companies.create_company(fields)?;
        info!("event=company_create module=service status=ok company_id={id}");
        self.load(id)?
            .ok_or(ServiceError::InconsistentState(
                "created company not found in read-back",
            ))
    }

    /// Gets one company with its obligations.
    pub fn get_company(&self, id: CompanyId) -> ServiceResult<Company> {
        self.load(id)?
            .ok_or(ServiceError::NotFound(RecordKind::Company, id))
    }

    /// Lists companies ordered by id, each with its obligations.
    pub fn list_companies(&self, page: &Page) -> ServiceResult<Vec<Company>> {
        let mut companies = self.companies.list_companies(page)?;
        for company in &mut companies {
            company.obligations = self.obligations.list_for_company(company.id)?;
        }
        Ok(companies)
    }

    /// Replaces all mutable fields and returns the stored result.
    pub fn update_company(&self, id: CompanyId, fields: &CompanyFields) -> ServiceResult<Company> {
        self.companies.replace_company(id, fields)?;
        info!("event=company_update module=service status=ok company_id={id}");
        self.load(id)?
            .ok_or(ServiceError::InconsistentState(
                "updated company not found in read-back",
            ))
    }

    /// Removes a company. Obligations are neither cascaded nor checked.
    ///
    /// Run it through `Database::write_without_foreign_keys` when the company
    /// may own obligations; with foreign keys enforced the delete fails.
    pub fn delete_company(&self, id: CompanyId) -> ServiceResult<()> {
        self.companies.delete_company(id)?;
        info!("event=company_delete module=service status=ok company_id={id}");
        Ok(())
    }

    fn load(&self, id: CompanyId) -> ServiceResult<Option<Company>> {
        let Some(mut company) = self.companies.get_company(id)? else {
            return Ok(None);
        };
        company.obligations = self.obligations.list_for_company(id)?;
        Ok(Some(company))
    }
}
