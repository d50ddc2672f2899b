//! Obligation use-case service.
//!
//! # Invariants
//! - No explicit owning-company lookup happens before writes.
//! - Unconventional recurrence labels are stored as given and only logged.

use crate::model::obligation::{Obligation, ObligationFields, ObligationId};
use crate::model::RecordKind;
use crate::repo::obligation_repo::{
    ObligationListQuery, ObligationRepository, SqliteObligationRepository,
};
use crate::service::{ServiceError, ServiceResult};
use log::{info, warn};
use rusqlite::Connection;

/// Obligation service facade over a repository implementation.
pub struct ObligationService<R: ObligationRepository> {
    repo: R,
}

impl<'conn> ObligationService<SqliteObligationRepository<'conn>> {
    /// Builds the SQLite-backed service over one session connection.
    pub fn for_connection(conn: &'conn Connection) -> ServiceResult<Self> {
        Ok(Self::new(SqliteObligationRepository::try_new(conn)?))
    }
}

impl<R: ObligationRepository> ObligationService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_obligation(&self, fields: &ObligationFields) -> ServiceResult<Obligation> {
        note_unconventional_period(fields);
        let id = self.repo.create_obligation(fields)?;
        info!(
            "event=obligation_create module=service status=ok obligation_id={id} company_id={}",
            fields.company_id
        );
        self.repo
            .get_obligation(id)?
            .ok_or(ServiceError::InconsistentState(
                "created obligation not found in read-back",
            ))
    }

    pub fn get_obligation(&self, id: ObligationId) -> ServiceResult<Obligation> {
        self.repo
            .get_obligation(id)?
            .ok_or(ServiceError::NotFound(RecordKind::Obligation, id))
    }

    pub fn list_obligations(&self, query: &ObligationListQuery) -> ServiceResult<Vec<Obligation>> {
        Ok(self.repo.list_obligations(query)?)
    }

    /// Replaces name, period and owning company in one write.
    pub fn update_obligation(
        &self,
        id: ObligationId,
        fields: &ObligationFields,
    ) -> ServiceResult<Obligation> {
        note_unconventional_period(fields);
        self.repo.replace_obligation(id, fields)?;
        info!("event=obligation_update module=service status=ok obligation_id={id}");
        self.repo
            .get_obligation(id)?
            .ok_or(ServiceError::InconsistentState(
                "updated obligation not found in read-back",
            ))
    }

    pub fn delete_obligation(&self, id: ObligationId) -> ServiceResult<()> {
        self.repo.delete_obligation(id)?;
        info!("event=obligation_delete module=service status=ok obligation_id={id}");
        Ok(())
    }
}

fn note_unconventional_period(fields: &ObligationFields) {
    if !fields.has_conventional_period() {
        warn!(
            "event=obligation_period module=service status=unconventional company_id={} period_len={}",
            fields.company_id,
            fields.period.chars().count()
        );
    }
}
