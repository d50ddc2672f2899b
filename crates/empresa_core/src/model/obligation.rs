//! Filing obligation (obrigação acessória) record.
//!
//! # Invariants
//! - `company_id` must reference an existing company when written; only the
//!   storage foreign key enforces this.
//! - `period` is free text. `mensal`, `trimestral` and `anual` are the
//!   conventional values but others are accepted.

use super::company::CompanyId;
use super::validation::{require_text, ValidationError};
use serde::{Deserialize, Serialize};

/// Storage-assigned obligation identifier.
pub type ObligationId = i64;

/// Recurrence labels the registry conventionally uses.
pub const CONVENTIONAL_PERIODS: &[&str] = &["mensal", "trimestral", "anual"];

/// Mutable obligation attributes, used both for create and full-replace update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObligationFields {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "periodicidade")]
    pub period: String,
    #[serde(rename = "empresa_id")]
    pub company_id: CompanyId,
}

impl ObligationFields {
    pub fn new(name: impl Into<String>, period: impl Into<String>, company_id: CompanyId) -> Self {
        Self {
            name: name.into(),
            period: period.into(),
            company_id,
        }
    }

    /// Checks field-level rules before any write reaches storage.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("nome", &self.name)?;
        require_text("periodicidade", &self.period)?;
        Ok(())
    }

    /// Returns whether `period` is one of [`CONVENTIONAL_PERIODS`] (case-insensitive).
    pub fn has_conventional_period(&self) -> bool {
        let period = self.period.trim();
        CONVENTIONAL_PERIODS
            .iter()
            .any(|known| known.eq_ignore_ascii_case(period))
    }
}

/// Persisted obligation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obligation {
    pub id: ObligationId,
    #[serde(flatten)]
    pub fields: ObligationFields,
}
