//! Company (empresa) record.
//!
//! # Invariants
//! - `tax_id` (CNPJ) is unique across companies; storage enforces it.
//! - `obligations` is a read projection filled from the obligations table,
//!   never written through this type.

use super::obligation::Obligation;
use super::validation::{require_email, require_text, ValidationError};
use serde::{Deserialize, Serialize};

/// Storage-assigned company identifier.
pub type CompanyId = i64;

/// Mutable company attributes, used both for create and full-replace update.
///
/// Serialized with the Portuguese wire names the HTTP API exposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyFields {
    #[serde(rename = "nome")]
    pub name: String,
    /// CNPJ, kept verbatim (formatting is not normalized).
    #[serde(rename = "cnpj")]
    pub tax_id: String,
    #[serde(rename = "endereco")]
    pub address: String,
    pub email: String,
    #[serde(rename = "telefone")]
    pub phone: String,
}

impl CompanyFields {
    pub fn new(
        name: impl Into<String>,
        tax_id: impl Into<String>,
        address: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            tax_id: tax_id.into(),
            address: address.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// Checks field-level rules before any write reaches storage.
    ///
    /// # Errors
    /// - `BlankField` when `nome` or `cnpj` is empty after trimming.
    /// - `InvalidEmail` when `email` is not `local@domain.tld` shaped.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("nome", &self.name)?;
        require_text("cnpj", &self.tax_id)?;
        require_email(&self.email)?;
        Ok(())
    }
}

/// Persisted company together with the obligations it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    #[serde(flatten)]
    pub fields: CompanyFields,
    /// Ordered by obligation id ascending.
    #[serde(rename = "obrigacoes", default)]
    pub obligations: Vec<Obligation>,
}

impl Company {
    /// Builds a company projection without loaded obligations.
    pub fn new(id: CompanyId, fields: CompanyFields) -> Self {
        Self {
            id,
            fields,
            obligations: Vec::new(),
        }
    }
}
