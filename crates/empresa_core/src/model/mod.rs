//! Record model for the company registry.
//!
//! # Responsibility
//! - Define the canonical shapes of companies and their filing obligations.
//! - Own field-level validation rules shared by every write path.
//!
//! # Invariants
//! - Identifiers are assigned by storage and never change afterwards.
//! - Mutable fields travel together as one `*Fields` value (full replace).
//! - An obligation always names its owning company by id.

pub mod company;
pub mod obligation;
pub mod validation;

use std::fmt::{Display, Formatter};

/// Discriminates the two record types in errors and log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Company,
    Obligation,
}

impl RecordKind {
    /// Stable lowercase label used in log events and error text.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Company => "company",
            Self::Obligation => "obligation",
        }
    }
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
