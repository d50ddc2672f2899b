//! Request handlers, one per route and method.

pub mod companies;
pub mod health;
pub mod obligations;

use empresa_core::Page;
use serde::Deserialize;

/// Shared `limit`/`offset` query parameters for list routes.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl PageParams {
    pub fn page(&self) -> Page {
        Page {
            limit: self.limit,
            offset: self.offset.unwrap_or(0),
        }
    }
}
