//! Tabular input: raw tables, role assignment, typed records, entity filtering.

pub mod filter;
pub mod load;
pub mod record;
