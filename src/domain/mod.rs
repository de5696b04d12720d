//! Domain entities mirrored from the CRM backend.

pub mod dashboard;
pub mod lead;
pub mod order;
pub mod types;
pub mod wire;
