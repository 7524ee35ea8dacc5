//! Service layer providing the appointment operations on top of models.
//! - Separates business rules from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Takes the store handle explicitly; nothing is process-global.

pub mod errors;
pub mod runtime;
#[cfg(test)]
pub mod test_support;
pub mod db;
pub mod agendamento;
