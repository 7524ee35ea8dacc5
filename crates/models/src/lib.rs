pub mod errors;
pub mod db;
pub mod agendamento;
