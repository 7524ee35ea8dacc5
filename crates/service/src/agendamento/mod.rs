pub mod repository;
pub mod service;

pub use repository::{AgendamentoRepository, SeaOrmAgendamentoRepository};
pub use service::{parse_id, AgendamentoService};
