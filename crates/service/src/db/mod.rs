pub mod agendamento_service;
