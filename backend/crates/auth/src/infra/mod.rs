//! Infrastructure Layer
//!
//! Concrete adapters for the domain ports: Postgres persistence, a
//! log-only mailer for environments without SMTP, and an in-memory
//! repository used by the use-case tests.

pub mod mailer;
pub mod memory;
pub mod postgres;

pub use mailer::LogMailer;
pub use memory::InMemoryUserRepository;
pub use postgres::PgUserRepository;
