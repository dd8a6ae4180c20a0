//! Domain Layer
//!
//! Contains entities, value objects, and the ports this core consumes
//! (durable record store, outbound mail).

pub mod entity;
pub mod mailer;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::user::User;
pub use mailer::{MailMessage, Mailer};
pub use repository::UserRepository;
