//! Communication module

pub mod credentials;
pub mod mailer;
