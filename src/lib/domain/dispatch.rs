//! Dispatch of a single notification email.

mod config;
mod errors;
mod service;

pub use config::DispatchConfig;
pub use errors::{DispatchError, ErrorKind};
pub use service::Dispatcher;
