//! Command-line surface and SMTP transport

pub mod cli;
pub mod email;
