#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Sends a single plain-text notification email over an authenticated
//! STARTTLS SMTP session.

pub mod domain;
pub mod infrastructure;

pub use infrastructure::cli::run;
