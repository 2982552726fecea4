#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Command-line entry point: sends one email and reports the outcome as the exit code

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

#[mutants::skip]
fn main() -> ExitCode {
    // Diagnostics go to stderr only; the calling application reads the exit code.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .init();

    smtp_notify::run(std::env::args_os())
}
