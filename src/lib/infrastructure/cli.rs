//! Command-line surface

use std::{ffi::OsString, path::PathBuf, process::ExitCode};

use clap::Parser;
use tracing::error;

use crate::{
    domain::{
        communication::credentials::Password,
        dispatch::{DispatchConfig, DispatchError, Dispatcher},
    },
    infrastructure::email::smtp::{SmtpConfig, SmtpMailer},
};

/// Send one plain-text email through an authenticated STARTTLS SMTP session.
///
/// Exit codes: 0 sent, 1 SMTP failure, 2 wrong arguments, 3 content file missing.
///
/// The password is read from the command line and is therefore visible to
/// other users of the host through the process list.
#[derive(Debug, Parser)]
#[command(version)]
pub struct Args {
    /// The SMTP server host
    pub smtp_server: OsString,

    /// The SMTP server port
    pub smtp_port: OsString,

    /// The sender address, also used as the SMTP username
    pub email_from: OsString,

    /// The sender's SMTP password
    pub email_password: Password,

    /// The recipient address
    pub email_to: OsString,

    /// The subject line, inserted verbatim
    pub email_subject: OsString,

    /// File holding the message body
    pub content_file: PathBuf,
}

/// Program name plus the seven positionals
const FULL_ARG_COUNT: usize = 8;

impl DispatchConfig {
    /// Parse the command line (program name first) into a validated configuration
    pub fn from_cli<I, T>(args: I) -> Result<Self, DispatchError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();

        // With every positional present nothing is an option, not even `--`,
        // `-h` or a value with a leading hyphen.
        if args.len() == FULL_ARG_COUNT {
            args.insert(1, OsString::from("--"));
        }

        let args = Args::try_parse_from(args)?;

        DispatchConfig::new(
            args.smtp_server,
            args.smtp_port,
            args.email_from,
            args.email_password,
            args.email_to,
            args.email_subject,
            args.content_file,
        )
    }
}

/// Parse the command line and send the email over SMTP
pub fn execute<I, T>(args: I) -> Result<(), DispatchError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let config = DispatchConfig::from_cli(args)?;
    let mailer = SmtpMailer::new(SmtpConfig::from(&config));

    Dispatcher::new(mailer).dispatch(&config)
}

/// Run one invocation and map the outcome to the process exit code
pub fn run<I, T>(args: I) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match execute(args) {
        Ok(()) => ExitCode::SUCCESS,
        // --help and --version
        Err(DispatchError::Usage(err)) if !err.use_stderr() => err.exit(),
        Err(err) => {
            error!(error = %err, kind = ?err.kind(), "email not sent");

            ExitCode::from(err.exit_code())
        }
    }
}
