//! Mailer errors

use lettre::{address::AddressError, transport::smtp};
use thiserror::Error;

/// Mailer errors
#[derive(Debug, Error)]
pub enum MailerError {
    /// An address could not be used in the SMTP envelope
    #[error("Invalid email address")]
    InvalidEmail,

    /// The SMTP port is not a number between 0 and 65535
    #[error("Invalid SMTP port \"{0}\"")]
    InvalidPort(String),

    /// A host, username or password that is not valid UTF-8
    #[error("SMTP {0} is not valid UTF-8")]
    InvalidArgument(&'static str),

    /// The SMTP session failed while connecting, negotiating TLS,
    /// authenticating or sending
    #[error("An error occurred while sending the email")]
    SendError(#[source] smtp::Error),

    /// Unknown error
    #[error(transparent)]
    UnknownError(anyhow::Error),
}

impl From<AddressError> for MailerError {
    fn from(_err: AddressError) -> Self {
        MailerError::InvalidEmail
    }
}

impl From<lettre::error::Error> for MailerError {
    fn from(err: lettre::error::Error) -> Self {
        MailerError::UnknownError(err.into())
    }
}

impl From<smtp::Error> for MailerError {
    fn from(err: smtp::Error) -> Self {
        MailerError::SendError(err)
    }
}
