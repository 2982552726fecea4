//! Error types for the dispatch flow

use std::{io, path::PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::domain::communication::mailer::MailerError;

/// The kind of failure, which decides the process exit code
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Wrong number of arguments
    Usage,

    /// The content file is missing or cannot be read
    Input,

    /// Connecting, negotiating TLS, authenticating or sending failed
    Transport,
}

impl ErrorKind {
    /// The exit code reported to the calling application
    pub const fn exit_code(self) -> u8 {
        match self {
            ErrorKind::Transport => 1,
            ErrorKind::Usage => 2,
            ErrorKind::Input => 3,
        }
    }
}

/// Errors that can occur while dispatching an email
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The command line could not be parsed
    #[error(transparent)]
    Usage(clap::Error),

    /// The content file does not exist
    #[error("content file {} does not exist", .0.display())]
    MissingContentFile(PathBuf),

    /// The content file exists but could not be read
    #[error("content file {} could not be read", .path.display())]
    UnreadableContentFile {
        /// Path to the content file
        path: PathBuf,

        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The SMTP session failed
    #[error(transparent)]
    Transport(MailerError),
}

impl DispatchError {
    /// The kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            DispatchError::Usage(_) => ErrorKind::Usage,
            DispatchError::MissingContentFile(_) | DispatchError::UnreadableContentFile { .. } => {
                ErrorKind::Input
            }
            DispatchError::Transport(_) => ErrorKind::Transport,
        }
    }

    /// The exit code reported to the calling application
    pub fn exit_code(&self) -> u8 {
        self.kind().exit_code()
    }
}

impl From<clap::Error> for DispatchError {
    fn from(err: clap::Error) -> Self {
        debug!("clap::Error -> DispatchError");

        DispatchError::Usage(err)
    }
}

impl From<MailerError> for DispatchError {
    fn from(err: MailerError) -> Self {
        debug!("MailerError -> DispatchError");

        DispatchError::Transport(err)
    }
}
