//! Dispatch configuration

use std::{
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
};

use crate::domain::communication::credentials::Password;

use super::DispatchError;

/// Everything needed to send one email, validated once at construction
#[derive(Clone, Debug)]
pub struct DispatchConfig {
    host: OsString,
    port: OsString,
    from: OsString,
    password: Password,
    to: OsString,
    subject: OsString,
    content_file: PathBuf,
}

impl DispatchConfig {
    /// Create a new dispatch configuration
    ///
    /// Host, port and addresses are kept exactly as given; they are only
    /// interpreted once the message is composed and the SMTP session opened.
    ///
    /// # Returns
    /// - [`Ok`] with the configuration if the content file exists.
    /// - [`Err`] with [`DispatchError::MissingContentFile`] otherwise. No file
    ///   is opened and no connection is made.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        host: impl Into<OsString>,
        port: impl Into<OsString>,
        from: impl Into<OsString>,
        password: Password,
        to: impl Into<OsString>,
        subject: impl Into<OsString>,
        content_file: impl Into<PathBuf>,
    ) -> Result<Self, DispatchError> {
        let content_file = content_file.into();

        if !content_file.exists() {
            return Err(DispatchError::MissingContentFile(content_file));
        }

        Ok(Self {
            host: host.into(),
            port: port.into(),
            from: from.into(),
            password,
            to: to.into(),
            subject: subject.into(),
            content_file,
        })
    }

    /// The SMTP server host
    pub fn host(&self) -> &OsStr {
        &self.host
    }

    /// The SMTP server port, unparsed
    pub fn port(&self) -> &OsStr {
        &self.port
    }

    /// The sender address, also used as the SMTP username
    pub fn from(&self) -> &OsStr {
        &self.from
    }

    /// The sender's SMTP password
    pub fn password(&self) -> &Password {
        &self.password
    }

    /// The single recipient address
    pub fn to(&self) -> &OsStr {
        &self.to
    }

    /// The subject, exactly as it was passed in
    pub fn subject(&self) -> &OsStr {
        &self.subject
    }

    /// Path to the file holding the message body
    pub fn content_file(&self) -> &Path {
        &self.content_file
    }
}
