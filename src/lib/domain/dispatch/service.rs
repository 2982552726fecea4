//! Dispatch service

use std::{fs, path::Path};

use tracing::debug;

use crate::domain::communication::mailer::{Mailer, MailerError, Message};

use super::{DispatchConfig, DispatchError};

/// Reads the content file, composes the message and hands it to a [`Mailer`]
#[derive(Debug, Clone)]
pub struct Dispatcher<M>
where
    M: Mailer,
{
    mailer: M,
}

impl<M> Dispatcher<M>
where
    M: Mailer,
{
    /// Creates a new dispatcher.
    pub fn new(mailer: M) -> Self {
        Self { mailer }
    }

    /// Sends one email as described by `config`.
    ///
    /// Every call sends a fresh message; nothing is deduplicated.
    ///
    /// # Returns
    /// - [`Ok`] once the mailer has accepted the message.
    /// - [`Err`] with an input error if the content file cannot be read, or a
    ///   transport error if the mailer fails.
    pub fn dispatch(&self, config: &DispatchConfig) -> Result<(), DispatchError> {
        let body = read_content(config.content_file())?;

        let from = config.from().to_str().ok_or(MailerError::InvalidEmail)?;
        let to = config.to().to_str().ok_or(MailerError::InvalidEmail)?;

        let message = Message::new(
            from,
            vec![to.to_string()],
            config.subject().as_encoded_bytes(),
            body,
        );

        debug!(from = %message.from, to = ?message.to, "sending message");

        self.mailer.send_message(&message)?;

        debug!("message sent");

        Ok(())
    }
}

fn read_content(path: &Path) -> Result<Vec<u8>, DispatchError> {
    fs::read(path).map_err(|source| DispatchError::UnreadableContentFile {
        path: path.to_path_buf(),
        source,
    })
}
