//! Mailer module

#[cfg(test)]
use mockall::mock;

mod errors;
mod message;

pub use errors::MailerError;
pub use message::{Message, CONTENT_TYPE};

/// Something that can deliver a composed [`Message`]
pub trait Mailer {
    /// Send a message to every address in its recipient list
    ///
    /// # Arguments
    /// * `message` - The [`Message`] to send, headers already composed.
    ///
    /// # Returns
    /// A [`Result`] indicating success or failure. Every failure of the
    /// underlying session (connect, TLS, authentication, send) is reported as
    /// a [`MailerError`].
    fn send_message(&self, message: &Message) -> Result<(), MailerError>;
}

#[cfg(test)]
mock! {
    pub Mailer {}

    impl Mailer for Mailer {
        fn send_message(&self, message: &Message) -> Result<(), MailerError>;
    }
}
