//! SMTP email service implementation

use std::{ffi::OsString, fmt};

use lettre::{
    address::Envelope,
    transport::smtp::{
        authentication::{Credentials, Mechanism},
        client::{Tls, TlsParameters},
    },
    Address, SmtpTransport, Transport,
};
use tracing::debug;

use crate::domain::{
    communication::{
        credentials::Password,
        mailer::{Mailer, MailerError, Message},
    },
    dispatch::DispatchConfig,
};

/// SMTP configuration
///
/// Values are kept as they came in and only converted when a session opens.
#[derive(Clone, Debug)]
pub struct SmtpConfig {
    /// The SMTP host
    pub host: OsString,

    /// The SMTP port
    pub port: OsString,

    /// The SMTP username
    pub username: OsString,

    /// The SMTP password
    pub password: Password,
}

impl From<&DispatchConfig> for SmtpConfig {
    fn from(config: &DispatchConfig) -> Self {
        Self {
            host: config.host().to_os_string(),
            port: config.port().to_os_string(),
            username: config.from().to_os_string(),
            password: config.password().clone(),
        }
    }
}

/// SMTP mailer
///
/// Each message gets its own session: EHLO, STARTTLS, EHLO, AUTH, MAIL/RCPT/DATA
/// and QUIT. TLS is required; a server that cannot upgrade the connection is a
/// failure, never a plaintext fallback.
#[derive(Clone)]
pub struct SmtpMailer {
    config: SmtpConfig,
    tls: Option<TlsParameters>,
}

impl SmtpMailer {
    /// Create a new SMTP mailer that verifies the server against the system roots
    pub fn new(config: SmtpConfig) -> Self {
        Self { config, tls: None }
    }

    /// Create a new SMTP mailer with its own TLS parameters, e.g. a private root
    /// certificate
    pub fn with_tls_parameters(config: SmtpConfig, tls: TlsParameters) -> Self {
        Self {
            config,
            tls: Some(tls),
        }
    }

    /// Build the transport for a single session
    pub fn transport(&self) -> Result<SmtpTransport, MailerError> {
        let host = self
            .config
            .host
            .to_str()
            .ok_or(MailerError::InvalidArgument("host"))?;

        let port: u16 = self
            .config
            .port
            .to_str()
            .and_then(|port| port.parse().ok())
            .ok_or_else(|| MailerError::InvalidPort(self.config.port.to_string_lossy().into_owned()))?;

        let username = self
            .config
            .username
            .to_str()
            .ok_or(MailerError::InvalidArgument("username"))?;

        let password = self
            .config
            .password
            .expose()
            .to_str()
            .ok_or(MailerError::InvalidArgument("password"))?;

        let creds = Credentials::new(username.to_string(), password.to_string());

        let mut relay = SmtpTransport::starttls_relay(host)?;

        if let Some(tls) = &self.tls {
            relay = relay.tls(Tls::Required(tls.clone()));
        }

        // No timeout: a peer that stops answering blocks until it goes away.
        Ok(relay
            .port(port)
            .credentials(creds)
            .authentication(vec![Mechanism::Plain, Mechanism::Login])
            .timeout(None)
            .build())
    }
}

impl fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("config", &self.config)
            .field("custom_tls", &self.tls.is_some())
            .finish()
    }
}

impl Mailer for SmtpMailer {
    fn send_message(&self, message: &Message) -> Result<(), MailerError> {
        let from: Address = message.from.parse()?;
        let to = message
            .to
            .iter()
            .map(|address| address.parse())
            .collect::<Result<Vec<Address>, _>>()?;

        let envelope = Envelope::new(Some(from), to)?;

        let mailer = self.transport()?;

        debug!(
            host = %self.config.host.to_string_lossy(),
            port = %self.config.port.to_string_lossy(),
            "opening SMTP session"
        );

        let response = mailer.send_raw(&envelope, &message.formatted())?;

        debug!(code = %response.code(), "message accepted");

        Ok(())
    }
}
