//! Scripted SMTP peer for driving the mailer and the binary
//!
//! The peer speaks enough SMTP to take a client through EHLO, STARTTLS, a
//! second EHLO, AUTH, MAIL/RCPT/DATA and QUIT, and records what it was sent.
//! STARTTLS can be refused, cut off, or completed with a test certificate.

use std::{
    io::{self, BufRead, BufReader, Read, Write},
    net::{TcpListener, TcpStream},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    thread,
};

use native_tls::TlsAcceptor;

/// What the peer does when the client asks for STARTTLS
#[derive(Clone)]
pub enum StartTls {
    /// Answer 454 and keep the session open
    Refuse,

    /// Answer 220 and close the socket before any TLS handshake
    HangUp,

    /// Answer 220 and complete the handshake with this acceptor
    Accept(TlsAcceptor),
}

/// SMTP command received by the mock server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmtpCommand {
    /// EHLO command with hostname
    Ehlo(String),
    /// STARTTLS command
    StartTls,
    /// AUTH command with its mechanism
    Auth(String),
    /// MAIL FROM command
    MailFrom(String),
    /// RCPT TO command
    RcptTo(String),
    /// DATA command
    Data,
    /// Message content (after DATA), still dot-stuffed, without the final `.` line
    MessageContent(Vec<u8>),
    /// QUIT command
    Quit,
    /// Anything else, verbatim
    Other(String),
}

impl SmtpCommand {
    fn parse(line: &[u8]) -> Self {
        let line = String::from_utf8_lossy(line).trim_end().to_string();
        let upper = line.to_ascii_uppercase();

        if let Some(rest) = upper.strip_prefix("EHLO ") {
            SmtpCommand::Ehlo(rest.to_string())
        } else if upper == "STARTTLS" {
            SmtpCommand::StartTls
        } else if upper.starts_with("AUTH ") {
            let mechanism = line[5..].split(' ').next().unwrap_or_default();
            SmtpCommand::Auth(mechanism.to_ascii_uppercase())
        } else if upper.starts_with("MAIL FROM:") {
            SmtpCommand::MailFrom(line[10..].to_string())
        } else if upper.starts_with("RCPT TO:") {
            SmtpCommand::RcptTo(line[8..].to_string())
        } else if upper == "DATA" {
            SmtpCommand::Data
        } else if upper == "QUIT" {
            SmtpCommand::Quit
        } else {
            SmtpCommand::Other(line)
        }
    }
}

#[derive(Clone)]
struct MockServerConfig {
    starttls: StartTls,
    auth_response: &'static [u8],
}

/// Builder for [`MockSmtpServer`]
pub struct MockSmtpServerBuilder {
    config: MockServerConfig,
}

impl MockSmtpServerBuilder {
    /// Set the STARTTLS behaviour
    pub fn with_starttls(mut self, starttls: StartTls) -> Self {
        self.config.starttls = starttls;
        self
    }

    /// Reject every AUTH attempt with 535
    pub fn rejecting_auth(mut self) -> Self {
        self.config.auth_response = b"535 5.7.8 Authentication credentials invalid\r\n";
        self
    }

    /// Bind an ephemeral loopback port and start serving on a background thread
    pub fn start(self) -> io::Result<MockSmtpServer> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();

        let commands_received = Arc::new(Mutex::new(Vec::new()));
        let connections = Arc::new(AtomicUsize::new(0));

        let commands = Arc::clone(&commands_received);
        let count = Arc::clone(&connections);
        let config = self.config;

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };

                count.fetch_add(1, Ordering::SeqCst);

                let _ = handle_connection(stream, &config, &commands);
            }
        });

        Ok(MockSmtpServer {
            port,
            commands_received,
            connections,
        })
    }
}

/// Mock SMTP server running on a background thread
pub struct MockSmtpServer {
    port: u16,
    commands_received: Arc<Mutex<Vec<SmtpCommand>>>,
    connections: Arc<AtomicUsize>,
}

impl MockSmtpServer {
    /// Create a new builder; by default STARTTLS is refused and AUTH accepted
    pub fn builder() -> MockSmtpServerBuilder {
        MockSmtpServerBuilder {
            config: MockServerConfig {
                starttls: StartTls::Refuse,
                auth_response: b"235 2.7.0 Authentication successful\r\n",
            },
        }
    }

    /// Get the port the server is listening on, as a command-line argument
    pub fn port(&self) -> String {
        self.port.to_string()
    }

    /// Get all commands received by the server, message contents included
    pub fn commands(&self) -> Vec<SmtpCommand> {
        self.commands_received
            .lock()
            .map(|commands| commands.clone())
            .unwrap_or_default()
    }

    /// Get every message body received, in order
    pub fn messages(&self) -> Vec<Vec<u8>> {
        self.commands()
            .into_iter()
            .filter_map(|command| match command {
                SmtpCommand::MessageContent(content) => Some(content),
                _ => None,
            })
            .collect()
    }

    /// Get the number of connections accepted
    pub fn connection_count(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }
}

enum Next {
    Close,
    Upgrade,
}

fn handle_connection(
    stream: TcpStream,
    config: &MockServerConfig,
    commands: &Mutex<Vec<SmtpCommand>>,
) -> io::Result<()> {
    let mut plain = BufReader::new(stream);

    reply(&mut plain, b"220 mock.test ESMTP ready\r\n")?;

    if let Next::Upgrade = session(&mut plain, config, false, commands)? {
        let StartTls::Accept(acceptor) = &config.starttls else {
            return Ok(());
        };

        let tls = acceptor
            .accept(plain.into_inner())
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

        session(&mut BufReader::new(tls), config, true, commands)?;
    }

    Ok(())
}

fn session<S: Read + Write>(
    stream: &mut BufReader<S>,
    config: &MockServerConfig,
    secure: bool,
    commands: &Mutex<Vec<SmtpCommand>>,
) -> io::Result<Next> {
    let mut line = Vec::new();

    loop {
        line.clear();

        if stream.read_until(b'\n', &mut line)? == 0 {
            return Ok(Next::Close);
        }

        let command = SmtpCommand::parse(&line);
        record(commands, command.clone());

        match command {
            SmtpCommand::Ehlo(client) => {
                let mut response = format!("250-mock.test greets {}\r\n", client);
                if secure {
                    response.push_str("250 AUTH PLAIN LOGIN\r\n");
                } else {
                    response.push_str("250-AUTH PLAIN LOGIN\r\n250 STARTTLS\r\n");
                }
                reply(stream, response.as_bytes())?;
            }
            SmtpCommand::StartTls => match config.starttls {
                StartTls::Refuse => reply(stream, b"454 4.7.0 TLS not available\r\n")?,
                StartTls::HangUp => {
                    reply(stream, b"220 2.0.0 Ready to start TLS\r\n")?;
                    return Ok(Next::Close);
                }
                StartTls::Accept(_) => {
                    reply(stream, b"220 2.0.0 Ready to start TLS\r\n")?;
                    return Ok(Next::Upgrade);
                }
            },
            SmtpCommand::Auth(_) => reply(stream, config.auth_response)?,
            SmtpCommand::MailFrom(_) | SmtpCommand::RcptTo(_) => reply(stream, b"250 2.1.0 OK\r\n")?,
            SmtpCommand::Data => {
                reply(stream, b"354 End data with <CR><LF>.<CR><LF>\r\n")?;
                record(commands, SmtpCommand::MessageContent(read_data(stream)?));
                reply(stream, b"250 2.0.0 OK: queued\r\n")?;
            }
            SmtpCommand::Quit => {
                reply(stream, b"221 2.0.0 Bye\r\n")?;
                return Ok(Next::Close);
            }
            SmtpCommand::Other(line) => {
                let response = format!("500 5.5.2 Command unrecognized: {}\r\n", line);
                reply(stream, response.as_bytes())?;
            }
            SmtpCommand::MessageContent(_) => reply(stream, b"503 5.5.1 Bad sequence of commands\r\n")?,
        }
    }
}

fn read_data<S: Read>(stream: &mut BufReader<S>) -> io::Result<Vec<u8>> {
    let mut content = Vec::new();
    let mut line = Vec::new();

    loop {
        line.clear();

        if stream.read_until(b'\n', &mut line)? == 0 {
            return Err(io::ErrorKind::UnexpectedEof.into());
        }

        if line == b".\r\n" {
            return Ok(content);
        }

        content.extend_from_slice(&line);
    }
}

fn reply<S: Write>(stream: &mut BufReader<S>, response: &[u8]) -> io::Result<()> {
    let writer = stream.get_mut();
    writer.write_all(response)?;
    writer.flush()
}

fn record(commands: &Mutex<Vec<SmtpCommand>>, command: SmtpCommand) {
    if let Ok(mut received) = commands.lock() {
        received.push(command);
    }
}
