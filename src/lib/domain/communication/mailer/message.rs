//! Email message

use chrono::Local;

/// The content type declared on every message.
///
/// The calling application writes bodies and subjects in this charset, so the
/// bytes are passed through untouched and never transcoded.
pub const CONTENT_TYPE: &str = "text/plain; charset=windows-1252";

/// A plain-text email message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// The sender of the email
    pub from: String,

    /// The recipients of the email
    pub to: Vec<String>,

    /// The subject of the email, as raw bytes
    pub subject: Vec<u8>,

    /// The RFC 2822 date the message was composed
    pub date: String,

    /// The plain text body of the email, as raw bytes
    pub body: Vec<u8>,
}

impl Message {
    /// Compose a message stamped with the current local time
    pub fn new(
        from: impl Into<String>,
        to: Vec<String>,
        subject: impl Into<Vec<u8>>,
        body: Vec<u8>,
    ) -> Self {
        Self {
            from: from.into(),
            to,
            subject: subject.into(),
            date: Local::now().to_rfc2822(),
            body,
        }
    }

    /// Render the header block followed by the body, ready for the DATA phase
    ///
    /// Header values are inserted verbatim, one per CRLF-terminated line. Body
    /// line endings are rewritten as CRLF; the bytes between them are untouched.
    pub fn formatted(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(256 + self.subject.len() + self.body.len());

        out.extend_from_slice(format!("From: {}\r\n", self.from).as_bytes());
        out.extend_from_slice(format!("To: {}\r\n", self.to.join(", ")).as_bytes());
        out.extend_from_slice(format!("Content-type: {}\r\n", CONTENT_TYPE).as_bytes());
        out.extend_from_slice(b"Subject: ");
        out.extend_from_slice(&self.subject);
        out.extend_from_slice(b"\r\n");
        out.extend_from_slice(format!("Date: {}\r\n", self.date).as_bytes());
        out.extend_from_slice(b"\r\n");
        out.extend_from_slice(&crlf_line_endings(&self.body));

        out
    }
}

/// Rewrite every line ending (CRLF, bare LF or bare CR) as CRLF
fn crlf_line_endings(text: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() + text.len() / 32);
    let mut bytes = text.iter().copied().peekable();

    while let Some(byte) = bytes.next() {
        match byte {
            b'\r' => {
                bytes.next_if_eq(&b'\n');
                out.extend_from_slice(b"\r\n");
            }
            b'\n' => out.extend_from_slice(b"\r\n"),
            _ => out.push(byte),
        }
    }

    out
}
