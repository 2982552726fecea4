//! SMTP credentials

use std::{
    ffi::{OsStr, OsString},
    fmt,
};

/// The sender's SMTP password
///
/// The value is accepted as given: no length or strength rules apply, since
/// it belongs to an existing mailbox. `Display` and `Debug` both mask it.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(OsString);

impl Password {
    /// Create a new password
    pub fn new(raw: impl Into<OsString>) -> Self {
        Self(raw.into())
    }

    /// Get the password in clear text, for handing to the SMTP authenticator
    pub fn expose(&self) -> &OsStr {
        &self.0
    }
}

impl From<OsString> for Password {
    fn from(raw: OsString) -> Self {
        Self(raw)
    }
}

impl fmt::Display for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}
