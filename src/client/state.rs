//! Session state types for FTP client

/// FTP session state
///
/// `Unauthenticated` → `Authenticated` after a successful login.
/// REIN returns the session to `Unauthenticated`; QUIT or any transport
/// failure ends it in `Terminated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum SessionState {
    /// Greeting received, not logged in
    Unauthenticated,
    /// USER (and PASS, if required) accepted
    Authenticated,
    /// Session over; the control connection must not be used again
    Terminated,
}

/// Data representation type (RFC 959 §3.1.1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferType {
    /// Line-oriented text (`TYPE A`), used for listings
    #[default]
    Ascii,
    /// Byte-exact image (`TYPE I`), used for file transfers
    Binary,
}

impl TransferType {
    /// Argument of the TYPE command selecting this representation
    pub fn symbol(self) -> &'static str {
        match self {
            TransferType::Ascii => "A",
            TransferType::Binary => "I",
        }
    }
}
