//! FTP reply types and status codes

use crate::commands;
use crate::error::Result;
use std::fmt;
use std::net::SocketAddrV4;

/// 3-character FTP reply code
///
/// Well-formed codes are exactly three ASCII digits. A degenerate reply of
/// three bytes or fewer yields a shorter code, which never compares equal to
/// any of the [`codes`] constants and is never a success.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReplyCode {
    bytes: [u8; 3],
    len: u8,
}

impl ReplyCode {
    /// Build a code from exactly three bytes
    pub const fn new(bytes: [u8; 3]) -> Self {
        Self { bytes, len: 3 }
    }

    /// Extract the code from a raw reply: the first 3 bytes, or the whole
    /// reply if it is not longer than that
    pub fn from_reply(reply: &[u8]) -> Self {
        let len = reply.len().min(3);
        let mut bytes = [0u8; 3];
        bytes[..len].copy_from_slice(&reply[..len]);
        Self {
            bytes,
            len: len as u8,
        }
    }

    /// Raw code bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    /// Numeric value, if the code is three ASCII digits
    pub fn as_u16(&self) -> Option<u16> {
        if self.len != 3 || !self.bytes.iter().all(u8::is_ascii_digit) {
            return None;
        }
        Some(self.bytes.iter().fold(0u16, |acc, b| acc * 10 + u16::from(b - b'0')))
    }

    /// Preliminary (1xx) or completion (2xx) reply
    pub fn is_success(&self) -> bool {
        self.len == 3 && matches!(self.bytes[0], b'1' | b'2')
    }
}

impl fmt::Display for ReplyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.as_bytes()))
    }
}

impl fmt::Debug for ReplyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReplyCode({})", self)
    }
}

/// A complete reply read from the control connection
///
/// Holds the raw bytes exactly as received, including codes and line
/// terminators. Everything else is derived on demand.
#[derive(Clone, PartialEq, Eq)]
pub struct Reply {
    raw: Vec<u8>,
}

impl Reply {
    /// Wrap raw reply bytes
    pub fn new(raw: impl Into<Vec<u8>>) -> Self {
        Self { raw: raw.into() }
    }

    /// Raw reply bytes
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Reply code
    pub fn code(&self) -> ReplyCode {
        ReplyCode::from_reply(&self.raw)
    }

    /// Check if the reply code indicates success (1xx or 2xx)
    pub fn is_success(&self) -> bool {
        self.code().is_success()
    }

    /// Human-readable text with codes and framing removed
    pub fn text(&self) -> String {
        commands::strip_control_symbols(&self.raw)
    }

    /// Double-quoted path carried by the reply (MKD, PWD)
    pub fn path(&self) -> Result<String> {
        commands::extract_path(&self.raw)
    }

    /// Data connection address carried by a passive-mode reply
    pub fn passive_address(&self) -> Result<SocketAddrV4> {
        commands::extract_passive_address(&self.raw)
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.raw))
    }
}

impl fmt::Debug for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reply({:?})", String::from_utf8_lossy(&self.raw))
    }
}

/// What a STAT reply describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// System status (211)
    General,
    /// Directory status (212)
    Directory,
    /// File status (213)
    File,
}

impl StatusKind {
    /// Map a STAT reply code to the kind of status it carries
    pub fn from_code(code: ReplyCode) -> Option<Self> {
        match code {
            codes::SYSTEM_STATUS => Some(StatusKind::General),
            codes::DIRECTORY_STATUS => Some(StatusKind::Directory),
            codes::FILE_STATUS => Some(StatusKind::File),
            _ => None,
        }
    }
}

/// FTP reply codes (RFC 959)
pub mod codes {
    use super::ReplyCode;

    // 2xx - Positive completion
    /// Command okay
    pub const COMMAND_OK: ReplyCode = ReplyCode::new(*b"200");
    /// System status, or system help reply
    pub const SYSTEM_STATUS: ReplyCode = ReplyCode::new(*b"211");
    /// Directory status
    pub const DIRECTORY_STATUS: ReplyCode = ReplyCode::new(*b"212");
    /// File status
    pub const FILE_STATUS: ReplyCode = ReplyCode::new(*b"213");
    /// Help message
    pub const HELP_MESSAGE: ReplyCode = ReplyCode::new(*b"214");
    /// NAME system type
    pub const SYSTEM_NAME: ReplyCode = ReplyCode::new(*b"215");
    /// Service ready for new user
    pub const SERVICE_READY: ReplyCode = ReplyCode::new(*b"220");
    /// Service closing control connection
    pub const SERVICE_CLOSING: ReplyCode = ReplyCode::new(*b"221");
    /// Data connection open; no transfer in progress
    pub const NO_TRANSFER_IN_PROGRESS: ReplyCode = ReplyCode::new(*b"225");
    /// Closing data connection
    pub const CLOSING_DATA_CONNECTION: ReplyCode = ReplyCode::new(*b"226");
    /// Entering passive mode (h1,h2,h3,h4,p1,p2)
    pub const ENTERING_PASSIVE_MODE: ReplyCode = ReplyCode::new(*b"227");
    /// User logged in, proceed
    pub const USER_LOGGED_IN: ReplyCode = ReplyCode::new(*b"230");
    /// Requested file action okay, completed
    pub const FILE_ACTION_COMPLETED: ReplyCode = ReplyCode::new(*b"250");
    /// "PATHNAME" created
    pub const PATH_CREATED: ReplyCode = ReplyCode::new(*b"257");

    // 3xx - Positive intermediate
    /// User name okay, need password
    pub const NEED_PASSWORD: ReplyCode = ReplyCode::new(*b"331");
    /// Need account for login
    pub const NEED_ACCOUNT: ReplyCode = ReplyCode::new(*b"332");
    /// Requested file action pending further information
    pub const FILE_ACTION_PENDING: ReplyCode = ReplyCode::new(*b"350");

    // 4xx - Transient negative completion
    /// Connection closed; transfer aborted
    pub const TRANSFER_ABORTED: ReplyCode = ReplyCode::new(*b"426");
}
