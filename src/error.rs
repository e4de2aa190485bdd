//! FTP error types

use thiserror::Error;

/// FTP protocol and connection errors
#[derive(Error, Debug)]
pub enum FtpError {
    /// IO error during network operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Connection or reply timeout
    #[error("Connection timeout")]
    Timeout,

    /// Control connection closed, either mid-reply or by an earlier failure
    #[error("Connection closed")]
    ConnectionClosed,

    /// Reply could not be framed (e.g. exceeded the size bound)
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Server answered with a reply code the command does not accept,
    /// or a reply lacked the data a command needed to extract from it
    #[error("FTP server responded to {command} with error: {reply}")]
    Protocol {
        /// Command verb (e.g. "CWD") or extraction context (e.g. "path extraction")
        command: String,
        /// Full raw reply text
        reply: String,
    },

    /// USER was answered with neither "logged in" nor "need password"
    #[error("Authentication failed: {0}")]
    AuthFailed(String),
}

impl FtpError {
    /// Build a protocol error from a command name and the raw reply bytes
    pub(crate) fn protocol(command: impl Into<String>, reply: &[u8]) -> Self {
        FtpError::Protocol {
            command: command.into(),
            reply: String::from_utf8_lossy(reply).into_owned(),
        }
    }

    /// Whether this error came from the transport rather than a reply code
    ///
    /// Transport errors leave the control connection in an unknown state,
    /// so the session that produced one is no longer usable.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            FtpError::Io(_)
                | FtpError::Timeout
                | FtpError::ConnectionClosed
                | FtpError::InvalidResponse(_)
        )
    }
}

/// Result type alias using FtpError
pub type Result<T> = std::result::Result<T, FtpError>;
