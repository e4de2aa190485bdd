//! Directory and file management commands
//!
//! This module implements the RFC 959 commands that act on the server's
//! file system or session without opening a data connection:
//! CWD, CDUP, SMNT, REIN, QUIT, RNFR/RNTO, DELE, MKD, RMD, PWD, NOOP.
//!
//! Paths are sent as given; quote them yourself if the server needs it.

use super::FtpClient;
use super::state::{SessionState, TransferType};
use crate::commands;
use crate::error::Result;
use crate::response::codes;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::debug;

impl<S> FtpClient<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Change the working directory (CWD)
    ///
    /// # Errors
    ///
    /// Returns [`FtpError::Protocol`](crate::FtpError::Protocol) unless the
    /// server answers 250.
    pub async fn change_dir(&mut self, path: &str) -> Result<()> {
        debug!("Changing directory to {}", path);
        self.execute(codes::FILE_ACTION_COMPLETED, commands::CWD, path)
            .await
    }

    /// Move the working directory up one level (CDUP)
    pub async fn change_dir_up(&mut self) -> Result<()> {
        self.execute(codes::COMMAND_OK, commands::CDUP, "").await
    }

    /// Mount a different file system structure (SMNT)
    pub async fn structure_mount(&mut self, path: &str) -> Result<()> {
        self.execute(codes::FILE_ACTION_COMPLETED, commands::SMNT, path)
            .await
    }

    /// Reset the session to its just-connected state (REIN)
    ///
    /// The server forgets the login and resets transfer parameters, so the
    /// session returns to unauthenticated ASCII mode. Log in again afterwards.
    pub async fn reinitialize(&mut self) -> Result<()> {
        self.execute(codes::SERVICE_READY, commands::REIN, "").await?;
        self.state = SessionState::Unauthenticated;
        self.transfer_type = TransferType::Ascii;
        Ok(())
    }

    /// End the FTP session (QUIT)
    ///
    /// The underlying connection stays open; release it with
    /// [`close`](Self::close) or by dropping the client.
    pub async fn quit(&mut self) -> Result<()> {
        debug!("Sending QUIT");
        self.execute(codes::SERVICE_CLOSING, commands::QUIT, "")
            .await?;
        self.mark_terminated();
        Ok(())
    }

    /// Rename `from` to `to` (RNFR then RNTO)
    ///
    /// RNTO is only sent if RNFR was answered with 350.
    pub async fn rename(&mut self, from: &str, to: &str) -> Result<()> {
        debug!("Renaming {} to {}", from, to);
        self.execute(codes::FILE_ACTION_PENDING, commands::RNFR, from)
            .await?;
        self.execute(codes::FILE_ACTION_COMPLETED, commands::RNTO, to)
            .await
    }

    /// Delete a file (DELE)
    pub async fn delete(&mut self, path: &str) -> Result<()> {
        debug!("Deleting {}", path);
        self.execute(codes::FILE_ACTION_COMPLETED, commands::DELE, path)
            .await
    }

    /// Create a directory (MKD) and return the path the server reports for it
    ///
    /// `path` may be relative to the working directory; the returned path is
    /// whatever the server put in quotes, which is usually absolute.
    ///
    /// # Errors
    ///
    /// Returns [`FtpError::Protocol`](crate::FtpError::Protocol) unless the
    /// server answers 257, or scoped to `"path extraction"` if the 257 reply
    /// carries no quoted path.
    pub async fn make_dir(&mut self, path: &str) -> Result<String> {
        debug!("Creating directory {}", path);
        let reply = self
            .execute_get_reply(codes::PATH_CREATED, commands::MKD, path)
            .await?;
        reply.path()
    }

    /// Remove a directory (RMD)
    pub async fn remove_dir(&mut self, path: &str) -> Result<()> {
        debug!("Removing directory {}", path);
        self.execute(codes::FILE_ACTION_COMPLETED, commands::RMD, path)
            .await
    }

    /// Return the working directory (PWD)
    pub async fn print_working_dir(&mut self) -> Result<String> {
        let reply = self
            .execute_get_reply(codes::PATH_CREATED, commands::PWD, "")
            .await?;
        reply.path()
    }

    /// Ping the server (NOOP)
    pub async fn noop(&mut self) -> Result<()> {
        self.execute(codes::COMMAND_OK, commands::NOOP, "").await
    }
}
