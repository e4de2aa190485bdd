//! Server information and control commands
//!
//! This module implements HELP, STAT, SYST (RFC 959 §4.1.3) and ABOR.

use super::FtpClient;
use crate::commands;
use crate::error::{FtpError, Result};
use crate::response::{StatusKind, codes};
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::debug;

impl<S> FtpClient<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Request general help text from the server (HELP)
    ///
    /// The returned text has reply codes and the final line terminator
    /// removed.
    pub async fn help(&mut self) -> Result<String> {
        self.help_about("").await
    }

    /// Request help text about a topic, usually a command name (HELP topic)
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use ftp_rs::{ClientConfig, FtpClient};
    /// # use std::sync::Arc;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let config = ClientConfig::standard("ftp.example.com");
    /// # let mut client = FtpClient::connect(Arc::new(config)).await?;
    /// let text = client.help_about("STOU").await?;
    /// println!("{}", text);
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`FtpError::Protocol`] unless the server answers 211 or 214.
    pub async fn help_about(&mut self, topic: &str) -> Result<String> {
        let reply = self.send_and_receive(commands::HELP, topic).await?;
        let code = reply.code();
        if code == codes::SYSTEM_STATUS || code == codes::HELP_MESSAGE {
            Ok(reply.text())
        } else {
            Err(FtpError::protocol(commands::HELP, reply.raw()))
        }
    }

    /// Request general status of the server process (STAT)
    pub async fn status(&mut self) -> Result<(StatusKind, String)> {
        self.status_of("").await
    }

    /// Request status of a file or directory (STAT path)
    ///
    /// For a directory most servers answer with a listing, like
    /// [`list_in`](Self::list_in) but over the control connection.
    ///
    /// # Errors
    ///
    /// Returns [`FtpError::Protocol`] unless the server answers 211, 212 or 213.
    pub async fn status_of(&mut self, path: &str) -> Result<(StatusKind, String)> {
        let reply = self.send_and_receive(commands::STAT, path).await?;
        match StatusKind::from_code(reply.code()) {
            Some(kind) => Ok((kind, reply.text())),
            None => Err(FtpError::protocol(commands::STAT, reply.raw())),
        }
    }

    /// Describe the operating system the server runs on (SYST)
    pub async fn system(&mut self) -> Result<String> {
        let reply = self
            .execute_get_reply(codes::SYSTEM_NAME, commands::SYST, "")
            .await?;
        Ok(reply.text())
    }

    /// Abort the transfer in progress, if any (ABOR)
    ///
    /// Succeeds when the server reports no transfer in progress (225) or a
    /// closed data connection (226). A server interrupting a running transfer
    /// first answers 426 and then sends a second reply, which must be 226.
    pub async fn abort(&mut self) -> Result<()> {
        debug!("Aborting transfer");
        let reply = self.send_and_receive(commands::ABOR, "").await?;
        let code = reply.code();
        if code == codes::NO_TRANSFER_IN_PROGRESS || code == codes::CLOSING_DATA_CONNECTION {
            return Ok(());
        }
        if code != codes::TRANSFER_ABORTED {
            return Err(FtpError::protocol(commands::ABOR, reply.raw()));
        }

        let reply = self.read_reply().await?;
        if reply.code() == codes::CLOSING_DATA_CONNECTION {
            Ok(())
        } else {
            Err(FtpError::protocol(commands::ABOR, reply.raw()))
        }
    }
}
