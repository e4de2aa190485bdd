//! FTP authentication support (USER/PASS)

use super::FtpClient;
use super::state::SessionState;
use crate::commands;
use crate::error::{FtpError, Result};
use crate::response::codes;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::debug;

impl<S> FtpClient<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Log in with the given user and, if the server asks for it, password
    ///
    /// Sends USER. If the server answers 230 the login is complete and no
    /// password is sent; if it answers 331 PASS follows and must be answered
    /// with 230. Pass an empty password for servers that never ask for one.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use ftp_rs::{ClientConfig, FtpClient};
    /// # use std::sync::Arc;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = ClientConfig::standard("ftp.example.com");
    /// let mut client = FtpClient::connect(Arc::new(config)).await?;
    /// client.login("anonymous", "guest@example.com").await?;
    /// assert!(client.is_authenticated());
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - [`FtpError::AuthFailed`] - USER answered with neither 230 nor 331
    /// - [`FtpError::Protocol`] - PASS answered with anything other than 230
    /// - [`FtpError::ConnectionClosed`] - Server closed the connection
    /// - [`FtpError::Timeout`] - Server did not respond in time
    pub async fn login(&mut self, user: &str, password: &str) -> Result<()> {
        debug!("Logging in as {}", user);

        let reply = self.send_and_receive(commands::USER, user).await?;

        if reply.code() == codes::NEED_PASSWORD {
            self.execute(codes::USER_LOGGED_IN, commands::PASS, password)
                .await?;
        } else if reply.code() != codes::USER_LOGGED_IN {
            return Err(FtpError::AuthFailed(reply.to_string()));
        }

        self.state = SessionState::Authenticated;
        debug!("Login successful");
        Ok(())
    }
}
