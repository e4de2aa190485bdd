//! FTP client implementation with passive-mode data transfers

mod auth;
mod connection;
mod download;
mod io;
mod listing;
mod navigation;
mod server;
mod state;
mod transfer;
mod upload;

pub use state::TransferType;

use crate::config::ClientConfig;
use crate::logger::ControlLogger;
use state::SessionState;
use std::sync::Arc;
use tokio::io::BufReader;
use tokio::net::TcpStream;
use tracing::debug;

/// Async FTP client session
///
/// One value owns one control connection. Operations take `&mut self`, so a
/// session can never have two commands in flight: the control connection is
/// a single ordered byte stream and interleaving would corrupt reply framing.
///
/// The control connection is usually a [`TcpStream`] dialed by
/// [`connect`](FtpClient::connect), but any async byte stream can be adopted
/// with [`connect_on`](FtpClient::connect_on).
///
/// # Example
///
/// ```no_run
/// use ftp_rs::{ClientConfig, FtpClient};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ClientConfig::standard("ftp.example.com");
/// let mut client = FtpClient::connect(Arc::new(config)).await?;
/// client.login("anonymous", "guest@example.com").await?;
///
/// for name in client.name_list().await? {
///     println!("{}", name);
/// }
///
/// let mut contents = Vec::new();
/// client.download("README", &mut contents).await?;
/// client.quit().await?;
/// # Ok(())
/// # }
/// ```
#[must_use]
pub struct FtpClient<S = TcpStream> {
    /// Control connection (both reader and writer)
    stream: BufReader<S>,
    /// Client configuration
    config: Arc<ClientConfig>,
    /// Optional observer of raw control traffic
    logger: Option<Arc<dyn ControlLogger>>,
    /// Authentication / liveness state
    state: SessionState,
    /// Representation type last negotiated with TYPE
    transfer_type: TransferType,
}

impl<S> FtpClient<S> {
    /// Check if the client has logged in successfully
    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated)
    }

    /// Check if the session has ended (QUIT accepted or transport failure)
    ///
    /// A terminated session refuses further commands.
    pub fn is_terminated(&self) -> bool {
        matches!(self.state, SessionState::Terminated)
    }

    /// Representation type currently in effect for data transfers
    pub fn transfer_type(&self) -> TransferType {
        self.transfer_type
    }

    /// Client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn mark_terminated(&mut self) {
        if !self.is_terminated() {
            debug!("FTP session terminated");
        }
        self.state = SessionState::Terminated;
    }
}

impl<S> Drop for FtpClient<S> {
    fn drop(&mut self) {
        debug!("FtpClient dropped");
    }
}
