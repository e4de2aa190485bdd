//! Connection management for FTP client
//!
//! This module handles control connection establishment, socket tuning,
//! and server greeting validation.

use crate::config::ClientConfig;
use crate::error::{FtpError, Result};
use crate::logger::ControlLogger;
use crate::response::codes;
use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, warn};

use super::FtpClient;
use super::state::{SessionState, TransferType};

/// BufReader capacity for the control connection
///
/// Replies are short; the buffer only has to hold a few of them.
const BUFREADER_CAPACITY: usize = 8 * 1024;

/// Dial `addr` with TCP_NODELAY set, bounded by `connect_timeout`
///
/// Used for the control connection and for every passive data connection.
pub(super) async fn dial(addr: SocketAddr, connect_timeout: Duration) -> Result<TcpStream> {
    use socket2::{Domain, Protocol, Socket, Type};

    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };
    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP)).map_err(FtpError::Io)?;

    // Commands are small and strictly request/reply; don't let Nagle delay them
    if let Err(e) = socket.set_nodelay(true) {
        warn!("Failed to set TCP_NODELAY: {}", e);
    }

    // socket2::Socket::connect() is blocking, so run it on the blocking pool
    // and only switch to non-blocking mode once connected
    let tcp_stream = timeout(
        connect_timeout,
        tokio::task::spawn_blocking(move || -> std::io::Result<std::net::TcpStream> {
            socket.connect(&addr.into())?;
            socket.set_nonblocking(true)?;
            Ok(socket.into())
        }),
    )
    .await
    .map_err(|_| FtpError::Timeout)?
    .map_err(|e| FtpError::Io(std::io::Error::other(format!("Task join error: {}", e))))?
    .map_err(FtpError::Io)?;

    TcpStream::from_std(tcp_stream).map_err(FtpError::Io)
}

impl FtpClient<TcpStream> {
    /// Connect to the FTP server named in the config
    ///
    /// Dials the control connection and waits for the 220 greeting. Does not
    /// log in; call [`login`](Self::login) afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - [`FtpError::Io`] - Name resolution or TCP connection fails
    /// - [`FtpError::Timeout`] - Connection or greeting times out
    /// - [`FtpError::Protocol`] - Server greets with anything other than 220
    pub async fn connect(config: Arc<ClientConfig>) -> Result<Self> {
        Self::dial_and_greet(config, None).await
    }

    /// Connect to the FTP server, reporting all control traffic to `logger`
    ///
    /// The greeting itself is already reported.
    pub async fn connect_with_logger(
        config: Arc<ClientConfig>,
        logger: Arc<dyn ControlLogger>,
    ) -> Result<Self> {
        Self::dial_and_greet(config, Some(logger)).await
    }

    async fn dial_and_greet(
        config: Arc<ClientConfig>,
        logger: Option<Arc<dyn ControlLogger>>,
    ) -> Result<Self> {
        debug!("Connecting to FTP server {}", config.address());

        let socket_addr = config
            .address()
            .to_socket_addrs()
            .map_err(|e| {
                FtpError::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("Failed to resolve address: {}", e),
                ))
            })?
            .next()
            .ok_or_else(|| {
                FtpError::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "No address resolved",
                ))
            })?;

        let tcp_stream = dial(socket_addr, config.connect_timeout()).await?;
        Self::greet(tcp_stream, config, logger).await
    }
}

impl<S> FtpClient<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Use an already established stream as the control connection
    ///
    /// Useful when the caller needs control over how the stream is created
    /// (proxies, custom socket options). Waits for the 220 greeting.
    pub async fn connect_on(stream: S, config: Arc<ClientConfig>) -> Result<Self> {
        Self::greet(stream, config, None).await
    }

    /// Use an already established stream as the control connection,
    /// reporting all control traffic to `logger`
    pub async fn connect_on_with_logger(
        stream: S,
        config: Arc<ClientConfig>,
        logger: Arc<dyn ControlLogger>,
    ) -> Result<Self> {
        Self::greet(stream, config, Some(logger)).await
    }

    async fn greet(
        stream: S,
        config: Arc<ClientConfig>,
        logger: Option<Arc<dyn ControlLogger>>,
    ) -> Result<Self> {
        let mut client = Self {
            stream: BufReader::with_capacity(BUFREADER_CAPACITY, stream),
            config,
            logger,
            state: SessionState::Unauthenticated,
            transfer_type: TransferType::Ascii,
        };

        let greeting = client.read_reply().await?;
        debug!("Server greeting: {}", greeting.text());

        if greeting.code() != codes::SERVICE_READY {
            return Err(FtpError::protocol("connect", greeting.raw()));
        }

        Ok(client)
    }

    /// Shut down the control connection
    ///
    /// Does not send QUIT; call [`quit`](Self::quit) first for an orderly
    /// logout.
    pub async fn close(mut self) -> Result<()> {
        debug!("Closing control connection");
        self.mark_terminated();
        self.stream.get_mut().shutdown().await?;
        Ok(())
    }
}
