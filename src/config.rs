//! FTP client configuration

use std::time::Duration;

/// Default FTP control port
pub const DEFAULT_PORT: u16 = 21;

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_REPLY_TIMEOUT_SECS: u64 = 60;

/// FTP client configuration
///
/// Contains everything needed to reach an FTP server. Credentials are not
/// part of the configuration; pass them to
/// [`FtpClient::login`](crate::FtpClient::login).
///
/// # Example
///
/// ```
/// use ftp_rs::ClientConfig;
///
/// // Standard control port (21)
/// let config = ClientConfig::standard("ftp.example.com");
///
/// // Or construct manually
/// let config = ClientConfig {
///     host: "ftp.example.com".to_string(),
///     port: 2121,
///     connect_timeout_secs: 10,
///     reply_timeout_secs: 30,
/// };
/// ```
#[must_use]
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClientConfig {
    /// Server hostname (e.g., "ftp.example.com")
    pub host: String,

    /// Control connection port (typically 21)
    pub port: u16,

    /// Time allowed for dialing the control connection and each data connection
    #[cfg_attr(feature = "serde", serde(default = "default_connect_timeout_secs"))]
    pub connect_timeout_secs: u64,

    /// Time allowed for a single complete reply to arrive on the control connection
    #[cfg_attr(feature = "serde", serde(default = "default_reply_timeout_secs"))]
    pub reply_timeout_secs: u64,
}

#[cfg(feature = "serde")]
fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

#[cfg(feature = "serde")]
fn default_reply_timeout_secs() -> u64 {
    DEFAULT_REPLY_TIMEOUT_SECS
}

impl ClientConfig {
    /// Create a new configuration with default timeouts
    ///
    /// # Arguments
    ///
    /// * `host` - Server hostname
    /// * `port` - Control connection port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            reply_timeout_secs: DEFAULT_REPLY_TIMEOUT_SECS,
        }
    }

    /// Create a configuration for the standard control port (21)
    pub fn standard(host: impl Into<String>) -> Self {
        Self::new(host, DEFAULT_PORT)
    }

    /// `host:port` of the control connection
    ///
    /// IPv6 literals are bracketed (`[::1]:21`) so the result resolves.
    pub fn address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    pub(crate) fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub(crate) fn reply_timeout(&self) -> Duration {
        Duration::from_secs(self.reply_timeout_secs)
    }
}
