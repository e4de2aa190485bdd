//! Control connection diagnostics
//!
//! A [`ControlLogger`] observes every raw line sent and every raw reply
//! received on the control connection. It has no influence on protocol
//! behavior; attach one with
//! [`FtpClient::connect_with_logger`](crate::FtpClient::connect_with_logger).

use crate::commands;
use crate::error::FtpError;
use tracing::debug;

/// Observer for raw control connection traffic
///
/// `sent` is called after a command line has been written (or the write
/// failed); `received` after a reply has been framed (or reading failed).
/// On failure the message holds whatever bytes were available and is not
/// meaningful on its own.
pub trait ControlLogger: Send + Sync {
    /// A command line was written to the control connection
    fn sent(&self, msg: &[u8], err: Option<&std::io::Error>);

    /// A reply was read from the control connection
    fn received(&self, reply: &[u8], err: Option<&FtpError>);
}

/// [`ControlLogger`] that emits `tracing` events at debug level
///
/// Lines are rendered as `---> CMD` and `<--- reply`. PASS arguments are
/// masked so clear-text passwords never reach the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl ControlLogger for TracingLogger {
    fn sent(&self, msg: &[u8], err: Option<&std::io::Error>) {
        match err {
            Some(e) => debug!("---> ERROR: {}", e),
            None => debug!("---> {}", commands::redact(&String::from_utf8_lossy(msg))),
        }
    }

    fn received(&self, reply: &[u8], err: Option<&FtpError>) {
        match err {
            Some(e) => debug!("<--- ERROR: {}", e),
            None => debug!("<--- {}", String::from_utf8_lossy(reply).trim_end()),
        }
    }
}
