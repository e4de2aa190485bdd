//! Low-level I/O operations for FTP control connection communication
//!
//! This module provides the command/reply engine used by all client
//! operations:
//! - Command transmission with logging
//! - Reply framing (single-line and multi-line) with timeout
//! - Exact reply-code validation

use super::FtpClient;
use crate::commands;
use crate::error::{FtpError, Result};
use crate::response::{Reply, ReplyCode};
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt,
};
use tokio::time::timeout;
use tracing::trace;

const REPLY_INITIAL_CAPACITY: usize = 512;
/// Maximum size of a single reply to prevent OOM from malicious/broken servers (1 MB)
const MAX_REPLY_SIZE: usize = 1024 * 1024;

/// Read from `reader` into `buf` until `buf` holds a complete reply
///
/// Reads are line-granular so that bytes belonging to a following reply are
/// never consumed. Completeness is tested after every read. At most
/// [`MAX_REPLY_SIZE`] bytes are buffered, even within a single line.
pub(super) async fn read_reply_into<R>(reader: &mut R, buf: &mut Vec<u8>) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        let remaining = MAX_REPLY_SIZE.saturating_sub(buf.len());
        if remaining == 0 {
            return Err(FtpError::InvalidResponse(format!(
                "Reply exceeds maximum size of {} bytes",
                MAX_REPLY_SIZE
            )));
        }

        let n = (&mut *reader)
            .take(remaining as u64)
            .read_until(b'\n', buf)
            .await?;
        if n == 0 {
            return Err(FtpError::ConnectionClosed);
        }
        if commands::is_complete_response(buf) {
            return Ok(());
        }
    }
}

impl<S> FtpClient<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    fn ensure_open(&self) -> Result<()> {
        if self.is_terminated() {
            return Err(FtpError::ConnectionClosed);
        }
        Ok(())
    }

    /// Send `verb` (and `arg`, unless empty) to the server
    pub(super) async fn send_command(&mut self, verb: &str, arg: &str) -> Result<()> {
        self.ensure_open()?;

        let line = commands::command_line(verb, arg);
        trace!("Sending command: {}", commands::redact(&line));

        let stream = self.stream.get_mut();
        let result = match stream.write_all(line.as_bytes()).await {
            Ok(()) => stream.flush().await,
            Err(e) => Err(e),
        };

        if let Some(logger) = &self.logger {
            logger.sent(line.as_bytes(), result.as_ref().err());
        }

        if let Err(e) = result {
            self.mark_terminated();
            return Err(e.into());
        }
        Ok(())
    }

    /// Read one complete reply
    ///
    /// Any failure here leaves the control stream mid-reply, so the session
    /// is marked terminated.
    pub(super) async fn read_reply(&mut self) -> Result<Reply> {
        self.ensure_open()?;

        let mut buf = Vec::with_capacity(REPLY_INITIAL_CAPACITY);
        let result = timeout(
            self.config.reply_timeout(),
            read_reply_into(&mut self.stream, &mut buf),
        )
        .await
        .unwrap_or(Err(FtpError::Timeout));

        if let Some(logger) = &self.logger {
            logger.received(&buf, result.as_ref().err());
        }

        match result {
            Ok(()) => {
                let reply = Reply::new(buf);
                trace!("Received: {}", reply.to_string().trim_end());
                Ok(reply)
            }
            Err(e) => {
                self.mark_terminated();
                Err(e)
            }
        }
    }

    /// Send a command and read its reply without checking the code
    pub(super) async fn send_and_receive(&mut self, verb: &str, arg: &str) -> Result<Reply> {
        self.send_command(verb, arg).await?;
        self.read_reply().await
    }

    /// Send a command and require exactly `expected` as the reply code
    pub(super) async fn execute(&mut self, expected: ReplyCode, verb: &str, arg: &str) -> Result<()> {
        self.execute_get_reply(expected, verb, arg).await.map(|_| ())
    }

    /// Send a command, require exactly `expected`, and hand back the reply
    /// for post-processing
    ///
    /// Any other code, including other 2xx codes, is a protocol error
    /// carrying `verb` and the full reply.
    pub(super) async fn execute_get_reply(
        &mut self,
        expected: ReplyCode,
        verb: &str,
        arg: &str,
    ) -> Result<Reply> {
        let reply = self.send_and_receive(verb, arg).await?;
        if reply.code() == expected {
            Ok(reply)
        } else {
            Err(FtpError::protocol(verb, reply.raw()))
        }
    }
}
