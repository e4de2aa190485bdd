//! Passive-mode data connection lifecycle
//!
//! Every data-bearing command (LIST, NLST, RETR, STOR, STOU, APPE) runs the
//! same sequence:
//! 1. TYPE, if the representation has to change
//! 2. PASV, then dial the address from the 227 reply
//! 3. the data command on the control connection, answered with 1xx/2xx
//! 4. the byte copy (done by the caller)
//! 5. closing the data connection, which tells the server we are done
//! 6. a second reply confirming the transfer
//!
//! Steps 2-3 live in [`FtpClient::begin_transfer`], steps 5-6 in
//! [`FtpClient::finish_transfer`]. The data connection is owned by the
//! operation and dropped on every exit path.
//!
//! An I/O failure in steps 4-5 leaves the confirmation reply of step 6 unread
//! on the control connection, so the session is terminated.

use super::FtpClient;
use super::connection::dial;
use super::state::TransferType;
use crate::commands;
use crate::error::{FtpError, Result};
use crate::response::codes;
use std::net::SocketAddr;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, warn};

/// Close a data connection, treating an already vanished peer as closed
async fn close_data_connection(mut data: TcpStream) -> std::io::Result<()> {
    match data.shutdown().await {
        Err(e) if e.kind() != std::io::ErrorKind::NotConnected => Err(e),
        _ => Ok(()),
    }
}

impl<S> FtpClient<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Select the representation type for following transfers (TYPE)
    ///
    /// Nothing is sent if `transfer_type` is already in effect. The session
    /// only records the new type once the server accepted it with 200.
    pub async fn set_transfer_type(&mut self, transfer_type: TransferType) -> Result<()> {
        if self.transfer_type == transfer_type {
            return Ok(());
        }
        self.execute(codes::COMMAND_OK, commands::TYPE, transfer_type.symbol())
            .await?;
        self.transfer_type = transfer_type;
        Ok(())
    }

    /// Negotiate passive mode (PASV) and dial the announced address
    async fn enter_passive_mode(&mut self) -> Result<TcpStream> {
        let reply = self
            .execute_get_reply(codes::ENTERING_PASSIVE_MODE, commands::PASV, "")
            .await?;
        let addr = reply.passive_address()?;
        debug!("Opening data connection to {}", addr);
        dial(SocketAddr::V4(addr), self.config.connect_timeout()).await
    }

    /// Open a data connection and issue `verb` on the control connection
    ///
    /// Returns the open data connection once the server accepted the command
    /// with a 1xx or 2xx reply. On any failure the data connection is closed
    /// before returning.
    pub(super) async fn begin_transfer(
        &mut self,
        transfer_type: TransferType,
        verb: &str,
        path: &str,
    ) -> Result<TcpStream> {
        self.set_transfer_type(transfer_type).await?;
        let data = self.enter_passive_mode().await?;

        let reply = self.send_and_receive(verb, path).await?;
        if !reply.is_success() {
            drop(data);
            return Err(FtpError::protocol(verb, reply.raw()));
        }
        Ok(data)
    }

    /// Close the data connection and wait for the server to confirm `verb`
    ///
    /// A failing confirmation makes the whole transfer fail, even though all
    /// bytes were copied.
    pub(super) async fn finish_transfer(&mut self, verb: &str, data: TcpStream) -> Result<()> {
        if let Err(e) = close_data_connection(data).await {
            return Err(self.abandon_transfer(verb, e));
        }

        let reply = self.read_reply().await?;
        if !reply.is_success() {
            return Err(FtpError::protocol(verb, reply.raw()));
        }
        debug!("{} complete: {}", verb, reply.text());
        Ok(())
    }

    /// Give up on a transfer whose data phase failed with `err`
    ///
    /// The server's confirmation for `verb` is still pending, so the next
    /// reply on the control connection would be misattributed. The session is
    /// terminated and `err` is returned for propagation.
    pub(super) fn abandon_transfer(&mut self, verb: &str, err: std::io::Error) -> FtpError {
        warn!("{} failed during data transfer: {}", verb, err);
        self.mark_terminated();
        err.into()
    }
}
