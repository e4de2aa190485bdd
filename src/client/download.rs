//! File retrieval (RETR)

use super::FtpClient;
use super::state::TransferType;
use crate::commands;
use crate::error::Result;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tracing::debug;

async fn copy_to_sink<R, W>(data: &mut R, sink: &mut W) -> std::io::Result<u64>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + ?Sized,
{
    let copied = tokio::io::copy(data, sink).await?;
    sink.flush().await?;
    Ok(copied)
}

impl<S> FtpClient<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Download the file at `path` into `sink` (RETR)
    ///
    /// The file is read in binary mode over a passive data connection until
    /// the server closes it. Returns the number of bytes written to `sink`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use ftp_rs::{ClientConfig, FtpClient};
    /// # use std::sync::Arc;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let config = ClientConfig::standard("ftp.example.com");
    /// # let mut client = FtpClient::connect(Arc::new(config)).await?;
    /// let mut file = tokio::fs::File::create("README").await?;
    /// let bytes = client.download("/pub/README", &mut file).await?;
    /// println!("Downloaded {} bytes", bytes);
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Fails if any step of the transfer fails, including the final
    /// confirmation reply. Bytes already written to `sink` stay there. A
    /// failure while reading the data connection or writing `sink` ends the
    /// session.
    pub async fn download<W>(&mut self, path: &str, sink: &mut W) -> Result<u64>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        debug!("Downloading {}", path);
        let mut data = self
            .begin_transfer(TransferType::Binary, commands::RETR, path)
            .await?;

        let copied = match copy_to_sink(&mut data, sink).await {
            Ok(copied) => copied,
            Err(e) => return Err(self.abandon_transfer(commands::RETR, e)),
        };

        self.finish_transfer(commands::RETR, data).await?;
        debug!("Downloaded {} bytes from {}", copied, path);
        Ok(copied)
    }
}
