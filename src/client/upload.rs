//! File storage commands (STOR, STOU, APPE)

use super::FtpClient;
use super::state::TransferType;
use crate::commands;
use crate::error::Result;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::debug;

impl<S> FtpClient<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Upload `source` to `path`, replacing any existing file (STOR)
    ///
    /// The file is written in binary mode over a passive data connection.
    /// Returns the number of bytes sent. A failure reading `source` or
    /// writing the data connection ends the session.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use ftp_rs::{ClientConfig, FtpClient};
    /// # use std::sync::Arc;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let config = ClientConfig::standard("ftp.example.com");
    /// # let mut client = FtpClient::connect(Arc::new(config)).await?;
    /// let mut source: &[u8] = b"hello, world\n";
    /// client.upload("/incoming/hello.txt", &mut source).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn upload<R>(&mut self, path: &str, source: &mut R) -> Result<u64>
    where
        R: AsyncRead + Unpin + ?Sized,
    {
        self.store(commands::STOR, path, source).await
    }

    /// Upload `source` under a name chosen by the server (STOU)
    pub async fn upload_unique<R>(&mut self, source: &mut R) -> Result<u64>
    where
        R: AsyncRead + Unpin + ?Sized,
    {
        self.store(commands::STOU, "", source).await
    }

    /// Append `source` to the file at `path`, creating it if needed (APPE)
    pub async fn append<R>(&mut self, path: &str, source: &mut R) -> Result<u64>
    where
        R: AsyncRead + Unpin + ?Sized,
    {
        self.store(commands::APPE, path, source).await
    }

    async fn store<R>(&mut self, verb: &str, path: &str, source: &mut R) -> Result<u64>
    where
        R: AsyncRead + Unpin + ?Sized,
    {
        debug!("{} {}", verb, path);
        let mut data = self
            .begin_transfer(TransferType::Binary, verb, path)
            .await?;

        let copied = match tokio::io::copy(source, &mut data).await {
            Ok(copied) => copied,
            Err(e) => return Err(self.abandon_transfer(verb, e)),
        };

        self.finish_transfer(verb, data).await?;
        debug!("{} sent {} bytes", verb, copied);
        Ok(copied)
    }
}
