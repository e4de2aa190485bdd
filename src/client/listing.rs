//! Directory listing commands (LIST, NLST)
//!
//! Listings travel over a passive data connection in ASCII mode.

use super::FtpClient;
use super::state::TransferType;
use crate::commands;
use crate::error::Result;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tracing::debug;

impl<S> FtpClient<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Detailed listing of the working directory (LIST)
    ///
    /// The format depends on the server, so the text is returned as sent.
    pub async fn list(&mut self) -> Result<String> {
        self.list_in("").await
    }

    /// Detailed listing of a file or directory (LIST path)
    pub async fn list_in(&mut self, path: &str) -> Result<String> {
        self.read_list_data(commands::LIST, path).await
    }

    /// Names of the files in the working directory (NLST)
    pub async fn name_list(&mut self) -> Result<Vec<String>> {
        self.name_list_in("").await
    }

    /// Names of the files in a directory (NLST path)
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use ftp_rs::{ClientConfig, FtpClient};
    /// # use std::sync::Arc;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let config = ClientConfig::standard("ftp.example.com");
    /// # let mut client = FtpClient::connect(Arc::new(config)).await?;
    /// for name in client.name_list_in("/pub").await? {
    ///     println!("{}", name);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn name_list_in(&mut self, path: &str) -> Result<Vec<String>> {
        let data = self.read_list_data(commands::NLST, path).await?;
        let names = commands::parse_name_list(&data);
        debug!("NLST returned {} names", names.len());
        Ok(names)
    }

    async fn read_list_data(&mut self, verb: &str, path: &str) -> Result<String> {
        let mut data = self
            .begin_transfer(TransferType::Ascii, verb, path)
            .await?;

        let mut bytes = Vec::new();
        if let Err(e) = data.read_to_end(&mut bytes).await {
            return Err(self.abandon_transfer(verb, e));
        }

        self.finish_transfer(verb, data).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
