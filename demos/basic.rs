//! Basic FTP client example
//!
//! Run with: cargo run --example basic
//!
//! Set RUST_LOG=debug to see the control connection traffic.

use ftp_rs::{ClientConfig, FtpClient, TracingLogger};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let host = std::env::var("FTP_HOST").unwrap_or_else(|_| "ftp.example.com".to_string());
    let port = std::env::var("FTP_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(ftp_rs::DEFAULT_PORT);
    let user = std::env::var("FTP_USER").unwrap_or_else(|_| "anonymous".to_string());
    let pass = std::env::var("FTP_PASS").unwrap_or_else(|_| "guest@example.com".to_string());

    let config = ClientConfig::new(host, port);
    println!("Connecting to {}...", config.address());

    let mut client = FtpClient::connect_with_logger(Arc::new(config), Arc::new(TracingLogger)).await?;
    println!("Connected!");

    client.login(&user, &pass).await?;
    println!("Logged in as {}", user);

    println!("System: {}", client.system().await?);
    println!("Working directory: {}", client.print_working_dir().await?);

    let names = client.name_list().await?;
    println!("\n{} entries:", names.len());
    for name in names.iter().take(10) {
        println!("  {}", name);
    }

    // Download the first entry that looks like a regular file
    if let Some(name) = names.iter().find(|n| n.contains('.')) {
        let mut contents = Vec::new();
        match client.download(name, &mut contents).await {
            Ok(bytes) => println!("\nDownloaded {} ({} bytes)", name, bytes),
            Err(e) => println!("\nCould not download {}: {}", name, e),
        }
    }

    client.quit().await?;
    println!("\nDisconnected");

    Ok(())
}
