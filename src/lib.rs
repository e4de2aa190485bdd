#![doc = include_str!("../README.md")]

mod client;
/// FTP command verbs, reply framing and reply parsers
pub mod commands;
mod config;
mod error;
/// Observers of raw control connection traffic
pub mod logger;
mod response;

pub use client::{FtpClient, TransferType};
pub use config::{ClientConfig, DEFAULT_PORT};
pub use error::{FtpError, Result};
pub use logger::{ControlLogger, TracingLogger};
pub use response::{Reply, ReplyCode, StatusKind, codes};
