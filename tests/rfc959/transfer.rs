//! RFC 959 Section 4.1.3 - RETR, STOR, STOU, APPE and TYPE
//!
//! Reference: https://datatracker.ietf.org/doc/html/rfc959#section-4.1.3
//!
//! File transfers run in binary mode over a passive data connection. The
//! server answers the transfer command (1xx/2xx), moves the bytes, and then
//! confirms or reports failure with a second reply.

use crate::common;
use ftp_rs::{FtpError, TransferType};
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, ReadBuf};

/// Sink whose every write fails
struct FullDisk;

impl AsyncWrite for FullDisk {
    fn poll_write(self: Pin<&mut Self>, _: &mut Context<'_>, _: &[u8]) -> Poll<io::Result<usize>> {
        Poll::Ready(Err(io::Error::other("disk full")))
    }

    fn poll_flush(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

/// Source whose every read fails
struct UnreadableFile;

impl AsyncRead for UnreadableFile {
    fn poll_read(self: Pin<&mut Self>, _: &mut Context<'_>, _: &mut ReadBuf<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Err(io::Error::other("read error")))
    }
}

#[tokio::test]
async fn test_download() {
    let (mut client, mut server) = common::session().await;
    let mut sink = Vec::new();

    let (result, ()) = tokio::join!(client.download("README", &mut sink), async {
        server.expect("TYPE I").await;
        server.reply("200 Type set to I.").await;
        let listener = server.passive().await;
        server.expect("RETR README").await;
        server.reply("150 Opening BINARY mode data connection.").await;
        common::serve_data(&listener, b"\x00\x01binary\r\ncontent\xff").await;
        server.reply("226 Transfer complete.").await;
    });

    assert_eq!(result.unwrap(), 18);
    assert_eq!(sink, b"\x00\x01binary\r\ncontent\xff");
    assert_eq!(client.transfer_type(), TransferType::Binary);
}

#[tokio::test]
async fn test_download_failing_final_reply_is_failure() {
    let (mut client, mut server) = common::session().await;
    let mut sink = Vec::new();

    let (result, ()) = tokio::join!(client.download("big.iso", &mut sink), async {
        server.expect("TYPE I").await;
        server.reply("200 Type set to I.").await;
        let listener = server.passive().await;
        server.expect("RETR big.iso").await;
        server.reply("150 Opening BINARY mode data connection.").await;
        common::serve_data(&listener, b"partial").await;
        server.reply("451 Requested action aborted: local error.").await;
    });

    match result.unwrap_err() {
        FtpError::Protocol { command, reply } => {
            assert_eq!(command, "RETR");
            assert!(reply.starts_with("451"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    // Bytes already delivered stay in the sink
    assert_eq!(sink, b"partial");
    assert!(!client.is_terminated());
}

#[tokio::test]
async fn test_download_rejected_before_data() {
    let (mut client, mut server) = common::session().await;
    let mut sink = Vec::new();

    let (result, ()) = tokio::join!(client.download("missing", &mut sink), async {
        server.expect("TYPE I").await;
        server.reply("200 Type set to I.").await;
        let _listener = server.passive().await;
        server.expect("RETR missing").await;
        server.reply("550 File not found.").await;
    });

    match result.unwrap_err() {
        FtpError::Protocol { command, .. } => assert_eq!(command, "RETR"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_redundant_type_is_elided() {
    let (mut client, mut server) = common::session().await;
    let mut first = Vec::new();
    let mut second = Vec::new();

    let script = async {
        server.expect("TYPE I").await;
        server.reply("200 Type set to I.").await;
        let listener = server.passive().await;
        server.expect("RETR one").await;
        server.reply("150 Opening.").await;
        common::serve_data(&listener, b"1").await;
        server.reply("226 Done.").await;

        // Second download goes straight to PASV
        let listener = server.passive().await;
        server.expect("RETR two").await;
        server.reply("150 Opening.").await;
        common::serve_data(&listener, b"22").await;
        server.reply("226 Done.").await;
    };
    let calls = async {
        client.download("one", &mut first).await?;
        client.download("two", &mut second).await
    };

    let (result, ()) = tokio::join!(calls, script);
    assert_eq!(result.unwrap(), 2);
    assert_eq!(first, b"1");
    assert_eq!(second, b"22");
}

#[tokio::test]
async fn test_upload() {
    let (mut client, mut server) = common::session().await;
    let mut source: &[u8] = b"uploaded contents\n";

    let (result, received) = tokio::join!(client.upload("incoming/file.txt", &mut source), async {
        server.expect("TYPE I").await;
        server.reply("200 Type set to I.").await;
        let listener = server.passive().await;
        server.expect("STOR incoming/file.txt").await;
        let conn = common::accept_data(&listener).await;
        server.reply("150 Ok to send data.").await;
        let received = common::receive_data(conn).await;
        server.reply("226 Transfer complete.").await;
        received
    });

    assert_eq!(result.unwrap(), 18);
    assert_eq!(received, b"uploaded contents\n");
}

#[tokio::test]
async fn test_upload_unique_sends_no_argument() {
    let (mut client, mut server) = common::session().await;
    let mut source: &[u8] = b"data";

    let (result, received) = tokio::join!(client.upload_unique(&mut source), async {
        server.expect("TYPE I").await;
        server.reply("200 Type set to I.").await;
        let listener = server.passive().await;
        server.expect("STOU").await;
        let conn = common::accept_data(&listener).await;
        server.reply("150 FILE: file.0001").await;
        let received = common::receive_data(conn).await;
        server.reply("226 Transfer complete.").await;
        received
    });

    assert_eq!(result.unwrap(), 4);
    assert_eq!(received, b"data");
}

#[tokio::test]
async fn test_append() {
    let (mut client, mut server) = common::session().await;
    let mut source: &[u8] = b"more lines\n";

    let (result, received) = tokio::join!(client.append("log.txt", &mut source), async {
        server.expect("TYPE I").await;
        server.reply("200 Type set to I.").await;
        let listener = server.passive().await;
        server.expect("APPE log.txt").await;
        let conn = common::accept_data(&listener).await;
        server.reply("150 Ok to send data.").await;
        let received = common::receive_data(conn).await;
        server.reply("226 Transfer complete.").await;
        received
    });

    assert_eq!(result.unwrap(), 11);
    assert_eq!(received, b"more lines\n");
}

#[tokio::test]
async fn test_passive_refused() {
    let (mut client, mut server) = common::session().await;
    let mut sink = Vec::new();

    let (result, ()) = tokio::join!(client.download("file", &mut sink), async {
        server.expect("TYPE I").await;
        server.reply("200 Type set to I.").await;
        server.expect("PASV").await;
        server.reply("425 Can't open data connection.").await;
    });

    match result.unwrap_err() {
        FtpError::Protocol { command, .. } => assert_eq!(command, "PASV"),
        other => panic!("unexpected error: {other:?}"),
    }
    drop(client);
    assert_eq!(server.remaining().await, "");
}

#[tokio::test]
async fn test_rejected_type_stops_transfer() {
    let (mut client, mut server) = common::session().await;
    let mut sink = Vec::new();

    let (result, ()) = tokio::join!(client.download("file", &mut sink), async {
        server.expect("TYPE I").await;
        server.reply("504 Command not implemented for that parameter.").await;
    });

    match result.unwrap_err() {
        FtpError::Protocol { command, .. } => assert_eq!(command, "TYPE"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(client.transfer_type(), TransferType::Ascii);
    drop(client);
    assert_eq!(server.remaining().await, "");
}

#[tokio::test]
async fn test_sink_failure_terminates_session() {
    let (mut client, mut server) = common::session().await;
    let mut sink = FullDisk;

    let (result, ()) = tokio::join!(client.download("file.bin", &mut sink), async {
        server.expect("TYPE I").await;
        server.reply("200 Type set to I.").await;
        let listener = server.passive().await;
        server.expect("RETR file.bin").await;
        server.reply("150 Opening BINARY mode data connection.").await;
        let mut conn = common::accept_data(&listener).await;
        // The client may reset the connection once its sink fails
        let _ = conn.write_all(b"some file contents").await;
        drop(conn);
        server.reply("426 Connection closed; transfer aborted.").await;
    });

    let err = result.unwrap_err();
    assert!(matches!(err, FtpError::Io(_)));
    assert!(err.is_transport());
    assert!(client.is_terminated());

    // The pending 426 is never handed to a later command
    assert!(matches!(client.noop().await, Err(FtpError::ConnectionClosed)));
    drop(client);
    assert_eq!(server.remaining().await, "");
}

#[tokio::test]
async fn test_source_failure_terminates_session() {
    let (mut client, mut server) = common::session().await;
    let mut source = UnreadableFile;

    let (result, ()) = tokio::join!(client.upload("file.bin", &mut source), async {
        server.expect("TYPE I").await;
        server.reply("200 Type set to I.").await;
        let listener = server.passive().await;
        server.expect("STOR file.bin").await;
        let _conn = common::accept_data(&listener).await;
        server.reply("150 Ok to send data.").await;
    });

    assert!(matches!(result, Err(FtpError::Io(_))));
    assert!(client.is_terminated());
}

#[tokio::test]
async fn test_upload_failing_final_reply_is_failure() {
    let (mut client, mut server) = common::session().await;
    let mut source: &[u8] = b"every byte arrives";

    let (result, received) = tokio::join!(client.upload("quota/file.txt", &mut source), async {
        server.expect("TYPE I").await;
        server.reply("200 Type set to I.").await;
        let listener = server.passive().await;
        server.expect("STOR quota/file.txt").await;
        let conn = common::accept_data(&listener).await;
        server.reply("150 Ok to send data.").await;
        let received = common::receive_data(conn).await;
        server.reply("451 Requested action aborted: local error in processing.").await;
        received
    });

    assert_eq!(received, b"every byte arrives");
    match result.unwrap_err() {
        FtpError::Protocol { command, reply } => {
            assert_eq!(command, "STOR");
            assert!(reply.starts_with("451"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    // A rejected confirmation is a protocol error; the session goes on
    assert!(!client.is_terminated());
}
