//! RFC 959 Section 4.1.3 - ABOR
//!
//! Reference: https://datatracker.ietf.org/doc/html/rfc959#section-4.1.3
//!
//! With no transfer running the server answers 225 or 226. Interrupting a
//! transfer produces 426 followed by a second reply, which must be 226.

use crate::common;
use ftp_rs::FtpError;

#[tokio::test]
async fn test_abort_nothing_in_progress() {
    let (mut client, mut server) = common::session().await;

    let (result, ()) = tokio::join!(client.abort(), async {
        server.expect("ABOR").await;
        server.reply("225 No transfer to ABOR.").await;
    });

    result.unwrap();
}

#[tokio::test]
async fn test_abort_data_connection_closed() {
    let (mut client, mut server) = common::session().await;

    let (result, ()) = tokio::join!(client.abort(), async {
        server.expect("ABOR").await;
        server.reply("226 Closing data connection.").await;
    });

    result.unwrap();
}

#[tokio::test]
async fn test_abort_426_then_226() {
    let (mut client, mut server) = common::session().await;

    let (result, ()) = tokio::join!(client.abort(), async {
        server.expect("ABOR").await;
        server.reply("426 Connection closed; transfer aborted.").await;
        server.reply("226 Abort successful.").await;
    });

    result.unwrap();

    // Both replies were consumed; the next command gets its own reply
    let (result, ()) = tokio::join!(client.noop(), async {
        server.expect("NOOP").await;
        server.reply("200 Command okay.").await;
    });
    result.unwrap();
}

#[tokio::test]
async fn test_abort_426_then_225_is_failure() {
    let (mut client, mut server) = common::session().await;

    let (result, ()) = tokio::join!(client.abort(), async {
        server.expect("ABOR").await;
        server.reply("426 Connection closed; transfer aborted.").await;
        server.reply("225 Data connection open.").await;
    });

    match result.unwrap_err() {
        FtpError::Protocol { command, reply } => {
            assert_eq!(command, "ABOR");
            assert!(reply.starts_with("225"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_abort_unexpected_code() {
    let (mut client, mut server) = common::session().await;

    let (result, ()) = tokio::join!(client.abort(), async {
        server.expect("ABOR").await;
        server.reply("500 Syntax error.").await;
    });

    assert!(matches!(result, Err(FtpError::Protocol { .. })));
}
