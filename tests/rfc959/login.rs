//! RFC 959 Section 4.1.1 - USER and PASS
//!
//! Reference: https://datatracker.ietf.org/doc/html/rfc959#section-4.1.1
//!
//! USER is answered with 230 (no password needed) or 331 (send PASS).
//! PASS must then be answered with 230.

use crate::common;
use ftp_rs::FtpError;

#[tokio::test]
async fn test_login_with_password_sends_exactly_two_commands() {
    let (mut client, mut server) = common::session().await;

    let (result, ()) = tokio::join!(client.login("anonymous", "guest@example.com"), async {
        server.expect("USER anonymous").await;
        server.reply("331 User name okay, need password.").await;
        server.expect("PASS guest@example.com").await;
        server.reply("230 User logged in, proceed.").await;
    });

    result.unwrap();
    assert!(client.is_authenticated());
    drop(client);
    assert_eq!(server.remaining().await, "");
}

#[tokio::test]
async fn test_login_without_password() {
    let (mut client, mut server) = common::session().await;

    let (result, ()) = tokio::join!(client.login("trusted", "ignored"), async {
        server.expect("USER trusted").await;
        server.reply("230 User logged in, proceed.").await;
    });

    result.unwrap();
    assert!(client.is_authenticated());
    drop(client);
    assert_eq!(server.remaining().await, "");
}

#[tokio::test]
async fn test_login_rejected_user() {
    let (mut client, mut server) = common::session().await;

    let (result, ()) = tokio::join!(client.login("nobody", "secret"), async {
        server.expect("USER nobody").await;
        server.reply("530 Not logged in.").await;
    });

    match result.unwrap_err() {
        FtpError::AuthFailed(reply) => assert!(reply.starts_with("530")),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!client.is_authenticated());
    drop(client);
    assert_eq!(server.remaining().await, "");
}

#[tokio::test]
async fn test_login_rejected_password() {
    let (mut client, mut server) = common::session().await;

    let (result, ()) = tokio::join!(client.login("user", "wrong"), async {
        server.expect("USER user").await;
        server.reply("331 User name okay, need password.").await;
        server.expect("PASS wrong").await;
        server.reply("530 Not logged in.").await;
    });

    match result.unwrap_err() {
        FtpError::Protocol { command, reply } => {
            assert_eq!(command, "PASS");
            assert_eq!(reply, "530 Not logged in.\r\n");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn test_login_account_required_is_failure() {
    let (mut client, mut server) = common::session().await;

    let (result, ()) = tokio::join!(client.login("user", "pass"), async {
        server.expect("USER user").await;
        server.reply("332 Need account for login.").await;
    });

    assert!(matches!(result, Err(FtpError::AuthFailed(_))));
}

#[tokio::test]
async fn test_reinitialize_forgets_login() {
    let (mut client, mut server) = common::session().await;

    let (login, ()) = tokio::join!(client.login("anonymous", "guest"), async {
        server.expect("USER anonymous").await;
        server.reply("230 User logged in, proceed.").await;
    });
    login.unwrap();

    let (rein, ()) = tokio::join!(client.reinitialize(), async {
        server.expect("REIN").await;
        server.reply("220 Service ready for new user.").await;
    });
    rein.unwrap();

    assert!(!client.is_authenticated());
    assert!(!client.is_terminated());
}
