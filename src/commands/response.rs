//! Core FTP reply framing and extraction utilities
//!
//! Everything here is a pure function over the raw bytes of a reply as it
//! came off the control connection:
//! - [`is_complete_response`] decides when the framer may stop reading
//! - [`strip_control_symbols`] turns a reply into human-readable text
//! - [`extract_path`] and [`extract_passive_address`] pull structured data
//!   out of MKD/PWD and PASV replies

use crate::error::{FtpError, Result};
use regex::bytes::Regex;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::sync::LazyLock;

const CRLF: &[u8] = b"\r\n";

/// `257 "path" comment\r\n`, also matching the first line of a multi-line reply
static PATH_MATCHER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?-u)[0-9][0-9][0-9][ |-]"(.+)".*\r\n"#).expect("path pattern is valid")
});

/// `(h1,h2,h3,h4,p1,p2)` anywhere in a PASV reply
static ADDRESS_MATCHER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u)\(([0-9]+),([0-9]+),([0-9]+),([0-9]+),([0-9]+),([0-9]+)\)")
        .expect("address pattern is valid")
});

/// Check whether `msg` holds a complete single-line or multi-line reply
pub fn is_complete_response(msg: &[u8]) -> bool {
    is_complete_single_line_response(msg) || is_complete_multi_line_response(msg)
}

fn is_complete_single_line_response(msg: &[u8]) -> bool {
    is_single_line_response(msg) && msg.ends_with(CRLF)
}

/// `NNN text`: byte 3 is a space
fn is_single_line_response(msg: &[u8]) -> bool {
    msg.len() >= 4 && msg[3] == b' '
}

fn is_complete_multi_line_response(msg: &[u8]) -> bool {
    is_multi_line_response(msg) && last_line_ends_in_same_code_as_first_line(msg)
}

/// `NNN-text`: byte 3 is a hyphen
fn is_multi_line_response(msg: &[u8]) -> bool {
    msg.len() >= 4 && msg[3] == b'-'
}

fn last_line_ends_in_same_code_as_first_line(msg: &[u8]) -> bool {
    // A reply ending in CRLF splits into a trailing empty segment, which makes
    // the actual last line the second-to-last segment.
    let lines = split_crlf(msg);
    if lines.len() < 3 {
        return false;
    }
    let first = lines[0];
    let last = lines[lines.len() - 2];
    if first.len() < 3 || last.len() < 4 {
        return false;
    }
    last[..3] == first[..3] && last[3] == b' '
}

fn split_crlf(msg: &[u8]) -> Vec<&[u8]> {
    let mut lines = Vec::new();
    let mut rest = msg;
    while let Some(pos) = find_crlf(rest) {
        lines.push(&rest[..pos]);
        rest = &rest[pos + 2..];
    }
    lines.push(rest);
    lines
}

fn find_crlf(msg: &[u8]) -> Option<usize> {
    msg.windows(2).position(|w| w == CRLF)
}

fn rfind_crlf(msg: &[u8]) -> Option<usize> {
    msg.windows(2).rposition(|w| w == CRLF)
}

/// Remove reply codes and the final line terminator from a reply
///
/// For a single-line reply this drops the leading `NNN ` and trailing CRLF.
/// For a multi-line reply it additionally drops the `NNN ` marker of the
/// final line and splices the remaining text together, so
/// `"214-multi line\r\nhelp\r\n214 over\r\n"` becomes
/// `"multi line\r\nhelp\r\nover"`.
pub fn strip_control_symbols(reply: &[u8]) -> String {
    let Some(body) = reply.get(4..) else {
        return String::new();
    };
    let body = body.strip_suffix(CRLF).unwrap_or(body);
    if is_single_line_response(reply) {
        return String::from_utf8_lossy(body).into_owned();
    }
    let Some(last_line_start) = rfind_crlf(body) else {
        return String::from_utf8_lossy(body).into_owned();
    };

    let mut text = Vec::with_capacity(body.len());
    text.extend_from_slice(&body[..last_line_start + 2]);
    // skip CRLF plus the final line's "NNN " marker
    text.extend_from_slice(body.get(last_line_start + 6..).unwrap_or_default());
    let text = text.strip_suffix(CRLF).unwrap_or(&text[..]);
    String::from_utf8_lossy(text).into_owned()
}

/// Extract the double-quoted path from a 257 reply
///
/// # Errors
///
/// Returns [`FtpError::Protocol`] scoped to `"path extraction"` when the reply
/// carries no quoted path.
pub fn extract_path(reply: &[u8]) -> Result<String> {
    PATH_MATCHER
        .captures(reply)
        .and_then(|caps| caps.get(1))
        .map(|path| String::from_utf8_lossy(path.as_bytes()).into_owned())
        .ok_or_else(|| FtpError::protocol("path extraction", reply))
}

/// Extract the data connection address from a 227 reply
///
/// `227 Entering Passive Mode (127,12,0,1,1,2)` yields `127.12.0.1:258`.
///
/// # Errors
///
/// Returns [`FtpError::Protocol`] scoped to `"address extraction"` when the
/// reply has no `(h1,h2,h3,h4,p1,p2)` tuple or a field does not fit in a byte.
pub fn extract_passive_address(reply: &[u8]) -> Result<SocketAddrV4> {
    let caps = ADDRESS_MATCHER
        .captures(reply)
        .ok_or_else(|| FtpError::protocol("address extraction", reply))?;

    let mut fields = [0u8; 6];
    for (i, field) in fields.iter_mut().enumerate() {
        *field = caps
            .get(i + 1)
            .and_then(|m| std::str::from_utf8(m.as_bytes()).ok())
            .and_then(|s| s.parse::<u8>().ok())
            .ok_or_else(|| FtpError::protocol("address extraction", reply))?;
    }

    let ip = Ipv4Addr::new(fields[0], fields[1], fields[2], fields[3]);
    let port = u16::from(fields[4]) * 256 + u16::from(fields[5]);
    Ok(SocketAddrV4::new(ip, port))
}
