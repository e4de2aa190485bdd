//! FTP command builders and reply parsers

// Module declarations
pub mod list;
pub mod response;

// Parsers are reachable as `commands::*`
pub use list::*;
pub use response::*;

// Access control (RFC 959 §4.1.1)

/// User name
pub const USER: &str = "USER";
/// Password
pub const PASS: &str = "PASS";
/// Change working directory
pub const CWD: &str = "CWD";
/// Change to parent directory
pub const CDUP: &str = "CDUP";
/// Structure mount
pub const SMNT: &str = "SMNT";
/// Reinitialize the session
pub const REIN: &str = "REIN";
/// Logout
pub const QUIT: &str = "QUIT";

// Transfer parameters (RFC 959 §4.1.2)

/// Representation type
pub const TYPE: &str = "TYPE";
/// Passive mode
pub const PASV: &str = "PASV";

// Service commands (RFC 959 §4.1.3)

/// Retrieve a file
pub const RETR: &str = "RETR";
/// Store a file
pub const STOR: &str = "STOR";
/// Store a file under a server-chosen unique name
pub const STOU: &str = "STOU";
/// Append to a file
pub const APPE: &str = "APPE";
/// Rename from
pub const RNFR: &str = "RNFR";
/// Rename to
pub const RNTO: &str = "RNTO";
/// Abort the current transfer
pub const ABOR: &str = "ABOR";
/// Delete a file
pub const DELE: &str = "DELE";
/// Remove a directory
pub const RMD: &str = "RMD";
/// Make a directory
pub const MKD: &str = "MKD";
/// Print working directory
pub const PWD: &str = "PWD";
/// Detailed listing
pub const LIST: &str = "LIST";
/// Name listing
pub const NLST: &str = "NLST";
/// System type
pub const SYST: &str = "SYST";
/// Status
pub const STAT: &str = "STAT";
/// Help
pub const HELP: &str = "HELP";
/// No operation
pub const NOOP: &str = "NOOP";

/// Build a command line: `"<verb> <arg>\r\n"`, or `"<verb>\r\n"` when the
/// argument is empty
///
/// Some servers reject a trailing space after the verb, so an empty argument
/// is dropped entirely rather than sent as `"<verb> \r\n"`.
pub fn command_line(verb: &str, arg: &str) -> String {
    if arg.is_empty() {
        format!("{}\r\n", verb)
    } else {
        format!("{} {}\r\n", verb, arg)
    }
}

/// Render a command line for logs, hiding the password of a PASS command
pub fn redact(line: &str) -> &str {
    if line.len() >= 4 && line[..4].eq_ignore_ascii_case(PASS) {
        "PASS ****"
    } else {
        line.trim_end()
    }
}
