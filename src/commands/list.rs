//! Listing data parsing

/// Split NLST data into file names
///
/// CRLF line endings are normalized to LF first. A single trailing empty
/// segment (left by the final line terminator) is dropped; any other empty
/// lines are kept as sent by the server.
pub fn parse_name_list(data: &str) -> Vec<String> {
    let normalized = data.replace("\r\n", "\n");
    let mut names: Vec<String> = normalized.split('\n').map(str::to_string).collect();
    if names.last().is_some_and(String::is_empty) {
        names.pop();
    }
    names
}
