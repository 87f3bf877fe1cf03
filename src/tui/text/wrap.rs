//! Line wrapping for the chat display.

/// Split a message into display lines: message newlines are kept, then each
/// line wraps to `width` columns. Uses textwrap for correct UTF-8 handling.
pub(crate) fn wrap_message(msg: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    for line in msg.split('\n') {
        if line.is_empty() {
            out.push(String::new());
        } else if width == 0 {
            out.push(line.to_string());
        } else {
            out.extend(textwrap::wrap(line, width).into_iter().map(|c| c.into_owned()));
        }
    }
    out
}
