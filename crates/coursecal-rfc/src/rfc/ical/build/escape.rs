//! iCalendar text escaping.

/// Escapes embedded line breaks in a TEXT value so each property stays on one line.
///
/// Commas, semicolons and backslashes are written verbatim; consumers of the
/// generated calendars match on the raw instructor lists.
#[must_use]
pub fn escape_line_breaks(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                result.push_str("\\n");
            }
            '\n' => result.push_str("\\n"),
            _ => result.push(c),
        }
    }
    result
}
