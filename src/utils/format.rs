/// Prepare a raw model reply for storage and display.
///
/// Only the outer whitespace goes; indentation on inner lines is kept, so
/// code blocks and lists in the reply survive untouched.
pub fn format_response(raw: &str) -> String {
    raw.trim().to_string()
}
