//! Sanitizing of payment reason lines.
//!
//! The gateway accepts only `0-9`, `a-z`, `A-Z`, space, `+`, `,`, `-` and `.`
//! inside a reason. Every other character is removed; nothing is transliterated.

/// Returns `true` if the gateway accepts `c` inside a reason line.
pub fn is_reason_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ' ' | '+' | ',' | '-' | '.')
}

/// Strips every character the gateway rejects from a reason line.
///
/// ```
/// use sofort_core::reason::strip_reason;
///
/// assert_eq!(strip_reason("Invoice (:#001:)"), "Invoice 001");
/// ```
pub fn strip_reason(reason: &str) -> String {
    reason.chars().filter(|c| is_reason_char(*c)).collect()
}
