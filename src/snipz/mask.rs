//! Display masking for credential-like values.
//!
//! A line such as `Password: hunter2` is shown as `Password: ●●●●●●●●`. This is a
//! keyword heuristic meant to keep secrets off the screen, not a security boundary:
//! stored data is never altered, and values without a recognized keyword are shown.

use once_cell::sync::Lazy;
use regex::Regex;

pub const MASK: &str = "●●●●●●●●";

// The separator may be surrounded by spaces or tabs, but never by a line break, so a
// keyword at the end of one line does not mask the next line.
static SENSITIVE_VALUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\b(?:password|pass|pwd|secret|token|key|auth|app pass)[ \t]*[:=][ \t]*)[^\r\n]+")
        .expect("sensitive value pattern should compile")
});

/// Replaces every credential-like value with [`MASK`], keeping its label and separator.
pub fn mask_sensitive_data(text: &str) -> String {
    SENSITIVE_VALUE
        .replace_all(text, |caps: &regex::Captures| format!("{}{}", &caps[1], MASK))
        .into_owned()
}

pub fn contains_sensitive_data(text: &str) -> bool {
    SENSITIVE_VALUE.is_match(text)
}
