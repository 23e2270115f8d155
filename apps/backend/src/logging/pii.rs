use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

// Patterns are literals; construction cannot fail at runtime.
#[allow(clippy::unwrap_used)]
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap());

/// Compact JWS: three base64url segments.
#[allow(clippy::unwrap_used)]
static JWT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\beyJ[A-Za-z0-9_-]*\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+").unwrap()
});

/// Opaque runs of base64 or hex (16+ chars), e.g. password hashes.
#[allow(clippy::unwrap_used)]
static OPAQUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z0-9+/]{16,}={0,2}").unwrap());

const REDACTED_TOKEN: &str = "[REDACTED_TOKEN]";

/// Mask emails (first character of the local part survives) and replace
/// bearer tokens and other opaque secrets with `[REDACTED_TOKEN]`.
pub fn redact(input: &str) -> String {
    let masked = EMAIL.replace_all(input, |caps: &regex::Captures| {
        let full = &caps[0];
        match full.split_once('@') {
            Some((local, domain)) => match local.chars().next() {
                Some(first) => format!("{first}***@{domain}"),
                None => format!("@{domain}"),
            },
            None => full.to_string(),
        }
    });
    let masked = JWT.replace_all(&masked, REDACTED_TOKEN);
    OPAQUE.replace_all(&masked, REDACTED_TOKEN).into_owned()
}

/// Display wrapper that redacts on format, for use in `tracing` fields.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}
