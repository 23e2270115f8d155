//! ULID-suffixed fixture values so tests sharing a database never collide.

use ulid::Ulid;

/// `{prefix}-{ulid}`
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// assert_ne!(unique_str("recipe"), unique_str("recipe"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{prefix}-{}", Ulid::new())
}

/// `{prefix}-{ulid}@example.test`, lowercased so it survives email
/// normalization unchanged.
///
/// ```
/// use backend_test_support::unique_helpers::unique_email;
///
/// let email = unique_email("cook");
/// assert!(email.starts_with("cook-"));
/// assert!(email.ends_with("@example.test"));
/// ```
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@example.test", Ulid::new()).to_lowercase()
}
