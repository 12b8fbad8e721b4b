//! ULID-backed generators so parallel tests never share identities or lobby names.

use ulid::Ulid;

/// `{prefix}-{ulid}`; distinct on every call.
///
/// ```
/// use meme_clash_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("user");
/// let b = unique_str("user");
/// assert_ne!(a, b);
/// assert!(a.starts_with("user-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// A unique user id string suitable for the `X-User-Id` header.
pub fn unique_user_id() -> String {
    unique_str("user")
}

/// A unique lobby name.
pub fn unique_lobby_name(prefix: &str) -> String {
    format!("{prefix} lobby {}", Ulid::new())
}
