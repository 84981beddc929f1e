//! Permission string format conversion.
//!
//! Older Claude Code releases accepted a bare trailing wildcard in permission
//! patterns, e.g. `Bash(git status*)`. Current releases expect the prefix
//! syntax `Bash(git status:*)`. This module recognises the legacy shape and
//! rewrites it.
//!
//! ## Examples
//!
//! ```rust
//! use claude_settings::permission::fix_permission_format;
//!
//! assert_eq!(fix_permission_format("Bash(git status*)"), "Bash(git status:*)");
//! assert_eq!(fix_permission_format("Bash(npm run:*)"), "Bash(npm run:*)");
//! assert_eq!(fix_permission_format("Read(.env)"), "Read(.env)");
//! ```

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{Level, instrument};

/// `Tool(body*)` anchored at both ends of the input. The body may hold any
/// character except `)`; the `*` must sit directly before the closing paren.
fn legacy_wildcard() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\A(\w+\([^)]*?)\*(\))\z").expect("legacy wildcard pattern is valid")
    })
}

/// Converts a legacy `Tool(command*)` permission to `Tool(command:*)`.
///
/// Strings that do not have the legacy shape are returned borrowed and
/// unchanged, so `matches!(result, Cow::Borrowed(_))` means "no rewrite".
/// Only the final `*` before the closing paren is affected; interior
/// wildcards are preserved.
#[instrument(level = Level::TRACE)]
pub fn fix_permission_format(permission: &str) -> Cow<'_, str> {
    let Some(caps) = legacy_wildcard().captures(permission) else {
        return Cow::Borrowed(permission);
    };

    // Already-new `:*` bodies can still end in `*` (e.g. `Bash(git:*)`).
    let prefix = &caps[1];
    if prefix.ends_with(':') {
        return Cow::Borrowed(permission);
    }

    Cow::Owned(format!("{prefix}:*{}", &caps[2]))
}

/// Returns true if `permission` uses the legacy bare-wildcard syntax.
#[instrument(level = Level::TRACE)]
pub fn is_legacy_wildcard(permission: &str) -> bool {
    matches!(fix_permission_format(permission), Cow::Owned(_))
}
