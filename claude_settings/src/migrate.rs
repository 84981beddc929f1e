//! In-place migration of `permissions.allow` entries in a settings document.
//!
//! The document is handled as an untyped [`serde_json::Value`] so that
//! unknown keys, non-string entries, and key order all survive the rewrite.

use std::fmt;

use serde_json::Value;
use tracing::{Level, debug, info, instrument};

use crate::permission::{fix_permission_format, is_legacy_wildcard};

/// A single permission string that was rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    /// The entry as it was read.
    pub original: String,
    /// The entry after conversion to prefix syntax.
    pub rewritten: String,
}

impl fmt::Display for ChangeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' -> '{}'", self.original, self.rewritten)
    }
}

/// Why the walker found nothing to visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The document has no `permissions` key (or is not an object at all).
    NoPermissions,
    /// `permissions` exists but is not an object.
    PermissionsNotObject,
    /// `permissions` has no `allow` key.
    NoAllowList,
    /// `permissions.allow` exists but is not an array.
    AllowNotArray,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkipReason::NoPermissions => "no permissions section",
            SkipReason::PermissionsNotObject => "permissions is not an object",
            SkipReason::NoAllowList => "no allow list",
            SkipReason::AllowNotArray => "allow is not a list",
        };
        write!(f, "{}", s)
    }
}

/// Result of walking a settings document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Migration {
    /// Rewrites applied, in array order.
    pub changes: Vec<ChangeRecord>,
    /// Set when the allow list could not be located.
    pub skipped: Option<SkipReason>,
}

impl Migration {
    fn skip(reason: SkipReason) -> Self {
        info!(%reason, "nothing to migrate");
        Self {
            changes: Vec::new(),
            skipped: Some(reason),
        }
    }

    /// Returns true if at least one entry was rewritten.
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// Rewrites legacy wildcard entries in `permissions.allow`, in place.
///
/// Non-string entries are left untouched, as are `deny`, `ask`, and every
/// other key in the document. A missing or mistyped section is not an error;
/// the returned [`Migration`] records why nothing was visited.
#[instrument(level = Level::TRACE, skip(document))]
pub fn fix_allow_permissions(document: &mut Value) -> Migration {
    let Some(permissions) = document.get_mut("permissions") else {
        return Migration::skip(SkipReason::NoPermissions);
    };
    let Some(permissions) = permissions.as_object_mut() else {
        return Migration::skip(SkipReason::PermissionsNotObject);
    };
    let Some(allow) = permissions.get_mut("allow") else {
        return Migration::skip(SkipReason::NoAllowList);
    };
    let Some(allow) = allow.as_array_mut() else {
        return Migration::skip(SkipReason::AllowNotArray);
    };

    let mut changes = Vec::new();
    for entry in allow.iter_mut() {
        let Value::String(permission) = entry else {
            continue;
        };

        if !is_legacy_wildcard(permission) {
            continue;
        }
        let fixed = fix_permission_format(permission).into_owned();

        debug!(from = %permission, to = %fixed, "rewriting permission");
        let original = std::mem::replace(permission, fixed.clone());
        changes.push(ChangeRecord {
            original,
            rewritten: fixed,
        });
    }

    info!(count = changes.len(), "allow list scanned");
    Migration {
        changes,
        skipped: None,
    }
}
