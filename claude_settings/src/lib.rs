//! # Claude Settings
//!
//! A Rust library for validating and migrating Claude Code `settings.json`
//! files.
//!
//! ## Overview
//!
//! Claude Code permission entries used to accept a bare trailing wildcard,
//! `Bash(git status*)`. The current prefix syntax is `Bash(git status:*)`.
//! This library provides:
//!
//! - [`permission`] - the string rewrite rule for a single permission entry
//! - [`migrate`] - a walker that applies the rule to `permissions.allow`
//!   in place and records every change
//! - [`io`] - validated loading, backup, and pretty-printed write-back
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use claude_settings::io::{self, BACKUP_SUFFIX};
//! use claude_settings::migrate::fix_allow_permissions;
//!
//! let path = Path::new("settings.json");
//! let mut document = io::load_document(path)?;
//!
//! let migration = fix_allow_permissions(&mut document);
//! for change in &migration.changes {
//!     println!("{change}");
//! }
//!
//! if migration.has_changes() {
//!     io::backup_settings_file(path, BACKUP_SUFFIX)?;
//!     io::write_document(path, &document)?;
//! }
//! # Ok::<(), claude_settings::SettingsError>(())
//! ```
//!
//! Only `permissions.allow` is visited. Entries whose body contains a `)`
//! are never rewritten.

pub mod error;
pub mod io;
pub mod migrate;
pub mod permission;

pub use error::{Result, SettingsError};
pub use migrate::{ChangeRecord, Migration, SkipReason, fix_allow_permissions};
pub use permission::{fix_permission_format, is_legacy_wildcard};
