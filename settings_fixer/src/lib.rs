//! Command-line front end for migrating Claude Code permission syntax.
//!
//! Rewrites legacy `Tool(command*)` entries in a settings file's
//! `permissions.allow` list to the prefix form `Tool(command:*)`, with a
//! dry-run mode, a backup of the original file, and an explicit
//! confirmation before anything is written.
//!
//! # Modules
//!
//! - [`cli`] — Command-line arguments.
//! - [`fixer`] — The validate / report / back up / confirm / write workflow.
//! - [`prompt`] — The yes/no confirmation reader.
//! - [`errors`] — User-facing error rendering.
//! - [`style`] — Terminal styling helpers.
//! - [`tracing_init`] — Log subscriber setup.
//!
//! # Example
//!
//! ```no_run
//! use settings_fixer::fixer::{self, FixOptions};
//!
//! let options = FixOptions {
//!     settings_file: "settings.json".into(),
//!     dry_run: true,
//!     assume_yes: false,
//! };
//! let outcome = fixer::run(&options, std::io::stdin().lock(), std::io::stdout().lock()).unwrap();
//! println!("{outcome:?}");
//! ```

pub mod cli;
pub mod errors;
pub mod fixer;
pub mod prompt;
pub mod style;
pub mod tracing_init;
