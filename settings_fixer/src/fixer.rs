//! The fix workflow: validate, rewrite, report, back up, confirm, write.
//!
//! [`run`] drives one settings file through the workflow and returns the
//! terminal [`Outcome`]. Any `Err` is the failed state; the caller reports it
//! and exits non-zero. Report text goes to `out`, the confirmation answer is
//! read from `input`, so the whole flow can be driven from tests.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use claude_settings::io::{self as settings_io, BACKUP_SUFFIX};
use claude_settings::migrate::{Migration, SkipReason, fix_allow_permissions};
use serde_json::Value;
use tracing::{Level, info, instrument};

use crate::{prompt, style};

/// What to fix and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOptions {
    /// Settings file to rewrite in place.
    pub settings_file: PathBuf,
    /// Report planned changes only.
    pub dry_run: bool,
    /// Skip the confirmation prompt and apply.
    pub assume_yes: bool,
}

/// How a successful run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing needed rewriting; no backup, no write.
    Unchanged,
    /// Changes were listed but `--dry-run` suppressed backup and write.
    DryRunReported,
    /// The file was rewritten; the original bytes live at `backup`.
    Applied { backup: PathBuf },
    /// The operator declined; the backup was removed.
    Cancelled,
}

/// Runs the fix workflow against `options.settings_file`.
#[instrument(level = Level::TRACE, skip(input, out))]
pub fn run(options: &FixOptions, input: impl BufRead, mut out: impl Write) -> Result<Outcome> {
    writeln!(out, "{}", style::banner())?;

    let mut document = settings_io::load_document(&options.settings_file)?;
    let path = options
        .settings_file
        .canonicalize()
        .with_context(|| format!("failed to resolve {}", options.settings_file.display()))?;

    writeln!(
        out,
        "Processing settings file: {}",
        style::cyan(&path.display().to_string())
    )?;

    let migration = fix_allow_permissions(&mut document);
    if migration.skipped == Some(SkipReason::NoPermissions) {
        writeln!(out, "No permissions section found in settings.json")?;
    }

    if !migration.has_changes() {
        writeln!(
            out,
            "{}",
            style::green_bold("No permission format issues found. Settings are already up to date!")
        )?;
        info!(path = %path.display(), "settings already up to date");
        return Ok(Outcome::Unchanged);
    }

    report_changes(&mut out, &migration)?;

    if options.dry_run {
        writeln!(out, "\n{} No changes were applied.", style::yellow_bold("[DRY RUN]"))?;
        writeln!(out, "Remove --dry-run flag to apply these changes.")?;
        info!(count = migration.changes.len(), "dry run, nothing written");
        return Ok(Outcome::DryRunReported);
    }

    let backup = settings_io::backup_settings_file(&path, BACKUP_SUFFIX)?;
    info!(backup = %backup.display(), "created backup");
    writeln!(
        out,
        "\nCreated backup: {}",
        style::cyan(&backup.display().to_string())
    )?;

    apply_or_cancel(options, &path, &backup, &document, input, &mut out)
        .with_context(|| format!("failed to apply changes; backup kept at {}", backup.display()))
}

fn report_changes(out: &mut impl Write, migration: &Migration) -> std::io::Result<()> {
    writeln!(
        out,
        "\n{}",
        style::bold(&format!(
            "Found {} permission(s) to fix:",
            migration.changes.len()
        ))
    )?;
    for change in &migration.changes {
        writeln!(out, "  {}{}", style::bullet(), style::yellow(&change.to_string()))?;
    }
    Ok(())
}

fn apply_or_cancel(
    options: &FixOptions,
    path: &Path,
    backup: &Path,
    document: &Value,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<Outcome> {
    let confirmed = if options.assume_yes {
        writeln!(out, "\nApplying changes to {} (--yes given)", path.display())?;
        true
    } else {
        let question = format!("\nApply these changes to {}? (y/N): ", path.display());
        prompt::confirm(input, &mut *out, &question).context("failed to read confirmation")?
    };

    if !confirmed {
        writeln!(out, "Changes cancelled.")?;
        settings_io::remove_backup(backup)?;
        info!(backup = %backup.display(), "cancelled by operator, backup removed");
        return Ok(Outcome::Cancelled);
    }

    settings_io::write_document(path, document)?;
    info!(path = %path.display(), "settings rewritten");

    writeln!(out, "\n{}", style::green_bold("Settings updated successfully!"))?;
    writeln!(out, "Original file backed up to: {}", backup.display())?;
    writeln!(
        out,
        "\n{}",
        style::dim("You can now run 'claude doctor' to verify the fixes.")
    )?;

    Ok(Outcome::Applied {
        backup: backup.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use claude_settings::SettingsError;
    use claude_settings::io::backup_path_for;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    const SCENARIO: &str =
        r#"{"permissions": {"allow": ["Bash(git status*)", "Bash(git status:*)", 42]}}"#;

    fn setup(content: &str) -> (TempDir, PathBuf) {
        console::set_colors_enabled(false);
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        fs::write(&path, content).unwrap();
        (temp, path)
    }

    fn options(path: &Path) -> FixOptions {
        FixOptions {
            settings_file: path.to_path_buf(),
            dry_run: false,
            assume_yes: false,
        }
    }

    fn run_with(options: &FixOptions, answer: &str) -> (Result<Outcome>, String) {
        let mut out = Vec::new();
        let result = run(options, Cursor::new(answer.as_bytes().to_vec()), &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    fn expected_backup(path: &Path) -> PathBuf {
        backup_path_for(&path.canonicalize().unwrap(), BACKUP_SUFFIX)
    }

    #[test]
    fn test_confirmed_run_rewrites_and_keeps_backup() {
        let (_temp, path) = setup(SCENARIO);
        let backup = expected_backup(&path);

        let (result, out) = run_with(&options(&path), "y\n");

        assert_eq!(result.unwrap(), Outcome::Applied { backup: backup.clone() });
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "{\n  \"permissions\": {\n    \"allow\": [\n      \"Bash(git status:*)\",\n      \"Bash(git status:*)\",\n      42\n    ]\n  }\n}"
        );
        assert_eq!(fs::read_to_string(&backup).unwrap(), SCENARIO);
        assert!(out.contains("Found 1 permission(s) to fix:"));
        assert!(out.contains("'Bash(git status*)' -> 'Bash(git status:*)'"));
        assert!(out.contains("Settings updated successfully!"));
        assert!(out.contains("claude doctor"));
    }

    #[test]
    fn test_output_sections_in_order() {
        let (_temp, path) = setup(SCENARIO);

        let (_, out) = run_with(&options(&path), "yes\n");

        let order = [
            "Claude Code Settings Permission Format Fixer",
            "Processing settings file:",
            "Found 1 permission(s) to fix:",
            "Created backup:",
            "Apply these changes to",
            "Settings updated successfully!",
        ];
        let positions: Vec<usize> = order.iter().map(|s| out.find(s).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{out}");
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let (_temp, path) = setup(SCENARIO);
        let opts = FixOptions {
            dry_run: true,
            ..options(&path)
        };

        let (result, out) = run_with(&opts, "");

        assert_eq!(result.unwrap(), Outcome::DryRunReported);
        assert_eq!(fs::read_to_string(&path).unwrap(), SCENARIO);
        assert!(!expected_backup(&path).exists());
        assert!(out.contains("'Bash(git status*)' -> 'Bash(git status:*)'"));
        assert!(out.contains("[DRY RUN] No changes were applied."));
        assert!(!out.contains("Apply these changes"));
    }

    #[test]
    fn test_declined_run_removes_backup() {
        let (_temp, path) = setup(SCENARIO);

        let (result, out) = run_with(&options(&path), "n\n");

        assert_eq!(result.unwrap(), Outcome::Cancelled);
        assert_eq!(fs::read_to_string(&path).unwrap(), SCENARIO);
        assert!(!expected_backup(&path).exists());
        assert!(out.contains("Created backup:"));
        assert!(out.contains("Changes cancelled."));
    }

    #[test]
    fn test_empty_answer_declines() {
        let (_temp, path) = setup(SCENARIO);

        let (result, _) = run_with(&options(&path), "");

        assert_eq!(result.unwrap(), Outcome::Cancelled);
        assert_eq!(fs::read_to_string(&path).unwrap(), SCENARIO);
    }

    #[test]
    fn test_assume_yes_skips_prompt() {
        let (_temp, path) = setup(SCENARIO);
        let opts = FixOptions {
            assume_yes: true,
            ..options(&path)
        };

        let (result, out) = run_with(&opts, "");

        assert!(matches!(result.unwrap(), Outcome::Applied { .. }));
        assert!(!out.contains("(y/N)"));
        assert!(expected_backup(&path).exists());
        assert!(fs::read_to_string(&path).unwrap().contains("Bash(git status:*)"));
    }

    #[test]
    fn test_up_to_date_file_is_left_alone() {
        let original = r#"{"permissions": {"allow": ["Bash(git status:*)", "Read(.env)"]}}"#;
        let (_temp, path) = setup(original);

        let (result, out) = run_with(&options(&path), "y\n");

        assert_eq!(result.unwrap(), Outcome::Unchanged);
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
        assert!(!expected_backup(&path).exists());
        assert!(out.contains("No permission format issues found. Settings are already up to date!"));
    }

    #[test]
    fn test_missing_permissions_section_is_reported() {
        let (_temp, path) = setup("{}");

        let (result, out) = run_with(&options(&path), "");

        assert_eq!(result.unwrap(), Outcome::Unchanged);
        assert!(out.contains("No permissions section found in settings.json"));
        assert!(out.contains("already up to date"));
    }

    #[test]
    fn test_allow_not_a_list_is_unchanged() {
        let (_temp, path) = setup(r#"{"permissions": {"allow": "not-a-list"}}"#);

        let (result, out) = run_with(&options(&path), "");

        assert_eq!(result.unwrap(), Outcome::Unchanged);
        assert!(!out.contains("No permissions section"));
    }

    #[test]
    fn test_missing_file_fails_without_side_effects() {
        console::set_colors_enabled(false);
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");

        let (result, out) = run_with(&options(&path), "y\n");

        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SettingsError>(),
            Some(SettingsError::NotFound(_))
        ));
        assert!(!out.contains("Processing settings file"));
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_directory_fails_validation() {
        console::set_colors_enabled(false);
        let temp = TempDir::new().unwrap();

        let (result, _) = run_with(&options(temp.path()), "y\n");

        assert!(matches!(
            result.unwrap_err().downcast_ref::<SettingsError>(),
            Some(SettingsError::NotAFile(_))
        ));
    }

    #[test]
    fn test_invalid_json_fails_validation() {
        let (temp, path) = setup("{\"permissions\": [");

        let (result, _) = run_with(&options(&path), "y\n");

        assert!(matches!(
            result.unwrap_err().downcast_ref::<SettingsError>(),
            Some(SettingsError::ParseError { .. })
        ));
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_failure_after_backup_keeps_backup() {
        struct BrokenInput;

        impl std::io::Read for BrokenInput {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("stdin closed"))
            }
        }

        impl BufRead for BrokenInput {
            fn fill_buf(&mut self) -> std::io::Result<&[u8]> {
                Err(std::io::Error::other("stdin closed"))
            }

            fn consume(&mut self, _amt: usize) {}
        }

        let (_temp, path) = setup(SCENARIO);
        let backup = expected_backup(&path);

        let mut out = Vec::new();
        let err = run(&options(&path), BrokenInput, &mut out).unwrap_err();

        assert!(err.to_string().starts_with("failed to apply changes; backup kept at"));
        assert!(backup.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), SCENARIO);
    }

    #[test]
    fn test_unrelated_keys_survive_in_order() {
        let original = r#"{"model": "opus", "permissions": {"deny": ["Bash(rm*)"], "allow": ["Bash(ls*)"]}, "env": {"B": "1", "A": "2"}}"#;
        let (_temp, path) = setup(original);

        let (result, _) = run_with(&options(&path), "y\n");
        assert!(matches!(result.unwrap(), Outcome::Applied { .. }));

        let written = fs::read_to_string(&path).unwrap();
        let doc: Value = serde_json::from_str(&written).unwrap();
        assert_eq!(doc["permissions"]["allow"][0], "Bash(ls:*)");
        assert_eq!(doc["permissions"]["deny"][0], "Bash(rm*)");

        let keys: Vec<&str> = doc.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["model", "permissions", "env"]);
        assert!(written.find("\"B\"").unwrap() < written.find("\"A\"").unwrap());
    }

    #[test]
    fn test_stale_backup_is_overwritten() {
        let (_temp, path) = setup(SCENARIO);
        let backup = expected_backup(&path);
        fs::write(&backup, "old backup").unwrap();

        let (result, _) = run_with(&options(&path), "y\n");

        assert!(matches!(result.unwrap(), Outcome::Applied { .. }));
        assert_eq!(fs::read_to_string(&backup).unwrap(), SCENARIO);
    }
}
