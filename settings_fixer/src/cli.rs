use std::path::PathBuf;

use clap::Parser;

use crate::fixer::FixOptions;

#[derive(Parser, Debug)]
#[command(name = "claude-settings-fixer")]
#[command(version)]
#[command(about = "Fix Claude Code permission format from 'command*' to 'command:*'")]
#[command(after_help = "Examples:
  claude-settings-fixer settings.json
  claude-settings-fixer --dry-run ~/.claude/settings.json
  claude-settings-fixer .claude/settings.local.json --yes")]
pub struct Cli {
    /// Path to the Claude Code settings.json file
    pub settings_file: PathBuf,

    /// Show what changes would be made without applying them
    #[arg(long)]
    pub dry_run: bool,

    /// Apply changes without asking for confirmation
    #[arg(short, long, conflicts_with = "dry_run")]
    pub yes: bool,

    /// Show debug logs and full error details
    #[arg(short, long)]
    pub verbose: bool,

    /// Append debug logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn fix_options(&self) -> FixOptions {
        FixOptions {
            settings_file: self.settings_file.clone(),
            dry_run: self.dry_run,
            assume_yes: self.yes,
        }
    }
}
