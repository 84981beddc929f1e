//! User-facing error display.
//!
//! Formats anyhow errors with causal chains, colored output, and actionable
//! help hints extracted from [`SettingsError`].

use std::io::Write;

use claude_settings::SettingsError;

use crate::style;

/// Display a user-facing error to stderr.
///
/// Format:
///   error: top-level message
///     caused by: chain item
///
///   hint: actionable suggestion (if available)
///
/// When verbose is true, appends the full Debug representation.
pub fn display_error(err: &anyhow::Error, verbose: bool) {
    let mut stderr = std::io::stderr().lock();
    let _ = write_error(&mut stderr, err, verbose);
}

fn write_error(w: &mut impl Write, err: &anyhow::Error, verbose: bool) -> std::io::Result<()> {
    writeln!(w, "{}: {}", style::err_red_bold("error"), err)?;

    let chain: Vec<_> = err.chain().skip(1).collect();
    if chain.len() == 1 {
        writeln!(w, "  {}", style::err_dim(&format!("caused by: {}", chain[0])))?;
    } else {
        for (i, cause) in chain.iter().enumerate() {
            writeln!(w, "  {}", style::err_dim(&format!("{}: {}", i + 1, cause)))?;
        }
    }

    let hint = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<SettingsError>().and_then(|e| e.help()));
    if let Some(hint) = hint {
        writeln!(w, "\n  {}: {}", style::err_cyan_bold("hint"), hint)?;
    }

    if verbose {
        writeln!(w, "\nFull error chain:\n{:?}", err)?;
    }
    Ok(())
}
