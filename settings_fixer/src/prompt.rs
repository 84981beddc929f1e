use std::io::{BufRead, Write};

/// Ask a yes/no question and read a single line of response.
///
/// Returns `true` only for `y` or `yes` (case-insensitive, surrounding
/// whitespace ignored). Empty input and end-of-input decline.
pub fn confirm(mut input: impl BufRead, mut out: impl Write, question: &str) -> std::io::Result<bool> {
    write!(out, "{question}")?;
    out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}
