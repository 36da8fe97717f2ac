//! Interactive user prompting
//!
//! Kept separate from the commands so the command logic stays testable with
//! flags like `--yes` and `--password`.

use std::io::{self, BufRead, Write};

use crate::error::{CentreError, Result};

/// Prompt user for yes/no confirmation
///
/// # Returns
/// * `true` if user confirms with 'y' or 'Y'
/// * `false` otherwise, including on end of input
///
/// # Example
/// ```no_run
/// # use command_centre::commands::interactive::confirm;
/// if confirm("Are you sure to mark this booking (B17) as completed").unwrap() {
///     // dispatch
/// }
/// ```
pub fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    read_answer(&mut io::stdin().lock()).map(|answer| is_yes(&answer))
}

/// Prompt user for text input
///
/// Fails if the answer is empty and there is no default.
pub fn prompt_text(prompt: &str, default: Option<&str>) -> Result<String> {
    if let Some(d) = default {
        print!("{prompt} [{d}]: ");
    } else {
        print!("{prompt}: ");
    }
    io::stdout().flush()?;

    let input = read_answer(&mut io::stdin().lock())?;
    if input.is_empty() {
        return default
            .map(str::to_string)
            .ok_or_else(|| CentreError::InvalidInput(format!("{prompt} is required")));
    }
    Ok(input)
}

fn read_answer(reader: &mut impl BufRead) -> Result<String> {
    let mut input = String::new();
    reader.read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn is_yes(answer: &str) -> bool {
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}
