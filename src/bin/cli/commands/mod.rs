pub mod achievements;
pub mod catalog;
pub mod flashcards;
pub mod lookup;
pub mod quiz;
pub mod reset;
pub mod stats;
pub mod status;

use std::io::{self, BufRead, Write};

/// Print `prompt` and read one line from stdin.
///
/// Returns `None` at end of input or when the learner types `:q`.
pub fn read_line(prompt: &str) -> io::Result<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }

    let line = line.trim_end_matches(['\n', '\r']).to_string();
    if line == ":q" {
        return Ok(None);
    }
    Ok(Some(line))
}
