pub mod engines;
pub mod puzzles;

use std::io::{BufRead, Write};

/// Ask a yes/no question; anything but `y`/`yes` (or end of input) is no.
pub fn confirm<R: BufRead, W: Write>(prompt: &str, input: &mut R, out: &mut W) -> std::io::Result<bool> {
    write!(out, "{prompt} [y/N] ")?;
    out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
