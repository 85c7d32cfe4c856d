//! Interactive page-count prompt
//!
//! Used when neither the command line nor the config file sets a page count.

use std::io::{self, BufRead, Write};

pub const PAGES_PROMPT: &str = "Pages to parse: ";
pub const INVALID_NUMBER: &str = "Please enter a valid number";

/// Asks for a positive page count until one is entered
///
/// Only ASCII digits are accepted, with no sign or surrounding spaces, and
/// the value must be at least 1 and fit in a `u32`.
///
/// # Errors
///
/// Returns `UnexpectedEof` when the input ends before a valid answer.
pub fn ask_pages<R: BufRead, W: Write>(mut input: R, mut output: W) -> io::Result<u32> {
    write!(output, "{}", PAGES_PROMPT)?;
    output.flush()?;

    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before a page count was entered",
            ));
        }

        if let Some(pages) = parse_pages(line.trim_end_matches(['\r', '\n'])) {
            return Ok(pages);
        }

        writeln!(output, "{}", INVALID_NUMBER)?;
        write!(output, "{}", PAGES_PROMPT)?;
        output.flush()?;
    }
}

/// Parses a page count, `None` unless it is a positive run of ASCII digits
pub fn parse_pages(answer: &str) -> Option<u32> {
    if answer.is_empty() || !answer.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    answer.parse::<u32>().ok().filter(|&pages| pages > 0)
}
