//! Interactive stdin prompts.

use std::io::{self, Write};
use std::str::FromStr;

use crate::error::{Error, Result};

/// Prints the prompt, flushes, and reads one trimmed line from stdin.
pub fn ask(prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Prompts and parses the answer, rejecting anything unparseable.
pub fn ask_parsed<T: FromStr>(prompt: &str) -> Result<T> {
    parse_value(&ask(prompt)?)
}

/// Like [`ask_parsed`], but an empty answer means `None`.
pub fn ask_optional<T: FromStr>(prompt: &str) -> Result<Option<T>> {
    parse_optional(&ask(prompt)?)
}

fn parse_value<T: FromStr>(input: &str) -> Result<T> {
    input
        .parse()
        .map_err(|_| Error::InvalidInput(format!("could not parse '{input}'")))
}

fn parse_optional<T: FromStr>(input: &str) -> Result<Option<T>> {
    if input.is_empty() {
        return Ok(None);
    }
    parse_value(input).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_accepts_numbers() {
        assert_eq!(parse_value::<u32>("14").unwrap(), 14);
    }

    #[test]
    fn test_parse_value_rejects_non_numeric_input() {
        assert!(parse_value::<u32>("abc").is_err());
        assert!(parse_value::<u32>("").is_err());
    }

    #[test]
    fn test_parse_optional_blank_means_none() {
        assert_eq!(parse_optional::<u32>("").unwrap(), None);
    }

    #[test]
    fn test_parse_optional_non_blank_must_parse() {
        assert_eq!(parse_optional::<u32>("7").unwrap(), Some(7));
        assert!(parse_optional::<u32>("seven").is_err());
    }
}
