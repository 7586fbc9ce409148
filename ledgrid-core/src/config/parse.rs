//! Minimal parser for matrix configuration
//!
//! Handles the subset of TOML a matrix config needs:
//! - `key = value` pairs with integer values
//! - an optional `[matrix]` section header
//! - comments (`# ...`), full-line or trailing
//!
//! ```text
//! [matrix]
//! display_rows = 8
//! display_columns = 8
//! vertical_count = 1
//! horizontal_count = 4   # four modules in a strip
//! intensity = 3
//! ```
//!
//! Missing keys keep their [`MatrixConfig::default`] value.

use super::types::MatrixConfig;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Section other than `[matrix]`
    InvalidSection,
    /// Key not recognized
    UnknownKey,
    /// Value is not an integer in range
    InvalidValue,
    /// Line is neither a header nor `key = value`
    InvalidLine,
}

/// Parse configuration text into a [`MatrixConfig`]
///
/// The result is not validated; call [`MatrixConfig::geometry`].
pub fn parse_config(input: &str) -> Result<MatrixConfig, ParseError> {
    let mut config = MatrixConfig::default();

    for line in input.lines() {
        let line = strip_comment(line).trim();
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            if header.trim() != "matrix" {
                return Err(ParseError::InvalidSection);
            }
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        apply_value(&mut config, key, value)?;
    }

    Ok(config)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let (key, value) = (key.trim(), value.trim());
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

fn apply_value(config: &mut MatrixConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "display_rows" => config.display_rows = parse_int(value)?,
        "display_columns" => config.display_columns = parse_int(value)?,
        "vertical_count" | "displays_vertically" => config.vertical_count = parse_int(value)?,
        "horizontal_count" | "displays_horizontally" => {
            config.horizontal_count = parse_int(value)?
        }
        "intensity" => config.intensity = parse_int(value)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}
