//! Minimal TOML parser for `device.toml`
//!
//! Handles only the subset the device configuration needs and does NOT
//! support the full TOML language.
//!
//! Supported:
//! - `key = value` pairs at the root, bare keys only
//! - Basic strings with escapes (`\" \\ \b \t \n \f \r \uXXXX \UXXXXXXXX`)
//! - Literal strings (`'...'`)
//! - Integers: decimal with optional sign and `_` separators, `0x`/`0o`/`0b`
//! - Booleans
//! - Comments (`# ...`), whole-line or trailing
//!
//! NOT supported (reported as syntax errors):
//! - Tables and arrays of tables
//! - Arrays and inline tables
//! - Multi-line strings
//! - Floats and datetimes
//! - Dotted or quoted keys

use heapless::String;

use super::error::{ConfigError, Field};
use super::raw::RawConfig;
use super::rules::is_bare_key;

/// Longest string value accepted before field limits apply
const MAX_STRING_LEN: usize = 256;

/// Parsed value
#[derive(Debug, Clone, PartialEq, Eq)]
enum Value {
    Text(String<MAX_STRING_LEN>),
    Integer(i64),
    Boolean(bool),
}

/// Parse `device.toml` contents into an unvalidated configuration
pub fn parse_toml(input: &str) -> Result<RawConfig, ConfigError> {
    let mut raw = RawConfig::new();

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            trace!("Table header on line {} is not supported", line_no);
            return Err(ConfigError::Syntax { line: line_no });
        }

        let (key, value) = line
            .split_once('=')
            .ok_or(ConfigError::Syntax { line: line_no })?;

        let key = key.trim();
        if !is_bare_key(key) {
            return Err(ConfigError::Syntax { line: line_no });
        }
        let field = Field::from_key(key).ok_or(ConfigError::UnknownKey { line: line_no })?;

        match parse_value(value.trim(), field, line_no)? {
            Value::Text(text) => raw.set_text(field, &text)?,
            Value::Integer(n) => raw.set_int(field, n)?,
            Value::Boolean(b) => raw.set_bool(field, b)?,
        }
    }

    Ok(raw)
}

fn parse_value(value: &str, field: Field, line: usize) -> Result<Value, ConfigError> {
    let syntax = ConfigError::Syntax { line };

    if value.starts_with("\"\"\"") || value.starts_with("'''") {
        return Err(syntax);
    }

    if let Some(body) = value.strip_prefix('"') {
        let (text, rest) = parse_basic_string(body, field, line)?;
        expect_line_end(rest, line)?;
        return Ok(Value::Text(text));
    }

    if let Some(body) = value.strip_prefix('\'') {
        let end = body.find('\'').ok_or(syntax)?;
        expect_line_end(&body[end + 1..], line)?;
        let text = String::try_from(&body[..end]).map_err(|_| too_long(field))?;
        return Ok(Value::Text(text));
    }

    let bare = strip_comment(value);
    match bare {
        "true" => Ok(Value::Boolean(true)),
        "false" => Ok(Value::Boolean(false)),
        _ => parse_integer(bare)
            .map(Value::Integer)
            .ok_or(syntax),
    }
}

/// Parse the remainder of a basic string after its opening quote
///
/// Returns the decoded text and whatever follows the closing quote.
fn parse_basic_string(
    body: &str,
    field: Field,
    line: usize,
) -> Result<(String<MAX_STRING_LEN>, &str), ConfigError> {
    let syntax = ConfigError::Syntax { line };
    let mut text: String<MAX_STRING_LEN> = String::new();
    let mut chars = body.char_indices();

    while let Some((pos, c)) = chars.next() {
        let decoded = match c {
            '"' => return Ok((text, &body[pos + 1..])),
            '\\' => {
                let (_, escape) = chars.next().ok_or(syntax)?;
                match escape {
                    'b' => '\u{8}',
                    't' => '\t',
                    'n' => '\n',
                    'f' => '\u{c}',
                    'r' => '\r',
                    '"' => '"',
                    '\\' => '\\',
                    'u' => unicode_escape(&mut chars, 4).ok_or(syntax)?,
                    'U' => unicode_escape(&mut chars, 8).ok_or(syntax)?,
                    _ => return Err(syntax),
                }
            }
            c if c.is_control() && c != '\t' => return Err(syntax),
            c => c,
        };
        text.push(decoded).map_err(|_| too_long(field))?;
    }

    // No closing quote
    Err(syntax)
}

fn unicode_escape(chars: &mut core::str::CharIndices<'_>, digits: usize) -> Option<char> {
    let mut code: u32 = 0;
    for _ in 0..digits {
        let (_, c) = chars.next()?;
        code = code * 16 + c.to_digit(16)?;
    }
    char::from_u32(code)
}

fn parse_integer(s: &str) -> Option<i64> {
    let (negative, digits) = match s.as_bytes().first()? {
        b'+' => (false, &s[1..]),
        b'-' => (true, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits) = if let Some(hex) = digits.strip_prefix("0x") {
        (16, hex)
    } else if let Some(oct) = digits.strip_prefix("0o") {
        (8, oct)
    } else if let Some(bin) = digits.strip_prefix("0b") {
        (2, bin)
    } else {
        (10, digits)
    };

    // Prefixed integers are unsigned in TOML
    if radix != 10 && s.len() != digits.len() + 2 {
        return None;
    }
    // No leading zeros on decimals
    if radix == 10 && digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    // Underscores only between digits
    if digits.is_empty() || digits.starts_with('_') || digits.ends_with('_') || digits.contains("__")
    {
        return None;
    }

    let mut value: i64 = 0;
    for c in digits.chars().filter(|c| *c != '_') {
        let digit = i64::from(c.to_digit(radix)?);
        value = value.checked_mul(i64::from(radix))?;
        value = if negative {
            value.checked_sub(digit)?
        } else {
            value.checked_add(digit)?
        };
    }

    Some(value)
}

fn strip_comment(s: &str) -> &str {
    match s.split_once('#') {
        Some((value, _)) => value.trim_end(),
        None => s,
    }
}

fn expect_line_end(rest: &str, line: usize) -> Result<(), ConfigError> {
    let rest = rest.trim_start();
    if rest.is_empty() || rest.starts_with('#') {
        Ok(())
    } else {
        Err(ConfigError::Syntax { line })
    }
}

fn too_long(field: Field) -> ConfigError {
    match field {
        Field::DataHost => ConfigError::InvalidHost,
        _ => ConfigError::OutOfRange(field),
    }
}
