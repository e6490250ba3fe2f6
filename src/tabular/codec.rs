//! Semicolon-delimited record codec.
//!
//! Writing quotes a field only when it contains the delimiter, a quote or a
//! line break; embedded quotes are doubled. Reading accepts `\n`, `\r\n` and
//! bare `\r` terminators. A blank line is a record with no fields, while the
//! terminator after the last record does not start a new one.

use std::borrow::Cow;
use thiserror::Error;

/// Field separator used for every CSV document.
pub const DELIMITER: char = ';';

const QUOTE: char = '"';

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("unterminated quoted field starting on line {line}")]
    UnterminatedQuote { line: usize },
}

/// Quote a single field if it needs it.
#[must_use]
pub fn escape_field(field: &str) -> Cow<'_, str> {
    let needs_quotes = field
        .chars()
        .any(|c| c == DELIMITER || c == QUOTE || c == '\r' || c == '\n');
    if needs_quotes {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// Append one record and its `\n` terminator to `out`.
pub fn write_record<I, S>(out: &mut String, fields: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let fields: Vec<S> = fields.into_iter().collect();
    // Blank lines are skipped on import, so a record with no text is written as `""`.
    let blank = match fields.as_slice() {
        [] => true,
        [only] => only.as_ref().is_empty(),
        _ => false,
    };
    if blank {
        out.push_str("\"\"\n");
        return;
    }
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(DELIMITER);
        }
        out.push_str(&escape_field(field.as_ref()));
    }
    out.push('\n');
}

/// Split delimited text into records of fields.
pub fn read_records(input: &str) -> Result<Vec<Vec<String>>, CodecError> {
    let mut records = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut in_quotes = false;
    let mut line = 1;
    let mut quote_line = 1;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                QUOTE if chars.peek() == Some(&QUOTE) => {
                    chars.next();
                    field.push(QUOTE);
                }
                QUOTE => in_quotes = false,
                _ => {
                    if c == '\n' {
                        line += 1;
                    }
                    field.push(c);
                }
            }
            continue;
        }

        match c {
            QUOTE if field.is_empty() && !quoted => {
                in_quotes = true;
                quoted = true;
                quote_line = line;
            }
            DELIMITER => {
                fields.push(std::mem::take(&mut field));
                quoted = false;
            }
            '\r' | '\n' => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                line += 1;
                if !fields.is_empty() || !field.is_empty() || quoted {
                    fields.push(std::mem::take(&mut field));
                }
                records.push(std::mem::take(&mut fields));
                quoted = false;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(CodecError::UnterminatedQuote { line: quote_line });
    }
    if !fields.is_empty() || !field.is_empty() || quoted {
        fields.push(field);
        records.push(fields);
    }
    Ok(records)
}
