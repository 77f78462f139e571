//! Quote-aware CSV tokenizing
//!
//! Only the subset the LinkedIn export needs: comma separators, fields wrapped in
//! double quotes, and `""` as an escaped quote inside a quoted field.

/// Split one CSV record into its fields.
///
/// A `"` opens a quoted section only at the start of a field; anywhere else it is a
/// literal character. Commas and newlines inside a quoted section do not end the
/// field. An unclosed quote consumes the rest of the input. The result always has one
/// more field than there are unquoted commas, so `""` yields a single empty field.
pub fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut field_start = true;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
            continue;
        }

        match c {
            '"' if field_start => in_quotes = true,
            ',' => {
                fields.push(std::mem::take(&mut current));
                field_start = true;
                continue;
            }
            _ => current.push(c),
        }
        field_start = false;
    }

    fields.push(current);
    fields
}

/// Split a whole CSV source into logical records.
///
/// Quotes follow the same rules as [`parse_line`], so a newline inside a quoted field
/// stays part of the record while a stray `"` mid-field does not. `\r\n` endings are
/// accepted. If the source ends while still inside quotes, the unterminated tail is
/// split on plain newlines instead so one broken record cannot swallow the rest.
pub fn split_records(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut records = Vec::new();
    let mut in_quotes = false;
    let mut field_start = true;
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'"' if in_quotes => {
                if bytes.get(i + 1) == Some(&b'"') {
                    i += 1;
                } else {
                    in_quotes = false;
                }
            }
            b'"' if field_start => {
                in_quotes = true;
                field_start = false;
            }
            b'\n' if !in_quotes => {
                records.push(strip_cr(&text[start..i]));
                start = i + 1;
                field_start = true;
            }
            b',' if !in_quotes => field_start = true,
            _ if !in_quotes => field_start = false,
            _ => {}
        }
        i += 1;
    }

    let tail = &text[start..];
    if in_quotes {
        records.extend(tail.split('\n').map(strip_cr));
    } else if !tail.is_empty() {
        records.push(strip_cr(tail));
    }

    records
}

/// Remove exactly one leading and one trailing `"` if present
pub fn strip_wrapping_quotes(value: &str) -> &str {
    let value = value.strip_prefix('"').unwrap_or(value);
    value.strip_suffix('"').unwrap_or(value)
}

fn strip_cr(record: &str) -> &str {
    record.strip_suffix('\r').unwrap_or(record)
}
