use std::{fs, path::Path};

use anyhow::{Context, Result};

use crate::core::{LoadError, RawEntry};

/// Read a `.properties` file into ordered raw entries.
pub fn parse_properties_file(path: &Path) -> Result<Vec<RawEntry>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read properties file: {:?}", path))?;
    parse_properties(&content).with_context(|| format!("Failed to parse {:?}", path))
}

/// Parse `.properties` text into raw (key, value) entries, in file order.
///
/// Follows the classic properties grammar:
/// - `#` and `!` start comment lines; blank lines are skipped.
/// - The key ends at the first unescaped `=`, `:` or whitespace.
/// - A line ending in an odd number of backslashes continues on the next
///   line, whose leading whitespace is dropped.
/// - `\t`, `\n`, `\r`, `\f` and `\uXXXX` are decoded; any other `\x` is `x`.
///
/// `\,` in a value is kept verbatim so the typed table can split on unescaped
/// commas only. In a key it decodes to `,`, which lets a sub-key line such as
/// `a\,b=1` match the sub-key `a,b` of `M=a\,b,c`.
pub fn parse_properties(content: &str) -> Result<Vec<RawEntry>, LoadError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut entries = Vec::new();
    let mut logical = String::new();
    let mut logical_start = 0;
    let mut continuing = false;

    for (index, natural) in natural_lines(content).enumerate() {
        let line_no = index + 1;
        let trimmed = natural.trim_start_matches(is_blank);

        if !continuing {
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                continue;
            }
            logical_start = line_no;
        }

        let trailing_backslashes = trimmed.chars().rev().take_while(|&c| c == '\\').count();
        if trailing_backslashes % 2 == 1 {
            logical.push_str(&trimmed[..trimmed.len() - 1]);
            continuing = true;
            continue;
        }

        logical.push_str(trimmed);
        continuing = false;
        entries.push(parse_logical_line(&logical, logical_start)?);
        logical.clear();
    }

    if continuing && !logical.is_empty() {
        entries.push(parse_logical_line(&logical, logical_start)?);
    }

    Ok(entries)
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{c}')
}

/// Split on `\n`, `\r\n` or a lone `\r`.
fn natural_lines(content: &str) -> impl Iterator<Item = &str> {
    let mut rest = Some(content);
    std::iter::from_fn(move || {
        let text = rest?;
        match text.find(['\n', '\r']) {
            Some(pos) => {
                let skip = if text[pos..].starts_with("\r\n") { 2 } else { 1 };
                rest = Some(&text[pos + skip..]);
                Some(&text[..pos])
            }
            None => {
                rest = None;
                if text.is_empty() { None } else { Some(text) }
            }
        }
    })
}

fn parse_logical_line(line: &str, line_no: usize) -> Result<RawEntry, LoadError> {
    let mut key_end = line.len();
    let mut value_start = line.len();
    let mut has_separator = false;
    let mut escaped = false;

    for (pos, c) in line.char_indices() {
        if !escaped && (c == '=' || c == ':') {
            key_end = pos;
            value_start = pos + c.len_utf8();
            has_separator = true;
            break;
        }
        if !escaped && is_blank(c) {
            key_end = pos;
            value_start = pos + c.len_utf8();
            break;
        }
        escaped = c == '\\' && !escaped;
    }

    let mut rest = &line[value_start..];
    loop {
        let Some(c) = rest.chars().next() else { break };
        if is_blank(c) {
            rest = &rest[c.len_utf8()..];
        } else if !has_separator && (c == '=' || c == ':') {
            has_separator = true;
            rest = &rest[c.len_utf8()..];
        } else {
            break;
        }
    }

    let key = unescape(&line[..key_end], line_no, false)?;
    let value = unescape(rest, line_no, true)?;
    Ok(RawEntry::new(key, value).at_line(line_no))
}

fn unescape(text: &str, line_no: usize, keep_comma_escape: bool) -> Result<String, LoadError> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    let mut pending_high: Option<u16> = None;

    while let Some(c) = chars.next() {
        if c != '\\' {
            flush_surrogate(&mut out, &mut pending_high);
            out.push(c);
            continue;
        }
        let Some(escaped) = chars.next() else {
            break;
        };
        if escaped != 'u' {
            flush_surrogate(&mut out, &mut pending_high);
        }
        match escaped {
            'u' => {
                let hex: String = (0..4).filter_map(|_| chars.next()).collect();
                let unit = (hex.len() == 4)
                    .then(|| u16::from_str_radix(&hex, 16).ok())
                    .flatten()
                    .ok_or_else(|| LoadError::Syntax {
                        line: line_no,
                        message: format!("malformed \\uxxxx encoding: \\u{}", hex),
                    })?;
                push_utf16_unit(&mut out, &mut pending_high, unit);
            }
            't' => out.push('\t'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            'f' => out.push('\u{c}'),
            ',' if keep_comma_escape => out.push_str("\\,"),
            other => out.push(other),
        }
    }
    flush_surrogate(&mut out, &mut pending_high);
    Ok(out)
}

fn push_utf16_unit(out: &mut String, pending_high: &mut Option<u16>, unit: u16) {
    match (pending_high.take(), unit) {
        (Some(high), 0xDC00..=0xDFFF) => {
            out.extend(char::decode_utf16([high, unit]).map(|r| r.unwrap_or('\u{fffd}')));
        }
        (previous, 0xD800..=0xDBFF) => {
            if previous.is_some() {
                out.push('\u{fffd}');
            }
            *pending_high = Some(unit);
        }
        (previous, _) => {
            if previous.is_some() {
                out.push('\u{fffd}');
            }
            out.extend(char::decode_utf16([unit]).map(|r| r.unwrap_or('\u{fffd}')));
        }
    }
}

fn flush_surrogate(out: &mut String, pending_high: &mut Option<u16>) {
    if pending_high.take().is_some() {
        out.push('\u{fffd}');
    }
}
