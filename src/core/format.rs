//! Positional message patterns.
//!
//! Syntax:
//!
//! - `{n}` is replaced by the `n`-th argument.
//! - `{n,type}` and `{n,type,style}` are accepted; type and style are ignored
//!   and the argument is rendered with its `Display` implementation.
//! - `'...'` quotes a literal section, so `'{0}'` renders as `{0}`.
//! - `''` renders a single quote, inside or outside a quoted section.
//! - `{n}` with no matching argument is rendered verbatim.
//!
//! An unmatched `{` or a non-numeric argument index is a [`PatternError`].

use std::fmt::{self, Display, Write};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("unmatched '{{' at position {position}")]
    UnmatchedBrace { position: usize },

    #[error("invalid argument index \"{text}\" at position {position}")]
    InvalidArgumentIndex { position: usize, text: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Literal(String),
    Argument(usize),
}

/// A parsed message pattern, reusable across argument lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagePattern {
    parts: Vec<Part>,
}

impl MessagePattern {
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut in_quote = false;
        let mut chars = pattern.chars().enumerate().peekable();

        while let Some((position, c)) = chars.next() {
            match c {
                '\'' => {
                    if chars.next_if(|&(_, next)| next == '\'').is_some() {
                        literal.push('\'');
                    } else {
                        in_quote = !in_quote;
                    }
                }
                '{' if !in_quote => {
                    if !literal.is_empty() {
                        parts.push(Part::Literal(std::mem::take(&mut literal)));
                    }
                    let index = parse_argument(&mut chars, position)?;
                    parts.push(Part::Argument(index));
                }
                _ => literal.push(c),
            }
        }

        if !literal.is_empty() {
            parts.push(Part::Literal(literal));
        }
        Ok(Self { parts })
    }

    /// Render the pattern with `args`.
    pub fn format(&self, args: &[&dyn Display]) -> String {
        let mut out = String::new();
        for part in &self.parts {
            match part {
                Part::Literal(text) => out.push_str(text),
                Part::Argument(index) => match args.get(*index) {
                    Some(arg) => {
                        let _ = write!(out, "{}", arg);
                    }
                    None => {
                        let _ = write!(out, "{{{}}}", index);
                    }
                },
            }
        }
        out
    }

    /// Number of arguments the pattern can consume (highest index + 1).
    pub fn arity(&self) -> usize {
        self.parts
            .iter()
            .filter_map(|p| match p {
                Part::Argument(i) => Some(i + 1),
                Part::Literal(_) => None,
            })
            .max()
            .unwrap_or(0)
    }
}

impl fmt::Display for MessagePattern {
    /// Writes the pattern back in canonical form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.parts {
            match part {
                Part::Literal(text) => {
                    for c in text.chars() {
                        match c {
                            '\'' => f.write_str("''")?,
                            '{' | '}' => write!(f, "'{}'", c)?,
                            _ => f.write_char(c)?,
                        }
                    }
                }
                Part::Argument(index) => write!(f, "{{{}}}", index)?,
            }
        }
        Ok(())
    }
}

/// Parse and render `pattern` in one step.
///
/// # Examples
///
/// ```
/// use proptable::core::format_message;
///
/// let out = format_message("Hello {0}, you have {1} messages", &[&"Ann", &3]).unwrap();
/// assert_eq!(out, "Hello Ann, you have 3 messages");
/// ```
pub fn format_message(pattern: &str, args: &[&dyn Display]) -> Result<String, PatternError> {
    Ok(MessagePattern::parse(pattern)?.format(args))
}

/// Consume an argument body after `{`, up to and including its closing `}`.
fn parse_argument<I>(
    chars: &mut std::iter::Peekable<I>,
    open_position: usize,
) -> Result<usize, PatternError>
where
    I: Iterator<Item = (usize, char)>,
{
    let mut index_text = String::new();
    let mut in_index = true;
    let mut depth = 0usize;
    let mut in_quote = false;

    for (_, c) in chars.by_ref() {
        if in_index {
            match c {
                ',' => in_index = false,
                '}' => return parse_index(&index_text, open_position),
                _ => index_text.push(c),
            }
            continue;
        }

        // Type and style segments: only nesting matters.
        match c {
            '\'' => in_quote = !in_quote,
            '{' if !in_quote => depth += 1,
            '}' if !in_quote => {
                if depth == 0 {
                    return parse_index(&index_text, open_position);
                }
                depth -= 1;
            }
            _ => {}
        }
    }

    Err(PatternError::UnmatchedBrace {
        position: open_position,
    })
}

fn parse_index(text: &str, position: usize) -> Result<usize, PatternError> {
    text.trim()
        .parse::<usize>()
        .map_err(|_| PatternError::InvalidArgumentIndex {
            position,
            text: text.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_argument() {
        assert_eq!(
            format_message("Hello {0}", &[&"World"]).unwrap(),
            "Hello World"
        );
    }

    #[test]
    fn test_arguments_out_of_order_and_repeated() {
        assert_eq!(
            format_message("{1} before {0}, {1} again", &[&"a", &"b"]).unwrap(),
            "b before a, b again"
        );
    }

    #[test]
    fn test_non_string_arguments_use_display() {
        assert_eq!(
            format_message("{0} + {1} = {2}", &[&1, &2.5, &3.5]).unwrap(),
            "1 + 2.5 = 3.5"
        );
    }

    #[test]
    fn test_missing_argument_is_rendered_verbatim() {
        assert_eq!(format_message("{0} and {3}", &[&"x"]).unwrap(), "x and {3}");
    }

    #[test]
    fn test_type_and_style_are_ignored() {
        assert_eq!(
            format_message("{0,number,#.##} items", &[&42]).unwrap(),
            "42 items"
        );
        assert_eq!(
            format_message("{0,choice,0#none|1#{0} item}", &[&1]).unwrap(),
            "1"
        );
    }

    #[test]
    fn test_quotes() {
        assert_eq!(format_message("It''s {0}", &[&"ok"]).unwrap(), "It's ok");
        assert_eq!(format_message("'{0}' is {0}", &[&"x"]).unwrap(), "{0} is x");
        assert_eq!(format_message("'it''s'", &[]).unwrap(), "it's");
    }

    #[test]
    fn test_stray_closing_brace_is_literal() {
        assert_eq!(format_message("a } b", &[]).unwrap(), "a } b");
    }

    #[test]
    fn test_unmatched_brace() {
        assert_eq!(
            format_message("Hello {0", &[&"x"]),
            Err(PatternError::UnmatchedBrace { position: 6 })
        );
    }

    #[test]
    fn test_invalid_index() {
        let err = format_message("Hello {name}", &[&"x"]).unwrap_err();
        assert_eq!(
            err,
            PatternError::InvalidArgumentIndex {
                position: 6,
                text: "name".to_string()
            }
        );
    }

    #[test]
    fn test_index_whitespace_is_trimmed() {
        assert_eq!(format_message("{ 0 }", &[&"x"]).unwrap(), "x");
    }

    #[test]
    fn test_arity() {
        assert_eq!(MessagePattern::parse("none").unwrap().arity(), 0);
        assert_eq!(MessagePattern::parse("{2} {0}").unwrap().arity(), 3);
    }

    #[test]
    fn test_display_round_trips_literals() {
        let pattern = MessagePattern::parse("It''s '{'{0}'}'").unwrap();
        assert_eq!(pattern.to_string(), "It''s '{'{0}'}'");
        assert_eq!(pattern.format(&[&"x"]), "It's {x}");
    }
}
