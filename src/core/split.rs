//! Comma splitting shared by string-array values and map sub-key lists.

/// Split `value` on commas that are not escaped with a backslash.
///
/// - `\,` produces a literal comma and does not split; the backslash is consumed.
/// - Any other backslash is kept as written.
/// - Whitespace around a separating comma is dropped.
/// - Trailing empty items are discarded, so `""` yields no items.
///
/// # Examples
///
/// ```
/// use proptable::core::split_unescaped_commas;
///
/// assert_eq!(split_unescaped_commas("a, b ,c"), vec!["a", "b", "c"]);
/// assert_eq!(split_unescaped_commas(r"a\,b,c"), vec!["a,b", "c"]);
/// assert!(split_unescaped_commas("").is_empty());
/// ```
pub fn split_unescaped_commas(value: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&',') => {
                chars.next();
                current.push(',');
            }
            ',' => {
                let trimmed_len = current.trim_end().len();
                current.truncate(trimmed_len);
                items.push(std::mem::take(&mut current));
                while chars.next_if(|c| c.is_whitespace()).is_some() {}
            }
            _ => current.push(c),
        }
    }
    items.push(current);

    while items.last().is_some_and(String::is_empty) {
        items.pop();
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_split() {
        assert_eq!(split_unescaped_commas("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_escaped_comma_is_kept_and_backslash_consumed() {
        assert_eq!(split_unescaped_commas(r"a\,b,c"), vec!["a,b", "c"]);
    }

    #[test]
    fn test_other_backslashes_are_kept() {
        assert_eq!(split_unescaped_commas(r"C:\dir,x"), vec![r"C:\dir", "x"]);
    }

    #[test]
    fn test_whitespace_around_separators_is_dropped() {
        assert_eq!(
            split_unescaped_commas(" lead , mid ,tail "),
            vec![" lead", "mid", "tail "]
        );
    }

    #[test]
    fn test_empty_value_has_no_items() {
        assert!(split_unescaped_commas("").is_empty());
    }

    #[test]
    fn test_trailing_empty_items_are_discarded() {
        assert_eq!(split_unescaped_commas("a,b,,"), vec!["a", "b"]);
        assert!(split_unescaped_commas(",,").is_empty());
    }

    #[test]
    fn test_inner_empty_items_are_kept() {
        assert_eq!(split_unescaped_commas("a,,b"), vec!["a", "", "b"]);
    }
}
