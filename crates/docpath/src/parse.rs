//! Parsing the rendered path form back into keys.
//!
//! Accepts exactly what [`Path`](crate::Path) and
//! [`Template`](crate::Template) render: a bare first name, `.name` for later
//! names, `[n]` for indices and `[?]` (or `[*]`) for placeholders. Tokens have
//! no textual form and cannot be parsed.

use crate::{Key, PathError, PathResult, Slot};

/// Parse a rendered path such as `a.e[0].f`. The empty string is the root.
///
/// # Examples
///
/// ```
/// use docpath::{parse_keys, Key};
///
/// let keys = parse_keys("users[0].name").unwrap();
/// assert_eq!(keys, vec![Key::name("users"), Key::Index(0), Key::name("name")]);
/// assert!(parse_keys("users[?]").is_err());
/// ```
pub fn parse_keys(input: &str) -> PathResult<Vec<Key>> {
    scan(input)?
        .into_iter()
        .map(|(offset, slot)| match slot {
            Slot::Key(key) => Ok(key),
            Slot::Placeholder => Err(PathError::invalid_syntax(
                input,
                offset,
                "placeholder not allowed in a concrete path",
            )),
        })
        .collect()
}

/// Parse a rendered template such as `a.e[?].f`.
pub fn parse_slots(input: &str) -> PathResult<Vec<Slot>> {
    Ok(scan(input)?.into_iter().map(|(_, slot)| slot).collect())
}

fn scan(input: &str) -> PathResult<Vec<(usize, Slot)>> {
    let mut out = Vec::new();
    let mut pos = 0;

    while pos < input.len() {
        let rest = &input[pos..];
        if rest.starts_with('[') {
            let close = rest
                .find(']')
                .map(|i| pos + i)
                .ok_or_else(|| PathError::invalid_syntax(input, pos, "unclosed '['"))?;
            let inner = &input[pos + 1..close];
            let slot = match inner {
                "?" | "*" => Slot::Placeholder,
                _ => inner
                    .parse::<usize>()
                    .map(|i| Slot::Key(Key::Index(i)))
                    .map_err(|_| {
                        PathError::invalid_syntax(
                            input,
                            pos + 1,
                            format!("expected an index or placeholder, found '{inner}'"),
                        )
                    })?,
            };
            out.push((pos, slot));
            pos = close + 1;
        } else if rest.starts_with('.') {
            if out.is_empty() {
                return Err(PathError::invalid_syntax(input, pos, "leading '.'"));
            }
            let (name, end) = read_name(input, pos + 1)?;
            out.push((pos + 1, Slot::Key(Key::name(name))));
            pos = end;
        } else if out.is_empty() {
            let (name, end) = read_name(input, pos)?;
            out.push((pos, Slot::Key(Key::name(name))));
            pos = end;
        } else {
            return Err(PathError::invalid_syntax(input, pos, "expected '.' or '['"));
        }
    }
    Ok(out)
}

fn read_name(input: &str, start: usize) -> PathResult<(&str, usize)> {
    let end = input[start..]
        .find(['.', '['])
        .map_or(input.len(), |i| start + i);
    if end == start {
        return Err(PathError::invalid_syntax(input, start, "empty name"));
    }
    Ok((&input[start..end], end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys;

    #[test]
    fn test_parse_empty_is_root() {
        assert!(parse_keys("").unwrap().is_empty());
        assert!(parse_slots("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_nested() {
        assert_eq!(parse_keys("a.e[1].f").unwrap(), keys!["a", "e", 1usize, "f"]);
        assert_eq!(parse_keys("[2][3]").unwrap(), keys![2usize, 3usize]);
    }

    #[test]
    fn test_parse_slots_placeholders() {
        let slots = parse_slots("a.h[?].i[*]").unwrap();
        assert_eq!(
            slots,
            vec![
                Slot::Key(Key::name("a")),
                Slot::Key(Key::name("h")),
                Slot::Placeholder,
                Slot::Key(Key::name("i")),
                Slot::Placeholder,
            ]
        );
    }

    #[test]
    fn test_parse_errors() {
        let cases = [
            (".a", 0),
            ("a..b", 2),
            ("a[1", 1),
            ("a[x]", 2),
            ("a.", 2),
            ("a[0]b", 4),
        ];
        for (input, offset) in cases {
            match parse_slots(input) {
                Err(PathError::InvalidSyntax { offset: got, .. }) => {
                    assert_eq!(got, offset, "offset for {input:?}")
                }
                other => panic!("expected InvalidSyntax for {input:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_parse_keys_rejects_placeholder() {
        let err = parse_keys("a[?]").unwrap_err();
        assert!(err.to_string().contains("placeholder not allowed"));
    }
}
