// Strict parsers for the list literals stored in the dataset's serialized
// columns, e.g. `[51.5, 0.0, 13.0]` or `['preheat oven', "don't burn it"]`.
//
// Only flat lists of numbers or quoted strings are accepted. Anything else
// (names, calls, operators, nesting) is rejected with `None`.

use std::iter::Peekable;
use std::str::Chars;

/// Parse a flat list of numeric literals.
///
/// Every element must be a finite decimal number; the whole input is
/// rejected if any element is not.
pub fn parse_number_list(raw: &str) -> Option<Vec<f64>> {
    let inner = strip_brackets(raw)?.trim();
    if inner.is_empty() {
        return Some(Vec::new());
    }

    // A single trailing comma is tolerated, as in `[1.0, 2.0,]`
    let inner = inner.strip_suffix(',').unwrap_or(inner);

    inner
        .split(',')
        .map(|item| parse_number(item.trim()))
        .collect()
}

/// Parse a flat list of single- or double-quoted string literals.
pub fn parse_string_list(raw: &str) -> Option<Vec<String>> {
    let inner = strip_brackets(raw)?;
    let mut chars = inner.chars().peekable();
    let mut items = Vec::new();

    loop {
        skip_whitespace(&mut chars);
        match chars.next() {
            None => break,
            Some(quote @ ('\'' | '"')) => {
                items.push(read_quoted(&mut chars, quote)?);

                skip_whitespace(&mut chars);
                match chars.next() {
                    None => break,
                    Some(',') => continue,
                    Some(_) => return None,
                }
            }
            Some(_) => return None,
        }
    }

    Some(items)
}

fn strip_brackets(raw: &str) -> Option<&str> {
    raw.trim().strip_prefix('[')?.strip_suffix(']')
}

fn parse_number(item: &str) -> Option<f64> {
    if item.is_empty()
        || !item
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return None;
    }

    item.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn skip_whitespace(chars: &mut Peekable<Chars<'_>>) {
    while chars.next_if(|c| c.is_whitespace()).is_some() {}
}

fn read_quoted(chars: &mut Peekable<Chars<'_>>, quote: char) -> Option<String> {
    let mut value = String::new();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next()? {
                'n' => value.push('\n'),
                't' => value.push('\t'),
                'r' => value.push('\r'),
                '\\' => value.push('\\'),
                '\'' => value.push('\''),
                '"' => value.push('"'),
                // Unknown escapes are kept verbatim
                other => {
                    value.push('\\');
                    value.push(other);
                }
            },
            c if c == quote => return Some(value),
            c => value.push(c),
        }
    }

    // Unterminated string
    None
}
