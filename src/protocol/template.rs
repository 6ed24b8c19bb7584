//! URI template expansion for templated links.
//!
//! Supports the subset of [RFC 6570] that GEDCOM X servers publish:
//!
//! | Expression | Example | Expansion with `pid=P1`, `q=a b` |
//! |------------|---------|-----------------------------------|
//! | `{var}` | `/persons/{pid}` | `/persons/P1` |
//! | `{+var}` | `{+base}/x` | reserved characters kept |
//! | `{/var}` | `/persons{/pid}` | `/persons/P1` |
//! | `{?a,b}` | `/search{?q,count}` | `/search?q=a%20b` |
//! | `{&a}` | `/search?x=1{&q}` | `/search?x=1&q=a%20b` |
//!
//! Variables without a value are dropped from the expansion. Prefix (`:n`)
//! and explode (`*`) modifiers are accepted and ignored.
//!
//! [RFC 6570]: https://datatracker.ietf.org/doc/html/rfc6570

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Expand `template` with the given variables.
///
/// # Examples
///
/// ```
/// use gedcomx_client::protocol::expand_template;
///
/// let uri = expand_template(
///     "https://example.com/persons/{pid}{?access_token}",
///     &[("pid", "KWQS-BBQ")],
/// );
/// assert_eq!(uri, "https://example.com/persons/KWQS-BBQ");
/// ```
pub fn expand_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            // unterminated expression, keep it literally
            out.push_str(&rest[open..]);
            return out;
        };
        expand_expression(&after[..close], vars, &mut out);
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    out
}

fn expand_expression(expression: &str, vars: &[(&str, &str)], out: &mut String) {
    let (operator, names) = match expression.chars().next() {
        Some(op @ ('+' | '?' | '&' | '/' | '#')) => (Some(op), &expression[1..]),
        _ => (None, expression),
    };

    let defined: Vec<(&str, &str)> = names
        .split(',')
        .map(|name| name.trim().trim_end_matches('*'))
        .map(|name| name.split(':').next().unwrap_or(name))
        .filter_map(|name| {
            vars.iter()
                .find(|(n, _)| *n == name)
                .map(|(n, v)| (*n, *v))
        })
        .collect();
    if defined.is_empty() {
        return;
    }

    match operator {
        None => {
            let values: Vec<String> = defined.iter().map(|(_, v)| encode(v, false)).collect();
            out.push_str(&values.join(","));
        }
        Some('+') => {
            let values: Vec<String> = defined.iter().map(|(_, v)| encode(v, true)).collect();
            out.push_str(&values.join(","));
        }
        Some('#') => {
            let values: Vec<String> = defined.iter().map(|(_, v)| encode(v, true)).collect();
            out.push('#');
            out.push_str(&values.join(","));
        }
        Some('/') => {
            for (_, value) in &defined {
                out.push('/');
                out.push_str(&encode(value, false));
            }
        }
        Some(op) => {
            for (index, (name, value)) in defined.iter().enumerate() {
                out.push(if op == '?' && index == 0 { '?' } else { '&' });
                out.push_str(name);
                out.push('=');
                out.push_str(&encode(value, false));
            }
        }
    }
}

/// Everything except RFC 3986 unreserved characters.
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Unreserved plus the reserved set, for `{+var}` and `{#var}`.
const RESERVED: &AsciiSet = &UNRESERVED
    .remove(b':')
    .remove(b'/')
    .remove(b'?')
    .remove(b'#')
    .remove(b'[')
    .remove(b']')
    .remove(b'@')
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=');

fn encode(value: &str, allow_reserved: bool) -> String {
    let set = if allow_reserved { RESERVED } else { UNRESERVED };
    utf8_percent_encode(value, set).to_string()
}
