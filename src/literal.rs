//! Literal codec.
//!
//! Maps between a [`Value`] and its textual literal. Classification is
//! order-sensitive: the first rule that matches wins.
//!
//! | Order | Pattern | Result |
//! |-------|---------|--------|
//! | 1 | `true` / `false`, any case | `Bool` |
//! | 2 | `uuid('<uuid>')` | `Uuid` |
//! | 3 | `'...'` or `"..."` | `String` |
//! | 4 | `-?digits` | `Int` |
//! | 5 | `-?digits` + `L` | `Long` |
//! | 6 | `-?digits.digits` + `D` | `Double` |
//! | 7 | `'<char>'C` | `Char` |
//! | 8 | `-?digits` + `S` | `Short` |
//! | 9 | `-?digits` + `B` | `Byte` |
//! | 10 | `[ ... ]` | `List` |
//! | 11 | anything else | `String`, verbatim |
//!
//! A literal whose digits overflow its tagged type does not match that rule
//! and ends up as a verbatim string.
//!
//! ## Strings
//!
//! Quoted strings use backslash escapes: `\\`, `\'`, `\"`, `\n`, `\r` and
//! `\t` are recognised when parsing, any other backslash is kept as is.
//! Rendering escapes backslashes, the active quote character and line breaks,
//! so every string survives a save/load cycle on a single line.
//!
//! ## Examples
//!
//! ```rust
//! use datascript::literal::{classify, render};
//! use datascript::{Quote, Value};
//!
//! assert_eq!(classify("42L"), Value::Long(42));
//! assert_eq!(classify("'x'C"), Value::Char('x'));
//! assert_eq!(classify("plain text"), Value::from("plain text"));
//!
//! assert_eq!(render(&Value::Short(7), Quote::Single), "7S");
//! ```

use crate::options::Quote;
use crate::Value;
use uuid::Uuid;

const UUID_PREFIX: &str = "uuid(";

/// Classifies a literal into a value.
///
/// The input is trimmed first. A literal starting with `[` is parsed as a
/// complete list; the caller is responsible for joining multi-line lists.
#[must_use]
pub fn classify(literal: &str) -> Value {
    let literal = literal.trim();

    if let Some(value) = classify_scalar(literal) {
        return value;
    }

    if literal.starts_with('[') {
        return Value::List(parse_list(literal));
    }

    Value::String(literal.to_string())
}

/// Classifies a single list element.
///
/// Identical to [`classify`] except that bracketed elements are not parsed as
/// lists: nested lists have no syntax, so they are kept as verbatim strings.
#[must_use]
pub fn classify_element(literal: &str) -> Value {
    let literal = literal.trim();
    classify_scalar(literal).unwrap_or_else(|| Value::String(literal.to_string()))
}

fn classify_scalar(literal: &str) -> Option<Value> {
    if literal.eq_ignore_ascii_case("true") {
        return Some(Value::Bool(true));
    }
    if literal.eq_ignore_ascii_case("false") {
        return Some(Value::Bool(false));
    }

    if let Some(uuid) = parse_uuid(literal) {
        return Some(Value::Uuid(uuid));
    }

    if let Some(s) = unquote(literal) {
        return Some(Value::String(s));
    }

    if is_integer(literal) {
        if let Ok(i) = literal.parse::<i32>() {
            return Some(Value::Int(i));
        }
    }

    if let Some(body) = literal.strip_suffix('L').filter(|b| is_integer(b)) {
        if let Ok(l) = body.parse::<i64>() {
            return Some(Value::Long(l));
        }
    }

    if let Some(d) = literal.strip_suffix('D').and_then(parse_double) {
        return Some(Value::Double(d));
    }

    if let Some(c) = parse_char(literal) {
        return Some(Value::Char(c));
    }

    if let Some(body) = literal.strip_suffix('S').filter(|b| is_integer(b)) {
        if let Ok(s) = body.parse::<i16>() {
            return Some(Value::Short(s));
        }
    }

    if let Some(body) = literal.strip_suffix('B').filter(|b| is_integer(b)) {
        if let Ok(b) = body.parse::<i8>() {
            return Some(Value::Byte(b));
        }
    }

    None
}

/// `-?[0-9]+`
fn is_integer(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// `-?[0-9]+\.[0-9]+`, plus the non-finite spellings.
fn parse_double(body: &str) -> Option<f64> {
    match body {
        "NaN" => return Some(f64::NAN),
        "Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    let unsigned = body.strip_prefix('-').unwrap_or(body);
    let (whole, fraction) = unsigned.split_once('.')?;
    if whole.is_empty()
        || fraction.is_empty()
        || !whole.bytes().all(|b| b.is_ascii_digit())
        || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    body.parse::<f64>().ok()
}

fn parse_uuid(literal: &str) -> Option<Uuid> {
    let inner = literal.strip_prefix(UUID_PREFIX)?.strip_suffix(')')?;
    let body = unquote_raw(inner)?;
    Uuid::parse_str(body).ok()
}

fn parse_char(literal: &str) -> Option<char> {
    let body = literal.strip_prefix('\'')?.strip_suffix("'C")?;
    let mut chars = body.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(c), None, None) => Some(c),
        (Some('\\'), Some(escaped), None) => unescape_char(escaped),
        _ => None,
    }
}

/// Strips a matching pair of quotes without unescaping.
fn unquote_raw(s: &str) -> Option<&str> {
    ['\'', '"'].into_iter().find_map(|q| {
        if s.len() >= 2 && s.starts_with(q) && s.ends_with(q) {
            Some(&s[1..s.len() - 1])
        } else {
            None
        }
    })
}

fn unquote(s: &str) -> Option<String> {
    unquote_raw(s).map(unescape)
}

fn unescape_char(c: char) -> Option<char> {
    match c {
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        '\\' | '\'' | '"' => Some(c),
        _ => None,
    }
}

/// Resolves backslash escapes in the body of a quoted string.
///
/// Unknown escapes and a trailing backslash are preserved literally.
///
/// # Examples
///
/// ```rust
/// use datascript::literal::unescape;
///
/// assert_eq!(unescape(r"it\'s"), "it's");
/// assert_eq!(unescape(r"C:\dir"), r"C:\dir");
/// ```
#[must_use]
pub fn unescape(body: &str) -> String {
    let mut result = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }
        match chars.next() {
            Some(next) => match unescape_char(next) {
                Some(resolved) => result.push(resolved),
                None => {
                    result.push('\\');
                    result.push(next);
                }
            },
            None => result.push('\\'),
        }
    }

    result
}

/// Escapes a string body for the given quote character.
///
/// # Examples
///
/// ```rust
/// use datascript::literal::escape;
/// use datascript::Quote;
///
/// assert_eq!(escape("it's", Quote::Single), r"it\'s");
/// assert_eq!(escape("it's", Quote::Double), "it's");
/// ```
#[must_use]
pub fn escape(s: &str, quote: Quote) -> String {
    let q = quote.as_char();
    let mut result = String::with_capacity(s.len() + 2);

    for ch in s.chars() {
        match ch {
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            c if c == q => {
                result.push('\\');
                result.push(c);
            }
            c => result.push(c),
        }
    }

    result
}

/// Parses a complete bracketed list literal.
///
/// Missing closing brackets are tolerated. Empty unquoted elements (for
/// example after a trailing comma) are dropped.
#[must_use]
pub fn parse_list(literal: &str) -> Vec<Value> {
    let literal = literal.trim();
    let inner = literal.strip_prefix('[').unwrap_or(literal);
    let inner = inner.strip_suffix(']').unwrap_or(inner);

    split_elements(inner)
        .into_iter()
        .map(classify_element)
        .collect()
}

/// Splits a list interior on top-level commas.
///
/// Commas inside quoted elements do not split. A quote only opens a string
/// at the start of an element (or right after `uuid(`), so apostrophes in
/// unquoted text are harmless.
///
/// # Examples
///
/// ```rust
/// use datascript::literal::split_elements;
///
/// assert_eq!(split_elements("1, 'a,b', 3L"), vec!["1", "'a,b'", "3L"]);
/// assert_eq!(split_elements(""), Vec::<&str>::new());
/// ```
#[must_use]
pub fn split_elements(interior: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, ch) in interior.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }

        match quote {
            Some(q) => {
                if ch == '\\' {
                    escaped = true;
                } else if ch == q {
                    quote = None;
                }
            }
            None => match ch {
                '\'' | '"' => {
                    let so_far = interior[start..i].trim_start();
                    if so_far.is_empty() || so_far == UUID_PREFIX {
                        quote = Some(ch);
                    }
                }
                ',' => {
                    parts.push(&interior[start..i]);
                    start = i + 1;
                }
                _ => {}
            },
        }
    }
    parts.push(&interior[start..]);

    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Renders a value as a literal. Lists are laid out for depth zero.
#[must_use]
pub fn render(value: &Value, quote: Quote) -> String {
    render_at(value, quote, "")
}

/// Renders a value as a literal, indenting list elements relative to
/// `indent`, the indentation of the line the literal starts on.
///
/// # Examples
///
/// ```rust
/// use datascript::literal::render_at;
/// use datascript::{Quote, Value};
///
/// let list = Value::List(vec![Value::Int(1), Value::from("two")]);
/// assert_eq!(render_at(&list, Quote::Single, "  "), "[\n    1,\n    'two'\n  ]");
/// ```
#[must_use]
pub fn render_at(value: &Value, quote: Quote, indent: &str) -> String {
    match value {
        Value::List(list) if list.is_empty() => "[]".to_string(),
        Value::List(list) => {
            let mut out = String::from("[");
            for (i, element) in list.iter().enumerate() {
                out.push('\n');
                out.push_str(indent);
                out.push_str("  ");
                out.push_str(&render_element(element, quote));
                if i + 1 < list.len() {
                    out.push(',');
                }
            }
            out.push('\n');
            out.push_str(indent);
            out.push(']');
            out
        }
        scalar => render_element(scalar, quote),
    }
}

fn render_element(value: &Value, quote: Quote) -> String {
    match value {
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Long(l) => format!("{}L", l),
        Value::Double(d) => render_double(*d),
        Value::Short(s) => format!("{}S", s),
        Value::Byte(b) => format!("{}B", b),
        Value::Char(c) => render_char(*c),
        Value::Uuid(u) => format!("uuid('{}')", u),
        Value::String(s) => {
            let q = quote.as_char();
            format!("{}{}{}", q, escape(s, quote), q)
        }
        // Nested lists have no syntax: they are written as a quoted string of
        // their inline form and read back as that string.
        Value::List(list) => {
            let inline = format!(
                "[{}]",
                list.iter()
                    .map(|v| render_element(v, quote))
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            let q = quote.as_char();
            format!("{}{}{}", q, escape(&inline, quote), q)
        }
    }
}

fn render_double(d: f64) -> String {
    if d.is_nan() {
        return "NaND".to_string();
    }
    if d.is_infinite() {
        return if d > 0.0 { "InfinityD" } else { "-InfinityD" }.to_string();
    }

    let mut out = d.to_string();
    if !out.contains('.') {
        out.push_str(".0");
    }
    out.push('D');
    out
}

fn render_char(c: char) -> String {
    match c {
        '\n' => "'\\n'C".to_string(),
        '\r' => "'\\r'C".to_string(),
        '\t' => "'\\t'C".to_string(),
        '\\' => "'\\\\'C".to_string(),
        c => format!("'{}'C", c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_table() {
        assert_eq!(classify("true"), Value::Bool(true));
        assert_eq!(classify("FALSE"), Value::Bool(false));
        assert_eq!(classify("30"), Value::Int(30));
        assert_eq!(classify("-30"), Value::Int(-30));
        assert_eq!(classify("30L"), Value::Long(30));
        assert_eq!(classify("3.5D"), Value::Double(3.5));
        assert_eq!(classify("'x'C"), Value::Char('x'));
        assert_eq!(classify("12S"), Value::Short(12));
        assert_eq!(classify("-12B"), Value::Byte(-12));
        assert_eq!(classify("'quoted'"), Value::from("quoted"));
        assert_eq!(classify("\"quoted\""), Value::from("quoted"));
        assert_eq!(classify("bare words"), Value::from("bare words"));
    }

    #[test]
    fn test_rule_order() {
        // Quoted "true" is a string, bare "True" is a bool
        assert_eq!(classify("'true'"), Value::from("true"));
        assert_eq!(classify("True"), Value::Bool(true));
        // Quoted digits stay strings
        assert_eq!(classify("'42'"), Value::from("42"));
    }

    #[test]
    fn test_overflow_falls_back_to_string() {
        assert_eq!(classify("99999999999"), Value::from("99999999999"));
        assert_eq!(classify("99999999999L"), Value::Long(99_999_999_999));
        assert_eq!(classify("300B"), Value::from("300B"));
    }

    #[test]
    fn test_malformed_numbers() {
        assert_eq!(classify("3.D"), Value::from("3.D"));
        assert_eq!(classify(".5D"), Value::from(".5D"));
        assert_eq!(classify("3D"), Value::from("3D"));
        assert_eq!(classify("-L"), Value::from("-L"));
        assert_eq!(classify("1_000"), Value::from("1_000"));
    }

    #[test]
    fn test_uuid() {
        let id = Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        assert_eq!(
            classify("uuid('67e55044-10b1-426f-9247-bb680e5fe0c8')"),
            Value::Uuid(id)
        );
        assert_eq!(render(&Value::Uuid(id), Quote::Double), format!("uuid('{}')", id));
        // Not a valid uuid: kept verbatim
        assert_eq!(classify("uuid('nope')"), Value::from("uuid('nope')"));
    }

    #[test]
    fn test_char_escapes() {
        assert_eq!(classify("'''C"), Value::Char('\''));
        assert_eq!(classify("'\\n'C"), Value::Char('\n'));
        assert_eq!(classify("'\\'C"), Value::Char('\\'));
        assert_eq!(classify("'ab'C"), Value::from("'ab'C"));

        for c in ['x', '\'', '\n', '\\', '\t', ',', 'é'] {
            assert_eq!(classify(&render(&Value::Char(c), Quote::Single)), Value::Char(c));
        }
    }

    #[test]
    fn test_string_escapes_round_trip() {
        for s in ["it's", "say \"hi\"", "a\\b", "line\nbreak", "", " padded "] {
            for quote in [Quote::Single, Quote::Double] {
                let literal = render(&Value::from(s), quote);
                assert_eq!(classify(&literal), Value::from(s), "literal: {}", literal);
            }
        }
    }

    #[test]
    fn test_double_rendering() {
        assert_eq!(render(&Value::Double(3.0), Quote::Single), "3.0D");
        assert_eq!(render(&Value::Double(-0.25), Quote::Single), "-0.25D");
        assert_eq!(render(&Value::Double(f64::INFINITY), Quote::Single), "InfinityD");
        assert_eq!(classify("-InfinityD"), Value::Double(f64::NEG_INFINITY));
        assert!(classify("NaND").as_f64().unwrap().is_nan());

        let big = 1e300;
        assert_eq!(classify(&render(&Value::Double(big), Quote::Single)), Value::Double(big));
    }

    #[test]
    fn test_list_single_line() {
        assert_eq!(classify("[]"), Value::List(vec![]));
        assert_eq!(
            classify("[1, 'two', 3L]"),
            Value::List(vec![Value::Int(1), Value::from("two"), Value::Long(3)])
        );
        assert_eq!(
            classify("[1,2,]"),
            Value::List(vec![Value::Int(1), Value::Int(2)])
        );
    }

    #[test]
    fn test_list_element_rules() {
        let list = parse_list("[true, uuid('67e55044-10b1-426f-9247-bb680e5fe0c8'), ',', [x]]");
        assert_eq!(list[0], Value::Bool(true));
        assert!(list[1].is_uuid());
        assert_eq!(list[2], Value::from(","));
        assert_eq!(list[3], Value::from("[x]"));
    }

    #[test]
    fn test_split_ignores_inner_apostrophes() {
        assert_eq!(split_elements("don't, stop"), vec!["don't", "stop"]);
        assert_eq!(
            split_elements("','C, '''C, 'a'"),
            vec!["','C", "'''C", "'a'"]
        );
    }

    #[test]
    fn test_render_list() {
        let list = Value::List(vec![Value::Int(1), Value::from("two"), Value::Long(3)]);
        assert_eq!(render(&list, Quote::Single), "[\n  1,\n  'two',\n  3L\n]");
        assert_eq!(render(&Value::List(vec![]), Quote::Single), "[]");
    }
}
