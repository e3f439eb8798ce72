// SPDX-FileCopyrightText: 2022 Helsing GmbH
//
// SPDX-License-Identifier: Apache-2.0

//! Lexical forms of literals in Turtle.

use std::fmt::{self, Write};

use oxrdf::LiteralRef;
use oxrdf::vocab::xsd;

fn strip_sign(value: &[u8]) -> &[u8] {
    match value {
        [b'+' | b'-', rest @ ..] => rest,
        _ => value,
    }
}

fn skip_digits(value: &[u8]) -> (&[u8], bool) {
    let digits = value.iter().take_while(|c| c.is_ascii_digit()).count();
    (value.get(digits..).unwrap_or_default(), digits > 0)
}

fn all_digits(value: &[u8]) -> bool {
    !value.is_empty() && value.iter().all(u8::is_ascii_digit)
}

#[must_use]
pub fn is_turtle_integer(value: &str) -> bool {
    // [19] 	INTEGER 	::= 	[+-]? [0-9]+
    all_digits(strip_sign(value.as_bytes()))
}

#[must_use]
pub fn is_turtle_decimal(value: &str) -> bool {
    // [20] 	DECIMAL 	::= 	[+-]? [0-9]* '.' [0-9]+
    let (value, _) = skip_digits(strip_sign(value.as_bytes()));
    match value {
        [b'.', fraction @ ..] => all_digits(fraction),
        _ => false,
    }
}

#[must_use]
pub fn is_turtle_double(value: &str) -> bool {
    // [21] 	DOUBLE 	::= 	[+-]? ([0-9]+ '.' [0-9]* EXPONENT | '.' [0-9]+ EXPONENT | [0-9]+ EXPONENT)
    // [154s] 	EXPONENT 	::= 	[eE] [+-]? [0-9]+
    let (value, with_before) = skip_digits(strip_sign(value.as_bytes()));
    let (value, with_after) = match value {
        [b'.', fraction @ ..] => skip_digits(fraction),
        _ => (value, false),
    };
    match value {
        [b'e' | b'E', exponent @ ..] => {
            (with_before || with_after) && all_digits(strip_sign(exponent))
        }
        _ => false,
    }
}

/// The form of a literal without quotes and datatype,
/// if Turtle has one for it that keeps the lexical form as is.
#[must_use]
pub fn plain_form<'graph>(literal: LiteralRef<'graph>) -> Option<&'graph str> {
    let value = literal.value();
    let datatype = literal.datatype();
    let plain = if datatype == xsd::BOOLEAN {
        value == "true" || value == "false"
    } else if datatype == xsd::INTEGER {
        is_turtle_integer(value)
    } else if datatype == xsd::DECIMAL {
        is_turtle_decimal(value)
    } else if datatype == xsd::DOUBLE {
        is_turtle_double(value)
    } else {
        false
    };
    plain.then_some(value)
}

/// Writes a string in double quotes, with all special characters escaped.
pub fn print_quoted_str(string: &str, f: &mut impl Write) -> fmt::Result {
    f.write_char('"')?;
    for c in string.chars() {
        match c {
            '\u{08}' => f.write_str("\\b"),
            '\t' => f.write_str("\\t"),
            '\n' => f.write_str("\\n"),
            '\u{0C}' => f.write_str("\\f"),
            '\r' => f.write_str("\\r"),
            '"' => f.write_str("\\\""),
            '\\' => f.write_str("\\\\"),
            '\0'..='\u{1F}' | '\u{7F}' => write!(f, "\\u{:04X}", u32::from(c)),
            _ => f.write_char(c),
        }?;
    }
    f.write_char('"')
}

/// Writes a string in triple double quotes,
/// keeping its line breaks.
pub fn print_long_str(string: &str, f: &mut impl Write) -> fmt::Result {
    let escaped = string
        .replace('\\', "\\\\")
        .replace("\"\"\"", "\\\"\\\"\\\"")
        .replace('\r', "\\r");
    f.write_str("\"\"\"")?;
    match escaped.strip_suffix('"') {
        Some(head) if !head.ends_with('\\') => {
            f.write_str(head)?;
            f.write_str("\\\"")?;
        }
        _ => f.write_str(&escaped)?,
    }
    f.write_str("\"\"\"")
}

/// Writes a string value, in triple quotes if it spans multiple lines.
pub fn print_string(string: &str, f: &mut impl Write) -> fmt::Result {
    if string.contains('\n') {
        print_long_str(string, f)
    } else {
        print_quoted_str(string, f)
    }
}

/// Replaces the characters with a special meaning in HTML.
#[must_use]
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::Literal;

    fn long(value: &str) -> String {
        let mut out = String::new();
        print_long_str(value, &mut out).expect("writing to a string");
        out
    }

    #[test]
    fn turtle_numbers() {
        assert!(is_turtle_integer("-12"));
        assert!(!is_turtle_integer("1.0"));
        assert!(!is_turtle_integer("+"));
        assert!(is_turtle_decimal("1.5"));
        assert!(is_turtle_decimal(".5"));
        assert!(!is_turtle_decimal("1."));
        assert!(is_turtle_double("1.5e3"));
        assert!(is_turtle_double("1.E-3"));
        assert!(is_turtle_double(".5e+3"));
        assert!(!is_turtle_double("e3"));
        assert!(!is_turtle_double("INF"));
    }

    #[test]
    fn plain_forms() {
        assert_eq!(
            plain_form(Literal::new_typed_literal("true", xsd::BOOLEAN).as_ref()),
            Some("true")
        );
        assert_eq!(
            plain_form(Literal::new_typed_literal("1", xsd::BOOLEAN).as_ref()),
            None
        );
        assert_eq!(
            plain_form(Literal::new_typed_literal("1.", xsd::DECIMAL).as_ref()),
            None
        );
        assert_eq!(
            plain_form(Literal::new_typed_literal("007", xsd::INTEGER).as_ref()),
            Some("007")
        );
        assert_eq!(
            plain_form(Literal::new_typed_literal("7", xsd::INT).as_ref()),
            None
        );
    }

    #[test]
    fn long_strings() {
        assert_eq!(long("a\nb"), "\"\"\"a\nb\"\"\"");
        assert_eq!(long("say \"hi\"\n"), "\"\"\"say \"hi\"\n\"\"\"");
        assert_eq!(long("x\n\"\"\"y"), "\"\"\"x\n\\\"\\\"\\\"y\"\"\"");
        assert_eq!(long("end\n\""), "\"\"\"end\n\\\"\"\"\"");
        assert_eq!(long("a\\b\n"), "\"\"\"a\\\\b\n\"\"\"");
    }

    #[test]
    fn html() {
        assert_eq!(escape_html("<a & b>"), "&lt;a &amp; b&gt;");
    }
}
