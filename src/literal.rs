// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Ordering of literals.
//!
//! Literals fall into four buckets, compared in this order:
//! booleans, numbers, date-times, and everything else.
//! Within a bucket they compare by value
//! (numbers across all numeric datatypes),
//! the last bucket by the natural order of the lexical form.
//! Literals that end up equal are finally told apart
//! by lexical form, datatype and language tag.

use std::cmp::Ordering;
use std::str::FromStr;

use oxrdf::LiteralRef;
use oxrdf::NamedNodeRef;
use oxrdf::vocab::{rdf, xsd};
use oxsdatatypes::{Boolean, DateTime, Decimal};

use crate::options::SortKey;
use crate::natsort::NatKey;

#[derive(Debug, Clone)]
enum Bucket {
    Boolean(bool),
    Numeric(NumericKey),
    DateTime { timezone_aware: bool, value: DateTime },
    Other(OtherKey),
}

impl Bucket {
    const fn index(&self) -> u8 {
        match self {
            Self::Boolean(_) => 0,
            Self::Numeric(_) => 1,
            Self::DateTime { .. } => 2,
            Self::Other(_) => 3,
        }
    }
}

#[derive(Debug, Clone)]
struct NumericKey {
    approx: f64,
    /// Exact value of integers and decimals, `None` for floating point literals.
    exact: Option<Decimal>,
    /// Integers and decimals first: the lexical form,
    /// floating point: a canonical scientific notation.
    secondary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct OtherKey {
    lexical: NatKey,
    datatype: String,
    language: String,
}

/// The sort key of one literal.
#[derive(Debug, Clone)]
pub struct LiteralKey {
    bucket: Bucket,
    lexical: String,
    datatype: String,
    language: String,
}

const INTEGER_TYPES: [NamedNodeRef<'static>; 13] = [
    xsd::INTEGER,
    xsd::LONG,
    xsd::INT,
    xsd::SHORT,
    xsd::BYTE,
    xsd::NON_NEGATIVE_INTEGER,
    xsd::POSITIVE_INTEGER,
    xsd::NON_POSITIVE_INTEGER,
    xsd::NEGATIVE_INTEGER,
    xsd::UNSIGNED_LONG,
    xsd::UNSIGNED_INT,
    xsd::UNSIGNED_SHORT,
    xsd::UNSIGNED_BYTE,
];

/// The datatype as it takes part in the ordering.
/// Simple literals and language tagged strings have none.
fn effective_datatype(literal: LiteralRef<'_>) -> &str {
    let datatype = literal.datatype();
    if datatype == xsd::STRING || datatype == rdf::LANG_STRING {
        ""
    } else {
        datatype.as_str()
    }
}

/// Formats a double like `'{:e}'` in C/Python does,
/// with the trailing zeros of the mantissa removed,
/// for example `1.5e+00`.
fn scientific(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "INF" } else { "-INF" }.to_owned();
    }
    let formatted = format!("{value:.6e}");
    let Some((mantissa, exponent)) = formatted.split_once('e') else {
        return formatted;
    };
    let mantissa = if mantissa.contains('.') {
        mantissa.trim_end_matches('0').trim_end_matches('.')
    } else {
        mantissa
    };
    let exponent: i32 = exponent.parse().unwrap_or_default();
    format!("{mantissa}e{exponent:+03}")
}

fn numeric_key(literal: LiteralRef<'_>) -> Option<NumericKey> {
    let datatype = literal.datatype();
    let lexical = literal.value();
    if datatype == xsd::DECIMAL || INTEGER_TYPES.contains(&datatype) {
        if datatype != xsd::DECIMAL && lexical.contains('.') {
            return None;
        }
        let exact = Decimal::from_str(lexical).ok()?;
        let approx = lexical.parse::<f64>().ok()?;
        Some(NumericKey {
            approx,
            exact: Some(exact),
            secondary: lexical.to_owned(),
        })
    } else if datatype == xsd::DOUBLE || datatype == xsd::FLOAT {
        let approx: f64 = oxsdatatypes::Double::from_str(lexical).ok()?.into();
        Some(NumericKey {
            approx,
            exact: None,
            secondary: scientific(approx),
        })
    } else {
        None
    }
}

impl LiteralKey {
    #[must_use]
    pub fn new(literal: LiteralRef<'_>, sort_key: SortKey) -> Self {
        let datatype = literal.datatype();
        let lexical = literal.value();
        let bucket = if datatype == xsd::BOOLEAN {
            Boolean::from_str(lexical)
                .ok()
                .map(|value| Bucket::Boolean(value.into()))
        } else if datatype == xsd::DATE_TIME {
            DateTime::from_str(lexical)
                .ok()
                .map(|value| Bucket::DateTime {
                    timezone_aware: value.timezone_offset().is_some(),
                    value,
                })
        } else {
            numeric_key(literal).map(Bucket::Numeric)
        };
        let bucket = bucket.unwrap_or_else(|| {
            Bucket::Other(OtherKey {
                lexical: sort_key.key(lexical),
                datatype: effective_datatype(literal).to_owned(),
                language: literal.language().unwrap_or_default().to_owned(),
            })
        });
        Self {
            bucket,
            lexical: lexical.to_owned(),
            datatype: datatype.as_str().to_owned(),
            language: literal.language().unwrap_or_default().to_owned(),
        }
    }

    fn cmp_bucket(&self, other: &Self) -> Ordering {
        match (&self.bucket, &other.bucket) {
            (Bucket::Boolean(a), Bucket::Boolean(b)) => a.cmp(b),
            (Bucket::Numeric(a), Bucket::Numeric(b)) => a
                .approx
                .total_cmp(&b.approx)
                .then_with(|| a.exact.is_none().cmp(&b.exact.is_none()))
                .then_with(|| match (a.exact, b.exact) {
                    (Some(a), Some(b)) => a.cmp(&b),
                    _ => Ordering::Equal,
                })
                .then_with(|| a.secondary.cmp(&b.secondary)),
            (
                Bucket::DateTime {
                    timezone_aware: a_aware,
                    value: a,
                },
                Bucket::DateTime {
                    timezone_aware: b_aware,
                    value: b,
                },
            ) => a_aware
                .cmp(b_aware)
                .then_with(|| a.partial_cmp(b).unwrap_or(Ordering::Equal)),
            (Bucket::Other(a), Bucket::Other(b)) => a.cmp(b),
            (a, b) => a.index().cmp(&b.index()),
        }
    }
}

impl PartialEq for LiteralKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for LiteralKey {}

impl Ord for LiteralKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_bucket(other)
            .then_with(|| self.lexical.cmp(&other.lexical))
            .then_with(|| self.datatype.cmp(&other.datatype))
            .then_with(|| self.language.cmp(&other.language))
    }
}

impl PartialOrd for LiteralKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::Literal;

    fn key(literal: &Literal) -> LiteralKey {
        LiteralKey::new(literal.as_ref(), SortKey::Natural)
    }

    fn sorted(mut literals: Vec<Literal>) -> Vec<Literal> {
        literals.sort_by_key(key);
        literals
    }

    #[test]
    fn buckets_are_ordered() {
        let literals = vec![
            Literal::new_simple_literal("a"),
            Literal::new_typed_literal("2020-01-01T00:00:00Z", xsd::DATE_TIME),
            Literal::new_typed_literal("5", xsd::INTEGER),
            Literal::new_typed_literal("true", xsd::BOOLEAN),
        ];
        assert_eq!(
            sorted(literals),
            vec![
                Literal::new_typed_literal("true", xsd::BOOLEAN),
                Literal::new_typed_literal("5", xsd::INTEGER),
                Literal::new_typed_literal("2020-01-01T00:00:00Z", xsd::DATE_TIME),
                Literal::new_simple_literal("a"),
            ]
        );
    }

    #[test]
    fn numbers_compare_across_datatypes() {
        let literals = vec![
            Literal::new_typed_literal("10", xsd::INTEGER),
            Literal::new_typed_literal("2.5e0", xsd::DOUBLE),
            Literal::new_typed_literal("2", xsd::INTEGER),
            Literal::new_typed_literal("-1.5", xsd::DECIMAL),
        ];
        assert_eq!(
            sorted(literals),
            vec![
                Literal::new_typed_literal("-1.5", xsd::DECIMAL),
                Literal::new_typed_literal("2", xsd::INTEGER),
                Literal::new_typed_literal("2.5e0", xsd::DOUBLE),
                Literal::new_typed_literal("10", xsd::INTEGER),
            ]
        );
    }

    #[test]
    fn equal_numbers_are_told_apart() {
        let int = Literal::new_typed_literal("1", xsd::INTEGER);
        let double = Literal::new_typed_literal("1e0", xsd::DOUBLE);
        let padded = Literal::new_typed_literal("01", xsd::INTEGER);
        assert!(key(&int) < key(&double));
        assert!(key(&padded) < key(&int));
        assert_ne!(key(&padded), key(&int));
    }

    #[test]
    fn false_before_true() {
        assert!(
            key(&Literal::new_typed_literal("false", xsd::BOOLEAN))
                < key(&Literal::new_typed_literal("1", xsd::BOOLEAN))
        );
    }

    #[test]
    fn naive_date_times_come_first() {
        let naive = Literal::new_typed_literal("2021-01-01T00:00:00", xsd::DATE_TIME);
        let aware = Literal::new_typed_literal("2000-01-01T00:00:00Z", xsd::DATE_TIME);
        assert!(key(&naive) < key(&aware));
    }

    #[test]
    fn invalid_values_fall_back_to_text() {
        let broken = Literal::new_typed_literal("many", xsd::INTEGER);
        let text = Literal::new_simple_literal("a");
        let number = Literal::new_typed_literal("1000", xsd::INTEGER);
        assert!(key(&number) < key(&text));
        assert!(key(&text) < key(&broken));
    }

    #[test]
    fn text_sorts_naturally_then_by_language() {
        let literals = vec![
            Literal::new_language_tagged_literal_unchecked("term 10", "en"),
            Literal::new_simple_literal("term 9"),
            Literal::new_language_tagged_literal_unchecked("term 9", "de"),
        ];
        assert_eq!(
            sorted(literals),
            vec![
                Literal::new_simple_literal("term 9"),
                Literal::new_language_tagged_literal_unchecked("term 9", "de"),
                Literal::new_language_tagged_literal_unchecked("term 10", "en"),
            ]
        );
    }

    #[test]
    fn scientific_notation() {
        assert_eq!(scientific(1.5), "1.5e+00");
        assert_eq!(scientific(1000.0), "1e+03");
        assert_eq!(scientific(-0.00025), "-2.5e-04");
        assert_eq!(scientific(f64::INFINITY), "INF");
    }
}
