// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Natural ("human") ordering of strings:
//! runs of ASCII digits compare by their numeric value,
//! everything in between compares case-insensitively.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;

static RE_DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[0-9]+").expect("digit run regex is valid"));

/// A run of decimal digits,
/// compared by numeric value without ever being parsed into a fixed-width integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DigitRun(String);

impl DigitRun {
    fn new(digits: &str) -> Self {
        let significant = digits.trim_start_matches('0');
        Self(significant.to_owned())
    }
}

impl Ord for DigitRun {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for DigitRun {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// One piece of a [`NatKey`].
///
/// Keys always alternate `Text`, `Number`, `Text`, ...
/// starting and ending with `Text` (possibly empty),
/// so two keys never compare a `Text` with a `Number` at the same position.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Segment {
    Text(String),
    Number(DigitRun),
}

/// Sort key of a string under natural ordering.
///
/// ```
/// use ttlser::natsort::NatKey;
///
/// assert!(NatKey::new("file2") < NatKey::new("file10"));
/// assert!(NatKey::new("B") > NatKey::new("a"));
/// assert_eq!(NatKey::new("x007"), NatKey::new("X7"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NatKey(Vec<Segment>);

impl NatKey {
    #[must_use]
    pub fn new(value: &str) -> Self {
        let mut segments = Vec::new();
        let mut last_end = 0;
        for digits in RE_DIGIT_RUN.find_iter(value) {
            segments.push(Segment::Text(
                value[last_end..digits.start()].to_lowercase(),
            ));
            segments.push(Segment::Number(DigitRun::new(digits.as_str())));
            last_end = digits.end();
        }
        segments.push(Segment::Text(value[last_end..].to_lowercase()));
        Self(segments)
    }

    /// A key that orders by plain code-point comparison,
    /// without any of the natural ordering rules.
    #[must_use]
    pub fn plain(value: &str) -> Self {
        Self(vec![Segment::Text(value.to_owned())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(values: &[&str]) -> Vec<String> {
        let mut values: Vec<String> = values.iter().map(ToString::to_string).collect();
        values.sort_by_key(|value| NatKey::new(value));
        values
    }

    #[test]
    fn numbers_compare_by_value() {
        assert_eq!(
            sorted(&["ex:a10", "ex:a9", "ex:a1", "ex:a100"]),
            vec!["ex:a1", "ex:a9", "ex:a10", "ex:a100"]
        );
    }

    #[test]
    fn text_is_case_insensitive() {
        assert_eq!(NatKey::new("Alpha"), NatKey::new("alpha"));
        assert!(NatKey::new("alpha") < NatKey::new("Beta"));
    }

    #[test]
    fn leading_zeros_are_insignificant() {
        assert_eq!(NatKey::new("UBERON:0000955"), NatKey::new("uberon:955"));
        assert!(NatKey::new("UBERON:0000955") < NatKey::new("UBERON:0001016"));
    }

    #[test]
    fn huge_numbers_do_not_overflow() {
        assert!(
            NatKey::new("n99999999999999999999999999")
                < NatKey::new("n100000000000000000000000000")
        );
    }

    #[test]
    fn leading_number() {
        assert!(NatKey::new("2abc") < NatKey::new("10abc"));
        assert!(NatKey::new("") < NatKey::new("0"));
    }

    #[test]
    fn plain_is_case_sensitive() {
        assert!(NatKey::plain("B") < NatKey::plain("a"));
        assert!(NatKey::plain("a10") < NatKey::plain("a9"));
    }
}
