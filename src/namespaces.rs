// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Prefix bindings, and abbreviation of IRIs into prefixed names.

use std::collections::BTreeMap;
use std::fmt;

use oxrdf::NamedNode;

use crate::error::{Error, FmtResult};
use crate::natsort::NatKey;

/// A prefixed name (`prefix:local`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    pub prefix: String,
    pub local: String,
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.prefix, self.local)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Namespaces {
    /// Prefix to namespace mapping
    prefixes: BTreeMap<String, String>,
    /// Namespace to prefix mapping;
    /// of several prefixes for one namespace, the naturally smallest one
    prefixes_inverted: BTreeMap<String, String>,
}

// [157s]  PN_CHARS_BASE  ::=  [A-Z] | [a-z] | [#x00C0-#x00D6] | [#x00D8-#x00F6] | [#x00F8-#x02FF] | [#x0370-#x037D] | [#x037F-#x1FFF] | [#x200C-#x200D] | [#x2070-#x218F] | [#x2C00-#x2FEF] | [#x3001-#xD7FF] | [#xF900-#xFDCF] | [#xFDF0-#xFFFD] | [#x10000-#xEFFFF]
const fn is_possible_pn_chars_base(c: char) -> bool {
    matches!(c,
        'A'..='Z'
        | 'a'..='z'
        | '\u{00C0}'..='\u{00D6}'
        | '\u{00D8}'..='\u{00F6}'
        | '\u{00F8}'..='\u{02FF}'
        | '\u{0370}'..='\u{037D}'
        | '\u{037F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

// [158s]  PN_CHARS_U  ::=  PN_CHARS_BASE | '_'
const fn is_possible_pn_chars_u(c: char) -> bool {
    is_possible_pn_chars_base(c) || c == '_'
}

// [160s]  PN_CHARS  ::=  PN_CHARS_U | '-' | [0-9] | #x00B7 | [#x0300-#x036F] | [#x203F-#x2040]
const fn is_possible_pn_chars(c: char) -> bool {
    is_possible_pn_chars_u(c)
        || matches!(c,
        '-' | '0'..='9' | '\u{00B7}' | '\u{0300}'..='\u{036F}' | '\u{203F}'..='\u{2040}')
}

/// Whether `value` can be written as the local part of a prefixed name
/// without any escape sequences.
///
/// [168s] PN_LOCAL ::= (PN_CHARS_U | ':' | [0-9] | PLX) ((PN_CHARS | '.' | ':' | PLX)* (PN_CHARS | ':' | PLX))?
fn is_plain_local_name(value: &str) -> bool {
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return true;
    };
    if !(is_possible_pn_chars_u(first) || first == ':' || first.is_ascii_digit()) {
        return false;
    }
    chars.all(|c| is_possible_pn_chars(c) || c == ':' || c == '.') && !value.ends_with('.')
}

/// Splits an IRI in front of its trailing name,
/// which has to start with a letter or an underscore.
fn split_trailing_name(iri: &str) -> Option<(&str, &str)> {
    let mut start = iri.len();
    for (idx, c) in iri.char_indices().rev() {
        if is_possible_pn_chars(c) || c == '.' {
            start = idx;
        } else {
            break;
        }
    }
    let offset = iri[start..].find(is_possible_pn_chars_u)?;
    let (namespace, local) = iri.split_at(start + offset);
    (!namespace.is_empty() && is_plain_local_name(local)).then_some((namespace, local))
}

const SYMBOLS: &[char] = &[
    'A', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k',
    'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', '0', '1', '2', '3',
    '4', '5', '6', '7', '8', '9', '_', '-',
];
/// Digits at or above this one may not lead a symbol.
const SYMBOL_LEADING_LIMIT: usize = 52;

/// The first `count` short symbolic prefixes:
/// `A` to `y`, then `AA`, `AB`, ...
///
/// These are the numbers of a positional system over [`SYMBOLS`],
/// skipping all numbers ending in the zero digit
/// (which would render like the `1` digit)
/// and those led by a digit, `_`, `-` or `z`.
#[must_use]
pub fn symbol_prefixes(count: usize) -> Vec<String> {
    let base = SYMBOLS.len();
    let mut symbols = Vec::with_capacity(count);
    let mut index = 0;
    while symbols.len() < count {
        index += 1;
        if index % base == 0 {
            continue;
        }
        let mut digits = Vec::new();
        let mut rest = index;
        while rest > 0 {
            digits.push(rest % base);
            rest /= base;
        }
        if digits.last().is_some_and(|lead| *lead >= SYMBOL_LEADING_LIMIT) {
            continue;
        }
        symbols.push(
            digits
                .iter()
                .rev()
                .filter_map(|digit| SYMBOLS.get(*digit))
                .collect(),
        );
    }
    symbols
}

impl Namespaces {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn reindex(&mut self) {
        self.prefixes_inverted.clear();
        for (prefix, namespace) in &self.prefixes {
            let better = self
                .prefixes_inverted
                .get(namespace)
                .is_none_or(|known| NatKey::new(prefix) < NatKey::new(known));
            if better {
                self.prefixes_inverted
                    .insert(namespace.clone(), prefix.clone());
            }
        }
    }

    /// Binds `prefix` to `namespace`,
    /// unless the namespace already has a prefix.
    /// Should `prefix` be taken by an other namespace,
    /// the first free one of `prefix1`, `prefix2`, ... is used instead.
    ///
    /// Returns the prefix the namespace is bound to afterwards.
    pub fn bind(&mut self, prefix: &str, namespace: &str) -> String {
        if let Some(known) = self.prefixes_inverted.get(namespace) {
            return known.clone();
        }
        let mut chosen = prefix.to_owned();
        let mut num = 1;
        while self.prefixes.contains_key(&chosen) {
            chosen = format!("{prefix}{num}");
            num += 1;
        }
        self.prefixes.insert(chosen.clone(), namespace.to_owned());
        self.reindex();
        chosen
    }

    /// Binds `prefix` to `namespace`,
    /// replacing whatever `prefix` was bound to before.
    pub fn insert(&mut self, prefix: &str, namespace: &str) {
        self.prefixes.insert(prefix.to_owned(), namespace.to_owned());
        self.reindex();
    }

    /// Removes all prefixes bound to `namespace`.
    pub fn unbind_namespace(&mut self, namespace: &str) {
        self.prefixes.retain(|_prefix, bound| bound != namespace);
        self.reindex();
    }

    #[must_use]
    pub fn namespace(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(String::as_str)
    }

    /// The prefix used for abbreviating IRIs in `namespace`.
    #[must_use]
    pub fn prefix(&self, namespace: &str) -> Option<&str> {
        self.prefixes_inverted.get(namespace).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes
            .iter()
            .map(|(prefix, namespace)| (prefix.as_str(), namespace.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Abbreviates `iri` with the longest bound namespace
    /// that leaves a local name which needs no escaping.
    #[must_use]
    pub fn qname(&self, iri: &str) -> Option<QName> {
        let mut ends: Vec<usize> = iri.char_indices().map(|(idx, _)| idx).collect();
        ends.push(iri.len());
        ends.into_iter()
            .rev()
            .find_map(|end| self.qname_at(iri, end))
    }

    fn qname_at(&self, iri: &str, end: usize) -> Option<QName> {
        let (namespace, local) = iri.split_at_checked(end)?;
        let prefix = self.prefix(namespace)?;
        is_plain_local_name(local).then(|| QName {
            prefix: prefix.to_owned(),
            local: local.to_owned(),
        })
    }

    /// Like [`Self::qname`],
    /// but if nothing matches and `generate` is set,
    /// binds the namespace part of the IRI to a new `nsN` prefix.
    pub fn compute_qname(&mut self, iri: &str, generate: bool) -> Option<QName> {
        if let Some(qname) = self.qname(iri) {
            return Some(qname);
        }
        if !generate {
            tracing::trace!("No prefix for <{iri}>");
            return None;
        }
        let (namespace, local) = split_trailing_name(iri)?;
        let mut num = 1;
        let mut prefix = format!("ns{num}");
        while self.prefixes.contains_key(&prefix) {
            num += 1;
            prefix = format!("ns{num}");
        }
        let prefix = self.bind(&prefix, namespace);
        tracing::debug!("Generated prefix {prefix}: for <{namespace}>");
        Some(QName {
            prefix,
            local: local.to_owned(),
        })
    }

    /// The form an IRI takes when sorting:
    /// `prefix:local`, just `local` for the empty prefix,
    /// or the IRI itself if it can not be abbreviated.
    #[must_use]
    pub fn display(&self, iri: &str) -> String {
        match self.qname(iri) {
            Some(qname) if qname.prefix.is_empty() => qname.local,
            Some(qname) => qname.to_string(),
            None => iri.to_owned(),
        }
    }

    /// Turns an absolute IRI (optionally in angle brackets)
    /// or a prefixed name with a bound prefix into a named node.
    ///
    /// # Errors
    ///
    /// If `name` is neither.
    pub fn expand(&self, name: &str) -> FmtResult<NamedNode> {
        let invalid = || Error::InvalidIriOrPrefixedName(name.to_owned());
        if let Some(iri) = name
            .strip_prefix('<')
            .and_then(|rest| rest.strip_suffix('>'))
        {
            return NamedNode::new(iri).map_err(|_err| invalid());
        }
        if let Some((prefix, local)) = name.split_once(':') {
            if let Some(namespace) = self.namespace(prefix) {
                return NamedNode::new(format!("{namespace}{local}")).map_err(|_err| invalid());
            }
            if local.starts_with("//") {
                return NamedNode::new(name).map_err(|_err| invalid());
            }
        }
        Err(invalid())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Namespaces {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut namespaces = Self {
            prefixes: iter
                .into_iter()
                .map(|(prefix, namespace)| (prefix.into(), namespace.into()))
                .collect(),
            prefixes_inverted: BTreeMap::new(),
        };
        namespaces.reindex();
        namespaces
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn namespaces() -> Namespaces {
        [
            ("ex", "http://example.org/"),
            ("UBERON", "http://purl.obolibrary.org/obo/UBERON_"),
            ("obo", "http://purl.obolibrary.org/obo/"),
            ("", "http://example.org/default#"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn longest_namespace_wins() {
        let ns = namespaces();
        assert_eq!(
            ns.qname("http://purl.obolibrary.org/obo/UBERON_0000955")
                .map(|qname| qname.to_string()),
            Some("UBERON:0000955".to_owned())
        );
        assert_eq!(
            ns.qname("http://purl.obolibrary.org/obo/IAO_0000115")
                .map(|qname| qname.to_string()),
            Some("obo:IAO_0000115".to_owned())
        );
    }

    #[test]
    fn no_escaped_local_names() {
        let ns = namespaces();
        assert_eq!(ns.qname("http://example.org/a/b"), None);
        assert_eq!(ns.qname("http://example.org/a."), None);
        assert_eq!(ns.display("http://example.org/a/b"), "http://example.org/a/b");
    }

    #[test]
    fn namespace_itself() {
        let ns = namespaces();
        assert_eq!(
            ns.qname("http://example.org/").map(|qname| qname.to_string()),
            Some("ex:".to_owned())
        );
    }

    #[test]
    fn display_of_empty_prefix() {
        let ns = namespaces();
        assert_eq!(ns.display("http://example.org/default#thing"), "thing");
        assert_eq!(ns.display("http://example.org/thing"), "ex:thing");
    }

    #[test]
    fn generation_is_explicit() {
        let mut ns = namespaces();
        assert_eq!(ns.compute_qname("http://other.org/vocab#prop", false), None);
        let qname = ns.compute_qname("http://other.org/vocab#prop", true);
        assert_eq!(
            qname.map(|qname| qname.to_string()),
            Some("ns1:prop".to_owned())
        );
        assert_eq!(ns.namespace("ns1"), Some("http://other.org/vocab#"));
        let qname = ns.compute_qname("http://third.org/p", true);
        assert_eq!(qname.map(|qname| qname.to_string()), Some("ns2:p".to_owned()));
    }

    #[test]
    fn bind_keeps_existing_bindings() {
        let mut ns = namespaces();
        assert_eq!(ns.bind("A", "http://example.org/"), "ex");
        assert_eq!(ns.bind("ex", "http://example.com/"), "ex1");
    }

    #[test]
    fn several_prefixes_for_one_namespace() {
        let ns: Namespaces = [("foaf2", "http://f/"), ("foaf", "http://f/")]
            .into_iter()
            .collect();
        assert_eq!(ns.prefix("http://f/"), Some("foaf"));
    }

    #[test]
    fn expansion() {
        let ns = namespaces();
        assert_eq!(
            ns.expand("ex:a").map(|node| node.into_string()).ok(),
            Some("http://example.org/a".to_owned())
        );
        assert_eq!(
            ns.expand("<http://other.org/b>")
                .map(|node| node.into_string())
                .ok(),
            Some("http://other.org/b".to_owned())
        );
        assert_eq!(
            ns.expand("http://other.org/c")
                .map(|node| node.into_string())
                .ok(),
            Some("http://other.org/c".to_owned())
        );
        assert!(matches!(
            ns.expand("unknown:d"),
            Err(Error::InvalidIriOrPrefixedName(_))
        ));
        assert!(ns.expand("plain").is_err());
    }

    #[test]
    fn symbols() {
        let symbols = symbol_prefixes(53);
        assert_eq!(symbols.first().map(String::as_str), Some("A"));
        assert_eq!(symbols.get(25).map(String::as_str), Some("Z"));
        assert_eq!(symbols.get(26).map(String::as_str), Some("a"));
        assert_eq!(symbols.get(50).map(String::as_str), Some("y"));
        assert_eq!(symbols.get(51).map(String::as_str), Some("AA"));
        assert_eq!(symbols.get(52).map(String::as_str), Some("AB"));
    }
}
