// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Changes applied to the input before ranking:
//! prefixes for the compact output modes,
//! and a canonical direction for triples with a symmetric predicate.

use std::collections::HashMap;

use oxrdf::NamedNodeRef;
use oxrdf::SubjectRef;
use oxrdf::TermRef;
use oxrdf::Triple;
use oxrdf::TripleRef;

use crate::error::{Error, FmtResult};
use crate::input::Input;
use crate::namespaces::symbol_prefixes;
use crate::options::{FormatOptions, OrderConfig, OutputMode, SortKey};
use crate::rank::RankTables;

/// IRIs used more often than this are candidates for a symbolic prefix.
const COMPACT_MIN_USES: usize = 2;
/// IRIs at least this long are candidates for a symbolic prefix.
const COMPACT_MIN_LEN: usize = 11;

/// The input with everything applied that has to be in place before ranking.
pub struct Prepared {
    pub input: Input,
    /// Triples between two blank nodes with a symmetric predicate;
    /// for each, the reverse triple was added too,
    /// and one of the two is removed again after ranking.
    pub mirrored: Vec<Triple>,
}

fn sorted_naturally(values: impl IntoIterator<Item = String>, sort_key: SortKey) -> Vec<String> {
    let mut keyed: Vec<_> = values
        .into_iter()
        .map(|value| (sort_key.key(&value), value))
        .collect();
    keyed.sort();
    keyed.into_iter().map(|(_key, value)| value).collect()
}

/// IRIs that are used often and are long enough
/// to be worth a prefix of their own.
fn frequent_iris(input: &Input) -> Vec<String> {
    let mut counts: HashMap<NamedNodeRef<'_>, usize> = HashMap::new();
    for triple in &input.graph {
        let mut count = |iri| *counts.entry(iri).or_default() += 1;
        if let SubjectRef::NamedNode(subject) = triple.subject {
            count(subject);
        }
        count(triple.predicate);
        match triple.object {
            TermRef::NamedNode(object) => count(object),
            TermRef::Literal(literal) => count(literal.datatype()),
            TermRef::BlankNode(_) => {}
        }
    }
    counts
        .into_iter()
        .filter(|(iri, uses)| *uses > COMPACT_MIN_USES && iri.as_str().len() >= COMPACT_MIN_LEN)
        .map(|(iri, _uses)| iri.as_str().to_owned())
        .collect()
}

/// Binds short symbolic prefixes to frequent IRIs (compact),
/// or removes the prefixes bound to them (uncompact).
fn apply_output_mode(input: &mut Input, mode: OutputMode, sort_key: SortKey) {
    match mode {
        OutputMode::Verbose => {}
        OutputMode::Compact => {
            let iris = sorted_naturally(frequent_iris(input), sort_key);
            let symbols = sorted_naturally(symbol_prefixes(iris.len()), sort_key);
            for (iri, symbol) in iris.iter().zip(symbols) {
                let bound = input.namespaces.bind(&symbol, iri);
                tracing::trace!("Abbreviating <{iri}> as {bound}:");
            }
        }
        OutputMode::Uncompact => {
            for iri in frequent_iris(input) {
                input.namespaces.unbind_namespace(&iri);
            }
        }
    }
}

/// Gives triples with a symmetric predicate a canonical direction:
/// between IRIs, the smaller one is the subject,
/// an IRI is preferred over a blank node as subject,
/// and between blank nodes, both directions are kept until they are ranked.
fn orient_symmetric(input: &mut Input, config: &OrderConfig) -> FmtResult<Vec<Triple>> {
    let mut mirrored = Vec::new();
    for predicate in &config.symmetric_predicates {
        let triples: Vec<Triple> = input
            .graph
            .triples_for_predicate(predicate)
            .map(TripleRef::into_owned)
            .collect();
        for triple in triples {
            let reversed = match (triple.subject.as_ref(), triple.object.as_ref()) {
                (SubjectRef::NamedNode(subject), TermRef::NamedNode(object)) => {
                    if subject == object {
                        return Err(Error::SymmetricSelfReference {
                            subject: subject.as_str().to_owned(),
                            predicate: predicate.as_str().to_owned(),
                        });
                    }
                    (object.as_str() < subject.as_str())
                        .then(|| TripleRef::new(object, predicate, subject).into_owned())
                }
                (SubjectRef::BlankNode(subject), TermRef::NamedNode(object)) => {
                    Some(TripleRef::new(object, predicate, subject).into_owned())
                }
                (SubjectRef::BlankNode(subject), TermRef::BlankNode(object)) => {
                    if subject != object {
                        input
                            .graph
                            .insert(TripleRef::new(object, predicate, subject));
                        mirrored.push(triple.clone());
                    }
                    None
                }
                (SubjectRef::NamedNode(_), TermRef::BlankNode(_) | TermRef::Literal(_))
                | (SubjectRef::BlankNode(_), TermRef::Literal(_)) => None,
            };
            if let Some(reversed) = reversed {
                input.graph.remove(&triple);
                input.graph.insert(&reversed);
            }
        }
    }
    Ok(mirrored)
}

/// Applies the output mode prefixes
/// and the canonical directions of symmetric predicates.
///
/// # Errors
///
/// If a symmetric predicate relates an IRI to itself.
pub fn prepare(input: &Input, options: &FormatOptions) -> FmtResult<Prepared> {
    let mut input = input.clone();
    apply_output_mode(&mut input, options.output_mode, options.order.sort_key);
    let mirrored = orient_symmetric(&mut input, &options.order)?;
    Ok(Prepared { input, mirrored })
}

/// Of each pair of mirrored triples,
/// removes the one whose subject ranks higher,
/// or the added one, if they rank the same.
#[must_use]
pub fn prune_mirrored(prepared: &Prepared, tables: &RankTables<'_>) -> Input {
    let mut pruned = prepared.input.clone();
    for triple in &prepared.mirrored {
        let (TermRef::BlankNode(object), SubjectRef::BlankNode(subject)) =
            (triple.object.as_ref(), triple.subject.as_ref())
        else {
            continue;
        };
        let subject_key = tables.global_key(subject.into());
        let object_key = tables.global_key(object.into());
        let added = TripleRef::new(object, triple.predicate.as_ref(), subject);
        let (remove, keep) = if subject_key > object_key {
            (triple.as_ref(), added)
        } else {
            (added, triple.as_ref())
        };
        // if both directions were in the input, one of them has to stay
        if pruned.graph.contains(keep) {
            pruned.graph.remove(remove);
        }
    }
    pruned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::rank::compute_ranks;
    use crate::vocab::owl;

    #[test]
    fn smaller_iri_becomes_subject() {
        let input = parse(
            br"
@prefix ex: <http://example.org/> .
@prefix owl: <http://www.w3.org/2002/07/owl#> .
ex:b owl:disjointWith ex:a .
[] owl:disjointWith ex:c .
",
        )
        .expect("valid turtle");
        let prepared = prepare(&input, &FormatOptions::default()).expect("no self reference");
        let graph = &prepared.input.graph;
        let a = NamedNodeRef::new_unchecked("http://example.org/a");
        let b = NamedNodeRef::new_unchecked("http://example.org/b");
        let c = NamedNodeRef::new_unchecked("http://example.org/c");
        assert!(graph.contains(TripleRef::new(a, owl::DISJOINT_WITH, b)));
        assert!(!graph.contains(TripleRef::new(b, owl::DISJOINT_WITH, a)));
        assert_eq!(
            graph.triples_for_subject(c).count(),
            1,
            "the IRI should be the subject"
        );
        assert!(prepared.mirrored.is_empty());
    }

    #[test]
    fn self_disjoint_is_an_error() {
        let input = parse(
            br"
@prefix ex: <http://example.org/> .
@prefix owl: <http://www.w3.org/2002/07/owl#> .
ex:a owl:disjointWith ex:a .
",
        )
        .expect("valid turtle");
        assert!(matches!(
            prepare(&input, &FormatOptions::default()),
            Err(Error::SymmetricSelfReference { .. })
        ));
    }

    #[test]
    fn blank_pairs_keep_one_direction() {
        let input = parse(
            br#"
@prefix ex: <http://example.org/> .
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
_:x rdfs:label "x" ; owl:disjointWith _:y .
_:y rdfs:label "y" .
"#,
        )
        .expect("valid turtle");
        let prepared = prepare(&input, &FormatOptions::default()).expect("no self reference");
        assert_eq!(prepared.mirrored.len(), 1);
        assert_eq!(prepared.input.graph.len(), input.graph.len() + 1);

        let tables = compute_ranks(&prepared.input, &OrderConfig::default());
        let pruned = prune_mirrored(&prepared, &tables);
        assert_eq!(pruned.graph.len(), input.graph.len());
        let subject = pruned
            .graph
            .subjects_for_predicate_object(
                oxrdf::vocab::rdfs::LABEL,
                oxrdf::LiteralRef::new_simple_literal("x"),
            )
            .next()
            .expect("labelled x");
        assert_eq!(
            pruned
                .graph
                .objects_for_subject_predicate(subject, owl::DISJOINT_WITH)
                .count(),
            1,
            "the node labelled x ranks first"
        );
    }

    #[test]
    fn compact_binds_symbols() {
        let input = parse(
            br"
@prefix ex: <http://example.org/> .
ex:a ex:longpredicate ex:b .
ex:b ex:longpredicate ex:c .
ex:c ex:longpredicate ex:a .
",
        )
        .expect("valid turtle");
        let options = FormatOptions {
            output_mode: OutputMode::Compact,
            ..FormatOptions::default()
        };
        let prepared = prepare(&input, &options).expect("no self reference");
        assert_eq!(
            prepared.input.namespaces.namespace("A"),
            Some("http://example.org/longpredicate")
        );

        let options = FormatOptions {
            output_mode: OutputMode::Uncompact,
            ..FormatOptions::default()
        };
        let mut input = input;
        input.namespaces.insert("lp", "http://example.org/longpredicate");
        let prepared = prepare(&input, &options).expect("no self reference");
        assert_eq!(prepared.input.namespaces.namespace("lp"), None);
        assert_eq!(
            prepared.input.namespaces.namespace("ex"),
            Some("http://example.org/")
        );
    }
}
