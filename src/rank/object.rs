// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;
use std::collections::HashSet;

use oxrdf::Graph;
use oxrdf::NamedNodeRef;
use oxrdf::SubjectRef;
use oxrdf::TermRef;

use crate::literal::LiteralKey;
use crate::namespaces::Namespaces;
use crate::options::OrderConfig;
use crate::rank::predicate::iri_sort_key;

/// One global rank for every literal and IRI of the graph,
/// all literals (objects only) before all IRIs (in any position).
#[must_use]
pub fn object_ranks<'graph>(
    graph: &'graph Graph,
    namespaces: &Namespaces,
    config: &OrderConfig,
) -> HashMap<TermRef<'graph>, u64> {
    let mut literals = HashSet::new();
    let mut iris: HashSet<NamedNodeRef<'graph>> = HashSet::new();
    for triple in graph {
        if let SubjectRef::NamedNode(subject) = triple.subject {
            iris.insert(subject);
        }
        iris.insert(triple.predicate);
        match triple.object {
            TermRef::NamedNode(object) => {
                iris.insert(object);
            }
            TermRef::Literal(object) => {
                literals.insert(object);
            }
            TermRef::BlankNode(_) => {}
        }
    }

    let mut literals: Vec<_> = literals
        .into_iter()
        .map(|literal| (LiteralKey::new(literal, config.sort_key), literal))
        .collect();
    literals.sort_by(|(a, _), (b, _)| a.cmp(b));
    debug_assert!(
        literals.windows(2).all(|pair| match pair {
            [(a, _), (b, _)] => a < b,
            _ => true,
        }),
        "two distinct literals share one sort key"
    );

    let mut iris: Vec<_> = iris
        .into_iter()
        .map(|iri| (iri_sort_key(iri, namespaces, config), iri))
        .collect();
    iris.sort_by(|(a, _), (b, _)| a.cmp(b));

    literals
        .into_iter()
        .map(|(_key, literal)| TermRef::Literal(literal))
        .chain(iris.into_iter().map(|(_key, iri)| TermRef::NamedNode(iri)))
        .zip(0..)
        .collect()
}
