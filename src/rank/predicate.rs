// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;
use std::collections::HashSet;

use oxrdf::Graph;
use oxrdf::NamedNodeRef;

use crate::namespaces::Namespaces;
use crate::natsort::NatKey;
use crate::options::OrderConfig;

/// The key IRIs are sorted by:
/// their displayed form under the sort key,
/// then the displayed form itself,
/// then the full IRI.
pub(crate) fn iri_sort_key(
    iri: NamedNodeRef<'_>,
    namespaces: &Namespaces,
    config: &OrderConfig,
) -> (NatKey, String, String) {
    let display = namespaces.display(iri.as_str());
    (
        config.sort_key.key(&display),
        display,
        iri.as_str().to_owned(),
    )
}

/// The order of all predicates used in `graph`:
/// those in the configured priority list first, in that order,
/// followed by all others, sorted by their displayed form.
#[must_use]
pub fn predicate_order<'graph>(
    graph: &'graph Graph,
    namespaces: &Namespaces,
    config: &OrderConfig,
) -> Vec<NamedNodeRef<'graph>> {
    let distinct: HashSet<NamedNodeRef<'graph>> =
        graph.iter().map(|triple| triple.predicate).collect();
    let mut keyed: Vec<_> = distinct
        .into_iter()
        .map(|predicate| (iri_sort_key(predicate, namespaces, config), predicate))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut prioritized = Vec::new();
    let mut rest = Vec::new();
    for (_key, predicate) in keyed {
        match config
            .predicate_order
            .iter()
            .position(|preferred| preferred.as_ref() == predicate)
        {
            Some(index) => prioritized.push((index, predicate)),
            None => rest.push(predicate),
        }
    }
    prioritized.sort_by_key(|(index, _)| *index);

    prioritized
        .into_iter()
        .map(|(_index, predicate)| predicate)
        .chain(rest)
        .collect()
}

/// Position of each predicate in [`predicate_order`].
#[must_use]
pub fn predicate_ranks<'graph>(
    order: &[NamedNodeRef<'graph>],
) -> HashMap<NamedNodeRef<'graph>, usize> {
    order
        .iter()
        .enumerate()
        .map(|(rank, predicate)| (*predicate, rank))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::owl;
    use oxrdf::vocab::{rdf, rdfs};
    use oxrdf::{NamedNode, TripleRef};

    #[test]
    fn priority_list_first_then_natural_order() {
        let subject = NamedNode::new_unchecked("http://example.org/s");
        let p10 = NamedNode::new_unchecked("http://example.org/p10");
        let p9 = NamedNode::new_unchecked("http://example.org/p9");
        let mut graph = Graph::new();
        for predicate in [
            rdfs::LABEL,
            p10.as_ref(),
            rdf::TYPE,
            owl::EQUIVALENT_CLASS,
            p9.as_ref(),
        ] {
            graph.insert(TripleRef::new(subject.as_ref(), predicate, subject.as_ref()));
        }
        let namespaces: Namespaces = [("ex", "http://example.org/")].into_iter().collect();
        let config = OrderConfig::default();

        let order = predicate_order(&graph, &namespaces, &config);

        assert_eq!(
            order,
            vec![
                rdf::TYPE,
                owl::EQUIVALENT_CLASS,
                rdfs::LABEL,
                p9.as_ref(),
                p10.as_ref()
            ]
        );
        let ranks = predicate_ranks(&order);
        assert_eq!(ranks.get(&rdf::TYPE), Some(&0));
        assert_eq!(ranks.get(&p10.as_ref()), Some(&4));
    }

    #[test]
    fn plain_config_has_no_priorities() {
        let subject = NamedNode::new_unchecked("http://example.org/s");
        let mut graph = Graph::new();
        graph.insert(TripleRef::new(subject.as_ref(), rdfs::LABEL, subject.as_ref()));
        graph.insert(TripleRef::new(subject.as_ref(), rdf::TYPE, subject.as_ref()));
        let namespaces: Namespaces = [
            ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
            ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
        ]
        .into_iter()
        .collect();

        let order = predicate_order(&graph, &namespaces, &OrderConfig::plain());

        assert_eq!(order, vec![rdf::TYPE, rdfs::LABEL]);
    }
}
