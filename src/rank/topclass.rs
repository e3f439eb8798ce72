// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Ordering of the members of the top class sections
//! by their ancestry, super-classes (-properties, imported ontologies) first.

use std::collections::BTreeSet;
use std::collections::HashMap;

use oxrdf::Graph;
use oxrdf::NamedNodeRef;
use oxrdf::SubjectRef;
use oxrdf::TermRef;
use oxrdf::vocab::{rdf, rdfs};
use petgraph::Direction;
use petgraph::graph::{Graph as DiGraph, NodeIndex};

use crate::namespaces::Namespaces;
use crate::natsort::NatKey;
use crate::options::OrderConfig;
use crate::rank::predicate::iri_sort_key;
use crate::vocab::owl;

/// Relations pointing from a child to its parent.
const ANCESTRY: [NamedNodeRef<'static>; 3] = [rdfs::SUB_CLASS_OF, rdfs::SUB_PROPERTY_OF, owl::IMPORTS];

type SortKey = (NatKey, String, String);

/// The position of every IRI that is an instance of a top class,
/// with parents before their children,
/// and otherwise in natural order.
///
/// Cycles are broken up by taking the smallest remaining IRI first.
#[must_use]
pub fn top_class_ranks<'graph>(
    graph: &'graph Graph,
    namespaces: &Namespaces,
    config: &OrderConfig,
) -> HashMap<NamedNodeRef<'graph>, u64> {
    let mut ancestry: DiGraph<NamedNodeRef<'graph>, (), petgraph::Directed> = DiGraph::new();
    let mut indexes: HashMap<NamedNodeRef<'graph>, NodeIndex> = HashMap::new();
    let mut add_node = |ancestry: &mut DiGraph<NamedNodeRef<'graph>, ()>, iri| {
        *indexes
            .entry(iri)
            .or_insert_with(|| ancestry.add_node(iri))
    };

    let mut members = Vec::new();
    for top in &config.top_classes {
        for subject in graph.subjects_for_predicate_object(rdf::TYPE, top.class.as_ref()) {
            if let SubjectRef::NamedNode(member) = subject {
                add_node(&mut ancestry, member);
                members.push(member);
            }
        }
    }
    for predicate in ANCESTRY {
        for triple in graph.triples_for_predicate(predicate) {
            if let (SubjectRef::NamedNode(child), TermRef::NamedNode(parent)) =
                (triple.subject, triple.object)
            {
                let child = add_node(&mut ancestry, child);
                let parent = add_node(&mut ancestry, parent);
                if child != parent {
                    ancestry.update_edge(parent, child, ());
                }
            }
        }
    }

    let order = topological_order(&ancestry, |iri| iri_sort_key(iri, namespaces, config));
    let position: HashMap<NodeIndex, u64> = order.into_iter().zip(0..).collect();
    members
        .into_iter()
        .filter_map(|member| {
            let index = indexes.get(&member)?;
            position.get(index).map(|rank| (member, *rank))
        })
        .collect()
}

/// Kahn's algorithm, always continuing with the smallest ready node.
fn topological_order<'graph>(
    ancestry: &DiGraph<NamedNodeRef<'graph>, ()>,
    sort_key: impl Fn(NamedNodeRef<'graph>) -> SortKey,
) -> Vec<NodeIndex> {
    let keys: HashMap<NodeIndex, SortKey> = ancestry
        .node_indices()
        .map(|index| (index, sort_key(ancestry[index])))
        .collect();
    let mut in_degree: HashMap<NodeIndex, usize> = ancestry
        .node_indices()
        .map(|index| {
            let parents = ancestry.neighbors_directed(index, Direction::Incoming).count();
            (index, parents)
        })
        .collect();
    let keyed = |index: NodeIndex| keys.get(&index).cloned().map(|key| (key, index));

    let mut ready: BTreeSet<(SortKey, NodeIndex)> = in_degree
        .iter()
        .filter(|(_index, parents)| **parents == 0)
        .filter_map(|(index, _parents)| keyed(*index))
        .collect();
    let mut order = Vec::with_capacity(ancestry.node_count());
    while order.len() < ancestry.node_count() {
        let next = ready.pop_first().or_else(|| {
            // a cycle; pick the smallest node not yet placed
            in_degree
                .iter()
                .filter(|(_index, parents)| **parents > 0)
                .filter_map(|(index, _parents)| keyed(*index))
                .min()
        });
        let Some((_key, index)) = next else {
            break;
        };
        in_degree.insert(index, 0);
        order.push(index);
        for child in ancestry.neighbors_directed(index, Direction::Outgoing) {
            if let Some(parents) = in_degree.get_mut(&child) {
                if *parents > 0 {
                    *parents -= 1;
                    if *parents == 0 {
                        if let Some(entry) = keyed(child) {
                            ready.insert(entry);
                        }
                    }
                }
            }
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn ordered(turtle: &str) -> Vec<String> {
        let input = parse(turtle.as_bytes()).expect("valid turtle");
        let ranks = top_class_ranks(&input.graph, &input.namespaces, &OrderConfig::default());
        let mut members: Vec<_> = ranks.into_iter().collect();
        members.sort_by_key(|(_iri, rank)| *rank);
        members
            .into_iter()
            .map(|(iri, _rank)| input.namespaces.display(iri.as_str()))
            .collect()
    }

    #[test]
    fn parents_first() {
        let order = ordered(
            r"
@prefix ex: <http://example.org/> .
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
ex:a a owl:Class ; rdfs:subClassOf ex:z .
ex:b a owl:Class .
ex:z a owl:Class ; rdfs:subClassOf ex:y .
ex:y a owl:Class .
",
        );
        assert_eq!(order, vec!["ex:b", "ex:y", "ex:z", "ex:a"]);
    }

    #[test]
    fn cycles_are_broken() {
        let order = ordered(
            r"
@prefix ex: <http://example.org/> .
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
ex:d a owl:Class ; rdfs:subClassOf ex:c .
ex:c a owl:Class ; rdfs:subClassOf ex:b .
ex:b a owl:Class ; rdfs:subClassOf ex:c .
",
        );
        assert_eq!(order, vec!["ex:b", "ex:c", "ex:d"]);
    }
}
