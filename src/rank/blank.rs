// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Ranking of blank nodes.
//!
//! A blank node has no name to sort by,
//! so it is ranked by what it points to.
//! Literals and IRIs have a rank already,
//! other blank nodes start out as a placeholder
//! and get refined in rounds,
//! until the ranks stop changing.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::collections::HashMap;

use oxrdf::BlankNodeRef;
use oxrdf::Graph;
use oxrdf::NamedNodeRef;
use oxrdf::SubjectRef;
use oxrdf::TermRef;
use oxrdf::vocab::rdf;

use crate::rank::list::ListRankers;

/// Stands in for a blank node object in the visible part of a key.
/// It is worse than every real rank.
const PLACEHOLDER: u64 = u64::MAX - 1;

/// Per predicate rank, the sorted ranks of the objects.
///
/// Only predicates with objects have an entry.
/// A missing entry is worse than any present one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct RankVector(BTreeMap<usize, Vec<u64>>);

impl RankVector {
    fn push(&mut self, predicate_rank: usize, rank: u64) {
        self.0.entry(predicate_rank).or_default().push(rank);
    }

    fn sort(&mut self) {
        for ranks in self.0.values_mut() {
            ranks.sort_unstable();
        }
    }
}

impl Ord for RankVector {
    fn cmp(&self, other: &Self) -> Ordering {
        let mut mine = self.0.iter();
        let mut theirs = other.0.iter();
        loop {
            match (mine.next(), theirs.next()) {
                (Some((my_pred, my_ranks)), Some((their_pred, their_ranks))) => {
                    match my_pred.cmp(their_pred) {
                        // having an object for the better predicate wins
                        Ordering::Less => return Ordering::Less,
                        Ordering::Greater => return Ordering::Greater,
                        Ordering::Equal => match my_ranks.cmp(their_ranks) {
                            Ordering::Equal => {}
                            unequal => return unequal,
                        },
                    }
                }
                (Some(_), None) => return Ordering::Less,
                (None, Some(_)) => return Ordering::Greater,
                (None, None) => return Ordering::Equal,
            }
        }
    }
}

impl PartialOrd for RankVector {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Ranks of list items; empty is worse than any content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Slot(Vec<u64>);

impl Ord for Slot {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.0.is_empty(), other.0.is_empty()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for Slot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
struct NodeKey {
    visible: RankVector,
    invisible: RankVector,
    list_visible: Slot,
    list_invisible: Slot,
}

/// Who points to a blank node.
#[derive(Debug, Clone, Copy)]
enum Referrer {
    Ranked(u64),
    Blank(usize),
}

/// All blank nodes of a graph, indexed densely,
/// with everything about them that does not change between rounds.
struct Arena<'graph> {
    nodes: Vec<BlankNodeRef<'graph>>,
    index: HashMap<BlankNodeRef<'graph>, usize>,
    /// Cells of well-formed lists after the head do not take part on their own.
    helper: Vec<bool>,
    visible: Vec<RankVector>,
    list_visible: Vec<Slot>,
    /// Per node: predicate rank and index of the blank node objects,
    /// without the list structure predicates
    blank_objects: Vec<Vec<(usize, usize)>>,
    /// Per list head: indices of the blank node items
    blank_items: Vec<Vec<usize>>,
    /// Per node: predicate rank and referrer of all incoming edges
    incoming: Vec<Vec<(usize, Referrer)>>,
}

/// The rank tables a blank node ranking is built from.
pub struct Inputs<'tables, 'graph> {
    pub graph: &'graph Graph,
    pub predicate_rank: &'tables HashMap<NamedNodeRef<'graph>, usize>,
    pub object_rank: &'tables HashMap<TermRef<'graph>, u64>,
    pub lists: &'tables ListRankers<'graph>,
}

impl<'graph> Arena<'graph> {
    fn new(inputs: &Inputs<'_, 'graph>) -> Self {
        let mut nodes = Vec::new();
        let mut index = HashMap::new();
        let mut register = |node: BlankNodeRef<'graph>| {
            index.entry(node).or_insert_with(|| {
                nodes.push(node);
                nodes.len() - 1
            });
        };
        for triple in inputs.graph {
            if let SubjectRef::BlankNode(node) = triple.subject {
                register(node);
            }
            if let TermRef::BlankNode(node) = triple.object {
                register(node);
            }
        }

        let count = nodes.len();
        let mut arena = Self {
            helper: nodes
                .iter()
                .map(|node| inputs.lists.is_helper(*node))
                .collect(),
            nodes,
            index,
            visible: vec![RankVector::default(); count],
            list_visible: vec![Slot::default(); count],
            blank_objects: vec![Vec::new(); count],
            blank_items: vec![Vec::new(); count],
            incoming: vec![Vec::new(); count],
        };
        for idx in 0..count {
            arena.describe(inputs, idx);
        }
        arena
    }

    fn describe(&mut self, inputs: &Inputs<'_, 'graph>, idx: usize) {
        let Some(node) = self.nodes.get(idx).copied() else {
            return;
        };
        for triple in inputs.graph.triples_for_object(node) {
            let Some(predicate_rank) = inputs.predicate_rank.get(&triple.predicate) else {
                continue;
            };
            let referrer = match triple.subject {
                SubjectRef::BlankNode(subject) => self.index.get(&subject).map(|i| Referrer::Blank(*i)),
                SubjectRef::NamedNode(subject) => inputs
                    .object_rank
                    .get(&TermRef::NamedNode(subject))
                    .map(|rank| Referrer::Ranked(*rank)),
            };
            if let (Some(referrer), Some(incoming)) = (referrer, self.incoming.get_mut(idx)) {
                incoming.push((*predicate_rank, referrer));
            }
        }

        if self.helper.get(idx).copied().unwrap_or_default() {
            return;
        }
        // the list slots of a head stand for its list structure
        let list = inputs.lists.get(node);
        let mut visible = RankVector::default();
        let mut blank_objects = Vec::new();
        for triple in inputs.graph.triples_for_subject(node) {
            if list.is_some() && (triple.predicate == rdf::FIRST || triple.predicate == rdf::REST)
            {
                continue;
            }
            let Some(predicate_rank) = inputs.predicate_rank.get(&triple.predicate).copied()
            else {
                continue;
            };
            if let Some(rank) = inputs.object_rank.get(&triple.object) {
                visible.push(predicate_rank, *rank);
            } else {
                visible.push(predicate_rank, PLACEHOLDER);
                if let TermRef::BlankNode(object) = triple.object {
                    if let Some(object_idx) = self.index.get(&object) {
                        blank_objects.push((predicate_rank, *object_idx));
                    }
                }
            }
        }
        visible.sort();

        let mut list_visible = Slot::default();
        let mut blank_items = Vec::new();
        if let Some(ranker) = list {
            list_visible.0 = ranker
                .visible_items()
                .filter_map(|item| inputs.object_rank.get(&item).copied())
                .collect();
            if ranker.reorder {
                list_visible.0.sort_unstable();
            }
            blank_items = ranker
                .blank_items()
                .filter_map(|item| self.index.get(&item).copied())
                .collect();
        }

        if let Some(slot) = self.visible.get_mut(idx) {
            *slot = visible;
        }
        if let Some(slot) = self.list_visible.get_mut(idx) {
            *slot = list_visible;
        }
        if let Some(slot) = self.blank_objects.get_mut(idx) {
            *slot = blank_objects;
        }
        if let Some(slot) = self.blank_items.get_mut(idx) {
            *slot = blank_items;
        }
    }

    /// The keys of all nodes,
    /// with blank node objects ranked by `ranks` (if already known).
    fn keys(&self, ranks: Option<&[u64]>) -> Vec<NodeKey> {
        let rank_of = |idx: &usize| ranks.and_then(|ranks| ranks.get(*idx)).copied();
        (0..self.nodes.len())
            .map(|idx| {
                if self.helper.get(idx).copied().unwrap_or_default() {
                    return NodeKey::default();
                }
                let mut invisible = RankVector::default();
                for (predicate_rank, object_idx) in self.blank_objects.get(idx).into_iter().flatten()
                {
                    if let Some(rank) = rank_of(object_idx) {
                        invisible.push(*predicate_rank, rank);
                    }
                }
                invisible.sort();
                let mut list_invisible: Vec<u64> = self
                    .blank_items
                    .get(idx)
                    .into_iter()
                    .flatten()
                    .filter_map(rank_of)
                    .collect();
                list_invisible.sort_unstable();
                NodeKey {
                    visible: self.visible.get(idx).cloned().unwrap_or_default(),
                    invisible,
                    list_visible: self.list_visible.get(idx).cloned().unwrap_or_default(),
                    list_invisible: Slot(list_invisible),
                }
            })
            .collect()
    }
}

/// Ranks starting at 1, equal keys sharing a rank.
fn dense_ranks<K: Ord>(keys: &[K]) -> Vec<u64> {
    let mut order: Vec<usize> = (0..keys.len()).collect();
    order.sort_by(|a, b| keys.get(*a).cmp(&keys.get(*b)));
    let mut ranks = vec![0; keys.len()];
    let mut rank = 0;
    let mut previous: Option<&K> = None;
    for idx in order {
        let key = keys.get(idx);
        if previous.is_none() || previous != key {
            rank += 1;
        }
        previous = key;
        if let Some(slot) = ranks.get_mut(idx) {
            *slot = rank;
        }
    }
    ranks
}

/// Refines the ranks of all nodes of `arena` in at most `cap` rounds.
/// Returns the ranks, and whether they settled.
fn refine(arena: &Arena<'_>, cap: usize) -> (Vec<u64>, bool) {
    let initial = dense_ranks(&arena.keys(None));
    let mut keys = arena.keys(Some(&initial));
    let mut previous_keys = None;
    let mut ranks = initial;
    let mut rounds = 0;
    while previous_keys.as_ref() != Some(&keys) {
        if rounds >= cap {
            tracing::warn!(
                "Blank node ranks did not settle after {rounds} rounds; \
                 continuing with the last ones"
            );
            return (ranks, false);
        }
        rounds += 1;
        ranks = dense_ranks(&keys);
        let next = arena.keys(Some(&ranks));
        previous_keys = Some(keys);
        keys = next;
    }
    tracing::trace!(
        "Ranked {} blank nodes in {rounds} rounds",
        arena.nodes.len()
    );
    (ranks, true)
}

/// The rank of every blank node of the graph,
/// all of them above `max_object_rank`.
///
/// Blank nodes with the same structure share a rank.
#[must_use]
pub fn node_ranks<'graph>(
    inputs: &Inputs<'_, 'graph>,
    max_object_rank: u64,
) -> HashMap<BlankNodeRef<'graph>, u64> {
    let arena = Arena::new(inputs);
    let (ranks, _settled) = refine(&arena, arena.nodes.len() + 2);
    let ranks_of_nodes = arena.nodes.iter().copied().zip(ranks);
    ranks_of_nodes
        .map(|(node, rank)| (node, rank + max_object_rank))
        .collect()
}

/// Secondary ranks that tell apart blank nodes of equal [`node_ranks`]
/// by what points to them.
///
/// The keys are refined until they stop changing,
/// so nodes only stay tied if they and everything pointing to them look alike.
#[must_use]
pub fn tie_ranks<'graph>(
    inputs: &Inputs<'_, 'graph>,
    node_rank: &HashMap<BlankNodeRef<'graph>, u64>,
) -> HashMap<BlankNodeRef<'graph>, u64> {
    let arena = Arena::new(inputs);
    let primary: Vec<u64> = arena
        .nodes
        .iter()
        .map(|node| node_rank.get(node).copied().unwrap_or_default())
        .collect();
    let cap = arena.nodes.len() + 2;

    let mut ties = vec![0; arena.nodes.len()];
    for _round in 0..cap {
        let keys: Vec<(u64, u64, Vec<(usize, u64, u64)>)> = (0..arena.nodes.len())
            .map(|idx| {
                let mut incoming: Vec<(usize, u64, u64)> = arena
                    .incoming
                    .get(idx)
                    .into_iter()
                    .flatten()
                    .map(|(predicate_rank, referrer)| match referrer {
                        Referrer::Ranked(rank) => (*predicate_rank, *rank, 0),
                        Referrer::Blank(other) => (
                            *predicate_rank,
                            primary.get(*other).copied().unwrap_or_default(),
                            ties.get(*other).copied().unwrap_or_default(),
                        ),
                    })
                    .collect();
                incoming.sort_unstable();
                (
                    primary.get(idx).copied().unwrap_or_default(),
                    ties.get(idx).copied().unwrap_or_default(),
                    incoming,
                )
            })
            .collect();
        let refined = dense_ranks(&keys);
        if refined == ties {
            break;
        }
        ties = refined;
    }

    arena.nodes.iter().copied().zip(ties).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::OrderConfig;
    use crate::parser::parse;
    use crate::rank::object::object_ranks;
    use crate::rank::predicate::{predicate_order, predicate_ranks};

    struct Tables<'graph> {
        predicate_rank: HashMap<NamedNodeRef<'graph>, usize>,
        object_rank: HashMap<TermRef<'graph>, u64>,
        lists: ListRankers<'graph>,
    }

    impl<'graph> Tables<'graph> {
        fn new(input: &'graph crate::input::Input) -> Self {
            let config = OrderConfig::default();
            let order = predicate_order(&input.graph, &input.namespaces, &config);
            Self {
                predicate_rank: predicate_ranks(&order),
                object_rank: object_ranks(&input.graph, &input.namespaces, &config),
                lists: ListRankers::new(&input.graph, &config),
            }
        }

        fn inputs<'tables>(&'tables self, graph: &'graph Graph) -> Inputs<'tables, 'graph> {
            Inputs {
                graph,
                predicate_rank: &self.predicate_rank,
                object_rank: &self.object_rank,
                lists: &self.lists,
            }
        }
    }

    fn rank_strings(turtle: &str) -> Vec<(String, u64)> {
        let input = parse(turtle.as_bytes()).expect("valid turtle");
        let tables = Tables::new(&input);
        let ranks = node_ranks(
            &tables.inputs(&input.graph),
            tables.object_rank.len() as u64,
        );
        // identify each blank node by the label it points to
        let mut named: Vec<(String, u64)> = ranks
            .iter()
            .map(|(node, rank)| {
                let label = input
                    .graph
                    .object_for_subject_predicate(*node, oxrdf::vocab::rdfs::LABEL)
                    .map(|term| term.to_string())
                    .unwrap_or_default();
                (label, *rank)
            })
            .collect();
        named.sort();
        named
    }

    #[test]
    fn rank_vector_prefers_present_slots() {
        let mut a = RankVector::default();
        a.push(0, 5);
        let mut b = RankVector::default();
        b.push(1, 0);
        assert!(a < b);
        let mut c = RankVector::default();
        c.push(0, 5);
        c.push(0, 7);
        assert!(a < c);
        assert!(RankVector::default() > a);
    }

    #[test]
    fn empty_slot_is_worst() {
        assert!(Slot(vec![u64::MAX]) < Slot(Vec::new()));
        assert!(Slot(vec![1, 2]) < Slot(vec![2]));
    }

    #[test]
    fn dense_ranks_share_ties() {
        assert_eq!(dense_ranks(&[3, 1, 3, 2]), vec![3, 1, 3, 2]);
        assert_eq!(dense_ranks(&["b", "a", "a"]), vec![2, 1, 1]);
    }

    #[test]
    fn ranked_by_content() {
        let ranks = rank_strings(
            r#"
@prefix ex: <http://example.org/> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
ex:s ex:p [ rdfs:label "b" ] , [ rdfs:label "a" ] , [ rdfs:label "c" ; ex:q ex:o ] .
"#,
        );
        let [(a, a_rank), (b, b_rank), (c, c_rank)] = ranks.as_slice() else {
            panic!("three blank nodes expected, got {ranks:?}");
        };
        assert_eq!(
            (a.as_str(), b.as_str(), c.as_str()),
            ("\"a\"", "\"b\"", "\"c\"")
        );
        assert!(a_rank < b_rank);
        assert!(b_rank < c_rank);
    }

    #[test]
    fn nesting_is_resolved() {
        let ranks = rank_strings(
            r#"
@prefix ex: <http://example.org/> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
ex:s ex:p [ rdfs:label "x" ; ex:q [ ex:r "2" ] ] ,
          [ rdfs:label "x" ; ex:q [ ex:r "1" ] ] .
"#,
        );
        let labelled: Vec<u64> = ranks
            .iter()
            .filter(|(label, _)| label == "\"x\"")
            .map(|(_, rank)| *rank)
            .collect();
        assert_eq!(labelled.len(), 2);
        assert_ne!(labelled.first(), labelled.get(1));
    }

    #[test]
    fn cycles_converge_to_a_tie() {
        let ranks = rank_strings(
            r"
@prefix ex: <http://example.org/> .
_:a ex:p _:b .
_:b ex:p _:a .
",
        );
        assert_eq!(ranks.len(), 2);
        assert_eq!(ranks.first().map(|(_, r)| r), ranks.get(1).map(|(_, r)| r));
    }

    #[test]
    fn malformed_list_cells_are_ordinary_nodes() {
        let input = parse(
            br"
@prefix ex: <http://example.org/> .
@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
ex:s ex:p [ rdf:rest ex:x ] , [ rdf:rest ex:y ] .
ex:s ex:q ( ex:a ) , [ rdf:first ex:a ; rdf:rest [ rdf:first ex:b ; rdf:rest ex:z ] ] .
",
        )
        .expect("valid turtle");
        let tables = Tables::new(&input);
        let ranks = node_ranks(
            &tables.inputs(&input.graph),
            tables.object_rank.len() as u64,
        );
        let rank_of_rest = |target: &str| {
            let target = NamedNodeRef::new_unchecked(target);
            let node = input
                .graph
                .subjects_for_predicate_object(rdf::REST, target)
                .next()
                .expect("a node with this rest");
            let SubjectRef::BlankNode(node) = node else {
                panic!("blank node expected");
            };
            ranks.get(&node).copied().expect("ranked")
        };
        assert_ne!(
            rank_of_rest("http://example.org/x"),
            rank_of_rest("http://example.org/y")
        );
        let distinct: std::collections::HashSet<u64> = ranks.values().copied().collect();
        assert_eq!(distinct.len(), ranks.len());
    }

    #[test]
    fn capped_refinement_reports_it() {
        let input = parse(
            br#"
@prefix ex: <http://example.org/> .
ex:s ex:p [ ex:q [ ex:r "1" ] ] , [ ex:q [ ex:r "2" ] ] .
"#,
        )
        .expect("valid turtle");
        let tables = Tables::new(&input);
        let arena = Arena::new(&tables.inputs(&input.graph));
        let (capped, settled) = refine(&arena, 0);
        assert!(!settled);
        assert_eq!(capped.len(), 4);
        let (ranks, settled) = refine(&arena, arena.nodes.len() + 2);
        assert!(settled);
        let distinct: std::collections::HashSet<u64> = ranks.iter().copied().collect();
        assert_eq!(distinct.len(), 4);
    }
}
