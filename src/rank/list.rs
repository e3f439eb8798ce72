// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Detection of RDF lists, and the parts of them that take part in ranking.

use std::collections::HashMap;
use std::collections::HashSet;

use oxrdf::BlankNodeRef;
use oxrdf::Graph;
use oxrdf::NamedNodeRef;
use oxrdf::SubjectRef;
use oxrdf::TermRef;
use oxrdf::vocab::rdf;

use crate::options::{NoReorder, OrderConfig};

/// The only object of `subject` under `predicate`, if there is exactly one.
pub(crate) fn single_object<'graph>(
    graph: &'graph Graph,
    subject: BlankNodeRef<'_>,
    predicate: NamedNodeRef<'_>,
) -> Option<TermRef<'graph>> {
    let mut objects = graph.objects_for_subject_predicate(subject, predicate);
    let first = objects.next()?;
    objects.next().is_none().then_some(first)
}

/// One RDF list, starting at its head.
#[derive(Debug, Clone)]
pub struct ListRanker<'graph> {
    pub head: BlankNodeRef<'graph>,
    /// Whether the items may be sorted when serialized.
    pub reorder: bool,
    /// The items, in chain order.
    pub items: Vec<TermRef<'graph>>,
    /// All cells after the head.
    pub helpers: Vec<BlankNodeRef<'graph>>,
}

/// The `rdf:first` and `rdf:rest` objects of a list cell,
/// if it has exactly one of each, and nothing else but `a rdf:List`.
pub(crate) fn cell_links<'graph>(
    graph: &'graph Graph,
    cell: BlankNodeRef<'_>,
) -> Option<(TermRef<'graph>, TermRef<'graph>)> {
    let mut first = None;
    let mut rest = None;
    for triple in graph.triples_for_subject(cell) {
        let slot = if triple.predicate == rdf::FIRST {
            &mut first
        } else if triple.predicate == rdf::REST {
            &mut rest
        } else if triple.predicate == rdf::TYPE
            && triple.object == TermRef::NamedNode(rdf::LIST)
        {
            continue;
        } else {
            return None;
        };
        if slot.replace(triple.object).is_some() {
            return None;
        }
    }
    Some((first?, rest?))
}

impl<'graph> ListRanker<'graph> {
    /// Walks the chain of the list starting at `head`.
    ///
    /// Returns `None` if the chain is not one that gets written as a collection:
    /// each cell has to pass [`cell_links`],
    /// each cell after the head has to be referenced by its predecessor only,
    /// and the chain has to end in `rdf:nil`.
    /// Such nodes are ranked as ordinary blank nodes.
    #[must_use]
    pub fn new(
        graph: &'graph Graph,
        head: BlankNodeRef<'graph>,
        config: &OrderConfig,
    ) -> Option<Self> {
        let mut items = Vec::new();
        let mut helpers = Vec::new();
        let mut seen = HashSet::new();
        let mut cell = head;
        loop {
            if !seen.insert(cell) {
                tracing::debug!("The list starting at {head} runs in a circle");
                return None;
            }
            if cell != head {
                if graph.triples_for_object(cell).nth(1).is_some() {
                    return None;
                }
                helpers.push(cell);
            }
            let (first, rest) = cell_links(graph, cell)?;
            items.push(first);
            match rest {
                TermRef::BlankNode(next) => cell = next,
                TermRef::NamedNode(nil) if nil == rdf::NIL => break,
                TermRef::NamedNode(_) | TermRef::Literal(_) => {
                    tracing::debug!("The list starting at {head} does not end in rdf:nil");
                    return None;
                }
            }
        }
        Some(Self {
            head,
            reorder: may_reorder(graph, head, config),
            items,
            helpers,
        })
    }

    /// The items that are literals or IRIs.
    pub fn visible_items(&self) -> impl Iterator<Item = TermRef<'graph>> + '_ {
        self.items
            .iter()
            .copied()
            .filter(|item| !item.is_blank_node())
    }

    pub fn blank_items(&self) -> impl Iterator<Item = BlankNodeRef<'graph>> + '_ {
        self.items.iter().filter_map(|item| match item {
            TermRef::BlankNode(node) => Some(*node),
            TermRef::NamedNode(_) | TermRef::Literal(_) => None,
        })
    }
}

/// A list keeps its order if any of the predicates pointing to its head
/// is one that requires it.
///
/// If the head is the target of a reified axiom
/// (for example `owl:annotatedTarget`),
/// the deciding predicate is the annotated one of that axiom.
pub(crate) fn may_reorder(graph: &Graph, head: BlankNodeRef<'_>, config: &OrderConfig) -> bool {
    if config.no_reorder == NoReorder::All {
        return false;
    }
    !graph.triples_for_object(head).any(|triple| {
        let linking = config
            .no_reorder_rdf_star
            .iter()
            .find(|(target, _property)| target.as_ref() == triple.predicate)
            .map_or(Some(triple.predicate), |(_target, property)| {
                match triple.subject {
                    SubjectRef::BlankNode(axiom) => single_object(graph, axiom, property.as_ref()),
                    SubjectRef::NamedNode(axiom) => {
                        graph.object_for_subject_predicate(axiom, property.as_ref())
                    }
                }
                .and_then(|annotated| match annotated {
                    TermRef::NamedNode(annotated) => Some(annotated),
                    TermRef::BlankNode(_) | TermRef::Literal(_) => None,
                })
            });
        linking.is_some_and(|predicate| config.preserves_order_under(predicate))
    })
}

/// All lists of a graph.
#[derive(Debug, Clone, Default)]
pub struct ListRankers<'graph> {
    pub rankers: HashMap<BlankNodeRef<'graph>, ListRanker<'graph>>,
    /// Cells of lists that are not the head, mapped to their head.
    pub helpers: HashMap<BlankNodeRef<'graph>, BlankNodeRef<'graph>>,
}

impl<'graph> ListRankers<'graph> {
    /// Finds the lists, starting from their heads:
    /// blank nodes typed `rdf:List`,
    /// and blank nodes with exactly one `rdf:first`
    /// that are not the `rdf:rest` of an other node.
    /// Malformed lists are left out.
    #[must_use]
    pub fn new(graph: &'graph Graph, config: &OrderConfig) -> Self {
        let mut heads: HashSet<BlankNodeRef<'graph>> = HashSet::new();
        for subject in graph.subjects_for_predicate_object(rdf::TYPE, rdf::LIST) {
            if let SubjectRef::BlankNode(node) = subject {
                heads.insert(node);
            }
        }
        for triple in graph.triples_for_predicate(rdf::FIRST) {
            if let SubjectRef::BlankNode(node) = triple.subject {
                let is_continuation = graph
                    .subjects_for_predicate_object(rdf::REST, node)
                    .next()
                    .is_some();
                if !is_continuation && single_object(graph, node, rdf::FIRST).is_some() {
                    heads.insert(node);
                }
            }
        }

        let mut rankers = HashMap::new();
        let mut helpers = HashMap::new();
        for head in heads {
            let Some(ranker) = ListRanker::new(graph, head, config) else {
                continue;
            };
            for helper in &ranker.helpers {
                helpers.insert(*helper, head);
            }
            rankers.insert(head, ranker);
        }
        Self { rankers, helpers }
    }

    #[must_use]
    pub fn get(&self, head: BlankNodeRef<'graph>) -> Option<&ListRanker<'graph>> {
        self.rankers.get(&head)
    }

    #[must_use]
    pub fn is_helper(&self, node: BlankNodeRef<'_>) -> bool {
        self.helpers.contains_key(&node)
    }

    /// Whether the items of the list starting at `head` keep their order.
    #[must_use]
    pub fn keeps_order(&self, head: BlankNodeRef<'_>) -> bool {
        self.rankers.get(&head).is_some_and(|ranker| !ranker.reorder)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rankers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rankers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::vocab::owl;

    const LISTS: &str = r"
@prefix ex: <http://example.org/> .
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .

ex:chain owl:propertyChainAxiom ( ex:c ex:a ex:b ) .
ex:union owl:unionOf ( ex:c ex:a ex:b ) .
[] a owl:Axiom ;
    owl:annotatedSource ex:x ;
    owl:annotatedProperty owl:propertyChainAxiom ;
    owl:annotatedTarget ( ex:b ex:a ) .
";

    fn ranker_of<'graph>(
        graph: &'graph Graph,
        rankers: &'graph ListRankers<'graph>,
        subject: &str,
        predicate: NamedNodeRef<'_>,
    ) -> &'graph ListRanker<'graph> {
        let subject = oxrdf::NamedNode::new_unchecked(subject);
        let Some(TermRef::BlankNode(head)) =
            graph.object_for_subject_predicate(subject.as_ref(), predicate)
        else {
            panic!("no list head for {subject}");
        };
        rankers.get(head).expect("list head was detected")
    }

    #[test]
    fn detection_and_reordering() {
        let input = parse(LISTS.as_bytes()).expect("valid turtle");
        let config = OrderConfig::default();
        let rankers = ListRankers::new(&input.graph, &config);
        assert_eq!(rankers.len(), 3);
        assert_eq!(rankers.helpers.len(), 2 + 2 + 1);

        let chain = ranker_of(
            &input.graph,
            &rankers,
            "http://example.org/chain",
            owl::PROPERTY_CHAIN_AXIOM,
        );
        assert!(!chain.reorder);
        assert_eq!(chain.items.len(), 3);
        assert_eq!(chain.visible_items().count(), 3);
        assert_eq!(chain.blank_items().count(), 0);

        let union = ranker_of(&input.graph, &rankers, "http://example.org/union", owl::UNION_OF);
        assert!(union.reorder);

        let annotated = rankers
            .rankers
            .values()
            .find(|ranker| ranker.items.len() == 2)
            .expect("annotated target list");
        assert!(!annotated.reorder);
    }

    #[test]
    fn all_lists_ordered() {
        let input = parse(LISTS.as_bytes()).expect("valid turtle");
        let config = OrderConfig::default().with_all_lists_ordered();
        let rankers = ListRankers::new(&input.graph, &config);
        assert!(rankers.rankers.values().all(|ranker| !ranker.reorder));
    }

    #[test]
    fn cyclic_rest_is_no_list() {
        let input = parse(
            br"
@prefix ex: <http://example.org/> .
@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
ex:s ex:p _:l1 .
_:l1 rdf:first ex:a ; rdf:rest _:l2 .
_:l2 rdf:first ex:b ; rdf:rest _:l3 .
_:l3 rdf:first ex:c ; rdf:rest _:l2 .
",
        )
        .expect("valid turtle");
        let rankers = ListRankers::new(&input.graph, &OrderConfig::default());
        assert!(rankers.is_empty());
        assert!(rankers.helpers.is_empty());
    }

    #[test]
    fn malformed_lists_are_left_out() {
        let input = parse(
            br"
@prefix ex: <http://example.org/> .
@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
ex:s ex:p ( ex:a ex:b ) .
ex:s ex:q _:m1 , _:m2 , _:m3 .
_:m1 rdf:first ex:a ; rdf:rest ex:x .
_:m2 rdf:first ex:a ; rdf:rest _:m2b .
_:m2b rdf:first ex:b ; rdf:rest rdf:nil ; ex:extra ex:y .
_:m3 rdf:first ex:a , ex:b ; rdf:rest rdf:nil .
",
        )
        .expect("valid turtle");
        let rankers = ListRankers::new(&input.graph, &OrderConfig::default());
        assert_eq!(rankers.len(), 1);
        assert_eq!(rankers.helpers.len(), 1);
        let ranker = rankers.rankers.values().next().expect("one list");
        assert_eq!(ranker.items.len(), 2);
    }
}
