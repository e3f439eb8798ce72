// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

//! The rank tables that decide on the order of everything in the output.
//!
//! They are computed once for the complete graph,
//! before anything gets written.

pub mod blank;
pub mod list;
pub mod object;
pub mod predicate;
pub mod topclass;

use std::collections::HashMap;

use oxrdf::BlankNodeRef;
use oxrdf::NamedNodeRef;
use oxrdf::SubjectRef;
use oxrdf::TermRef;

use crate::input::Input;
use crate::options::OrderConfig;

pub use self::list::{ListRanker, ListRankers};

#[derive(Debug, Clone)]
pub struct RankTables<'graph> {
    /// All predicates of the graph, in output order.
    pub predicate_order: Vec<NamedNodeRef<'graph>>,
    pub predicate_rank: HashMap<NamedNodeRef<'graph>, usize>,
    /// Literals and IRIs.
    pub object_rank: HashMap<TermRef<'graph>, u64>,
    /// Number of entries in `object_rank`, but at least 1.
    pub max_object_rank: u64,
    pub lists: ListRankers<'graph>,
    /// Blank nodes; always above `max_object_rank`.
    pub node_rank: HashMap<BlankNodeRef<'graph>, u64>,
    /// Tells apart blank nodes sharing a `node_rank`.
    pub tie_rank: HashMap<BlankNodeRef<'graph>, u64>,
}

/// Computes all rank tables of `input`.
#[must_use]
pub fn compute_ranks<'graph>(input: &'graph Input, config: &OrderConfig) -> RankTables<'graph> {
    let graph = &input.graph;
    let predicate_order = predicate::predicate_order(graph, &input.namespaces, config);
    let predicate_rank = predicate::predicate_ranks(&predicate_order);
    let object_rank = object::object_ranks(graph, &input.namespaces, config);
    let max_object_rank = (object_rank.len() as u64).max(1);
    let lists = ListRankers::new(graph, config);

    let inputs = blank::Inputs {
        graph,
        predicate_rank: &predicate_rank,
        object_rank: &object_rank,
        lists: &lists,
    };
    let node_rank = blank::node_ranks(&inputs, max_object_rank);
    let tie_rank = blank::tie_ranks(&inputs, &node_rank);
    tracing::debug!(
        "Ranked {} predicates, {} literals and IRIs, {} lists and {} blank nodes",
        predicate_order.len(),
        object_rank.len(),
        lists.len(),
        node_rank.len()
    );

    RankTables {
        predicate_order,
        predicate_rank,
        object_rank,
        max_object_rank,
        lists,
        node_rank,
        tie_rank,
    }
}

impl<'graph> RankTables<'graph> {
    /// The one rank all terms are compared by.
    #[must_use]
    pub fn global_key(&self, term: TermRef<'graph>) -> u64 {
        match term {
            TermRef::BlankNode(node) => self.node_rank.get(&node).copied().unwrap_or_else(|| {
                tracing::warn!("The blank node {node} has no rank");
                0
            }),
            TermRef::NamedNode(_) | TermRef::Literal(_) => {
                self.object_rank.get(&term).copied().unwrap_or(u64::MAX)
            }
        }
    }

    #[must_use]
    pub fn subject_key(&self, subject: SubjectRef<'graph>) -> u64 {
        self.global_key(subject.into())
    }

    /// The global key, with ties between blank nodes broken up further.
    #[must_use]
    pub fn sort_key(&self, term: TermRef<'graph>) -> (u64, u64) {
        let tie = match term {
            TermRef::BlankNode(node) => self.tie_rank.get(&node).copied().unwrap_or_default(),
            TermRef::NamedNode(_) | TermRef::Literal(_) => 0,
        };
        (self.global_key(term), tie)
    }

    #[must_use]
    pub fn predicate_rank(&self, predicate: NamedNodeRef<'graph>) -> usize {
        self.predicate_rank
            .get(&predicate)
            .copied()
            .unwrap_or(usize::MAX)
    }
}
