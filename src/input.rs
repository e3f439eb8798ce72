// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;

use oxrdf::Graph;
use oxrdf::SubjectRef;

use crate::namespaces::Namespaces;

#[derive(Debug, Clone, Default)]
pub struct Input {
    pub base: Option<String>,
    pub namespaces: Namespaces,
    pub graph: Graph,
}

impl Input {
    #[must_use]
    pub fn new(graph: Graph, namespaces: Namespaces) -> Self {
        Self {
            base: None,
            namespaces,
            graph,
        }
    }

    /// Each subject of the graph, once.
    pub fn subjects(&self) -> impl Iterator<Item = SubjectRef<'_>> {
        let mut seen = HashSet::new();
        self.graph
            .iter()
            .filter_map(move |triple| seen.insert(triple.subject).then_some(triple.subject))
    }

    /// Adds the triples and the prefixes of `other` to this input.
    /// Prefixes already bound here keep their namespace.
    pub fn merge(&mut self, other: Self) {
        for triple in &other.graph {
            self.graph.insert(triple);
        }
        for (prefix, namespace) in other.namespaces.iter() {
            if self.namespaces.namespace(prefix).is_none() {
                self.namespaces.insert(prefix, namespace);
            }
        }
        if self.base.is_none() {
            self.base = other.base;
        }
    }
}
