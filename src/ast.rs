// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

//! The tree of everything that gets written, in output order.
//!
//! Building it settles all that depends on what was written before:
//! which blank nodes are nested, which get a label,
//! and which prefixes are in use.

use std::collections::BTreeSet;
use std::collections::HashMap;
use std::collections::HashSet;

use oxrdf::BlankNodeRef;
use oxrdf::Graph;
use oxrdf::LiteralRef;
use oxrdf::NamedNodeRef;
use oxrdf::SubjectRef;
use oxrdf::TermRef;
use oxrdf::vocab::{rdf, xsd};

use crate::constants::{BLANK_NODE_LABEL_PREFIX, SUBSTITUTE_BASE};
use crate::input::Input;
use crate::lexical;
use crate::namespaces::{Namespaces, QName};
use crate::options::{FormatOptions, Variant};
use crate::rank::RankTables;
use crate::rank::list;
use crate::rank::topclass::top_class_ranks;
use crate::sections::{self, Section};

/// How an IRI is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TName {
    Prefixed(QName),
    /// Relative to the base, without the angle brackets.
    Based(String),
    /// The full IRI in angle brackets.
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TNamedNode<'graph> {
    pub node: NamedNodeRef<'graph>,
    pub name: TName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TLiteral<'graph> {
    pub literal: LiteralRef<'graph>,
    /// Set if the datatype has to be written out.
    pub datatype: Option<TNamedNode<'graph>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TSubject<'graph> {
    NamedNode(TNamedNode<'graph>),
    BlankNodeLabel(String),
    /// `[]`, for blank nodes nothing refers to.
    BlankNodeAnonymous,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TPredicate<'graph> {
    /// `rdf:type`
    A,
    NamedNode(TNamedNode<'graph>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TPredicateCont<'graph> {
    pub predicate: TPredicate<'graph>,
    pub objects: Vec<TObject<'graph>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TObject<'graph> {
    NamedNode(TNamedNode<'graph>),
    BlankNodeLabel(String),
    /// `[ ... ]`
    BlankNodeAnonymous(Vec<TPredicateCont<'graph>>),
    /// `( ... )`
    Collection(Vec<TObject<'graph>>),
    Literal(TLiteral<'graph>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TStatement<'graph> {
    pub subject: TSubject<'graph>,
    pub predicates: Vec<TPredicateCont<'graph>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TSection<'graph> {
    /// Only set if the section has statements of its own.
    pub header: Option<String>,
    pub statements: Vec<TStatement<'graph>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TRoot<'graph> {
    pub base: Option<String>,
    /// The prefixes in use, in the order they are declared.
    pub prefixes: Vec<(String, String)>,
    pub sections: Vec<TSection<'graph>>,
}

/// The part of `iri` after `base`,
/// if it resolves against `base` to `iri` again.
fn relative_to<'iri>(iri: &'iri str, base: &str) -> Option<&'iri str> {
    let rest = iri.strip_prefix(base)?;
    if rest.starts_with('#') {
        return Some(rest);
    }
    let first_segment = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let resolvable = base.ends_with('/')
        && !rest.starts_with('/')
        && !first_segment.contains(':')
        && first_segment != "."
        && first_segment != "..";
    resolvable.then_some(rest)
}

/// The datatype of a literal, unless it is implied by its form.
fn explicit_datatype(literal: LiteralRef<'_>) -> Option<NamedNodeRef<'_>> {
    let datatype = literal.datatype();
    (literal.language().is_none() && datatype != xsd::STRING).then_some(datatype)
}

struct TreeBuilder<'ctx, 'graph> {
    graph: &'graph Graph,
    tables: &'ctx RankTables<'graph>,
    options: &'ctx FormatOptions,
    references: HashMap<BlankNodeRef<'graph>, usize>,
    bases: Vec<String>,
    namespaces: Namespaces,
    used_prefixes: BTreeSet<String>,
    serialized: HashSet<SubjectRef<'graph>>,
    labels: HashMap<BlankNodeRef<'graph>, String>,
}

impl<'graph> TreeBuilder<'_, 'graph> {
    fn relative<'iri>(&self, iri: &'iri str) -> Option<&'iri str> {
        self.bases.iter().find_map(|base| relative_to(iri, base))
    }

    /// Generates prefixes for the predicates that have none,
    /// in output order,
    /// so they are numbered the same way each time.
    /// Which prefixes are in use is only known once the tree is built.
    fn generate_prefixes(&mut self) {
        if !self.options.gen_prefix {
            return;
        }
        let tables = self.tables;
        for predicate in &tables.predicate_order {
            // written as `a`, or as part of a collection
            if [rdf::TYPE, rdf::FIRST, rdf::REST].contains(predicate)
                || self.relative(predicate.as_str()).is_some()
            {
                continue;
            }
            self.namespaces.compute_qname(predicate.as_str(), true);
        }
    }

    /// The declarations of the prefixes in use,
    /// and of the empty prefix, if bound.
    fn prefixes(&self) -> Vec<(String, String)> {
        let mut prefixes: Vec<(String, String)> = self
            .used_prefixes
            .iter()
            .map(String::as_str)
            .chain(self.namespaces.namespace("").map(|_| ""))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .filter_map(|prefix| {
                self.namespaces
                    .namespace(prefix)
                    .map(|namespace| (prefix.to_owned(), namespace.to_owned()))
            })
            .collect();
        let sort_key = self.options.order.sort_key;
        prefixes.sort_by_cached_key(|(prefix, namespace)| (sort_key.key(prefix), namespace.clone()));
        prefixes
    }

    fn references(&self, node: BlankNodeRef<'graph>) -> usize {
        self.references.get(&node).copied().unwrap_or_default()
    }

    fn is_done(&self, subject: SubjectRef<'graph>) -> bool {
        self.serialized.contains(&subject)
    }

    /// The label of a blank node,
    /// numbered in the order they are first written.
    fn label(&mut self, node: BlankNodeRef<'graph>) -> String {
        let next = self.labels.len() + 1;
        self.labels
            .entry(node)
            .or_insert_with(|| format!("_:{BLANK_NODE_LABEL_PREFIX}{next}"))
            .clone()
    }

    fn named_node(&mut self, node: NamedNodeRef<'graph>) -> TNamedNode<'graph> {
        let name = if let Some(relative) = self.relative(node.as_str()) {
            TName::Based(relative.to_owned())
        } else if let Some(qname) = self.namespaces.qname(node.as_str()) {
            self.used_prefixes.insert(qname.prefix.clone());
            TName::Prefixed(qname)
        } else {
            tracing::trace!("Writing <{}> in full", node.as_str());
            TName::Plain
        };
        TNamedNode { node, name }
    }

    fn literal(&mut self, literal: LiteralRef<'graph>) -> TLiteral<'graph> {
        let datatype = if lexical::plain_form(literal).is_some() {
            None
        } else {
            explicit_datatype(literal).map(|datatype| self.named_node(datatype))
        };
        TLiteral { literal, datatype }
    }

    /// The items and cells of the list starting at `head`,
    /// if it can be written as a collection:
    /// every cell has one `rdf:first`, one `rdf:rest`,
    /// optionally `a rdf:List` and nothing else,
    /// all cells but the head are only referenced by their predecessor,
    /// and the chain ends in `rdf:nil`.
    fn valid_list(
        &self,
        head: BlankNodeRef<'graph>,
    ) -> Option<(Vec<TermRef<'graph>>, Vec<BlankNodeRef<'graph>>)> {
        let mut items = Vec::new();
        let mut cells = Vec::new();
        let mut seen = HashSet::new();
        let mut cell = head;
        loop {
            if !seen.insert(cell) || (cell != head && self.references(cell) != 1) {
                return None;
            }
            let (first, rest) = list::cell_links(self.graph, cell)?;
            items.push(first);
            cells.push(cell);
            match rest {
                TermRef::BlankNode(next) => cell = next,
                TermRef::NamedNode(nil) if nil == rdf::NIL => break,
                TermRef::NamedNode(_) | TermRef::Literal(_) => return None,
            }
        }
        Some((items, cells))
    }

    fn collection(
        &mut self,
        head: BlankNodeRef<'graph>,
        mut items: Vec<TermRef<'graph>>,
        cells: Vec<BlankNodeRef<'graph>>,
    ) -> Vec<TObject<'graph>> {
        self.serialized
            .extend(cells.into_iter().map(SubjectRef::BlankNode));
        let reorder = self.tables.lists.get(head).map_or_else(
            || list::may_reorder(self.graph, head, &self.options.order),
            |ranker| ranker.reorder,
        );
        if reorder {
            items.sort_by_cached_key(|item| self.tables.sort_key(*item));
        }
        items.into_iter().map(|item| self.object(item)).collect()
    }

    fn object(&mut self, object: TermRef<'graph>) -> TObject<'graph> {
        match object {
            TermRef::NamedNode(node) => TObject::NamedNode(self.named_node(node)),
            TermRef::Literal(literal) => TObject::Literal(self.literal(literal)),
            TermRef::BlankNode(node) => {
                if self.is_done(node.into()) || self.references(node) > 1 {
                    TObject::BlankNodeLabel(self.label(node))
                } else if let Some((items, cells)) = self.valid_list(node) {
                    TObject::Collection(self.collection(node, items, cells))
                } else {
                    self.serialized.insert(node.into());
                    TObject::BlankNodeAnonymous(self.predicates(node.into()))
                }
            }
        }
    }

    fn predicates(&mut self, subject: SubjectRef<'graph>) -> Vec<TPredicateCont<'graph>> {
        let mut grouped: Vec<(NamedNodeRef<'graph>, Vec<TermRef<'graph>>)> = Vec::new();
        let mut positions: HashMap<NamedNodeRef<'graph>, usize> = HashMap::new();
        for triple in self.graph.triples_for_subject(subject) {
            let position = *positions.entry(triple.predicate).or_insert_with(|| {
                grouped.push((triple.predicate, Vec::new()));
                grouped.len() - 1
            });
            if let Some((_predicate, objects)) = grouped.get_mut(position) {
                objects.push(triple.object);
            }
        }
        let tables = self.tables;
        grouped.sort_by_key(|(predicate, _objects)| {
            (tables.predicate_rank(*predicate), predicate.as_str())
        });

        let mut predicates = Vec::with_capacity(grouped.len());
        for (predicate, mut objects) in grouped {
            objects.sort_by_cached_key(|object| tables.sort_key(*object));
            let predicate = if predicate == rdf::TYPE {
                TPredicate::A
            } else {
                TPredicate::NamedNode(self.named_node(predicate))
            };
            let objects = objects
                .into_iter()
                .map(|object| self.object(object))
                .collect();
            predicates.push(TPredicateCont { predicate, objects });
        }
        predicates
    }

    fn statement(&mut self, subject: SubjectRef<'graph>) -> TStatement<'graph> {
        self.serialized.insert(subject);
        let t_subject = match subject {
            SubjectRef::NamedNode(node) => TSubject::NamedNode(self.named_node(node)),
            SubjectRef::BlankNode(node) if self.references(node) == 0 => {
                TSubject::BlankNodeAnonymous
            }
            SubjectRef::BlankNode(node) => TSubject::BlankNodeLabel(self.label(node)),
        };
        TStatement {
            subject: t_subject,
            predicates: self.predicates(subject),
        }
    }

    /// Writes each subject not yet written as part of an other one.
    /// A header is only kept if its section has a statement of its own.
    fn sections(&mut self, sections: Vec<Section<'graph>>) -> Vec<TSection<'graph>> {
        let mut t_sections = Vec::with_capacity(sections.len());
        for section in sections {
            let header = section
                .header
                .filter(|_header| section.subjects.iter().any(|subject| !self.is_done(*subject)));
            let mut statements = Vec::new();
            for subject in section.subjects {
                if !self.is_done(subject) {
                    statements.push(self.statement(subject));
                }
            }
            if header.is_some() || !statements.is_empty() {
                t_sections.push(TSection { header, statements });
            }
        }
        t_sections
    }
}

/// Builds the tree of the whole document.
///
/// `input` has to be the graph the rank tables were computed on,
/// or one with a subset of its triples.
#[must_use]
pub fn construct_tree<'graph>(
    input: &'graph Input,
    tables: &RankTables<'graph>,
    options: &FormatOptions,
) -> TRoot<'graph> {
    let references = sections::references(&input.graph);
    let class_ranks = matches!(options.variant, Variant::SubClassOf)
        .then(|| top_class_ranks(&input.graph, &input.namespaces, &options.order));
    let sections = sections::order_subjects(
        input,
        tables,
        &references,
        class_ranks.as_ref(),
        &options.order,
    );

    let mut bases = vec![SUBSTITUTE_BASE.to_owned()];
    bases.extend(input.base.clone());
    let mut builder = TreeBuilder {
        graph: &input.graph,
        tables,
        options,
        references,
        bases,
        namespaces: input.namespaces.clone(),
        used_prefixes: BTreeSet::new(),
        serialized: HashSet::new(),
        labels: HashMap::new(),
    };
    builder.generate_prefixes();
    let sections = builder.sections(sections);
    tracing::debug!(
        "Built {} sections, labelling {} blank nodes",
        sections.len(),
        builder.labels.len()
    );

    TRoot {
        base: input.base.clone(),
        prefixes: builder.prefixes(),
        sections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::rank::compute_ranks;

    fn tree(turtle: &str) -> TRoot<'static> {
        let input: &'static Input =
            Box::leak(Box::new(parse(turtle.as_bytes()).expect("valid turtle")));
        let options = FormatOptions::default();
        let tables = compute_ranks(input, &options.order);
        construct_tree(input, &tables, &options)
    }

    fn statements(root: &TRoot<'static>) -> Vec<TStatement<'static>> {
        root.sections
            .iter()
            .flat_map(|section| section.statements.iter().cloned())
            .collect()
    }

    #[test]
    fn relative_iris() {
        assert_eq!(relative_to("http://ex.org/a/b", "http://ex.org/a/"), Some("b"));
        assert_eq!(relative_to("http://ex.org/a#b", "http://ex.org/a"), Some("#b"));
        assert_eq!(relative_to("http://ex.org/ab", "http://ex.org/a"), None);
        assert_eq!(relative_to("http://ex.org/x:y", "http://ex.org/"), None);
        assert_eq!(relative_to("http://ex.org/../y", "http://ex.org/"), None);
    }

    #[test]
    fn shared_blank_nodes_get_labels() {
        let root = tree(
            r#"
@prefix ex: <http://example.org/> .
ex:a ex:p _:shared .
ex:b ex:p _:shared .
_:shared ex:q "x" .
"#,
        );
        let statements = statements(&root);
        assert_eq!(statements.len(), 3);
        assert_eq!(
            statements.last().map(|statement| &statement.subject),
            Some(&TSubject::BlankNodeLabel("_:b1".to_owned()))
        );
    }

    #[test]
    fn lists_become_collections() {
        let root = tree(
            r#"
@prefix ex: <http://example.org/> .
ex:a ex:p ( ex:z ex:y ) .
ex:b ex:p [ a ex:NotAList ; <http://www.w3.org/1999/02/22-rdf-syntax-ns#first> ex:x ;
    <http://www.w3.org/1999/02/22-rdf-syntax-ns#rest> () ] .
"#,
        );
        let statements = statements(&root);
        assert_eq!(statements.len(), 2, "the list cells are not written on their own");
        let objects = |idx: usize| {
            statements
                .get(idx)
                .and_then(|statement| statement.predicates.first())
                .map(|predicate| predicate.objects.clone())
                .unwrap_or_default()
        };
        match objects(0).first() {
            Some(TObject::Collection(items)) => {
                let names: Vec<_> = items
                    .iter()
                    .map(|item| match item {
                        TObject::NamedNode(named) => named.node.as_str().to_owned(),
                        other => panic!("unexpected item {other:?}"),
                    })
                    .collect();
                assert_eq!(names, vec!["http://example.org/y", "http://example.org/z"]);
            }
            other => panic!("expected a collection, got {other:?}"),
        }
        assert!(matches!(
            objects(1).first(),
            Some(TObject::BlankNodeAnonymous(_))
        ));
    }

    #[test]
    fn only_used_prefixes_are_declared() {
        let root = tree(
            r"
@prefix zeta: <http://example.org/zeta/> .
@prefix unused: <http://example.org/unused/> .
@prefix alpha: <http://example.org/alpha/> .
@prefix : <http://example.org/default/> .
zeta:a alpha:p zeta:b .
",
        );
        let prefixes: Vec<&str> = root
            .prefixes
            .iter()
            .map(|(prefix, _namespace)| prefix.as_str())
            .collect();
        assert_eq!(prefixes, vec!["", "alpha", "zeta"]);
    }
}
