// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Grouping of the subjects into the sections of the document.

use std::collections::HashMap;
use std::collections::HashSet;

use oxrdf::BlankNodeRef;
use oxrdf::Graph;
use oxrdf::NamedNodeRef;
use oxrdf::SubjectRef;
use oxrdf::TermRef;
use oxrdf::vocab::{rdf, rdfs};

use crate::input::Input;
use crate::options::{OrderConfig, REMAINDER_HEADER};
use crate::rank::RankTables;

/// The subjects of one section, in output order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'graph> {
    /// `None` for sections written without a header.
    pub header: Option<String>,
    pub subjects: Vec<SubjectRef<'graph>>,
}

/// How often each blank node is used as an object.
#[must_use]
pub fn references(graph: &Graph) -> HashMap<BlankNodeRef<'_>, usize> {
    let mut references = HashMap::new();
    for triple in graph {
        if let TermRef::BlankNode(node) = triple.object {
            *references.entry(node).or_default() += 1;
        }
    }
    references
}

/// Puts the instances of each top class into a section of their own,
/// followed by a section with all remaining subjects.
///
/// Blank nodes that are referenced from elsewhere stay out of the class sections;
/// they are written where they are referenced, if possible.
/// Blank nodes that are not referenced at all
/// go to the last class section.
///
/// `top_class_ranks` replaces the global key of IRI class members,
/// if given.
#[must_use]
pub fn order_subjects<'graph>(
    input: &'graph Input,
    tables: &RankTables<'graph>,
    references: &HashMap<BlankNodeRef<'graph>, usize>,
    top_class_ranks: Option<&HashMap<NamedNodeRef<'graph>, u64>>,
    config: &OrderConfig,
) -> Vec<Section<'graph>> {
    let refs = |node: BlankNodeRef<'graph>| references.get(&node).copied().unwrap_or_default();
    let member_key = |member: SubjectRef<'graph>| match (member, top_class_ranks) {
        (SubjectRef::NamedNode(iri), Some(ranks)) => {
            (ranks.get(&iri).copied().unwrap_or(u64::MAX), 0)
        }
        (SubjectRef::NamedNode(_), None) | (SubjectRef::BlankNode(_), Some(_) | None) => {
            tables.sort_key(member.into())
        }
    };

    let mut seen: HashSet<SubjectRef<'graph>> = HashSet::new();
    let mut sections = Vec::with_capacity(config.top_classes.len() + 1);
    for top in &config.top_classes {
        let mut members: Vec<SubjectRef<'graph>> = input
            .graph
            .subjects_for_predicate_object(rdf::TYPE, top.class.as_ref())
            .filter(|member| match member {
                SubjectRef::NamedNode(_) => true,
                SubjectRef::BlankNode(node) => {
                    // anonymous datatypes belong to the class using them
                    top.class.as_ref() != rdfs::DATATYPE && refs(*node) == 0
                }
            })
            .collect();
        members.sort_by_cached_key(|member| member_key(*member));
        seen.extend(members.iter().copied());
        sections.push(Section {
            header: (!top.header.is_empty()).then(|| top.header.clone()),
            subjects: members,
        });
    }

    let mut remaining: Vec<SubjectRef<'graph>> = input
        .subjects()
        .filter(|subject| !seen.contains(subject))
        .collect();
    remaining.sort_by_cached_key(|subject| tables.sort_key((*subject).into()));
    let (unreferenced, referenced): (Vec<_>, Vec<_>) =
        remaining.into_iter().partition(|subject| match subject {
            SubjectRef::BlankNode(node) => refs(*node) == 0,
            SubjectRef::NamedNode(_) => false,
        });
    let mut remainder = Section {
        header: Some(REMAINDER_HEADER.to_owned()),
        subjects: referenced,
    };
    match sections.last_mut() {
        Some(last) => last.subjects.extend(unreferenced),
        None => {
            let mut subjects = unreferenced;
            subjects.append(&mut remainder.subjects);
            remainder.subjects = subjects;
        }
    }
    sections.push(remainder);
    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::rank::compute_ranks;

    fn sections(turtle: &str) -> Vec<(Option<String>, Vec<String>)> {
        let input = parse(turtle.as_bytes()).expect("valid turtle");
        let config = OrderConfig::default();
        let tables = compute_ranks(&input, &config);
        let references = references(&input.graph);
        order_subjects(&input, &tables, &references, None, &config)
            .into_iter()
            .filter(|section| !section.subjects.is_empty())
            .map(|section| {
                let subjects = section
                    .subjects
                    .iter()
                    .map(|subject| match subject {
                        SubjectRef::NamedNode(iri) => input.namespaces.display(iri.as_str()),
                        SubjectRef::BlankNode(_) => "[]".to_owned(),
                    })
                    .collect();
                (section.header, subjects)
            })
            .collect()
    }

    #[test]
    fn classes_then_annotations() {
        let found = sections(
            r#"
@prefix ex: <http://example.org/> .
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
ex:c10 a owl:Class .
ex:c2 a owl:Class ; rdfs:subClassOf [ a owl:Restriction ] .
ex:onto a owl:Ontology .
ex:p a owl:ObjectProperty .
ex:thing rdfs:label "thing" .
[] a owl:Axiom ; owl:annotatedSource ex:c2 .
"#,
        );
        assert_eq!(
            found,
            vec![
                (None, vec!["ex:onto".to_owned()]),
                (
                    Some("Object Properties".to_owned()),
                    vec!["ex:p".to_owned()]
                ),
                (
                    Some("Classes".to_owned()),
                    vec!["ex:c2".to_owned(), "ex:c10".to_owned()]
                ),
                (Some("Axioms".to_owned()), vec!["[]".to_owned()]),
                (
                    Some(REMAINDER_HEADER.to_owned()),
                    vec!["ex:thing".to_owned(), "[]".to_owned()]
                ),
            ]
        );
    }
}
