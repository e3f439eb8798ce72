// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Provides ready to use [`NamedNodeRef`]s
//! for the [OWL 2](https://www.w3.org/TR/owl2-syntax/) vocabulary.

use const_format::formatcp;
use oxrdf::NamedNodeRef;

pub const NS: &str = "http://www.w3.org/2002/07/owl#";
pub const PREFIX: &str = "owl";

pub const ONTOLOGY: NamedNodeRef<'_> = NamedNodeRef::new_unchecked(formatcp!("{NS}Ontology"));
pub const CLASS: NamedNodeRef<'_> = NamedNodeRef::new_unchecked(formatcp!("{NS}Class"));
pub const RESTRICTION: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked(formatcp!("{NS}Restriction"));
pub const AXIOM: NamedNodeRef<'_> = NamedNodeRef::new_unchecked(formatcp!("{NS}Axiom"));
pub const OBJECT_PROPERTY: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked(formatcp!("{NS}ObjectProperty"));
pub const ANNOTATION_PROPERTY: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked(formatcp!("{NS}AnnotationProperty"));
pub const DATATYPE_PROPERTY: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked(formatcp!("{NS}DatatypeProperty"));
pub const NAMED_INDIVIDUAL: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked(formatcp!("{NS}NamedIndividual"));
pub const ALL_DIFFERENT: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked(formatcp!("{NS}AllDifferent"));

pub const ON_PROPERTY: NamedNodeRef<'_> = NamedNodeRef::new_unchecked(formatcp!("{NS}onProperty"));
pub const ALL_VALUES_FROM: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked(formatcp!("{NS}allValuesFrom"));
pub const SOME_VALUES_FROM: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked(formatcp!("{NS}someValuesFrom"));
pub const VERSION_IRI: NamedNodeRef<'_> = NamedNodeRef::new_unchecked(formatcp!("{NS}versionIRI"));
pub const VERSION_INFO: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked(formatcp!("{NS}versionInfo"));
pub const IMPORTS: NamedNodeRef<'_> = NamedNodeRef::new_unchecked(formatcp!("{NS}imports"));
pub const DEPRECATED: NamedNodeRef<'_> = NamedNodeRef::new_unchecked(formatcp!("{NS}deprecated"));
/// Subject of an annotated (reified) axiom.
pub const ANNOTATED_SOURCE: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked(formatcp!("{NS}annotatedSource"));
/// Predicate of an annotated (reified) axiom.
pub const ANNOTATED_PROPERTY: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked(formatcp!("{NS}annotatedProperty"));
/// Object of an annotated (reified) axiom.
pub const ANNOTATED_TARGET: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked(formatcp!("{NS}annotatedTarget"));
pub const EQUIVALENT_CLASS: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked(formatcp!("{NS}equivalentClass"));
/// Its list value is a chain of properties, so the order of the list matters.
pub const PROPERTY_CHAIN_AXIOM: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked(formatcp!("{NS}propertyChainAxiom"));
pub const INTERSECTION_OF: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked(formatcp!("{NS}intersectionOf"));
pub const UNION_OF: NamedNodeRef<'_> = NamedNodeRef::new_unchecked(formatcp!("{NS}unionOf"));
pub const DISJOINT_WITH: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked(formatcp!("{NS}disjointWith"));
pub const DISJOINT_UNION_OF: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked(formatcp!("{NS}disjointUnionOf"));
pub const DISTINCT_MEMBERS: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked(formatcp!("{NS}distinctMembers"));
pub const INVERSE_OF: NamedNodeRef<'_> = NamedNodeRef::new_unchecked(formatcp!("{NS}inverseOf"));
