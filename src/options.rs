// SPDX-FileCopyrightText: 2022 Helsing GmbH
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use oxrdf::NamedNode;
use oxrdf::NamedNodeRef;
use oxrdf::vocab::{rdf, rdfs};

use crate::natsort::NatKey;
use crate::vocab::{dc, nifrid, obo, oboann, oboinowl, owl, prov, skos};

/// How strings (prefixed names, prefixes, lexical forms) are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Digit runs by value, text case-insensitive.
    #[default]
    Natural,
    /// Plain code-point order.
    Plain,
}

impl SortKey {
    #[must_use]
    pub fn key(self, value: &str) -> NatKey {
        match self {
            Self::Natural => NatKey::new(value),
            Self::Plain => NatKey::plain(value),
        }
    }
}

/// Layout of the statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// One predicate (and one object) per line.
    #[default]
    Verbose,
    /// One statement per line,
    /// and frequently used long IRIs abbreviated with short symbolic prefixes.
    Compact,
    /// One statement per line,
    /// and prefixes standing for a single frequently used IRI removed again.
    Uncompact,
}

impl OutputMode {
    #[must_use]
    pub const fn newlines(self) -> bool {
        matches!(self, Self::Verbose)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    #[default]
    Standard,
    /// Top-level classes and properties are ordered by their
    /// `rdfs:subClassOf`, `rdfs:subPropertyOf` and `owl:imports` ancestry.
    SubClassOf,
    /// An HTML fragment with linked IRIs.
    Html,
    /// Standard output, preceded by a `#lang rdf/turtle` line.
    Racket,
}

/// Lists whose element order must be preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoReorder {
    /// Lists that are the object of one of these predicates.
    Predicates(Vec<NamedNode>),
    /// Every list.
    All,
}

/// A class whose instances get their own section at the top of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopClass {
    pub class: NamedNode,
    /// Written as `### <header>` before the section, if not empty.
    pub header: String,
}

impl TopClass {
    #[must_use]
    pub fn new(class: NamedNodeRef<'_>, header: &str) -> Self {
        Self {
            class: class.into_owned(),
            header: header.to_owned(),
        }
    }
}

/// Header of the section holding everything not covered by the top classes.
pub const REMAINDER_HEADER: &str = "Annotations";

/// The configuration of the orderings.
///
/// It is built once by the caller, and never changed while serializing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderConfig {
    /// Predicates that come first, in this order.
    /// All others follow, in natural order of their prefixed names.
    pub predicate_order: Vec<NamedNode>,
    pub top_classes: Vec<TopClass>,
    pub no_reorder: NoReorder,
    /// When a list is the `.0` of a reified axiom,
    /// the predicate that decides on re-ordering is found
    /// as the `.1` of that same axiom.
    pub no_reorder_rdf_star: Vec<(NamedNode, NamedNode)>,
    pub symmetric_predicates: Vec<NamedNode>,
    pub sort_key: SortKey,
}

const DEFAULT_PREDICATE_ORDER: &[NamedNodeRef<'static>] = &[
    rdf::TYPE,
    owl::ON_PROPERTY,
    owl::ALL_VALUES_FROM,
    owl::SOME_VALUES_FROM,
    owl::VERSION_IRI,
    owl::IMPORTS,
    owl::DEPRECATED,
    owl::ANNOTATED_SOURCE,
    owl::ANNOTATED_PROPERTY,
    owl::ANNOTATED_TARGET,
    obo::TERM_REPLACED_BY,
    oboinowl::HAS_DB_XREF,
    owl::EQUIVALENT_CLASS,
    rdfs::LABEL,
    skos::PREF_LABEL,
    skos::ALT_LABEL,
    nifrid::SYNONYM,
    oboann::SYNONYM,
    nifrid::ABBREV,
    oboann::ABBREV,
    dc::TITLE,
    obo::DEFINITION,
    skos::DEFINITION,
    skos::RELATED,
    dc::DESCRIPTION,
    rdfs::SUB_CLASS_OF,
    rdfs::SUB_PROPERTY_OF,
    rdfs::DOMAIN,
    rdfs::RANGE,
    owl::PROPERTY_CHAIN_AXIOM,
    owl::INTERSECTION_OF,
    owl::UNION_OF,
    owl::DISJOINT_WITH,
    owl::DISJOINT_UNION_OF,
    owl::DISTINCT_MEMBERS,
    owl::INVERSE_OF,
    rdfs::COMMENT,
    skos::NOTE,
    skos::EDITORIAL_NOTE,
    skos::CHANGE_NOTE,
    owl::VERSION_INFO,
    nifrid::CREATED_DATE,
    oboann::CREATED_DATE,
    nifrid::MODIFIED_DATE,
    oboann::MODIFIED_DATE,
    rdfs::IS_DEFINED_BY,
    prov::WAS_DERIVED_FROM,
    prov::QUALIFIED_DERIVATION,
    prov::ENTITY,
    prov::STARTED_AT_TIME,
    prov::ENDED_AT_TIME,
    prov::USED,
    prov::GENERATED,
    prov::WAS_ASSOCIATED_WITH,
];

const DEFAULT_TOP_CLASSES: &[(NamedNodeRef<'static>, &str)] = &[
    (owl::ONTOLOGY, ""),
    (rdf::PROPERTY, "rdf Properties"),
    (rdfs::CLASS, "rdfs Classes"),
    (owl::OBJECT_PROPERTY, "Object Properties"),
    (rdfs::DATATYPE, "Datatypes"),
    (owl::ANNOTATION_PROPERTY, "Annotation Properties"),
    (owl::DATATYPE_PROPERTY, "Data Properties"),
    (owl::CLASS, "Classes"),
    (owl::NAMED_INDIVIDUAL, "Individuals"),
    (owl::ALL_DIFFERENT, "Axioms"),
];

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            predicate_order: DEFAULT_PREDICATE_ORDER
                .iter()
                .map(|predicate| predicate.into_owned())
                .collect(),
            top_classes: DEFAULT_TOP_CLASSES
                .iter()
                .map(|(class, header)| TopClass::new(*class, header))
                .collect(),
            no_reorder: NoReorder::Predicates(vec![owl::PROPERTY_CHAIN_AXIOM.into_owned()]),
            no_reorder_rdf_star: vec![(
                owl::ANNOTATED_TARGET.into_owned(),
                owl::ANNOTATED_PROPERTY.into_owned(),
            )],
            symmetric_predicates: vec![owl::DISJOINT_WITH.into_owned()],
            sort_key: SortKey::Natural,
        }
    }
}

impl OrderConfig {
    /// No preferred predicates and plain string ordering,
    /// as used for producing text to hash graphs with.
    #[must_use]
    pub fn plain() -> Self {
        Self {
            predicate_order: Vec::new(),
            sort_key: SortKey::Plain,
            ..Self::default()
        }
    }

    /// Adds sections for the given classes in front of the existing ones,
    /// skipping classes that already have a section.
    #[must_use]
    pub fn with_top_classes(mut self, classes: impl IntoIterator<Item = NamedNode>) -> Self {
        let mut added = Vec::new();
        for class in classes {
            let known = self.top_classes.iter().any(|top| top.class == class)
                || added.iter().any(|top: &TopClass| top.class == class);
            if !known {
                added.push(TopClass {
                    class,
                    header: String::new(),
                });
            }
        }
        added.append(&mut self.top_classes);
        self.top_classes = added;
        self
    }

    /// Puts the given predicates in front of the existing priority list.
    #[must_use]
    pub fn with_predicate_order(mut self, predicates: impl IntoIterator<Item = NamedNode>) -> Self {
        let mut order: Vec<NamedNode> = predicates.into_iter().collect();
        order.append(&mut self.predicate_order);
        self.predicate_order = order;
        self
    }

    #[must_use]
    pub fn with_all_lists_ordered(mut self) -> Self {
        self.no_reorder = NoReorder::All;
        self
    }

    #[must_use]
    pub fn preserves_order_under(&self, predicate: NamedNodeRef<'_>) -> bool {
        match &self.no_reorder {
            NoReorder::All => true,
            NoReorder::Predicates(predicates) => {
                predicates.iter().any(|keep| keep.as_ref() == predicate)
            }
        }
    }
}

pub struct FormatOptions {
    /// Do not edit the file but only check if it already applies this tools format.
    pub check: bool,
    /// Space(s) or tab(s) representing one level of indentation.
    pub indentation: String,
    pub output_mode: OutputMode,
    pub variant: Variant,
    /// Whether predicates without a matching prefix
    /// may get a generated one (`ns1`, `ns2`, ...).
    pub gen_prefix: bool,
    pub order: OrderConfig,
    /// Labels for the HTML tooltips of IRIs,
    /// in addition to the `rdfs:label`s found in the graph itself.
    pub html_labels: BTreeMap<String, String>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            check: false,
            indentation: "    ".to_string(),
            output_mode: OutputMode::default(),
            variant: Variant::default(),
            gen_prefix: true,
            order: OrderConfig::default(),
            html_labels: BTreeMap::new(),
        }
    }
}

impl FormatOptions {
    /// The name this serializer goes by in the trailer of the document.
    #[must_use]
    pub const fn serializer_name(&self) -> &'static str {
        use crate::constants::{
            SERIALIZER_NAME, SERIALIZER_NAME_COMPACT, SERIALIZER_NAME_SUBCLASS,
            SERIALIZER_NAME_UNCOMPACT,
        };
        if matches!(self.variant, Variant::SubClassOf) {
            return SERIALIZER_NAME_SUBCLASS;
        }
        match self.output_mode {
            OutputMode::Verbose => SERIALIZER_NAME,
            OutputMode::Compact => SERIALIZER_NAME_COMPACT,
            OutputMode::Uncompact => SERIALIZER_NAME_UNCOMPACT,
        }
    }
}
