// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Ready to use [`oxrdf::NamedNodeRef`]s
//! for the vocabularies the default orderings refer to,
//! complementing [`oxrdf::vocab`].

pub mod dc;
pub mod nifrid;
pub mod obo;
pub mod oboann;
pub mod oboinowl;
pub mod owl;
pub mod prov;
pub mod skos;

use crate::namespaces::Namespaces;

/// The prefixes of these vocabularies, and of RDF, RDFS and XSD,
/// for resolving prefixed names given on the command line.
#[must_use]
pub fn well_known() -> Namespaces {
    [
        ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
        ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
        ("xsd", "http://www.w3.org/2001/XMLSchema#"),
        (dc::PREFIX, dc::NS),
        (nifrid::PREFIX, nifrid::NS),
        (obo::PREFIX, obo::NS),
        (oboann::PREFIX, oboann::NS),
        (oboinowl::PREFIX, oboinowl::NS),
        (owl::PREFIX, owl::NS),
        (prov::PREFIX, prov::NS),
        (skos::PREFIX, skos::NS),
    ]
    .into_iter()
    .collect()
}
