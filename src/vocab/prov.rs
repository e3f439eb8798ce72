// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Provides ready to use [`NamedNodeRef`]s
//! for the [PROV-O](https://www.w3.org/TR/prov-o/) ontology.

use const_format::formatcp;
use oxrdf::NamedNodeRef;

pub const NS: &str = "http://www.w3.org/ns/prov#";
pub const PREFIX: &str = "prov";

pub const WAS_DERIVED_FROM: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked(formatcp!("{NS}wasDerivedFrom"));
pub const QUALIFIED_DERIVATION: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked(formatcp!("{NS}qualifiedDerivation"));
pub const ENTITY: NamedNodeRef<'_> = NamedNodeRef::new_unchecked(formatcp!("{NS}entity"));
pub const STARTED_AT_TIME: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked(formatcp!("{NS}startedAtTime"));
pub const ENDED_AT_TIME: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked(formatcp!("{NS}endedAtTime"));
pub const USED: NamedNodeRef<'_> = NamedNodeRef::new_unchecked(formatcp!("{NS}used"));
pub const GENERATED: NamedNodeRef<'_> = NamedNodeRef::new_unchecked(formatcp!("{NS}generated"));
pub const WAS_ASSOCIATED_WITH: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked(formatcp!("{NS}wasAssociatedWith"));
