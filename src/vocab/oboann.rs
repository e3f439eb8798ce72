// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Provides ready to use [`NamedNodeRef`]s
//! for the legacy NIF OBO annotation properties.

use const_format::formatcp;
use oxrdf::NamedNodeRef;

pub const NS: &str = "http://ontology.neuinfo.org/NIF/Backend/OBO_annotation_properties.owl#";
pub const PREFIX: &str = "OBOANN";

pub const SYNONYM: NamedNodeRef<'_> = NamedNodeRef::new_unchecked(formatcp!("{NS}synonym"));
pub const ABBREV: NamedNodeRef<'_> = NamedNodeRef::new_unchecked(formatcp!("{NS}abbrev"));
pub const CREATED_DATE: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked(formatcp!("{NS}createdDate"));
pub const MODIFIED_DATE: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked(formatcp!("{NS}modifiedDate"));
