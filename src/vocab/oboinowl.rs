// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Provides ready to use [`NamedNodeRef`]s
//! for the [oboInOwl](http://www.geneontology.org/formats/oboInOwl#) vocabulary.

use const_format::formatcp;
use oxrdf::NamedNodeRef;

pub const NS: &str = "http://www.geneontology.org/formats/oboInOwl#";
pub const PREFIX: &str = "oboInOwl";

pub const HAS_DB_XREF: NamedNodeRef<'_> = NamedNodeRef::new_unchecked(formatcp!("{NS}hasDbXref"));
