// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Provides ready to use [`NamedNodeRef`]s
//! for the few OBO Foundry (IAO) terms used as annotation properties.

use const_format::formatcp;
use oxrdf::NamedNodeRef;

pub const NS: &str = "http://purl.obolibrary.org/obo/";
pub const PREFIX: &str = "obo";

/// IAO "term replaced by"
pub const TERM_REPLACED_BY: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked(formatcp!("{NS}IAO_0100001"));
/// IAO "definition"
pub const DEFINITION: NamedNodeRef<'_> = NamedNodeRef::new_unchecked(formatcp!("{NS}IAO_0000115"));
