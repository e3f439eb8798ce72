// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Provides ready to use [`NamedNodeRef`]s
//! for the [SKOS](https://www.w3.org/TR/skos-reference/) vocabulary.

use const_format::formatcp;
use oxrdf::NamedNodeRef;

pub const NS: &str = "http://www.w3.org/2004/02/skos/core#";
pub const PREFIX: &str = "skos";

pub const PREF_LABEL: NamedNodeRef<'_> = NamedNodeRef::new_unchecked(formatcp!("{NS}prefLabel"));
pub const ALT_LABEL: NamedNodeRef<'_> = NamedNodeRef::new_unchecked(formatcp!("{NS}altLabel"));
pub const DEFINITION: NamedNodeRef<'_> = NamedNodeRef::new_unchecked(formatcp!("{NS}definition"));
pub const RELATED: NamedNodeRef<'_> = NamedNodeRef::new_unchecked(formatcp!("{NS}related"));
pub const NOTE: NamedNodeRef<'_> = NamedNodeRef::new_unchecked(formatcp!("{NS}note"));
pub const EDITORIAL_NOTE: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked(formatcp!("{NS}editorialNote"));
pub const CHANGE_NOTE: NamedNodeRef<'_> = NamedNodeRef::new_unchecked(formatcp!("{NS}changeNote"));
