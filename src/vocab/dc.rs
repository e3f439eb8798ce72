// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Provides ready to use [`NamedNodeRef`]s
//! for the [Dublin Core elements](http://purl.org/dc/elements/1.1/).

use const_format::formatcp;
use oxrdf::NamedNodeRef;

pub const NS: &str = "http://purl.org/dc/elements/1.1/";
pub const PREFIX: &str = "dc";

pub const TITLE: NamedNodeRef<'_> = NamedNodeRef::new_unchecked(formatcp!("{NS}title"));
pub const DESCRIPTION: NamedNodeRef<'_> = NamedNodeRef::new_unchecked(formatcp!("{NS}description"));
