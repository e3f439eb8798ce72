// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Write;

/// Current state of the formatter.
#[derive(Default)]
pub struct Context<W: Write> {
    /// The nesting depth,
    /// which is **not** the same as the indentation level:
    /// an anonymous blank node raises it by one
    /// while its own predicates are written,
    /// a multi-object list by one more.
    pub depth: usize,
    pub output: W,
}
