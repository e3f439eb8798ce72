// SPDX-FileCopyrightText: 2022 Helsing GmbH
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;

use oxrdf::Graph;
use oxttl::TurtleParser;

use thiserror::Error;

use crate::constants::SUBSTITUTE_BASE;
use crate::input::Input;
use crate::namespaces::Namespaces;

#[derive(Error, Debug)]
pub enum Error {
    #[error("We do not support redefinition of prefixes, which is the case with {0}")]
    PrefixRedefinition(String),

    #[error("We do not support more then one base IRI defined per file")]
    MultipleBases,

    #[error(transparent)]
    TurtleSyntaxError(#[from] oxttl::TurtleSyntaxError),

    #[error(transparent)]
    InvalidBaseIri(#[from] oxiri::IriParseError),
}

/// Validates & stores prefixes.
fn collect_prefixes<'a>(
    declared: impl Iterator<Item = (&'a str, &'a str)>,
    prefixes: &mut HashMap<String, String>,
) -> Result<(), Error> {
    for (prefix, namespace) in declared {
        if let Some(known) = prefixes.get(prefix) {
            if known != namespace {
                return Err(Error::PrefixRedefinition(prefix.to_owned()));
            }
        } else {
            prefixes.insert(prefix.to_owned(), namespace.to_owned());
        }
    }
    Ok(())
}

/// Parses a Turtle document into a graph,
/// keeping its base and prefixes.
///
/// # Errors
///
/// If the input is not valid Turtle,
/// or it redefines a prefix or the base.
pub fn parse(turtle_str: &[u8]) -> Result<Input, Error> {
    let mut graph = Graph::new();

    let mut parser = TurtleParser::new()
        .with_base_iri(SUBSTITUTE_BASE)?
        .low_level();
    parser.extend_from_slice(turtle_str);
    parser.end();
    let mut base: Option<String> = None;
    let mut prefixes = HashMap::new();
    while let Some(triple_res) = parser.parse_next() {
        let triple = triple_res?;
        graph.insert(&triple);

        // validate & store base
        if let Some(cur_base) = parser.base_iri() {
            if cur_base != SUBSTITUTE_BASE {
                if let Some(base_val) = &base {
                    if base_val != cur_base {
                        return Err(Error::MultipleBases);
                    }
                }
                base = Some(cur_base.to_owned());
            }
        }

        collect_prefixes(parser.prefixes(), &mut prefixes)?;
    }
    // prefixes declared after the last triple
    collect_prefixes(parser.prefixes(), &mut prefixes)?;

    Ok(Input {
        base,
        namespaces: prefixes.into_iter().collect::<Namespaces>(),
        graph,
    })
}

/// Only the prefixes declared in a Turtle document,
/// as used to borrow prefixes from an other file.
///
/// # Errors
///
/// If the input is not valid Turtle.
pub fn parse_prefixes(turtle_str: &[u8]) -> Result<Namespaces, Error> {
    Ok(parse(turtle_str)?.namespaces)
}
