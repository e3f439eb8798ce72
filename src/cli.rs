// SPDX-FileCopyrightText: 2021-2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{path::PathBuf, sync::LazyLock};

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint, command, crate_name, value_parser};
use cli_utils::logging;
use const_format::formatcp;
use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;
use ttlser::Job;
use ttlser::error::Error;
use ttlser::namespaces::Namespaces;
use ttlser::options::{FormatOptions, OrderConfig, OutputMode, Variant};

pub const A_L_CHECK: &str = "check";
pub const A_S_CHECK: char = 'c';
pub const A_L_COMPACT: &str = "compact";
pub const A_S_COMPACT: char = 'C';
pub const A_L_CURIES_FROM: &str = "curies-from";
pub const A_L_HTML: &str = "html";
pub const A_L_INDENTATION: &str = "indentation";
pub const A_S_INDENTATION: char = 'i';
pub const A_L_NO_GEN_PREFIX: &str = "no-gen-prefix";
pub const A_L_NO_REORDER: &str = "no-reorder";
pub const A_L_OUTPUT: &str = "output";
pub const A_S_OUTPUT: char = 'O';
pub const A_L_PLAIN_ORDER: &str = "plain-order";
pub const A_L_PREDICATE: &str = "predicate";
pub const A_S_PREDICATE: char = 'p';
pub const A_L_RACKET: &str = "racket";
pub const A_L_SUBCLASS: &str = "subclass";
pub const A_S_SUBCLASS: char = 's';
pub const A_L_TOP_CLASS: &str = "top-class";
pub const A_S_TOP_CLASS: char = 't';
pub const A_L_UNCOMPACT: &str = "uncompact";
pub const A_S_UNCOMPACT: char = 'U';
pub const A_L_QUIET: &str = "quiet";
pub const A_S_QUIET: char = 'q';
pub const A_L_VERBOSE: &str = "verbose";
pub const A_S_VERBOSE: char = 'v';
pub const A_L_VERSION: &str = "version";
pub const A_S_VERSION: char = 'V';
pub const A_L_SRC: &str = "src";

pub const DEFAULT_INDENTATION: u8 = 4;
static DEFAULT_INDENTATION_STR: LazyLock<String> =
    LazyLock::new(|| DEFAULT_INDENTATION.to_string());

fn arg_check() -> Arg {
    Arg::new(A_L_CHECK)
        .help(
            "Do not edit the file but only check \
if it already applies this tools format",
        )
        .long_help(
            "Do not edit the file but only check \
if it already applies this tools format. \
The changes that would be required are logged as a patch.",
        )
        .action(ArgAction::SetTrue)
        .short(A_S_CHECK)
        .long(A_L_CHECK)
}

fn arg_compact() -> Arg {
    Arg::new(A_L_COMPACT)
        .help("One statement per line, and short prefixes for long IRIs used often")
        .long_help(
            "Writes each statement on a single line, \
and binds short symbolic prefixes (A, B, ...) \
to long IRIs that occur more than twice.",
        )
        .action(ArgAction::SetTrue)
        .short(A_S_COMPACT)
        .long(A_L_COMPACT)
        .conflicts_with(A_L_UNCOMPACT)
}

fn arg_uncompact() -> Arg {
    Arg::new(A_L_UNCOMPACT)
        .help("One statement per line, and expand the prefixes of compact output again")
        .action(ArgAction::SetTrue)
        .short(A_S_UNCOMPACT)
        .long(A_L_UNCOMPACT)
}

fn arg_subclass() -> Arg {
    Arg::new(A_L_SUBCLASS)
        .help("Order classes and properties by their super-classes and -properties")
        .action(ArgAction::SetTrue)
        .short(A_S_SUBCLASS)
        .long(A_L_SUBCLASS)
        .conflicts_with_all([A_L_HTML, A_L_RACKET])
}

fn arg_html() -> Arg {
    Arg::new(A_L_HTML)
        .help("Write an HTML fragment, with IRIs linked")
        .action(ArgAction::SetTrue)
        .long(A_L_HTML)
        .conflicts_with(A_L_RACKET)
}

fn arg_racket() -> Arg {
    Arg::new(A_L_RACKET)
        .help("Precede the output with a '#lang rdf/turtle' line")
        .action(ArgAction::SetTrue)
        .long(A_L_RACKET)
}

fn arg_plain_order() -> Arg {
    Arg::new(A_L_PLAIN_ORDER)
        .help("No preferred predicates, and plain instead of natural string order")
        .long_help(
            "Uses no list of preferred predicates, \
and orders strings by code-point instead of naturally (a2 < a10). \
Suitable for producing text to hash graphs with.",
        )
        .action(ArgAction::SetTrue)
        .long(A_L_PLAIN_ORDER)
}

fn arg_no_gen_prefix() -> Arg {
    Arg::new(A_L_NO_GEN_PREFIX)
        .help("Do not generate prefixes (ns1, ns2, ...) for predicates without one")
        .action(ArgAction::SetTrue)
        .long(A_L_NO_GEN_PREFIX)
}

fn arg_no_reorder() -> Arg {
    Arg::new(A_L_NO_REORDER)
        .help("Keep the order of all RDF lists")
        .action(ArgAction::SetTrue)
        .long(A_L_NO_REORDER)
}

fn arg_curies_from() -> Arg {
    Arg::new(A_L_CURIES_FROM)
        .help("Bind the prefixes declared in this Turtle file")
        .long_help(
            "Binds the prefixes declared in this Turtle file, \
unless the sources bind them already. \
They are also available to --top-class and --predicate.",
        )
        .num_args(1)
        .long(A_L_CURIES_FROM)
        .action(ArgAction::Set)
        .value_hint(ValueHint::FilePath)
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
}

fn arg_top_class() -> Arg {
    Arg::new(A_L_TOP_CLASS)
        .help("Put the instances of this class in a section at the top")
        .long_help(
            "Puts the instances of this class in a section at the top \
(IRI or prefixed name). \
May be given multiple times; the first one ends up topmost.",
        )
        .num_args(1)
        .short(A_S_TOP_CLASS)
        .long(A_L_TOP_CLASS)
        .action(ArgAction::Append)
        .value_name("IRI")
}

fn arg_predicate() -> Arg {
    Arg::new(A_L_PREDICATE)
        .help("Write this predicate before all others")
        .long_help(
            "Writes this predicate before all others (IRI or prefixed name). \
May be given multiple times, in the desired order.",
        )
        .num_args(1)
        .short(A_S_PREDICATE)
        .long(A_L_PREDICATE)
        .action(ArgAction::Append)
        .value_name("IRI")
}

fn arg_indentation() -> Arg {
    Arg::new(A_L_INDENTATION)
        .help("Number of spaces per level of indentation")
        .num_args(1)
        .short(A_S_INDENTATION)
        .long(A_L_INDENTATION)
        .action(ArgAction::Set)
        .value_name("NUM")
        .value_parser(value_parser!(u8).range(1..))
        .default_value(DEFAULT_INDENTATION_STR.as_str())
}

fn arg_output() -> Arg {
    Arg::new(A_L_OUTPUT)
        .help("Merge all sources into this RDF/Turtle file; '-' for stdout")
        .long_help(
            "Merges all sources into this one RDF/Turtle file; '-' for stdout. \
Without it, each source file is formatted in place.",
        )
        .num_args(1)
        .short(A_S_OUTPUT)
        .long(A_L_OUTPUT)
        .action(ArgAction::Set)
        .value_hint(ValueHint::FilePath)
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
}

fn arg_quiet() -> Arg {
    Arg::new(A_L_QUIET)
        .help("Minimize or suppress output to stdout")
        .long_help("Minimize or suppress output to stdout, and only shows log output on stderr.")
        .action(ArgAction::SetTrue)
        .short(A_S_QUIET)
        .long(A_L_QUIET)
        .conflicts_with(A_L_VERBOSE)
}

fn arg_verbose() -> Arg {
    Arg::new(A_L_VERBOSE)
        .help("more verbose output (useful for debugging)")
        .short(A_S_VERBOSE)
        .long(A_L_VERBOSE)
        .action(ArgAction::SetTrue)
}

fn arg_version() -> Arg {
    Arg::new(A_L_VERSION)
        .help(formatcp!(
            "Print version information and exit. \
May be combined with -{A_S_QUIET},--{A_L_QUIET}, \
to really only output the version string."
        ))
        .short(A_S_VERSION)
        .long(A_L_VERSION)
        .action(ArgAction::SetTrue)
}

fn arg_src() -> Arg {
    Arg::new(A_L_SRC)
        .help("Source RDF file(s) or director(y|ies) containing Turtle files to format")
        .long_help(
            "Source RDF file(s) or director(y|ies) containing Turtle files to format. \
Without any, the Turtle is read from stdin and written to stdout.",
        )
        .num_args(0..)
        .value_name("FILE_OR_DIR")
        .value_hint(ValueHint::Other)
        .value_parser(value_parser!(PathBuf))
        .action(ArgAction::Set)
}

fn args_matcher() -> Command {
    command!()
        .about("Deterministically serializes RDF/Turtle files")
        .long_about(
            "Takes RDF/Turtle files as input, \
and serializes them such that the same graph \
always results in the same bytes, \
no matter the order of the triples or the labels of the blank nodes. \
This makes the files well suited for version control.",
        )
        .bin_name(clap::crate_name!())
        .help_expected(true)
        .disable_version_flag(true)
        .arg(arg_check())
        .arg(arg_compact())
        .arg(arg_uncompact())
        .arg(arg_subclass())
        .arg(arg_html())
        .arg(arg_racket())
        .arg(arg_plain_order())
        .arg(arg_no_gen_prefix())
        .arg(arg_no_reorder())
        .arg(arg_curies_from())
        .arg(arg_top_class())
        .arg(arg_predicate())
        .arg(arg_indentation())
        .arg(arg_output())
        .arg(arg_quiet())
        .arg(arg_verbose())
        .arg(arg_version())
        .arg(arg_src())
}

#[allow(clippy::print_stdout)]
fn print_version_and_exit(quiet: bool) {
    if !quiet {
        print!("{} ", clap::crate_name!());
    }
    println!("{}", ttlser::VERSION);
    std::process::exit(0);
}

#[derive(Error, Debug)]
pub enum InitError {
    #[error("Failed to init logging system: {0}")]
    LogInit(#[from] tracing_subscriber::util::TryInitError),

    #[error("Failed to change the logging level: {0}")]
    LogChangeLevel(#[from] tracing_subscriber::reload::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] Error),
}

fn read_curies(args: &ArgMatches) -> Result<Namespaces, Error> {
    let Some(file) = args.get_one::<PathBuf>(A_L_CURIES_FROM) else {
        return Ok(Namespaces::new());
    };
    let content = std::fs::read(file).map_err(|_err| Error::FailedToReadTargetFile(file.clone()))?;
    Ok(ttlser::parser::parse_prefixes(&content)?)
}

fn order_config(args: &ArgMatches, curies: &Namespaces) -> Result<OrderConfig, Error> {
    let mut known = ttlser::vocab::well_known();
    for (prefix, namespace) in curies.iter() {
        known.insert(prefix, namespace);
    }
    let expand_all = |arg_name: &str| {
        args.get_many::<String>(arg_name)
            .into_iter()
            .flatten()
            .map(|name| known.expand(name))
            .collect::<Result<Vec<_>, _>>()
    };

    let mut order = if args.get_flag(A_L_PLAIN_ORDER) {
        OrderConfig::plain()
    } else {
        OrderConfig::default()
    };
    order = order.with_predicate_order(expand_all(A_L_PREDICATE)?);
    order = order.with_top_classes(expand_all(A_L_TOP_CLASS)?);
    if args.get_flag(A_L_NO_REORDER) {
        order = order.with_all_lists_ordered();
    }
    Ok(order)
}

pub fn init() -> Result<(FormatOptions, Job), InitError> {
    let log_reload_handle = logging::setup(crate_name!())?;
    let args = args_matcher().get_matches();

    let quiet = args.get_flag(A_L_QUIET);
    let version = args.get_flag(A_L_VERSION);
    if version {
        print_version_and_exit(quiet);
    }

    let verbose = args.get_flag(A_L_VERBOSE);
    let log_level = if verbose {
        LevelFilter::TRACE
    } else if quiet {
        LevelFilter::WARN
    } else {
        LevelFilter::INFO
    };
    logging::set_log_level_tracing(&log_reload_handle, log_level)?;

    let check = args.get_flag(A_L_CHECK);
    let indentation_spaces = args
        .get_one::<u8>(A_L_INDENTATION)
        .copied()
        .unwrap_or(DEFAULT_INDENTATION)
        .into();
    let output_mode = if args.get_flag(A_L_COMPACT) {
        OutputMode::Compact
    } else if args.get_flag(A_L_UNCOMPACT) {
        OutputMode::Uncompact
    } else {
        OutputMode::Verbose
    };
    let variant = if args.get_flag(A_L_SUBCLASS) {
        Variant::SubClassOf
    } else if args.get_flag(A_L_HTML) {
        Variant::Html
    } else if args.get_flag(A_L_RACKET) {
        Variant::Racket
    } else {
        Variant::Standard
    };
    let gen_prefix = !args.get_flag(A_L_NO_GEN_PREFIX);
    let curies = read_curies(&args)?;
    let order = order_config(&args, &curies)?;

    let indentation = " ".repeat(indentation_spaces);
    let files: Vec<PathBuf> = args
        .get_many::<PathBuf>(A_L_SRC)
        .into_iter()
        .flatten()
        .cloned()
        .collect();
    let output = args.get_one::<PathBuf>(A_L_OUTPUT).cloned();
    Ok((
        FormatOptions {
            check,
            indentation,
            output_mode,
            variant,
            gen_prefix,
            order,
            ..FormatOptions::default()
        },
        Job {
            files,
            output,
            curies,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        args_matcher().debug_assert();
    }

    #[test]
    fn prefixed_names_and_iris() {
        let args = args_matcher().get_matches_from([
            "ttlfmt",
            "--predicate",
            "skos:prefLabel",
            "--top-class",
            "<http://example.org/Thing>",
            "--no-reorder",
        ]);
        let order = order_config(&args, &Namespaces::new()).unwrap();
        assert_eq!(
            order.predicate_order.first().map(|node| node.as_str()),
            Some("http://www.w3.org/2004/02/skos/core#prefLabel")
        );
        assert_eq!(
            order.top_classes.first().map(|top| top.class.as_str()),
            Some("http://example.org/Thing")
        );
        assert!(order.preserves_order_under(ttlser::vocab::owl::UNION_OF));
    }

    #[test]
    fn unknown_prefixes_are_rejected() {
        let args = args_matcher().get_matches_from(["ttlfmt", "--top-class", "nope:Thing"]);
        assert!(matches!(
            order_config(&args, &Namespaces::new()),
            Err(Error::InvalidIriOrPrefixedName(_))
        ));
    }
}
