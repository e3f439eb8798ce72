// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

pub mod ast;
pub mod constants;
pub mod context;
pub mod error;
pub mod formatter;
pub mod input;
pub mod lexical;
pub mod literal;
pub mod namespaces;
pub mod natsort;
pub mod options;
pub mod parser;
pub mod prepare;
pub mod rank;
pub mod sections;
pub mod vocab;

use std::ffi::OsStr;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use git_version::git_version;

use crate::error::{Error, FilesListErrorType, FmtResult};
use crate::input::Input;
use crate::namespaces::Namespaces;
use crate::options::FormatOptions;

pub const VERSION: &str = git_version!(cargo_prefix = "", fallback = "unknown");

/// The path standing for stdin or stdout.
pub const STD_STREAM: &str = "-";

/// Where the sources come from, and where the results go to.
#[derive(Debug, Clone, Default)]
pub struct Job {
    /// Files to format; none means stdin.
    pub files: Vec<PathBuf>,
    /// All sources get merged into this one document, if set;
    /// [`STD_STREAM`] stands for stdout.
    /// Without it, each file is formatted in place,
    /// and stdin goes to stdout.
    pub output: Option<PathBuf>,
    /// Prefixes to bind in addition to the ones of the sources.
    pub curies: Namespaces,
}

/// Adds all files below `dir` (recursively) whose extension is `suffix`,
/// in file-name order.
///
/// # Errors
///
/// If the directory can not be listed.
pub fn add_files_with_suffix(
    dir: &Path,
    suffix: &OsStr,
    files: &mut Vec<PathBuf>,
) -> FmtResult<()> {
    let list_error =
        |kind: FilesListErrorType| Error::FailedToListFilesInInputDir(dir.to_owned(), kind);
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(|_err| list_error(FilesListErrorType::ReadDir))? {
        entries.push(
            entry
                .map_err(|_err| list_error(FilesListErrorType::ExtractEntry))?
                .path(),
        );
    }
    entries.sort();
    for path in entries {
        let file_type = fs::metadata(&path)
            .map_err(|_err| list_error(FilesListErrorType::EvaluateFileType))?
            .file_type();
        if file_type.is_dir() {
            add_files_with_suffix(&path, suffix, files)?;
        } else if file_type.is_file() && path.extension() == Some(suffix) {
            files.push(path);
        }
    }
    Ok(())
}

fn is_std_stream(path: &Path) -> bool {
    path.as_os_str() == STD_STREAM
}

fn read_source(path: &Path) -> FmtResult<String> {
    if is_std_stream(path) {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|_err| Error::FailedToReadTargetFile(path.to_owned()))?;
        Ok(content)
    } else {
        fs::read_to_string(path).map_err(|_err| Error::FailedToReadTargetFile(path.to_owned()))
    }
}

fn write_target(path: &Path, content: &str) -> FmtResult<()> {
    let written = if is_std_stream(path) {
        std::io::stdout().lock().write_all(content.as_bytes())
    } else {
        fs::write(path, content)
    };
    written.map_err(|_err| Error::FailedToWriteFormattedFile(path.to_owned()))
}

fn parse_source(path: &Path, content: &str, curies: &Namespaces) -> FmtResult<Input> {
    tracing::debug!("Parsing {} ...", path.display());
    let mut input = parser::parse(content.as_bytes())?;
    for (prefix, namespace) in curies.iter() {
        input.namespaces.bind(prefix, namespace);
    }
    Ok(input)
}

/// Compares the formatted version of a target with what is there now.
/// Returns whether they are the same, and logs the difference if not.
fn check(target: &Path, original: &str, formatted: &str) -> bool {
    if original == formatted {
        return true;
    }
    let patch = diffy::create_patch(original, formatted);
    tracing::warn!(
        "{} is not formatted correctly; the required changes:\n{patch}",
        target.display()
    );
    false
}

/// Formats one document and writes it to `target`,
/// or only checks it if so configured.
/// Returns whether the target is (or was already) formatted.
fn emit(
    options: &FormatOptions,
    input: &Input,
    target: &Path,
    current: Option<&str>,
) -> FmtResult<bool> {
    let formatted = formatter::format(input, options)?;
    if options.check {
        let current = match current {
            Some(current) => current.to_owned(),
            None if is_std_stream(target) => String::new(),
            None => fs::read_to_string(target).unwrap_or_default(),
        };
        return Ok(check(target, &current, &formatted));
    }
    // stdin goes to stdout, which has to be written in any case
    if current == Some(formatted.as_str()) && !is_std_stream(target) {
        tracing::debug!("{} is already formatted", target.display());
        return Ok(true);
    }
    write_target(target, &formatted)?;
    Ok(true)
}

/// Formats all the sources of the job.
///
/// # Errors
///
/// If a source can not be read, is not valid Turtle
/// or can not be formatted,
/// if a target can not be written,
/// or if checking is requested, and some target is not formatted yet.
pub fn run(options: &FormatOptions, job: &Job) -> FmtResult<()> {
    let std_stream = PathBuf::from(STD_STREAM);
    let sources: Vec<&Path> = if job.files.is_empty() {
        vec![std_stream.as_path()]
    } else {
        job.files.iter().map(PathBuf::as_path).collect()
    };

    let mut unformatted = Vec::new();
    if let Some(output) = &job.output {
        let mut merged = Input::default();
        for source in &sources {
            let content = read_source(source)?;
            merged.merge(parse_source(source, &content, &job.curies)?);
        }
        if !emit(options, &merged, output, None)? {
            unformatted.push(output.display().to_string());
        }
    } else {
        for source in sources {
            let content = read_source(source)?;
            let input = parse_source(source, &content, &job.curies)?;
            if !emit(options, &input, source, Some(&content))? {
                unformatted.push(source.display().to_string());
            }
        }
    }

    if unformatted.is_empty() {
        Ok(())
    } else {
        Err(Error::Check(unformatted.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curies_do_not_override_source_prefixes() {
        let mut curies = Namespaces::new();
        curies.insert("ex", "http://other.example.org/");
        curies.insert("owl", "http://www.w3.org/2002/07/owl#");
        let input = parse_source(
            Path::new("test.ttl"),
            "@prefix ex: <http://example.org/> .\nex:a ex:b ex:c .\n",
            &curies,
        )
        .unwrap();
        assert_eq!(
            input.namespaces.namespace("ex"),
            Some("http://example.org/")
        );
        assert_eq!(
            input.namespaces.prefix("http://www.w3.org/2002/07/owl#"),
            Some("owl")
        );
    }

    #[test]
    fn check_reports_changes() {
        assert!(check(Path::new("a.ttl"), "same\n", "same\n"));
        assert!(!check(Path::new("a.ttl"), "old\n", "new\n"));
    }
}
