// SPDX-FileCopyrightText: 2022 Helsing GmbH
//
// SPDX-License-Identifier: Apache-2.0

use crate::parser;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug)]
pub enum FilesListErrorType {
    ReadDir,
    ExtractEntry,
    EvaluateFileType,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Input is not equivalent to the (re-)formatted version of its self: {0}")]
    Check(String),

    #[error(transparent)]
    InvalidBaseIri(#[from] oxiri::IriParseError),

    #[error("'{0}' is neither an absolute IRI nor a prefixed name with a known prefix")]
    InvalidIriOrPrefixedName(String),

    #[error("The symmetric predicate <{predicate}> relates <{subject}> to itself")]
    SymmetricSelfReference { subject: String, predicate: String },

    /// Represents all cases of `std::fmt::Error`.
    #[error(transparent)]
    Format(#[from] std::fmt::Error),

    #[error("The target to format {0} does not seem to exist")]
    TargetFileDoesNotExist(PathBuf),

    #[error("Error while reading {0}")]
    FailedToReadTargetFile(PathBuf),

    #[error("Failed to parse input as turtle: {0}")]
    ParseError(#[from] parser::Error),

    #[error("Error while writing {0}")]
    FailedToWriteFormattedFile(PathBuf),

    #[error("Failed to list files in input directory {0}: {1:?}")]
    FailedToListFilesInInputDir(PathBuf, FilesListErrorType),
}

pub type FmtResult<T> = std::result::Result<T, Error>;
