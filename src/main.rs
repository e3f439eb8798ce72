// SPDX-FileCopyrightText: 2022 Helsing GmbH
//
// SPDX-License-Identifier: Apache-2.0

use cli::InitError;
use std::ffi::OsStr;
use thiserror::Error;
use ttlser::error::Error;

mod cli;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to initialize the CLI tool: {0}")]
    Init(#[from] InitError),

    #[error("Failed to run the formatter: {0}")]
    Format(#[from] ttlser::error::Error),
}

fn main() -> Result<(), CliError> {
    let (options, mut job) = cli::init()?;

    let mut files = Vec::new();
    for source in job.files {
        if source.as_os_str() == ttlser::STD_STREAM || source.is_file() {
            files.push(source);
        } else if source.is_dir() {
            ttlser::add_files_with_suffix(&source, OsStr::new("ttl"), &mut files)?;
        } else {
            return Err(Error::TargetFileDoesNotExist(source).into());
        }
    }
    job.files = files;

    ttlser::run(&options, &job)?;
    Ok(())
}
