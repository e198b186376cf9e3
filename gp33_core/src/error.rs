// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a plotting run.  None of these are recovered from.

#[derive(Error, Debug)]
pub enum PlotError {
    #[error("can't read {path}: {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path} as CSV: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path} has no column named '{column}'")]
    MissingColumn { path: PathBuf, column: String },

    #[error("no data: {0}")]
    EmptyData(String),

    #[error("unusable nCells value: {0}")]
    BadCount(String),

    #[error("can't write {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("plotting failed: {0}")]
    Render(String),

    #[error("PDF conversion failed: {0}")]
    Pdf(String),
}

pub type Result<T> = std::result::Result<T, PlotError>;
