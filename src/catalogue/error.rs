// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors from reading or querying the catalogues.

use thiserror::Error;

use crate::sexagesimal::SexagesimalError;

#[derive(Error, Debug)]
pub(crate) enum CatalogueError {
    #[error("Source {name} not found in the catalogue. Valid sources are: {valid}")]
    SourceNotFound { name: String, valid: String },

    #[error("Line {name} not found in the catalogue. Valid lines are: {valid}")]
    LineNotFound { name: String, valid: String },

    #[error(
        "Line {name} has no entry with quantum number {qn}. Catalogued quantum numbers for {name} are: {valid}"
    )]
    QnNotFound {
        name: String,
        qn: String,
        valid: String,
    },

    #[error("Line name {name} is not unique; add a quantum number to pick one of: {qns}")]
    AmbiguousLine { name: String, qns: String },

    #[error("Catalogue file not found: {path}")]
    FileNotFound { path: String },

    #[error("Catalogue {path} contains no entries")]
    Empty { path: String },

    #[error(
        "Source catalogue {path} has an unrecognised extension. Supported extensions are: {valid}"
    )]
    UnrecognisedExtension { path: String, valid: String },

    #[error("{path} record {record}: expected {expected} comma-separated fields, found {found}")]
    WrongFieldCount {
        path: String,
        record: u64,
        expected: usize,
        found: usize,
    },

    #[error("{path} record {record}: couldn't parse {column} value {value:?} as a number")]
    ParseFloat {
        path: String,
        record: u64,
        column: &'static str,
        value: String,
    },

    #[error("{path}, source {name}: {err}")]
    Coordinate {
        path: String,
        name: String,
        err: SexagesimalError,
    },

    #[error("{path}: duplicate source name {name}")]
    DuplicateSource { path: String, name: String },

    #[error("{path}: duplicate line entry {name} {qn}")]
    DuplicateLine {
        path: String,
        name: String,
        qn: String,
    },

    #[error("Couldn't decode the source catalogue {path}: {message}")]
    Toml { path: String, message: String },

    #[error("Couldn't read catalogue {path}: {err}")]
    Csv { path: String, err: Box<csv::Error> },

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
