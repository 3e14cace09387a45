// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all noema-combine-related errors. This should be the
//! *only* error enum that is publicly visible.

use thiserror::Error;

use crate::{
    catalogue::CatalogueError,
    clic::ClicError,
    gildas::RunnerError,
    ops::Reduce30mError,
    settings::SettingsError,
};

/// The *only* publicly visible error from noema-combine.
#[derive(Error, Debug)]
pub enum NoemaError {
    /// An error related to the settings file.
    #[error("{0}")]
    Settings(String),

    /// An error related to reading or querying the catalogues.
    #[error("{0}")]
    Catalogue(String),

    /// An error related to running the GILDAS interpreters or handling
    /// their products.
    #[error("{0}")]
    Gildas(String),

    /// An error related to CLIC file generation.
    #[error("{0}")]
    Clic(String),

    /// An error related to an argument file.
    #[error("{0}")]
    ArgFile(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

impl From<SettingsError> for NoemaError {
    fn from(e: SettingsError) -> Self {
        Self::Settings(e.to_string())
    }
}

impl From<CatalogueError> for NoemaError {
    fn from(e: CatalogueError) -> Self {
        Self::Catalogue(e.to_string())
    }
}

impl From<RunnerError> for NoemaError {
    fn from(e: RunnerError) -> Self {
        Self::Gildas(e.to_string())
    }
}

impl From<Reduce30mError> for NoemaError {
    fn from(e: Reduce30mError) -> Self {
        match e {
            Reduce30mError::Runner(e) => Self::from(e),
            e => Self::Generic(e.to_string()),
        }
    }
}

impl From<ClicError> for NoemaError {
    fn from(e: ClicError) -> Self {
        Self::Clic(e.to_string())
    }
}

impl From<std::io::Error> for NoemaError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
