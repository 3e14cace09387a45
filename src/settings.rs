// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Project settings: where the catalogues live and where data products go.
//!
//! These describe a project area that rarely changes between runs, so they
//! sit in a TOML file rather than on the command line. The file is looked
//! for in the working directory unless `--settings` says otherwise.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The settings file name used when `--settings` isn't given.
pub(crate) const DEFAULT_SETTINGS_FILE: &str = "noema_combine.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Settings {
    pub(crate) catalogues: Catalogues,
    pub(crate) folders: Folders,
    #[serde(default)]
    pub(crate) file_handling: FileHandling,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Catalogues {
    /// The source catalogue (csv or toml).
    pub(crate) source_catalogue: PathBuf,
    /// The spectral-line catalogue (csv).
    pub(crate) line_catalogue: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Folders {
    /// Directory holding the per-window uv-tables from the interferometric
    /// pipeline, organised by window id.
    pub(crate) uvt_dir: PathBuf,
    /// Directory receiving products staged for merging.
    pub(crate) uvt_dir_out: PathBuf,
    /// Directory for reduced single-dish spectra.
    pub(crate) dir_30m: PathBuf,
    /// Directory holding the raw 30-m observations.
    pub(crate) inputdir: PathBuf,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct FileHandling {
    /// Raw 30-m files whose paths contain any of these substrings are
    /// skipped when reducing.
    #[serde(default)]
    pub(crate) ignore_files: Vec<String>,
}

impl Settings {
    /// Read the settings out of `path`, or out of [`DEFAULT_SETTINGS_FILE`]
    /// when no path is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Settings, SettingsError> {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_SETTINGS_FILE));
        debug!("Attempting to read settings from {}", path.display());
        let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => SettingsError::NotFound {
                path: path.display().to_string(),
            },
            _ => SettingsError::IO(e),
        })?;
        toml::from_str(&contents).map_err(|e| SettingsError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

#[derive(Error, Debug)]
pub(crate) enum SettingsError {
    #[error("Settings file not found: {path}")]
    NotFound { path: String },

    #[error("Couldn't decode settings from {path}: {message}")]
    Parse { path: String, message: String },

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
