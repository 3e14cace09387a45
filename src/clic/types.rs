// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The yaml setups file.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use super::ClicError;

/// Everything in a setups file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct SetupsFile {
    /// NOEMA receiver band.
    #[serde(default = "default_receiver")]
    pub(crate) receiver: u8,

    #[serde(default)]
    pub(crate) highres_parameters: HighResParameters,

    #[serde(default)]
    pub(crate) setups: IndexMap<String, Setup>,
}

fn default_receiver() -> u8 {
    3
}

/// Layout of the high-resolution correlator chunks. The defaults match the
/// standard PolyFiX spectral setup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct HighResParameters {
    /// High-resolution windows per sideband half.
    pub(crate) number_windows: u32,
    /// First window of the lower-inner quarter.
    #[serde(rename = "LI_start")]
    pub(crate) li_start: u32,
    /// First window of the upper-inner quarter; the sideband flips here.
    #[serde(rename = "UI_start")]
    pub(crate) ui_start: u32,
    /// First window of the upper-outer quarter.
    #[serde(rename = "UO_start")]
    pub(crate) uo_start: u32,
}

impl Default for HighResParameters {
    fn default() -> Self {
        Self {
            number_windows: 38,
            li_start: 23,
            ui_start: 32,
            uo_start: 40,
        }
    }
}

/// One spectral setup and the observation files taken with it, grouped by
/// array configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Setup {
    /// The two sources sharing this setup.
    pub(crate) sources: Vec<String>,

    #[serde(rename = "A-files", default)]
    pub(crate) a_files: Vec<ObservationFile>,

    #[serde(rename = "C-files", default)]
    pub(crate) c_files: Vec<ObservationFile>,

    #[serde(rename = "D-files", default)]
    pub(crate) d_files: Vec<ObservationFile>,
}

/// One observation (hpb) file and how to calibrate it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ObservationFile {
    pub(crate) file: String,

    #[serde(rename = "phase calibration type", default)]
    pub(crate) phase: CalScheme,

    #[serde(rename = "amplitude calibration type", default)]
    pub(crate) amplitude: CalScheme,

    #[serde(rename = "RF calibration type", default)]
    pub(crate) rf: CalScheme,
}

/// Antenna- or baseline-based calibration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum CalScheme {
    #[default]
    Antenna,
    Baseline,
}

/// Read and decode a setups file.
pub(crate) fn read_setups_file(path: &Path) -> Result<SetupsFile, ClicError> {
    debug!("Attempting to read the setups file {}", path.display());
    let read_err = |message: String| ClicError::ReadSetups {
        path: path.display().to_string(),
        message,
    };
    let file = File::open(path).map_err(|e| read_err(e.to_string()))?;
    let setups: SetupsFile =
        serde_yaml::from_reader(BufReader::new(file)).map_err(|e| read_err(e.to_string()))?;
    debug!(
        "Found {} setups for receiver {}",
        setups.setups.len(),
        setups.receiver
    );
    Ok(setups)
}
