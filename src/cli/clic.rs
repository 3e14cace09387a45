// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Generate CLIC command files for building spectral-window uv-tables.

use std::path::PathBuf;

use clap::Parser;
use log::debug;

use super::common::display_warnings;
use super::NoemaError;
use crate::clic::{generate_setup, read_setups_file};

pub(super) const DEFAULT_SETUPS_FILE: &str = "clic_setups.yaml";

lazy_static::lazy_static! {
    static ref SETUPS_HELP: String =
        format!("Path to the yaml setups file. Default: {DEFAULT_SETUPS_FILE}");
}

#[derive(Parser, Debug, Clone)]
pub(super) struct MakeClicArgs {
    /// The setup to generate CLIC files for, as named in the setups file.
    #[clap(name = "SETUP")]
    pub(super) setup: String,

    #[clap(long, help = SETUPS_HELP.as_str())]
    pub(super) setups: Option<PathBuf>,

    /// Write the CLIC files into this directory instead of the working
    /// directory.
    #[clap(short, long)]
    pub(super) outdir: Option<PathBuf>,
}

impl MakeClicArgs {
    pub(super) fn run(self, dry_run: bool) -> Result<(), NoemaError> {
        debug!("{:#?}", self);
        let setups_path = self
            .setups
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETUPS_FILE));
        let setups = read_setups_file(&setups_path)?;
        let out_dir = self.outdir.unwrap_or_else(|| PathBuf::from("."));

        let written = generate_setup(&self.setup, &setups, &out_dir, dry_run)?;
        display_warnings();
        debug!("Generated {} CLIC files", written.len());
        Ok(())
    }
}
