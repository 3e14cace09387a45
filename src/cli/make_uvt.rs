// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Cut a line's velocity range out of a spectral-window uv-table.

use std::path::{Path, PathBuf};

use clap::Parser;
use log::debug;
use serde::{Deserialize, Serialize};

use super::common::{display_warnings, InfoPrinter, ARG_FILE_HELP};
use super::reduce_30m::{describe_line, unspecified_to_none};
use super::NoemaError;
use crate::{
    catalogue::{read_line_catalogue, read_source_catalogue},
    ops::MakeUvtParams,
    settings::Settings,
};

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct MakeUvtArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    /// The source to extract, as named in the source catalogue
    /// (case-insensitive).
    #[clap(short, long)]
    pub(super) source: Option<String>,

    /// The line to extract, as named in the line catalogue.
    #[clap(short, long)]
    pub(super) line: Option<String>,

    /// Quantum number of the line, for molecules with multiple catalogued
    /// transitions.
    #[clap(short, long)]
    pub(super) qn: Option<String>,

    /// Half-width of the extracted velocity range [km/s]. The default is
    /// the line's catalogued width.
    #[clap(long)]
    pub(super) dv: Option<f64>,

    /// Half-width below the systemic velocity [km/s]; overrides --dv on
    /// that side.
    #[clap(long)]
    pub(super) dv_min: Option<f64>,

    /// Half-width above the systemic velocity [km/s]; overrides --dv on
    /// that side.
    #[clap(long)]
    pub(super) dv_max: Option<f64>,

    /// Start from the window table without continuum subtraction.
    #[clap(long)]
    #[serde(default)]
    pub(super) no_uvsub: bool,

    /// Start from the self-calibrated window table.
    #[clap(long)]
    #[serde(default)]
    pub(super) selfcal: bool,
}

impl MakeUvtArgs {
    /// Both command-line and file arguments are available; merge them
    /// together, with the command-line winning.
    pub(super) fn merge(self) -> Result<MakeUvtArgs, NoemaError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;
        if let Some(arg_file) = cli_args.args_file {
            let file_args: MakeUvtArgs = unpack_arg_file!(arg_file);

            Ok(MakeUvtArgs {
                args_file: None,
                source: cli_args.source.or(file_args.source),
                line: cli_args.line.or(file_args.line),
                qn: cli_args.qn.or(file_args.qn),
                dv: cli_args.dv.or(file_args.dv),
                dv_min: cli_args.dv_min.or(file_args.dv_min),
                dv_max: cli_args.dv_max.or(file_args.dv_max),
                no_uvsub: cli_args.no_uvsub || file_args.no_uvsub,
                selfcal: cli_args.selfcal || file_args.selfcal,
            })
        } else {
            Ok(cli_args)
        }
    }

    fn parse(self, settings_file: Option<&Path>) -> Result<MakeUvtParams, NoemaError> {
        debug!("{:#?}", self);
        let MakeUvtArgs {
            args_file: _,
            source,
            line,
            qn,
            dv,
            dv_min,
            dv_max,
            no_uvsub,
            selfcal,
        } = self;

        let settings = Settings::load(settings_file)?;
        let sources = read_source_catalogue(&settings.catalogues.source_catalogue)?;
        let line_catalogue = read_line_catalogue(&settings.catalogues.line_catalogue)?;

        let source_name =
            source.ok_or_else(|| NoemaError::Generic("No source was specified".to_string()))?;
        let source = sources.get_source(&source_name)?.clone();
        let line_name =
            line.ok_or_else(|| NoemaError::Generic("No line was specified".to_string()))?;
        let qn = qn.as_deref().and_then(unspecified_to_none);
        let line = line_catalogue.get_line(&line_name, qn)?.clone();

        let dv_min = dv_min.or(dv).unwrap_or(line.vel_width);
        let dv_max = dv_max.or(dv).unwrap_or(line.vel_width);

        let mut printer =
            InfoPrinter::new(format!("Extracting a uv-table for {}", source.source_out).into());
        printer.push_line(describe_line(&line));
        printer.push_line(
            format!(
                "Velocity range: {:.2} to {:.2} km/s",
                source.vlsr - dv_min,
                source.vlsr + dv_max
            )
            .into(),
        );
        printer.display();

        display_warnings();

        Ok(MakeUvtParams {
            source,
            line,
            dv_min,
            dv_max,
            uvsub: !no_uvsub,
            selfcal,
            settings,
        })
    }

    pub(super) fn run(
        self,
        settings_file: Option<&Path>,
        dry_run: bool,
    ) -> Result<(), NoemaError> {
        let params = self.parse(settings_file)?;
        params.run(dry_run)?;
        Ok(())
    }
}
