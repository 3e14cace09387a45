// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Stage a reduced 30-m spectrum and its uv-table for merging.

use std::path::{Path, PathBuf};

use clap::Parser;
use log::debug;
use serde::{Deserialize, Serialize};

use super::common::{display_warnings, InfoPrinter, ARG_FILE_HELP};
use super::reduce_30m::{describe_line, unspecified_to_none};
use super::NoemaError;
use crate::{
    catalogue::{read_line_catalogue, read_source_catalogue},
    ops::PrepareMergeParams,
    settings::Settings,
};

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct PrepareMergeArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    /// The source to stage, as named in the source catalogue
    /// (case-insensitive).
    #[clap(short, long)]
    pub(super) source: Option<String>,

    /// The line to stage, as named in the line catalogue.
    #[clap(short, long)]
    pub(super) line: Option<String>,

    /// Quantum number of the line, for molecules with multiple catalogued
    /// transitions.
    #[clap(short, long)]
    pub(super) qn: Option<String>,
}

impl PrepareMergeArgs {
    /// Both command-line and file arguments are available; merge them
    /// together, with the command-line winning.
    pub(super) fn merge(self) -> Result<PrepareMergeArgs, NoemaError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;
        if let Some(arg_file) = cli_args.args_file {
            let file_args: PrepareMergeArgs = unpack_arg_file!(arg_file);

            Ok(PrepareMergeArgs {
                args_file: None,
                source: cli_args.source.or(file_args.source),
                line: cli_args.line.or(file_args.line),
                qn: cli_args.qn.or(file_args.qn),
            })
        } else {
            Ok(cli_args)
        }
    }

    fn parse(self, settings_file: Option<&Path>) -> Result<PrepareMergeParams, NoemaError> {
        debug!("{:#?}", self);
        let PrepareMergeArgs {
            args_file: _,
            source,
            line,
            qn,
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

        let mut printer =
            InfoPrinter::new(format!("Preparing {} data for merging", source.source_out).into());
        printer.push_line(describe_line(&line));
        printer.push_line(
            format!("Staging into {}", settings.folders.uvt_dir_out.display()).into(),
        );
        printer.display();

        display_warnings();

        Ok(PrepareMergeParams {
            source,
            line,
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
