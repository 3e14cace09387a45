// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Reduce raw 30-m observations into per-line spectra and cubes.

use std::path::{Path, PathBuf};

use clap::Parser;
use log::debug;
use serde::{Deserialize, Serialize};
use vec1::Vec1;

use super::common::{display_warnings, InfoPrinter, ARG_FILE_HELP};
use super::NoemaError;
use crate::{
    catalogue::{read_line_catalogue, read_source_catalogue, Line},
    ops::Reduce30mParams,
    settings::Settings,
};

/// The source reduced when `--source` isn't given.
pub(super) const DEFAULT_SOURCE: &str = "CLOUDH";

/// The line reduced when `--lines` isn't given.
pub(super) const DEFAULT_LINE: &str = "N2Hp";

lazy_static::lazy_static! {
    static ref SOURCE_HELP: String =
        format!("The source to reduce, as named in the source catalogue (case-insensitive). Default: {DEFAULT_SOURCE}");

    static ref LINES_HELP: String =
        format!("The lines to reduce, as named in the line catalogue. Default: {DEFAULT_LINE}");
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct Reduce30mArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(short, long, help = SOURCE_HELP.as_str())]
    pub(super) source: Option<String>,

    #[clap(short, long, multiple_values(true), help = LINES_HELP.as_str())]
    pub(super) lines: Option<Vec<String>>,

    /// Quantum numbers matching --lines one-for-one, for molecules with
    /// multiple catalogued transitions. Give - to leave one unspecified.
    #[clap(short, long, multiple_values(true))]
    pub(super) qns: Option<Vec<String>>,
}

impl Reduce30mArgs {
    /// Both command-line and file arguments are available; merge them
    /// together, with the command-line winning.
    pub(super) fn merge(self) -> Result<Reduce30mArgs, NoemaError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;
        if let Some(arg_file) = cli_args.args_file {
            let file_args: Reduce30mArgs = unpack_arg_file!(arg_file);

            Ok(Reduce30mArgs {
                args_file: None,
                source: cli_args.source.or(file_args.source),
                lines: cli_args.lines.or(file_args.lines),
                qns: cli_args.qns.or(file_args.qns),
            })
        } else {
            Ok(cli_args)
        }
    }

    fn parse(self, settings_file: Option<&Path>) -> Result<Reduce30mParams, NoemaError> {
        debug!("{:#?}", self);
        let Reduce30mArgs {
            args_file: _,
            source,
            lines,
            qns,
        } = self;

        let settings = Settings::load(settings_file)?;
        let sources = read_source_catalogue(&settings.catalogues.source_catalogue)?;
        let line_catalogue = read_line_catalogue(&settings.catalogues.line_catalogue)?;

        let source_name = source.unwrap_or_else(|| DEFAULT_SOURCE.to_string());
        let source = sources.get_source(&source_name)?.clone();

        let line_names = lines.unwrap_or_else(|| vec![DEFAULT_LINE.to_string()]);
        let qns = qns.unwrap_or_default();
        if !qns.is_empty() && qns.len() != line_names.len() {
            return Err(NoemaError::Generic(format!(
                "Got {} lines but {} quantum numbers; give one quantum number per line, or none at all",
                line_names.len(),
                qns.len()
            )));
        }
        let mut resolved = vec![];
        for (i, name) in line_names.iter().enumerate() {
            let qn = qns.get(i).map(String::as_str).and_then(unspecified_to_none);
            resolved.push(line_catalogue.get_line(name, qn)?.clone());
        }
        let lines = Vec1::try_from_vec(resolved)
            .map_err(|_| NoemaError::Generic("No lines were given".to_string()))?;

        let mut printer =
            InfoPrinter::new(format!("Reducing 30-m data for {}", source.source_out).into());
        printer.push_line(format!("Source in archive: {}", source.source_30m).into());
        printer.push_line(
            format!(
                "Writing into {}",
                settings.folders.dir_30m.display()
            )
            .into(),
        );
        printer.push_block(lines.iter().map(describe_line).collect());
        printer.display();

        display_warnings();

        Ok(Reduce30mParams {
            source,
            lines,
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

/// `-` (or an empty string) on the command line means "no quantum number".
pub(super) fn unspecified_to_none(qn: &str) -> Option<&str> {
    match qn {
        "" | "-" => None,
        qn => Some(qn),
    }
}

pub(super) fn describe_line(line: &Line) -> std::borrow::Cow<'static, str> {
    format!(
        "{} {} at {} MHz (window {})",
        line.name,
        line.qn_str,
        line.freq_mhz(),
        line.lid
    )
    .into()
}
