// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Verify that the configured catalogues can be read, and report what's in
//! them.

use std::path::Path;

use clap::Parser;
use itertools::Itertools;
use log::debug;

use super::common::InfoPrinter;
use super::reduce_30m::describe_line;
use super::NoemaError;
use crate::{
    catalogue::{read_line_catalogue, read_source_catalogue},
    settings::Settings,
};

#[derive(Parser, Debug, Clone)]
pub(super) struct VerifyCataloguesArgs {}

impl VerifyCataloguesArgs {
    pub(super) fn run(self, settings_file: Option<&Path>) -> Result<(), NoemaError> {
        let settings = Settings::load(settings_file)?;

        let sources = read_source_catalogue(&settings.catalogues.source_catalogue)?;
        debug!("Source catalogue read successfully");
        let mut printer = InfoPrinter::new(
            format!(
                "Source catalogue {}",
                settings.catalogues.source_catalogue.display()
            )
            .into(),
        );
        printer.push_line(format!("{} sources", sources.len()).into());
        printer.push_block(
            sources
                .iter()
                .map(|(name, source)| {
                    format!(
                        "{name}: {} -> {}, vlsr {} km/s",
                        source.source_30m, source.source_out, source.vlsr
                    )
                    .into()
                })
                .collect(),
        );
        printer.display();

        let lines = read_line_catalogue(&settings.catalogues.line_catalogue)?;
        debug!("Line catalogue read successfully");
        let mut printer = InfoPrinter::new(
            format!(
                "Line catalogue {}",
                settings.catalogues.line_catalogue.display()
            )
            .into(),
        );
        let num_molecules = lines.iter().map(|line| &line.name).unique().count();
        printer.push_line(
            format!("{} transitions of {} molecules", lines.len(), num_molecules).into(),
        );
        printer.push_block(lines.iter().map(describe_line).collect());
        printer.display();

        Ok(())
    }
}
