// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Reduce raw 30-m observations into per-line spectra and cubes.
//!
//! For each requested line, every raw `.30m` file is searched at the line's
//! Doppler-shifted frequency; the matching spectra are extracted, baselined
//! and written into one output file, which is then gridded into a table and
//! a cube.

use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;
use vec1::Vec1;

use super::{doppler_factor, log_dry_run, velocity_interval};
use crate::{
    catalogue::{Line, Source},
    constants::TELESCOPE_30M,
    filenames,
    gildas::{remove_products, run_script, Interpreter, RunnerError},
    settings::Settings,
};

pub(crate) struct Reduce30mParams {
    pub(crate) source: Source,
    pub(crate) lines: Vec1<Line>,
    pub(crate) settings: Settings,
}

impl Reduce30mParams {
    pub(crate) fn run(&self, dry_run: bool) -> Result<(), Reduce30mError> {
        let input_files = self.input_files()?;
        debug!("Reducing {} raw files", input_files.len());

        for line in &self.lines {
            let output = filenames::file_30m(
                &self.settings.folders.dir_30m,
                &self.source.source_out,
                &line.name,
                &line.qn,
                &line.lid,
                false,
            );
            let script = reduce_script(&self.source, line, &input_files, &output);
            info!(
                "Reducing {} {} into {}",
                line.name,
                line.qn_str,
                output.display()
            );

            if dry_run {
                log_dry_run(Interpreter::Class, &script);
                continue;
            }
            remove_products(&filenames::product_stem(&output))?;
            run_script(Interpreter::Class, &script)?;
        }

        Ok(())
    }

    /// List the raw `.30m` files, dropping any that match an ignore
    /// pattern.
    fn input_files(&self) -> Result<Vec<PathBuf>, Reduce30mError> {
        let pattern = format!("{}/*.30m", self.settings.folders.inputdir.display());
        let mut all = vec![];
        for entry in glob::glob(&pattern)? {
            all.push(entry?);
        }
        if all.is_empty() {
            return Err(Reduce30mError::NoInputFiles { glob: pattern });
        }

        let files: Vec<PathBuf> = all
            .into_iter()
            .filter(|f| {
                if self.is_ignored(f) {
                    info!("Ignoring {}", f.display());
                    false
                } else {
                    true
                }
            })
            .collect();
        if files.is_empty() {
            return Err(Reduce30mError::AllInputFilesIgnored {
                dir: self.settings.folders.inputdir.display().to_string(),
            });
        }
        Ok(files)
    }

    fn is_ignored(&self, file: &Path) -> bool {
        let file = file.to_string_lossy();
        self.settings
            .file_handling
            .ignore_files
            .iter()
            .any(|pattern| file.contains(pattern))
    }
}

/// The CLASS script reducing one line out of all raw files into `output`.
fn reduce_script(source: &Source, line: &Line, input_files: &[PathBuf], output: &Path) -> String {
    let freq_mhz = line.freq_mhz();
    let tuned_mhz = freq_mhz * doppler_factor(source.vlsr);
    let extract = velocity_interval(source.vlsr, line.vel_width_30m, line.vel_width_30m);
    let window = velocity_interval(
        source.vlsr,
        line.vel_width_base_30m,
        line.vel_width_base_30m,
    );
    let stem = filenames::product_stem(output);

    let mut s = String::new();
    s.push_str(&format!("file out {}  single\n", output.display()));
    s.push_str(&format!("say \"new output file: {}\"\n", output.display()));
    for file in input_files {
        s.push_str(&format!("say \"processing {}\"\n", file.display()));
        s.push_str(&format!("file in \"{}\"\n", file.display()));
        s.push_str(&format!("set source {}\n", source.source_30m));
        s.push_str("set tele *\n");
        s.push_str("set line *\n");
        s.push_str(&format!("find /frequency {tuned_mhz}\n"));
        s.push_str("set mode x auto\n");
        s.push_str("set unit v\n");
        s.push_str("get zero\n");
        // Silence the per-spectrum chatter inside the loop.
        s.push_str("sic message class s-i\n");
        s.push_str("for i 1 to found\n");
        s.push_str("  get next\n");
        s.push_str(&format!("  modify linename {}\n", line.name_str));
        s.push_str(&format!("  modify freq {freq_mhz}\n"));
        s.push_str(&format!("  modify source {}\n", source.source_out));
        s.push_str(&format!("  modify projection = {} {} =\n", source.ra, source.dec));
        s.push_str(&format!("  modify telescope {TELESCOPE_30M}\n"));
        s.push_str(&format!("  extract {extract} velocity\n"));
        s.push_str(&format!("  set window {window}\n"));
        s.push_str("  base 1\n");
        s.push_str("  write\n");
        s.push_str("next\n");
        s.push_str("sic message class s+i\n");
    }
    s.push_str(&format!("file in {}\n", output.display()));
    s.push_str("find /all\n");
    s.push_str(&format!("table {} new /nocheck\n", stem.display()));
    s.push_str(&format!("xy_map {}\n", stem.display()));
    s.push_str("exit\n");
    s
}

#[derive(Error, Debug)]
pub(crate) enum Reduce30mError {
    #[error("No raw .30m files found (glob: {glob})")]
    NoInputFiles { glob: String },

    #[error("Every raw .30m file in {dir} matched an ignore pattern")]
    AllInputFilesIgnored { dir: String },

    #[error(transparent)]
    Runner(#[from] RunnerError),

    #[error(transparent)]
    Glob(#[from] glob::GlobError),

    #[error(transparent)]
    Pattern(#[from] glob::PatternError),
}
