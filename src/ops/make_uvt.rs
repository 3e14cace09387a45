// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Cut one line's velocity range out of a spectral-window uv-table.

use std::path::Path;

use log::info;

use super::{log_dry_run, velocity_interval};
use crate::{
    catalogue::{Line, Source},
    filenames,
    gildas::{remove_products, run_script, Interpreter, RunnerError},
    settings::Settings,
};

pub(crate) struct MakeUvtParams {
    pub(crate) source: Source,
    pub(crate) line: Line,
    /// Half-width of the extracted range below the systemic velocity
    /// \[km/s\].
    pub(crate) dv_min: f64,
    /// Half-width of the extracted range above the systemic velocity
    /// \[km/s\].
    pub(crate) dv_max: f64,
    /// Start from the continuum-subtracted window table.
    pub(crate) uvsub: bool,
    /// Start from the self-calibrated window table.
    pub(crate) selfcal: bool,
    pub(crate) settings: Settings,
}

impl MakeUvtParams {
    pub(crate) fn run(&self, dry_run: bool) -> Result<(), RunnerError> {
        let folders = &self.settings.folders;
        let source = &self.source.source_out;
        let line = &self.line;

        let window = filenames::uvt_window(
            &folders.uvt_dir,
            source,
            &line.lid,
            self.uvsub,
            self.selfcal,
        );
        let output = filenames::uvt_file(
            &folders.uvt_dir,
            &folders.uvt_dir_out,
            source,
            &line.name,
            &line.qn,
            &line.lid,
            false,
        );
        let script = self.script(&window, &output);
        info!(
            "Extracting {} from {}",
            output.display(),
            window.display()
        );

        if dry_run {
            log_dry_run(Interpreter::Mapping, &script);
            return Ok(());
        }
        remove_products(&filenames::product_stem(&output))?;
        run_script(Interpreter::Mapping, &script)?;
        Ok(())
    }

    fn script(&self, window: &Path, output: &Path) -> String {
        let range = velocity_interval(self.source.vlsr, self.dv_min, self.dv_max);
        let mut s = String::new();
        s.push_str(&format!("read uv {}\n", window.display()));
        s.push_str(&format!("modify frequency {}\n", self.line.freq_mhz()));
        s.push_str(&format!("uv_extract /range {range} velocity\n"));
        s.push_str(&format!("write uv {}\n", output.display()));
        s.push_str("exit\n");
        s
    }
}
