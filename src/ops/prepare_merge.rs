// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Stage a reduced 30-m spectrum for merging with the matching uv-table.
//!
//! The spectrum gets its beam efficiency corrected, is resampled onto the
//! uv-table's grid and lands, together with that uv-table, in the staging
//! tree that the merging step works from.

use std::path::PathBuf;

use log::info;

use super::log_dry_run;
use crate::{
    catalogue::{Line, Source},
    filenames,
    gildas::{copy_product, remove_products, run_script, Interpreter, RunnerError},
    settings::Settings,
};

pub(crate) struct PrepareMergeParams {
    pub(crate) source: Source,
    pub(crate) line: Line,
    pub(crate) settings: Settings,
}

/// Paths involved in staging one line.
struct MergePlan {
    /// The reduced single-dish spectrum to start from.
    input: PathBuf,
    /// The corrected spectrum, carrying the window id.
    output: PathBuf,
    /// `output` without its extension; the `.tab` product grows from this.
    stem: PathBuf,
    /// The per-line uv-table whose grid the table must match.
    line_uvt: PathBuf,
    /// Where the staged products go.
    staging_dir: PathBuf,
}

impl PrepareMergeParams {
    pub(crate) fn run(&self, dry_run: bool) -> Result<(), RunnerError> {
        let plan = self.plan();
        let script = merge_script(&self.source, &self.line, &plan);
        info!(
            "Staging {} and {} into {}",
            plan.output.display(),
            plan.line_uvt.display(),
            plan.staging_dir.display()
        );

        if dry_run {
            log_dry_run(Interpreter::Class, &script);
            return Ok(());
        }
        remove_products(&plan.stem)?;
        run_script(Interpreter::Class, &script)?;
        copy_product(&plan.output.with_extension("tab"), &plan.staging_dir)?;
        copy_product(&plan.line_uvt, &plan.staging_dir)?;
        Ok(())
    }

    fn plan(&self) -> MergePlan {
        let folders = &self.settings.folders;
        let source = &self.source.source_out;
        let Line { name, qn, lid, .. } = &self.line;

        let output = filenames::file_30m(&folders.dir_30m, source, name, qn, lid, true);
        MergePlan {
            input: filenames::file_30m(&folders.dir_30m, source, name, qn, lid, false),
            stem: filenames::product_stem(&output),
            output,
            line_uvt: filenames::uvt_file(
                &folders.uvt_dir,
                &folders.uvt_dir_out,
                source,
                name,
                qn,
                lid,
                false,
            ),
            staging_dir: folders.uvt_dir_out.join(lid),
        }
    }
}

/// The CLASS script correcting the spectrum and resampling it onto the
/// uv-table grid.
fn merge_script(source: &Source, line: &Line, plan: &MergePlan) -> String {
    let mut s = String::new();
    s.push_str(&format!("file in {}\n", plan.input.display()));
    s.push_str(&format!("file out {}  single /overwrite\n", plan.output.display()));
    s.push_str(&format!("say \"new output file: {}\"\n", plan.output.display()));
    s.push_str("find\n");
    s.push_str("set mode x auto\n");
    s.push_str("set unit v f\n");
    s.push_str("get zero\n");
    s.push_str("sic message class s-i\n");
    s.push_str("for i 1 to found\n");
    s.push_str("  get next\n");
    s.push_str(&format!("  modify linename {}\n", line.name_str));
    s.push_str(&format!("  modify freq {}\n", line.freq_mhz()));
    s.push_str(&format!("  modify source {}\n", source.source_out));
    // Main-beam scale via the Ruze formula before mixing with NOEMA data.
    s.push_str("  modify beam_eff /ruze\n");
    s.push_str("  write\n");
    s.push_str("next\n");
    s.push_str("sic message class s+i\n");
    s.push_str(&format!("file in {}\n", plan.output.display()));
    s.push_str("find /all\n");
    s.push_str(&format!(
        "table {} new /nocheck source /like {}\n",
        plan.stem.display(),
        plan.line_uvt.display()
    ));
    s.push_str("exit\n");
    s
}
