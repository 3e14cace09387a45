// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The reduction operations.
//!
//! Each operation pairs a parameters struct, built and validated by the CLI
//! code, with a `run` method that emits and executes interpreter scripts.
//! The script text itself comes from pure functions so that it can be
//! checked without a GILDAS installation.

mod make_uvt;
mod prepare_merge;
mod reduce_30m;

pub(crate) use make_uvt::MakeUvtParams;
pub(crate) use prepare_merge::PrepareMergeParams;
pub(crate) use reduce_30m::{Reduce30mError, Reduce30mParams};

use log::info;

use crate::constants::VEL_C;
use crate::gildas::Interpreter;

/// First-order Doppler factor shifting a rest frequency into the frame of a
/// source moving at `vlsr` km/s.
fn doppler_factor(vlsr: f64) -> f64 {
    1.0 - vlsr / VEL_C
}

/// A velocity interval, rendered the way the interpreters read it: two
/// decimals, two spaces between the bounds.
fn velocity_interval(centre: f64, below: f64, above: f64) -> String {
    format!("{:.2}  {:.2}", centre - below, centre + above)
}

/// Log a script in full instead of running it.
fn log_dry_run(interpreter: Interpreter, script: &str) {
    info!("Dry run; the {interpreter} script would be:");
    for line in script.lines() {
        info!("  {line}");
    }
}
