// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Naming of data products.
//!
//! Every product path is a pure function of catalogue values and a couple of
//! flags. The reduction scripts and the merge bookkeeping both go through
//! these, so the two always agree on where things are.

use std::path::{Path, PathBuf};

/// The per-window uv-table delivered by the interferometric pipeline, e.g.
/// `D/L09/B5_L09_uvsub.uvt`. `uvsub` selects the continuum-subtracted table
/// and `selfcal` the self-calibrated one.
pub(crate) fn uvt_window(
    uvt_dir: &Path,
    source: &str,
    lid: &str,
    uvsub: bool,
    selfcal: bool,
) -> PathBuf {
    let mut name = format!("{source}_{lid}");
    if uvsub {
        name.push_str("_uvsub");
    }
    if selfcal {
        name.push_str("_sc");
    }
    name.push_str(".uvt");
    uvt_dir.join(lid).join(name)
}

/// The per-line uv-table cut out of a spectral window. `merge` roots it in
/// the staging tree instead of the pipeline tree.
pub(crate) fn uvt_file(
    uvt_dir: &Path,
    uvt_dir_out: &Path,
    source: &str,
    line: &str,
    qn: &str,
    lid: &str,
    merge: bool,
) -> PathBuf {
    let dir = if merge { uvt_dir_out } else { uvt_dir };
    dir.join(lid).join(format!("{source}_{line}_{qn}_{lid}.uvt"))
}

/// The reduced single-dish spectrum. The merge variant carries the window id
/// so it can sit next to the matching uv-table.
pub(crate) fn file_30m(
    dir_30m: &Path,
    source: &str,
    line: &str,
    qn: &str,
    lid: &str,
    merge: bool,
) -> PathBuf {
    let name = if merge {
        format!("{source}_{line}_{qn}_{lid}.30m")
    } else {
        format!("{source}_{line}_{qn}.30m")
    };
    dir_30m.join(name)
}

/// A product path without its extension. The interpreters derive their
/// `.tab`/`.lmv` outputs from this stem.
pub(crate) fn product_stem(path: &Path) -> PathBuf {
    path.with_extension("")
}
