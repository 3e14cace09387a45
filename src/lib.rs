// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Reduction driver for combining IRAM 30-m and NOEMA spectral-line observations.

The heavy lifting is left to an external GILDAS installation; this crate
resolves catalogue parameters, generates the CLASS/MAPPING/CLIC command
scripts and keeps the tree of data products consistent.
 */

mod catalogue;
mod cli;
mod clic;
mod constants;
mod filenames;
mod gildas;
mod ops;
mod settings;
mod sexagesimal;

// Re-exports.
pub use cli::{NoemaCombine, NoemaError};
