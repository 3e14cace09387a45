// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The boundary to the GILDAS interpreters.
//!
//! Scripts are plain text. They get written into uniquely named scratch
//! files in the working directory and handed to `class` or `mapping` with
//! `-nw @`. The interpreter is an opaque collaborator; beyond its exit
//! status and the files it leaves behind, nothing of its internals is
//! inspected.

mod runner;

pub(crate) use runner::{copy_product, remove_products, run_script, RunnerError};

use strum_macros::Display;

/// Which interpreter a script is meant for. The serialisations are the
/// executable names looked up on `PATH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub(crate) enum Interpreter {
    #[strum(serialize = "class")]
    Class,

    #[strum(serialize = "mapping")]
    Mapping,
}

impl Interpreter {
    /// Suffix for the scratch file holding a script.
    fn script_suffix(self) -> &'static str {
        match self {
            Interpreter::Class => ".class",
            Interpreter::Mapping => ".map",
        }
    }
}
