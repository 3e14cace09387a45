// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Running scripts and tidying up around them.

use std::io::Write;
use std::path::Path;
use std::process::Command;

use log::{debug, trace, warn};
use thiserror::Error;

use super::Interpreter;

/// Write `script` to a scratch file and run it through `interpreter`,
/// blocking until it finishes. The scratch file lives in the working
/// directory (the interpreters resolve relative paths from there) and is
/// deleted afterwards, even on failure.
///
/// A non-zero exit is logged rather than returned; the interpreters exit
/// non-zero for conditions they've already reported themselves.
pub(crate) fn run_script(interpreter: Interpreter, script: &str) -> Result<(), RunnerError> {
    let mut scratch = tempfile::Builder::new()
        .prefix("noema_combine_")
        .suffix(interpreter.script_suffix())
        .tempfile_in(".")
        .map_err(RunnerError::Scratch)?;
    scratch.write_all(script.as_bytes()).map_err(RunnerError::Scratch)?;
    scratch.flush().map_err(RunnerError::Scratch)?;

    debug!("Running {interpreter} on {}", scratch.path().display());
    trace!("Script contents:\n{script}");
    let status = Command::new(interpreter.to_string())
        .arg("-nw")
        .arg("@")
        .arg(scratch.path())
        .status()
        .map_err(|e| RunnerError::Spawn {
            program: interpreter.to_string(),
            err: e,
        })?;
    if !status.success() {
        warn!("{interpreter} exited with {status}; check its output above");
    }
    Ok(())
}

/// Remove everything sharing a product `stem`, e.g. a stale `B5_CO_1-0.30m`
/// along with the `.tab` and `.lmv` files derived from it. The interpreters
/// refuse to overwrite some of these themselves.
pub(crate) fn remove_products(stem: &Path) -> Result<(), RunnerError> {
    let pattern = format!("{}.*", stem.display());
    for entry in glob::glob(&pattern)? {
        let path = entry?;
        debug!("Removing stale product {}", path.display());
        std::fs::remove_file(&path).map_err(|e| RunnerError::Remove {
            path: path.display().to_string(),
            err: e,
        })?;
    }
    Ok(())
}

/// Copy a finished product into `dest_dir`, creating the directory first if
/// needed.
pub(crate) fn copy_product(product: &Path, dest_dir: &Path) -> Result<(), RunnerError> {
    std::fs::create_dir_all(dest_dir).map_err(|e| RunnerError::CreateDir {
        path: dest_dir.display().to_string(),
        err: e,
    })?;
    let file_name = product
        .file_name()
        .ok_or_else(|| RunnerError::NoFileName(product.display().to_string()))?;
    let dest = dest_dir.join(file_name);
    debug!("Copying {} to {}", product.display(), dest.display());
    std::fs::copy(product, &dest).map_err(|e| RunnerError::Copy {
        from: product.display().to_string(),
        to: dest.display().to_string(),
        err: e,
    })?;
    Ok(())
}

#[derive(Error, Debug)]
pub(crate) enum RunnerError {
    #[error("Couldn't write the scratch script: {0}")]
    Scratch(std::io::Error),

    #[error("Couldn't start {program}; is GILDAS on your PATH? ({err})")]
    Spawn { program: String, err: std::io::Error },

    #[error("Couldn't remove stale product {path}: {err}")]
    Remove { path: String, err: std::io::Error },

    #[error("Couldn't create directory {path}: {err}")]
    CreateDir { path: String, err: std::io::Error },

    #[error("Couldn't copy {from} to {to}: {err}")]
    Copy {
        from: String,
        to: String,
        err: std::io::Error,
    },

    #[error("Product path {0} has no file name")]
    NoFileName(String),

    #[error(transparent)]
    Glob(#[from] glob::GlobError),

    #[error(transparent)]
    Pattern(#[from] glob::PatternError),
}
