// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! CLIC command files for building spectral-window uv-tables.
//!
//! A yaml "setups" file describes the receiver, the high-resolution chunk
//! layout and, per setup, the observation files of each array
//! configuration. One setup turns into a `.clic` file per configuration,
//! plus the `CD` and `ACD` combinations, ready to be sourced inside CLIC.

mod types;

pub(crate) use types::{read_setups_file, CalScheme, HighResParameters, ObservationFile, Setup, SetupsFile};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use itertools::Itertools;
use log::info;
use thiserror::Error;

use crate::cli::Warn;

/// Generate the CLIC files for one named setup into `out_dir`. Returns the
/// paths written (or, on a dry run, the paths that would have been).
pub(crate) fn generate_setup(
    setup_name: &str,
    setups: &SetupsFile,
    out_dir: &Path,
    dry_run: bool,
) -> Result<Vec<PathBuf>, ClicError> {
    let setup = setups
        .setups
        .get(setup_name)
        .ok_or_else(|| ClicError::UnknownSetup {
            name: setup_name.to_string(),
            valid: setups.setups.keys().join(", "),
        })?;
    let sources = two_sources(&setup.sources)?;

    let mut written = vec![];
    for (label, files) in configurations(setup) {
        let path = out_dir.join(format!("{setup_name}-{label}-uvts.clic"));
        if dry_run {
            info!("Would write {} ({} observation files)", path.display(), files.len());
        } else {
            info!("Writing {}", path.display());
            write_clic_file(&path, setups, sources, label, &files)?;
        }
        written.push(path);
    }
    Ok(written)
}

/// The configurations present in a setup, in generation order. Combined
/// configurations append their parts most-compact-first.
fn configurations(setup: &Setup) -> Vec<(&'static str, Vec<&ObservationFile>)> {
    let a: Vec<_> = setup.a_files.iter().collect();
    let c: Vec<_> = setup.c_files.iter().collect();
    let d: Vec<_> = setup.d_files.iter().collect();

    let mut combos: Vec<(&'static str, Vec<&ObservationFile>)> = vec![];
    if !a.is_empty() {
        combos.push(("A", a.clone()));
    }
    if !c.is_empty() {
        combos.push(("C", c.clone()));
    }
    if !d.is_empty() {
        combos.push(("D", d.clone()));
    }
    if !c.is_empty() && !d.is_empty() {
        let mut cd = c.clone();
        cd.extend(d.iter().copied());
        combos.push(("CD", cd));
    }
    if !a.is_empty() && !c.is_empty() && !d.is_empty() {
        let mut acd = c;
        acd.extend(d);
        acd.extend(a);
        combos.push(("ACD", acd));
    }
    combos
}

fn two_sources(sources: &[String]) -> Result<[&str; 2], ClicError> {
    match sources {
        [a, b] => Ok([a.as_str(), b.as_str()]),
        _ => Err(ClicError::NotTwoSources {
            found: sources.len(),
        }),
    }
}

fn write_clic_file(
    path: &Path,
    setups: &SetupsFile,
    sources: [&str; 2],
    label: &str,
    files: &[&ObservationFile],
) -> Result<(), ClicError> {
    let mut f = BufWriter::new(File::create(path)?);
    write_header(&mut f)?;
    write_makespw(&mut f, sources, label)?;
    write_loopspw(&mut f, &setups.highres_parameters)?;
    for (i, entry) in files.iter().copied().enumerate() {
        write_calibration(&mut f, setups.receiver, entry)?;
        writeln!(f, "@ loopspw")?;
        if i == 0 {
            writeln!(f, "!")?;
            writeln!(f, "! append to the tables from here on")?;
            writeln!(f, "let new_file 0")?;
            writeln!(f, "!")?;
        }
    }
    f.flush()?;
    Ok(())
}

fn write_header(f: &mut impl Write) -> std::io::Result<()> {
    let date = chrono::Local::now().format("%Y-%m-%d");
    let bar = "!".repeat(38);
    writeln!(f, "{bar}")?;
    writeln!(f, "!")?;
    writeln!(f, "!  Generate LR + HR chunk uv-tables")?;
    writeln!(f, "!")?;
    writeln!(f, "!  written by noema-combine, {date}")?;
    writeln!(f, "!")?;
    writeln!(f, "{bar}")?;
    writeln!(f, "def integer new_file /global")?;
    writeln!(f, "let new_file 1")?;
    writeln!(f, "!")?;
    Ok(())
}

/// The `makespw` procedure: one uv-table per source for the chunk pair
/// selected by the caller, created on first use and appended to afterwards.
fn write_makespw(f: &mut impl Write, sources: [&str; 2], label: &str) -> std::io::Result<()> {
    let tables = sources.map(|s| format!("../../uvts/{s}/{label}config/{s}_{label}"));

    writeln!(f, "!")?;
    writeln!(f, "! Make uv-tables for sources: {} and {}", sources[0], sources[1])?;
    writeln!(f, "! &1 = output table name suffix")?;
    writeln!(f, "!")?;
    writeln!(f, "begin procedure makespw")?;
    writeln!(f, "  if (new_file.eq.1) then")?;
    for (source, table) in sources.iter().zip(&tables) {
        writeln!(f, "    find /proc corr /sou {source}")?;
        writeln!(f, "    table \"{table}_&1\" new")?;
    }
    writeln!(f, "  else")?;
    for (source, table) in sources.iter().zip(&tables) {
        writeln!(f, "    find /proc corr /sou {source}")?;
        writeln!(f, "    table \"{table}_&1\"")?;
    }
    writeln!(f, "  endif")?;
    writeln!(f, "end procedure makespw")?;
    writeln!(f, "!")?;
    Ok(())
}

/// The `loopspw` procedure: pair up the low- and high-resolution
/// correlator chunks and run `makespw` over every spectral window.
fn write_loopspw(f: &mut impl Write, hr: &HighResParameters) -> std::io::Result<()> {
    let banner = |f: &mut dyn Write, text: &str| -> std::io::Result<()> {
        writeln!(f, "  !")?;
        writeln!(f, "  !!!!!!!!! {text}")?;
        writeln!(f, "  !")
    };

    writeln!(f, "!")?;
    writeln!(f, "begin procedure loopspw")?;
    writeln!(f, "  ! These define the chunks used to make each spw")?;
    writeln!(f, "  !")?;
    writeln!(f, "  !!!!!!!!! Wideband chunks")?;
    writeln!(f, "  !")?;
    for (sideband, low, high, name) in [
        ("lsb", 1, 5, "lo"),
        ("lsb", 2, 6, "li"),
        ("usb", 3, 7, "ui"),
        ("usb", 4, 8, "uo"),
    ] {
        writeln!(f, "  set selection line {sideband} l{low:03} and l{high:03}")?;
        writeln!(f, "  @ makespw {name}")?;
        writeln!(f, "  !")?;
    }

    let mut sideband = "lsb";
    banner(f, "LO chunks")?;
    for i in 9..=hr.number_windows + 9 {
        if i == hr.li_start {
            banner(f, "LI chunks")?;
        } else if i == hr.ui_start {
            sideband = "usb";
            banner(f, "UI chunks")?;
        } else if i == hr.uo_start {
            banner(f, "UO chunks")?;
        }
        let pair = i + hr.number_windows + 1;
        writeln!(f, "  set selection line {sideband} l{i:03} and l{pair:03}")?;
        writeln!(f, "  @ makespw l{i:03}l{pair:03}")?;
        writeln!(f, "  !")?;
    }
    writeln!(f, "end procedure loopspw")?;
    Ok(())
}

/// The calibration preamble for one observation file.
fn write_calibration(
    f: &mut impl Write,
    receiver: u8,
    entry: &ObservationFile,
) -> std::io::Result<()> {
    writeln!(f, "!")?;
    writeln!(f, "set default")?;
    writeln!(f, "set scan 0 10000")?;
    writeln!(f, "set offset 0 0")?;
    writeln!(f, "set receiver {receiver}")?;
    writeln!(f, "set quality average")?;
    writeln!(f, "set weight tsys on")?;
    writeln!(f, "set weight calibration on")?;
    // CLIC has no baseline-based phase solutions.
    if entry.phase == CalScheme::Baseline {
        format!(
            "{}: baseline-based phase calibration isn't available; using antenna-based",
            entry.file
        )
        .warn();
    }
    writeln!(f, "set phase antenna atmospher internal relative")?;
    match entry.amplitude {
        CalScheme::Antenna => writeln!(f, "set amplitude antenna absolute jansky relative")?,
        CalScheme::Baseline => writeln!(f, "set amplitude baseline relative")?,
    }
    writeln!(f, "set rf_passband antenna spectrum file 1 on")?;
    if entry.rf == CalScheme::Baseline {
        writeln!(f, "set rf baseline on")?;
        writeln!(f, "set amplitude baseline relative")?;
    }
    writeln!(f, "set drop 0.00000001 0.00000001")?;
    writeln!(f, "!")?;
    writeln!(f, "file in {}", entry.file)?;
    Ok(())
}

#[derive(Error, Debug)]
pub(crate) enum ClicError {
    #[error("No setup named {name} in the setups file. Known setups are: {valid}")]
    UnknownSetup { name: String, valid: String },

    #[error("A setup must name exactly two sources; found {found}")]
    NotTwoSources { found: usize },

    #[error("Couldn't read the setups file {path}: {message}")]
    ReadSetups { path: String, message: String },

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
