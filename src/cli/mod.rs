// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Command-line interface code. More specific options for `noema-combine`
//! subcommands are contained in modules.
//!
//! All booleans must have `#[serde(default)]` annotated, and anything that
//! isn't a boolean must be optional. This allows all arguments to be optional
//! *and* usable in an arguments file.
//!
//! Only 3 things should be public in this module: `NoemaCombine`,
//! `NoemaCombine::run`, and `NoemaError`.

#[macro_use]
mod common;
mod catalogues;
mod clic;
mod error;
mod make_uvt;
mod prepare_merge;
mod reduce_30m;

pub(crate) use common::Warn;
pub use error::NoemaError;

use std::path::{Path, PathBuf};

use clap::{AppSettings, Args, Parser, Subcommand};
use log::info;

// Add build-time information from the "built" crate.
include!(concat!(env!("OUT_DIR"), "/built.rs"));

#[derive(Debug, Parser)]
#[clap(
    name = "noema-combine",
    version,
    about = r#"Reduction driver for combining IRAM 30-m and NOEMA spectral-line observations.
The signal processing is done by an external GILDAS installation (CLASS,
MAPPING and CLIC); this program resolves catalogue parameters, generates the
command scripts and keeps the tree of data products consistent."#
)]
#[clap(global_setting(AppSettings::DeriveDisplayOrder))]
#[clap(disable_help_subcommand = true)]
#[clap(infer_subcommands = true)]
#[clap(propagate_version = true)]
#[clap(infer_long_args = true)]
pub struct NoemaCombine {
    #[clap(flatten)]
    global_opts: GlobalArgs,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct GlobalArgs {
    /// Path to the settings file describing the catalogues and product
    /// folders. The default is noema_combine.toml in the working directory.
    #[clap(long)]
    #[clap(global = true)]
    settings: Option<PathBuf>,

    /// The verbosity of the program. Increase by specifying multiple times
    /// (e.g. -vv). The default is to print only high-level information.
    #[clap(short, long, parse(from_occurrences))]
    #[clap(global = true)]
    verbosity: u8,

    /// Resolve all arguments and catalogue entries and print the scripts
    /// that would run, without touching data or starting an interpreter.
    #[clap(long)]
    #[clap(global = true)]
    dry_run: bool,

    /// Save the input arguments into a new TOML file that can be used to
    /// reproduce this run. Only subcommands that take an arguments file
    /// support this.
    #[clap(long)]
    #[clap(global = true)]
    save_toml: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
#[clap(arg_required_else_help = true)]
enum Command {
    #[clap(name = "reduce-30m")]
    #[clap(alias = "reduce")]
    #[clap(
        about = "Reduce raw 30-m observations into per-line spectra, tables and cubes."
    )]
    Reduce30m(reduce_30m::Reduce30mArgs),

    #[clap(name = "make-uvt")]
    #[clap(about = "Cut a line's velocity range out of a spectral-window uv-table.")]
    MakeUvt(make_uvt::MakeUvtArgs),

    #[clap(name = "prepare-merge")]
    #[clap(
        about = "Resample a reduced 30-m spectrum onto its uv-table grid and stage both for merging."
    )]
    PrepareMerge(prepare_merge::PrepareMergeArgs),

    #[clap(name = "make-clic")]
    #[clap(about = "Generate CLIC command files that build the spectral-window uv-tables.")]
    MakeClic(clic::MakeClicArgs),

    #[clap(name = "verify-catalogues")]
    #[clap(about = "Check that the configured catalogues parse, and report their contents.")]
    VerifyCatalogues(catalogues::VerifyCataloguesArgs),
}

impl NoemaCombine {
    pub fn run(self) -> Result<(), NoemaError> {
        // Set up logging.
        let GlobalArgs {
            settings,
            verbosity,
            dry_run,
            save_toml,
        } = self.global_opts;
        setup_logging(verbosity).expect("Failed to initialise logging.");

        // Print the version of noema-combine and its build-time information.
        let sub_command = match &self.command {
            Command::Reduce30m(_) => "reduce-30m",
            Command::MakeUvt(_) => "make-uvt",
            Command::PrepareMerge(_) => "prepare-merge",
            Command::MakeClic(_) => "make-clic",
            Command::VerifyCatalogues(_) => "verify-catalogues",
        };
        info!("noema-combine {} {}", sub_command, env!("CARGO_PKG_VERSION"));
        display_build_info();

        macro_rules! merge_save_run {
            ($args:expr) => {{
                let args = $args.merge()?;
                if let Some(toml) = save_toml {
                    use std::{
                        fs::File,
                        io::{BufWriter, Write},
                    };

                    let mut f = BufWriter::new(File::create(toml)?);
                    let toml_str = toml::to_string(&args).expect("toml serialisation error");
                    f.write_all(toml_str.as_bytes())?;
                }
                args.run(settings.as_deref(), dry_run)?;
            }};
        }

        match self.command {
            Command::Reduce30m(args) => {
                merge_save_run!(args)
            }

            Command::MakeUvt(args) => {
                merge_save_run!(args)
            }

            Command::PrepareMerge(args) => {
                merge_save_run!(args)
            }

            Command::MakeClic(args) => {
                reject_save_toml(sub_command, save_toml.as_deref())?;
                args.run(dry_run)?
            }

            Command::VerifyCatalogues(args) => {
                reject_save_toml(sub_command, save_toml.as_deref())?;
                args.run(settings.as_deref())?
            }
        }

        info!("noema-combine {} complete.", sub_command);
        Ok(())
    }
}

/// `--save-toml` only makes sense for subcommands that take an arguments
/// file; elsewhere it would be silently ignored, so refuse it instead.
fn reject_save_toml(sub_command: &str, save_toml: Option<&Path>) -> Result<(), NoemaError> {
    match save_toml {
        Some(_) => Err(NoemaError::Generic(format!(
            "{sub_command} doesn't support --save-toml"
        ))),
        None => Ok(()),
    }
}

/// Activate a logger. All log messages are put onto `stdout`. `env_logger`
/// automatically only uses colours and fancy symbols if we're on a tty (e.g. a
/// terminal); piped output will be formatted sensibly. Source code lines are
/// displayed in log messages when verbosity >= 3.
fn setup_logging(verbosity: u8) -> Result<(), log::SetLoggerError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.target(env_logger::Target::Stdout);
    builder.format_target(false);
    match verbosity {
        0 => builder.filter_level(log::LevelFilter::Info),
        1 => builder.filter_level(log::LevelFilter::Debug),
        2 => builder.filter_level(log::LevelFilter::Trace),
        _ => {
            builder.filter_level(log::LevelFilter::Trace);
            builder.format(|buf, record| {
                use std::io::Write;

                let timestamp = buf.timestamp();
                let level = record.level();
                let target = record.target();
                let line = record.line().unwrap_or(0);
                let message = record.args();

                writeln!(buf, "[{timestamp} {level} {target}:{line}] {message}")
            })
        }
    };
    builder.init();

    Ok(())
}

/// Write many info-level log lines of how this executable was compiled.
fn display_build_info() {
    let dirty = match GIT_DIRTY {
        Some(true) => " (dirty)",
        _ => "",
    };
    match GIT_COMMIT_HASH_SHORT {
        Some(hash) => {
            info!("Compiled on git commit hash: {hash}{dirty}");
        }
        None => info!("Compiled on git commit hash: <no git info>"),
    }
    if let Some(hr) = GIT_HEAD_REF {
        info!("            git head ref: {}", hr);
    }
    info!("            {}", BUILT_TIME_UTC);
    info!("         with compiler {}", RUSTC_VERSION);
    info!("");
}
