// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests against the make-clic command-line interface. Unlike the other
//! subcommands, make-clic writes its products itself, so these tests check
//! real files.

use indoc::indoc;
use tempfile::TempDir;

use crate::{get_cmd_output, noema_combine};

const SETUPS: &str = indoc! {r#"
    receiver: 3
    highres_parameters:
      number_windows: 2
      LI_start: 10
      UI_start: 11
      UO_start: 99
    setups:
      setup001:
        sources: [B5, B5S]
        C-files:
          - file: c1.hpb
            phase calibration type: antenna
            amplitude calibration type: antenna
            RF calibration type: antenna
        D-files:
          - file: d1.hpb
            phase calibration type: baseline
            amplitude calibration type: baseline
            RF calibration type: antenna
"#};

fn write_setups(dir: &TempDir) -> String {
    let path = dir.path().join("setups.yaml");
    std::fs::write(&path, SETUPS).unwrap();
    path.display().to_string()
}

#[test]
fn test_files_land_in_the_outdir() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let setups = write_setups(&tmp_dir);
    let out_dir = tmp_dir.path().join("clic");
    std::fs::create_dir(&out_dir).unwrap();

    #[rustfmt::skip]
    let cmd = noema_combine()
        .args([
            "make-clic", "setup001",
            "--setups", &setups,
            "--outdir", &out_dir.display().to_string(),
        ])
        .ok();
    assert!(cmd.is_ok(), "make-clic failed: {}", cmd.err().unwrap());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
    assert!(stdout.contains("Writing"), "{stdout}");

    // No A-configuration files, so no A or ACD outputs.
    let mut names: Vec<String> = std::fs::read_dir(&out_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    assert_eq!(
        names,
        [
            "setup001-C-uvts.clic",
            "setup001-CD-uvts.clic",
            "setup001-D-uvts.clic"
        ]
    );

    let contents = std::fs::read_to_string(out_dir.join("setup001-CD-uvts.clic")).unwrap();
    assert!(contents.contains("begin procedure makespw"), "{contents}");
    assert!(contents.contains("begin procedure loopspw"), "{contents}");
    // The wideband pairs.
    assert!(
        contents.contains("set selection line lsb l001 and l005"),
        "{contents}"
    );
    // The high-resolution chunks pair across number_windows + 1.
    assert!(
        contents.contains("set selection line lsb l009 and l012"),
        "{contents}"
    );
    // Both observation files are calibrated in this combination, most
    // compact configuration first.
    let c1 = contents.find("file in c1.hpb").unwrap();
    let d1 = contents.find("file in d1.hpb").unwrap();
    assert!(c1 < d1, "{contents}");
    assert_eq!(contents.matches("@ loopspw").count(), 2);
    assert_eq!(contents.matches("let new_file 0").count(), 1);
}

#[test]
fn test_baseline_phase_becomes_a_warning() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let setups = write_setups(&tmp_dir);
    let out_dir = tmp_dir.path().display().to_string();

    #[rustfmt::skip]
    let cmd = noema_combine()
        .args([
            "make-clic", "setup001",
            "--setups", &setups,
            "--outdir", &out_dir,
        ])
        .ok();
    assert!(cmd.is_ok(), "make-clic failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(
        stdout.contains("baseline-based phase calibration isn't available"),
        "{stdout}"
    );

    // The generated file still uses antenna-based phase.
    let contents =
        std::fs::read_to_string(tmp_dir.path().join("setup001-D-uvts.clic")).unwrap();
    assert!(
        contents.contains("set phase antenna atmospher internal relative"),
        "{contents}"
    );
    assert!(contents.contains("set amplitude baseline relative"), "{contents}");
}

#[test]
fn test_dry_run_writes_nothing() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let setups = write_setups(&tmp_dir);
    let out_dir = tmp_dir.path().join("clic");
    std::fs::create_dir(&out_dir).unwrap();

    #[rustfmt::skip]
    let cmd = noema_combine()
        .args([
            "make-clic", "setup001",
            "--setups", &setups,
            "--outdir", &out_dir.display().to_string(),
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_ok(), "make-clic failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Would write"), "{stdout}");
    assert_eq!(std::fs::read_dir(&out_dir).unwrap().count(), 0);
}

#[test]
fn test_the_default_setups_file_is_found_in_the_working_directory() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    std::fs::write(tmp_dir.path().join("clic_setups.yaml"), SETUPS).unwrap();

    let cmd = noema_combine()
        .current_dir(tmp_dir.path())
        .args(["make-clic", "setup001"])
        .ok();
    assert!(cmd.is_ok(), "make-clic failed: {}", cmd.err().unwrap());
    assert!(tmp_dir.path().join("setup001-C-uvts.clic").exists());
}

#[test]
fn test_save_toml_is_refused() {
    // make-clic takes no arguments file, so there is nothing to save.
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let setups = write_setups(&tmp_dir);

    #[rustfmt::skip]
    let cmd = noema_combine()
        .args([
            "make-clic", "setup001",
            "--setups", &setups,
            "--save-toml", "args.toml",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(
        stderr.contains("make-clic doesn't support --save-toml"),
        "{stderr}"
    );
}

#[test]
fn test_unknown_setup_is_an_error() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let setups = write_setups(&tmp_dir);

    #[rustfmt::skip]
    let cmd = noema_combine()
        .args([
            "make-clic", "setup999",
            "--setups", &setups,
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("No setup named setup999"), "{stderr}");
    assert!(stderr.contains("setup001"), "{stderr}");
}
