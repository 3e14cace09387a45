// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests against the make-uvt command-line interface.

use crate::{get_cmd_output, make_project_area, noema_combine};

#[test]
fn test_dry_run_prints_the_mapping_script() {
    let area = make_project_area();

    #[rustfmt::skip]
    let cmd = noema_combine()
        .args([
            "make-uvt",
            "--settings", &area.settings_arg(),
            "--source", "B5",
            "--line", "N2Hp",
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_ok(), "make-uvt failed: {}", cmd.err().unwrap());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");

    // Continuum-subtracted window in, per-line table out.
    assert!(stdout.contains("read uv"), "{stdout}");
    assert!(stdout.contains("D/L09/B5_L09_uvsub.uvt"), "{stdout}");
    assert!(stdout.contains("uv_extract /range 7.20  13.20 velocity"), "{stdout}");
    assert!(stdout.contains("write uv"), "{stdout}");
    assert!(stdout.contains("D/L09/B5_N2Hp_1-0_L09.uvt"), "{stdout}");
}

#[test]
fn test_window_table_flavour_flags() {
    let area = make_project_area();

    #[rustfmt::skip]
    let cmd = noema_combine()
        .args([
            "make-uvt",
            "--settings", &area.settings_arg(),
            "--source", "B5",
            "--line", "N2Hp",
            "--no-uvsub",
            "--selfcal",
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_ok(), "make-uvt failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("read uv"), "{stdout}");
    assert!(stdout.contains("D/L09/B5_L09_sc.uvt"), "{stdout}");
    assert!(!stdout.contains("B5_L09_uvsub"), "{stdout}");
}

#[test]
fn test_velocity_range_flags() {
    let area = make_project_area();

    // --dv widens both sides.
    #[rustfmt::skip]
    let cmd = noema_combine()
        .args([
            "make-uvt",
            "--settings", &area.settings_arg(),
            "--source", "B5",
            "--line", "N2Hp",
            "--dv", "5",
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_ok(), "make-uvt failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("/range 5.20  15.20 velocity"), "{stdout}");

    // --dv-min and --dv-max set each side on its own.
    #[rustfmt::skip]
    let cmd = noema_combine()
        .args([
            "make-uvt",
            "--settings", &area.settings_arg(),
            "--source", "B5",
            "--line", "N2Hp",
            "--dv-min", "2",
            "--dv-max", "5",
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_ok(), "make-uvt failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("/range 8.20  15.20 velocity"), "{stdout}");
}

#[test]
fn test_missing_line_is_an_error() {
    let area = make_project_area();

    #[rustfmt::skip]
    let cmd = noema_combine()
        .args([
            "make-uvt",
            "--settings", &area.settings_arg(),
            "--source", "B5",
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("No line was specified"), "{stderr}");
}

#[test]
fn test_ambiguous_line_needs_a_qn() {
    let area = make_project_area();

    #[rustfmt::skip]
    let cmd = noema_combine()
        .args([
            "make-uvt",
            "--settings", &area.settings_arg(),
            "--source", "B5",
            "--line", "CCH",
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("not unique"), "{stderr}");
    assert!(stderr.contains("J=3/2-1/2"), "{stderr}");
    assert!(stderr.contains("J=1/2-1/2"), "{stderr}");

    // Giving the quantum number picks the transition.
    #[rustfmt::skip]
    let cmd = noema_combine()
        .args([
            "make-uvt",
            "--settings", &area.settings_arg(),
            "--source", "B5",
            "--line", "CCH",
            "--qn", "J=3/2-1/2",
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_ok(), "make-uvt failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    // The file name uses the file-safe quantum number, not the label.
    assert!(stdout.contains("D/L03/B5_CCH_32-12_L03.uvt"), "{stdout}");
}

#[test]
fn test_json_arg_file() {
    let area = make_project_area();
    let arg_file = area.path().join("extract.json");
    std::fs::write(&arg_file, "{\"source\": \"B5\", \"line\": \"N2Hp\"}").unwrap();

    #[rustfmt::skip]
    let cmd = noema_combine()
        .args([
            "make-uvt",
            &arg_file.display().to_string(),
            "--settings", &area.settings_arg(),
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_ok(), "make-uvt failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("D/L09/B5_N2Hp_1-0_L09.uvt"), "{stdout}");
}

#[test]
fn test_unrecognised_arg_file_extension() {
    let area = make_project_area();
    let arg_file = area.path().join("extract.yaml");
    std::fs::write(&arg_file, "source: B5").unwrap();

    #[rustfmt::skip]
    let cmd = noema_combine()
        .args([
            "make-uvt",
            &arg_file.display().to_string(),
            "--settings", &area.settings_arg(),
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(
        stderr.contains("Valid extensions are: toml, json"),
        "{stderr}"
    );
}
