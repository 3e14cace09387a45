// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests against the prepare-merge command-line interface.

use crate::{get_cmd_output, make_project_area, noema_combine};

#[test]
fn test_dry_run_prints_the_class_script() {
    let area = make_project_area();

    #[rustfmt::skip]
    let cmd = noema_combine()
        .args([
            "prepare-merge",
            "--settings", &area.settings_arg(),
            "--source", "B5",
            "--line", "N2Hp",
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_ok(), "prepare-merge failed: {}", cmd.err().unwrap());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");

    // Reduced spectrum in, window-tagged spectrum out.
    assert!(stdout.contains("30m/B5_N2Hp_1-0.30m"), "{stdout}");
    assert!(stdout.contains("30m/B5_N2Hp_1-0_L09.30m"), "{stdout}");
    // Beam-efficiency correction and resampling onto the uv-table grid.
    assert!(stdout.contains("modify beam_eff /ruze"), "{stdout}");
    assert!(
        stdout.contains("source /like"),
        "{stdout}"
    );
    assert!(stdout.contains("D/L09/B5_N2Hp_1-0_L09.uvt"), "{stdout}");
    // Products are staged per window.
    assert!(stdout.contains("D30m/L09"), "{stdout}");
}

#[test]
fn test_unknown_line_lists_the_catalogue() {
    let area = make_project_area();

    #[rustfmt::skip]
    let cmd = noema_combine()
        .args([
            "prepare-merge",
            "--settings", &area.settings_arg(),
            "--source", "B5",
            "--line", "XYZ",
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("XYZ not found"), "{stderr}");
    assert!(stderr.contains("N2Hp"), "{stderr}");
    assert!(stderr.contains("CCH"), "{stderr}");
}

#[test]
fn test_missing_settings_file_is_an_error() {
    // No --settings and no noema_combine.toml in the working directory.
    let empty = tempfile::TempDir::new().expect("couldn't make tmp dir");

    #[rustfmt::skip]
    let cmd = noema_combine()
        .current_dir(empty.path())
        .args([
            "prepare-merge",
            "--source", "B5",
            "--line", "N2Hp",
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("Settings file not found"), "{stderr}");
    assert!(stderr.contains("noema_combine.toml"), "{stderr}");
}
