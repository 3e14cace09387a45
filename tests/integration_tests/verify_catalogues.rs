// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests against the verify-catalogues command-line interface.

use crate::{get_cmd_output, make_project_area, noema_combine};

#[test]
fn test_the_catalogues_are_reported() {
    let area = make_project_area();

    #[rustfmt::skip]
    let cmd = noema_combine()
        .args([
            "verify-catalogues",
            "--settings", &area.settings_arg(),
        ])
        .ok();
    assert!(cmd.is_ok(), "verify-catalogues failed: {}", cmd.err().unwrap());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");

    assert!(stdout.contains("2 sources"), "{stdout}");
    assert!(stdout.contains("CLOUDH: CLOUDH* -> CloudH, vlsr 10.2 km/s"), "{stdout}");
    assert!(stdout.contains("3 transitions of 2 molecules"), "{stdout}");
    assert!(stdout.contains("N2Hp 1-0 at 93173.3977 MHz (window L09)"), "{stdout}");
}

#[test]
fn test_save_toml_is_refused() {
    let area = make_project_area();

    #[rustfmt::skip]
    let cmd = noema_combine()
        .args([
            "verify-catalogues",
            "--settings", &area.settings_arg(),
            "--save-toml", "args.toml",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(
        stderr.contains("verify-catalogues doesn't support --save-toml"),
        "{stderr}"
    );
}

#[test]
fn test_a_broken_catalogue_is_reported() {
    let area = make_project_area();
    // Drop a field from the second record.
    std::fs::write(
        area.path().join("lines.csv"),
        "N2Hp, 1-0, 93.1733977, N2H+(1-0), 1-0, 3mm, -, -, -, L09, 3.0, -, -, 15.0, 30.0\n\
         CCH, 32-12, 87.3168980, CCH(1-0), J=3/2-1/2, 3mm, -, -, -, L03, 3.0, -, -, 15.0\n",
    )
    .unwrap();

    #[rustfmt::skip]
    let cmd = noema_combine()
        .args([
            "verify-catalogues",
            "--settings", &area.settings_arg(),
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(
        stderr.contains("record 2: expected 15 comma-separated fields, found 14"),
        "{stderr}"
    );
}
