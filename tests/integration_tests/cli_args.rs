// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests against the top-level command-line interface.

use crate::{get_cmd_output, noema_combine};

#[test]
fn test_help_is_correct() {
    let mut stdouts = vec![];

    // First with --help
    let cmd = noema_combine().arg("--help").ok();
    assert!(cmd.is_ok());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty());
    stdouts.push(stdout);

    // Then with -h
    let cmd = noema_combine().arg("-h").ok();
    assert!(cmd.is_ok());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty());
    stdouts.push(stdout);

    for stdout in stdouts {
        assert!(stdout.contains("reduce-30m"));
        assert!(stdout.contains("make-uvt"));
        assert!(stdout.contains("prepare-merge"));
        assert!(stdout.contains("make-clic"));
        assert!(stdout.contains("verify-catalogues"));
    }
}

#[test]
fn test_reduce_30m_help_is_correct() {
    let cmd = noema_combine().args(["reduce-30m", "--help"]).ok();
    assert!(cmd.is_ok());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty());

    // The defaults are advertised.
    assert!(stdout.contains("Default: CLOUDH"), "{stdout}");
    assert!(stdout.contains("Default: N2Hp"), "{stdout}");
    // The argument-file formats are correctly specified.
    assert!(stdout.contains("Supported formats: toml, json"), "{stdout}");
}

#[test]
fn test_version_is_the_crate_version() {
    let cmd = noema_combine().arg("--version").ok();
    assert!(cmd.is_ok());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty());
    assert_eq!(
        stdout.trim(),
        format!("noema-combine {}", env!("CARGO_PKG_VERSION"))
    );
}
