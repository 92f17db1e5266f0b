// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::{fringe_finder, get_cmd_output, STATIONS_FILE};

#[test]
fn test_list_stations() {
    let cmd = fringe_finder()
        .args(["stations", "--stations-file", STATIONS_FILE])
        .ok();
    assert!(cmd.is_ok(), "stations failed: {}", cmd.err().unwrap());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
    assert!(stdout.contains("16 stations"), "{stdout}");
    assert!(stdout.contains("Jodrell Bank Mk2"), "{stdout}");
    assert!(stdout.contains("VLBA-MK"), "{stdout}");
}

#[test]
fn test_list_stations_with_a_band() {
    let cmd = fringe_finder()
        .args(["stations", "--stations-file", STATIONS_FILE, "--band", "1.3cm"])
        .ok();
    assert!(cmd.is_ok(), "stations failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("8 of 16 stations"), "{stdout}");
    assert!(stdout.contains("Effelsberg"), "{stdout}");
    assert!(!stdout.contains("Medicina"), "{stdout}");
}

#[test]
fn test_missing_registry() {
    fringe_finder()
        .args(["stations", "--stations-file", "does_not_exist.txt"])
        .assert()
        .code(5);
}
