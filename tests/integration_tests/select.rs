// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::{collections::HashSet, fs::File, io::Write};

use indoc::indoc;
use tempfile::TempDir;

use fringe_finder::report::CandidateRecord;

use crate::{fringe_finder, get_cmd_output, read_json, CATALOGUE_FILE, START, STATIONS_FILE};

fn names(records: &[CandidateRecord]) -> Vec<&str> {
    records.iter().map(|r| r.name.as_str()).collect()
}

#[test]
fn test_select_single_station() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("candidates.json");

    #[rustfmt::skip]
    let cmd = fringe_finder()
        .args([
            "select", START, "24", "EF",
            "-b", "x",
            "--stations-file", STATIONS_FILE,
            "--catalogue", CATALOGUE_FILE,
            "-o", &format!("{}", output.display()),
            "--no-progress-bars",
        ])
        .ok();
    assert!(cmd.is_ok(), "select failed: {}", cmd.err().unwrap());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
    assert!(stdout.contains("J0319+4130"), "{stdout}");

    let records: Vec<CandidateRecord> = read_json(&output);
    // The southern J0538-4405 never rises at Effelsberg, and only the 10
    // brightest of the rest are reported.
    assert_eq!(
        names(&records),
        [
            "J0319+4130",
            "J1256-0547",
            "J1229+0203",
            "J2253+1608",
            "J0927+3902",
            "J1642+3948",
            "J1337-1257",
            "J1800+7828",
            "J2148+0657",
            "J0555+3948",
        ]
    );
    assert_eq!(
        records.iter().map(|r| r.rank).collect::<Vec<_>>(),
        (1..=10).collect::<Vec<_>>()
    );
    assert!(records
        .windows(2)
        .all(|w| w[0].unresolved_flux >= w[1].unresolved_flux));
}

#[test]
fn test_select_needs_every_station() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("candidates.yaml");

    #[rustfmt::skip]
    let cmd = fringe_finder()
        .args([
            "select", START, "24", "EF", "PA",
            "--band", "x",
            "--stations-file", STATIONS_FILE,
            "--catalogue", CATALOGUE_FILE,
            "-n", "20",
            "-o", &format!("{}", output.display()),
            "--no-progress-bars",
        ])
        .ok();
    assert!(cmd.is_ok(), "select failed: {}", cmd.err().unwrap());

    let records: Vec<CandidateRecord> =
        serde_yaml::from_reader(File::open(&output).unwrap()).unwrap();
    // Parkes can't see the far north, and Effelsberg can't see the far south.
    assert_eq!(
        names(&records),
        [
            "J0319+4130",
            "J1256-0547",
            "J1229+0203",
            "J2253+1608",
            "J0927+3902",
            "J1642+3948",
            "J1337-1257",
            "J2148+0657",
            "J0555+3948",
        ]
    );
}

#[test]
fn test_simultaneous_is_a_subset() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let ever = tmp_dir.path().join("ever.json");
    let simultaneous = tmp_dir.path().join("simultaneous.json");

    for (output, extra) in [(&ever, None), (&simultaneous, Some("--simultaneous"))] {
        let mut cmd = fringe_finder();
        #[rustfmt::skip]
        let cmd = cmd.args([
            "select", START, "12", "EF", "PA",
            "-b", "c",
            "--stations-file", STATIONS_FILE,
            "--catalogue", CATALOGUE_FILE,
            "-n", "20",
            "-o", &format!("{}", output.display()),
            "--no-progress-bars",
        ]);
        if let Some(extra) = extra {
            cmd.arg(extra);
        }
        let result = cmd.ok();
        assert!(result.is_ok(), "select failed: {}", result.err().unwrap());
    }

    let ever: Vec<CandidateRecord> = read_json(&ever);
    let simultaneous: Vec<CandidateRecord> = read_json(&simultaneous);
    let ever_names = names(&ever).into_iter().collect::<HashSet<_>>();
    assert!(simultaneous.len() <= ever.len());
    for name in names(&simultaneous) {
        assert!(ever_names.contains(name), "{name} isn't in {ever_names:?}");
    }
}

#[test]
fn test_networks() {
    #[rustfmt::skip]
    let cmd = fringe_finder()
        .args([
            "select", START, "6",
            "--network", "e-EVN",
            "-b", "l",
            "--stations-file", STATIONS_FILE,
            "--catalogue", CATALOGUE_FILE,
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_ok(), "select failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(
        stdout.contains("Stations: EF MC ON TR JB2 WB NT SH YS HH IR"),
        "{stdout}"
    );
}

#[test]
fn test_dry_run_writes_nothing() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("candidates.json");

    #[rustfmt::skip]
    let cmd = fringe_finder()
        .args([
            "select", START, "24", "EF",
            "-b", "x",
            "--stations-file", STATIONS_FILE,
            "--catalogue", CATALOGUE_FILE,
            "-o", &format!("{}", output.display()),
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_ok(), "select failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Dry run"));
    assert!(!output.exists());
}

#[test]
fn test_saved_toml_reproduces_a_run() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let toml = tmp_dir.path().join("args.toml");
    let first = tmp_dir.path().join("first.json");
    let second = tmp_dir.path().join("second.json");

    #[rustfmt::skip]
    let cmd = fringe_finder()
        .args([
            "select", START, "24", "EF", "PA",
            "-b", "u",
            "--stations-file", STATIONS_FILE,
            "--catalogue", CATALOGUE_FILE,
            "--min-flux", "0",
            "-o", &format!("{}", first.display()),
            "--save-toml", &format!("{}", toml.display()),
            "--no-progress-bars",
        ])
        .ok();
    assert!(cmd.is_ok(), "select failed: {}", cmd.err().unwrap());
    assert!(toml.exists());

    #[rustfmt::skip]
    let cmd = fringe_finder()
        .args([
            "select",
            "--args-file", &format!("{}", toml.display()),
            "-o", &format!("{}", second.display()),
            "--no-progress-bars",
        ])
        .ok();
    assert!(cmd.is_ok(), "select failed: {}", cmd.err().unwrap());

    let first: Vec<CandidateRecord> = read_json(&first);
    let second: Vec<CandidateRecord> = read_json(&second);
    assert_eq!(first, second);
    // Nothing has a U-band flux density, so every visible source ties and
    // catalogue order is kept.
    assert_eq!(first[0].name, "J0319+4130");
    assert_eq!(first[1].name, "J1229+0203");
}

#[test]
fn test_unknown_band() {
    #[rustfmt::skip]
    let cmd = fringe_finder()
        .args([
            "select", START, "24", "EF",
            "-b", "z",
            "--stations-file", "does_not_exist.txt",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("Unknown band 'z'"), "{stderr}");

    fringe_finder()
        .args(["select", START, "24", "EF", "-b", "z"])
        .assert()
        .code(3);
}

#[test]
fn test_error_exit_codes() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");

    // Catalogue problems.
    #[rustfmt::skip]
    let result = fringe_finder()
        .args([
            "select", START, "24", "EF", "-b", "x",
            "--stations-file", STATIONS_FILE,
            "--catalogue", "does_not_exist.txt",
        ])
        .assert();
    result.code(4);

    // Registry problems.
    let registry = tmp_dir.path().join("stations.txt");
    let mut f = File::create(&registry).unwrap();
    f.write_all(
        indoc! {"
            station code x y
            Effelsberg EF 4033947.2616 486990.7866
        "}
        .as_bytes(),
    )
    .unwrap();
    drop(f);
    #[rustfmt::skip]
    let result = fringe_finder()
        .args([
            "select", START, "24", "EF", "-b", "x",
            "--stations-file", &format!("{}", registry.display()),
            "--catalogue", CATALOGUE_FILE,
        ])
        .assert();
    result.code(5);

    // Unknown stations.
    #[rustfmt::skip]
    let result = fringe_finder()
        .args([
            "select", START, "24", "EF", "XX", "-b", "x",
            "--stations-file", STATIONS_FILE,
            "--catalogue", CATALOGUE_FILE,
        ])
        .assert();
    result.code(6);

    // Usage errors.
    fringe_finder()
        .args(["select", "--not-an-argument"])
        .assert()
        .code(2);

    // Generic errors.
    #[rustfmt::skip]
    let result = fringe_finder()
        .args([
            "select", START, "24", "-b", "x",
            "--stations-file", STATIONS_FILE,
        ])
        .assert();
    result.code(1);
}
