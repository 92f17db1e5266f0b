// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;
use tempfile::TempDir;

use fringe_finder::report::TraceReport;

use crate::{fringe_finder, get_cmd_output, read_json, CATALOGUE_FILE, START, STATIONS_FILE};

#[test]
fn test_elevation_of_a_catalogue_source() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("traces.json");

    // Sources can be found by their IVS names.
    #[rustfmt::skip]
    let cmd = fringe_finder()
        .args([
            "elevation", START, "12", "EF", "PA",
            "--source", "1226+023",
            "--stations-file", STATIONS_FILE,
            "--catalogue", CATALOGUE_FILE,
            "-o", &format!("{}", output.display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "elevation failed: {}", cmd.err().unwrap());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
    assert!(stdout.contains("Elevations of J1229+0203"), "{stdout}");

    let report: TraceReport = read_json(&output);
    assert_eq!(report.source, "J1229+0203");
    assert_eq!(report.ra, "12:29:06.6997");
    assert_eq!(report.dec, "+02:03:08.598");
    assert_abs_diff_eq!(report.min_elevation_deg, 10.0);
    assert_eq!(report.timestamps.len(), 61);
    assert_eq!(report.timestamps[0], "2020-06-01 00:00:00");
    assert_eq!(report.timestamps[60], "2020-06-01 12:00:00");
    assert_eq!(
        report
            .traces
            .iter()
            .map(|t| t.station.as_str())
            .collect::<Vec<_>>(),
        ["EF", "PA"]
    );
    for trace in &report.traces {
        assert_eq!(trace.elevations_deg.len(), 61);
        for (el, visible) in trace.elevations_deg.iter().zip(trace.visible.iter()) {
            assert!((-90.0..=90.0).contains(el));
            assert_eq!(*el >= 10.0, *visible);
        }
    }
}

#[test]
fn test_elevation_of_coordinates() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("traces.json");

    // A source at the north celestial pole is always at the station's
    // latitude.
    #[rustfmt::skip]
    let cmd = fringe_finder()
        .args([
            "elevation", START, "2", "EF",
            "--coords", "00:00:00 +90:00:00",
            "--stations-file", STATIONS_FILE,
            "--interval", "0.5",
            "--no-precession",
            "-o", &format!("{}", output.display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "elevation failed: {}", cmd.err().unwrap());

    let report: TraceReport = read_json(&output);
    assert_eq!(report.source, "00:00:00 +90:00:00");
    assert_eq!(report.timestamps.len(), 5);
    for el in &report.traces[0].elevations_deg {
        assert_abs_diff_eq!(*el, 50.5247, epsilon = 1e-3);
    }
}

#[test]
fn test_elevation_errors() {
    // Not in the catalogue.
    #[rustfmt::skip]
    let result = fringe_finder()
        .args([
            "elevation", START, "12", "EF",
            "--source", "J0000+0000",
            "--stations-file", STATIONS_FILE,
            "--catalogue", CATALOGUE_FILE,
        ])
        .assert();
    result.code(4);

    // No source at all.
    #[rustfmt::skip]
    let result = fringe_finder()
        .args([
            "elevation", START, "12", "EF",
            "--stations-file", STATIONS_FILE,
        ])
        .assert();
    result.code(1);

    // Both kinds of source.
    #[rustfmt::skip]
    let result = fringe_finder()
        .args([
            "elevation", START, "12", "EF",
            "--source", "J1229+0203",
            "--coords", "12:29:06.70 +02:03:08.6",
        ])
        .assert();
    result.code(2);

    // Bad coordinates.
    #[rustfmt::skip]
    let result = fringe_finder()
        .args([
            "elevation", START, "12", "EF",
            "--coords", "25:00:00 +02:03:08.6",
            "--stations-file", STATIONS_FILE,
        ])
        .assert();
    result.code(1);
}
