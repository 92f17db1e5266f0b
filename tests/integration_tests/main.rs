// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests.
//!
//! Some help for laying out these tests was taken from:
//! https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

mod elevation;
mod select;
mod stations;

use std::{fs::File, io::BufReader, path::Path, process::Output, str::from_utf8};

use assert_cmd::{output::OutputError, Command};
use serde::de::DeserializeOwned;

const STATIONS_FILE: &str = "test_files/station_location.txt";
const CATALOGUE_FILE: &str = "test_files/rfc_test_cat.txt";
const START: &str = "2020-06-01 00:00";

fn fringe_finder() -> Command {
    Command::cargo_bin("fringe-finder").unwrap()
}

fn get_cmd_output(result: Result<Output, OutputError>) -> (String, String) {
    let output = match result {
        Ok(o) => o,
        Err(o) => o.as_output().unwrap().clone(),
    };
    (
        from_utf8(&output.stdout).unwrap().to_string(),
        from_utf8(&output.stderr).unwrap().to_string(),
    )
}

fn read_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> T {
    let f = File::open(path).expect("output file exists");
    serde_json::from_reader(BufReader::new(f)).expect("output is valid json")
}
