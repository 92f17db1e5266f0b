// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::io::{Cursor, Write};

use approx::assert_abs_diff_eq;
use indoc::indoc;

use super::*;

const CATALOGUE: &str = indoc! {"
    # Cal J2000      IVS       RA           Dec            Errors          #Obs S-band     C-band     X-band     U-band      K-band
    Y J1230+1223 1228+126 12 30 49.423382 +12 23 28.04366 0.05 0.06 -0.01 1234 <0.05 2.50 1.20 3.10 0.80 2.20 -1.00 -1.00 <0.10 0.5
    N J0001-0030 2358-007 00 01 00.000000 -00 30 00.00000 0.10 0.10  0.02   12  0.40 0.60 0.50 0.70 0.60 0.80 -1.00 -1.00 -1.00 -1.00

    C J2359+8000 2356+797 23 59 00.000000 +80 00 00.00000 0.10 0.10  0.02   56  1.00 1.00 1.00 1.00 1.00 1.00  1.00  1.00  1.00  1.00 extra
"};

fn parse(band: Band, min_flux: f64) -> Vec<Source> {
    parse_catalogue(&mut Cursor::new(CATALOGUE), band, min_flux).unwrap()
}

#[test]
fn test_parse_catalogue() {
    let sources = parse(Band::S, 0.0);
    assert_eq!(sources.len(), 3);

    let s = &sources[0];
    assert_eq!(s.name, "J1230+1223");
    assert_eq!(s.ivs_name, "1228+126");
    assert!(s.calibrator);
    assert_eq!(s.num_obs, 1234);
    assert_abs_diff_eq!(s.radec.ra.to_degrees(), 187.7059307583, epsilon = 1e-9);
    assert_abs_diff_eq!(s.radec.dec.to_degrees(), 12.3911232389, epsilon = 1e-9);

    // Upper limits are zero.
    assert_abs_diff_eq!(s.flux(Band::S).resolved, 0.0);
    assert_abs_diff_eq!(s.flux(Band::S).unresolved, 2.5);
    assert_abs_diff_eq!(s.flux(Band::X).unresolved, 2.2);
    // As are missing measurements.
    assert_eq!(s.flux(Band::U), Flux::default());
    assert_abs_diff_eq!(s.flux(Band::K).resolved, 0.0);
    assert_abs_diff_eq!(s.flux(Band::K).unresolved, 0.5);

    // Only "Y" means calibrator.
    assert!(!sources[1].calibrator);
    assert!(!sources[2].calibrator);
}

#[test]
fn test_negative_zero_dec() {
    let sources = parse(Band::S, 0.0);
    let s = &sources[1];
    assert_abs_diff_eq!(s.radec.dec.to_degrees(), -0.5, epsilon = 1e-10);
    assert_abs_diff_eq!(s.radec.ra.to_degrees(), 0.25, epsilon = 1e-10);
}

#[test]
fn test_upper_limit_flux() {
    let contents = "Y J0000+0000 0000+000 00 00 00 +00 00 00 0 0 0 1 <0.05 <0.05 <0.05 <0.05 <0.05 <0.05 <0.05 <0.05 <0.05 <0.05\n";
    let sources = parse_catalogue(&mut Cursor::new(contents), Band::C, 0.0).unwrap();
    assert_eq!(sources.len(), 1);
    for (_, flux) in sources[0].iter_fluxes() {
        assert_eq!(flux, Flux::default());
    }
}

#[test]
fn test_zero_flux_is_never_negative() {
    let contents = indoc! {"
        Y J0000+0000 0000+000 00 00 00 +00 00 00 0 0 0 1 -0.00 -0.00 -0.00 -0.00 -0.00 -0.00 -0.00 -0.00 -0.00 -0.00
        Y J0100+0000 0100+000 01 00 00 +00 00 00 0 0 0 1 0.00 0.00 0.00 0.00 0.00 0.00 0.00 0.00 0.00 0.00
        Y J0200+0000 0200+000 02 00 00 +00 00 00 0 0 0 1 -0.00 -0.00 -0.00 -0.00 -0.00 -0.00 -0.00 -0.00 -0.00 -0.00
    "};
    let sources = parse_catalogue(&mut Cursor::new(contents), Band::X, 0.0).unwrap();
    assert_eq!(sources.len(), 3);
    for source in &sources {
        for (_, flux) in source.iter_fluxes() {
            assert!(flux.resolved.is_sign_positive());
            assert!(flux.unresolved.is_sign_positive());
        }
    }

    // All zeros are equal, so ranking keeps the catalogue order.
    let ranked = crate::selection::rank(sources.iter().collect(), Band::X);
    let names: Vec<&str> = ranked.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["J0000+0000", "J0100+0000", "J0200+0000"]);
}

#[test]
fn test_min_flux_filter_at_load() {
    // The second source has 0.8 Jy unresolved at X band.
    let sources = parse(Band::X, 1.0);
    assert_eq!(sources.len(), 2);
    assert!(sources.iter().all(|s| s.name != "J0001-0030"));
    // Equal to the threshold is kept.
    assert!(find_source(&sources, "J2359+8000").is_some());

    let sources = parse(Band::X, 0.8);
    assert_eq!(sources.len(), 3);

    // Nothing is bright enough at U band.
    let sources = parse(Band::U, 1.5);
    assert!(sources.is_empty());
}

#[test]
fn test_find_source() {
    let sources = parse(Band::S, 0.0);
    assert_eq!(
        find_source(&sources, "j1230+1223").map(|s| s.name.as_str()),
        Some("J1230+1223")
    );
    assert_eq!(
        find_source(&sources, "2358-007").map(|s| s.name.as_str()),
        Some("J0001-0030")
    );
    assert!(find_source(&sources, "J9999+9999").is_none());
}

#[test]
fn test_too_few_fields() {
    let contents = "Y J0000+0000 0000+000 00 00 00 +00 00 00 0 0 0 1 1 1 1 1 1 1 1 1 1\n";
    let result = parse_catalogue(&mut Cursor::new(contents), Band::C, 0.0);
    assert!(matches!(
        result,
        Err(ReadCatalogueError::Parse(CatalogueParseError::TooFewFields {
            line_num: 1,
            expected: 23,
            got: 22
        }))
    ));
}

#[test]
fn test_bad_numbers() {
    let contents = "\n# comment\nY J0000+0000 0000+000 00 00 00 +00 00 00 0 0 0 1 1 1 abc 1 1 1 1 1 1 1\n";
    let result = parse_catalogue(&mut Cursor::new(contents), Band::C, 0.0);
    match result {
        Err(ReadCatalogueError::Parse(CatalogueParseError::ParseNumber {
            line_num,
            column,
            string,
        })) => {
            assert_eq!(line_num, 3);
            assert_eq!(column, "C-band resolved flux density");
            assert_eq!(string, "abc");
        }
        _ => panic!("Unexpected result: {result:?}"),
    }

    let contents = "Y J0000+0000 0000+000 00 00 00 +00 00 00 0 0 0 many 1 1 1 1 1 1 1 1 1 1\n";
    let result = parse_catalogue(&mut Cursor::new(contents), Band::C, 0.0);
    assert!(matches!(
        result,
        Err(ReadCatalogueError::Parse(CatalogueParseError::ParseNumber {
            column: "number of observations",
            ..
        }))
    ));

    let contents = "Y J0000+0000 0000+000 00 00 00 +00 00 00 0 0 0 1 1 1 1 1 1 1 1 1 1 NaN\n";
    let result = parse_catalogue(&mut Cursor::new(contents), Band::C, 0.0);
    assert!(matches!(
        result,
        Err(ReadCatalogueError::Parse(CatalogueParseError::ParseNumber { .. }))
    ));
}

#[test]
fn test_invalid_coordinates() {
    let contents = "Y J0000+0000 0000+000 24 00 00 +00 00 00 0 0 0 1 1 1 1 1 1 1 1 1 1 1\n";
    let result = parse_catalogue(&mut Cursor::new(contents), Band::C, 0.0);
    assert!(matches!(
        result,
        Err(ReadCatalogueError::Parse(CatalogueParseError::InvalidRa { .. }))
    ));

    let contents = "Y J0000+0000 0000+000 00 00 00 +90 00 01 0 0 0 1 1 1 1 1 1 1 1 1 1 1\n";
    let result = parse_catalogue(&mut Cursor::new(contents), Band::C, 0.0);
    match result {
        Err(ReadCatalogueError::Parse(CatalogueParseError::InvalidDec { line_num, string })) => {
            assert_eq!(line_num, 1);
            assert_eq!(string, "+90 00 01");
        }
        _ => panic!("Unexpected result: {result:?}"),
    }

    let contents = "Y J0000+0000 0000+000 00 00 00 -10 60 00 0 0 0 1 1 1 1 1 1 1 1 1 1 1\n";
    let result = parse_catalogue(&mut Cursor::new(contents), Band::C, 0.0);
    assert!(matches!(
        result,
        Err(ReadCatalogueError::Parse(CatalogueParseError::InvalidDec { .. }))
    ));
}

#[test]
fn test_duplicate_source() {
    // The duplicate is detected even when the first row is filtered out.
    let contents = indoc! {"
        Y J0000+0000 0000+000 00 00 00 +00 00 00 0 0 0 1 0 0 0 0 0 0 0 0 0 0
        Y J0000+0000 0000+001 00 00 00 +00 00 00 0 0 0 1 5 5 5 5 5 5 5 5 5 5
    "};
    let result = parse_catalogue(&mut Cursor::new(contents), Band::C, 1.0);
    match result {
        Err(ReadCatalogueError::Parse(CatalogueParseError::DuplicateSource { line_num, name })) => {
            assert_eq!(line_num, 2);
            assert_eq!(name, "J0000+0000");
        }
        _ => panic!("Unexpected result: {result:?}"),
    }
}

#[test]
fn test_read_catalogue_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CATALOGUE.as_bytes()).unwrap();
    file.flush().unwrap();

    let sources = read_catalogue_file(file.path(), Band::X, 1.0).unwrap();
    assert_eq!(sources.len(), 2);

    let result = read_catalogue_file("/does/not/exist.txt", Band::X, 1.0);
    assert!(matches!(result, Err(ReadCatalogueError::Open { .. })));
}
