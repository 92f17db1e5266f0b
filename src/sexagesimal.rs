// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Code for handling conversion to and from sexagesimal.
 */

use marlu::RADec;
use thiserror::Error;

/// Convert "hours minutes seconds" to a float \[degrees\].
pub fn sexagesimal_hms_to_degrees(h: f64, m: f64, s: f64) -> f64 {
    15.0 * (h + m / 60.0 + s / 3600.0)
}

/// Convert "degrees minutes seconds" to a float \[degrees\]. The sign is
/// supplied separately from the degrees, because a declination like
/// "-00 30 00" has degrees of (negative) zero, and the minutes and seconds
/// still need to be negated.
pub fn sexagesimal_dms_to_degrees(negative: bool, d: f64, m: f64, s: f64) -> f64 {
    let num = d.abs() + m / 60.0 + s / 3600.0;
    if negative {
        -num
    } else {
        num
    }
}

/// Does this sexagesimal degrees field carry a negative sign? This is true for
/// "-00".
pub fn has_negative_sign(degrees_field: &str) -> bool {
    degrees_field.trim_start().starts_with('-')
}

fn split_colon_str(s: &str) -> Result<[f64; 3], SexagesimalError> {
    let mut split = Vec::with_capacity(3);
    for elem in s.split(':') {
        let f: f64 = elem
            .trim()
            .parse()
            .map_err(|_| SexagesimalError::ParseFloat(s.to_string()))?;
        if !f.is_finite() {
            return Err(SexagesimalError::ParseFloat(s.to_string()));
        }
        split.push(f);
    }
    match split.as_slice() {
        [a, b, c] => Ok([*a, *b, *c]),
        _ => Err(SexagesimalError::WrongFieldCount(s.to_string())),
    }
}

/// Parse a pair of colon-delimited sexagesimal strings, e.g.
/// "12:30:49.42 +12:23:28.0", as an RA (hours) and Dec (degrees).
///
/// # Examples
///
/// ```
/// # use fringe_finder::sexagesimal::*;
/// # use approx::*;
/// # fn main() -> Result<(), SexagesimalError> {
/// let radec = parse_radec_colon_str("12:30:49.42 +12:23:28.0")?;
/// assert_abs_diff_eq!(radec.ra.to_degrees(), 187.705917, epsilon = 1e-6);
/// assert_abs_diff_eq!(radec.dec.to_degrees(), 12.391111, epsilon = 1e-6);
/// # Ok(())
/// # }
/// ```
pub fn parse_radec_colon_str(s: &str) -> Result<RADec, SexagesimalError> {
    let mut split = s.split_whitespace();
    let (ra_str, dec_str) = match (split.next(), split.next(), split.next()) {
        (Some(ra), Some(dec), None) => (ra, dec),
        _ => return Err(SexagesimalError::NotAPair(s.to_string())),
    };

    let [h, m, sec] = split_colon_str(ra_str)?;
    if !(0.0..24.0).contains(&h) || !(0.0..60.0).contains(&m) || !(0.0..60.0).contains(&sec) {
        return Err(SexagesimalError::OutOfRange(ra_str.to_string()));
    }
    let [d, m, sec] = split_colon_str(dec_str)?;
    let dec = sexagesimal_dms_to_degrees(has_negative_sign(dec_str), d, m, sec);
    if !(0.0..60.0).contains(&m) || !(0.0..60.0).contains(&sec) || dec.abs() > 90.0 {
        return Err(SexagesimalError::OutOfRange(dec_str.to_string()));
    }

    Ok(RADec::from_degrees(sexagesimal_hms_to_degrees(h, m, sec), dec))
}

/// Convert a number in degrees to a colon-delimited sexagesimal string in
/// "hours minutes seconds", e.g. "12:30:49.4230".
pub fn degrees_to_sexagesimal_hms(f: f64) -> String {
    // Work in units of 1e-4 seconds so that rounding carries properly.
    const SCALE: f64 = 1e4;
    let total = (f.rem_euclid(360.0) / 15.0 * 3600.0 * SCALE).round() as u64;
    let total = total % (24 * 3600 * SCALE as u64);
    let frac = total % SCALE as u64;
    let seconds = total / SCALE as u64;
    format!(
        "{:02}:{:02}:{:02}.{:04}",
        seconds / 3600,
        (seconds / 60) % 60,
        seconds % 60,
        frac
    )
}

/// Convert a number in degrees to a colon-delimited sexagesimal string in
/// "degrees minutes seconds" with an explicit sign, e.g. "-00:30:00.000".
pub fn degrees_to_sexagesimal_dms(f: f64) -> String {
    const SCALE: f64 = 1e3;
    let total = (f.abs() * 3600.0 * SCALE).round() as u64;
    let frac = total % SCALE as u64;
    let seconds = total / SCALE as u64;
    format!(
        "{}{:02}:{:02}:{:02}.{:03}",
        if f < 0.0 && total > 0 { '-' } else { '+' },
        seconds / 3600,
        (seconds / 60) % 60,
        seconds % 60,
        frac
    )
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SexagesimalError {
    /// Three numbers (fields) are expected; this error is used when the number
    /// of fields is not three.
    #[error("Did not get three sexagesimal fields: {0}")]
    WrongFieldCount(String),

    #[error("Expected an RA and Dec separated by whitespace, e.g. \"12:30:49.4 +12:23:28\", but got '{0}'")]
    NotAPair(String),

    #[error("Couldn't parse the sexagesimal string '{0}' as numbers")]
    ParseFloat(String),

    #[error("The sexagesimal string '{0}' is out of range")]
    OutOfRange(String),
}
