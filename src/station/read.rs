// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parsing of whitespace-delimited station registries.

use std::{collections::BTreeMap, io::BufRead};

use indexmap::IndexMap;
use log::{log_enabled, trace, Level::Trace};
use marlu::XyzGeocentric;

use super::{MalformedRegistryError, ReadRegistryError, Station};
use crate::constants::{
    MAX_GEOCENTRIC_RADIUS_M, MIN_GEOCENTRIC_RADIUS_M, NO_SEFD_SENTINEL, SEFD_COLUMN_PREFIX,
};

/// Where each column lives in a registry row.
struct Header {
    num_fields: usize,
    station: usize,
    code: usize,
    x: usize,
    y: usize,
    z: usize,
    /// (band label, column index)
    sefds: Vec<(String, usize)>,
}

impl Header {
    fn new(fields: &[String]) -> Result<Header, MalformedRegistryError> {
        let mut names: Vec<String> = Vec::with_capacity(fields.len());
        let mut sefds = vec![];
        for (i, field) in fields.iter().enumerate() {
            let is_sefd = field
                .get(..SEFD_COLUMN_PREFIX.len())
                .map(|p| p.eq_ignore_ascii_case(SEFD_COLUMN_PREFIX))
                .unwrap_or(false);
            if is_sefd {
                let band = &field[SEFD_COLUMN_PREFIX.len()..];
                if band.is_empty() {
                    return Err(MalformedRegistryError::EmptySefdBand(field.clone()));
                }
                if sefds.iter().any(|(b, _)| b == band) {
                    return Err(MalformedRegistryError::DuplicateColumn(field.clone()));
                }
                sefds.push((band.to_string(), i));
            }

            let lower = field.to_lowercase();
            if !is_sefd && names.contains(&lower) {
                return Err(MalformedRegistryError::DuplicateColumn(field.clone()));
            }
            names.push(lower);
        }

        let find = |column: &'static str| -> Result<usize, MalformedRegistryError> {
            names
                .iter()
                .position(|n| n == column)
                .ok_or(MalformedRegistryError::MissingColumn(column))
        };

        Ok(Header {
            num_fields: fields.len(),
            station: find("station")?,
            code: find("code")?,
            x: find("x")?,
            y: find("y")?,
            z: find("z")?,
            sefds,
        })
    }
}

/// Split a line on whitespace. Fields may be surrounded by double quotes to
/// contain whitespace.
pub(super) fn split_fields(line: &str, line_num: u32) -> Result<Vec<String>, MalformedRegistryError> {
    let mut fields = vec![];
    let mut current = String::new();
    let mut in_quotes = false;
    let mut in_field = false;
    for c in line.chars() {
        match c {
            '"' if in_quotes => {
                in_quotes = false;
                fields.push(std::mem::take(&mut current));
                in_field = false;
            }
            '"' if !in_field => {
                in_quotes = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if in_field {
                    fields.push(std::mem::take(&mut current));
                    in_field = false;
                }
            }
            c => {
                current.push(c);
                if !in_quotes {
                    in_field = true;
                }
            }
        }
    }
    if in_quotes {
        return Err(MalformedRegistryError::UnterminatedQuote(line_num));
    }
    if in_field {
        fields.push(current);
    }
    Ok(fields)
}

pub(super) fn parse_registry<T: BufRead>(
    buf: &mut T,
) -> Result<IndexMap<String, Station>, ReadRegistryError> {
    let mut line = String::new();
    let mut line_num: u32 = 0;
    let mut header: Option<Header> = None;
    let mut stations = IndexMap::new();

    while buf.read_line(&mut line)? > 0 {
        line_num += 1;

        // Handle lines that aren't intended to parsed (comments and blank
        // lines).
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            line.clear();
            continue;
        }

        let fields = split_fields(trimmed, line_num)?;
        let h = match header.as_ref() {
            Some(h) => h,
            None => {
                header = Some(Header::new(&fields)?);
                line.clear();
                continue;
            }
        };

        if fields.len() != h.num_fields {
            return Err(MalformedRegistryError::WrongFieldCount {
                line_num,
                expected: h.num_fields,
                got: fields.len(),
            }
            .into());
        }

        let parse_float = |i: usize, column: &str| -> Result<f64, MalformedRegistryError> {
            fields[i]
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .ok_or_else(|| MalformedRegistryError::ParseFloat {
                    line_num,
                    column: column.to_string(),
                    string: fields[i].clone(),
                })
        };

        let code = fields[h.code].clone();
        let xyz = XyzGeocentric {
            x: parse_float(h.x, "x")?,
            y: parse_float(h.y, "y")?,
            z: parse_float(h.z, "z")?,
        };
        let radius = (xyz.x * xyz.x + xyz.y * xyz.y + xyz.z * xyz.z).sqrt();
        if !(MIN_GEOCENTRIC_RADIUS_M..=MAX_GEOCENTRIC_RADIUS_M).contains(&radius) {
            return Err(MalformedRegistryError::InvalidPosition { line_num, code }.into());
        }

        let mut sefds = BTreeMap::new();
        for (band, i) in &h.sefds {
            let column = format!("{SEFD_COLUMN_PREFIX}{band}");
            let sefd = parse_float(*i, &column)?;
            if (sefd - NO_SEFD_SENTINEL).abs() < f64::EPSILON {
                continue;
            }
            sefds.insert(band.clone(), sefd);
        }

        if stations.contains_key(&code) {
            return Err(MalformedRegistryError::DuplicateCode { line_num, code }.into());
        }
        let station = Station::new(fields[h.station].clone(), code.clone(), xyz, sefds);
        if log_enabled!(Trace) {
            trace!(
                "Station {} ({}): longitude {:.4}°, latitude {:.4}°, height {:.1}m, SEFDs {:?}",
                station.code,
                station.name,
                station.position.longitude_rad.to_degrees(),
                station.position.latitude_rad.to_degrees(),
                station.position.height_metres,
                station.sefds
            );
        }
        stations.insert(code, station);

        line.clear();
    }

    if header.is_none() {
        return Err(MalformedRegistryError::NoHeader.into());
    }

    Ok(stations)
}
