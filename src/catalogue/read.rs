// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::{collections::HashSet, io::BufRead};

use log::{debug, log_enabled, trace, Level::Trace};
use marlu::RADec;
use strum::IntoEnumIterator;

use super::{CatalogueParseError, Flux, ReadCatalogueError, Source};
use crate::{
    band::Band,
    constants::CATALOGUE_NUM_FIELDS,
    sexagesimal::{has_negative_sign, sexagesimal_dms_to_degrees, sexagesimal_hms_to_degrees},
};

const FLUX_COLUMNS: [(&str, &str); 5] = [
    ("S-band resolved flux density", "S-band unresolved flux density"),
    ("C-band resolved flux density", "C-band unresolved flux density"),
    ("X-band resolved flux density", "X-band unresolved flux density"),
    ("U-band resolved flux density", "U-band unresolved flux density"),
    ("K-band resolved flux density", "K-band unresolved flux density"),
];
const FIRST_FLUX_FIELD: usize = 13;

/// Parse a buffer containing a calibrator catalogue. Rows with an unresolved
/// flux density less than `min_flux` \[Jy\] in `band` are discarded, but every
/// row must still be well formed.
///
/// Flux densities that are upper limits (i.e. contain a '<') or negative are
/// zero.
pub fn parse_catalogue<T: BufRead>(
    buf: &mut T,
    band: Band,
    min_flux: f64,
) -> Result<Vec<Source>, ReadCatalogueError> {
    let mut line = String::new();
    let mut line_num: u32 = 0;
    let mut num_rows = 0;
    let mut names = HashSet::new();
    let mut sources = vec![];

    while buf.read_line(&mut line)? > 0 {
        line_num += 1;

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            line.clear();
            continue;
        }

        let source = parse_row(trimmed, line_num)?;
        num_rows += 1;
        if !names.insert(source.name.clone()) {
            return Err(CatalogueParseError::DuplicateSource {
                line_num,
                name: source.name,
            }
            .into());
        }

        if source.flux(band).unresolved < min_flux {
            if log_enabled!(Trace) {
                trace!(
                    "Discarding {}; its {band}-band unresolved flux density is {} Jy",
                    source.name,
                    source.flux(band).unresolved
                );
            }
        } else {
            sources.push(source);
        }

        line.clear();
    }

    debug!(
        "Read {num_rows} catalogue rows; {} have an unresolved {band}-band flux density >= {min_flux} Jy",
        sources.len()
    );
    Ok(sources)
}

fn parse_row(line: &str, line_num: u32) -> Result<Source, CatalogueParseError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < CATALOGUE_NUM_FIELDS {
        return Err(CatalogueParseError::TooFewFields {
            line_num,
            expected: CATALOGUE_NUM_FIELDS,
            got: fields.len(),
        });
    }

    let parse_float = |i: usize, column: &'static str| -> Result<f64, CatalogueParseError> {
        fields[i]
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .ok_or_else(|| CatalogueParseError::ParseNumber {
                line_num,
                column,
                string: fields[i].to_string(),
            })
    };
    let parse_flux = |i: usize, column: &'static str| -> Result<f64, CatalogueParseError> {
        if fields[i].contains('<') {
            Ok(0.0)
        } else {
            // "-0.00" must not survive as a negative zero.
            parse_float(i, column).map(|f| if f <= 0.0 { 0.0 } else { f })
        }
    };

    let ra_h = parse_float(3, "RA hours")?;
    let ra_m = parse_float(4, "RA minutes")?;
    let ra_s = parse_float(5, "RA seconds")?;
    if !(0.0..24.0).contains(&ra_h) || !(0.0..60.0).contains(&ra_m) || !(0.0..60.0).contains(&ra_s)
    {
        return Err(CatalogueParseError::InvalidRa {
            line_num,
            string: fields[3..6].join(" "),
        });
    }
    let ra = sexagesimal_hms_to_degrees(ra_h, ra_m, ra_s);
    // An RA of 23:59:59.99999999 can round up to 360 degrees.
    let ra = if ra >= 360.0 { ra - 360.0 } else { ra };

    let dec_d = parse_float(6, "Dec degrees")?;
    let dec_m = parse_float(7, "Dec minutes")?;
    let dec_s = parse_float(8, "Dec seconds")?;
    let dec = sexagesimal_dms_to_degrees(has_negative_sign(fields[6]), dec_d, dec_m, dec_s);
    if !(0.0..60.0).contains(&dec_m) || !(0.0..60.0).contains(&dec_s) || dec.abs() > 90.0 {
        return Err(CatalogueParseError::InvalidDec {
            line_num,
            string: fields[6..9].join(" "),
        });
    }

    let num_obs = fields[12]
        .parse()
        .map_err(|_| CatalogueParseError::ParseNumber {
            line_num,
            column: "number of observations",
            string: fields[12].to_string(),
        })?;

    let mut fluxes = [Flux::default(); 5];
    for band in Band::iter() {
        let i = band.column_index();
        let (resolved_column, unresolved_column) = FLUX_COLUMNS[i];
        fluxes[i] = Flux {
            resolved: parse_flux(FIRST_FLUX_FIELD + 2 * i, resolved_column)?,
            unresolved: parse_flux(FIRST_FLUX_FIELD + 2 * i + 1, unresolved_column)?,
        };
    }

    Ok(Source {
        name: fields[1].to_string(),
        ivs_name: fields[2].to_string(),
        calibrator: fields[0] == "Y",
        radec: RADec::from_degrees(ra, dec),
        num_obs,
        fluxes,
    })
}
