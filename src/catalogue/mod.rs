// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calibrator catalogues (e.g. the Radio Fundamental Catalogue).
//!
//! Catalogues are whitespace-delimited text with one source per row. The
//! columns are a calibrator flag, J2000 and IVS names, sexagesimal RA and Dec,
//! position errors (ignored), the number of observations, then resolved and
//! unresolved flux densities for each of the S, C, X, U and K bands.

mod error;
mod read;
#[cfg(test)]
mod tests;

pub use error::*;
pub use read::parse_catalogue;

use std::{fs::File, io::BufReader, path::Path};

use log::debug;
use marlu::RADec;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::{band::Band, misc::expensive_op};

/// Flux densities of a source in a single band \[Jy\]. Both values are
/// non-negative; upper limits and missing measurements are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Flux {
    /// Measured on long baselines.
    pub resolved: f64,

    /// Measured on short baselines; the point-source flux density.
    pub unresolved: f64,
}

#[derive(Debug, Clone)]
pub struct Source {
    /// The J2000 name, e.g. "J1230+1223". Unique within a catalogue.
    pub name: String,

    /// The IVS (B1950-style) name, e.g. "1228+126".
    pub ivs_name: String,

    /// Is this source flagged as a calibrator?
    pub calibrator: bool,

    /// J2000 coordinates.
    pub radec: RADec,

    /// The number of observations that went into the catalogue entry.
    pub num_obs: u32,

    /// Flux densities, indexed by [`Band::column_index`].
    pub fluxes: [Flux; 5],
}

impl Source {
    pub fn flux(&self, band: Band) -> Flux {
        self.fluxes[band.column_index()]
    }

    /// All bands and their flux densities, in catalogue order.
    pub fn iter_fluxes(&self) -> impl Iterator<Item = (Band, Flux)> + '_ {
        Band::iter().map(|b| (b, self.flux(b)))
    }
}

/// Read a catalogue file, keeping only sources with an unresolved flux density
/// of at least `min_flux` \[Jy\] in `band`. See [`parse_catalogue`].
pub fn read_catalogue_file<P: AsRef<Path>>(
    path: P,
    band: Band,
    min_flux: f64,
) -> Result<Vec<Source>, ReadCatalogueError> {
    let path = path.as_ref();
    debug!("Reading catalogue {}", path.display());
    let f = File::open(path).map_err(|e| ReadCatalogueError::Open {
        path: path.display().to_string(),
        err: e,
    })?;
    expensive_op(
        || parse_catalogue(&mut BufReader::new(f), band, min_flux),
        "Still reading catalogue",
    )
}

/// Find a source by its J2000 or IVS name. The comparison is
/// case-insensitive.
pub fn find_source<'a>(sources: &'a [Source], name: &str) -> Option<&'a Source> {
    let name = name.trim();
    sources
        .iter()
        .find(|s| s.name.eq_ignore_ascii_case(name) || s.ivs_name.eq_ignore_ascii_case(name))
}
