// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code for VLBI stations; their geodetic identities, positions and
//! sensitivities.

mod error;
mod networks;
mod read;

pub use error::*;
pub use networks::{Network, NETWORKS_COMMA_SEPARATED};

use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use indexmap::IndexMap;
use itertools::Itertools;
use log::debug;
use marlu::{LatLngHeight, XyzGeocentric};

/// A station that may take part in an observation.
#[derive(Debug, Clone)]
pub struct Station {
    /// The human-readable name, e.g. "Effelsberg".
    pub name: String,

    /// The short code of the station, e.g. "EF". This is unique within a
    /// [`StationRegistry`].
    pub code: String,

    /// The ITRF position of the station \[metres\].
    pub xyz: XyzGeocentric,

    /// The geodetic (WGS84) position of the station, derived from `xyz`.
    pub position: LatLngHeight,

    /// System-equivalent flux densities \[Jy\], keyed by the band label used
    /// in the registry's `SEFD-<band>` columns. Bands without an SEFD are
    /// absent.
    pub sefds: BTreeMap<String, f64>,
}

impl Station {
    pub fn new(
        name: String,
        code: String,
        xyz: XyzGeocentric,
        sefds: BTreeMap<String, f64>,
    ) -> Station {
        let position = xyz.to_earth_wgs84();
        Station {
            name,
            code,
            xyz,
            position,
            sefds,
        }
    }

    /// Can this station observe at `band`? `band` is the label used in the
    /// registry's `SEFD-<band>` columns.
    pub fn has_frequency(&self, band: &str) -> bool {
        self.sefds.contains_key(band)
    }

    /// Get the SEFD \[Jy\] of this station at `band`.
    pub fn get_sefd(&self, band: &str) -> Result<f64, UnsupportedBandError> {
        self.sefds
            .get(band)
            .copied()
            .ok_or_else(|| UnsupportedBandError {
                code: self.code.clone(),
                band: band.to_string(),
            })
    }
}

/// All of the stations read from a registry file, keyed by station code. File
/// order is preserved.
#[derive(Debug, Clone, Default)]
pub struct StationRegistry {
    stations: IndexMap<String, Station>,
}

impl StationRegistry {
    /// Read a registry file. See [`StationRegistry::parse`] for details on
    /// the format.
    pub fn read_file<P: AsRef<Path>>(path: P) -> Result<StationRegistry, ReadRegistryError> {
        let path = path.as_ref();
        debug!("Reading station registry {}", path.display());
        let f = File::open(path).map_err(|e| ReadRegistryError::Open {
            path: path.display().to_string(),
            err: e,
        })?;
        let registry = Self::parse(&mut BufReader::new(f))?;
        debug!("Read {} stations from {}", registry.len(), path.display());
        Ok(registry)
    }

    /// Parse a buffer containing a whitespace-delimited station registry. The
    /// header must contain the columns `station code x y z`; any columns named
    /// `SEFD-<band>` hold SEFDs, where a value of -1 means that the station
    /// can't observe that band.
    pub fn parse<T: BufRead>(buf: &mut T) -> Result<StationRegistry, ReadRegistryError> {
        let stations = read::parse_registry(buf)?;
        Ok(StationRegistry { stations })
    }

    pub fn get(&self, code: &str) -> Result<&Station, StationNotFoundError> {
        self.stations.get(code).ok_or_else(|| StationNotFoundError {
            code: code.to_string(),
        })
    }

    /// Get all of the requested stations. Repeated codes are only returned
    /// once. The first unknown code is an error.
    pub fn get_many<S: AsRef<str>>(
        &self,
        codes: &[S],
    ) -> Result<Vec<&Station>, StationNotFoundError> {
        codes
            .iter()
            .map(|c| c.as_ref())
            .unique()
            .map(|c| self.get(c))
            .collect()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.stations.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.stations.keys().map(|k| k.as_str())
    }
}

/// Combine explicitly-requested station codes with the codes of any requested
/// networks. Explicit codes come first, and each code appears only once.
pub fn expand_station_codes<S: AsRef<str>>(codes: &[S], networks: &[Network]) -> Vec<String> {
    codes
        .iter()
        .map(|c| c.as_ref())
        .chain(networks.iter().flat_map(|n| n.station_codes().iter().copied()))
        .unique()
        .map(|c| c.to_string())
        .collect()
}
