// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

All constants *must* be double precision.
 */

/// The default sampling interval of an observation window \[hours\].
pub const DEFAULT_INTERVAL_HOURS: f64 = 0.2;

/// Sources must be at least this high above the horizon at a station to be
/// considered visible by that station \[degrees\].
pub const DEFAULT_MIN_ELEVATION_DEG: f64 = 10.0;

/// Catalogue rows with an unresolved flux density less than this value (in
/// the requested band) are discarded while reading the catalogue \[Jy\].
pub const DEFAULT_MIN_FLUX_JY: f64 = 1.0;

/// The number of ranked candidates reported by default.
pub const DEFAULT_NUM_SOURCES: usize = 10;

/// The station registry file used when none is specified.
pub const DEFAULT_STATIONS_FILE: &str = "station_location.txt";

/// The calibrator catalogue file used when none is specified.
pub const DEFAULT_CATALOGUE_FILE: &str = "rfc_2018c_cat.txt";

/// The sentinel used by station registries to say that a station has no SEFD
/// for a band.
pub const NO_SEFD_SENTINEL: f64 = -1.0;

/// Station registry columns starting with this prefix hold SEFDs \[Jy\].
pub const SEFD_COLUMN_PREFIX: &str = "SEFD-";

/// Geocentric station positions must have a distance from the Earth's centre
/// within these bounds \[metres\].
pub const MIN_GEOCENTRIC_RADIUS_M: f64 = 6.2e6;
pub const MAX_GEOCENTRIC_RADIUS_M: f64 = 6.5e6;

/// The minimum number of whitespace-delimited fields in a catalogue row.
pub const CATALOGUE_NUM_FIELDS: usize = 23;
