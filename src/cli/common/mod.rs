// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Common arguments for command-line interfaces. Both the `select` and
//! `elevation` subcommands describe an observation (when it happens, and with
//! which stations), so the same observation arguments are shared between
//! them.

mod printers;

pub(super) use printers::InfoPrinter;
pub(crate) use printers::{display_warnings, Warn};

use std::{path::PathBuf, str::FromStr};

use clap::Parser;
use hifitime::Duration;
use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;
use vec1::Vec1;

use crate::{
    constants::{DEFAULT_INTERVAL_HOURS, DEFAULT_MIN_ELEVATION_DEG, DEFAULT_STATIONS_FILE},
    params::ObservationParams,
    station::{
        expand_station_codes, Network, ReadRegistryError, StationNotFoundError, StationRegistry,
        NETWORKS_COMMA_SEPARATED,
    },
    time::{
        format_utc, parse_start_time, ObservationWindow, ObservationWindowError, TimeParseError,
    },
    visibility::ElevationModel,
};

lazy_static::lazy_static! {
    pub(super) static ref ARG_FILE_TYPES_COMMA_SEPARATED: String = ArgFileTypes::iter().join(", ");

    pub(super) static ref ARG_FILE_HELP: String =
        format!("All arguments may be specified in a file. Any CLI arguments override arguments set in the file. Supported formats: {}", *ARG_FILE_TYPES_COMMA_SEPARATED);

    pub(super) static ref STATIONS_FILE_HELP: String =
        format!("The station registry file. Default: {DEFAULT_STATIONS_FILE}");

    static ref NETWORK_HELP: String =
        format!("Include all stations of a network. May be given multiple times. Supported networks: {}", *NETWORKS_COMMA_SEPARATED);

    static ref INTERVAL_HELP: String =
        format!("The time between elevation samples [hours]. Default: {DEFAULT_INTERVAL_HOURS}");

    static ref MIN_ELEVATION_HELP: String =
        format!("Sources must be at least this high above a station's horizon to be visible to it [degrees]. Default: {DEFAULT_MIN_ELEVATION_DEG}");
}

#[derive(Debug, Display, EnumIter, EnumString)]
pub(super) enum ArgFileTypes {
    #[strum(serialize = "toml")]
    Toml,
    #[strum(serialize = "json")]
    Json,
}

macro_rules! unpack_arg_file {
    ($arg_file:expr) => ({
        use std::{fs::File, io::Read, str::FromStr};

        use crate::cli::common::{ArgFileTypes, ARG_FILE_TYPES_COMMA_SEPARATED};

        debug!("Attempting to parse argument file {}", $arg_file.display());

        let mut contents = String::new();
        let arg_file_type = $arg_file
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .and_then(|e| ArgFileTypes::from_str(&e).ok());

        match arg_file_type {
            Some(ArgFileTypes::Toml) => {
                debug!("Parsing toml file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match toml::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(FringeFinderError::ArgFile(format!(
                            "Couldn't decode toml structure from {}:\n{err}",
                            $arg_file.display()
                        )))
                    }
                }
            }
            Some(ArgFileTypes::Json) => {
                debug!("Parsing json file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match serde_json::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(FringeFinderError::ArgFile(format!(
                            "Couldn't decode json structure from {}:\n{err}",
                            $arg_file.display()
                        )))
                    }
                }
            }

            _ => {
                return Err(FringeFinderError::ArgFile(format!(
                    "Argument file '{}' doesn't have a recognised file extension! Valid extensions are: {}", $arg_file.display(), *ARG_FILE_TYPES_COMMA_SEPARATED)
                ))
            }
        }
    });
}

/// When and where an observation happens.
#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct ObservationArgs {
    /// The start of the observation (UTC), e.g. "2023-03-14 15:00:00.0" or
    /// "14/03/2023 15:00".
    #[clap(name = "START", help_heading = "OBSERVATION")]
    pub(super) start: Option<String>,

    /// The duration of the observation [hours].
    #[clap(name = "DURATION", help_heading = "OBSERVATION")]
    pub(super) duration: Option<f64>,

    /// The codes of the observing stations, e.g. EF WB JB2.
    #[clap(name = "STATIONS", help_heading = "STATIONS")]
    #[serde(default)]
    pub(super) stations: Vec<String>,

    #[clap(
        long = "network",
        help = NETWORK_HELP.as_str(),
        multiple_occurrences(true),
        number_of_values(1),
        help_heading = "STATIONS"
    )]
    #[serde(default)]
    pub(super) networks: Vec<String>,

    #[clap(long, help = STATIONS_FILE_HELP.as_str(), parse(from_os_str), help_heading = "STATIONS")]
    pub(super) stations_file: Option<PathBuf>,

    #[clap(long, help = INTERVAL_HELP.as_str(), help_heading = "OBSERVATION")]
    pub(super) interval: Option<f64>,

    #[clap(
        long,
        help = MIN_ELEVATION_HELP.as_str(),
        allow_hyphen_values = true,
        help_heading = "OBSERVATION"
    )]
    pub(super) min_elevation: Option<f64>,

    /// Use this value as UT1 - UTC [seconds]. Default: 0
    #[clap(long, allow_hyphen_values = true, help_heading = "ELEVATION MODEL")]
    pub(super) dut1: Option<f64>,

    /// Don't precess LMSTs and station latitudes to J2000 before computing
    /// elevations.
    #[clap(long, help_heading = "ELEVATION MODEL")]
    #[serde(default)]
    pub(super) no_precession: bool,
}

impl ObservationArgs {
    /// Prefer the values in `self` over `other`. Station codes and networks are
    /// taken as a whole from whichever side has any.
    pub(super) fn merge(self, other: Self) -> Self {
        Self {
            start: self.start.or(other.start),
            duration: self.duration.or(other.duration),
            stations: if self.stations.is_empty() {
                other.stations
            } else {
                self.stations
            },
            networks: if self.networks.is_empty() {
                other.networks
            } else {
                self.networks
            },
            stations_file: self.stations_file.or(other.stations_file),
            interval: self.interval.or(other.interval),
            min_elevation: self.min_elevation.or(other.min_elevation),
            dut1: self.dut1.or(other.dut1),
            no_precession: self.no_precession || other.no_precession,
        }
    }

    pub(super) fn parse(self) -> Result<ObservationParams, ObservationArgsError> {
        let ObservationArgs {
            start,
            duration,
            stations,
            networks,
            stations_file,
            interval,
            min_elevation,
            dut1,
            no_precession,
        } = self;

        let start = parse_start_time(&start.ok_or(ObservationArgsError::NoStart)?)?;
        let duration_h = duration.ok_or(ObservationArgsError::NoDuration)?;
        let interval_h = interval.unwrap_or(DEFAULT_INTERVAL_HOURS);
        let window = ObservationWindow::new(start, duration_h, interval_h)?;

        let min_elevation_deg = min_elevation.unwrap_or(DEFAULT_MIN_ELEVATION_DEG);
        if !(-90.0..=90.0).contains(&min_elevation_deg) {
            return Err(ObservationArgsError::InvalidMinElevation(min_elevation_deg));
        }
        let dut1 = dut1.unwrap_or(0.0);
        if !dut1.is_finite() {
            return Err(ObservationArgsError::InvalidDut1(dut1));
        }
        if no_precession {
            "Not precessing to J2000; elevations of catalogue sources will be slightly off".warn();
        }

        let networks = networks
            .iter()
            .map(|n| {
                Network::from_str(n).map_err(|_| ObservationArgsError::UnknownNetwork(n.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let duplicates = stations.iter().duplicates().join(" ");
        if !duplicates.is_empty() {
            format!("Stations were specified more than once: {duplicates}").warn();
        }
        let station_codes = Vec1::try_from_vec(expand_station_codes(&stations, &networks))
            .map_err(|_| ObservationArgsError::NoStations)?;

        let stations_file = stations_file.unwrap_or_else(|| PathBuf::from(DEFAULT_STATIONS_FILE));
        let registry = StationRegistry::read_file(&stations_file)?;
        debug!(
            "Read {} stations from {}",
            registry.len(),
            stations_file.display()
        );
        // Fail early on unknown stations.
        registry.get_many(&station_codes)?;

        let mut printer = InfoPrinter::new("Observation".into());
        printer.push_line(format!("Start: {} UTC", format_utc(start)).into());
        printer.push_line(
            format!(
                "Duration: {duration_h} h, sampled every {interval_h} h ({} samples)",
                window.len()
            )
            .into(),
        );
        printer.push_block(vec![
            format!("Stations: {}", station_codes.join(" ")).into(),
            format!("(registry: {})", stations_file.display()).into(),
        ]);
        printer.push_line(format!("Minimum elevation: {min_elevation_deg}°").into());
        printer.display();

        Ok(ObservationParams {
            registry,
            station_codes,
            start,
            duration_h,
            interval_h,
            min_elevation_deg,
            model: ElevationModel {
                dut1: Duration::from_seconds(dut1),
                precess: !no_precession,
            },
        })
    }
}

#[derive(Error, Debug)]
pub(super) enum ObservationArgsError {
    #[error("No observation start time was supplied")]
    NoStart,

    #[error("No observation duration was supplied")]
    NoDuration,

    #[error("No stations were supplied; give station codes and/or a --network")]
    NoStations,

    #[error("Unknown network '{0}'; supported networks are: {}", *NETWORKS_COMMA_SEPARATED)]
    UnknownNetwork(String),

    #[error("The minimum elevation must be between -90 and 90 degrees; got {0}")]
    InvalidMinElevation(f64),

    #[error("DUT1 must be a finite number of seconds; got {0}")]
    InvalidDut1(f64),

    #[error(transparent)]
    Time(#[from] TimeParseError),

    #[error(transparent)]
    Window(#[from] ObservationWindowError),

    #[error(transparent)]
    Registry(#[from] ReadRegistryError),

    #[error(transparent)]
    StationNotFound(#[from] StationNotFoundError),
}
