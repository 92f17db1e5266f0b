// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all fringe-finder-related errors. This should be the *only*
//! error enum that is publicly visible.

use thiserror::Error;

use super::{
    common::ObservationArgsError, elevation::ElevationArgsError, select::SelectArgsError,
};
use crate::{
    band::{UnknownBandError, BAND_TOKENS_COMMA_SEPARATED},
    catalogue::ReadCatalogueError,
    constants::CATALOGUE_NUM_FIELDS,
    params::{ElevationError, FringeSelectError},
    report::{WriteReportError, REPORT_OUTPUT_TYPES_COMMA_SEPARATED},
    selection::SelectError,
    sexagesimal::SexagesimalError,
    station::{ReadRegistryError, StationNotFoundError},
    time::{ObservationWindowError, TimeParseError},
};

/// The *only* publicly visible error from fringe-finder. Each variant names a
/// category of problem, and each category has its own process exit code.
#[derive(Error, Debug)]
pub enum FringeFinderError {
    /// The requested band isn't one we know about.
    #[error("{0}")]
    Band(String),

    /// Problems reading or searching the calibrator catalogue.
    #[error("{0}\n\nCatalogue rows are whitespace delimited with {} or more fields, e.g. the RFC catalogue text format", CATALOGUE_NUM_FIELDS)]
    Catalogue(String),

    /// Problems reading the station registry.
    #[error("{0}\n\nStation registries need a header row with 'station', 'code', 'x', 'y' and 'z' columns (plus optional 'SEFD-<band>' columns)")]
    Registry(String),

    /// A station code isn't in the registry.
    #[error("{0}\n\nUse the 'stations' subcommand to list the available stations")]
    StationNotFound(String),

    /// Problems with start times and observation windows.
    #[error("{0}")]
    Time(String),

    /// An error related to argument files.
    #[error("{0}")]
    ArgFile(String),

    /// Problems writing out reports.
    #[error("{0}\n\nSupported report formats: {}", *REPORT_OUTPUT_TYPES_COMMA_SEPARATED)]
    Report(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

impl FringeFinderError {
    /// The process exit code associated with this error. Usage errors caught
    /// by clap exit with 2 before any of these can occur.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Band(_) => 3,
            Self::Catalogue(_) => 4,
            Self::Registry(_) => 5,
            Self::StationNotFound(_) => 6,
            Self::Time(_)
            | Self::ArgFile(_)
            | Self::Report(_)
            | Self::Generic(_) => 1,
        }
    }
}

// When changing the error propagation below, ensure `Self::from(e)` uses the
// correct `e`!

// Binary sub-command errors.

impl From<ObservationArgsError> for FringeFinderError {
    fn from(e: ObservationArgsError) -> Self {
        match e {
            ObservationArgsError::NoStart | ObservationArgsError::NoDuration => {
                Self::Time(e.to_string())
            }
            ObservationArgsError::NoStations
            | ObservationArgsError::UnknownNetwork(_)
            | ObservationArgsError::InvalidMinElevation(_)
            | ObservationArgsError::InvalidDut1(_) => Self::Generic(e.to_string()),
            ObservationArgsError::Time(e) => Self::from(e),
            ObservationArgsError::Window(e) => Self::from(e),
            ObservationArgsError::Registry(e) => Self::from(e),
            ObservationArgsError::StationNotFound(e) => Self::from(e),
        }
    }
}

impl From<SelectArgsError> for FringeFinderError {
    fn from(e: SelectArgsError) -> Self {
        match e {
            SelectArgsError::NoBand => Self::Band(format!(
                "{e}; valid bands are: {}",
                *BAND_TOKENS_COMMA_SEPARATED
            )),
            SelectArgsError::InvalidMinFlux(_) => Self::Catalogue(e.to_string()),
        }
    }
}

impl From<ElevationArgsError> for FringeFinderError {
    fn from(e: ElevationArgsError) -> Self {
        match e {
            ElevationArgsError::NoSource | ElevationArgsError::SourceAndCoords => {
                Self::Generic(e.to_string())
            }
            ElevationArgsError::SourceNotInCatalogue { .. } => Self::Catalogue(e.to_string()),
        }
    }
}

// Library errors.

impl From<UnknownBandError> for FringeFinderError {
    fn from(e: UnknownBandError) -> Self {
        Self::Band(e.to_string())
    }
}

impl From<ReadCatalogueError> for FringeFinderError {
    fn from(e: ReadCatalogueError) -> Self {
        Self::Catalogue(e.to_string())
    }
}

impl From<ReadRegistryError> for FringeFinderError {
    fn from(e: ReadRegistryError) -> Self {
        Self::Registry(e.to_string())
    }
}

impl From<StationNotFoundError> for FringeFinderError {
    fn from(e: StationNotFoundError) -> Self {
        Self::StationNotFound(e.to_string())
    }
}

impl From<TimeParseError> for FringeFinderError {
    fn from(e: TimeParseError) -> Self {
        Self::Time(e.to_string())
    }
}

impl From<ObservationWindowError> for FringeFinderError {
    fn from(e: ObservationWindowError) -> Self {
        Self::Time(e.to_string())
    }
}

impl From<SexagesimalError> for FringeFinderError {
    fn from(e: SexagesimalError) -> Self {
        Self::Generic(e.to_string())
    }
}

impl From<SelectError> for FringeFinderError {
    fn from(e: SelectError) -> Self {
        match e {
            SelectError::UnknownBand(e) => Self::from(e),
            SelectError::NoStations => Self::Generic(e.to_string()),
            SelectError::Window(e) => Self::from(e),
        }
    }
}

impl From<WriteReportError> for FringeFinderError {
    fn from(e: WriteReportError) -> Self {
        Self::Report(e.to_string())
    }
}

impl From<FringeSelectError> for FringeFinderError {
    fn from(e: FringeSelectError) -> Self {
        match e {
            FringeSelectError::StationNotFound(e) => Self::from(e),
            FringeSelectError::Select(e) => Self::from(e),
            FringeSelectError::Write(e) => Self::from(e),
        }
    }
}

impl From<ElevationError> for FringeFinderError {
    fn from(e: ElevationError) -> Self {
        match e {
            ElevationError::StationNotFound(e) => Self::from(e),
            ElevationError::Window(e) => Self::from(e),
            ElevationError::Write(e) => Self::from(e),
        }
    }
}

// Third-party errors.

impl From<std::io::Error> for FringeFinderError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}

impl From<toml::ser::Error> for FringeFinderError {
    fn from(e: toml::ser::Error) -> Self {
        Self::ArgFile(format!("Couldn't serialise arguments into toml: {e}"))
    }
}
