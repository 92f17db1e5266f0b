// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Elevations of a single source over an observation, as seen by each
//! station.

use std::path::PathBuf;

use clap::Parser;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::common::{display_warnings, InfoPrinter, ObservationArgs, ARG_FILE_HELP};
use crate::{
    band::Band,
    catalogue::{find_source, read_catalogue_file},
    constants::DEFAULT_CATALOGUE_FILE,
    params::ElevationParams,
    report::{ReportOutputType, WriteReportError, REPORT_OUTPUT_TYPES_COMMA_SEPARATED},
    sexagesimal::{degrees_to_sexagesimal_dms, degrees_to_sexagesimal_hms, parse_radec_colon_str},
    FringeFinderError,
};

lazy_static::lazy_static! {
    static ref CATALOGUE_HELP: String =
        format!("The calibrator catalogue that --source is looked up in. Default: {DEFAULT_CATALOGUE_FILE}");

    static ref OUTPUT_HELP: String =
        format!("Also write the elevation traces to this file. Supported formats: {}", *REPORT_OUTPUT_TYPES_COMMA_SEPARATED);
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct ElevationCliArgs {
    /// The J2000 or IVS name of a catalogue source, e.g. J1229+0203 or
    /// 1226+023.
    #[clap(long, help_heading = "SOURCE")]
    pub(super) source: Option<String>,

    /// The J2000 coordinates of the source, e.g. "12:29:06.70 +02:03:08.6".
    #[clap(
        long,
        conflicts_with = "source",
        allow_hyphen_values = true,
        help_heading = "SOURCE"
    )]
    pub(super) coords: Option<String>,

    #[clap(long, help = CATALOGUE_HELP.as_str(), parse(from_os_str), help_heading = "SOURCE")]
    pub(super) catalogue: Option<PathBuf>,

    #[clap(short, long, help = OUTPUT_HELP.as_str(), parse(from_os_str), help_heading = "OUTPUT FILES")]
    pub(super) output: Option<PathBuf>,
}

impl ElevationCliArgs {
    fn merge(self, other: Self) -> Self {
        // A source given on the command line replaces either kind of source
        // in the file.
        let (source, coords) = match (self.source, self.coords) {
            (None, None) => (other.source, other.coords),
            cli => cli,
        };
        Self {
            source,
            coords,
            catalogue: self.catalogue.or(other.catalogue),
            output: self.output.or(other.output),
        }
    }
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct ElevationArgs {
    #[clap(long, help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(rename = "observation")]
    #[serde(default)]
    pub(super) observation_args: ObservationArgs,

    #[clap(flatten)]
    #[serde(rename = "elevation")]
    #[serde(default)]
    pub(super) elevation_args: ElevationCliArgs,
}

impl ElevationArgs {
    /// Consolidate command-line and file arguments, preferring the CLI.
    pub(super) fn merge(self) -> Result<ElevationArgs, FringeFinderError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let ElevationArgs {
                args_file: _,
                observation_args,
                elevation_args,
            } = unpack_arg_file!(arg_file);

            Ok(ElevationArgs {
                args_file: None,
                observation_args: cli_args.observation_args.merge(observation_args),
                elevation_args: cli_args.elevation_args.merge(elevation_args),
            })
        } else {
            Ok(cli_args)
        }
    }

    fn parse(self) -> Result<ElevationParams, FringeFinderError> {
        debug!("{:#?}", self);

        let ElevationArgs {
            args_file: _,
            observation_args,
            elevation_args:
                ElevationCliArgs {
                    source,
                    coords,
                    catalogue,
                    output,
                },
        } = self;

        if let Some(output) = output.as_ref() {
            if ReportOutputType::from_path(output).is_none() {
                return Err(WriteReportError::UnknownOutputType(output.clone()).into());
            }
        }
        let (source_name, radec) = match (source, coords) {
            (Some(name), None) => {
                let catalogue_file =
                    catalogue.unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOGUE_FILE));
                // Every source has a non-negative flux density, so nothing is
                // thrown away here. The band is irrelevant.
                let sources = read_catalogue_file(&catalogue_file, Band::X, 0.0)?;
                match find_source(&sources, &name) {
                    Some(s) => (s.name.clone(), s.radec),
                    None => {
                        return Err(ElevationArgsError::SourceNotInCatalogue {
                            name,
                            catalogue: catalogue_file,
                        }
                        .into())
                    }
                }
            }
            (None, Some(coords)) => {
                let radec = parse_radec_colon_str(&coords)?;
                (coords, radec)
            }
            (Some(_), Some(_)) => return Err(ElevationArgsError::SourceAndCoords.into()),
            (None, None) => return Err(ElevationArgsError::NoSource.into()),
        };

        let observation = observation_args.parse()?;

        let mut printer = InfoPrinter::new(format!("Elevations of {source_name}").into());
        printer.push_line(
            format!(
                "RA {}, Dec {} (J2000)",
                degrees_to_sexagesimal_hms(radec.ra.to_degrees()),
                degrees_to_sexagesimal_dms(radec.dec.to_degrees())
            )
            .into(),
        );
        if let Some(output) = output.as_ref() {
            printer.push_line(format!("Writing traces to {}", output.display()).into());
        }
        printer.display();
        display_warnings();

        Ok(ElevationParams {
            observation,
            source_name,
            radec,
            output,
        })
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), FringeFinderError> {
        debug!("Converting arguments into parameters");
        trace!("{:#?}", self);
        let params = self.parse()?;

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        params.run()?;
        Ok(())
    }
}

#[derive(Error, Debug)]
pub(super) enum ElevationArgsError {
    #[error("No source was given; use --source or --coords")]
    NoSource,

    #[error("Both --source and --coords were given; only one may be used")]
    SourceAndCoords,

    #[error("Source '{name}' isn't in the catalogue {}", catalogue.display())]
    SourceNotInCatalogue { name: String, catalogue: PathBuf },
}
