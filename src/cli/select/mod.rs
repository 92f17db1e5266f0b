// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Select the brightest calibrator sources that all stations of an
//! observation can see.


use std::path::PathBuf;

use clap::Parser;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::common::{display_warnings, InfoPrinter, ObservationArgs, Warn, ARG_FILE_HELP};
use crate::{
    band::{map_band, BAND_TOKENS_COMMA_SEPARATED},
    catalogue::read_catalogue_file,
    constants::{DEFAULT_CATALOGUE_FILE, DEFAULT_MIN_FLUX_JY, DEFAULT_NUM_SOURCES},
    params::FringeSelectParams,
    report::{ReportOutputType, WriteReportError, REPORT_OUTPUT_TYPES_COMMA_SEPARATED},
    visibility::VisibilityPolicy,
    FringeFinderError,
};

lazy_static::lazy_static! {
    static ref BAND_HELP: String =
        format!("The observing band. Supported bands: {}", *BAND_TOKENS_COMMA_SEPARATED);

    static ref CATALOGUE_HELP: String =
        format!("The calibrator catalogue. Default: {DEFAULT_CATALOGUE_FILE}");

    static ref MIN_FLUX_HELP: String =
        format!("Ignore catalogue sources with an unresolved flux density (in the observing band) less than this [Jy]. Default: {DEFAULT_MIN_FLUX_JY}");

    static ref NUM_SOURCES_HELP: String =
        format!("The maximum number of candidates to report. Default: {DEFAULT_NUM_SOURCES}");

    static ref OUTPUT_HELP: String =
        format!("Also write the candidates to this file. Supported formats: {}", *REPORT_OUTPUT_TYPES_COMMA_SEPARATED);
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct SelectCliArgs {
    #[clap(short, long, help = BAND_HELP.as_str(), help_heading = "CATALOGUE")]
    pub(super) band: Option<String>,

    #[clap(long, help = CATALOGUE_HELP.as_str(), parse(from_os_str), help_heading = "CATALOGUE")]
    pub(super) catalogue: Option<PathBuf>,

    #[clap(long, help = MIN_FLUX_HELP.as_str(), help_heading = "CATALOGUE")]
    pub(super) min_flux: Option<f64>,

    #[clap(short, long, help = NUM_SOURCES_HELP.as_str(), help_heading = "SELECTION")]
    pub(super) num_sources: Option<usize>,

    /// Only keep sources that every station can see at the same time. By
    /// default, each station needs to see a source at some point in the
    /// observation, but not necessarily at the same time as the others.
    #[clap(long, help_heading = "SELECTION")]
    #[serde(default)]
    pub(super) simultaneous: bool,

    #[clap(short, long, help = OUTPUT_HELP.as_str(), parse(from_os_str), help_heading = "OUTPUT FILES")]
    pub(super) output: Option<PathBuf>,
}

impl SelectCliArgs {
    fn merge(self, other: Self) -> Self {
        Self {
            band: self.band.or(other.band),
            catalogue: self.catalogue.or(other.catalogue),
            min_flux: self.min_flux.or(other.min_flux),
            num_sources: self.num_sources.or(other.num_sources),
            simultaneous: self.simultaneous || other.simultaneous,
            output: self.output.or(other.output),
        }
    }
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct SelectArgs {
    #[clap(long, help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(rename = "observation")]
    #[serde(default)]
    pub(super) observation_args: ObservationArgs,

    #[clap(flatten)]
    #[serde(rename = "select")]
    #[serde(default)]
    pub(super) select_args: SelectCliArgs,
}

impl SelectArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified into
    /// a single struct. Where applicable, it will prefer CLI parameters over
    /// those in the file.
    ///
    /// This function should only ever merge arguments, and not try to make
    /// sense of them.
    pub(super) fn merge(self) -> Result<SelectArgs, FringeFinderError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            // Ensure all of the file args are accounted for by pattern
            // matching.
            let SelectArgs {
                args_file: _,
                observation_args,
                select_args,
            } = unpack_arg_file!(arg_file);

            Ok(SelectArgs {
                args_file: None,
                observation_args: cli_args.observation_args.merge(observation_args),
                select_args: cli_args.select_args.merge(select_args),
            })
        } else {
            Ok(cli_args)
        }
    }

    fn parse(self) -> Result<FringeSelectParams, FringeFinderError> {
        debug!("{:#?}", self);

        let SelectArgs {
            args_file: _,
            observation_args,
            select_args:
                SelectCliArgs {
                    band,
                    catalogue,
                    min_flux,
                    num_sources,
                    simultaneous,
                    output,
                },
        } = self;

        // The band must be checked before any files are read.
        let band_token = band.ok_or(SelectArgsError::NoBand)?;
        let band = map_band(&band_token)?;
        if let Some(output) = output.as_ref() {
            if ReportOutputType::from_path(output).is_none() {
                return Err(WriteReportError::UnknownOutputType(output.clone()).into());
            }
        }
        let min_flux = min_flux.unwrap_or(DEFAULT_MIN_FLUX_JY);
        if !min_flux.is_finite() {
            return Err(SelectArgsError::InvalidMinFlux(min_flux).into());
        }

        let observation = observation_args.parse()?;

        let catalogue_file = catalogue.unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOGUE_FILE));
        let catalogue = read_catalogue_file(&catalogue_file, band, min_flux)?;
        if catalogue.is_empty() {
            format!(
                "No catalogue sources have an unresolved {band}-band flux density of at least {min_flux} Jy"
            )
            .warn();
        }

        let num_sources = num_sources.unwrap_or(DEFAULT_NUM_SOURCES);
        if num_sources == 0 {
            "Zero candidates were asked for; none will be reported".warn();
        }
        let policy = if simultaneous {
            VisibilityPolicy::Simultaneous
        } else {
            VisibilityPolicy::Ever
        };

        let mut printer = InfoPrinter::new("Candidates".into());
        printer.push_line(format!("Band: {band_token} (catalogue {band} band)").into());
        printer.push_block(vec![
            format!("Catalogue: {}", catalogue_file.display()).into(),
            format!(
                "{} sources with an unresolved flux density >= {min_flux} Jy",
                catalogue.len()
            )
            .into(),
        ]);
        printer.push_line(
            match policy {
                VisibilityPolicy::Ever => {
                    format!("Reporting up to {num_sources} sources seen by every station")
                }
                VisibilityPolicy::Simultaneous => format!(
                    "Reporting up to {num_sources} sources seen by every station at the same time"
                ),
            }
            .into(),
        );
        if let Some(output) = output.as_ref() {
            printer.push_line(format!("Writing candidates to {}", output.display()).into());
        }
        printer.display();
        display_warnings();

        Ok(FringeSelectParams {
            observation,
            catalogue,
            band_token,
            band,
            num_sources,
            policy,
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
pub(super) enum SelectArgsError {
    #[error("No band was specified")]
    NoBand,

    #[error("The minimum flux density must be a finite number; got {0}")]
    InvalidMinFlux(f64),
}
