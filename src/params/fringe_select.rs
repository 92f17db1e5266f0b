// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Select and rank fringe finders.

use std::path::PathBuf;

use log::{info, warn};
use thiserror::Error;

use super::ObservationParams;
use crate::{
    band::Band,
    catalogue::Source,
    report::{candidate_records, candidate_table, write_report, CandidateRecord, WriteReportError},
    selection::{select_and_rank, SelectError},
    station::StationNotFoundError,
    visibility::VisibilityPolicy,
};

/// Parameters needed to select fringe finders.
pub(crate) struct FringeSelectParams {
    pub(crate) observation: ObservationParams,

    /// Sources with enough flux density in `band`.
    pub(crate) catalogue: Vec<Source>,

    /// The band the user asked for, e.g. "l".
    pub(crate) band_token: String,

    /// The catalogue band that `band_token` maps onto.
    pub(crate) band: Band,

    pub(crate) num_sources: usize,

    pub(crate) policy: VisibilityPolicy,

    /// Where to write the candidates, if anywhere.
    pub(crate) output: Option<PathBuf>,
}

impl FringeSelectParams {
    pub(crate) fn run(&self) -> Result<Vec<CandidateRecord>, FringeSelectError> {
        let FringeSelectParams {
            observation: obs,
            catalogue,
            band_token,
            band,
            num_sources,
            policy,
            output,
        } = self;

        let stations = obs.stations()?;
        info!(
            "Checking {} sources for visibility ({policy}) from {}",
            catalogue.len(),
            obs.station_codes.join(" ")
        );
        let ranked = select_and_rank(
            &stations,
            catalogue,
            obs.start,
            obs.duration_h,
            obs.interval_h,
            obs.min_elevation_deg,
            band_token,
            *num_sources,
            obs.model,
            *policy,
        )?;

        let records = candidate_records(&ranked, *band);
        if records.is_empty() {
            warn!("No sources are visible to all stations above {}°", obs.min_elevation_deg);
        } else {
            info!("Best {} fringe finders:", records.len());
            for line in candidate_table(&records) {
                info!("{line}");
            }
        }

        if let Some(output) = output {
            write_report(output, &records)?;
            info!("Wrote candidates to {}", output.display());
        }

        Ok(records)
    }
}

#[derive(Error, Debug)]
pub(crate) enum FringeSelectError {
    #[error(transparent)]
    StationNotFound(#[from] StationNotFoundError),

    #[error(transparent)]
    Select(#[from] SelectError),

    #[error(transparent)]
    Write(#[from] WriteReportError),
}
