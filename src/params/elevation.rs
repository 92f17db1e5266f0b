// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Elevation traces of a single source.

use std::path::PathBuf;

use log::{debug, info};
use marlu::RADec;
use thiserror::Error;

use super::ObservationParams;
use crate::{
    report::{write_report, TraceReport, WriteReportError},
    station::StationNotFoundError,
    time::{ObservationWindow, ObservationWindowError},
    visibility::{make_tracks, traces_from_tracks, VisibilityPolicy},
};

pub(crate) struct ElevationParams {
    pub(crate) observation: ObservationParams,

    /// What to call the source, e.g. its catalogue name.
    pub(crate) source_name: String,

    pub(crate) radec: RADec,

    /// Where to write the traces, if anywhere.
    pub(crate) output: Option<PathBuf>,
}

impl ElevationParams {
    pub(crate) fn run(&self) -> Result<TraceReport, ElevationError> {
        let ElevationParams {
            observation: obs,
            source_name,
            radec,
            output,
        } = self;

        let stations = obs.stations()?;
        let window = ObservationWindow::new(obs.start, obs.duration_h, obs.interval_h)?;
        let times = window.timestamps();
        debug!("Computing elevations at {} timestamps", times.len());

        let tracks = make_tracks(&stations, times, obs.model);
        let traces = traces_from_tracks(&tracks, *radec, obs.min_elevation_deg);
        for trace in &traces {
            let num_visible = trace.visible.iter().filter(|&&v| v).count();
            let max = trace
                .elevations_deg
                .iter()
                .copied()
                .fold(f64::NEG_INFINITY, f64::max);
            info!(
                "{:>8}: above {}° for {num_visible} of {} samples; highest elevation {max:.1}°",
                trace.station,
                obs.min_elevation_deg,
                trace.visible.len(),
            );
        }
        info!(
            "{source_name} is visible to every station: {}; at the same time: {}",
            VisibilityPolicy::Ever.is_satisfied(&tracks, *radec, obs.min_elevation_deg),
            VisibilityPolicy::Simultaneous.is_satisfied(&tracks, *radec, obs.min_elevation_deg),
        );

        let report = TraceReport::new(
            source_name.clone(),
            radec.ra.to_degrees(),
            radec.dec.to_degrees(),
            obs.min_elevation_deg,
            times,
            traces,
        );
        for line in report.table() {
            info!("{line}");
        }

        if let Some(output) = output {
            write_report(output, &report)?;
            info!("Wrote elevation traces to {}", output.display());
        }

        Ok(report)
    }
}

#[derive(Error, Debug)]
pub(crate) enum ElevationError {
    #[error(transparent)]
    StationNotFound(#[from] StationNotFoundError),

    #[error(transparent)]
    Window(#[from] ObservationWindowError),

    #[error(transparent)]
    Write(#[from] WriteReportError),
}
