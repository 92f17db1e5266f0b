// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to pick fringe-finder candidates out of a catalogue.
//!
//! Sources are kept if they are visible to the requested stations over the
//! observation, then sorted by their unresolved flux densities so that the
//! brightest (most compact) sources come first.

mod error;

pub use error::SelectError;

use std::borrow::Borrow;

use hifitime::Epoch;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::{debug, log_enabled, trace, Level::Trace};
use rayon::{iter::Either, prelude::*};

use crate::{
    band::{map_band, Band},
    catalogue::Source,
    station::Station,
    time::ObservationWindow,
    visibility::{make_tracks, ElevationModel, LstTrack, VisibilityPolicy},
    PROGRESS_BARS,
};

/// Split the catalogue into the sources that satisfy `policy` for all of the
/// stations behind `tracks` (the first returned collection), and those that
/// don't (the second). Both collections are in catalogue order.
pub fn partition<'a>(
    catalogue: &'a [Source],
    tracks: &[LstTrack],
    min_elevation_deg: f64,
    policy: VisibilityPolicy,
) -> (Vec<&'a Source>, Vec<&'a Source>) {
    let pb = ProgressBar::with_draw_target(
        Some(catalogue.len() as _),
        if PROGRESS_BARS.load() {
            ProgressDrawTarget::stdout()
        } else {
            ProgressDrawTarget::hidden()
        },
    )
    .with_style(
        ProgressStyle::default_bar()
            .template("{msg}: [{wide_bar:.blue}] {pos:5}/{len:5} sources ({elapsed_precise}<{eta_precise})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    )
    .with_message("Checking visibility");

    let (kept, excluded): (Vec<&Source>, Vec<&Source>) =
        catalogue.par_iter().partition_map(|source| {
            let visible = policy.is_satisfied(tracks, source.radec, min_elevation_deg);
            pb.inc(1);
            if visible {
                Either::Left(source)
            } else {
                if log_enabled!(Trace) {
                    trace!(
                        "Source {} isn't visible ({policy}) above {min_elevation_deg}°",
                        source.name
                    );
                }
                Either::Right(source)
            }
        });
    pb.finish_and_clear();

    (kept, excluded)
}

/// Get the sources in the catalogue that are visible to all of the
/// `stations` over `times`, according to `policy`. The catalogue order is
/// preserved.
#[allow(clippy::too_many_arguments)]
pub fn select<'a>(
    catalogue: &'a [Source],
    stations: &[&Station],
    times: &[Epoch],
    min_elevation_deg: f64,
    band: Band,
    model: ElevationModel,
    policy: VisibilityPolicy,
) -> Vec<&'a Source> {
    let tracks = make_tracks(stations, times, model);
    let (kept, excluded) = partition(catalogue, &tracks, min_elevation_deg, policy);
    debug!(
        "{} of {} {band}-band sources are visible to all {} stations; {} aren't",
        kept.len(),
        catalogue.len(),
        stations.len(),
        excluded.len()
    );
    kept
}

/// Sort sources by their unresolved flux densities in `band`, brightest first.
/// Sources with equal flux densities keep their input order.
pub fn rank<S: Borrow<Source>>(mut sources: Vec<S>, band: Band) -> Vec<S> {
    sources.sort_by(|a, b| {
        let a = a.borrow().flux(band).unresolved;
        let b = b.borrow().flux(band).unresolved;
        b.total_cmp(&a)
    });
    sources
}

/// Keep only the first `n` sources.
pub fn top_n<S>(mut sources: Vec<S>, n: usize) -> Vec<S> {
    sources.truncate(n);
    sources
}

/// Validate the band token, sample the observation, then select, rank and
/// truncate the catalogue's sources.
#[allow(clippy::too_many_arguments)]
pub fn select_and_rank<'a>(
    stations: &[&Station],
    catalogue: &'a [Source],
    start: Epoch,
    duration_h: f64,
    interval_h: f64,
    min_elevation_deg: f64,
    band_token: &str,
    num_sources: usize,
    model: ElevationModel,
    policy: VisibilityPolicy,
) -> Result<Vec<&'a Source>, SelectError> {
    let band = map_band(band_token)?;
    if stations.is_empty() {
        return Err(SelectError::NoStations);
    }
    let window = ObservationWindow::new(start, duration_h, interval_h)?;
    debug!(
        "Evaluating {} timestamps for {} stations",
        window.len(),
        stations.len()
    );

    let visible = select(
        catalogue,
        stations,
        window.timestamps(),
        min_elevation_deg,
        band,
        model,
        policy,
    );
    Ok(top_n(rank(visible, band), num_sources))
}
