// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Source elevations as seen by stations, and whether sources are visible.
//!
//! All elevations are in degrees. Catalogue coordinates are J2000, so by
//! default each timestamp's LMST and station latitude are precessed back to
//! J2000 before converting to horizontal coordinates.


use hifitime::{Duration, Epoch};
use log::trace;
use marlu::{
    precession::{get_lmst, precess_time},
    RADec,
};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::station::Station;

/// How elevations are computed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevationModel {
    /// UT1 - UTC.
    pub dut1: Duration,

    /// Should LMSTs and latitudes be precessed to J2000?
    pub precess: bool,
}

impl Default for ElevationModel {
    fn default() -> Self {
        ElevationModel {
            dut1: Duration::from_seconds(0.0),
            precess: true,
        }
    }
}

/// What it means for a source to be visible to a group of stations.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VisibilityPolicy {
    /// Every station sees the source above the elevation limit at some point
    /// in the observation, but not necessarily at the same time.
    #[default]
    Ever,

    /// At some point in the observation, every station sees the source above
    /// the elevation limit at the same time.
    Simultaneous,
}

impl VisibilityPolicy {
    /// Is a source at `radec` visible to all of the stations behind `tracks`?
    pub fn is_satisfied(self, tracks: &[LstTrack], radec: RADec, min_elevation_deg: f64) -> bool {
        match self {
            VisibilityPolicy::Ever => tracks
                .iter()
                .all(|t| t.is_visible(radec, min_elevation_deg)),

            VisibilityPolicy::Simultaneous => {
                let num_samples = tracks.iter().map(|t| t.len()).min().unwrap_or(0);
                (0..num_samples).any(|i| {
                    tracks
                        .iter()
                        .all(|t| t.elevation_at(i, radec) >= min_elevation_deg)
                })
            }
        }
    }
}

/// The (LMST, latitude) pairs \[radians\] of a station at each of a series of
/// timestamps. Every source is evaluated against these, so they're only
/// computed once per station.
#[derive(Debug, Clone)]
pub struct LstTrack<'a> {
    station: &'a Station,
    lsts: Vec<f64>,
    latitudes: Vec<f64>,
}

impl<'a> LstTrack<'a> {
    pub fn new(station: &'a Station, times: &[Epoch], model: ElevationModel) -> LstTrack<'a> {
        let longitude = station.position.longitude_rad;
        let latitude = station.position.latitude_rad;
        let (lsts, latitudes) = times
            .iter()
            .map(|&time| {
                if model.precess {
                    // The J2000 LMST and latitude don't depend on the pointing
                    // centre.
                    let precession_info = precess_time(
                        longitude,
                        latitude,
                        RADec::from_radians(0.0, latitude),
                        time,
                        model.dut1,
                    );
                    (
                        precession_info.lmst_j2000,
                        precession_info.array_latitude_j2000,
                    )
                } else {
                    (get_lmst(longitude, time, model.dut1), latitude)
                }
            })
            .unzip();
        LstTrack {
            station,
            lsts,
            latitudes,
        }
    }

    pub fn station(&self) -> &'a Station {
        self.station
    }

    pub fn len(&self) -> usize {
        self.lsts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lsts.is_empty()
    }

    /// The elevation \[degrees\] of `radec` at the `i`th timestamp.
    pub fn elevation_at(&self, i: usize, radec: RADec) -> f64 {
        radec
            .to_hadec(self.lsts[i])
            .to_azel(self.latitudes[i])
            .el
            .to_degrees()
    }

    /// The elevations \[degrees\] of `radec` at every timestamp.
    pub fn elevations(&self, radec: RADec) -> Vec<f64> {
        (0..self.len()).map(|i| self.elevation_at(i, radec)).collect()
    }

    /// Is `radec` at or above `min_elevation_deg` at any timestamp?
    pub fn is_visible(&self, radec: RADec, min_elevation_deg: f64) -> bool {
        (0..self.len()).any(|i| self.elevation_at(i, radec) >= min_elevation_deg)
    }
}

/// The elevations and visibility of a source at a single station, for
/// plotting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElevationTrace {
    /// The station code.
    pub station: String,

    /// \[degrees\]
    pub elevations_deg: Vec<f64>,

    /// Whether each elevation is at or above the elevation limit.
    pub visible: Vec<bool>,
}

/// The elevations \[degrees\] of a source at a station over some timestamps.
pub fn elevation(
    station: &Station,
    radec: RADec,
    times: &[Epoch],
    model: ElevationModel,
) -> Vec<f64> {
    LstTrack::new(station, times, model).elevations(radec)
}

/// Is the source ever at or above the elevation limit at this station?
pub fn is_visible(
    station: &Station,
    radec: RADec,
    times: &[Epoch],
    min_elevation_deg: f64,
    model: ElevationModel,
) -> bool {
    LstTrack::new(station, times, model).is_visible(radec, min_elevation_deg)
}

/// Is the source visible (see [`is_visible`]) at every station? Each station
/// is checked independently over the whole of `times`; the stations needn't
/// see the source at the same time.
pub fn joint_visible(
    stations: &[&Station],
    radec: RADec,
    times: &[Epoch],
    min_elevation_deg: f64,
    model: ElevationModel,
) -> bool {
    let tracks = make_tracks(stations, times, model);
    VisibilityPolicy::Ever.is_satisfied(&tracks, radec, min_elevation_deg)
}

/// Is there a timestamp at which every station has the source at or above the
/// elevation limit?
pub fn simultaneously_visible(
    stations: &[&Station],
    radec: RADec,
    times: &[Epoch],
    min_elevation_deg: f64,
    model: ElevationModel,
) -> bool {
    let tracks = make_tracks(stations, times, model);
    VisibilityPolicy::Simultaneous.is_satisfied(&tracks, radec, min_elevation_deg)
}

/// Elevation traces of a source for each station, in station order.
pub fn elevation_traces(
    stations: &[&Station],
    radec: RADec,
    times: &[Epoch],
    min_elevation_deg: f64,
    model: ElevationModel,
) -> Vec<ElevationTrace> {
    traces_from_tracks(&make_tracks(stations, times, model), radec, min_elevation_deg)
}

/// Elevation traces of a source for the stations behind `tracks`, in track
/// order.
pub fn traces_from_tracks(
    tracks: &[LstTrack],
    radec: RADec,
    min_elevation_deg: f64,
) -> Vec<ElevationTrace> {
    tracks
        .iter()
        .map(|track| {
            let elevations_deg = track.elevations(radec);
            let visible = elevations_deg
                .iter()
                .map(|&el| el >= min_elevation_deg)
                .collect();
            ElevationTrace {
                station: track.station().code.clone(),
                elevations_deg,
                visible,
            }
        })
        .collect()
}

/// Compute the [`LstTrack`] of each station.
pub fn make_tracks<'a>(
    stations: &[&'a Station],
    times: &[Epoch],
    model: ElevationModel,
) -> Vec<LstTrack<'a>> {
    stations
        .iter()
        .map(|station| {
            trace!(
                "Computing {} LMSTs for station {}",
                times.len(),
                station.code
            );
            LstTrack::new(station, times, model)
        })
        .collect()
}
