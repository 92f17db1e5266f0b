// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Selection of fringe-finder calibrators for VLBI observations.

Given a station registry, a calibrator catalogue and an observation window,
find the brightest catalogue sources that every station can see.
 */

pub mod band;
pub mod catalogue;
mod cli;
pub mod constants;
mod misc;
mod params;
pub mod report;
pub mod selection;
pub mod sexagesimal;
pub mod station;
pub mod time;
pub mod visibility;

use crossbeam_utils::atomic::AtomicCell;

/// Should progress bars be drawn? The command-line interface turns these on
/// unless asked not to.
pub static PROGRESS_BARS: AtomicCell<bool> = AtomicCell::new(false);

// Re-exports.
pub use band::{map_band, Band, UnknownBandError};
pub use catalogue::{read_catalogue_file, Flux, Source};
pub use cli::{FringeFinder, FringeFinderError};
pub use selection::{rank, select, select_and_rank, top_n};
pub use station::{Station, StationRegistry};
pub use time::ObservationWindow;
pub use visibility::{ElevationModel, VisibilityPolicy};
