// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parameters that are kept modular to be used by multiple `fringe-finder`
//! subcommands.
//!
//! The code here is kind of "mirroring" the code within the `cli` module; the
//! idea is that `cli` is unparsed, user-facing code, whereas parameters have
//! been parsed and are ready to be used directly.

mod elevation;
mod fringe_select;

pub(crate) use elevation::{ElevationError, ElevationParams};
pub(crate) use fringe_select::{FringeSelectError, FringeSelectParams};

use hifitime::Epoch;
use vec1::Vec1;

use crate::{
    station::{Station, StationNotFoundError, StationRegistry},
    visibility::ElevationModel,
};

/// Where and when an observation happens.
pub(crate) struct ObservationParams {
    pub(crate) registry: StationRegistry,

    /// The codes of the observing stations. All of these are in the registry.
    pub(crate) station_codes: Vec1<String>,

    pub(crate) start: Epoch,

    /// \[hours\]
    pub(crate) duration_h: f64,

    /// The time between elevation samples \[hours\].
    pub(crate) interval_h: f64,

    /// \[degrees\]
    pub(crate) min_elevation_deg: f64,

    pub(crate) model: ElevationModel,
}

impl ObservationParams {
    pub(crate) fn stations(&self) -> Result<Vec<&Station>, StationNotFoundError> {
        self.registry.get_many(&self.station_codes)
    }
}
