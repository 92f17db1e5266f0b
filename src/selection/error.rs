// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

use crate::{band::UnknownBandError, time::ObservationWindowError};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectError {
    #[error(transparent)]
    UnknownBand(#[from] UnknownBandError),

    #[error("No stations were supplied; at least one is needed to select sources")]
    NoStations,

    #[error(transparent)]
    Window(#[from] ObservationWindowError),
}
