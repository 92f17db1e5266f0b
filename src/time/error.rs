// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("Couldn't parse '{0}' as a time; expected 'YYYY-MM-DD HH:MM[:SS.S]', 'YYYY-MM-DDTHH:MM[:SS.S]' or 'DD/MM/YYYY HH:MM'")]
    Format(String),

    #[error("'{0}' isn't a valid UTC date and time")]
    InvalidDate(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ObservationWindowError {
    #[error("The observation duration must be a non-negative number of hours, but got {0}")]
    InvalidDuration(f64),

    #[error("The sampling interval must be a positive number of hours, but got {0}")]
    InvalidInterval(f64),
}
