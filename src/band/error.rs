// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

use super::BAND_TOKENS_COMMA_SEPARATED;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown band '{token}'; valid bands are: {}", *BAND_TOKENS_COMMA_SEPARATED)]
pub struct UnknownBandError {
    pub token: String,
}
