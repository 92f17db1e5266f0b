// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Radio frequency bands.
//!
//! Calibrator catalogues only carry flux densities for a handful of bands. A
//! user may ask for a band that isn't in the catalogue (e.g. L band); such
//! requests are mapped onto the nearest catalogue band.

mod error;

pub use error::UnknownBandError;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// A band that calibrator catalogues have flux densities for. The variants are
/// in the order of the catalogue's flux-density columns.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumIter,
    strum_macros::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Band {
    /// 2.3 GHz
    S,
    /// 5 GHz
    C,
    /// 8.4 GHz
    X,
    /// 15 GHz
    U,
    /// 22 GHz
    K,
}

impl Band {
    /// The position of this band's (resolved, unresolved) flux-density pair
    /// amongst all catalogue flux-density pairs.
    pub fn column_index(self) -> usize {
        match self {
            Band::S => 0,
            Band::C => 1,
            Band::X => 2,
            Band::U => 3,
            Band::K => 4,
        }
    }
}

/// All of the band tokens a user may request, paired with the catalogue band
/// they map onto.
pub const BAND_TOKENS: [(&str, Band); 8] = [
    ("l", Band::S),
    ("s", Band::S),
    ("c", Band::C),
    ("m", Band::C),
    ("x", Band::X),
    ("u", Band::U),
    ("k", Band::K),
    ("q", Band::K),
];

lazy_static::lazy_static! {
    pub static ref BAND_TOKENS_COMMA_SEPARATED: String =
        BAND_TOKENS.iter().map(|(t, _)| t).join(", ");

    pub static ref CATALOGUE_BANDS_COMMA_SEPARATED: String = Band::iter().join(", ");
}

/// Map a user-supplied band token onto a catalogue band. Tokens are
/// case-insensitive and surrounding whitespace is ignored.
pub fn map_band(token: &str) -> Result<Band, UnknownBandError> {
    let lower = token.trim().to_lowercase();
    BAND_TOKENS
        .iter()
        .find(|(t, _)| *t == lower)
        .map(|&(_, band)| band)
        .ok_or_else(|| UnknownBandError {
            token: token.to_string(),
        })
}
