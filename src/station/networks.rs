// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Preset groups of stations that commonly observe together.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Network {
    /// The European VLBI Network.
    #[strum(serialize = "EVN")]
    #[serde(rename = "EVN")]
    Evn,

    /// The real-time subset of the EVN.
    #[strum(serialize = "e-EVN")]
    #[serde(rename = "e-EVN")]
    EEvn,

    #[strum(serialize = "eMERLIN")]
    #[serde(rename = "eMERLIN")]
    EMerlin,

    /// The Very Long Baseline Array, with its usual partners.
    #[strum(serialize = "VLBA")]
    #[serde(rename = "VLBA")]
    Vlba,

    /// The (Australian) Long Baseline Array.
    #[strum(serialize = "LBA")]
    #[serde(rename = "LBA")]
    Lba,

    /// The Korean VLBI Network.
    #[strum(serialize = "KVN")]
    #[serde(rename = "KVN")]
    Kvn,
}

impl Network {
    /// The registry codes of the stations in this network.
    pub fn station_codes(self) -> &'static [&'static str] {
        match self {
            Network::Evn => &[
                "EF", "MC", "ON", "TR", "JB2", "WB", "NT", "SH", "YS", "HH", "UR", "SV", "ZC",
                "BD", "IR", "MH", "SR", "KM",
            ],
            Network::EEvn => &[
                "EF", "MC", "ON", "TR", "JB2", "WB", "NT", "SH", "YS", "HH", "IR",
            ],
            Network::EMerlin => &["CM", "KN", "TA", "DE", "DA"],
            Network::Vlba => &[
                "VLBA-BR", "VLBA-FD", "GBT", "VLBA-HN", "VLBA-KP", "VLBA-LA", "VLBA-MK",
                "VLBA-NL", "VLBA-OV", "PT", "VLBA-SC", "VLA",
            ],
            Network::Lba => &["HO", "PA", "ATCA", "CD", "MO", "TD", "WW"],
            Network::Kvn => &["KVN"],
        }
    }
}

lazy_static::lazy_static! {
    pub static ref NETWORKS_COMMA_SEPARATED: String = Network::iter().join(", ");
}
