// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! List the stations in a registry.

use std::path::PathBuf;

use clap::Parser;
use itertools::Itertools;
use log::{info, warn};

use super::common::STATIONS_FILE_HELP;
use crate::{
    constants::DEFAULT_STATIONS_FILE, report::station_table, station::StationRegistry,
    FringeFinderError,
};

#[derive(Parser, Debug, Clone, Default)]
pub(super) struct StationsArgs {
    #[clap(long, help = STATIONS_FILE_HELP.as_str(), parse(from_os_str))]
    stations_file: Option<PathBuf>,

    /// Only list stations with a SEFD for this band, e.g. 6cm (the name of a
    /// registry column without its "SEFD-" prefix).
    #[clap(short, long)]
    band: Option<String>,
}

impl StationsArgs {
    pub(super) fn run(self) -> Result<(), FringeFinderError> {
        let StationsArgs {
            stations_file,
            band,
        } = self;

        let stations_file = stations_file.unwrap_or_else(|| PathBuf::from(DEFAULT_STATIONS_FILE));
        let registry = StationRegistry::read_file(&stations_file)?;
        let stations = registry
            .iter()
            .filter(|s| band.as_deref().map(|b| s.has_frequency(b)).unwrap_or(true))
            .collect::<Vec<_>>();

        match band.as_deref() {
            Some(band) => {
                let known_bands = registry
                    .iter()
                    .flat_map(|s| s.sefds.keys())
                    .unique()
                    .join(", ");
                if stations.is_empty() {
                    warn!(
                        "No station in {} has a SEFD for '{band}'; known bands: {known_bands}",
                        stations_file.display()
                    );
                    return Ok(());
                }
                info!(
                    "{} of {} stations in {} observe at {band}",
                    stations.len(),
                    registry.len(),
                    stations_file.display()
                );
            }
            None => info!("{} stations in {}", registry.len(), stations_file.display()),
        }

        for line in station_table(stations, band.as_deref()) {
            info!("{line}");
        }
        Ok(())
    }
}
