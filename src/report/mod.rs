// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Presenting fringe-finder candidates and elevation traces, as text tables
//! or as json/yaml files.

mod error;

pub use error::WriteReportError;

use std::{
    borrow::Borrow,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
    str::FromStr,
};

use hifitime::Epoch;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::{
    band::Band,
    catalogue::Source,
    sexagesimal::{degrees_to_sexagesimal_dms, degrees_to_sexagesimal_hms},
    station::Station,
    time::format_utc,
    visibility::ElevationTrace,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum ReportOutputType {
    #[strum(serialize = "json")]
    Json,

    #[strum(to_string = "yaml", serialize = "yml")]
    Yaml,
}

lazy_static::lazy_static! {
    pub static ref REPORT_OUTPUT_TYPES_COMMA_SEPARATED: String = ReportOutputType::iter().join(", ");
}

impl ReportOutputType {
    /// Determine the output type from a file's extension.
    pub fn from_path(path: &Path) -> Option<ReportOutputType> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(|e| ReportOutputType::from_str(e).ok())
    }
}

/// A ranked fringe-finder candidate, flattened for output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    /// 1 is the brightest.
    pub rank: usize,
    pub name: String,
    pub ivs_name: String,
    pub calibrator: bool,
    /// Sexagesimal RA (hours).
    pub ra: String,
    /// Sexagesimal Dec (degrees).
    pub dec: String,
    pub ra_deg: f64,
    pub dec_deg: f64,
    pub num_obs: u32,
    pub band: Band,
    /// \[Jy\]
    pub resolved_flux: f64,
    /// \[Jy\]
    pub unresolved_flux: f64,
}

impl CandidateRecord {
    pub fn new(rank: usize, source: &Source, band: Band) -> CandidateRecord {
        let ra_deg = source.radec.ra.to_degrees();
        let dec_deg = source.radec.dec.to_degrees();
        let flux = source.flux(band);
        CandidateRecord {
            rank,
            name: source.name.clone(),
            ivs_name: source.ivs_name.clone(),
            calibrator: source.calibrator,
            ra: degrees_to_sexagesimal_hms(ra_deg),
            dec: degrees_to_sexagesimal_dms(dec_deg),
            ra_deg,
            dec_deg,
            num_obs: source.num_obs,
            band,
            resolved_flux: flux.resolved,
            unresolved_flux: flux.unresolved,
        }
    }
}

/// Convert ranked sources into records. Ranks start at 1.
pub fn candidate_records<S: Borrow<Source>>(sources: &[S], band: Band) -> Vec<CandidateRecord> {
    sources
        .iter()
        .enumerate()
        .map(|(i, s)| CandidateRecord::new(i + 1, s.borrow(), band))
        .collect()
}

/// Render candidates as the lines of a text table.
pub fn candidate_table(records: &[CandidateRecord]) -> Vec<String> {
    let band = records
        .first()
        .map(|r| r.band.to_string().to_uppercase())
        .unwrap_or_default();
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(format!(
        "{:>4}  {:<12} {:<10} {:<13} {:<13} {:>3} {:>6}  {:>10} {:>10}",
        "Rank",
        "J2000",
        "IVS",
        "RA",
        "Dec",
        "Cal",
        "#Obs",
        format!("{band} res/Jy"),
        format!("{band} unres/Jy"),
    ));
    for r in records {
        lines.push(format!(
            "{:>4}  {:<12} {:<10} {:<13} {:<13} {:>3} {:>6}  {:>10.3} {:>10.3}",
            r.rank,
            r.name,
            r.ivs_name,
            // Trim the RA and Dec precision for display.
            &r.ra[..r.ra.len() - 2],
            &r.dec[..r.dec.len() - 1],
            if r.calibrator { "Y" } else { "N" },
            r.num_obs,
            r.resolved_flux,
            r.unresolved_flux,
        ));
    }
    lines
}

/// Elevation traces of a single source, for plotting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceReport {
    pub source: String,
    pub ra: String,
    pub dec: String,
    pub min_elevation_deg: f64,
    /// "YYYY-MM-DD HH:MM:SS" (UTC).
    pub timestamps: Vec<String>,
    pub traces: Vec<ElevationTrace>,
}

impl TraceReport {
    pub fn new(
        source: String,
        ra_deg: f64,
        dec_deg: f64,
        min_elevation_deg: f64,
        times: &[Epoch],
        traces: Vec<ElevationTrace>,
    ) -> TraceReport {
        TraceReport {
            source,
            ra: degrees_to_sexagesimal_hms(ra_deg),
            dec: degrees_to_sexagesimal_dms(dec_deg),
            min_elevation_deg,
            timestamps: times.iter().copied().map(format_utc).collect(),
            traces,
        }
    }

    /// Render the traces as the lines of a text table; one row per timestamp
    /// and one column per station. Elevations below the limit are marked with
    /// a '*'.
    pub fn table(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.timestamps.len() + 1);
        lines.push(format!(
            "{:<19} {}",
            "UTC",
            self.traces
                .iter()
                .map(|t| format!("{:>8}", t.station))
                .join(" ")
        ));
        for (i, timestamp) in self.timestamps.iter().enumerate() {
            let row = self
                .traces
                .iter()
                .map(|t| {
                    let marker = if t.visible[i] { ' ' } else { '*' };
                    format!("{:>7.1}{marker}", t.elevations_deg[i])
                })
                .join(" ");
            lines.push(format!("{timestamp:<19} {row}"));
        }
        lines
    }
}

/// Render stations as the lines of a text table. If `sefd_band` is given,
/// only that band's SEFD is shown.
pub fn station_table<'a, I>(stations: I, sefd_band: Option<&str>) -> Vec<String>
where
    I: IntoIterator<Item = &'a Station>,
{
    let mut lines = vec![format!(
        "{:<10} {:<20} {:>10} {:>10} {:>9}  SEFDs/Jy",
        "Code", "Name", "Long/°", "Lat/°", "Height/m"
    )];
    for station in stations {
        let sefds = match sefd_band {
            Some(band) => station
                .sefds
                .get(band)
                .map(|sefd| format!("{band}: {sefd}"))
                .unwrap_or_default(),
            None => station
                .sefds
                .iter()
                .map(|(band, sefd)| format!("{band}: {sefd}"))
                .join(", "),
        };
        lines.push(format!(
            "{:<10} {:<20} {:>10.4} {:>10.4} {:>9.1}  {sefds}",
            station.code,
            station.name,
            station.position.longitude_rad.to_degrees(),
            station.position.latitude_rad.to_degrees(),
            station.position.height_metres,
        ));
    }
    lines
}

/// Write something serialisable to a json or yaml file; the format is
/// determined by the file extension.
pub fn write_report<T: Serialize + ?Sized, P: AsRef<Path>>(
    path: P,
    thing: &T,
) -> Result<(), WriteReportError> {
    let path = path.as_ref();
    let output_type = ReportOutputType::from_path(path)
        .ok_or_else(|| WriteReportError::UnknownOutputType(path.to_path_buf()))?;
    let mut buf = BufWriter::new(File::create(path).map_err(|err| WriteReportError::Create {
        path: path.to_path_buf(),
        err,
    })?);
    match output_type {
        ReportOutputType::Json => serde_json::to_writer_pretty(&mut buf, thing)?,
        ReportOutputType::Yaml => serde_yaml::to_writer(&mut buf, thing)?,
    }
    buf.flush()?;
    Ok(())
}
