// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Errors associated with reading in a station registry.
#[derive(Error, Debug)]
pub enum ReadRegistryError {
    #[error("Couldn't open station registry '{path}': {err}")]
    Open { path: String, err: std::io::Error },

    #[error(transparent)]
    Malformed(#[from] MalformedRegistryError),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}

/// Structural problems with the contents of a station registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedRegistryError {
    #[error("Station registry has no header line")]
    NoHeader,

    #[error("Station registry header is missing the required column '{0}'")]
    MissingColumn(&'static str),

    #[error("Station registry header has the column '{0}' more than once")]
    DuplicateColumn(String),

    #[error("Station registry header has an SEFD column without a band ('{0}')")]
    EmptySefdBand(String),

    #[error("Station registry line {line_num}: Expected {expected} fields, but got {got}")]
    WrongFieldCount {
        line_num: u32,
        expected: usize,
        got: usize,
    },

    #[error("Station registry line {0}: A quoted field isn't terminated")]
    UnterminatedQuote(u32),

    #[error("Station registry line {line_num}: Couldn't parse '{string}' in column '{column}' as a number")]
    ParseFloat {
        line_num: u32,
        column: String,
        string: String,
    },

    #[error("Station registry line {line_num}: Station {code}'s position isn't a geocentric position on the Earth")]
    InvalidPosition { line_num: u32, code: String },

    #[error("Station registry line {line_num}: Station code {code} was already used")]
    DuplicateCode { line_num: u32, code: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Station {code} has no SEFD for band '{band}'")]
pub struct UnsupportedBandError {
    pub code: String,
    pub band: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Station '{code}' isn't in the station registry")]
pub struct StationNotFoundError {
    pub code: String,
}
