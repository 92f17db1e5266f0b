// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Errors associated with reading in a calibrator catalogue.
#[derive(Error, Debug)]
pub enum ReadCatalogueError {
    #[error("Couldn't open catalogue '{path}': {err}")]
    Open { path: String, err: std::io::Error },

    #[error(transparent)]
    Parse(#[from] CatalogueParseError),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}

/// Problems with individual catalogue rows.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogueParseError {
    #[error("Catalogue line {line_num}: Expected at least {expected} fields, but got {got}")]
    TooFewFields {
        line_num: u32,
        expected: usize,
        got: usize,
    },

    #[error("Catalogue line {line_num}: Couldn't parse '{string}' as the {column}")]
    ParseNumber {
        line_num: u32,
        column: &'static str,
        string: String,
    },

    #[error("Catalogue line {line_num}: RA '{string}' is out of range (0h <= RA < 24h)")]
    InvalidRa { line_num: u32, string: String },

    #[error("Catalogue line {line_num}: Dec '{string}' is out of range (-90° <= Dec <= 90°)")]
    InvalidDec { line_num: u32, string: String },

    #[error("Catalogue line {line_num}: Source {name} appears more than once")]
    DuplicateSource { line_num: u32, name: String },
}
