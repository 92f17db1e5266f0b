// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use thiserror::Error;

use super::REPORT_OUTPUT_TYPES_COMMA_SEPARATED;

#[derive(Error, Debug)]
pub enum WriteReportError {
    #[error("Couldn't determine the output type of '{}'; supported extensions are: {}", .0.display(), *REPORT_OUTPUT_TYPES_COMMA_SEPARATED)]
    UnknownOutputType(PathBuf),

    #[error("Couldn't create '{}': {err}", .path.display())]
    Create { path: PathBuf, err: std::io::Error },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
