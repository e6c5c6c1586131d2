// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failure taxonomy for the core library. Every operation returns one of these
/// or a success value; the CLI layer wraps them with anyhow for display.
#[derive(Debug, Error)]
pub enum Error {
    /// Required credentials or connection settings were missing at startup.
    #[error("configuration error: {0}")]
    Config(String),

    /// Caller-supplied input violated a stated constraint. No partial effect.
    #[error("validation error: {0}")]
    Validation(String),

    /// The aggregation service call failed: transport error, non-2xx status,
    /// or a payload that did not parse.
    #[error("aggregation service error: {0}")]
    ExternalService(String),

    /// The storage layer rejected an operation. The surrounding transaction
    /// scope has been rolled back.
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl From<rusqlite::Error> for Error {
    fn from(e: rusqlite::Error) -> Self {
        Error::Persistence(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::ExternalService(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
