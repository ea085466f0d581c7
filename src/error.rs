use crate::freight::error::FreightError;
use serde_json::Error as SerdeJsonError;
use std::io::Error as StdIoError;
use std::result::Result as StdResult;
use thiserror::Error as ThisError;
use toml::de::Error as TomlDeError;

pub type Result<T> = StdResult<T, Error>;

#[derive(ThisError, Debug)]
pub enum Error {
    #[error("StdIoError: {0:?}")]
    StdIo(#[from] StdIoError),

    #[error("FreightError: {0:?}")]
    Freight(#[from] FreightError),

    #[error("TomlDeError: {0:?}")]
    TomlDe(#[from] TomlDeError),

    #[error("SerdeJsonError: {0:?}")]
    SerdeJson(#[from] SerdeJsonError),

    #[error("{0}")]
    Custom(String),
}
