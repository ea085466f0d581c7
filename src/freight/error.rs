use reqwest::Error as ReqwestError;
use reqwest::header::InvalidHeaderValue;
use std::result::Result as StdResult;
use thiserror::Error;

pub type Result<T> = StdResult<T, FreightError>;

#[derive(Error, Debug)]
pub enum FreightError {
    #[error("ReqwestError: {0:?}")]
    Reqwest(#[from] ReqwestError),

    #[error("InvalidHeaderValue: {0:?}")]
    InvalidHeader(#[from] InvalidHeaderValue),

    #[error("{0}")]
    Custom(String),
}
