use hyper::{http::Error as HttpError, Error as HyperError, StatusCode};
use rigdash_models::AssetId;
use serde_json::Error as SerdeError;
use std::{
    error::Error as StdError,
    fmt::{Display, Formatter, Result as FmtResult},
};

#[derive(Debug)]
pub enum Error {
    BuildingRequest(HttpError),
    /// The request never got a response, e.g. the connection dropped
    Request(HyperError),
    Parsing(SerdeError),
    APIError(StatusCode),
    NotFound(AssetId),
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Error::APIError(status) => write!(f, "API Error - {}", status),
            Error::BuildingRequest(err) => write!(f, "Building Request Error - {}", err),
            Error::NotFound(asset_id) => write!(f, "Asset {} was not found", asset_id),
            Error::Parsing(err) => write!(f, "Parsing Error - {}", err),
            Error::Request(err) => write!(f, "Request Error - {}", err),
        }
    }
}

impl From<HttpError> for Error {
    fn from(err: HttpError) -> Self {
        Error::BuildingRequest(err)
    }
}

impl From<HyperError> for Error {
    fn from(err: HyperError) -> Self {
        Error::Request(err)
    }
}

impl From<SerdeError> for Error {
    fn from(err: SerdeError) -> Self {
        Error::Parsing(err)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::BuildingRequest(err) => Some(err),
            Error::Request(err) => Some(err),
            Error::Parsing(err) => Some(err),
            Error::APIError(_) | Error::NotFound(_) => None,
        }
    }
}
