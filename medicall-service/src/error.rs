use medicall_flow::FlowError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error(transparent)]
    Flow(#[from] FlowError),

    #[error(transparent)]
    Places(#[from] PlacesError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Failures talking to the places search API
#[derive(Error, Debug)]
pub enum PlacesError {
    #[error("Places request failed: {0}")]
    Transport(String),

    #[error("Places API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Places API returned an unexpected body: {0}")]
    UnexpectedBody(String),
}

/// Failures invoking the generative model
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Model request failed: {0}")]
    Request(String),

    #[error("Model returned an empty reply")]
    EmptyReply,
}

/// Failures pulling a JSON object out of a free-text model reply
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("No JSON object found in reply")]
    NoJsonObject,

    #[error("Invalid JSON in reply: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Reply JSON is not an object")]
    NotAnObject,
}

pub type Result<T> = std::result::Result<T, DispatchError>;
