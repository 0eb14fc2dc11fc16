//! Remote CSV fetching with a bounded timeout.

use std::io::Read;
use std::time::Duration;

use thiserror::Error;

/// Timeout applied to the whole request. Remote loads fail fast rather
/// than hang an interactive session.
const FETCH_TIMEOUT: Duration = Duration::from_secs(20);

/// Errors that can occur while fetching a remote source.
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("HTTP error {status}: {message}")]
    HttpStatus { status: u16, message: String },
    #[error("Network error: {0}")]
    Network(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ureq::Error> for HttpError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(code) => HttpError::HttpStatus {
                status: code,
                message: format!("Server returned status {code}"),
            },
            _ => HttpError::Network(err.to_string()),
        }
    }
}

/// Fetch the full payload at `url`.
///
/// A non-2xx status, transport failure or timeout is an error; no partial
/// payload is ever returned.
pub fn fetch_url(url: &str) -> Result<Vec<u8>, HttpError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(HttpError::InvalidUrl(format!(
            "URL must start with http:// or https://: {url}"
        )));
    }

    let config = ureq::Agent::config_builder()
        .timeout_global(Some(FETCH_TIMEOUT))
        .build();
    let agent = ureq::Agent::new_with_config(config);

    let response = agent.get(url).call()?;

    let body = response.into_body();
    let mut reader = body.into_reader();
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;

    Ok(data)
}
