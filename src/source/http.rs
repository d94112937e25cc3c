use std::time::Duration;

use crate::error::SourceError;

#[cfg(feature = "network")]
pub fn fetch_url(url: &str, timeout: Duration) -> Result<String, SourceError> {
    let http_error = |err: reqwest::Error| SourceError::Http {
        url: url.to_string(),
        message: err.to_string(),
    };
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("keyline/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(http_error)?;
    let response = client.get(url).send().map_err(http_error)?;
    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    response.text().map_err(http_error)
}

#[cfg(not(feature = "network"))]
pub fn fetch_url(_url: &str, _timeout: Duration) -> Result<String, SourceError> {
    Err(SourceError::NetworkDisabled)
}
