//! Client side of the container healthcheck: `minecraft-log-hook healthcheck`
//! checks the running server's `/health` route over loopback.

use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

/// Port checked when neither `--port` nor `APP_PORT` is given.
pub const DEFAULT_HTTP_PORT: u16 = 8000;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Error, Debug)]
pub enum HealthcheckError {
    #[error("Failed to build healthcheck client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Health endpoint at {url} unreachable: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Health endpoint at {url} returned status {status}")]
    Unhealthy { url: String, status: StatusCode },
}

/// GET `http://127.0.0.1:<port>/health` and require a 2xx answer.
pub async fn check_health(port: u16) -> Result<(), HealthcheckError> {
    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(HealthcheckError::Client)?;

    let url = format!("http://127.0.0.1:{port}/health");
    let status = client
        .get(&url)
        .send()
        .await
        .map_err(|source| HealthcheckError::Unreachable {
            url: url.clone(),
            source,
        })?
        .status();

    if status.is_success() {
        Ok(())
    } else {
        Err(HealthcheckError::Unhealthy { url, status })
    }
}
