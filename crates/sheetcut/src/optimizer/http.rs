//! JSON over HTTP optimizer backend.

use log::{debug, warn};
use serde::Deserialize;

use super::{CutRequest, CutResponse, Optimizer, OptimizerError};
use crate::config::OptimizerConfig;

/// Error payload returned by the optimizer service on failure.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Posts cut requests as JSON to a remote optimizer service.
#[derive(Debug, Clone)]
pub struct HttpOptimizer {
    client: reqwest::Client,
    url: String,
}

impl HttpOptimizer {
    /// Creates an optimizer posting to `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    /// Creates an optimizer from the optimizer configuration section.
    pub fn from_config(config: &OptimizerConfig) -> Self {
        Self::new(config.url())
    }

    /// Returns the endpoint this optimizer posts to.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Optimizer for HttpOptimizer {
    async fn optimize(&self, request: &CutRequest) -> Result<CutResponse, OptimizerError> {
        debug!(url = self.url, elements = request.elements.len(); "Sending cut request");

        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|err| {
                warn!(url = self.url, err:%; "Optimizer request failed");
                OptimizerError::default()
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message);
            warn!(status = status.as_u16(), message:?; "Optimizer rejected cut request");
            return Err(OptimizerError::new(Some(status.as_u16()), message));
        }

        response.json::<CutResponse>().await.map_err(|err| {
            warn!(err:%; "Optimizer returned an unreadable response");
            OptimizerError::new(Some(status.as_u16()), None)
        })
    }
}
