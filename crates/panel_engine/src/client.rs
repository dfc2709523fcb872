use std::time::Duration;

use panel_logging::{panel_debug, panel_warn};
use reqwest::{multipart, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::map_reqwest_error;
use crate::types::ErrorBody;
use crate::{BackendError, HistoryRecord, StartResponse, StatsResponse, StatusReply};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// The HTTP endpoints of the download backend.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    async fn start_download(
        &self,
        fields: &[(String, String)],
    ) -> Result<StartResponse, BackendError>;

    async fn status(&self, job_id: &str) -> Result<StatusReply, BackendError>;

    async fn history(&self) -> Result<Vec<HistoryRecord>, BackendError>;

    async fn stats(&self) -> Result<StatsResponse, BackendError>;

    async fn clear_history(&self) -> Result<(), BackendError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    base: Url,
    client: reqwest::Client,
}

impl ReqwestBackend {
    pub fn new(base_url: &str, settings: &ClientSettings) -> Result<Self, BackendError> {
        let mut base =
            Url::parse(base_url).map_err(|err| BackendError::InvalidUrl(err.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(BackendError::InvalidUrl(format!(
                "unsupported scheme {}",
                base.scheme()
            )));
        }
        // Endpoints are joined relative to the base path.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| BackendError::Network(err.to_string()))?;

        Ok(Self { base, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        self.base
            .join(path)
            .map_err(|err| BackendError::InvalidUrl(err.to_string()))
    }

    async fn read(
        &self,
        label: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<(StatusCode, Vec<u8>), BackendError> {
        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        panel_debug!("{label} -> {status} ({} bytes)", body.len());
        Ok((status, body.to_vec()))
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, BackendError> {
    serde_json::from_slice(body).map_err(|err| BackendError::Decode(err.to_string()))
}

fn http_error(status: StatusCode, body: &[u8]) -> BackendError {
    BackendError::HttpStatus {
        status: status.as_u16(),
        error: ErrorBody::parse(body),
    }
}

#[async_trait::async_trait]
impl Backend for ReqwestBackend {
    async fn start_download(
        &self,
        fields: &[(String, String)],
    ) -> Result<StartResponse, BackendError> {
        let form = fields
            .iter()
            .fold(multipart::Form::new(), |form, (name, value)| {
                form.text(name.clone(), value.clone())
            });
        let url = self.endpoint("start_download")?;
        let (status, body) = self.read("POST start_download", self.client.post(url).multipart(form)).await?;
        if !status.is_success() {
            return Err(http_error(status, &body));
        }

        let response: StartResponse = decode(&body)?;
        match response.job_id.as_deref() {
            Some(id) if !id.is_empty() => Ok(response),
            _ => Err(BackendError::MissingJobId {
                status: status.as_u16(),
                error: response.error.filter(|error| !error.is_empty()),
            }),
        }
    }

    async fn status(&self, job_id: &str) -> Result<StatusReply, BackendError> {
        let mut url = self.endpoint("status")?;
        url.query_pairs_mut().append_pair("job_id", job_id);
        let (status, body) = self.read("GET status", self.client.get(url)).await?;
        if status == StatusCode::NOT_FOUND {
            return Ok(StatusReply::NotFound {
                error: ErrorBody::parse(&body),
            });
        }
        if !status.is_success() {
            return Err(http_error(status, &body));
        }
        Ok(StatusReply::Found(decode(&body)?))
    }

    async fn history(&self) -> Result<Vec<HistoryRecord>, BackendError> {
        let url = self.endpoint("history")?;
        let (status, body) = self.read("GET history", self.client.get(url)).await?;
        if !status.is_success() {
            return Err(http_error(status, &body));
        }
        let value: serde_json::Value = decode(&body)?;
        if !value.is_array() {
            panel_warn!("History response is not a list; treating as empty");
            return Ok(Vec::new());
        }
        serde_json::from_value(value).map_err(|err| BackendError::Decode(err.to_string()))
    }

    async fn stats(&self) -> Result<StatsResponse, BackendError> {
        let url = self.endpoint("stats")?;
        let (status, body) = self.read("GET stats", self.client.get(url)).await?;
        if !status.is_success() {
            return Err(http_error(status, &body));
        }
        decode(&body)
    }

    async fn clear_history(&self) -> Result<(), BackendError> {
        let url = self.endpoint("clear_history")?;
        let (status, body) = self.read("POST clear_history", self.client.post(url)).await?;
        if !status.is_success() {
            return Err(http_error(status, &body));
        }
        Ok(())
    }
}
