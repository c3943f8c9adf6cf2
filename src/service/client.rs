// SPDX-License-Identifier: MPL-2.0
//! HTTP client for the colorization backend.

use super::error::ColorizeError;
use crate::media::{IntakeError, SourceFile};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// User agent sent with every request.
const USER_AGENT: &str = concat!("IcedColorizer/", env!("CARGO_PKG_VERSION"));

/// Multipart field name expected by `POST /colorize`.
pub const COLORIZE_FIELD: &str = "file";

/// Multipart field name expected by `POST /upload`.
pub const UPLOAD_FIELD: &str = "uploaded_file";

/// MIME type of files sent without content sniffing.
pub const GENERIC_MIME: &str = "application/octet-stream";

/// Health checks must answer quickly; they never use the long colorize timeout.
const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// The file part of an outgoing request.
#[derive(Debug, Clone)]
pub struct UploadPayload {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Arc<Vec<u8>>,
}

impl UploadPayload {
    /// Reads any file as-is for `POST /upload`. The content is not checked.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::Io`] when the file cannot be read.
    pub fn read(path: &Path) -> Result<Self, IntakeError> {
        let bytes = std::fs::read(path).map_err(|e| IntakeError::Io(e.to_string()))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            file_name,
            mime: GENERIC_MIME,
            bytes: Arc::new(bytes),
        })
    }
}

impl From<&SourceFile> for UploadPayload {
    fn from(source: &SourceFile) -> Self {
        Self {
            file_name: source.name.clone(),
            mime: source.mime,
            bytes: Arc::clone(&source.bytes),
        }
    }
}

/// JSON body returned by `POST /upload`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadReceipt {
    pub filename: String,
}

/// JSON body returned by `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub model_loaded: bool,
}

/// Reachability of the backend as shown in the navbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServiceHealth {
    #[default]
    Unknown,
    Checking,
    Online,
    ModelNotLoaded,
    Offline,
}

impl ServiceHealth {
    /// Classifies the outcome of a health request.
    #[must_use]
    pub fn from_result(result: &Result<HealthStatus, ColorizeError>) -> Self {
        match result {
            Ok(status) if status.model_loaded => ServiceHealth::Online,
            Ok(_) => ServiceHealth::ModelNotLoaded,
            Err(_) => ServiceHealth::Offline,
        }
    }

    /// Returns the i18n key describing this state.
    pub fn i18n_key(self) -> &'static str {
        match self {
            ServiceHealth::Unknown => "service-status-unknown",
            ServiceHealth::Checking => "service-status-checking",
            ServiceHealth::Online => "service-status-online",
            ServiceHealth::ModelNotLoaded => "service-status-model-missing",
            ServiceHealth::Offline => "service-status-offline",
        }
    }
}

/// Client for the colorization service. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ColorizeClient {
    http: reqwest::Client,
    base_url: String,
}

impl ColorizeClient {
    /// Builds a client for `endpoint` with a per-request `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`ColorizeError::Transport`] if the TLS backend cannot be
    /// initialized.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, ColorizeError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ColorizeError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: endpoint.trim().trim_end_matches('/').to_string(),
        })
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    /// Sends one image to `POST /colorize` and returns the response body.
    ///
    /// # Errors
    ///
    /// Returns [`ColorizeError::Status`] for non-2xx responses,
    /// [`ColorizeError::Timeout`] when the timeout elapses, and
    /// [`ColorizeError::Transport`] for connection failures.
    pub async fn colorize(&self, payload: UploadPayload) -> Result<Arc<Vec<u8>>, ColorizeError> {
        log::debug!(
            "POST {} ({}, {} bytes)",
            self.url("colorize"),
            payload.file_name,
            payload.bytes.len()
        );
        let form = Form::new().part(COLORIZE_FIELD, file_part(payload)?);
        let response = self
            .http
            .post(self.url("colorize"))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ColorizeError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(Arc::new(body.to_vec()))
    }

    /// Sends a file to `POST /upload` and returns the stored file name.
    ///
    /// # Errors
    ///
    /// Same as [`ColorizeClient::colorize`], plus
    /// [`ColorizeError::InvalidResponse`] when the JSON lacks `filename`.
    pub async fn upload(&self, payload: UploadPayload) -> Result<UploadReceipt, ColorizeError> {
        let form = Form::new().part(UPLOAD_FIELD, file_part(payload)?);
        let response = self
            .http
            .post(self.url("upload"))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ColorizeError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Queries `GET /health`.
    ///
    /// # Errors
    ///
    /// Any transport, status or JSON failure.
    pub async fn health(&self) -> Result<HealthStatus, ColorizeError> {
        let response = self
            .http
            .get(self.url("health"))
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ColorizeError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

fn file_part(payload: UploadPayload) -> Result<Part, ColorizeError> {
    let bytes = Arc::try_unwrap(payload.bytes).unwrap_or_else(|shared| shared.as_ref().clone());
    Part::bytes(bytes)
        .file_name(payload.file_name)
        .mime_str(payload.mime)
        .map_err(|e| ColorizeError::Transport(e.to_string()))
}
