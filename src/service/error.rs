// SPDX-License-Identifier: MPL-2.0
use std::fmt;

/// Errors returned by the colorization service client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorizeError {
    /// The request never produced a response (connection refused, DNS, TLS...).
    Transport(String),
    /// The request exceeded the configured timeout.
    Timeout,
    /// The service answered with a non-success status code.
    Status(u16),
    /// The response body is not a decodable image.
    InvalidPayload(String),
    /// The response body could not be parsed as the expected JSON.
    InvalidResponse(String),
}

impl ColorizeError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            ColorizeError::Transport(_) => "error-service-transport",
            ColorizeError::Timeout => "error-service-timeout",
            ColorizeError::Status(_) => "error-service-status",
            ColorizeError::InvalidPayload(_) => "error-service-payload",
            ColorizeError::InvalidResponse(_) => "error-service-response",
        }
    }
}

impl fmt::Display for ColorizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorizeError::Transport(msg) => write!(f, "Connection failed: {msg}"),
            ColorizeError::Timeout => write!(f, "Request timed out"),
            ColorizeError::Status(code) => write!(f, "Service returned HTTP {code}"),
            ColorizeError::InvalidPayload(msg) => write!(f, "Invalid image payload: {msg}"),
            ColorizeError::InvalidResponse(msg) => write!(f, "Invalid response: {msg}"),
        }
    }
}

impl std::error::Error for ColorizeError {}

impl From<reqwest::Error> for ColorizeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ColorizeError::Timeout
        } else if let Some(status) = err.status() {
            ColorizeError::Status(status.as_u16())
        } else {
            ColorizeError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ColorizeError {
    fn from(err: serde_json::Error) -> Self {
        ColorizeError::InvalidResponse(err.to_string())
    }
}

impl From<crate::error::Error> for ColorizeError {
    fn from(err: crate::error::Error) -> Self {
        ColorizeError::InvalidPayload(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display_includes_code() {
        assert_eq!(ColorizeError::Status(500).to_string(), "Service returned HTTP 500");
    }

    #[test]
    fn every_variant_has_a_distinct_key() {
        let keys = [
            ColorizeError::Transport(String::new()).i18n_key(),
            ColorizeError::Timeout.i18n_key(),
            ColorizeError::Status(404).i18n_key(),
            ColorizeError::InvalidPayload(String::new()).i18n_key(),
            ColorizeError::InvalidResponse(String::new()).i18n_key(),
        ];
        let mut unique = keys.to_vec();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), keys.len());
    }

    #[test]
    fn json_errors_become_invalid_response() {
        let err: ColorizeError = serde_json::from_str::<serde_json::Value>("{")
            .expect_err("truncated json")
            .into();
        assert!(matches!(err, ColorizeError::InvalidResponse(_)));
    }

    #[test]
    fn decode_errors_become_invalid_payload() {
        let err: ColorizeError = crate::error::Error::Image("bad".into()).into();
        assert_eq!(err, ColorizeError::InvalidPayload("Image Error: bad".into()));
    }
}
