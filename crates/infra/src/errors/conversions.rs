//! Conversions from external infrastructure errors into domain errors.

use minutes_domain::MinutesError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;
use url::ParseError as UrlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub MinutesError);

impl From<InfraError> for MinutesError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<MinutesError> for InfraError {
    fn from(value: MinutesError) -> Self {
        InfraError(value)
    }
}

trait IntoMinutesError {
    fn into_minutes(self) -> MinutesError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → MinutesError */
/* -------------------------------------------------------------------------- */

impl IntoMinutesError for HttpError {
    fn into_minutes(self) -> MinutesError {
        if self.is_timeout() {
            return MinutesError::Network("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return MinutesError::Network("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let reason = status.canonical_reason().unwrap_or("unknown status");
            return match code {
                401 => MinutesError::unauthorized(None),
                _ => MinutesError::api(code, reason),
            };
        }

        if self.is_builder() {
            return MinutesError::InvalidInput(format!("invalid HTTP request: {self}"));
        }

        MinutesError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_minutes())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → MinutesError */
/* -------------------------------------------------------------------------- */

impl IntoMinutesError for JsonError {
    fn into_minutes(self) -> MinutesError {
        if self.is_io() {
            return MinutesError::Internal(format!("JSON I/O failure: {self}"));
        }
        MinutesError::Decode(self.to_string())
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_minutes())
    }
}

/* -------------------------------------------------------------------------- */
/* url::ParseError → MinutesError */
/* -------------------------------------------------------------------------- */

impl IntoMinutesError for UrlError {
    fn into_minutes(self) -> MinutesError {
        MinutesError::Config(format!("invalid API base URL: {self}"))
    }
}

impl From<UrlError> for InfraError {
    fn from(value: UrlError) -> Self {
        InfraError(value.into_minutes())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
