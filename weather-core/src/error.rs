use thiserror::Error;

/// Failures the fetch pipeline can surface to its caller.
///
/// The cache never produces any of these: its faults are absorbed and
/// reported as a miss. Each kind maps to its own process exit code so the
/// CLI can dispatch on it in one place.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Timeout, connection failure or an unexpected (non-404) HTTP status.
    #[error("Network failure: {message}")]
    Network { message: String, status: Option<u16> },

    /// HTTP 404, or a 200 response whose `nearest_area` is empty.
    #[error("Location '{0}' was not recognized")]
    LocationNotFound(String),

    /// The body is not JSON or is missing required fields.
    #[error("Invalid response from server: {0}")]
    InvalidPayload(String),

    /// A shape-valid snapshot whose numeric fields cannot be parsed.
    #[error("Malformed weather data: {0}")]
    MalformedData(String),
}

impl WeatherError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network { message: message.into(), status: None }
    }

    pub fn http_status(status: u16) -> Self {
        Self::Network { message: format!("unexpected HTTP status {status}"), status: Some(status) }
    }

    pub fn location_not_found(location: Option<&str>) -> Self {
        Self::LocationNotFound(location.unwrap_or(AUTO_LOCATION_LABEL).to_string())
    }

    pub fn invalid_payload(message: impl Into<String>) -> Self {
        Self::InvalidPayload(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedData(message.into())
    }

    /// Process exit code for this kind of failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            WeatherError::LocationNotFound(_) => 2,
            WeatherError::InvalidPayload(_) => 3,
            WeatherError::MalformedData(_) => 4,
            WeatherError::Network { .. } => 7,
        }
    }
}

/// How an auto-detected location is named in error messages.
const AUTO_LOCATION_LABEL: &str = "auto-detected location";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct_per_kind() {
        let codes = [
            WeatherError::network("boom").exit_code(),
            WeatherError::location_not_found(Some("Atlantis")).exit_code(),
            WeatherError::invalid_payload("bad").exit_code(),
            WeatherError::malformed("NaN").exit_code(),
        ];

        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(codes.iter().all(|code| *code != 0 && *code != 1));
    }

    #[test]
    fn not_found_message_embeds_location() {
        let err = WeatherError::location_not_found(Some("Atlantis"));
        assert!(err.to_string().contains("Atlantis"));

        let err = WeatherError::location_not_found(None);
        assert!(err.to_string().contains("auto-detected"));
    }

    #[test]
    fn http_status_keeps_numeric_code() {
        match WeatherError::http_status(503) {
            WeatherError::Network { status, message } => {
                assert_eq!(status, Some(503));
                assert!(message.contains("503"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
