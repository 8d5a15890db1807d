use reqwest::StatusCode;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupErrorKind {
    /// The provider does not know the queried location.
    NotFound,
    /// Transport failure, non-2xx status, or malformed payload.
    Upstream,
}

/// The single failure class at the weather boundary. Carried inside
/// `anyhow::Error` and downcast where the two kinds need different
/// surfacing.
#[derive(Debug, Clone)]
pub struct WeatherLookupError {
    pub city: String,
    pub kind: LookupErrorKind,
    pub status: Option<StatusCode>,
    pub detail: String,
}

impl WeatherLookupError {
    pub fn new(
        city: &str,
        kind: LookupErrorKind,
        status: Option<StatusCode>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            city: city.to_string(),
            kind,
            status,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for WeatherLookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            LookupErrorKind::NotFound => {
                write!(f, "location {:?} not found by the weather service", self.city)
            }
            LookupErrorKind::Upstream => {
                write!(f, "weather lookup for {:?} failed: {}", self.city, self.detail)
            }
        }
    }
}

impl std::error::Error for WeatherLookupError {}
