use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limited - please wait before retrying")]
    RateLimited,

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("No results table in page: {0}")]
    NoTable(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl FetchError {
    /// Truncate a response body to avoid logging a whole HTML page
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut end = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
        }
    }

    pub fn from_status(status: reqwest::StatusCode, url: &str, body: &str) -> Self {
        let truncated = Self::truncate_body(body);
        match status.as_u16() {
            404 | 410 => FetchError::NotFound(url.to_string()),
            429 => FetchError::RateLimited,
            500..=599 => FetchError::ServerError(truncated),
            _ => FetchError::InvalidResponse(format!("Status {} from {}: {}", status, url, truncated)),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_status() {
        assert!(FetchError::from_status(StatusCode::NOT_FOUND, "/x", "").is_not_found());
        assert!(matches!(
            FetchError::from_status(StatusCode::TOO_MANY_REQUESTS, "/x", ""),
            FetchError::RateLimited
        ));
        assert!(matches!(
            FetchError::from_status(StatusCode::BAD_GATEWAY, "/x", "oops"),
            FetchError::ServerError(body) if body == "oops"
        ));
        assert!(matches!(
            FetchError::from_status(StatusCode::FORBIDDEN, "/x", ""),
            FetchError::InvalidResponse(_)
        ));
    }

    #[test]
    fn test_truncate_body() {
        let long = "é".repeat(400);
        let truncated = FetchError::truncate_body(&long);
        assert!(truncated.contains("truncated, 800 total bytes"));
        assert_eq!(FetchError::truncate_body("short"), "short");
    }
}
