use serde::Deserialize;
use thiserror::Error;

/// How a failed fetch should be surfaced to the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 400: shown next to the form that produced it
    Validation,
    /// 401/403: stored credentials are cleared and the admin is sent to login
    Auth,
    /// 404: detail pages navigate to the not-found route
    NotFound,
    /// Network failures and everything else: generic "try again later"
    Transient,
}

/// A failed request, carrying the HTTP status (if any response arrived) and
/// the raw response body.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct FetchError {
    pub message: String,
    pub status: Option<u16>,
    pub body: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl FetchError {
    /// Build from a non-2xx response. The `error` field of a JSON body is
    /// preferred as the message.
    pub fn from_response(status: u16, body: String) -> Self {
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|parsed| parsed.error)
            .unwrap_or_else(|_| format!("Request failed with status {}", status));

        Self {
            message,
            status: Some(status),
            body,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self.status {
            Some(400) => ErrorKind::Validation,
            Some(401) | Some(403) => ErrorKind::Auth,
            Some(404) => ErrorKind::NotFound,
            _ => ErrorKind::Transient,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self {
            message: format!("Network error: {}", err),
            status: None,
            body: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_taken_from_error_body() {
        let err = FetchError::from_response(400, r#"{"error":"email is required"}"#.to_string());
        assert_eq!(err.message, "email is required");
        assert_eq!(err.status, Some(400));
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_non_json_body_gets_generic_message() {
        let err = FetchError::from_response(502, "<html>Bad Gateway</html>".to_string());
        assert_eq!(err.message, "Request failed with status 502");
        assert_eq!(err.body, "<html>Bad Gateway</html>");
        assert_eq!(err.kind(), ErrorKind::Transient);
    }

    #[test]
    fn test_kind_mapping() {
        let kind = |status| FetchError::from_response(status, String::new()).kind();
        assert_eq!(kind(401), ErrorKind::Auth);
        assert_eq!(kind(403), ErrorKind::Auth);
        assert_eq!(kind(404), ErrorKind::NotFound);
        assert_eq!(kind(500), ErrorKind::Transient);
        assert!(FetchError::from_response(404, String::new()).is_not_found());
    }

    #[test]
    fn test_missing_status_is_transient() {
        let err = FetchError {
            message: "connection refused".to_string(),
            status: None,
            body: String::new(),
        };
        assert_eq!(err.kind(), ErrorKind::Transient);
        assert_eq!(err.to_string(), "connection refused");
    }
}
