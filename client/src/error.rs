use shared::{ErrorBody, ErrorDetail, Violation};

use crate::transport::{Access, ApiResponse, TransportError};

pub type Result<T, E = ApiError> = std::result::Result<T, E>;

const DEFAULT_NOT_FOUND: &str = "The requested resource was not found.";
const DEFAULT_BAD_CREDENTIALS: &str = "Login failed. Check your email and password.";
const DEFAULT_UNREACHABLE: &str = "The library service is unreachable. Try again later.";

/// One field-level violation reported by the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub location: Vec<String>,
    pub message: String,
    pub kind: String,
}

impl FieldError {
    pub fn new(location: &[&str], message: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            location: location.iter().map(|segment| (*segment).to_owned()).collect(),
            message: message.into(),
            kind: kind.into(),
        }
    }

    /// Last segment of the location, which names the offending field.
    pub fn field(&self) -> Option<&str> {
        self.location.last().map(String::as_str)
    }
}

impl From<Violation> for FieldError {
    fn from(value: Violation) -> Self {
        Self {
            location: value.loc.iter().map(ToString::to_string).collect(),
            message: value.msg,
            kind: value.kind,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("{message}")]
    Validation {
        message: String,
        fields: Vec<FieldError>,
    },
    #[error("{message}")]
    Authentication { message: String },
    #[error("session expired, login required")]
    AuthorizationLost,
    #[error("{message}")]
    NetworkUnreachable { message: String },
    #[error("{message}")]
    NotFound { message: String },
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("unexpected response from server: {message}")]
    Decode { message: String },
}

impl ApiError {
    pub fn validation(fields: Vec<FieldError>) -> Self {
        let message = fields
            .iter()
            .map(|field| field.message.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        Self::Validation { message, fields }
    }

    /// Normalizes a non-2xx response. `fallback` is shown when the server
    /// gives no usable detail.
    pub fn from_response(access: Access, response: &ApiResponse, fallback: &str) -> Self {
        let detail = serde_json::from_str::<ErrorBody>(&response.body)
            .ok()
            .map(|body| body.detail);

        if let Some(ErrorDetail::Violations(violations)) = detail {
            if !violations.is_empty() {
                return Self::validation(violations.into_iter().map(FieldError::from).collect());
            }
            return Self::Rejected {
                status: response.status,
                message: fallback.to_owned(),
            };
        }

        let message = match detail {
            Some(ErrorDetail::Message(message)) if !message.trim().is_empty() => Some(message),
            _ => None,
        };

        match response.status {
            401 if access == Access::Anonymous => Self::Authentication {
                message: message.unwrap_or_else(|| DEFAULT_BAD_CREDENTIALS.to_owned()),
            },
            401 => Self::AuthorizationLost,
            404 => Self::NotFound {
                message: message.unwrap_or_else(|| DEFAULT_NOT_FOUND.to_owned()),
            },
            status => Self::Rejected {
                status,
                message: message.unwrap_or_else(|| fallback.to_owned()),
            },
        }
    }

    /// Message for display, or `None` when the failure was already handled
    /// globally by logging the user out.
    pub fn user_message(&self) -> Option<String> {
        match self {
            ApiError::AuthorizationLost => None,
            other => Some(other.to_string()),
        }
    }

    pub fn fields(&self) -> &[FieldError] {
        match self {
            ApiError::Validation { fields, .. } => fields,
            _ => &[],
        }
    }

    pub(crate) fn into_authentication(self) -> Self {
        match self {
            ApiError::Rejected {
                status: 400 | 401,
                message,
            } => ApiError::Authentication { message },
            other => other,
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(value: TransportError) -> Self {
        match value {
            TransportError::Unreachable(cause) => {
                tracing::debug!(%cause, "Transport failure");
                ApiError::NetworkUnreachable {
                    message: DEFAULT_UNREACHABLE.to_owned(),
                }
            }
            TransportError::InvalidRequest(message) => ApiError::Decode { message },
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(value: serde_json::Error) -> Self {
        ApiError::Decode {
            message: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FALLBACK: &str = "Something went wrong.";

    fn response(status: u16, body: &str) -> ApiResponse {
        ApiResponse::new(status, body)
    }

    #[test]
    fn violations_are_kept_and_joined() {
        let body = r#"{"detail":[
            {"loc":["body","email"],"msg":"value is not a valid email address","type":"value_error.email"},
            {"loc":["body","password"],"msg":"field required","type":"value_error.missing"}
        ]}"#;
        let error = ApiError::from_response(Access::Anonymous, &response(422, body), FALLBACK);

        assert_eq!(
            error.to_string(),
            "value is not a valid email address, field required"
        );
        assert_eq!(error.fields().len(), 2);
        assert_eq!(error.fields()[1].field(), Some("password"));
        assert_eq!(error.fields()[0].kind, "value_error.email");
    }

    #[test]
    fn server_detail_is_preferred_over_fallback() {
        let error = ApiError::from_response(
            Access::Authorized,
            &response(400, r#"{"detail":"No copies available"}"#),
            FALLBACK,
        );
        assert_eq!(
            error,
            ApiError::Rejected {
                status: 400,
                message: "No copies available".to_owned()
            }
        );
    }

    #[test]
    fn fallback_is_used_for_unstructured_bodies() {
        let error =
            ApiError::from_response(Access::Authorized, &response(500, "oops"), FALLBACK);
        assert_eq!(error.user_message().as_deref(), Some(FALLBACK));
    }

    #[test]
    fn unauthorized_depends_on_access() {
        let unauthorized = response(401, r#"{"detail":"Incorrect email or password"}"#);

        let anonymous = ApiError::from_response(Access::Anonymous, &unauthorized, FALLBACK);
        assert_eq!(
            anonymous,
            ApiError::Authentication {
                message: "Incorrect email or password".to_owned()
            }
        );

        let authorized = ApiError::from_response(Access::Authorized, &unauthorized, FALLBACK);
        assert_eq!(authorized, ApiError::AuthorizationLost);
        assert_eq!(authorized.user_message(), None);
    }

    #[test]
    fn not_found_has_a_default_message() {
        let error = ApiError::from_response(Access::Authorized, &response(404, ""), FALLBACK);
        assert_eq!(
            error,
            ApiError::NotFound {
                message: DEFAULT_NOT_FOUND.to_owned()
            }
        );
    }

    #[test]
    fn transport_failure_is_network_unreachable() {
        let error = ApiError::from(TransportError::Unreachable("connection refused".to_owned()));
        assert!(matches!(error, ApiError::NetworkUnreachable { .. }));
    }
}
