use thiserror::Error;

/// Raised when a list response cannot be turned into the expected items.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Neither a bare array nor an object with a `results` array.
    #[error("unexpected list response shape: {shape}")]
    Shape { shape: String },

    /// The list itself was fine but one of its items was not.
    #[error("list item {index} did not decode: {message}")]
    Item { index: usize, message: String },
}

impl FormatError {
    pub fn for_value(value: &serde_json::Value) -> Self {
        Self::Shape {
            shape: describe_shape(value),
        }
    }

    pub fn item(index: usize, message: impl Into<String>) -> Self {
        Self::Item {
            index,
            message: message.into(),
        }
    }
}

/// Short human description of a JSON value's shape.
pub fn describe_shape(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "null".to_string(),
        serde_json::Value::Bool(_) => "boolean".to_string(),
        serde_json::Value::Number(_) => "number".to_string(),
        serde_json::Value::String(_) => "string".to_string(),
        serde_json::Value::Array(_) => "array".to_string(),
        serde_json::Value::Object(map) => match map.get("results") {
            Some(_) => "object with non-array `results`".to_string(),
            None => {
                let keys: Vec<&str> = map.keys().map(String::as_str).collect();
                format!("object without `results` (keys: [{}])", keys.join(", "))
            }
        },
    }
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("API request failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}: {body}")]
    StatusError {
        status: u16,
        url: String,
        body: String,
    },

    #[error("Unauthorized request to {url}, session ended")]
    Unauthorized { url: String },

    #[error("Response format error: {0}")]
    FormatError(#[from] FormatError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Not authenticated: {message}")]
    NotAuthenticated { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Http,
    Authentication,
    Format,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ClientError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ClientError::TransportError(_) => ErrorCategory::Network,
            ClientError::StatusError { .. } => ErrorCategory::Http,
            ClientError::Unauthorized { .. } | ClientError::NotAuthenticated { .. } => {
                ErrorCategory::Authentication
            }
            ClientError::FormatError(_) | ClientError::SerializationError(_) => {
                ErrorCategory::Format
            }
            ClientError::ConfigError { .. }
            | ClientError::MissingConfigError { .. }
            | ClientError::InvalidConfigValueError { .. }
            | ClientError::ValidationError { .. } => ErrorCategory::Configuration,
            ClientError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Format => ErrorSeverity::Low,
            ErrorCategory::Network | ErrorCategory::Http => ErrorSeverity::Medium,
            ErrorCategory::Authentication | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Network failures and server-side statuses can be retried by hand.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::TransportError(_) => true,
            ClientError::StatusError { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::StatusError { status, .. } => Some(*status),
            ClientError::Unauthorized { .. } => Some(401),
            ClientError::TransportError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ClientError::TransportError(_) => {
                "Could not reach the server. Check your connection and try again.".to_string()
            }
            ClientError::StatusError { status, .. } => {
                format!("The server answered with an error (HTTP {}).", status)
            }
            ClientError::Unauthorized { .. } => {
                "Your session has ended. Please log in again.".to_string()
            }
            ClientError::NotAuthenticated { .. } => "You need to log in first.".to_string(),
            ClientError::FormatError(_) | ClientError::SerializationError(_) => {
                "The server returned data in an unexpected format.".to_string()
            }
            ClientError::ConfigError { message } | ClientError::ValidationError { message } => {
                format!("Invalid configuration: {}", message)
            }
            ClientError::MissingConfigError { field } => {
                format!("Missing configuration value: {}", field)
            }
            ClientError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid value for {}: {}", field, reason)
            }
            ClientError::IoError(e) => format!("File system error: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Retry the request once the API is reachable",
            ErrorCategory::Http if self.is_retryable() => "Retry later, the server may be busy",
            ErrorCategory::Http => "Check the request parameters and resource id",
            ErrorCategory::Authentication => "Run `cyberlearn login` to start a new session",
            ErrorCategory::Format => "Check that base_url points at the API root (e.g. /api/v1)",
            ErrorCategory::Configuration => "Fix the configuration file or command line flags",
            ErrorCategory::System => "Check file permissions for the token and config files",
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_error_describes_shape() {
        assert_eq!(describe_shape(&json!(null)), "null");
        assert_eq!(describe_shape(&json!(42)), "number");
        assert_eq!(
            describe_shape(&json!({"detail": "Not found"})),
            "object without `results` (keys: [detail])"
        );
        assert_eq!(
            FormatError::for_value(&json!({"results": 3})),
            FormatError::Shape {
                shape: "object with non-array `results`".to_string()
            }
        );
    }

    #[test]
    fn test_item_error_does_not_claim_bad_shape() {
        let message = FormatError::item(2, "invalid type: string, expected u32").to_string();
        assert_eq!(
            message,
            "list item 2 did not decode: invalid type: string, expected u32"
        );
        assert!(!message.contains("shape"));
    }

    #[test]
    fn test_retryable_statuses() {
        let server_error = ClientError::StatusError {
            status: 503,
            url: "/courses/".to_string(),
            body: String::new(),
        };
        let not_found = ClientError::StatusError {
            status: 404,
            url: "/courses/9/".to_string(),
            body: String::new(),
        };
        assert!(server_error.is_retryable());
        assert!(!not_found.is_retryable());
        assert_eq!(not_found.severity(), ErrorSeverity::Medium);
    }

    #[test]
    fn test_unauthorized_is_authentication_category() {
        let err = ClientError::Unauthorized {
            url: "/users/me/".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Authentication);
        assert_eq!(err.status(), Some(401));
        assert!(!err.is_retryable());
    }
}
