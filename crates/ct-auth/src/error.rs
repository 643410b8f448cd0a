use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid token: {message} {location}")]
    InvalidToken {
        message: String,
        location: ErrorLocation,
    },

    #[error("Token expired {location}")]
    TokenExpired { location: ErrorLocation },

    #[error("Missing authorization header {location}")]
    MissingHeader { location: ErrorLocation },

    #[error("Invalid authorization scheme: expected 'Bearer' {location}")]
    InvalidScheme { location: ErrorLocation },

    #[error("JWT decode failed: {source} {location}")]
    JwtDecode {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("Invalid claim '{claim}': {message} {location}")]
    InvalidClaim {
        claim: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("No signing key with kid '{kid}' in provider key set {location}")]
    UnknownKeyId { kid: String, location: ErrorLocation },

    #[error("Identity provider request failed: {source} {location}")]
    Provider {
        #[source]
        source: reqwest::Error,
        location: ErrorLocation,
    },

    #[error("Management token request rejected: {status} {location}")]
    ManagementToken {
        status: reqwest::StatusCode,
        location: ErrorLocation,
    },
}

pub type Result<T> = std::result::Result<T, AuthError>;
