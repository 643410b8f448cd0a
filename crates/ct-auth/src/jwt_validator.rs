use crate::{AuthError, Claims, Result as AuthErrorResult, TokenVerifier};

use std::panic::Location;

use async_trait::async_trait;
use error_location::ErrorLocation;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

/// RS256 token validator over a fixed decoding key.
///
/// Signature, expiry, issuer and audience are all checked. There is no
/// shared-secret constructor: only the provider's asymmetric keys are
/// accepted.
pub struct JwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtValidator {
    /// Create validator from an RS256 public key PEM
    #[track_caller]
    pub fn with_rs256(public_key_pem: &str, issuer: &str, audience: &str) -> AuthErrorResult<Self> {
        let decoding_key =
            DecodingKey::from_rsa_pem(public_key_pem.as_bytes()).map_err(|e| {
                AuthError::InvalidToken {
                    message: format!("Invalid RSA public key: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                }
            })?;

        Ok(Self {
            decoding_key,
            validation: Self::validation(issuer, audience),
        })
    }

    /// Create validator from JWKS RSA components (base64url `n` and `e`)
    #[track_caller]
    pub fn from_components(
        n: &str,
        e: &str,
        issuer: &str,
        audience: &str,
    ) -> AuthErrorResult<Self> {
        let decoding_key =
            DecodingKey::from_rsa_components(n, e).map_err(|err| AuthError::InvalidToken {
                message: format!("Invalid RSA key components: {}", err),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(Self {
            decoding_key,
            validation: Self::validation(issuer, audience),
        })
    }

    fn validation(issuer: &str, audience: &str) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = 30; // 30 second clock skew tolerance
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation
    }

    /// Validate JWT token and return claims
    #[track_caller]
    pub fn validate(&self, token: &str) -> AuthErrorResult<Claims> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::TokenExpired {
                        location: ErrorLocation::from(Location::caller()),
                    },
                    _ => AuthError::JwtDecode {
                        source: e,
                        location: ErrorLocation::from(Location::caller()),
                    },
                }
            })?;

        // Additional claim validation
        token_data.claims.validate()?;

        Ok(token_data.claims)
    }
}

#[async_trait]
impl TokenVerifier for JwtValidator {
    async fn verify(&self, token: &str) -> AuthErrorResult<Claims> {
        self.validate(token)
    }
}
