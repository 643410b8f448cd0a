pub mod claims;
pub mod error;
#[cfg(any(test, feature = "test-fixtures"))]
pub mod test_keys;
pub mod jwks;
pub mod jwt_validator;
pub mod management;
pub mod verifier;

pub use claims::Claims;
pub use error::{AuthError, Result};
pub use jwks::{JwksClient, JwksVerifier};
pub use jwt_validator::JwtValidator;
pub use management::{ManagedUser, ManagementClient};
pub use verifier::TokenVerifier;
