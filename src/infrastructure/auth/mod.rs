//! Authentication infrastructure: JWT sessions and Google ID-token sign-in

pub mod google;
pub mod jwt;

pub use google::{GoogleAuthConfig, GoogleIdentity, GoogleTokenVerifier, IdTokenVerifier};
pub use jwt::{JwtClaims, JwtConfig, JwtService, TokenIssuer};
