//! `stocksense-auth`: bearer-token authentication boundary.
//!
//! Decoupled from HTTP: the API layer extracts the token and hands it to a
//! [`JwtValidator`].

pub mod claims;
pub mod jwt;
pub mod principal;

pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use jwt::{Hs256JwtValidator, JwtError, JwtValidator};
pub use principal::PrincipalId;
