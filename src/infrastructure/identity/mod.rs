//! Identity provider implementations

mod fixed;
mod jwt;

pub use fixed::FixedIdentityProvider;
pub use jwt::{AccessTokenClaims, BearerIdentityProvider, JwtConfig, JwtService};
