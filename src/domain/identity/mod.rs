//! Identity domain
//!
//! The identity provider resolves the authenticated principal on whose
//! behalf key operations run.

mod principal;
mod provider;

pub use principal::{Principal, PrincipalId};
pub use provider::IdentityProvider;

#[cfg(test)]
pub use provider::MockIdentityProvider;
