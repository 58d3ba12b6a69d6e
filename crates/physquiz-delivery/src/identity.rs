//! Sign-in token decoding for identity form prefill.
//!
//! The token payload is decoded WITHOUT signature verification: the claims
//! only prefill the name and email fields, they are never treated as an
//! authenticated identity. A malformed token degrades to manual entry.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use thiserror::Error;

use physquiz_core::model::PlayerIdentity;

/// Claims extracted from a sign-in token.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityClaims {
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("malformed identity token: {0}")]
    Malformed(#[from] jsonwebtoken::errors::Error),
}

/// Decode the payload of a sign-in token.
pub fn decode_identity_token(token: &str) -> Result<IdentityClaims, IdentityError> {
    let mut validation = Validation::new(Algorithm::RS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    // The key is unused with signature validation disabled.
    let data = decode::<IdentityClaims>(token, &DecodingKey::from_secret(&[]), &validation)?;
    Ok(data.claims)
}

/// Prefill an identity from a token, keeping any fields already filled in.
/// Decode failures are logged and leave the identity untouched.
pub fn prefill_from_token(identity: &mut PlayerIdentity, token: &str) {
    match decode_identity_token(token) {
        Ok(claims) => {
            if identity.name.is_empty() {
                if let Some(name) = claims.name {
                    identity.name = name;
                }
            }
            if identity.email.is_none() {
                identity.email = claims.email;
            }
        }
        Err(e) => {
            tracing::warn!("identity token ignored: {e}");
        }
    }
}
