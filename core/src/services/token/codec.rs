//! Token wire format: `<base64url(json claim)>.<hex mac>`

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde_json::json;

use crate::domain::entities::claim::IdentityClaim;
use crate::errors::TokenError;

/// Separator between the encoded payload and the signature
pub const SEPARATOR: char = '.';

/// Tokens longer than this are rejected before any decoding work
pub const MAX_TOKEN_LEN: usize = 4096;

/// The two halves of a token, borrowed from the original string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenParts<'a> {
    pub payload: &'a str,
    pub signature: &'a str,
}

/// Pure encoder/decoder for the token format. No I/O, no secret.
pub struct TokenCodec;

impl TokenCodec {
    /// Serializes the claim to canonical JSON (keys sorted) and base64url-encodes it
    pub fn encode(claim: &IdentityClaim) -> String {
        let canonical = json!({
            "sub": claim.subject,
            "email": claim.email,
            "role": claim.role.as_str(),
            "exp": claim.expires_at,
        });
        URL_SAFE_NO_PAD.encode(canonical.to_string().as_bytes())
    }

    /// Splits on the separator into exactly two non-empty parts
    pub fn split(token: &str) -> Result<TokenParts<'_>, TokenError> {
        if token.len() > MAX_TOKEN_LEN {
            return Err(TokenError::MalformedToken);
        }

        let mut parts = token.split(SEPARATOR);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(payload), Some(signature), None)
                if !payload.is_empty() && !signature.is_empty() =>
            {
                Ok(TokenParts { payload, signature })
            }
            _ => Err(TokenError::MalformedToken),
        }
    }

    /// Decodes the claim of a full token without checking its signature
    pub fn decode(token: &str) -> Result<IdentityClaim, TokenError> {
        let parts = Self::split(token)?;
        Self::decode_payload(parts.payload)
    }

    /// Decodes an encoded payload. Every failure is `MalformedToken`.
    pub fn decode_payload(payload: &str) -> Result<IdentityClaim, TokenError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| TokenError::MalformedToken)?;
        serde_json::from_slice(&bytes).map_err(|_| TokenError::MalformedToken)
    }
}
