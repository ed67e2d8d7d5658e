//! Opaque, self-describing pagination tokens.
//!
//! A token is the only state that crosses request boundaries: the client
//! holds it, no server-side cursor session exists. It is a reversible
//! encoding of `(strategy, field, boundary value[, tie breaker])` — a
//! compact JSON tuple, base64url-encoded — so a token fully describes how
//! to resume, and a token minted by one strategy is detectably invalid for
//! another.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use bson::Bson;
use serde::{Deserialize, Serialize};

use crate::{
    error::{PaginateResult, PaginationError},
    request::Strategy,
};

/// The decoded form of an opaque pagination token.
///
/// Callers never see this type; the engine mints tokens from page
/// boundaries and decodes them back when a request resumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageToken {
    /// The strategy that minted this token.
    pub strategy: Strategy,
    /// The field the boundary value belongs to (the id field for cursor
    /// tokens, the sort field for time tokens).
    pub field: String,
    /// The boundary value: the identifier for cursor tokens, the sort
    /// field value for time tokens, the page number for offset tokens.
    pub value: Bson,
    /// Record identifier disambiguating ties on a non-unique sort field.
    /// Present in compound time tokens, absent in the single-value form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tie_breaker: Option<Bson>,
}

impl PageToken {
    /// Creates a single-value token.
    pub fn new(strategy: Strategy, field: impl Into<String>, value: Bson) -> Self {
        PageToken {
            strategy,
            field: field.into(),
            value,
            tie_breaker: None,
        }
    }

    /// Creates a compound token carrying a tie-breaking identifier.
    pub fn compound(
        strategy: Strategy,
        field: impl Into<String>,
        value: Bson,
        tie_breaker: Bson,
    ) -> Self {
        PageToken {
            strategy,
            field: field.into(),
            value,
            tie_breaker: Some(tie_breaker),
        }
    }

    /// Encodes this token into its opaque string form.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::Serialization`] if the boundary value
    /// cannot be serialized.
    pub fn encode(&self) -> PaginateResult<String> {
        let payload = serde_json::to_vec(self)?;

        Ok(URL_SAFE_NO_PAD.encode(payload))
    }

    /// Decodes an opaque token, verifying it was minted by `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::InvalidToken`] if the encoding is
    /// malformed or the strategy tag does not match. Mismatched tokens are
    /// rejected, never reinterpreted.
    pub fn decode(encoded: &str, expected: Strategy) -> PaginateResult<Self> {
        let payload = URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|_| PaginationError::InvalidToken("not valid base64url".to_string()))?;
        let token: PageToken = serde_json::from_slice(&payload)
            .map_err(|_| PaginationError::InvalidToken("malformed token payload".to_string()))?;

        if token.strategy != expected {
            return Err(PaginationError::InvalidToken(format!(
                "token was minted by {} pagination, not {}",
                token.strategy, expected,
            )));
        }

        Ok(token)
    }
}
