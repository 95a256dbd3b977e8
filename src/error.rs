//! Errors raised by key import, key generation, agreement and signing.
//!
//! Verification never returns these; it answers `false` instead.

use thiserror::Error;

/// Curve448 error.
///
/// Every variant carries a diagnostic message. Messages never include key,
/// seed or shared-secret bytes.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Curve448Error {
    /// Catch-all for failures not covered by the other kinds.
    #[error("{0}")]
    Generic(String),

    /// Raw key bytes do not have the fixed length of their scheme and role.
    #[error("incorrect key size: {0}")]
    IncorrectKeySize(String),

    /// A step of X448 shared-secret derivation failed in the provider.
    #[error("key agreement failed: {0}")]
    KeyAgreementFailure(String),

    /// The provider could not produce a fresh key pair.
    #[error("key generation failed: {0}")]
    KeyGenerationFailed(String),

    /// The provider does not support the requested operation.
    #[error("not implemented: {0}")]
    NotImplemented(String),

    /// The provider failed during import, public-key extraction or signing.
    #[error("provider error: {0}")]
    Provider(String),

    /// Malformed input that is not a key, e.g. an oversized context.
    #[error("invalid value: {0}")]
    Value(String),
}

/// Result type of this crate.
pub type Result<T> = std::result::Result<T, Curve448Error>;

impl Curve448Error {
    pub(crate) fn incorrect_key_size(what: &str, expected: usize, found: usize) -> Self {
        Curve448Error::IncorrectKeySize(format!(
            "{what} must be {expected} bytes, found {found}"
        ))
    }
}
