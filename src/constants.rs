//! Common constants.

/// Length of an X448 private key in bytes.
pub const X448_PRIVATE_KEY_LENGTH: usize = 56;

/// Length of an X448 public key in bytes.
pub const X448_PUBLIC_KEY_LENGTH: usize = 56;

/// Length of an X448 shared secret produced by the built-in provider.
///
/// Other providers may return a different length.
pub const X448_SHARED_SECRET_LENGTH: usize = 56;

/// Length of an Ed448 private key (seed) in bytes.
pub const SECRET_KEY_LENGTH: usize = 57;

/// Length of an Ed448 public key in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 57;

/// Length of an Ed448 signature in bytes.
pub const SIGNATURE_LENGTH: usize = 114;

/// Maximum length of an Ed448 context string.
pub const MAX_CONTEXT_LENGTH: usize = 255;

/// Length of the SHAKE256 prehash used by Ed448ph.
pub const PREHASH_LENGTH: usize = 64;
