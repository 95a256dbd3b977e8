//! Ed448 signing and verification.
//!
//! ## Example
//!
//! ```
//! use curve448::signing::generate_key_pair;
//!
//! let (private_key, public_key) = generate_key_pair().unwrap();
//! let signature = private_key.sign(b"message").unwrap();
//! assert!(public_key.is_valid_signature(&signature, b"message"));
//! assert!(!public_key.is_valid_signature(&signature, b"massage"));
//! ```
//!
//! Messages and signatures may be any [`ByteSequence`], including data split
//! across several regions:
//!
//! ```
//! use curve448::signing::generate_key_pair;
//!
//! let (private_key, public_key) = generate_key_pair().unwrap();
//! let signature = private_key.sign(&[&b"split "[..], &b"message"[..]]).unwrap();
//! assert!(public_key.is_valid_signature(signature.as_bytes(), b"split message"));
//! ```

use std::fmt;

use subtle::{Choice, ConstantTimeEq};
use tracing::debug;
use zeroize::Zeroizing;

use crate::bytes::{flatten, ByteSequence};
use crate::constants::{PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH, SIGNATURE_LENGTH};
use crate::error::{Curve448Error, Result};
#[cfg(feature = "goldilocks")]
use crate::goldilocks::Goldilocks;
use crate::provider::CryptoProvider;
use crate::secure::SecureBuffer;
use crate::signature::Signature;

/// Ed448 public key.
///
/// Import checks the length only. A key that does not decode to a curve
/// point makes every verification answer `false`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; PUBLIC_KEY_LENGTH]);

/// Ed448 private key.
///
/// Holds the 57-byte seed of RFC 8032 and the public key derived from it
/// when the key was created.
#[derive(Clone)]
pub struct PrivateKey {
    seed: SecureBuffer,
    public_key: PublicKey,
}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

impl PublicKey {
    /// Creates a public key from a byte array.
    #[inline]
    pub const fn from_bytes(bytes: &[u8; PUBLIC_KEY_LENGTH]) -> Self {
        PublicKey(*bytes)
    }

    /// Imports a public key from its raw representation.
    ///
    /// Fails with [`Curve448Error::IncorrectKeySize`] unless `bytes` is 57
    /// bytes long.
    pub fn from_raw_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes = bytes.try_into().map_err(|_| {
            Curve448Error::incorrect_key_size("Ed448 public key", PUBLIC_KEY_LENGTH, bytes.len())
        })?;
        Ok(PublicKey(bytes))
    }

    /// Raw representation.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.0
    }

    /// Raw representation.
    #[inline]
    pub const fn to_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.0
    }

    /// Verifies an Ed448 signature with the built-in provider.
    #[cfg(feature = "goldilocks")]
    pub fn is_valid_signature<S, D>(&self, signature: &S, data: &D) -> bool
    where
        S: ByteSequence + ?Sized,
        D: ByteSequence + ?Sized,
    {
        self.is_valid_signature_with(&Goldilocks, signature, data)
    }

    /// Verifies an Ed448 signature with `provider`.
    ///
    /// Answers `false` for a signature that is not 114 bytes long, for a
    /// signature that does not match, and for any provider failure. Never
    /// panics.
    pub fn is_valid_signature_with<P, S, D>(&self, provider: &P, signature: &S, data: &D) -> bool
    where
        P: CryptoProvider + ?Sized,
        S: ByteSequence + ?Sized,
        D: ByteSequence + ?Sized,
    {
        self.verify_flattened(signature, |signature| {
            provider.ed448_verify(&self.0, None, signature, &flatten(data))
        })
    }

    /// Verifies an Ed448ctx signature with the built-in provider.
    #[cfg(feature = "goldilocks")]
    pub fn is_valid_signature_with_context<S, D>(&self, signature: &S, data: &D, context: &[u8]) -> bool
    where
        S: ByteSequence + ?Sized,
        D: ByteSequence + ?Sized,
    {
        self.is_valid_signature_with_context_with(&Goldilocks, signature, data, context)
    }

    /// Verifies an Ed448ctx signature with `provider`.
    ///
    /// Answers `false` if `context` is longer than 255 bytes.
    pub fn is_valid_signature_with_context_with<P, S, D>(
        &self,
        provider: &P,
        signature: &S,
        data: &D,
        context: &[u8],
    ) -> bool
    where
        P: CryptoProvider + ?Sized,
        S: ByteSequence + ?Sized,
        D: ByteSequence + ?Sized,
    {
        self.verify_flattened(signature, |signature| {
            provider.ed448_verify(&self.0, Some(context), signature, &flatten(data))
        })
    }

    /// Verifies an Ed448ph signature with the built-in provider.
    ///
    /// An empty `context` is the same as no context.
    #[cfg(feature = "goldilocks")]
    pub fn is_valid_prehashed_signature<S, D>(&self, signature: &S, data: &D, context: &[u8]) -> bool
    where
        S: ByteSequence + ?Sized,
        D: ByteSequence + ?Sized,
    {
        self.is_valid_prehashed_signature_with(&Goldilocks, signature, data, context)
    }

    /// Verifies an Ed448ph signature with `provider`.
    ///
    /// A provider without Ed448ph support answers `false`.
    pub fn is_valid_prehashed_signature_with<P, S, D>(
        &self,
        provider: &P,
        signature: &S,
        data: &D,
        context: &[u8],
    ) -> bool
    where
        P: CryptoProvider + ?Sized,
        S: ByteSequence + ?Sized,
        D: ByteSequence + ?Sized,
    {
        self.verify_flattened(signature, |signature| {
            provider.ed448ph_verify(&self.0, Some(context), signature, &flatten(data))
        })
    }

    // collapses every failure into `false`
    fn verify_flattened<S, F>(&self, signature: &S, verify: F) -> bool
    where
        S: ByteSequence + ?Sized,
        F: FnOnce(&[u8; SIGNATURE_LENGTH]) -> Result<()>,
    {
        if signature.byte_len() != SIGNATURE_LENGTH {
            debug!(
                length = signature.byte_len(),
                "Ed448 signature has the wrong length"
            );
            return false;
        }
        let signature = flatten(signature);
        let signature: &[u8; SIGNATURE_LENGTH] = match signature.as_ref().try_into() {
            Ok(signature) => signature,
            Err(_) => return false,
        };
        match verify(signature) {
            Ok(()) => true,
            Err(e) => {
                debug!(error = %e, "Ed448 signature verification failed");
                false
            }
        }
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = Curve448Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_raw_bytes(bytes)
    }
}

impl From<[u8; PUBLIC_KEY_LENGTH]> for PublicKey {
    fn from(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        PublicKey(bytes)
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(feature = "goldilocks")]
impl ::signature::Verifier<Signature> for PublicKey {
    fn verify(&self, msg: &[u8], signature: &Signature) -> std::result::Result<(), ::signature::Error> {
        Goldilocks
            .ed448_verify(&self.0, None, signature.as_bytes(), msg)
            .map_err(|_| ::signature::Error::new())
    }
}

// ---------------------------------------------------------------------------
// PrivateKey
// ---------------------------------------------------------------------------

impl PrivateKey {
    /// Generates a random private key with the built-in provider.
    #[cfg(feature = "goldilocks")]
    pub fn generate() -> Result<Self> {
        Self::generate_with(&Goldilocks)
    }

    /// Generates a random private key with `provider`.
    pub fn generate_with<P>(provider: &P) -> Result<Self>
    where
        P: CryptoProvider + ?Sized,
    {
        let (seed, public_key) = provider.ed448_generate()?;
        if seed.len() != SECRET_KEY_LENGTH {
            return Err(Curve448Error::KeyGenerationFailed(format!(
                "provider returned a {}-byte seed",
                seed.len()
            )));
        }
        Ok(PrivateKey {
            seed,
            public_key: PublicKey(public_key),
        })
    }

    /// Imports a private key with the built-in provider.
    #[cfg(feature = "goldilocks")]
    pub fn from_raw_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_raw_bytes_with(&Goldilocks, bytes)
    }

    /// Imports a private key from its 57-byte seed.
    ///
    /// Fails with [`Curve448Error::IncorrectKeySize`] for any other length,
    /// before the provider is involved.
    pub fn from_raw_bytes_with<P>(provider: &P, bytes: &[u8]) -> Result<Self>
    where
        P: CryptoProvider + ?Sized,
    {
        if bytes.len() != SECRET_KEY_LENGTH {
            return Err(Curve448Error::incorrect_key_size(
                "Ed448 private key",
                SECRET_KEY_LENGTH,
                bytes.len(),
            ));
        }
        let seed = SecureBuffer::from_slice(bytes);
        let public_key = PublicKey(provider.ed448_public_key(&seed)?);
        Ok(PrivateKey { seed, public_key })
    }

    /// Public key corresponding to this private key.
    #[inline]
    pub fn public_key(&self) -> PublicKey {
        self.public_key
    }

    /// Gives `body` read access to the seed.
    pub fn with_raw_bytes<R, F>(&self, body: F) -> R
    where
        F: FnOnce(&[u8]) -> R,
    {
        self.seed.with_bytes(body)
    }

    /// Copies the seed out. The copy is wiped on drop.
    pub fn to_raw_bytes(&self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(self.seed.with_bytes(<[u8]>::to_vec))
    }

    /// Signs `data` with the built-in provider.
    ///
    /// Signing is deterministic: the same key and data always give the same
    /// signature.
    #[cfg(feature = "goldilocks")]
    pub fn sign<D>(&self, data: &D) -> Result<Signature>
    where
        D: ByteSequence + ?Sized,
    {
        self.sign_with(&Goldilocks, data)
    }

    /// Signs `data` with `provider`.
    pub fn sign_with<P, D>(&self, provider: &P, data: &D) -> Result<Signature>
    where
        P: CryptoProvider + ?Sized,
        D: ByteSequence + ?Sized,
    {
        self.check_seed()?;
        let signature = provider.ed448_sign(&self.seed, None, &flatten(data))?;
        Ok(Signature::from(signature))
    }

    /// Signs `data` with Ed448ctx using the built-in provider.
    ///
    /// Fails with [`Curve448Error::Value`] if `context` is longer than 255
    /// bytes.
    #[cfg(feature = "goldilocks")]
    pub fn sign_with_context<D>(&self, data: &D, context: &[u8]) -> Result<Signature>
    where
        D: ByteSequence + ?Sized,
    {
        self.sign_with_context_with(&Goldilocks, data, context)
    }

    /// Signs `data` with Ed448ctx using `provider`.
    pub fn sign_with_context_with<P, D>(&self, provider: &P, data: &D, context: &[u8]) -> Result<Signature>
    where
        P: CryptoProvider + ?Sized,
        D: ByteSequence + ?Sized,
    {
        self.check_seed()?;
        let signature = provider.ed448_sign(&self.seed, Some(context), &flatten(data))?;
        Ok(Signature::from(signature))
    }

    /// Signs `data` with Ed448ph using the built-in provider.
    ///
    /// An empty `context` is the same as no context.
    #[cfg(feature = "goldilocks")]
    pub fn sign_prehashed<D>(&self, data: &D, context: &[u8]) -> Result<Signature>
    where
        D: ByteSequence + ?Sized,
    {
        self.sign_prehashed_with(&Goldilocks, data, context)
    }

    /// Signs `data` with Ed448ph using `provider`.
    ///
    /// Fails with [`Curve448Error::NotImplemented`] if the provider has no
    /// Ed448ph support.
    pub fn sign_prehashed_with<P, D>(&self, provider: &P, data: &D, context: &[u8]) -> Result<Signature>
    where
        P: CryptoProvider + ?Sized,
        D: ByteSequence + ?Sized,
    {
        self.check_seed()?;
        let signature = provider.ed448ph_sign(&self.seed, Some(context), &flatten(data))?;
        Ok(Signature::from(signature))
    }

    fn check_seed(&self) -> Result<()> {
        if self.seed.len() != SECRET_KEY_LENGTH {
            return Err(Curve448Error::incorrect_key_size(
                "Ed448 private key",
                SECRET_KEY_LENGTH,
                self.seed.len(),
            ));
        }
        Ok(())
    }
}

#[cfg(feature = "goldilocks")]
impl ::signature::Signer<Signature> for PrivateKey {
    fn try_sign(&self, msg: &[u8]) -> std::result::Result<Signature, ::signature::Error> {
        self.sign(msg).map_err(|_| ::signature::Error::new())
    }
}

impl ConstantTimeEq for PrivateKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.seed.ct_eq(&other.seed)
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for PrivateKey {}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

/// Generates a key pair with the built-in provider.
#[cfg(feature = "goldilocks")]
pub fn generate_key_pair() -> Result<(PrivateKey, PublicKey)> {
    generate_key_pair_with(&Goldilocks)
}

/// Generates a key pair with `provider`.
pub fn generate_key_pair_with<P>(provider: &P) -> Result<(PrivateKey, PublicKey)>
where
    P: CryptoProvider + ?Sized,
{
    let private_key = PrivateKey::generate_with(provider)?;
    let public_key = private_key.public_key();
    Ok((private_key, public_key))
}
