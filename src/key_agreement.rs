//! X448 key agreement.
//!
//! ## Example
//!
//! ```
//! use curve448::key_agreement::{generate_key_pair, PublicKey};
//!
//! let (alice, alice_public) = generate_key_pair().unwrap();
//! let (bob, bob_public) = generate_key_pair().unwrap();
//!
//! // public keys travel as 56 raw bytes
//! let bob_public = PublicKey::from_raw_bytes(bob_public.as_bytes()).unwrap();
//!
//! let alice_secret = alice.shared_secret(&bob_public).unwrap();
//! let bob_secret = bob.shared_secret(&alice_public).unwrap();
//! assert_eq!(alice_secret, bob_secret);
//! ```
//!
//! The shared secret is the raw X448 output. Run it through a key
//! derivation function before using it as key material.

use std::fmt;

use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroizing;

use crate::constants::{X448_PRIVATE_KEY_LENGTH, X448_PUBLIC_KEY_LENGTH};
use crate::error::{Curve448Error, Result};
#[cfg(feature = "goldilocks")]
use crate::goldilocks::Goldilocks;
use crate::provider::CryptoProvider;
use crate::secure::SecureBuffer;

/// X448 public key.
///
/// Only the length is checked on import; the bytes are kept verbatim.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; X448_PUBLIC_KEY_LENGTH]);

impl PublicKey {
    /// Creates a public key from a byte array.
    #[inline]
    pub const fn from_bytes(bytes: &[u8; X448_PUBLIC_KEY_LENGTH]) -> Self {
        PublicKey(*bytes)
    }

    /// Imports a public key from its raw representation.
    ///
    /// Fails with [`Curve448Error::IncorrectKeySize`] unless `bytes` is 56
    /// bytes long.
    pub fn from_raw_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes = bytes.try_into().map_err(|_| {
            Curve448Error::incorrect_key_size("X448 public key", X448_PUBLIC_KEY_LENGTH, bytes.len())
        })?;
        Ok(PublicKey(bytes))
    }

    /// Raw representation.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; X448_PUBLIC_KEY_LENGTH] {
        &self.0
    }

    /// Raw representation.
    #[inline]
    pub const fn to_bytes(&self) -> [u8; X448_PUBLIC_KEY_LENGTH] {
        self.0
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = Curve448Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_raw_bytes(bytes)
    }
}

impl From<[u8; X448_PUBLIC_KEY_LENGTH]> for PublicKey {
    fn from(bytes: [u8; X448_PUBLIC_KEY_LENGTH]) -> Self {
        PublicKey(bytes)
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// X448 private key.
///
/// Holds the 56-byte scalar in a [`SecureBuffer`] together with the public
/// key derived from it when the key was created.
#[derive(Clone)]
pub struct PrivateKey {
    key: SecureBuffer,
    public_key: PublicKey,
}

impl PrivateKey {
    /// Generates a random private key with the built-in provider.
    #[cfg(feature = "goldilocks")]
    pub fn generate() -> Result<Self> {
        Self::generate_with(&Goldilocks)
    }

    /// Generates a random private key with `provider`.
    ///
    /// Fails with [`Curve448Error::KeyGenerationFailed`] if the provider
    /// cannot produce a key.
    pub fn generate_with<P>(provider: &P) -> Result<Self>
    where
        P: CryptoProvider + ?Sized,
    {
        let (key, public_key) = provider.x448_generate()?;
        if key.len() != X448_PRIVATE_KEY_LENGTH {
            return Err(Curve448Error::KeyGenerationFailed(format!(
                "provider returned a {}-byte private key",
                key.len()
            )));
        }
        Ok(PrivateKey {
            key,
            public_key: PublicKey(public_key),
        })
    }

    /// Imports a private key with the built-in provider.
    #[cfg(feature = "goldilocks")]
    pub fn from_raw_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_raw_bytes_with(&Goldilocks, bytes)
    }

    /// Imports a private key from its raw representation.
    ///
    /// Fails with [`Curve448Error::IncorrectKeySize`] unless `bytes` is 56
    /// bytes long. The public key is derived right away; a provider failure
    /// there is returned as is.
    pub fn from_raw_bytes_with<P>(provider: &P, bytes: &[u8]) -> Result<Self>
    where
        P: CryptoProvider + ?Sized,
    {
        if bytes.len() != X448_PRIVATE_KEY_LENGTH {
            return Err(Curve448Error::incorrect_key_size(
                "X448 private key",
                X448_PRIVATE_KEY_LENGTH,
                bytes.len(),
            ));
        }
        let key = SecureBuffer::from_slice(bytes);
        let public_key = PublicKey(provider.x448_public_key(&key)?);
        Ok(PrivateKey { key, public_key })
    }

    /// Public key corresponding to this private key.
    #[inline]
    pub fn public_key(&self) -> PublicKey {
        self.public_key
    }

    /// Gives `body` read access to the raw representation.
    pub fn with_raw_bytes<R, F>(&self, body: F) -> R
    where
        F: FnOnce(&[u8]) -> R,
    {
        self.key.with_bytes(body)
    }

    /// Copies the raw representation out. The copy is wiped on drop.
    pub fn to_raw_bytes(&self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(self.key.with_bytes(<[u8]>::to_vec))
    }

    /// Computes the shared secret with `peer` using the built-in provider.
    #[cfg(feature = "goldilocks")]
    pub fn shared_secret(&self, peer: &PublicKey) -> Result<SharedSecret> {
        self.shared_secret_with(&Goldilocks, peer)
    }

    /// Computes the shared secret with `peer` using `provider`.
    ///
    /// Both parties obtain the same secret. Any provider failure is reported
    /// as [`Curve448Error::KeyAgreementFailure`].
    pub fn shared_secret_with<P>(&self, provider: &P, peer: &PublicKey) -> Result<SharedSecret>
    where
        P: CryptoProvider + ?Sized,
    {
        let secret = provider
            .x448_agree(&self.key, peer.as_bytes())
            .map_err(|e| match e {
                Curve448Error::KeyAgreementFailure(_) => e,
                other => Curve448Error::KeyAgreementFailure(other.to_string()),
            })?;
        if secret.is_empty() {
            return Err(Curve448Error::KeyAgreementFailure(
                "provider derived an empty secret".into(),
            ));
        }
        Ok(SharedSecret(secret))
    }
}

impl ConstantTimeEq for PrivateKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.key.ct_eq(&other.key)
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

/// Raw result of an X448 agreement.
///
/// The length is decided by the provider; the built-in one yields 56 bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct SharedSecret(SecureBuffer);

impl SharedSecret {
    /// Number of bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false` for secrets returned by this crate.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Gives `body` read access to the secret.
    pub fn with_bytes<R, F>(&self, body: F) -> R
    where
        F: FnOnce(&[u8]) -> R,
    {
        self.0.with_bytes(body)
    }

    /// Copies the secret out. The copy is wiped on drop.
    pub fn to_bytes(&self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(self.0.with_bytes(<[u8]>::to_vec))
    }
}

impl ConstantTimeEq for SharedSecret {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedSecret")
            .field("len", &self.len())
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

#[cfg(test)]
mod test {
    use crate::provider::testing::{EmptySecretProvider, FailingProvider};

    use super::*;

    #[test]
    fn public_key_round_trip() {
        let bytes = [0x5au8; X448_PUBLIC_KEY_LENGTH];
        let public_key = PublicKey::from_raw_bytes(&bytes).unwrap();
        assert_eq!(public_key.to_bytes(), bytes);
        assert_eq!(PublicKey::try_from(&bytes[..]).unwrap(), public_key);
    }

    #[test]
    fn public_key_of_wrong_size() {
        let bytes = [0x5au8; X448_PUBLIC_KEY_LENGTH + 1];
        for length in [X448_PUBLIC_KEY_LENGTH - 1, X448_PUBLIC_KEY_LENGTH + 1, 0] {
            assert!(matches!(
                PublicKey::from_raw_bytes(&bytes[..length]),
                Err(Curve448Error::IncorrectKeySize(_)),
            ));
        }
    }

    #[test]
    fn private_key_of_wrong_size_fails_before_provider() {
        // FailingProvider would answer Provider(..) if it were reached
        let bytes = [1u8; X448_PRIVATE_KEY_LENGTH + 1];
        for length in [X448_PRIVATE_KEY_LENGTH - 1, X448_PRIVATE_KEY_LENGTH + 1] {
            assert!(matches!(
                PrivateKey::from_raw_bytes_with(&FailingProvider, &bytes[..length]),
                Err(Curve448Error::IncorrectKeySize(_)),
            ));
        }
    }

    #[test]
    fn provider_failures() {
        assert!(matches!(
            PrivateKey::generate_with(&FailingProvider),
            Err(Curve448Error::KeyGenerationFailed(_)),
        ));
        assert!(matches!(
            PrivateKey::from_raw_bytes_with(&FailingProvider, &[1u8; X448_PRIVATE_KEY_LENGTH]),
            Err(Curve448Error::Provider(_)),
        ));

        let private_key = PrivateKey::generate_with(&EmptySecretProvider).unwrap();
        let peer = PublicKey::from_bytes(&[9u8; X448_PUBLIC_KEY_LENGTH]);
        assert!(matches!(
            private_key.shared_secret_with(&FailingProvider, &peer),
            Err(Curve448Error::KeyAgreementFailure(_)),
        ));
        assert!(matches!(
            private_key.shared_secret_with(&EmptySecretProvider, &peer),
            Err(Curve448Error::KeyAgreementFailure(_)),
        ));
    }

    #[test]
    fn debug_hides_private_key() {
        let private_key = PrivateKey::generate_with(&EmptySecretProvider).unwrap();
        let debug = format!("{private_key:?}");
        assert!(debug.starts_with("PrivateKey { public_key: PublicKey("));
        // the scalar is all 0x01 bytes
        assert!(!debug.contains("1, 1, 1"));
    }
}
