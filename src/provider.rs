//! Boundary to the cryptographic engine.
//!
//! [`CryptoProvider`] is the only way key types reach curve arithmetic,
//! entropy and the signing engine. Secret inputs are passed as
//! [`SecureBuffer`]s and secret outputs come back as [`SecureBuffer`]s;
//! public values cross the boundary as fixed-size arrays.
//!
//! The built-in implementation is [`Goldilocks`](crate::goldilocks::Goldilocks)
//! (feature "goldilocks").

use crate::constants::{
    PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH, X448_PUBLIC_KEY_LENGTH,
};
use crate::error::{Curve448Error, Result};
use crate::secure::SecureBuffer;

/// Capabilities a cryptographic engine must offer.
///
/// Implementations must not retry failed operations and must not put secret
/// bytes into error messages. Each call is independent; nothing is cached
/// between calls.
pub trait CryptoProvider: Send + Sync {
    /// Generates an X448 private key and its public key.
    fn x448_generate(&self) -> Result<(SecureBuffer, [u8; X448_PUBLIC_KEY_LENGTH])>;

    /// Computes the X448 public key of a 56-byte private key.
    fn x448_public_key(&self, private_key: &SecureBuffer) -> Result<[u8; X448_PUBLIC_KEY_LENGTH]>;

    /// Computes the raw X448 shared secret with a peer's public key.
    fn x448_agree(
        &self,
        private_key: &SecureBuffer,
        peer_public_key: &[u8; X448_PUBLIC_KEY_LENGTH],
    ) -> Result<SecureBuffer>;

    /// Generates an Ed448 seed and its public key.
    fn ed448_generate(&self) -> Result<(SecureBuffer, [u8; PUBLIC_KEY_LENGTH])>;

    /// Computes the Ed448 public key of a 57-byte seed.
    fn ed448_public_key(&self, seed: &SecureBuffer) -> Result<[u8; PUBLIC_KEY_LENGTH]>;

    /// Signs `message` with Ed448, or Ed448ctx if `context` is given.
    fn ed448_sign(
        &self,
        seed: &SecureBuffer,
        context: Option<&[u8]>,
        message: &[u8],
    ) -> Result<[u8; SIGNATURE_LENGTH]>;

    /// Verifies an Ed448 (or Ed448ctx) signature.
    ///
    /// Fails if the key or signature cannot be decoded or if they do not
    /// match `message`.
    fn ed448_verify(
        &self,
        public_key: &[u8; PUBLIC_KEY_LENGTH],
        context: Option<&[u8]>,
        signature: &[u8; SIGNATURE_LENGTH],
        message: &[u8],
    ) -> Result<()>;

    /// Signs `message` with Ed448ph.
    fn ed448ph_sign(
        &self,
        _seed: &SecureBuffer,
        _context: Option<&[u8]>,
        _message: &[u8],
    ) -> Result<[u8; SIGNATURE_LENGTH]> {
        Err(Curve448Error::NotImplemented(
            "Ed448ph signing is not supported by this provider".into(),
        ))
    }

    /// Verifies an Ed448ph signature.
    fn ed448ph_verify(
        &self,
        _public_key: &[u8; PUBLIC_KEY_LENGTH],
        _context: Option<&[u8]>,
        _signature: &[u8; SIGNATURE_LENGTH],
        _message: &[u8],
    ) -> Result<()> {
        Err(Curve448Error::NotImplemented(
            "Ed448ph verification is not supported by this provider".into(),
        ))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Providers for exercising error paths.

    use super::*;

    /// Provider whose every operation fails.
    pub(crate) struct FailingProvider;

    impl CryptoProvider for FailingProvider {
        fn x448_generate(&self) -> Result<(SecureBuffer, [u8; X448_PUBLIC_KEY_LENGTH])> {
            Err(Curve448Error::KeyGenerationFailed("no entropy".into()))
        }

        fn x448_public_key(&self, _: &SecureBuffer) -> Result<[u8; X448_PUBLIC_KEY_LENGTH]> {
            Err(Curve448Error::Provider("cannot extract public key".into()))
        }

        fn x448_agree(
            &self,
            _: &SecureBuffer,
            _: &[u8; X448_PUBLIC_KEY_LENGTH],
        ) -> Result<SecureBuffer> {
            Err(Curve448Error::KeyAgreementFailure("derive failed".into()))
        }

        fn ed448_generate(&self) -> Result<(SecureBuffer, [u8; PUBLIC_KEY_LENGTH])> {
            Err(Curve448Error::KeyGenerationFailed("no entropy".into()))
        }

        fn ed448_public_key(&self, _: &SecureBuffer) -> Result<[u8; PUBLIC_KEY_LENGTH]> {
            Err(Curve448Error::Provider("cannot extract public key".into()))
        }

        fn ed448_sign(
            &self,
            _: &SecureBuffer,
            _: Option<&[u8]>,
            _: &[u8],
        ) -> Result<[u8; SIGNATURE_LENGTH]> {
            Err(Curve448Error::Provider("sign failed".into()))
        }

        fn ed448_verify(
            &self,
            _: &[u8; PUBLIC_KEY_LENGTH],
            _: Option<&[u8]>,
            _: &[u8; SIGNATURE_LENGTH],
            _: &[u8],
        ) -> Result<()> {
            Err(Curve448Error::Provider("verify context setup failed".into()))
        }
    }

    /// Provider that answers an X448 agreement with an empty secret.
    pub(crate) struct EmptySecretProvider;

    impl CryptoProvider for EmptySecretProvider {
        fn x448_generate(&self) -> Result<(SecureBuffer, [u8; X448_PUBLIC_KEY_LENGTH])> {
            Ok((SecureBuffer::from_slice(&[1u8; 56]), [2u8; X448_PUBLIC_KEY_LENGTH]))
        }

        fn x448_public_key(&self, _: &SecureBuffer) -> Result<[u8; X448_PUBLIC_KEY_LENGTH]> {
            Ok([2u8; X448_PUBLIC_KEY_LENGTH])
        }

        fn x448_agree(
            &self,
            _: &SecureBuffer,
            _: &[u8; X448_PUBLIC_KEY_LENGTH],
        ) -> Result<SecureBuffer> {
            Ok(SecureBuffer::new(56, |_| 0))
        }

        fn ed448_generate(&self) -> Result<(SecureBuffer, [u8; PUBLIC_KEY_LENGTH])> {
            FailingProvider.ed448_generate()
        }

        fn ed448_public_key(&self, seed: &SecureBuffer) -> Result<[u8; PUBLIC_KEY_LENGTH]> {
            FailingProvider.ed448_public_key(seed)
        }

        fn ed448_sign(
            &self,
            seed: &SecureBuffer,
            context: Option<&[u8]>,
            message: &[u8],
        ) -> Result<[u8; SIGNATURE_LENGTH]> {
            FailingProvider.ed448_sign(seed, context, message)
        }

        fn ed448_verify(
            &self,
            public_key: &[u8; PUBLIC_KEY_LENGTH],
            context: Option<&[u8]>,
            signature: &[u8; SIGNATURE_LENGTH],
            message: &[u8],
        ) -> Result<()> {
            FailingProvider.ed448_verify(public_key, context, signature, message)
        }
    }

    #[test]
    fn optional_capabilities_default_to_not_implemented() {
        let seed = SecureBuffer::from_slice(&[0u8; 57]);
        assert!(matches!(
            FailingProvider.ed448ph_sign(&seed, None, b"abc"),
            Err(Curve448Error::NotImplemented(_)),
        ));
        assert!(matches!(
            FailingProvider.ed448ph_verify(&[0u8; 57], None, &[0u8; 114], b"abc"),
            Err(Curve448Error::NotImplemented(_)),
        ));
    }
}
