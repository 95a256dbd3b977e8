//! Built-in provider.
//!
//! [`Goldilocks`] implements [`CryptoProvider`] with
//! - [`ed448-goldilocks`](https://docs.rs/ed448-goldilocks/latest/ed448_goldilocks/)
//!   for Edwards point and scalar arithmetic,
//! - [`x448`](https://docs.rs/x448/latest/x448/) for the Montgomery ladder,
//! - [`sha3`](https://docs.rs/sha3/latest/sha3/) for SHAKE256, and
//! - [`rand`](https://docs.rs/rand/latest/rand/)'s `OsRng` for entropy.
//!
//! Signing follows [RFC 8032 §5.2.6](https://datatracker.ietf.org/doc/html/rfc8032#section-5.2.6)
//! and verification [§5.2.7](https://datatracker.ietf.org/doc/html/rfc8032#section-5.2.7).

use digest::{ExtendableOutput, Update, XofReader};
use ed448_goldilocks::{
    curve::edwards::{CompressedEdwardsY, ExtendedPoint},
    Scalar,
};
use rand::{rngs::OsRng, RngCore};
use sha3::Shake256;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::constants::{
    MAX_CONTEXT_LENGTH, PREHASH_LENGTH, PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH, SIGNATURE_LENGTH,
    X448_PRIVATE_KEY_LENGTH, X448_PUBLIC_KEY_LENGTH, X448_SHARED_SECRET_LENGTH,
};
use crate::error::{Curve448Error, Result};
use crate::provider::CryptoProvider;
use crate::secure::SecureBuffer;
use crate::signature::Signature;

/// Provider backed by `ed448-goldilocks` and `x448`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Goldilocks;

impl CryptoProvider for Goldilocks {
    fn x448_generate(&self) -> Result<(SecureBuffer, [u8; X448_PUBLIC_KEY_LENGTH])> {
        let private_key = random_buffer(X448_PRIVATE_KEY_LENGTH)?;
        let public_key = self
            .x448_public_key(&private_key)
            .map_err(|e| Curve448Error::KeyGenerationFailed(e.to_string()))?;
        Ok((private_key, public_key))
    }

    fn x448_public_key(&self, private_key: &SecureBuffer) -> Result<[u8; X448_PUBLIC_KEY_LENGTH]> {
        let scalar = x448_scalar(private_key).ok_or_else(|| {
            Curve448Error::incorrect_key_size(
                "X448 private key",
                X448_PRIVATE_KEY_LENGTH,
                private_key.len(),
            )
        })?;
        x448::x448(*scalar, x448::X448_BASEPOINT_BYTES).ok_or_else(|| {
            Curve448Error::Provider("could not derive the X448 public key".into())
        })
    }

    fn x448_agree(
        &self,
        private_key: &SecureBuffer,
        peer_public_key: &[u8; X448_PUBLIC_KEY_LENGTH],
    ) -> Result<SecureBuffer> {
        let scalar = x448_scalar(private_key).ok_or_else(|| {
            Curve448Error::KeyAgreementFailure("failed to reconstruct the private key".into())
        })?;
        // `x448::x448` only recognizes canonical encodings of low-order points
        let shared = Zeroizing::new(x448::x448(*scalar, *peer_public_key).ok_or_else(|| {
            Curve448Error::KeyAgreementFailure("peer public key is a low-order point".into())
        })?);
        // RFC 7748 §6.2: an all-zero output means the peer point has low order
        if bool::from(shared[..].ct_eq(&[0u8; X448_SHARED_SECRET_LENGTH][..])) {
            return Err(Curve448Error::KeyAgreementFailure(
                "peer public key is a low-order point".into(),
            ));
        }
        Ok(SecureBuffer::new(X448_SHARED_SECRET_LENGTH, |out| {
            out.copy_from_slice(&shared[..]);
            X448_SHARED_SECRET_LENGTH
        }))
    }

    fn ed448_generate(&self) -> Result<(SecureBuffer, [u8; PUBLIC_KEY_LENGTH])> {
        let seed = random_buffer(SECRET_KEY_LENGTH)?;
        let public_key = self
            .ed448_public_key(&seed)
            .map_err(|e| Curve448Error::KeyGenerationFailed(e.to_string()))?;
        Ok((seed, public_key))
    }

    fn ed448_public_key(&self, seed: &SecureBuffer) -> Result<[u8; PUBLIC_KEY_LENGTH]> {
        let expanded = ExpandedSecretKey::from_seed(seed)?;
        Ok(expanded.public_key().0)
    }

    fn ed448_sign(
        &self,
        seed: &SecureBuffer,
        context: Option<&[u8]>,
        message: &[u8],
    ) -> Result<[u8; SIGNATURE_LENGTH]> {
        let dom = Dom4::new(false, context)?;
        ExpandedSecretKey::from_seed(seed)?.raw_sign(&dom, message)
    }

    fn ed448_verify(
        &self,
        public_key: &[u8; PUBLIC_KEY_LENGTH],
        context: Option<&[u8]>,
        signature: &[u8; SIGNATURE_LENGTH],
        message: &[u8],
    ) -> Result<()> {
        let dom = Dom4::new(false, context)?;
        VerifyingKey::from_bytes(public_key)?.raw_verify(&dom, signature, message)
    }

    fn ed448ph_sign(
        &self,
        seed: &SecureBuffer,
        context: Option<&[u8]>,
        message: &[u8],
    ) -> Result<[u8; SIGNATURE_LENGTH]> {
        let dom = Dom4::new(true, context)?;
        ExpandedSecretKey::from_seed(seed)?.raw_sign(&dom, &prehash(message))
    }

    fn ed448ph_verify(
        &self,
        public_key: &[u8; PUBLIC_KEY_LENGTH],
        context: Option<&[u8]>,
        signature: &[u8; SIGNATURE_LENGTH],
        message: &[u8],
    ) -> Result<()> {
        let dom = Dom4::new(true, context)?;
        VerifyingKey::from_bytes(public_key)?.raw_verify(&dom, signature, &prehash(message))
    }
}

// fills a fresh buffer from the OS entropy source
fn random_buffer(length: usize) -> Result<SecureBuffer> {
    SecureBuffer::try_new(length, |bytes| {
        OsRng.try_fill_bytes(bytes).map_err(|e| {
            Curve448Error::KeyGenerationFailed(format!("entropy source failed: {e}"))
        })?;
        Ok(length)
    })
}

// clamping is done by `x448::x448`
fn x448_scalar(private_key: &SecureBuffer) -> Option<Zeroizing<[u8; X448_PRIVATE_KEY_LENGTH]>> {
    private_key.with_bytes(|bytes| {
        let scalar: [u8; X448_PRIVATE_KEY_LENGTH] = bytes.try_into().ok()?;
        Some(Zeroizing::new(scalar))
    })
}

fn shake256(parts: &[&[u8]], out: &mut [u8]) {
    let mut hasher = Shake256::default();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize_xof().read(out);
}

// PH(M) = SHAKE256(M, 64)
fn prehash(message: &[u8]) -> [u8; PREHASH_LENGTH] {
    let mut hash = [0u8; PREHASH_LENGTH];
    shake256(&[message], &mut hash);
    hash
}

/// dom4(x, y) = "SigEd448" || octet(x) || octet(OLEN(y)) || y
///
/// where x = 0 (Ed448) or 1 (Ed448ph), and y = context.
/// https://datatracker.ietf.org/doc/html/rfc8032#section-2
struct Dom4<'a> {
    header: [u8; 10],
    context: &'a [u8],
}

impl<'a> Dom4<'a> {
    fn new(prehashed: bool, context: Option<&'a [u8]>) -> Result<Self> {
        let context = context.unwrap_or_default();
        if context.len() > MAX_CONTEXT_LENGTH {
            return Err(Curve448Error::Value(format!(
                "context must be at most {MAX_CONTEXT_LENGTH} bytes, found {}",
                context.len()
            )));
        }
        let mut header = [0u8; 10];
        header[..8].copy_from_slice(b"SigEd448");
        header[8] = u8::from(prehashed);
        header[9] = context.len() as u8;
        Ok(Dom4 { header, context })
    }
}

#[allow(non_snake_case)]
fn compute_challenge(
    dom: &Dom4<'_>,
    R: &CompressedEdwardsY,
    A: &CompressedEdwardsY,
    M: &[u8],
) -> Scalar {
    let mut hash = [0u8; SIGNATURE_LENGTH];
    shake256(&[&dom.header[..], dom.context, &R.0[..], &A.0[..], M], &mut hash);
    Scalar::from_bytes_mod_order_wide(&hash)
}

/// Secret scalar and nonce prefix derived from a seed.
///
/// https://datatracker.ietf.org/doc/html/rfc8032#section-5.2.5
struct ExpandedSecretKey {
    scalar: Scalar,
    prefix: Zeroizing<[u8; SECRET_KEY_LENGTH]>,
}

impl ExpandedSecretKey {
    fn from_seed(seed: &SecureBuffer) -> Result<Self> {
        if seed.len() != SECRET_KEY_LENGTH {
            return Err(Curve448Error::incorrect_key_size(
                "Ed448 seed",
                SECRET_KEY_LENGTH,
                seed.len(),
            ));
        }
        let mut h = Zeroizing::new([0u8; SIGNATURE_LENGTH]);
        seed.with_bytes(|seed| shake256(&[seed], &mut h[..]));

        // the clamped lower half, reduced modulo the group order
        let mut wide = Zeroizing::new([0u8; SIGNATURE_LENGTH]);
        wide[..SECRET_KEY_LENGTH].copy_from_slice(&h[..SECRET_KEY_LENGTH]);
        wide[0] &= 0xfc;
        wide[55] |= 0x80;
        wide[56] = 0;
        let scalar = Scalar::from_bytes_mod_order_wide(&wide);

        let mut prefix = Zeroizing::new([0u8; SECRET_KEY_LENGTH]);
        prefix.copy_from_slice(&h[SECRET_KEY_LENGTH..]);
        Ok(ExpandedSecretKey { scalar, prefix })
    }

    fn public_key(&self) -> CompressedEdwardsY {
        ExtendedPoint::generator().scalar_mul(&self.scalar).compress()
    }

    #[allow(non_snake_case)]
    fn raw_sign(self, dom: &Dom4<'_>, M: &[u8]) -> Result<[u8; SIGNATURE_LENGTH]> {
        let A = self.public_key();

        let mut r_hash = Zeroizing::new([0u8; SIGNATURE_LENGTH]);
        shake256(&[&dom.header[..], dom.context, &self.prefix[..], M], &mut r_hash[..]);
        let mut r = Scalar::from_bytes_mod_order_wide(&r_hash);
        let R = ExtendedPoint::generator().scalar_mul(&r).compress();

        let k = compute_challenge(dom, &R, &A, M);
        let S = r + k * self.scalar;
        wipe_scalar(&mut r);

        // S < L < 2^446, so the most significant octet stays zero
        let mut signature = [0u8; SIGNATURE_LENGTH];
        signature[..PUBLIC_KEY_LENGTH].copy_from_slice(&R.0);
        let s_bytes = S.to_bytes();
        signature[PUBLIC_KEY_LENGTH..PUBLIC_KEY_LENGTH + s_bytes.len()].copy_from_slice(&s_bytes);
        Ok(signature)
    }
}

impl Drop for ExpandedSecretKey {
    fn drop(&mut self) {
        wipe_scalar(&mut self.scalar);
    }
}

// `Scalar` does not implement `Zeroize`; overwrite it the way `zeroize` does
fn wipe_scalar(scalar: &mut Scalar) {
    let zero = Scalar::from_bytes_mod_order_wide(&[0u8; SIGNATURE_LENGTH]);
    // SAFETY: `scalar` is a valid, aligned, exclusive reference and `zero`
    // is a valid `Scalar`
    unsafe { std::ptr::write_volatile(scalar, zero) };
    std::sync::atomic::compiler_fence(std::sync::atomic::Ordering::SeqCst);
}

/// Decoded Ed448 public key.
struct VerifyingKey {
    compressed: CompressedEdwardsY,
    point: ExtendedPoint,
}

impl VerifyingKey {
    fn from_bytes(bytes: &[u8; PUBLIC_KEY_LENGTH]) -> Result<Self> {
        let compressed = CompressedEdwardsY(*bytes);
        let point = compressed.decompress().ok_or_else(|| {
            Curve448Error::Provider("public key is not a valid curve point".into())
        })?;
        Ok(VerifyingKey { compressed, point })
    }

    #[allow(non_snake_case)]
    fn raw_verify(&self, dom: &Dom4<'_>, signature: &[u8; SIGNATURE_LENGTH], M: &[u8]) -> Result<()> {
        let signature = Signature::from_bytes(signature);
        let R = CompressedEdwardsY(signature.R_bytes());
        let s = Scalar::from_canonical_bytes(signature.s_bytes()).ok_or_else(|| {
            Curve448Error::Provider("signature scalar is not canonical".into())
        })?;

        let k = compute_challenge(dom, &R, &self.compressed, M);
        // calculates R = -[k]A + [s]B
        // Step 3 at https://datatracker.ietf.org/doc/html/rfc8032#section-5.2.7
        let minus_A: ExtendedPoint = -self.point;
        let k_A = minus_A.scalar_mul(&k);
        let s_B = ExtendedPoint::generator().scalar_mul(&s);
        let expected_R = (k_A + s_B).compress();
        if expected_R.0 == R.0 {
            Ok(())
        } else {
            Err(Curve448Error::Provider("signature mismatch".into()))
        }
    }
}

#[cfg(test)]
mod test {
    use hex_literal::hex;

    use super::*;

    // https://datatracker.ietf.org/doc/html/rfc8032#section-7.4
    const SEED: [u8; SECRET_KEY_LENGTH] = hex!("c4eab05d357007c632f3dbb48489924d552b08fe0c353a0d4a1f00acda2c463afbea67c5e8d2877c5e3bc397a659949ef8021e954e0a12274e");
    const PUBLIC: [u8; PUBLIC_KEY_LENGTH] = hex!("43ba28f430cdff456ae531545f7ecd0ac834a55d9358c0372bfa0c6c6798c0866aea01eb00742802b8438ea4cb82169c235160627b4c3a9480");

    fn seed() -> SecureBuffer {
        SecureBuffer::from_slice(&SEED)
    }

    #[test]
    fn ed448_public_key_from_seed() {
        assert_eq!(Goldilocks.ed448_public_key(&seed()).unwrap(), PUBLIC);
    }

    #[test]
    fn ed448_seed_of_wrong_size() {
        let short = SecureBuffer::from_slice(&SEED[..56]);
        assert!(matches!(
            Goldilocks.ed448_sign(&short, None, b"\x03"),
            Err(Curve448Error::IncorrectKeySize(_)),
        ));
    }

    #[test]
    fn ed448_sign_then_verify() {
        let signature = Goldilocks.ed448_sign(&seed(), None, b"\x03").unwrap();
        assert!(Goldilocks.ed448_verify(&PUBLIC, None, &signature, b"\x03").is_ok());
        assert!(Goldilocks.ed448_verify(&PUBLIC, None, &signature, b"\x04").is_err());
        // a context changes dom4, so the plain signature must not verify
        assert!(Goldilocks
            .ed448_verify(&PUBLIC, Some(b"foo"), &signature, b"\x03")
            .is_err());
    }

    #[test]
    fn ed448_context_too_long() {
        let context = [0u8; MAX_CONTEXT_LENGTH + 1];
        assert!(matches!(
            Goldilocks.ed448_sign(&seed(), Some(&context), b"\x03"),
            Err(Curve448Error::Value(_)),
        ));
        let signature = Goldilocks
            .ed448_sign(&seed(), Some(&context[..MAX_CONTEXT_LENGTH]), b"\x03")
            .unwrap();
        assert!(Goldilocks
            .ed448_verify(&PUBLIC, Some(&context[..MAX_CONTEXT_LENGTH]), &signature, b"\x03")
            .is_ok());
        assert!(Goldilocks
            .ed448_verify(&PUBLIC, Some(&context), &signature, b"\x03")
            .is_err());
    }

    #[test]
    fn ed448_rejects_invalid_public_key() {
        // obviously y > p = 2^448 - 2^224 - 1
        let public_key = [0xffu8; PUBLIC_KEY_LENGTH];
        let signature = Goldilocks.ed448_sign(&seed(), None, b"\x03").unwrap();
        assert!(Goldilocks
            .ed448_verify(&public_key, None, &signature, b"\x03")
            .is_err());
    }

    #[test]
    fn ed448_rejects_non_canonical_scalar() {
        let mut signature = Goldilocks.ed448_sign(&seed(), None, b"\x03").unwrap();
        // S = L, the group order
        signature[PUBLIC_KEY_LENGTH..].copy_from_slice(&hex!("f34458ab92c27823558fc58d72c26c219036d6ae49db4ec4e923ca7cffffffffffffffffffffffffffffffffffffffffffffffffffffff3f00"));
        assert!(Goldilocks
            .ed448_verify(&PUBLIC, None, &signature, b"\x03")
            .is_err());
    }

    #[test]
    fn ed448ph_sign_then_verify() {
        let signature = Goldilocks.ed448ph_sign(&seed(), None, b"abc").unwrap();
        assert!(Goldilocks.ed448ph_verify(&PUBLIC, None, &signature, b"abc").is_ok());
        // Ed448ph and Ed448 signatures are not interchangeable
        assert!(Goldilocks.ed448_verify(&PUBLIC, None, &signature, b"abc").is_err());
    }

    #[test]
    fn x448_rfc7748_scalar_multiplication() {
        // https://datatracker.ietf.org/doc/html/rfc7748#section-5.2
        let scalar = SecureBuffer::from_slice(&hex!("3d262fddf9ec8e88495266fea19a34d28882acef045104d0d1aae121700a779c984c24f8cdd78fbff44943eba368f54b29259a4f1c600ad3"));
        let u = hex!("06fce640fa3487bfda5f6cf2d5263f8aad88334cbd07437f020f08f9814dc031ddbdc38c19c6da2583fa5429db94ada18aa7a7fb4ef8a086");
        let output = Goldilocks.x448_agree(&scalar, &u).unwrap();
        output.with_bytes(|bytes| {
            assert_eq!(bytes, hex!("ce3e4ff95a60dc6697da1db1d85e6afbdf79b50a2412d7546d5f239fe14fbaadeb445fc66a01b0779d98223961111e21766282f73dd96b6f"));
        });
    }

    #[test]
    fn x448_rejects_low_order_peer() {
        let (private_key, _) = Goldilocks.x448_generate().unwrap();
        for u in [[0u8; X448_PUBLIC_KEY_LENGTH], {
            let mut one = [0u8; X448_PUBLIC_KEY_LENGTH];
            one[0] = 1;
            one
        }] {
            assert!(matches!(
                Goldilocks.x448_agree(&private_key, &u),
                Err(Curve448Error::KeyAgreementFailure(_)),
            ));
        }
    }

    #[test]
    fn x448_rejects_non_canonical_low_order_peer() {
        let (private_key, _) = Goldilocks.x448_generate().unwrap();
        // u = p and u = p + 1 reduce to the low-order points 0 and 1
        let p = hex!("fffffffffffffffffffffffffffffffffffffffffffffffffffffffffeffffffffffffffffffffffffffffffffffffffffffffffffffffff");
        let p_plus_1 = hex!("00000000000000000000000000000000000000000000000000000000ffffffffffffffffffffffffffffffffffffffffffffffffffffffff");
        for u in [p, p_plus_1] {
            assert!(matches!(
                Goldilocks.x448_agree(&private_key, &u),
                Err(Curve448Error::KeyAgreementFailure(_)),
            ));
        }
    }

    #[test]
    fn wipe_scalar_clears_value() {
        let mut scalar = Scalar::from_bytes_mod_order_wide(&[7u8; SIGNATURE_LENGTH]);
        wipe_scalar(&mut scalar);
        assert!(scalar.to_bytes().iter().all(|&byte| byte == 0));
    }

    #[test]
    fn x448_private_key_of_wrong_size() {
        let private_key = SecureBuffer::from_slice(&[7u8; 55]);
        assert!(matches!(
            Goldilocks.x448_public_key(&private_key),
            Err(Curve448Error::IncorrectKeySize(_)),
        ));
        assert!(matches!(
            Goldilocks.x448_agree(&private_key, &x448::X448_BASEPOINT_BYTES),
            Err(Curve448Error::KeyAgreementFailure(_)),
        ));
    }

    #[test]
    fn generated_keys_have_fixed_sizes() {
        let (private_key, public_key) = Goldilocks.x448_generate().unwrap();
        assert_eq!(private_key.len(), X448_PRIVATE_KEY_LENGTH);
        assert_eq!(Goldilocks.x448_public_key(&private_key).unwrap(), public_key);

        let (seed, public_key) = Goldilocks.ed448_generate().unwrap();
        assert_eq!(seed.len(), SECRET_KEY_LENGTH);
        assert_eq!(Goldilocks.ed448_public_key(&seed).unwrap(), public_key);
    }
}
