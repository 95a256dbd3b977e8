//! X448 key agreement and Ed448 signatures.
//!
//! ## Introduction
//!
//! This library is not officially audited and reviewed.
//! Use it **AT YOUR OWN RISK**.
//!
//! Two key families are offered:
//! - [`key_agreement`]: X448 ([RFC 7748](https://datatracker.ietf.org/doc/html/rfc7748))
//!   private keys, public keys and shared secrets.
//! - [`signing`]: Ed448 ([RFC 8032](https://datatracker.ietf.org/doc/html/rfc8032))
//!   private keys, public keys and [`Signature`]s, including the Ed448ctx and
//!   Ed448ph variants.
//!
//! Private keys and shared secrets live in a [`SecureBuffer`] that is wiped
//! when dropped. Curve arithmetic is delegated to a [`CryptoProvider`]; the
//! built-in one, [`Goldilocks`], wraps
//! [`ed448-goldilocks`](https://docs.rs/ed448-goldilocks/latest/ed448_goldilocks/)
//! and [`x448`](https://docs.rs/x448/latest/x448/) and is enabled by the
//! default feature "goldilocks". Every operation also has a `*_with` variant
//! that takes any provider.
//!
//! ## Example
//!
//! ```
//! use curve448::signing::PrivateKey;
//! use hex_literal::hex;
//!
//! let private_key = PrivateKey::from_raw_bytes(&hex!(
//!     "258cdd4ada32ed9c9ff54e63756ae582fb8fab2ac721f2c8e676a72768513d939f63dddb55609133f29adf86ec9929dccb52c1c5fd2ff7e21b"
//! ))
//! .unwrap();
//! let message = hex!("64a65f3cdedcdd66811e2915");
//! let signature = private_key.sign(&message).unwrap();
//! assert_eq!(
//!     signature.to_bytes(),
//!     hex!("7eeeab7c4e50fb799b418ee5e3197ff6bf15d43a14c34389b59dd1a7b1b85b4ae90438aca634bea45e3a2695f1270f07fdcdf7c62b8efeaf00b45c2c96ba457eb1a8bf075a3db28e5c24f6b923ed4ad747c3c9e03c7079efb87cb110d3a99861e72003cbae6d6b8b827e4e6c143064ff3c00"),
//! );
//! assert!(private_key.public_key().is_valid_signature(&signature, &message));
//! ```
//!
//! Verification never fails with an error; any problem makes it answer
//! `false`. Enable a [`tracing`](https://docs.rs/tracing) subscriber at the
//! debug level to see why.

pub mod bytes;
pub mod constants;
pub mod error;
#[cfg(feature = "goldilocks")]
pub mod goldilocks;
pub mod key_agreement;
pub mod provider;
pub mod secure;
pub mod signature;
pub mod signing;

pub use bytes::ByteSequence;
pub use error::{Curve448Error, Result};
#[cfg(feature = "goldilocks")]
pub use goldilocks::Goldilocks;
pub use provider::CryptoProvider;
pub use secure::SecureBuffer;
pub use signature::Signature;
