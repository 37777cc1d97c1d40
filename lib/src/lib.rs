//! Generation of P-256 key pairs
//!
//! This crate draws private scalars from the random source of a crypto back-end, rejects
//! candidates outside of [1, n-1] (rather than reducing them, which would bias the result), and
//! derives the matching public key through the back-end's constant-time scalar multiplication.
//!
//! Its main entry point is [`KeyPairGenerator`]:
//!
//! ```ignore
//! use lakers_keygen::KeyPairGenerator;
//!
//! let mut generator = KeyPairGenerator::new(lakers_keygen_crypto::default_crypto());
//! let (private_key, public_key) = generator.generate()?.into_parts();
//! ```
//!
//! The back-end is anything implementing the [`CryptoTrait`]; the `lakers-keygen-crypto` crate
//! provides a default selected at build time.
#![cfg_attr(not(test), no_std)]

pub use lakers_keygen_shared::Crypto as CryptoTrait;
pub use lakers_keygen_shared::*;

use defmt_or_log::{debug, trace, warn};
use zeroize::Zeroizing;

/// Produces fresh P-256 key pairs, one per call to [`Self::generate`].
///
/// The generator owns its crypto back-end (and through it, the random source), but no state of
/// its own: calls are independent, and no key material is kept after a call returns.
#[derive(Debug)]
pub struct KeyPairGenerator<Crypto: CryptoTrait> {
    crypto: Crypto,
}

impl<Crypto: CryptoTrait> KeyPairGenerator<Crypto> {
    pub const fn new(crypto: Crypto) -> Self {
        Self { crypto }
    }

    /// Generate a key pair with a private key uniformly distributed over [1, n-1].
    ///
    /// On error, no key material is returned. [`KeyGenError::EntropyUnavailable`] can be
    /// retried once the random source is ready; [`KeyGenError::InternalArithmeticError`] can not.
    pub fn generate(&mut self) -> Result<KeyPair, KeyGenError> {
        p256_generate_key_pair(&mut self.crypto)
    }

    /// Recompute the public key belonging to `private_key`.
    pub fn public_key(&mut self, private_key: &PrivateKey) -> Result<PublicKey, KeyGenError> {
        trace!("Enter public_key");
        self.crypto
            .p256_scalar_base_mult(private_key.as_bytes())
            .map(PublicKey::from_bytes)
    }

    pub fn validate_private_key(&self, private_key: &PrivateKey) -> Result<(), KeyGenError> {
        if self.crypto.p256_scalar_is_valid(private_key.as_bytes()) {
            Ok(())
        } else {
            Err(KeyGenError::InvalidPrivateKey)
        }
    }

    pub fn validate_public_key(&self, public_key: &PublicKey) -> Result<(), KeyGenError> {
        if self.crypto.p256_x_is_on_curve(public_key.as_bytes()) {
            Ok(())
        } else {
            Err(KeyGenError::InvalidPublicKey)
        }
    }

    /// Raw P-256 Diffie-Hellman: the x coordinate of `private_key`·`public_key`.
    pub fn ecdh(
        &mut self,
        private_key: &PrivateKey,
        public_key: &PublicKey,
    ) -> Result<BytesP256ElemLen, KeyGenError> {
        trace!("Enter ecdh");
        self.crypto
            .p256_ecdh(private_key.as_bytes(), public_key.as_bytes())
    }

    pub fn crypto_mut(&mut self) -> &mut Crypto {
        &mut self.crypto
    }

    pub fn into_crypto(self) -> Crypto {
        self.crypto
    }
}

/// Generate a key pair using an existing crypto back-end.
///
/// This is what [`KeyPairGenerator::generate`] does; it is available on its own for callers that
/// hold a `&mut` back-end they do not want to move into a generator.
pub fn p256_generate_key_pair(crypto: &mut impl CryptoTrait) -> Result<KeyPair, KeyGenError> {
    trace!("Enter p256_generate_key_pair");

    let private_key = draw_private_key(crypto)?;
    let public_key = crypto
        .p256_scalar_base_mult(private_key.as_bytes())
        .map_err(|err| match err {
            // the scalar passed validation by the same back-end just before
            KeyGenError::InvalidPrivateKey => KeyGenError::InternalArithmeticError,
            err => err,
        })?;

    Ok(KeyPair {
        private_key,
        public_key: PublicKey::from_bytes(public_key),
    })
}

fn draw_private_key(crypto: &mut impl CryptoTrait) -> Result<PrivateKey, KeyGenError> {
    let mut candidate = Zeroizing::new([0u8; P256_ELEM_LEN]);

    for _ in 0..MAX_SCALAR_DRAWS {
        if let Err(err) = crypto.fill_random(&mut *candidate) {
            warn!("Random source unavailable");
            return Err(err);
        }
        if crypto.p256_scalar_is_valid(&*candidate) {
            return Ok(PrivateKey::from_bytes(*candidate));
        }
        debug!("Rejected scalar candidate outside of [1, n-1]");
    }

    warn!("No valid scalar after {} draws", MAX_SCALAR_DRAWS);
    Err(KeyGenError::EntropyUnavailable)
}
