//! Cryptography dispatch for the lakers-keygen crate
//!
//! This crate is used by lakers-keygen users (the C and Python bindings in particular) to decide
//! which cryptographic back-end to use without naming it. The back-end is picked through cargo
//! features; only the RustCrypto back-end is currently available.
#![cfg_attr(not(test), no_std)]

/// Convenience re-export
pub use lakers_keygen_shared::Crypto as CryptoTrait;

#[cfg(feature = "rustcrypto")]
pub type Crypto = lakers_keygen_crypto_rustcrypto::Crypto<rand_core::OsRng>;

#[cfg(feature = "rustcrypto")]
pub const fn default_crypto() -> Crypto {
    lakers_keygen_crypto_rustcrypto::Crypto::new(rand_core::OsRng)
}

/// See test_implements_crypto
#[allow(dead_code)]
fn test_helper<T: CryptoTrait>() {}

/// Ensure at build time that whichever type as selected for Crypto actually implements the Crypto
/// trait, and that one is actually defined.
#[allow(dead_code)]
fn test_implements_crypto() {
    test_helper::<Crypto>()
}
