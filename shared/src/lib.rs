//! Common data structures used by [lakers-keygen] and its crypto back-ends
//!
//! This crate is separate from lakers-keygen so that the back-end crates can implement the
//! [`Crypto`] trait without depending on the generator itself. It is recommended to use its types
//! through the public re-export in the main crate wherever possible.
//!
//! [lakers-keygen]: https://docs.rs/lakers-keygen/
#![cfg_attr(not(test), no_std)]

mod crypto;
pub use crypto::*;

mod keys;
pub use keys::*;

pub const P256_ELEM_LEN: usize = 32;

/// Upper bound on the number of 32-byte candidates drawn while looking for a valid scalar.
///
/// A single draw is rejected with probability below 2^-32, so a healthy random source never gets
/// near this; running out of draws means the source is stuck.
pub const MAX_SCALAR_DRAWS: usize = 64;

pub type BytesP256ElemLen = [u8; P256_ELEM_LEN];

#[derive(PartialEq, Eq, Debug, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
#[repr(C)]
pub enum KeyGenError {
    /// The random source could not supply bytes (or kept supplying unusable ones).
    ///
    /// Callers may retry once the platform's RNG is ready, or abort start-up.
    EntropyUnavailable,
    /// The curve arithmetic produced a result that cannot occur with intact state.
    ///
    /// This is not recoverable by retrying.
    InternalArithmeticError,
    /// A private key passed in is zero or not below the group order.
    InvalidPrivateKey,
    /// A public key passed in is not the x coordinate of any curve point.
    InvalidPublicKey,
    /// A slice passed in does not have the length of a P-256 field element.
    InvalidLength,
}

impl core::fmt::Display for KeyGenError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            KeyGenError::EntropyUnavailable => "random source unavailable",
            KeyGenError::InternalArithmeticError => "internal curve arithmetic error",
            KeyGenError::InvalidPrivateKey => "private key out of range",
            KeyGenError::InvalidPublicKey => "public key not on curve",
            KeyGenError::InvalidLength => "key must be 32 bytes long",
        };
        f.write_str(msg)
    }
}
