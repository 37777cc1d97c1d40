//! Cryptography trait back-end for the lakers-keygen-crypto crate

use super::*;

/// Interface between the lakers-keygen crate and any implementation of the required P-256
/// primitives.
///
/// Sending the curve operations through a trait gives the generator the flexibility to use
/// hardware acceleration on microcontrollers or software implementations, and lets tests swap in
/// a scripted random source.
///
/// The trait operates on an exclusive reference, which is useful for hardware implementations
/// that can only perform a single operation at a time, and which also expresses that the random
/// source is held for exactly the duration of one call. When a back-end has to be shared between
/// threads, wrap it into the platform's mutex.
///
/// Implementations must perform scalar validation and scalar multiplication in constant time.
pub trait Crypto: core::fmt::Debug {
    /// Fill `dest` entirely with output of a cryptographically secure random source.
    ///
    /// Fails with [`KeyGenError::EntropyUnavailable`] if the source is not ready; `dest` may then
    /// hold arbitrary data and must be discarded by the caller.
    fn fill_random(&mut self, dest: &mut [u8]) -> Result<(), KeyGenError>;
    /// Whether the big-endian `candidate` is a scalar in [1, n-1].
    fn p256_scalar_is_valid(&self, candidate: &BytesP256ElemLen) -> bool;
    /// x coordinate of `scalar`·G.
    fn p256_scalar_base_mult(
        &mut self,
        scalar: &BytesP256ElemLen,
    ) -> Result<BytesP256ElemLen, KeyGenError>;
    /// Whether `x` is the x coordinate of a point on the curve.
    fn p256_x_is_on_curve(&self, x: &BytesP256ElemLen) -> bool;
    fn p256_ecdh(
        &mut self,
        private_key: &BytesP256ElemLen,
        public_key: &BytesP256ElemLen,
    ) -> Result<BytesP256ElemLen, KeyGenError>;
}
