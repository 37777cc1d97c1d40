use super::*;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A P-256 private key: the big-endian encoding of a scalar.
///
/// Values produced by the generator are always in [1, n-1]. Values built with
/// [`Self::from_bytes`] are taken as they are; check them with the generator's
/// `validate_private_key` before use.
///
/// The bytes are wiped when the key is dropped, and the `Debug` output does not show them.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey(BytesP256ElemLen);

impl PrivateKey {
    pub const fn from_bytes(bytes: BytesP256ElemLen) -> Self {
        Self(bytes)
    }

    /// Try to construct a PrivateKey from a slice, which must be exactly 32 bytes long.
    ///
    /// ```
    /// # use lakers_keygen_shared::{KeyGenError, PrivateKey};
    /// assert!(PrivateKey::from_slice(&[0x01; 32]).is_ok());
    /// assert_eq!(
    ///     PrivateKey::from_slice(&[0x01; 31]).err(),
    ///     Some(KeyGenError::InvalidLength)
    /// );
    /// ```
    pub fn from_slice(input: &[u8]) -> Result<Self, KeyGenError> {
        let bytes: BytesP256ElemLen = input.try_into().map_err(|_| KeyGenError::InvalidLength)?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &BytesP256ElemLen {
        &self.0
    }

    /// Copy the key out, e.g. into a caller-owned FFI buffer.
    ///
    /// The copy is not wiped automatically.
    pub fn to_bytes(&self) -> BytesP256ElemLen {
        self.0
    }
}

impl core::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PrivateKey").finish_non_exhaustive()
    }
}

/// A P-256 public key, represented by the big-endian x coordinate of its point.
///
/// Only the x coordinate is kept, as that is all that P-256 ECDH needs.
#[derive(PartialEq, Eq, Debug, Copy, Clone, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct PublicKey(BytesP256ElemLen);

impl PublicKey {
    pub const fn from_bytes(bytes: BytesP256ElemLen) -> Self {
        Self(bytes)
    }

    /// Try to construct a PublicKey from a slice, which must be exactly 32 bytes long.
    pub fn from_slice(input: &[u8]) -> Result<Self, KeyGenError> {
        let bytes: BytesP256ElemLen = input.try_into().map_err(|_| KeyGenError::InvalidLength)?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &BytesP256ElemLen {
        &self.0
    }

    pub fn to_bytes(&self) -> BytesP256ElemLen {
        self.0
    }
}

impl From<BytesP256ElemLen> for PublicKey {
    fn from(bytes: BytesP256ElemLen) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// The result of one key generation.
///
/// Nothing about it is kept by the generator; once returned it belongs to the caller.
#[derive(Debug, Clone)]
pub struct KeyPair {
    pub private_key: PrivateKey,
    pub public_key: PublicKey,
}

impl KeyPair {
    pub fn into_parts(self) -> (PrivateKey, PublicKey) {
        (self.private_key, self.public_key)
    }
}
