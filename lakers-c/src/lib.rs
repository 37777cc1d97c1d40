//! FFI bindings for the lakers-keygen library.
//!
//! All key buffers are caller-allocated and exactly `P256_ELEM_LEN` (32) bytes long. Functions
//! return 0 on success and a negative [`KeyGenErrorC`] otherwise; on failure, output buffers are
//! zero-filled so that no partial key material is left behind.
//!
//! Example command to compile this module for the nRF52840:
//! cargo build --target='thumbv7em-none-eabihf' --no-default-features --features="crypto-rustcrypto,baremetal"
#![cfg_attr(feature = "baremetal", no_std)]

use core::ptr;
use lakers_keygen::*;
use lakers_keygen_crypto::default_crypto;

// crate type staticlib requires a panic handler
#[cfg(feature = "baremetal")]
use panic_semihosting as _;

#[derive(PartialEq, Eq, Debug, Copy, Clone)]
#[repr(i8)]
pub enum KeyGenErrorC {
    Success = 0,
    EntropyUnavailable = -1,
    InternalArithmeticError = -2,
    InvalidPrivateKey = -3,
    InvalidPublicKey = -4,
    InvalidLength = -5,
    NullPointer = -6,
}

impl From<KeyGenError> for KeyGenErrorC {
    fn from(err: KeyGenError) -> Self {
        match err {
            KeyGenError::EntropyUnavailable => KeyGenErrorC::EntropyUnavailable,
            KeyGenError::InternalArithmeticError => KeyGenErrorC::InternalArithmeticError,
            KeyGenError::InvalidPrivateKey => KeyGenErrorC::InvalidPrivateKey,
            KeyGenError::InvalidPublicKey => KeyGenErrorC::InvalidPublicKey,
            KeyGenError::InvalidLength => KeyGenErrorC::InvalidLength,
            // KeyGenError is non_exhaustive; anything new is a library fault from C's view
            _ => KeyGenErrorC::InternalArithmeticError,
        }
    }
}

unsafe fn clear(out: *mut u8) {
    ptr::write_bytes(out, 0, P256_ELEM_LEN);
}

unsafe fn generate_into(
    crypto: impl CryptoTrait,
    out_private_key: *mut u8,
    out_public_key: *mut u8,
) -> i8 {
    if out_private_key.is_null() || out_public_key.is_null() {
        return KeyGenErrorC::NullPointer as i8;
    }

    match KeyPairGenerator::new(crypto).generate() {
        Ok(key_pair) => {
            // copy the arrays to the pointers received from C; the Rust-side copy of the private
            // key is wiped when key_pair is dropped
            ptr::copy_nonoverlapping(
                key_pair.private_key.as_bytes().as_ptr(),
                out_private_key,
                P256_ELEM_LEN,
            );
            ptr::copy_nonoverlapping(
                key_pair.public_key.as_bytes().as_ptr(),
                out_public_key,
                P256_ELEM_LEN,
            );
            KeyGenErrorC::Success as i8
        }
        Err(err) => {
            clear(out_private_key);
            clear(out_public_key);
            KeyGenErrorC::from(err) as i8
        }
    }
}

/// Generate a P-256 key pair into two 32-byte buffers: the private scalar and the x coordinate
/// of the public key, both big-endian.
///
/// # Safety
///
/// Both pointers must be valid for writing 32 bytes, or null (which is reported as an error).
#[no_mangle]
pub unsafe extern "C" fn p256_generate_key_pair_from_c(
    out_private_key: *mut u8,
    out_public_key: *mut u8,
) -> i8 {
    generate_into(default_crypto(), out_private_key, out_public_key)
}

/// Compute the public key (x coordinate) belonging to a private key.
///
/// # Safety
///
/// `private_key` must be valid for reading and `out_public_key` for writing 32 bytes.
#[no_mangle]
pub unsafe extern "C" fn p256_public_key_from_c(
    private_key: *const u8,
    out_public_key: *mut u8,
) -> i8 {
    if private_key.is_null() || out_public_key.is_null() {
        return KeyGenErrorC::NullPointer as i8;
    }

    let private_key =
        PrivateKey::from_bytes(ptr::read(private_key as *const BytesP256ElemLen));
    match KeyPairGenerator::new(default_crypto()).public_key(&private_key) {
        Ok(public_key) => {
            ptr::copy_nonoverlapping(public_key.as_bytes().as_ptr(), out_public_key, P256_ELEM_LEN);
            KeyGenErrorC::Success as i8
        }
        Err(err) => {
            clear(out_public_key);
            KeyGenErrorC::from(err) as i8
        }
    }
}

/// P-256 Diffie-Hellman: write the x coordinate of the shared point into `out_secret`.
///
/// # Safety
///
/// `private_key` and `public_key` must be valid for reading and `out_secret` for writing 32
/// bytes.
#[no_mangle]
pub unsafe extern "C" fn p256_ecdh_from_c(
    private_key: *const u8,
    public_key: *const u8,
    out_secret: *mut u8,
) -> i8 {
    if private_key.is_null() || public_key.is_null() || out_secret.is_null() {
        return KeyGenErrorC::NullPointer as i8;
    }

    let private_key =
        PrivateKey::from_bytes(ptr::read(private_key as *const BytesP256ElemLen));
    let public_key = PublicKey::from_bytes(ptr::read(public_key as *const BytesP256ElemLen));
    match KeyPairGenerator::new(default_crypto()).ecdh(&private_key, &public_key) {
        Ok(secret) => {
            ptr::copy_nonoverlapping(secret.as_ptr(), out_secret, P256_ELEM_LEN);
            KeyGenErrorC::Success as i8
        }
        Err(err) => {
            clear(out_secret);
            KeyGenErrorC::from(err) as i8
        }
    }
}
