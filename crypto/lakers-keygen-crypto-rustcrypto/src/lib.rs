#![cfg_attr(not(test), no_std)]

use lakers_keygen_shared::{BytesP256ElemLen, Crypto as CryptoTrait, KeyGenError};

use p256::elliptic_curve::group::{Curve as _, Group as _};
use p256::elliptic_curve::point::AffineCoordinates;
use p256::elliptic_curve::point::DecompressPoint;
use p256::{AffinePoint, FieldBytes, NonZeroScalar, ProjectivePoint};

/// A type representing the P-256 operations through the RustCrypto [p256] crate.
///
/// Its size depends on the implementation of Rng passed in at creation. All randomness used by
/// the generator is drawn from that Rng, so a deterministic or failing Rng can be passed in for
/// tests.
pub struct Crypto<Rng: rand_core::RngCore + rand_core::CryptoRng> {
    rng: Rng,
}

impl<Rng: rand_core::RngCore + rand_core::CryptoRng> Crypto<Rng> {
    pub const fn new(rng: Rng) -> Self {
        Self { rng }
    }

    pub fn into_rng(self) -> Rng {
        self.rng
    }
}

impl<Rng: rand_core::RngCore + rand_core::CryptoRng> core::fmt::Debug for Crypto<Rng> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> Result<(), core::fmt::Error> {
        f.debug_struct("lakers_keygen_crypto_rustcrypto::Crypto")
            .field("rng", &core::any::type_name::<Rng>())
            .finish()
    }
}

fn nonzero_scalar(bytes: &BytesP256ElemLen) -> Option<NonZeroScalar> {
    // from_repr rejects values >= n, the NonZero wrapper rejects 0; both in constant time
    NonZeroScalar::from_repr(FieldBytes::from(*bytes)).into()
}

fn decompress_x(x: &BytesP256ElemLen) -> Option<AffinePoint> {
    // Y coordinate choice does not matter for an x-only public key
    AffinePoint::decompress(x.into(), 1.into()).into()
}

impl<Rng: rand_core::RngCore + rand_core::CryptoRng> CryptoTrait for Crypto<Rng> {
    fn fill_random(&mut self, dest: &mut [u8]) -> Result<(), KeyGenError> {
        self.rng
            .try_fill_bytes(dest)
            .map_err(|_| KeyGenError::EntropyUnavailable)
    }

    fn p256_scalar_is_valid(&self, candidate: &BytesP256ElemLen) -> bool {
        nonzero_scalar(candidate).is_some()
    }

    fn p256_scalar_base_mult(
        &mut self,
        scalar: &BytesP256ElemLen,
    ) -> Result<BytesP256ElemLen, KeyGenError> {
        let scalar = nonzero_scalar(scalar).ok_or(KeyGenError::InvalidPrivateKey)?;

        let point = ProjectivePoint::GENERATOR * *scalar;
        // unreachable for a non-zero scalar of a prime order group, unless state got corrupted
        if bool::from(point.is_identity()) {
            return Err(KeyGenError::InternalArithmeticError);
        }

        Ok(point.to_affine().x().into())
    }

    fn p256_x_is_on_curve(&self, x: &BytesP256ElemLen) -> bool {
        decompress_x(x).is_some()
    }

    fn p256_ecdh(
        &mut self,
        private_key: &BytesP256ElemLen,
        public_key: &BytesP256ElemLen,
    ) -> Result<BytesP256ElemLen, KeyGenError> {
        let secret = nonzero_scalar(private_key).ok_or(KeyGenError::InvalidPrivateKey)?;
        let public = decompress_x(public_key).ok_or(KeyGenError::InvalidPublicKey)?;

        Ok((*p256::ecdh::diffie_hellman(secret, public).raw_secret_bytes()).into())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use hexlit::hex;
    use rand_core::OsRng;
    use rstest::rstest;

    const I: BytesP256ElemLen =
        hex!("fb13adeb6518cee5f88417660841142e830a81fe334380a953406a1305e8706b");
    const G_I: BytesP256ElemLen =
        hex!("ac75e9ece3e50bfc8ed60399889522405c47bf16df96660a41298cb4307f7eb6");
    const R: BytesP256ElemLen =
        hex!("72cc4761dbd4c78f758931aa589d348d1ef874a7e303ede2f140dcf3e6aa4aac");
    const G_R: BytesP256ElemLen =
        hex!("bbc34960526ea4d32e940cad2a234148ddc21791a12afbcbac93622046dd44f0");
    const X_TV: BytesP256ElemLen =
        hex!("368ec1f69aeb659ba37d5a8d45b21bdc0299dceaa8ef235f3ca42ce3530f9525");
    const G_X_TV: BytesP256ElemLen =
        hex!("8af6f430ebe18d34184017a9a11bf511c8dff8f834730b96c1b7c8dbca2fc3b6");
    const G_Y_TV: BytesP256ElemLen =
        hex!("419701d7f00a26c2dc587a36dd752549f33763c893422c8ea0f955a13a4ff5d5");
    const G_XY_TV: BytesP256ElemLen =
        hex!("2f0cb7e860ba538fbf5c8bded009f6259b4b628fe1eb7dbe9378e5ecf7a824ba");

    // order of the base point, and the field modulus
    const N: BytesP256ElemLen =
        hex!("ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551");
    const N_MINUS_1: BytesP256ElemLen =
        hex!("ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632550");
    const P: BytesP256ElemLen =
        hex!("ffffffff00000001000000000000000000000000ffffffffffffffffffffffff");

    struct FailingRng;

    impl rand_core::RngCore for FailingRng {
        fn next_u32(&mut self) -> u32 {
            panic!("FailingRng only supports try_fill_bytes")
        }
        fn next_u64(&mut self) -> u64 {
            panic!("FailingRng only supports try_fill_bytes")
        }
        fn fill_bytes(&mut self, _dest: &mut [u8]) {
            panic!("FailingRng only supports try_fill_bytes")
        }
        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand_core::Error> {
            Err(core::num::NonZeroU32::new(rand_core::Error::CUSTOM_START)
                .unwrap()
                .into())
        }
    }

    impl rand_core::CryptoRng for FailingRng {}

    #[rstest]
    #[case(I, G_I)]
    #[case(R, G_R)]
    #[case(X_TV, G_X_TV)]
    fn test_scalar_base_mult_vectors(
        #[case] scalar: BytesP256ElemLen,
        #[case] expected_x: BytesP256ElemLen,
    ) {
        let mut crypto = Crypto::new(OsRng);
        assert_eq!(crypto.p256_scalar_base_mult(&scalar), Ok(expected_x));
    }

    #[test]
    fn test_scalar_base_mult_matches_secret_key() {
        let mut crypto = Crypto::new(OsRng);
        for _ in 0..32 {
            let secret = p256::SecretKey::random(&mut OsRng);
            let scalar: BytesP256ElemLen = secret.to_bytes().into();
            let expected: BytesP256ElemLen = secret.public_key().as_affine().x().into();
            assert_eq!(crypto.p256_scalar_base_mult(&scalar), Ok(expected));
        }
    }

    #[rstest]
    #[case([0x00; 32], false)]
    #[case(N, false)]
    #[case([0xff; 32], false)]
    #[case(N_MINUS_1, true)]
    #[case(hex!("0000000000000000000000000000000000000000000000000000000000000001"), true)]
    #[case(I, true)]
    fn test_scalar_is_valid(#[case] candidate: BytesP256ElemLen, #[case] valid: bool) {
        let crypto = Crypto::new(OsRng);
        assert_eq!(crypto.p256_scalar_is_valid(&candidate), valid);
    }

    #[test]
    fn test_scalar_base_mult_rejects_invalid_scalar() {
        let mut crypto = Crypto::new(OsRng);
        assert_eq!(
            crypto.p256_scalar_base_mult(&[0x00; 32]),
            Err(KeyGenError::InvalidPrivateKey)
        );
        assert_eq!(
            crypto.p256_scalar_base_mult(&N),
            Err(KeyGenError::InvalidPrivateKey)
        );
    }

    #[rstest]
    #[case(G_I, true)]
    #[case(G_R, true)]
    #[case(P, false)]
    #[case([0xff; 32], false)]
    fn test_x_is_on_curve(#[case] x: BytesP256ElemLen, #[case] on_curve: bool) {
        let crypto = Crypto::new(OsRng);
        assert_eq!(crypto.p256_x_is_on_curve(&x), on_curve);
    }

    #[test]
    fn test_p256_ecdh() {
        let mut crypto = Crypto::new(OsRng);
        assert_eq!(crypto.p256_ecdh(&X_TV, &G_Y_TV), Ok(G_XY_TV));
        assert_eq!(crypto.p256_ecdh(&I, &G_R), crypto.p256_ecdh(&R, &G_I));
    }

    #[test]
    fn test_p256_ecdh_invalid_input() {
        let mut crypto = Crypto::new(OsRng);
        assert_eq!(
            crypto.p256_ecdh(&[0x00; 32], &G_R),
            Err(KeyGenError::InvalidPrivateKey)
        );
        assert_eq!(
            crypto.p256_ecdh(&I, &P),
            Err(KeyGenError::InvalidPublicKey)
        );
    }

    #[test]
    fn test_fill_random() {
        let mut crypto = Crypto::new(OsRng);
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        crypto.fill_random(&mut a).unwrap();
        crypto.fill_random(&mut b).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_fill_random_failing_source() {
        let mut crypto = Crypto::new(FailingRng);
        let mut buf = [0u8; 32];
        assert_eq!(
            crypto.fill_random(&mut buf),
            Err(KeyGenError::EntropyUnavailable)
        );
    }

    #[test]
    fn test_debug_names_rng() {
        let crypto = Crypto::new(OsRng);
        assert!(format!("{:?}", crypto).contains("OsRng"));
    }
}
