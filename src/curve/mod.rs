/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Elliptic curve functions and constants.
//!
//! Both supported curves sit behind the `CurveOps` trait.
//! A `Curve` tag is resolved once (usually from a `Chain`),
//! and everything downstream is generic over `C: CurveOps`.

mod secp256k1;
mod ed25519;

pub use secp256k1::Secp256k1;
pub use ed25519::Ed25519;

use zeroize::{
    Zeroize,
    Zeroizing
};
use crate::errors::*;
use crate::tobytes::*;
use crate::types::PublicKey;

///Length of every private scalar, on both curves.
pub const SCALAR_LENGTH: usize = 32;

///The two curves a chain can be built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Curve {
    Secp256k1,
    Ed25519

} impl Curve {
    ///Length of an encoded public key: 33 (compressed SEC1) or 32.
    pub const fn public_key_length(&self) -> usize {
        return match self {
            Self::Secp256k1 => 33,
            Self::Ed25519 => 32
        }
    }

} impl std::fmt::Display for Curve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", match self {
            Self::Secp256k1 => "secp256k1",
            Self::Ed25519 => "ed25519"
        })
    }
}

///Scalar and point operations for one curve.
///
///Scalar byte order is the curve's native one:
///big-endian for secp256k1, little-endian for ed25519.
pub trait CurveOps {
    const CURVE: Curve;
    type Scalar: Copy + Zeroize + Send + Sync;
    type Point: Copy + Send + Sync;

    ///Uniformly random scalar from the OS CSPRNG.
    fn random_scalar() -> Self::Scalar;
    ///Reduce a 32-byte hash modulo the group order.
    fn scalar_from_hash(hash: &[u8; 32]) -> Self::Scalar;
    ///Decode a canonical (already reduced) scalar.
    fn scalar_from_bytes(bytes: &[u8; 32]) -> Option<Self::Scalar>;
    fn scalar_to_bytes(scalar: &Self::Scalar) -> [u8; 32];
    fn scalar_is_zero(scalar: &Self::Scalar) -> bool;
    fn scalar_add(a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar;

    fn mul_base(scalar: &Self::Scalar) -> Self::Point;
    fn mul(point: &Self::Point, scalar: &Self::Scalar) -> Self::Point;
    fn add(a: &Self::Point, b: &Self::Point) -> Self::Point;

    ///Decode a public key of this curve into a usable group element.
    ///Returns `None` for keys of the other curve, points off the curve,
    ///and (ed25519) small-order or mixed-order points.
    fn decode_point(key: &PublicKey) -> Option<Self::Point>;
    ///Encode a point. The identity has no public key encoding.
    fn encode_point(point: &Self::Point) -> Option<PublicKey>;
    ///Bytes of an ECDH result that get hashed into the shared secret.
    fn ecdh_bytes(point: &Self::Point) -> Option<[u8; 32]>;
}

///Wrap a scalar for wiping, refusing zero.
pub(crate) fn nonzero<C: CurveOps>(scalar: C::Scalar, what: &'static str) -> Result<Zeroizing<C::Scalar>> {
    let scalar = Zeroizing::new(scalar);
    if C::scalar_is_zero(&scalar) {
        return Err(Error::invariant(what))
    }
    return Ok(scalar)
}

///Fresh random non-zero scalar.
pub(crate) fn random_nonzero<C: CurveOps>() -> Result<Zeroizing<C::Scalar>> {
    return nonzero::<C>(C::random_scalar(), "zero scalar drawn from rng")
}

///Decode a public key, mapping failure to a validation error.
pub(crate) fn point<C: CurveOps>(key: &PublicKey) -> Result<C::Point> {
    if key.curve() != C::CURVE {
        return Err(Error::validation(format!("expected a {} key, got {}", C::CURVE, key.curve())))
    }
    return C::decode_point(key)
        .ok_or_else(|| Error::validation(format!("{} key is not a valid curve point", C::CURVE)))
}

///Encode a derived point; an identity here means a derivation went wrong.
pub(crate) fn public_key<C: CurveOps>(point: &C::Point) -> Result<PublicKey> {
    return C::encode_point(point)
        .ok_or_else(|| Error::invariant("derived point is the identity"))
}

///Public key of a private scalar.
pub(crate) fn to_public<C: CurveOps>(scalar: &C::Scalar) -> Result<PublicKey> {
    return public_key::<C>(&C::mul_base(scalar))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar_roundtrip<C: CurveOps>() {
        let scalar = C::random_scalar();
        let bytes = C::scalar_to_bytes(&scalar);
        let decoded = C::scalar_from_bytes(&bytes).unwrap();
        assert!(C::scalar_to_bytes(&decoded) == bytes);
        assert!(C::scalar_from_bytes(&[0xff; 32]).is_none());
    }

    fn point_roundtrip<C: CurveOps>() {
        let key = to_public::<C>(&C::random_scalar()).unwrap();
        assert!(key.curve() == C::CURVE);
        assert!(key.as_bytes().len() == C::CURVE.public_key_length());
        let point = point::<C>(&key).unwrap();
        assert!(public_key::<C>(&point).unwrap() == key);
    }

    fn ecdh_agreement<C: CurveOps>() {
        let a = C::random_scalar();
        let b = C::random_scalar();
        let ab = C::mul(&C::mul_base(&a), &b);
        let ba = C::mul(&C::mul_base(&b), &a);
        assert!(C::ecdh_bytes(&ab).unwrap() == C::ecdh_bytes(&ba).unwrap());
    }

    fn additive_homomorphism<C: CurveOps>() {
        let a = C::random_scalar();
        let b = C::random_scalar();
        let lhs = C::mul_base(&C::scalar_add(&a, &b));
        let rhs = C::add(&C::mul_base(&a), &C::mul_base(&b));
        assert!(C::encode_point(&lhs) == C::encode_point(&rhs));
    }

    #[test]
    fn secp256k1_test() {
        scalar_roundtrip::<Secp256k1>();
        point_roundtrip::<Secp256k1>();
        ecdh_agreement::<Secp256k1>();
        additive_homomorphism::<Secp256k1>();
    }

    #[test]
    fn ed25519_test() {
        scalar_roundtrip::<Ed25519>();
        point_roundtrip::<Ed25519>();
        ecdh_agreement::<Ed25519>();
        additive_homomorphism::<Ed25519>();
    }

    #[test]
    fn wrong_curve_test() {
        let key = to_public::<Ed25519>(&Ed25519::random_scalar()).unwrap();
        assert!(matches!(point::<Secp256k1>(&key), Err(Error::Validation(_))));
    }

    #[test]
    fn zero_scalar_test() {
        let zero = Secp256k1::scalar_from_hash(&[0u8; 32]);
        assert!(nonzero::<Secp256k1>(zero, "zero").is_err());
        let zero = Ed25519::scalar_from_hash(&[0u8; 32]);
        assert!(matches!(nonzero::<Ed25519>(zero, "zero"), Err(Error::InvariantViolation(_))));
    }
}
