/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use k256::{
    elliptic_curve::{
        group::Group,
        ops::Reduce,
        sec1::{
            FromEncodedPoint,
            ToEncodedPoint
        },
        Field,
        PrimeField
    },
    AffinePoint,
    EncodedPoint,
    FieldBytes,
    ProjectivePoint,
    Scalar,
    U256
};
use rand::rngs::OsRng;

use super::{Curve, CurveOps};
use crate::types::PublicKey;

///secp256k1, used by EVM chains, Bitcoin and Zcash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Secp256k1;

impl CurveOps for Secp256k1 {
    const CURVE: Curve = Curve::Secp256k1;
    type Scalar = Scalar;
    type Point = ProjectivePoint;

    fn random_scalar() -> Scalar {
        return Scalar::random(&mut OsRng)
    }

    fn scalar_from_hash(hash: &[u8; 32]) -> Scalar {
        //big-endian, reduced mod n
        return <Scalar as Reduce<U256>>::reduce_bytes(&FieldBytes::from(*hash))
    }

    fn scalar_from_bytes(bytes: &[u8; 32]) -> Option<Scalar> {
        return Scalar::from_repr(FieldBytes::from(*bytes)).into()
    }

    fn scalar_to_bytes(scalar: &Scalar) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&scalar.to_bytes());
        return bytes
    }

    fn scalar_is_zero(scalar: &Scalar) -> bool {
        return bool::from(scalar.is_zero())
    }

    fn scalar_add(a: &Scalar, b: &Scalar) -> Scalar {
        return a + b
    }

    fn mul_base(scalar: &Scalar) -> ProjectivePoint {
        return ProjectivePoint::GENERATOR * scalar
    }

    fn mul(point: &ProjectivePoint, scalar: &Scalar) -> ProjectivePoint {
        return point * scalar
    }

    fn add(a: &ProjectivePoint, b: &ProjectivePoint) -> ProjectivePoint {
        return a + b
    }

    fn decode_point(key: &PublicKey) -> Option<ProjectivePoint> {
        let PublicKey::Secp256k1(bytes) = key else {
            return None
        };
        let encoded = EncodedPoint::from_bytes(bytes).ok()?;
        let affine: Option<AffinePoint> = AffinePoint::from_encoded_point(&encoded).into();
        return affine.map(ProjectivePoint::from)
    }

    fn encode_point(point: &ProjectivePoint) -> Option<PublicKey> {
        if bool::from(point.is_identity()) {
            return None
        }
        let encoded = point.to_affine().to_encoded_point(true);
        return encoded.as_bytes().try_into().ok().map(PublicKey::Secp256k1)
    }

    fn ecdh_bytes(point: &ProjectivePoint) -> Option<[u8; 32]> {
        if bool::from(point.is_identity()) {
            return None
        }
        //x-coordinate only, as in SEC1 ECDH
        let encoded = point.to_affine().to_encoded_point(true);
        return encoded.x()?.as_slice().try_into().ok()
    }
}
