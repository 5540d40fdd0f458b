/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use curve25519_dalek::{
    edwards::{
        CompressedEdwardsY,
        EdwardsPoint
    },
    scalar::Scalar,
    traits::IsIdentity
};
use rand::{rngs::OsRng, RngCore};
use zeroize::Zeroize;

use super::{Curve, CurveOps};
use crate::types::PublicKey;

///ed25519, used by Solana and NEAR.
///
///Private keys are raw scalars (not RFC 8032 seeds).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ed25519;

impl CurveOps for Ed25519 {
    const CURVE: Curve = Curve::Ed25519;
    type Scalar = Scalar;
    type Point = EdwardsPoint;

    fn random_scalar() -> Scalar {
        let mut scalar_bytes = [0u8; 64];
        OsRng.fill_bytes(&mut scalar_bytes);
        let scalar = Scalar::from_bytes_mod_order_wide(&scalar_bytes);
        scalar_bytes.zeroize();
        return scalar
    }

    fn scalar_from_hash(hash: &[u8; 32]) -> Scalar {
        //little-endian, reduced mod l
        return Scalar::from_bytes_mod_order(*hash)
    }

    fn scalar_from_bytes(bytes: &[u8; 32]) -> Option<Scalar> {
        return Scalar::from_canonical_bytes(*bytes).into()
    }

    fn scalar_to_bytes(scalar: &Scalar) -> [u8; 32] {
        return scalar.to_bytes()
    }

    fn scalar_is_zero(scalar: &Scalar) -> bool {
        return *scalar == Scalar::ZERO
    }

    fn scalar_add(a: &Scalar, b: &Scalar) -> Scalar {
        return a + b
    }

    fn mul_base(scalar: &Scalar) -> EdwardsPoint {
        return EdwardsPoint::mul_base(scalar)
    }

    fn mul(point: &EdwardsPoint, scalar: &Scalar) -> EdwardsPoint {
        return point * scalar
    }

    fn add(a: &EdwardsPoint, b: &EdwardsPoint) -> EdwardsPoint {
        return a + b
    }

    fn decode_point(key: &PublicKey) -> Option<EdwardsPoint> {
        let PublicKey::Ed25519(bytes) = key else {
            return None
        };
        let point = CompressedEdwardsY(*bytes).decompress()?;
        //non-canonical y, and anything outside the prime-order subgroup
        if point.compress().to_bytes() != *bytes
            || point.is_small_order()
            || !point.is_torsion_free() {
            return None
        }
        return Some(point)
    }

    fn encode_point(point: &EdwardsPoint) -> Option<PublicKey> {
        if point.is_identity() {
            return None
        }
        return Some(PublicKey::Ed25519(point.compress().to_bytes()))
    }

    fn ecdh_bytes(point: &EdwardsPoint) -> Option<[u8; 32]> {
        if point.is_identity() {
            return None
        }
        return Some(point.compress().to_bytes())
    }
}
