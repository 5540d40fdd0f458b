/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//!Pedersen commitments over secp256k1.
//!
//!`C = v*G + b*H`, where `G` is the secp256k1 basepoint and `H` is a nothing-up-my-sleeve point
//!nobody knows the discrete log of (relative to `G`).
//!Commitments are chain-agnostic: the same encoding is used whichever chain they end up on.

use std::{
    fmt,
    iter::Sum,
    ops::{Add, Sub}
};

use k256::{
    elliptic_curve::{
        group::Group,
        sec1::{
            FromEncodedPoint,
            ToEncodedPoint
        }
    },
    AffinePoint,
    EncodedPoint,
    ProjectivePoint,
    Scalar
};
use serde::{
    de::Error as _,
    ser::Error as _,
    Deserializer,
    Serializer
};
use subtle::ConstantTimeEq;
use tracing::debug;
use zeroize::Zeroize;

use crate::curve::{
    CurveOps,
    Secp256k1
};
use crate::errors::*;
use crate::hashes::*;
use crate::tobytes::*;

///Give up on the try-and-increment search after this many counters.
const MAX_H_ATTEMPTS: u32 = 256;

lazy_static! {
    static ref PEDERSEN_H_POINT: Option<ProjectivePoint> = pedersen_h_point();
}

///get `H`: the first `SHA256("SIP-PEDERSEN-GENERATOR-H-v1:<counter>")`
///that is the x-coordinate of a curve point, taken with even y.
fn pedersen_h_point() -> Option<ProjectivePoint> {
    for counter in 0..MAX_H_ATTEMPTS {
        let x = sha256(format!("{}:{}", domains::PEDERSEN_GENERATOR_H, counter).as_bytes());

        let mut compressed = [0u8; 33];
        compressed[0] = 0x02;
        compressed[1..].copy_from_slice(&x);

        let Ok(encoded) = EncodedPoint::from_bytes(compressed) else {
            continue
        };
        let affine: Option<AffinePoint> = AffinePoint::from_encoded_point(&encoded).into();
        if let Some(affine) = affine {
            let point = ProjectivePoint::from(affine);
            if !bool::from(point.is_identity()) && point != ProjectivePoint::GENERATOR {
                debug!(counter, "derived pedersen generator H");
                return Some(point)
            }
        }
    }
    return None
}

///The value generator `G` (the secp256k1 basepoint).
pub fn generator_g() -> ProjectivePoint {
    return ProjectivePoint::GENERATOR
}

///The blinding generator `H`. Derived on first use, then cached for the life of the process.
pub fn generator_h() -> Result<ProjectivePoint> {
    return (*PEDERSEN_H_POINT)
        .ok_or_else(|| Error::invariant("no valid pedersen generator H found"))
}

///Compressed encodings of `(G, H)`.
pub fn generators() -> Result<([u8; 33], [u8; 33])> {
    return Ok((
        Commitment(generator_g()).to_bytes()?,
        Commitment(generator_h()?).to_bytes()?
    ))
}

///A blinding factor: a secp256k1 scalar, wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize)]
pub struct Blinding(
    Scalar

); impl Blinding {
    ///Generate a random non-zero blinding factor.
    pub fn generate() -> Result<Self> {
        let scalar = Secp256k1::random_scalar();
        if Secp256k1::scalar_is_zero(&scalar) {
            return Err(Error::invariant("zero blinding drawn from rng"))
        }
        return Ok(Self(scalar))
    }

    ///Decode a canonical big-endian scalar.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self> {
        return Secp256k1::scalar_from_bytes(bytes)
            .map(Self)
            .ok_or_else(|| Error::validation("blinding is not a canonical secp256k1 scalar"))
    }

    pub fn from_hex(string: &str) -> Result<Self> {
        return Self::from_bytes(&from_hex_array::<32>(string)?)
    }

    ///Big-endian bytes.
    pub fn to_bytes(&self) -> [u8; 32] {
        return Secp256k1::scalar_to_bytes(&self.0)
    }

    pub fn to_hex(&self) -> String {
        return to_hex(&self.to_bytes())
    }

    pub fn is_zero(&self) -> bool {
        return Secp256k1::scalar_is_zero(&self.0)
    }

} impl Add for &Blinding {
    type Output = Blinding;

    fn add(self, rhs: Self) -> Blinding {
        return Blinding(self.0 + rhs.0)
    }

} impl Sub for &Blinding {
    type Output = Blinding;

    fn sub(self, rhs: Self) -> Blinding {
        return Blinding(self.0 - rhs.0)
    }

} impl fmt::Debug for Blinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Blinding(<redacted>)")
    }

} impl Drop for Blinding {
    fn drop(&mut self) {
        self.zeroize()
    }

} impl Serialize for Blinding {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        return serializer.serialize_str(&self.to_hex())
    }

} impl<'de> Deserialize<'de> for Blinding {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let string = String::deserialize(deserializer)?;
        return Self::from_hex(&string).map_err(D::Error::custom)
    }
}

///A pedersen commitment: a secp256k1 point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commitment(
    pub ProjectivePoint

); impl Commitment {
    ///Return the elliptic curve point which represents this commitment.
    pub fn to_point(&self) -> ProjectivePoint {
        return self.0
    }

    ///Compressed SEC1 encoding (33 bytes).
    ///
    ///The identity has no such encoding and is rejected.
    pub fn to_bytes(&self) -> Result<[u8; 33]> {
        if bool::from(self.0.is_identity()) {
            return Err(Error::validation("commitment is the identity point"))
        }
        let encoded = self.0.to_affine().to_encoded_point(true);
        return encoded.as_bytes().try_into()
            .map_err(|_| Error::validation("unexpected commitment encoding length"))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 33 || (bytes[0] != 0x02 && bytes[0] != 0x03) {
            return Err(Error::validation("commitment must be a 33-byte compressed secp256k1 point"))
        }
        let encoded = EncodedPoint::from_bytes(bytes)
            .map_err(|_| Error::validation("malformed commitment encoding"))?;
        let affine: Option<AffinePoint> = AffinePoint::from_encoded_point(&encoded).into();
        return affine
            .map(|affine| Self(ProjectivePoint::from(affine)))
            .ok_or_else(|| Error::validation("commitment is not a secp256k1 point"))
    }

    pub fn to_hex(&self) -> Result<String> {
        return Ok(to_hex(&self.to_bytes()?))
    }

    pub fn from_hex(string: &str) -> Result<Self> {
        return Self::from_bytes(&from_hex(string)?)
    }

    ///Given input commitments, output commitments, and "extra" output (ie fees),
    ///check if the equation is balanced.
    ///
    ///`in == (out + extra*G)`
    pub fn is_balanced(in_commitments: &[Commitment], out_commitments: &[Commitment], extra: u64) -> bool {
        let extra = Commitment(generator_g() * Scalar::from(extra));
        let inputs: Commitment = in_commitments.iter().copied().sum();
        let outputs: Commitment = out_commitments.iter().copied().chain([extra]).sum();
        return bool::from(inputs.0.ct_eq(&outputs.0))
    }

} impl Add for Commitment {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        return Self(self.0 + rhs.0)
    }

} impl Sub for Commitment {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        return Self(self.0 - rhs.0)
    }

} impl Sum for Commitment {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        return Commitment(iter.fold(ProjectivePoint::IDENTITY, |acc, com| acc + com.0))
    }

} impl Serialize for Commitment {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        return serializer.serialize_str(&self.to_hex().map_err(S::Error::custom)?)
    }

} impl<'de> Deserialize<'de> for Commitment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let string = String::deserialize(deserializer)?;
        return Self::from_hex(&string).map_err(D::Error::custom)
    }
}

///A commitment together with the blinding factor that opens it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PedersenCommitment {
    pub commitment: Commitment,
    pub blinding: Blinding
}

///Generate a random blinding factor.
pub fn generate_blinding() -> Result<Blinding> {
    return Blinding::generate()
}

///Commit to `amount` with a fresh random blinding factor.
pub fn commit(amount: u64) -> Result<PedersenCommitment> {
    let blinding = Blinding::generate()?;
    let commitment = commit_with_blinding(amount, &blinding)?;
    return Ok(PedersenCommitment{commitment, blinding})
}

///Commit to `amount` with a caller-chosen blinding factor.
///
///**Never reuse a blinding factor for two different amounts**:
///the difference of the two commitments reveals the difference of the amounts.
pub fn commit_with_blinding(amount: u64, blinding: &Blinding) -> Result<Commitment> {
    if blinding.is_zero() {
        return Err(Error::validation("blinding factor must be non-zero"))
    }
    return Ok(Commitment(
        (generator_g() * Scalar::from(amount)) + (generator_h()? * blinding.0)
    ))
}

///Commit to zero: `b*H`.
pub fn commit_zero(blinding: &Blinding) -> Result<Commitment> {
    return commit_with_blinding(0, blinding)
}

///Check that `commitment` opens to `(amount, blinding)`.
///
///The comparison is constant time in the commitment and the recomputed point.
pub fn verify_opening(commitment: &Commitment, amount: u64, blinding: &Blinding) -> Result<bool> {
    let expected = (generator_g() * Scalar::from(amount)) + (generator_h()? * blinding.0);
    return Ok(bool::from(commitment.0.ct_eq(&expected)))
}

///`a + b`, opening to the sum of amounts under the sum of blindings.
pub fn add_commitments(a: &Commitment, b: &Commitment) -> Commitment {
    return *a + *b
}

///`a - b`, opening to the difference of amounts under the difference of blindings.
pub fn subtract_commitments(a: &Commitment, b: &Commitment) -> Commitment {
    return *a - *b
}

pub fn add_blindings(a: &Blinding, b: &Blinding) -> Blinding {
    return a + b
}

pub fn subtract_blindings(a: &Blinding, b: &Blinding) -> Blinding {
    return a - b
}
