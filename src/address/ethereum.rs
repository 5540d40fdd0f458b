/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Ethereum account addresses for secp256k1 stealth keys.

use k256::{
    elliptic_curve::sec1::ToEncodedPoint,
    ProjectivePoint
};
use sha3::{
    Digest,
    Keccak256
};

use crate::internal_common::*;
use crate::curve::point;

///The EIP-55 checksummed Ethereum address of a secp256k1 public key:
///the last 20 bytes of `keccak256(x || y)`.
///
///ed25519 keys have no Ethereum address.
pub fn public_key_to_eth_address(public_key: &PublicKey) -> Result<String> {
    let decoded: ProjectivePoint = point::<Secp256k1>(public_key)?;
    let uncompressed = decoded.to_affine().to_encoded_point(false);

    //skip the 0x04 prefix
    let hash = Keccak256::digest(&uncompressed.as_bytes()[1..]);
    return Ok(to_checksum_address(&hash[12..]))
}

///EIP-55 mixed-case checksum encoding of a 20-byte address.
fn to_checksum_address(address: &[u8]) -> String {
    let lower = hex::encode(address);
    let checksum = Keccak256::digest(lower.as_bytes());

    let mut checksummed = String::with_capacity(42);
    checksummed.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let nibble = (checksum[i / 2] >> (4 * (1 - (i % 2)))) & 0x0f;
        if nibble >= 8 {
            checksummed.push(c.to_ascii_uppercase());
        } else {
            checksummed.push(c);
        }
    }
    return checksummed
}
