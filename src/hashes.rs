/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Hash, MAC and key-derivation helpers.

use hkdf::Hkdf;
use hmac::{
    Hmac,
    Mac
};
use sha2::{
    Digest,
    Sha256
};

use crate::errors::*;
use crate::tobytes::to_hex;

type HmacSha256 = Hmac<Sha256>;

///SHA-256 of `msg`.
pub fn sha256(msg: &[u8]) -> [u8; 32] {
    return Sha256::digest(msg).into()
}

///SHA-256 of `msg`, as `0x` hex.
pub fn hash_sha256(msg: &[u8]) -> String {
    return to_hex(&sha256(msg))
}

///SHA-256 over several byte strings, as if they were concatenated.
pub fn sha256_concat(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    return hasher.finalize().into()
}

///HMAC-SHA256 of `domain || msg` under `key`.
pub fn domain_hmac(key: &[u8], domain: &[u8], msg: &[u8]) -> Result<[u8; 32]> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(key)
        .map_err(|_| Error::validation("hmac key"))?;
    mac.update(domain);
    mac.update(msg);
    return Ok(mac.finalize().into_bytes().into())
}

///HKDF-SHA256 with `domain` as salt, expanded to 32 bytes.
pub fn domain_hkdf(ikm: &[u8], domain: &[u8], info: &[u8]) -> Result<[u8; 32]> {
    let hk = Hkdf::<Sha256>::new(Some(domain), ikm);
    let mut okm = [0u8; 32];
    hk.expand(info, &mut okm)
        .map_err(|_| Error::validation("hkdf output length"))?;
    return Ok(okm)
}

pub mod domains {
    //! Pre-defined hash domains

    pub const PEDERSEN_GENERATOR_H: &str =              "SIP-PEDERSEN-GENERATOR-H-v1";

    pub const VIEWING_KEY_DERIVE: &[u8] =               "SIP-VIEWING-KEY-DERIVE-v1".as_bytes();
    pub const VIEWING_KEY_ENCRYPT: &[u8] =              "SIP-VIEWING-KEY-ENCRYPT-v1".as_bytes();

    pub const NULLIFIER_NOTE: &[u8] =                   "SIP-NULLIFIER-NOTE-v1".as_bytes();
    pub const NULLIFIER_EPOCH: &[u8] =                  "SIP-NULLIFIER-EPOCH-v1".as_bytes();
}
