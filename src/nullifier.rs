/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Oblivious nullifiers.
//!
//! `nf = HMAC(HMAC(sk, note_commitment), epoch_randomness)`, each HMAC domain separated.
//! The same note gives the same nullifier within an epoch, so a sync service can detect
//! double spends, while nullifiers of one note in different epochs can't be linked
//! without the spending key.
//!
//! Epoch randomness is rotated by whoever runs the sync service, not here.

use std::fmt;

use rand::{rngs::OsRng, RngCore};
use zeroize::Zeroizing;

use crate::errors::*;
use crate::hashes::*;
use crate::tobytes::*;
use crate::types::Chain;

///Length of a spending key used for nullifier derivation.
pub const SPENDING_KEY_LENGTH: usize = 32;

///Public randomness identifying one epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EpochRandomness(
    #[serde(with = "serde_hex")]
    [u8; 32]

); impl EpochRandomness {
    ///Draw randomness for a new epoch.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        OsRng.fill_bytes(&mut bytes);
        return Self(bytes)
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        return Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        return &self.0
    }
}

///A 32-byte nullifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Nullifier(
    #[serde(with = "serde_hex")]
    [u8; 32]

); impl Nullifier {
    pub fn as_bytes(&self) -> &[u8; 32] {
        return &self.0
    }

    pub fn to_hex(&self) -> String {
        return to_hex(&self.0)
    }

} impl fmt::Debug for Nullifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Nullifier({})", self.to_hex())
    }

} impl ToBytes for Nullifier {}

///A nullifier tagged with the chain it was published on.
///
///The chain is not part of the hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObliviousNullifier {
    pub nullifier: Nullifier,
    pub chain_id: Chain
}

///Derive the nullifier of `note_commitment` for one epoch.
///
///`spending_key` must be exactly 32 bytes and `note_commitment` non-empty.
pub fn derive_oblivious_nullifier(
    note_commitment: &[u8],
    spending_key: &[u8],
    epoch_randomness: &EpochRandomness
) -> Result<Nullifier> {
    if note_commitment.is_empty() {
        return Err(Error::validation("note commitment is empty"))
    }
    if spending_key.len() != SPENDING_KEY_LENGTH {
        return Err(Error::validation(format!(
            "spending key must be {} bytes, got {}", SPENDING_KEY_LENGTH, spending_key.len())))
    }

    //per-note key, never leaves this function
    let note_key = Zeroizing::new(domain_hmac(spending_key, domains::NULLIFIER_NOTE, note_commitment)?);
    let nullifier = domain_hmac(&*note_key, domains::NULLIFIER_EPOCH, epoch_randomness.as_bytes())?;
    return Ok(Nullifier(nullifier))
}

impl ObliviousNullifier {
    ///Derive a nullifier and tag it with `chain`.
    pub fn derive(
        note_commitment: &[u8],
        spending_key: &[u8],
        epoch_randomness: &EpochRandomness,
        chain: Chain
    ) -> Result<Self> {
        return Ok(Self{
            nullifier: derive_oblivious_nullifier(note_commitment, spending_key, epoch_randomness)?,
            chain_id: chain
        })
    }
}
