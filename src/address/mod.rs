/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Stealth addresses.
//!
//! A recipient publishes a `MetaAddress` (spending key `P_spend`, viewing key `P_view`).
//! For every payment the sender draws an ephemeral key `r` and derives a one-time address
//! `A = P_view + H(r * P_spend) * G`, publishing `R = r * G` and a 1-byte view tag next to it.
//! The recipient recomputes the same shared secret from `p_spend * R`,
//! and spends `A` with `q_view + H(p_spend * R)`.
//!
//! The same construction runs on secp256k1 and on ed25519;
//! which one is decided by the meta-address's `Chain`.

mod ecdh;
mod encoding;
mod scan;
pub mod ethereum;

use crate::internal_common::*;

pub use ecdh::SharedSecret;
pub use encoding::{
    encode_meta_address,
    decode_meta_address
};
pub use scan::scan_stealth_addresses;

///A recipient's published pair of public keys.
///
///Both keys are always on the curve of `chain`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MetaAddressFields", rename_all = "camelCase")]
pub struct MetaAddress {
    chain: Chain,
    spending_key: PublicKey,
    viewing_key: PublicKey,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>

} impl MetaAddress {
    ///Create a meta-address, checking that both keys belong to the chain's curve.
    pub fn new(chain: Chain, spending_key: PublicKey, viewing_key: PublicKey) -> Result<Self> {
        for key in [&spending_key, &viewing_key] {
            if key.curve() != chain.curve() {
                return Err(Error::validation(format!(
                    "{} uses {} keys, got a {} key", chain, chain.curve(), key.curve())))
            }
        }
        return Ok(Self{chain, spending_key, viewing_key, label: None})
    }

    ///Attach a human-readable label. Labels are not part of the encoded form.
    pub fn with_label<S: Into<String>>(mut self, label: S) -> Self {
        self.label = Some(label.into());
        return self
    }

    pub fn chain(&self) -> Chain {
        return self.chain
    }

    pub fn curve(&self) -> Curve {
        return self.chain.curve()
    }

    pub fn spending_key(&self) -> &PublicKey {
        return &self.spending_key
    }

    pub fn viewing_key(&self) -> &PublicKey {
        return &self.viewing_key
    }

    pub fn label(&self) -> Option<&str> {
        return self.label.as_deref()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MetaAddressFields {
    chain: Chain,
    spending_key: PublicKey,
    viewing_key: PublicKey,
    #[serde(default)]
    label: Option<String>

} impl TryFrom<MetaAddressFields> for MetaAddress {
    type Error = Error;

    fn try_from(fields: MetaAddressFields) -> Result<Self> {
        let meta_address = Self::new(fields.chain, fields.spending_key, fields.viewing_key)?;
        return Ok(match fields.label {
            Some(label) => meta_address.with_label(label),
            None => meta_address
        })
    }
}

///A meta-address together with its two private keys.
///
///Only exists at generation time; store the private keys separately and publish `meta_address`.
#[derive(Debug, Clone)]
pub struct MetaAddressKeypair {
    pub meta_address: MetaAddress,
    pub spending_private_key: PrivateKey,
    pub viewing_private_key: PrivateKey
}

///A one-time address, as published next to a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StealthAddressFields", rename_all = "camelCase")]
pub struct StealthAddress {
    address: PublicKey,
    ephemeral_public_key: PublicKey,
    view_tag: ViewTag

} impl StealthAddress {
    ///Rebuild a published stealth address, checking both keys are on the same curve.
    pub fn new(address: PublicKey, ephemeral_public_key: PublicKey, view_tag: ViewTag) -> Result<Self> {
        if address.curve() != ephemeral_public_key.curve() {
            return Err(Error::validation(format!(
                "stealth address is on {} but its ephemeral key is on {}", address.curve(), ephemeral_public_key.curve())))
        }
        return Ok(Self{address, ephemeral_public_key, view_tag})
    }

    pub fn curve(&self) -> Curve {
        return self.address.curve()
    }

    ///The one-time public key `A`.
    pub fn address(&self) -> &PublicKey {
        return &self.address
    }

    ///The sender's ephemeral public key `R`.
    pub fn ephemeral_public_key(&self) -> &PublicKey {
        return &self.ephemeral_public_key
    }

    pub fn view_tag(&self) -> ViewTag {
        return self.view_tag
    }

} impl ToBytes for StealthAddress {}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StealthAddressFields {
    address: PublicKey,
    ephemeral_public_key: PublicKey,
    view_tag: ViewTag

} impl TryFrom<StealthAddressFields> for StealthAddress {
    type Error = Error;

    fn try_from(fields: StealthAddressFields) -> Result<Self> {
        return Self::new(fields.address, fields.ephemeral_public_key, fields.view_tag)
    }
}

///The private key that spends one stealth address.
///
///The key is wiped when this is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StealthAddressRecovery {
    pub stealth_address: PublicKey,
    pub ephemeral_public_key: PublicKey,
    pub private_key: PrivateKey
}

///Generate a new meta-address and its private keys for `chain`.
pub fn generate_meta_address(chain: Chain) -> Result<MetaAddressKeypair> {
    return match chain.curve() {
        Curve::Secp256k1 => ecdh::generate_meta_address::<Secp256k1>(chain),
        Curve::Ed25519 => ecdh::generate_meta_address::<Ed25519>(chain)
    }
}

///Derive a fresh one-time address paying `meta_address`.
///
///Every call draws new ephemeral randomness, so two calls never return the same address.
///The returned `SharedSecret` is the sender's copy of `h`; drop it once it's no longer needed.
pub fn generate_stealth_address(meta_address: &MetaAddress) -> Result<(StealthAddress, SharedSecret)> {
    return match meta_address.curve() {
        Curve::Secp256k1 => ecdh::generate_stealth_address::<Secp256k1>(meta_address),
        Curve::Ed25519 => ecdh::generate_stealth_address::<Ed25519>(meta_address)
    }
}

///Recover the private key of `stealth_address`.
///
///Fails with a validation error if the recovered key does not match the address,
///i.e. the address was not sent to these keys.
pub fn derive_stealth_private_key(
    stealth_address: &StealthAddress,
    spending_private_key: &PrivateKey,
    viewing_private_key: &PrivateKey
) -> Result<StealthAddressRecovery> {
    return match stealth_address.curve() {
        Curve::Secp256k1 => ecdh::derive_stealth_private_key::<Secp256k1>(stealth_address, spending_private_key, viewing_private_key),
        Curve::Ed25519 => ecdh::derive_stealth_private_key::<Ed25519>(stealth_address, spending_private_key, viewing_private_key)
    }
}

///Check whether `stealth_address` was sent to these keys.
///
///The view tag is compared first; the full address is compared only on a tag match.
pub fn check_stealth_address(
    stealth_address: &StealthAddress,
    spending_private_key: &PrivateKey,
    viewing_private_key: &PrivateKey
) -> Result<bool> {
    return match stealth_address.curve() {
        Curve::Secp256k1 => ecdh::check_stealth_address::<Secp256k1>(stealth_address, spending_private_key, viewing_private_key),
        Curve::Ed25519 => ecdh::check_stealth_address::<Ed25519>(stealth_address, spending_private_key, viewing_private_key)
    }
}
