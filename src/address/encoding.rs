/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! `sip:<chain>:0x<spending key>:0x<viewing key>`

use std::{
    fmt,
    str::FromStr
};

use crate::internal_common::*;
use super::MetaAddress;

const SCHEME: &str = "sip";

///Encode a meta-address as `sip:<chain>:0x<spending key>:0x<viewing key>`.
///
///The label, if any, is not encoded.
pub fn encode_meta_address(meta_address: &MetaAddress) -> String {
    return format!("{}:{}:{}:{}",
        SCHEME,
        meta_address.chain(),
        meta_address.spending_key().to_hex(),
        meta_address.viewing_key().to_hex()
    )
}

///Decode a `sip:` meta-address.
///
///The chain must be known, and both keys must have exactly the length of that chain's curve
///(33 bytes for secp256k1, 32 for ed25519).
///Only the canonical lowercase form is accepted, so every meta-address has exactly one encoding.
///Only the encoding is checked here: curve membership is checked when the keys are used.
pub fn decode_meta_address(encoded: &str) -> Result<MetaAddress> {
    let parts: Vec<&str> = encoded.split(':').collect();
    if parts.len() != 4 || parts[0] != SCHEME {
        return Err(Error::validation("meta-address must look like sip:<chain>:0x<key>:0x<key>"))
    }

    let chain: Chain = parts[1].parse()?;
    if parts[1] != chain.as_str() {
        return Err(Error::validation(format!("chain must be written as {}", chain)))
    }
    let spending_key = decode_key(chain, parts[2], "spending")?;
    let viewing_key = decode_key(chain, parts[3], "viewing")?;

    return MetaAddress::new(chain, spending_key, viewing_key)
}

fn decode_key(chain: Chain, hex: &str, which: &str) -> Result<PublicKey> {
    if !hex.starts_with("0x") {
        return Err(Error::validation(format!("{} key must be 0x-prefixed hex", which)))
    }
    if hex.bytes().any(|b| b.is_ascii_uppercase()) {
        return Err(Error::validation(format!("{} key must be lowercase hex", which)))
    }
    return PublicKey::from_hex(chain.curve(), hex)
        .map_err(|e| Error::validation(format!("{} key for {}: {}", which, chain, e)))
}

impl fmt::Display for MetaAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", encode_meta_address(self))
    }

} impl FromStr for MetaAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        return decode_meta_address(s)
    }
}
