/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Byte encodings: `0x`-prefixed hex and the canonical binary codec.

pub use serde::{
    Serialize,
    Deserialize,
    de::DeserializeOwned
};
use crate::errors::*;

///Encode bytes as lowercase hex with a `0x` prefix.
pub fn to_hex(bytes: &[u8]) -> String {
    return format!("0x{}", hex::encode(bytes))
}

///Decode hex, with or without a `0x` prefix.
pub fn from_hex(string: &str) -> Result<Vec<u8>> {
    let stripped = string.strip_prefix("0x").unwrap_or(string);
    return hex::decode(stripped)
        .map_err(|e| Error::validation(format!("invalid hex: {}", e)))
}

///Decode hex into a fixed-size array, rejecting any other length.
pub fn from_hex_array<const N: usize>(string: &str) -> Result<[u8; N]> {
    let bytes = from_hex(string)?;
    let len = bytes.len();
    return bytes.try_into()
        .map_err(|_| Error::validation(format!("expected {} bytes, got {}", N, len)))
}

///Implements functions to convert to (`to_bytes`) and from (`from_bytes`) bytes
///for the record types in this crate.
///
///This is also the canonical serialization used when encrypting records for a viewing key.
pub trait ToBytes: Sized + Serialize + DeserializeOwned {
    fn to_bytes(&self) -> Result<Vec<u8>> {
        return bincode::serialize(self)
            .map_err(|e| Error::validation(format!("encoding error: {}", e)))
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        return bincode::deserialize(bytes)
            .map_err(|e| Error::validation(format!("decoding error: {}", e)))
    }
}

pub mod serde_hex {
    //! `#[serde(with = "serde_hex")]` adapter: bytes as `0x` hex strings.

    use serde::{
        de::Error as _,
        Deserialize,
        Deserializer,
        Serializer
    };

    pub fn serialize<S: Serializer, T: AsRef<[u8]>>(bytes: &T, serializer: S) -> Result<S::Ok, S::Error> {
        return serializer.serialize_str(&super::to_hex(bytes.as_ref()))
    }

    pub fn deserialize<'de, D: Deserializer<'de>, T: TryFrom<Vec<u8>>>(deserializer: D) -> Result<T, D::Error> {
        let string = String::deserialize(deserializer)?;
        let bytes = super::from_hex(&string).map_err(D::Error::custom)?;
        let len = bytes.len();
        return T::try_from(bytes)
            .map_err(|_| D::Error::custom(format!("unexpected length {}", len)))
    }
}
