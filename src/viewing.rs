/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Viewing keys: selective disclosure of transaction metadata.
//!
//! A viewing key is a 32-byte symmetric secret with a public fingerprint (`hash = SHA256(key)`)
//! and a path label. Keys form a tree: `derive_viewing_key(parent, path)` gives a child
//! from which the parent cannot be recovered.
//!
//! Records are encrypted with XChaCha20-Poly1305 under `HKDF(key, path)`, with a fresh random
//! 24-byte nonce per encryption.

use std::{
    fmt,
    str::FromStr
};

use chacha20poly1305::{
    aead::{
        Aead,
        KeyInit
    },
    Key,
    XChaCha20Poly1305,
    XNonce
};
use rand::{rngs::OsRng, RngCore};
use subtle::{
    Choice,
    ConstantTimeEq
};
use zeroize::{
    Zeroize,
    Zeroizing
};

use crate::errors::*;
use crate::hashes::*;
use crate::tobytes::*;

///Length of an XChaCha20-Poly1305 nonce.
pub const NONCE_LENGTH: usize = 24;
///Length of the Poly1305 tag appended to every ciphertext.
pub const TAG_LENGTH: usize = 16;

///A viewing key.
///
///The secret `key` is wiped on drop; `hash` and `path` are public.
#[derive(Clone, Zeroize, Serialize, Deserialize)]
#[serde(try_from = "ViewingKeyFields", rename_all = "camelCase")]
pub struct ViewingKey {
    #[serde(with = "serde_hex")]
    key: [u8; 32],
    #[zeroize(skip)]
    #[serde(with = "serde_hex")]
    hash: [u8; 32],
    #[zeroize(skip)]
    path: String

} impl ViewingKey {
    ///Wrap existing key material.
    pub fn from_bytes<S: Into<String>>(key: [u8; 32], path: S) -> Self {
        return Self{
            hash: derive_viewing_key_hash(&key),
            key,
            path: path.into()
        }
    }

    pub fn key(&self) -> &[u8; 32] {
        return &self.key
    }

    ///`SHA256(key)`: safe to publish.
    pub fn hash(&self) -> &[u8; 32] {
        return &self.hash
    }

    pub fn path(&self) -> &str {
        return &self.path
    }

    ///The symmetric key records are encrypted under: `HKDF(key, path)`.
    fn encryption_key(&self) -> Result<Zeroizing<[u8; 32]>> {
        return Ok(Zeroizing::new(domain_hkdf(&self.key, domains::VIEWING_KEY_ENCRYPT, self.path.as_bytes())?))
    }

} impl ConstantTimeEq for ViewingKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        //hash and path are public
        return self.key[..].ct_eq(&other.key[..]) & Choice::from((self.path == other.path) as u8)
    }

} impl PartialEq for ViewingKey {
    fn eq(&self, other: &Self) -> bool {
        return self.ct_eq(other).into()
    }

} impl Eq for ViewingKey {} impl fmt::Debug for ViewingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewingKey")
            .field("key", &"<redacted>")
            .field("hash", &to_hex(&self.hash))
            .field("path", &self.path)
            .finish()
    }

} impl Drop for ViewingKey {
    fn drop(&mut self) {
        self.zeroize()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ViewingKeyFields {
    #[serde(with = "serde_hex")]
    key: [u8; 32],
    #[serde(with = "serde_hex")]
    hash: [u8; 32],
    path: String

} impl TryFrom<ViewingKeyFields> for ViewingKey {
    type Error = Error;

    fn try_from(mut fields: ViewingKeyFields) -> Result<Self> {
        let key = Self::from_bytes(fields.key, std::mem::take(&mut fields.path));
        fields.key.zeroize();
        if key.hash != fields.hash {
            return Err(Error::validation("viewing key hash does not match the key"))
        }
        return Ok(key)
    }
}

///`SHA256(key)`, the public fingerprint of a viewing key.
pub fn derive_viewing_key_hash(key: &[u8]) -> [u8; 32] {
    return sha256(key)
}

///Generate a new random viewing key. `path` defaults to the empty string.
pub fn generate_viewing_key(path: Option<&str>) -> ViewingKey {
    let mut key = [0u8; 32];
    OsRng.fill_bytes(&mut key);
    let viewing_key = ViewingKey::from_bytes(key, path.unwrap_or_default());
    key.zeroize();
    return viewing_key
}

///Derive the child of `parent` at `child_path`.
///
///Siblings are independent of each other, and the parent can't be recovered from a child.
pub fn derive_viewing_key(parent: &ViewingKey, child_path: &str) -> Result<ViewingKey> {
    let mut key = domain_hkdf(&parent.key, domains::VIEWING_KEY_DERIVE, child_path.as_bytes())?;
    let child = ViewingKey::from_bytes(key, child_path);
    key.zeroize();
    return Ok(child)
}

///Ciphertext of a record, addressed to one viewing key.
///
///All three fields travel together; on the wire each is a `0x` hex string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedBlob {
    ///Ciphertext, with the 16-byte tag appended.
    #[serde(with = "serde_hex")]
    pub ciphertext: Vec<u8>,
    #[serde(with = "serde_hex")]
    pub nonce: [u8; NONCE_LENGTH],
    ///`hash` of the viewing key this was encrypted for.
    #[serde(with = "serde_hex")]
    pub viewing_key_hash: [u8; 32]
}

///The structured record usually disclosed through a viewing key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionMetadata {
    pub sender: String,
    pub recipient: String,
    ///Amount in the chain's smallest unit.
    pub amount: u128,
    ///Unix timestamp, seconds.
    pub timestamp: u64,
    pub memo: Option<String>

} impl ToBytes for TransactionMetadata {}

///Encrypt `data` so that holders of `viewing_key` (and only they) can read it.
///
///A fresh nonce is drawn for every call, so encrypting the same record twice
///gives two different blobs.
pub fn encrypt_for_viewing<T: ToBytes>(data: &T, viewing_key: &ViewingKey) -> Result<EncryptedBlob> {
    let plaintext = Zeroizing::new(data.to_bytes()?);
    let key = viewing_key.encryption_key()?;
    let cipher = XChaCha20Poly1305::new(Key::from_slice(&key[..]));

    let mut nonce = [0u8; NONCE_LENGTH];
    OsRng.fill_bytes(&mut nonce);

    let ciphertext = cipher.encrypt(XNonce::from_slice(&nonce), plaintext.as_slice())
        .map_err(|_| Error::validation("record too large to encrypt"))?;

    return Ok(EncryptedBlob{
        ciphertext,
        nonce,
        viewing_key_hash: *viewing_key.hash()
    })
}

///Decrypt a blob with `viewing_key`.
///
///Fails with `ViewingKeyMismatch` if the blob was addressed to another key,
///and with `Authentication` if the ciphertext or nonce was modified.
pub fn decrypt_with_viewing<T: ToBytes>(blob: &EncryptedBlob, viewing_key: &ViewingKey) -> Result<T> {
    //recomputed from the key rather than trusting the stored hash
    let expected = derive_viewing_key_hash(viewing_key.key());
    if !bool::from(expected[..].ct_eq(&blob.viewing_key_hash[..])) {
        return Err(Error::ViewingKeyMismatch)
    }

    let key = viewing_key.encryption_key()?;
    let cipher = XChaCha20Poly1305::new(Key::from_slice(&key[..]));
    let plaintext = Zeroizing::new(
        cipher.decrypt(XNonce::from_slice(&blob.nonce), blob.ciphertext.as_slice())
            .map_err(|_| Error::Authentication)?
    );

    return T::from_bytes(&plaintext)
}

///How much of a transaction is hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrivacyLevel {
    ///Everything public.
    Transparent,
    ///Amounts and metadata encrypted, no viewing key shared.
    Shielded,
    ///Encrypted, with a viewing key available to an auditor.
    Compliant

} impl PrivacyLevel {
    pub fn should_encrypt(&self) -> bool {
        return matches!(self, Self::Shielded | Self::Compliant)
    }

    pub fn should_include_viewing_key(&self) -> bool {
        return *self == Self::Compliant
    }

} impl FromStr for PrivacyLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        return match s.to_ascii_lowercase().as_str() {
            "transparent" => Ok(Self::Transparent),
            "shielded" => Ok(Self::Shielded),
            "compliant" => Ok(Self::Compliant),
            _ => Err(Error::validation(format!("unknown privacy level: {}", s)))
        }
    }

} impl fmt::Display for PrivacyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", match self {
            Self::Transparent => "transparent",
            Self::Shielded => "shielded",
            Self::Compliant => "compliant"
        })
    }
}
