/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    str::FromStr
};

use subtle::ConstantTimeEq;
use zeroize::{
    Zeroize,
    Zeroizing
};

use crate::curve::*;
use crate::errors::*;
use crate::tobytes::*;

///A chain this crate can produce stealth addresses for.
///
///Each chain is bound to exactly one curve, see `Chain::curve`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    Ethereum,
    Polygon,
    Arbitrum,
    Optimism,
    Base,
    Bitcoin,
    Zcash,
    Solana,
    Near

} impl Chain {
    ///Every supported chain.
    pub const ALL: [Chain; 9] = [
        Self::Ethereum, Self::Polygon, Self::Arbitrum, Self::Optimism, Self::Base,
        Self::Bitcoin, Self::Zcash, Self::Solana, Self::Near
    ];

    ///The curve keys for this chain live on.
    pub const fn curve(&self) -> Curve {
        return match self {
            Self::Solana | Self::Near => Curve::Ed25519,
            _ => Curve::Secp256k1
        }
    }

    ///Canonical lowercase identifier, as used in encoded meta-addresses.
    pub const fn as_str(&self) -> &'static str {
        return match self {
            Self::Ethereum => "ethereum",
            Self::Polygon => "polygon",
            Self::Arbitrum => "arbitrum",
            Self::Optimism => "optimism",
            Self::Base => "base",
            Self::Bitcoin => "bitcoin",
            Self::Zcash => "zcash",
            Self::Solana => "solana",
            Self::Near => "near"
        }
    }

} impl FromStr for Chain {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_ascii_lowercase();
        return Self::ALL.iter()
            .find(|chain| chain.as_str() == lower)
            .copied()
            .ok_or_else(|| Error::validation(format!("unknown chain: {}", s)))
    }

} impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

///An encoded curve public key.
///
///The variant fixes both the curve and the byte length,
///so a key can never be read as belonging to the other curve.
///Construction only checks the encoding shape; curve membership is checked
///whenever the key is actually used in arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PublicKey {
    ///Compressed SEC1 point, prefix `0x02` or `0x03`.
    Secp256k1([u8; 33]),
    ///Compressed Edwards y-coordinate.
    Ed25519([u8; 32])

} impl PublicKey {
    ///Parse a public key for `curve`, checking the length (and SEC1 prefix).
    pub fn from_slice(curve: Curve, bytes: &[u8]) -> Result<Self> {
        if bytes.len() != curve.public_key_length() {
            return Err(Error::validation(format!(
                "{} public key must be {} bytes, got {}", curve, curve.public_key_length(), bytes.len())))
        }
        return match curve {
            Curve::Secp256k1 => {
                if bytes[0] != 0x02 && bytes[0] != 0x03 {
                    return Err(Error::validation("secp256k1 public key must be compressed (0x02/0x03 prefix)"))
                }
                let mut key = [0u8; 33];
                key.copy_from_slice(bytes);
                Ok(Self::Secp256k1(key))
            },
            Curve::Ed25519 => {
                let mut key = [0u8; 32];
                key.copy_from_slice(bytes);
                Ok(Self::Ed25519(key))
            }
        }
    }

    ///Parse a `0x` hex public key for `curve`.
    pub fn from_hex(curve: Curve, string: &str) -> Result<Self> {
        return Self::from_slice(curve, &from_hex(string)?)
    }

    ///Parse a public key whose curve is implied by its length.
    pub fn from_slice_any(bytes: &[u8]) -> Result<Self> {
        return match bytes.len() {
            33 => Self::from_slice(Curve::Secp256k1, bytes),
            32 => Self::from_slice(Curve::Ed25519, bytes),
            len => Err(Error::validation(format!("public key must be 32 or 33 bytes, got {}", len)))
        }
    }

    pub fn curve(&self) -> Curve {
        return match self {
            Self::Secp256k1(_) => Curve::Secp256k1,
            Self::Ed25519(_) => Curve::Ed25519
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        return match self {
            Self::Secp256k1(bytes) => bytes,
            Self::Ed25519(bytes) => bytes
        }
    }

    pub fn to_hex(&self) -> String {
        return to_hex(self.as_bytes())
    }

} impl ConstantTimeEq for PublicKey {
    fn ct_eq(&self, other: &Self) -> subtle::Choice {
        //the curve tag is public, only the key bytes need constant time
        if self.curve() != other.curve() {
            return subtle::Choice::from(0)
        }
        return self.as_bytes().ct_eq(other.as_bytes())
    }

} impl TryFrom<String> for PublicKey {
    type Error = Error;

    fn try_from(string: String) -> Result<Self> {
        return Self::from_slice_any(&from_hex(&string)?)
    }

} impl From<PublicKey> for String {
    fn from(key: PublicKey) -> String {
        return key.to_hex()
    }

} impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

///A 32-byte private scalar.
///
///The bytes are interpreted in the native order of whichever curve uses them
///(big-endian for secp256k1, little-endian for ed25519),
///and must be a canonical, non-zero scalar of that curve.
///
///The bytes are wiped on drop, and never printed by `Debug`.
#[derive(Clone, Zeroize, Serialize, Deserialize)]
pub struct PrivateKey(
    #[serde(with = "serde_hex")]
    [u8; 32]

); impl PrivateKey {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        return Self(bytes)
    }

    ///Parse a private key from exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; 32] = bytes.try_into()
            .map_err(|_| Error::validation(format!("private key must be 32 bytes, got {}", bytes.len())))?;
        return Ok(Self(bytes))
    }

    pub fn from_hex(string: &str) -> Result<Self> {
        let bytes = Zeroizing::new(from_hex(string)?);
        return Self::from_slice(&bytes)
    }

    pub fn to_hex(&self) -> String {
        return to_hex(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        return &self.0
    }

    pub(crate) fn from_scalar<C: CurveOps>(scalar: &C::Scalar) -> Self {
        return Self(C::scalar_to_bytes(scalar))
    }

    ///Interpret this key as a scalar of curve `C`.
    pub(crate) fn to_scalar<C: CurveOps>(&self) -> Result<Zeroizing<C::Scalar>> {
        let scalar = C::scalar_from_bytes(&self.0)
            .ok_or_else(|| Error::validation(format!("private key is not a canonical {} scalar", C::CURVE)))?;
        let scalar = Zeroizing::new(scalar);
        if C::scalar_is_zero(&scalar) {
            return Err(Error::validation("private key is zero"))
        }
        return Ok(scalar)
    }

    ///Check that this key is usable on `curve`.
    pub fn validate(&self, curve: Curve) -> Result<()> {
        return match curve {
            Curve::Secp256k1 => self.to_scalar::<Secp256k1>().map(|_| ()),
            Curve::Ed25519 => self.to_scalar::<Ed25519>().map(|_| ())
        }
    }

    ///The public key of this private key on `curve`.
    pub fn public_key(&self, curve: Curve) -> Result<PublicKey> {
        return match curve {
            Curve::Secp256k1 => to_public::<Secp256k1>(&*self.to_scalar::<Secp256k1>()?),
            Curve::Ed25519 => to_public::<Ed25519>(&*self.to_scalar::<Ed25519>()?)
        }
    }

} impl ConstantTimeEq for PrivateKey {
    fn ct_eq(&self, other: &Self) -> subtle::Choice {
        return self.0[..].ct_eq(&other.0[..])
    }

} impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        return self.ct_eq(other).into()
    }

} impl Eq for PrivateKey {} impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey(<redacted>)")
    }

} impl Drop for PrivateKey {
    fn drop(&mut self) {
        //clear the key from memory
        self.zeroize()
    }
}

///A 1-byte public tag used to quickly eliminate a stealth address whose shared secret does not match.
///
///This can be used to improve scanning speeds:
///Items whose view tags which do not match the one expected
///are discarded so we don't have to waste any more time on them.
///
///Note that this does not guarantee that the keys match.
///There is a 1/256 chance of a false positive, but zero chance of a false negative.
pub type ViewTag = u8;
