/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! [Elliptic Curve Diffie Hellman (ECDH)](https://en.wikipedia.org/wiki/Elliptic-curve_Diffie%E2%80%93Hellman)
//! and the curve-generic stealth address derivations built on it.

use std::fmt;

use subtle::ConstantTimeEq;
use zeroize::{
    Zeroize,
    Zeroizing
};

use crate::internal_common::*;
use crate::curve::{
    nonzero,
    random_nonzero,
    point,
    public_key,
    to_public
};
use super::{
    MetaAddress,
    MetaAddressKeypair,
    StealthAddress,
    StealthAddressRecovery
};


///Shared secret between a sender's ephemeral key and a recipient's spending key:
///the SHA-256 hash `h` of the ECDH result.
///
///The sender gets it from `r * P_spend`, the recipient from `p_spend * R`.
///Without one of those private keys, it is impossible to determine.
///
///**This should not be publically shared.**
#[derive(Clone, PartialEq, Eq, Zeroize)]
pub struct SharedSecret(
    [u8; 32]

); impl SharedSecret {
    ///Given one side's private scalar and the other side's public point,
    ///compute the shared secret.
    pub(crate) fn get<C: CurveOps>(my_private: &C::Scalar, other_public: &C::Point) -> Result<Self> {
        let shared = C::mul(other_public, my_private);
        let bytes = Zeroizing::new(C::ecdh_bytes(&shared)
            .ok_or_else(|| Error::invariant("ecdh result is the identity"))?);
        return Ok(Self(sha256(&*bytes)))
    }

    ///The view tag: first byte of the shared secret.
    pub fn view_tag(&self) -> ViewTag {
        return self.0[0]
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        return &self.0
    }

    ///The shared secret as a scalar `h`, reduced modulo the group order.
    pub(crate) fn as_scalar<C: CurveOps>(&self) -> Result<Zeroizing<C::Scalar>> {
        return nonzero::<C>(C::scalar_from_hash(&self.0), "shared secret reduced to zero")
    }

} impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedSecret(<redacted>)")
    }

} impl Drop for SharedSecret {
    fn drop(&mut self) {
        self.zeroize()
    }
}


///Draw a fresh spending/viewing keypair on `C`.
pub(crate) fn generate_meta_address<C: CurveOps>(chain: Chain) -> Result<MetaAddressKeypair> {
    let spending = random_nonzero::<C>()?;
    let viewing = random_nonzero::<C>()?;

    let meta_address = MetaAddress::new(
        chain,
        to_public::<C>(&spending)?,
        to_public::<C>(&viewing)?
    )?;

    return Ok(MetaAddressKeypair{
        meta_address,
        spending_private_key: PrivateKey::from_scalar::<C>(&spending),
        viewing_private_key: PrivateKey::from_scalar::<C>(&viewing)
    })
}

///Sender side: `R = r*G`, `h = H(r*P_spend)`, `A = P_view + h*G`.
pub(crate) fn generate_stealth_address<C: CurveOps>(meta_address: &MetaAddress) -> Result<(StealthAddress, SharedSecret)> {
    let spending_public = point::<C>(meta_address.spending_key())?;
    let viewing_public = point::<C>(meta_address.viewing_key())?;

    //never reused, never supplied by the caller
    let ephemeral = random_nonzero::<C>()?;
    let ephemeral_public = to_public::<C>(&ephemeral)?;

    let shared_secret = SharedSecret::get::<C>(&ephemeral, &spending_public)?;
    let h = shared_secret.as_scalar::<C>()?;
    let address = public_key::<C>(&C::add(&viewing_public, &C::mul_base(&h)))?;

    let stealth_address = StealthAddress::new(address, ephemeral_public, shared_secret.view_tag())?;
    return Ok((stealth_address, shared_secret))
}

///Recipient side of the ECDH: `h' = H(p_spend*R)`.
fn recipient_secret<C: CurveOps>(
    stealth_address: &StealthAddress,
    spending_private_key: &PrivateKey
) -> Result<SharedSecret> {
    let ephemeral_public = point::<C>(stealth_address.ephemeral_public_key())?;
    let spending = spending_private_key.to_scalar::<C>()?;
    return SharedSecret::get::<C>(&spending, &ephemeral_public)
}

///`q_view + h mod n`
fn one_time_scalar<C: CurveOps>(
    shared_secret: &SharedSecret,
    viewing: &C::Scalar
) -> Result<Zeroizing<C::Scalar>> {
    let h = shared_secret.as_scalar::<C>()?;
    return nonzero::<C>(C::scalar_add(viewing, &h), "stealth private key is zero")
}

pub(crate) fn derive_stealth_private_key<C: CurveOps>(
    stealth_address: &StealthAddress,
    spending_private_key: &PrivateKey,
    viewing_private_key: &PrivateKey
) -> Result<StealthAddressRecovery> {
    let viewing = viewing_private_key.to_scalar::<C>()?;
    let shared_secret = recipient_secret::<C>(stealth_address, spending_private_key)?;
    let private_key = one_time_scalar::<C>(&shared_secret, &viewing)?;

    //the recovered key must actually spend this address
    let derived = to_public::<C>(&private_key)?;
    if !bool::from(derived.ct_eq(stealth_address.address())) {
        return Err(Error::validation("stealth address does not belong to these keys"))
    }

    return Ok(StealthAddressRecovery{
        stealth_address: *stealth_address.address(),
        ephemeral_public_key: *stealth_address.ephemeral_public_key(),
        private_key: PrivateKey::from_scalar::<C>(&private_key)
    })
}

pub(crate) fn check_stealth_address<C: CurveOps>(
    stealth_address: &StealthAddress,
    spending_private_key: &PrivateKey,
    viewing_private_key: &PrivateKey
) -> Result<bool> {
    //both keys are checked whether or not the tag matches
    let viewing = viewing_private_key.to_scalar::<C>()?;
    let shared_secret = recipient_secret::<C>(stealth_address, spending_private_key)?;

    //cheap rejection of ~255/256 candidates
    if shared_secret.view_tag() != stealth_address.view_tag() {
        return Ok(false)
    }

    //a matching tag alone is a 1/256 coincidence, always do the full comparison
    let private_key = one_time_scalar::<C>(&shared_secret, &viewing)?;
    let expected = to_public::<C>(&private_key)?;
    return Ok(bool::from(expected.ct_eq(stealth_address.address())))
}
