/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Errors returned by every fallible operation in this crate.

use thiserror::Error;

///Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

///Errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    ///Malformed, mismatched-length or out-of-range input.
    ///The caller should not retry without fixing the input.
    #[error("validation error: {0}")]
    Validation(String),

    ///The AEAD tag did not verify.
    ///Either the ciphertext/nonce was tampered with, or the wrong key was used.
    #[error("authentication failed: ciphertext or nonce was modified, or the key is wrong")]
    Authentication,

    ///The blob was encrypted for a different viewing key.
    ///Detected from the public key hash before any decryption is attempted.
    #[error("viewing key does not match the key this blob was encrypted for")]
    ViewingKeyMismatch,

    ///A derivation produced a zero scalar or an identity point.
    ///Unreachable for honest random input, but never ignored.
    #[error("invariant violation: {0}")]
    InvariantViolation(&'static str),

} impl Error {
    ///Shorthand for `Error::Validation`.
    pub(crate) fn validation<S: Into<String>>(msg: S) -> Self {
        return Self::Validation(msg.into())
    }

    ///Build an `InvariantViolation`, logging it on the way out.
    pub(crate) fn invariant(what: &'static str) -> Self {
        tracing::warn!(invariant = what, "invariant violation");
        return Self::InvariantViolation(what)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_test() {
        assert!(Error::validation("bad chain").to_string() == "validation error: bad chain");
        assert!(Error::invariant("zero scalar") == Error::InvariantViolation("zero scalar"));
        assert!(Error::Authentication != Error::ViewingKeyMismatch);
    }
}
