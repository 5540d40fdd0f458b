/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Cryptographic core of a cross-chain privacy protocol:
//! stealth addresses on secp256k1 and ed25519, Pedersen commitments,
//! viewing-key encryption, and oblivious nullifiers.

#[macro_use]
extern crate lazy_static;


//internal modules
mod types;
pub use types::*;
mod tobytes;
pub use tobytes::{
    ToBytes,
    to_hex,
    from_hex,
    from_hex_array
};


//uncommon public modules
pub mod hashes;
pub mod random;


//"normal" public modules
pub mod errors;
pub mod curve;

pub mod address;
pub mod pedersen;
pub mod viewing;
pub mod nullifier;


pub mod common {
    //! A collection of commonly-used things in this crate.
    //! Errors, types, to/from bytes, and the curve selector are all included.
    //!
    //! This is intended for situations where you don't want to bother with
    //! manually specifying everything you need.
    //! Relying on something like this is generally considered bad practice,
    //! and is intended for use in tests, examples, mockups, etc.
    //!
    //! Use `common::*` if you wish to automatically import everything.

    pub use crate::{
        types::*, errors::*, tobytes::*,
        curve::{Curve, CurveOps, Secp256k1, Ed25519, SCALAR_LENGTH}
    };
}


mod internal_common {
    //! Similar to `common`, but for internal purposes only.
    //! This includes everything in `common`, as well as internal/less-common modules.
    //!
    //! Use `internal_common::*` if you wish to automatically import everything.

    pub use crate::{
        common::*, hashes::*
    };
}
