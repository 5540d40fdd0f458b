/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Random identifiers.

use rand::{rngs::OsRng, RngCore};

use crate::tobytes::to_hex;

///`length` random bytes, as `0x` hex.
pub fn generate_random_bytes(length: usize) -> String {
    let mut bytes = vec![0u8; length];
    OsRng.fill_bytes(&mut bytes);
    return to_hex(&bytes)
}

///A new intent id: `sip-` followed by 16 random bytes in hex.
pub fn generate_intent_id() -> String {
    let mut bytes = [0u8; 16];
    OsRng.fill_bytes(&mut bytes);
    return format!("sip-{}", hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_id_test() {
        let id = generate_intent_id();
        assert!(id.starts_with("sip-"));
        assert!(id.len() == 4 + 32);
        assert!(id != generate_intent_id());
    }

    #[test]
    fn random_bytes_test() {
        assert!(generate_random_bytes(16).len() == 2 + 32);
        assert!(generate_random_bytes(0) == "0x");
    }
}
